use axum::{
    extract::{Form, Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::quote::{NewQuote, QuoteOrder},
    state::AppState,
    templates::{HomeTemplate, PersonTemplate, QuoteTemplate, QuotesTemplate},
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate, AppError> {
    let quotes = state.store().list(QuoteOrder::default()).await?;

    Ok(HomeTemplate::new(quotes))
}

#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<NewQuote>,
) -> Result<Redirect, AppError> {
    let quote = state.store().create(form).await?;
    tracing::info!(id = %quote.id, name = %quote.name, "added quote");

    Ok(Redirect::to("/"))
}

#[tracing::instrument(skip(state))]
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<QuoteTemplate, AppError> {
    let quote = state.store().get(id).await?;

    Ok(QuoteTemplate::new(quote))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.store().delete(id).await?;
    tracing::info!(id = %id, "deleted quote");

    Ok(Redirect::to("/"))
}

#[tracing::instrument(skip(state))]
pub async fn view_person(
    State(state): State<AppState>,
    Path(person): Path<String>,
) -> Result<PersonTemplate, AppError> {
    let person = state.store().by_person(&person).await?;

    Ok(PersonTemplate::new(person))
}

#[tracing::instrument(skip(state))]
pub async fn list_sorted(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<QuotesTemplate, AppError> {
    let order = QuoteOrder::parse(params.filter.as_deref());
    let quotes = state.store().list(order).await?;

    Ok(QuotesTemplate::new(quotes))
}

#[tracing::instrument(skip(state))]
pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let quote = state.store().like(id).await?;
    tracing::info!(id = %id, likes = %quote.likes, "liked quote");

    Ok(Redirect::to(&format!("/view/{id}")))
}

#[cfg(test)]
mod tests {
    use askama::Template;
    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;
    use crate::store::memory_store;

    async fn test_state() -> AppState {
        AppState::new(memory_store().await)
    }

    fn form(name: &str, quote: &str, submitter: &str) -> Form<NewQuote> {
        Form(NewQuote {
            name: name.into(),
            quote: quote.into(),
            submitter: submitter.into(),
        })
    }

    #[tokio::test]
    async fn create_redirects_to_home() {
        let state = test_state().await;

        let resp = create(State(state), form("ada", "Q", "s"))
            .await
            .unwrap()
            .into_response();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], "/");
    }

    #[tokio::test]
    async fn view_missing_quote_is_a_404_page() {
        let state = test_state().await;

        let err = view(State(state), Path(9001)).await.unwrap_err();
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_missing_quote_is_a_404_page() {
        let state = test_state().await;

        let err = delete(State(state), Path(9001)).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn like_missing_quote_is_a_404_page() {
        let state = test_state().await;

        let err = like(State(state), Path(9001)).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn view_person_without_matches_is_a_404_page() {
        let state = test_state().await;

        let err = view_person(State(state), Path("nobody".into()))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_redirects_to_home() {
        let state = test_state().await;

        create(State(state.clone()), form("ada", "Q", "s"))
            .await
            .unwrap();
        let id = home(State(state.clone())).await.unwrap().quotes[0].id;

        let resp = delete(State(state), Path(id))
            .await
            .unwrap()
            .into_response();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], "/");
    }

    #[tokio::test]
    async fn unrecognized_sort_key_falls_back_to_newest_first() {
        let state = test_state().await;

        create(State(state.clone()), form("a", "first", "s"))
            .await
            .unwrap();
        create(State(state.clone()), form("b", "second", "s"))
            .await
            .unwrap();

        let page = list_sorted(
            State(state),
            Query(ListParams {
                filter: Some("-likes".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(page.quotes[0].quote, "second");
        assert_eq!(page.quotes[1].quote, "first");
    }

    #[tokio::test]
    async fn likes_sort_key_orders_ascending() {
        let state = test_state().await;

        create(State(state.clone()), form("a", "liked", "s"))
            .await
            .unwrap();
        create(State(state.clone()), form("b", "not liked", "s"))
            .await
            .unwrap();

        let liked_id = home(State(state.clone()))
            .await
            .unwrap()
            .quotes
            .iter()
            .find(|q| q.quote == "liked")
            .unwrap()
            .id;
        like(State(state.clone()), Path(liked_id)).await.unwrap();

        let page = list_sorted(
            State(state),
            Query(ListParams {
                filter: Some("likes".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(page.quotes[0].quote, "not liked");
        assert_eq!(page.quotes[1].quote, "liked");
    }

    #[tokio::test]
    async fn view_person_collects_both_roles() {
        let state = test_state().await;

        create(State(state.clone()), form("ada", "attributed", "grace"))
            .await
            .unwrap();
        create(State(state.clone()), form("grace", "submitted", "Ada"))
            .await
            .unwrap();

        let page = view_person(State(state), Path("ada".into())).await.unwrap();

        assert_eq!(page.person, "Ada");
        assert_eq!(page.by_name.len(), 1);
        assert_eq!(page.by_name[0].quote, "attributed");
        assert_eq!(page.by_submitter.len(), 1);
        assert_eq!(page.by_submitter[0].quote, "submitted");
    }

    #[tokio::test]
    async fn create_like_view_round_trip() {
        let state = test_state().await;

        create(State(state.clone()), form("grace", "Q1", "sub1"))
            .await
            .unwrap();

        let page = home(State(state.clone())).await.unwrap();
        assert_eq!(page.quotes.len(), 1);
        assert_eq!(page.quotes[0].name, "Grace");

        let html = page.render().unwrap();
        assert!(html.contains("Grace"));
        assert!(html.contains("Q1"));

        let id = page.quotes[0].id;
        let resp = like(State(state.clone()), Path(id))
            .await
            .unwrap()
            .into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], format!("/view/{id}"));

        let detail = view(State(state), Path(id)).await.unwrap();
        assert_eq!(detail.quote.likes, 1);
    }
}
