use askama::Template;
use askama_web::WebTemplate;

use crate::models::quote::{PersonQuotes, Quote};

/// One quote prepared for rendering: formatted timestamp and a
/// percent-encoded link to the person page.
#[derive(Debug)]
pub struct QuoteRow {
    pub id: i64,
    pub name: String,
    pub quote: String,
    pub submitter: String,
    pub posted: String,
    pub likes: i64,
    pub person_url: String,
}

impl From<Quote> for QuoteRow {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            person_url: format!("/view-person/{}", urlencoding::encode(&q.name)),
            posted: q.timestamp.format("%B %d, %Y %H:%M UTC").to_string(),
            name: q.name,
            quote: q.quote,
            submitter: q.submitter,
            likes: q.likes,
        }
    }
}

fn rows(quotes: Vec<Quote>) -> Vec<QuoteRow> {
    quotes.into_iter().map(QuoteRow::from).collect()
}

/// Home page: submission form plus the newest-first listing.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub quotes: Vec<QuoteRow>,
}

impl HomeTemplate {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes: rows(quotes) }
    }
}

/// Sortable listing page.
#[derive(Template, WebTemplate)]
#[template(path = "quotes.html")]
pub struct QuotesTemplate {
    pub quotes: Vec<QuoteRow>,
}

impl QuotesTemplate {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes: rows(quotes) }
    }
}

/// Detail page for a single quote.
#[derive(Template, WebTemplate, Debug)]
#[template(path = "quote.html")]
pub struct QuoteTemplate {
    pub quote: QuoteRow,
}

impl QuoteTemplate {
    pub fn new(quote: Quote) -> Self {
        Self { quote: quote.into() }
    }
}

/// Person page: quotes attributed to them and quotes they submitted.
#[derive(Template, WebTemplate, Debug)]
#[template(path = "person.html")]
pub struct PersonTemplate {
    pub person: String,
    pub by_name: Vec<QuoteRow>,
    pub by_submitter: Vec<QuoteRow>,
}

impl PersonTemplate {
    pub fn new(person: PersonQuotes) -> Self {
        Self {
            person: person.person,
            by_name: rows(person.by_name),
            by_submitter: rows(person.by_submitter),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;
