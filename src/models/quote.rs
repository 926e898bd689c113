use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored quote record. `id` is assigned by the store on creation and
/// never changes; `likes` only ever moves up, through the like operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Quote {
    pub id: i64,
    pub name: String,
    pub quote: String,
    pub submitter: String,
    pub timestamp: DateTime<Utc>,
    pub likes: i64,
}

/// Submission payload for a new quote. Fields missing from the form
/// deserialize to empty strings and are stored as such.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewQuote {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub submitter: String,
}

/// Result of the person filter: quotes attributed to the person,
/// newest first, and quotes they submitted.
#[derive(Clone, Debug)]
pub struct PersonQuotes {
    pub person: String,
    pub by_name: Vec<Quote>,
    pub by_submitter: Vec<Quote>,
}

/// Sort key for the listing endpoints. Only the four bare field names
/// are recognized, each ascending; anything else falls back to the
/// newest-first default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuoteOrder {
    #[default]
    NewestFirst,
    Timestamp,
    Name,
    Submitter,
    Likes,
}

impl QuoteOrder {
    pub fn parse(key: Option<&str>) -> Self {
        match key {
            Some("timestamp") => Self::Timestamp,
            Some("name") => Self::Name,
            Some("submitter") => Self::Submitter,
            Some("likes") => Self::Likes,
            _ => Self::NewestFirst,
        }
    }

    /// ORDER BY clause for this key. Static strings only.
    pub(crate) fn sql(self) -> &'static str {
        match self {
            Self::NewestFirst => "timestamp DESC",
            Self::Timestamp => "timestamp ASC",
            Self::Name => "name ASC",
            Self::Submitter => "submitter ASC",
            Self::Likes => "likes ASC",
        }
    }
}

/// Uppercases the first character of every alphabetic run and lowercases
/// the rest, so `"ada LOVELACE"` becomes `"Ada Lovelace"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_single_word() {
        assert_eq!(title_case("ada"), "Ada");
    }

    #[test]
    fn title_case_normalizes_mixed_case_words() {
        assert_eq!(title_case("ada LOVELACE"), "Ada Lovelace");
        assert_eq!(title_case("gRACE hOPPER"), "Grace Hopper");
    }

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("jean-luc o'neill"), "Jean-Luc O'Neill");
    }

    #[test]
    fn title_case_leaves_empty_input_alone() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn order_parses_bare_keys_only() {
        assert_eq!(QuoteOrder::parse(Some("likes")), QuoteOrder::Likes);
        assert_eq!(QuoteOrder::parse(Some("name")), QuoteOrder::Name);
        assert_eq!(QuoteOrder::parse(Some("submitter")), QuoteOrder::Submitter);
        assert_eq!(QuoteOrder::parse(Some("timestamp")), QuoteOrder::Timestamp);
    }

    #[test]
    fn order_falls_back_to_newest_first() {
        assert_eq!(QuoteOrder::parse(None), QuoteOrder::NewestFirst);
        assert_eq!(QuoteOrder::parse(Some("-likes")), QuoteOrder::NewestFirst);
        assert_eq!(QuoteOrder::parse(Some("votes")), QuoteOrder::NewestFirst);
        assert_eq!(QuoteOrder::parse(Some("")), QuoteOrder::NewestFirst);
    }
}
