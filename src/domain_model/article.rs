use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Store-assigned article identifier.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArticleIdError {
    #[error("id parameter is required")]
    Missing,
    #[error("id must be a valid number")]
    NotANumber,
}

impl ArticleId {
    /// Strict base-10 parse of the raw query value. Signs, whitespace and any
    /// trailing text are rejected rather than trimmed off.
    pub fn parse(raw: &str) -> Result<Self, ArticleIdError> {
        if raw.is_empty() {
            return Err(ArticleIdError::Missing);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ArticleIdError::NotANumber);
        }
        raw.parse::<u64>()
            .map(ArticleId)
            .map_err(|_| ArticleIdError::NotANumber)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_digits() {
        assert_eq!(ArticleId::parse("1"), Ok(ArticleId(1)));
        assert_eq!(ArticleId::parse("007"), Ok(ArticleId(7)));
        assert_eq!(
            ArticleId::parse("18446744073709551615"),
            Ok(ArticleId(u64::MAX))
        );
    }

    #[test]
    fn empty_is_missing() {
        assert_eq!(ArticleId::parse(""), Err(ArticleIdError::Missing));
    }

    #[test]
    fn rejects_anything_but_digits() {
        for raw in [
            "abc",
            "-1",
            "+1",
            " 1",
            "1 ",
            "1.5",
            "0x10",
            "1; DROP TABLE news",
            "1 OR 1=1",
            "1--",
            "18446744073709551616",
        ] {
            assert_eq!(
                ArticleId::parse(raw),
                Err(ArticleIdError::NotANumber),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn error_messages_match_client_contract() {
        assert_eq!(ArticleIdError::Missing.to_string(), "id parameter is required");
        assert_eq!(
            ArticleIdError::NotANumber.to_string(),
            "id must be a valid number"
        );
    }
}
