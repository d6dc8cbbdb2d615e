//! Error types for catalog queries.
//!
//! Queries only fail when a regular expression does not compile. The error
//! keeps the rejected pattern and the compiler error as fields so callers can
//! inspect them without parsing the message.

/// Errors returned by [`crate::ChartIndex::search`].
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query pattern is not a valid regular expression.
    #[error("error parsing regexp: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl QueryError {
    /// The pattern that was rejected.
    pub fn pattern(&self) -> &str {
        match self {
            QueryError::InvalidPattern { pattern, .. } => pattern,
        }
    }

    /// The regex compiler's diagnostic, verbatim.
    pub fn diagnostic(&self) -> String {
        match self {
            QueryError::InvalidPattern { source, .. } => source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(pattern: &str) -> QueryError {
        let source = regex::Regex::new(pattern).unwrap_err();
        QueryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }

    #[test]
    fn display_includes_compiler_diagnostic() {
        let err = invalid("th[");
        let message = err.to_string();
        assert!(message.starts_with("error parsing regexp: "));
        assert!(message.contains(&err.diagnostic()));
    }

    #[test]
    fn exposes_pattern_and_source() {
        let err = invalid("(unclosed");
        assert_eq!(err.pattern(), "(unclosed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryError>();
    }
}
