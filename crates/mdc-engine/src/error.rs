//! Engine error types.

/// Error that aborts a parse pass or a rule registration.
///
/// Rules signal "no match" with `Ok(false)`; only structural failures use
/// this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Recursive tokenization went deeper than the configured ceiling.
    #[error("nesting limit of {limit} exceeded")]
    NestingTooDeep {
        /// Configured maximum depth.
        limit: usize,
    },
    /// A rule reported success without advancing the cursor.
    #[error("rule `{rule}` matched without consuming input")]
    NoProgress {
        /// Name of the offending rule.
        rule: String,
    },
    /// `insert_before`/`insert_after` referenced a rule that isn't registered.
    #[error("no rule named `{0}`")]
    UnknownRule(String),
    /// A rule failed hard.
    #[error("rule `{rule}` failed: {source}")]
    Rule {
        /// Name of the failing rule.
        rule: String,
        /// Underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Wrap a rule-specific error.
    pub fn rule(
        rule: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Rule {
            rule: rule.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::NestingTooDeep { limit: 3 }.to_string(),
            "nesting limit of 3 exceeded"
        );
        assert_eq!(
            Error::UnknownRule("fence".to_owned()).to_string(),
            "no rule named `fence`"
        );
        let err = Error::rule("shorthand", "bad name");
        assert_eq!(err.to_string(), "rule `shorthand` failed: bad name");
    }
}
