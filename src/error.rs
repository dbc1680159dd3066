use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A rule in the constant tables failed to compile. This is a defect in the
    /// rule data, never a property of the input document.
    #[error("Pattern rule '{rule}' failed to compile: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Document text is empty")]
    EmptyInput,

    #[error("Document text too large: {len} characters (limit {max})")]
    InputTooLarge { len: usize, max: usize },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl ExtractorError {
    /// True for errors caused by the caller's input rather than by the extractor.
    /// Transports map these to a client error and everything else to a 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractorError::EmptyInput | ExtractorError::InputTooLarge { .. } | ExtractorError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_classified() {
        assert!(ExtractorError::EmptyInput.is_client_error());
        assert!(ExtractorError::InputTooLarge { len: 10, max: 5 }.is_client_error());
        assert!(!ExtractorError::Config("bad".to_string()).is_client_error());
    }

    #[test]
    fn test_pattern_error_names_rule() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ExtractorError::Pattern {
            rule: "t1:broken".to_string(),
            source,
        };
        assert!(err.to_string().contains("t1:broken"));
        assert!(!err.is_client_error());
    }
}
