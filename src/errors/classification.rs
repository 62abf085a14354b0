use super::types::ClarityError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl ClarityError {
    /// Error taxonomy name, and whether the gateway may try the provider again.
    /// Only failures on the wire or at the provider are retryable.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, retryable) = match self {
            ClarityError::Transport(_) => ("TransportError", true),
            ClarityError::Timeout(_) => ("TimeoutError", true),
            ClarityError::Provider { .. } => ("ProviderError", true),
            ClarityError::Config(_) => ("ConfigurationError", false),
            ClarityError::Validation(_) => ("ValidationError", false),
            ClarityError::Parse(_) => ("ParseError", false),
            ClarityError::UpstreamData(_) => ("UpstreamDataError", false),
            ClarityError::Io(_) => ("IoError", false),
            ClarityError::Json(_) => ("JsonError", false),
            ClarityError::Yaml(_) => ("YamlError", false),
            ClarityError::Internal(_) => ("InternalError", false),
        };
        ErrorClassification { error_type, retryable }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_failures_are_retryable() {
        let transport = ClarityError::Transport("connection reset".into()).classify();
        assert!(transport.retryable);
        assert_eq!(transport.error_type, "TransportError");
        assert!(ClarityError::Timeout("30s elapsed".into()).classify().retryable);
        assert!(ClarityError::Provider { status: 503, message: "overloaded".into() }.classify().retryable);
    }

    #[test]
    fn test_local_failures_fail_fast() {
        let config = ClarityError::Config("DEEPSEEK_API_KEY is not set".into()).classify();
        assert!(!config.retryable);
        assert_eq!(config.error_type, "ConfigurationError");
        assert!(!ClarityError::Parse("No JSON array found".into()).classify().retryable);
        assert!(!ClarityError::Validation("Message is required".into()).classify().retryable);
        assert!(!ClarityError::UpstreamData("404".into()).classify().retryable);
    }
}
