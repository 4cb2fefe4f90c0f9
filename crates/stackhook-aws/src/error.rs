//! AWS error classification
//!
//! SDK errors are classified by their `.code()` so that handlers can treat
//! "already gone" as success without matching on message strings.

use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// AWS error categories relevant to reconciliation
#[derive(Debug, Error)]
pub enum AwsError {
    /// Resource does not exist (delete is already done)
    #[error("Resource not found: {message}")]
    NotFound { code: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    Throttled { message: String },

    /// Any other SDK or request construction error
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }
}

/// Error codes meaning the addressed resource does not exist
const NOT_FOUND_CODES: &[&str] = &[
    // CloudWatch Logs
    "ResourceNotFoundException",
    // ECS
    "ClusterNotFoundException",
    // SQS
    "AWS.SimpleQueueService.NonExistentQueue",
    "QueueDoesNotExist",
];

const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
];

/// Classify an AWS error by code
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled { message },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an SDK operation error (`SdkError<OperationError, _>`).
///
/// Works for every service crate: the metadata trait is shared by all of them.
pub fn classify_sdk_error<E>(error: &E) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = match error.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(error).to_string(),
    };
    classify_aws_error(error.code(), Some(&message))
}

pub type Result<T> = std::result::Result<T, AwsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        let err = classify_aws_error(
            Some("ResourceNotFoundException"),
            Some("The specified metric filter does not exist."),
        );
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            AwsError::NotFound { ref code, .. } if code == "ResourceNotFoundException"
        ));

        assert!(classify_aws_error(Some("ClusterNotFoundException"), None).is_not_found());
        assert!(
            classify_aws_error(Some("AWS.SimpleQueueService.NonExistentQueue"), None)
                .is_not_found()
        );
    }

    #[test]
    fn test_classify_throttled() {
        let err = classify_aws_error(Some("ThrottlingException"), Some("Rate exceeded"));
        assert!(matches!(err, AwsError::Throttled { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_classify_other() {
        let err = classify_aws_error(Some("AccessDeniedException"), Some("not authorized"));
        assert!(!err.is_not_found());
        assert!(matches!(
            err,
            AwsError::Sdk { code: Some(ref code), .. } if code == "AccessDeniedException"
        ));
        assert_eq!(err.to_string(), "AWS error: not authorized");
    }

    #[test]
    fn test_classify_without_code() {
        let err = classify_aws_error(None, None);
        match err {
            AwsError::Sdk { code, message } => {
                assert!(code.is_none());
                assert_eq!(message, "Unknown error");
            }
            other => panic!("expected Sdk, got {:?}", other),
        }
    }
}
