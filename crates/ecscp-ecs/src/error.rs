use aws_sdk_ecs::error::{ProvideErrorMetadata, SdkError};
use ecscp_provisioner::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcsError {
    #[error("malformed capacity provider in ECS response: {0}")]
    Conversion(String),

    #[error("failed to build ECS request: {0}")]
    Build(#[from] aws_sdk_ecs::error::BuildError),
}

impl From<EcsError> for GatewayError {
    fn from(err: EcsError) -> Self {
        GatewayError::Permanent(err.to_string())
    }
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

/// Map an SDK failure onto the gateway's error taxonomy.
pub fn classify<E, R>(err: &SdkError<E, R>) -> GatewayError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = format_err_chain(err);
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            GatewayError::Transient(detail)
        }
        SdkError::ServiceError(_) => classify_service_error(err.code(), err.message(), detail),
        _ => GatewayError::Permanent(detail),
    }
}

/// Classify an ECS service error by its error code and message.
///
/// ECS reports both "already exists" and "does not exist" as a generic
/// `ClientException`; only the message tells them apart.
pub fn classify_service_error(
    code: Option<&str>,
    message: Option<&str>,
    detail: String,
) -> GatewayError {
    match code {
        Some(
            "ThrottlingException"
            | "ServerException"
            | "UpdateInProgressException"
            | "LimitExceededException"
            | "ServiceUnavailableException",
        ) => GatewayError::Transient(detail),
        Some("ClientException") => {
            let message = message.unwrap_or_default().to_ascii_lowercase();
            if message.contains("already exists") {
                GatewayError::Conflict(detail)
            } else if message.contains("does not exist") || message.contains("not found") {
                GatewayError::NotFound(detail)
            } else {
                GatewayError::Permanent(detail)
            }
        }
        _ => GatewayError::Permanent(detail),
    }
}
