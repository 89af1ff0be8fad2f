use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("User Already Exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Author Does not exists")]
    AuthorNotFound,

    #[error("Post Does not exists")]
    PostNotFound,

    #[error("Customer Does not Exists")]
    CustomerNotFound,

    #[error("Fail to {operation}, error-message: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    #[error("{message}")]
    PaymentProvider { message: String },

    #[error("ERROR ON SENDING webhooks-stripe")]
    QueuePublish,

    #[error("ERROR ON CONSUMING webhooks-stripe")]
    QueueConsume,

    #[error("Something went wrong, error: {source}")]
    CustomerProvisioning {
        #[source]
        source: Box<AppError>,
    },

    #[error("Webhook Error: {message}")]
    Webhook { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Logs a storage failure and wraps it; every storage error is treated
    /// uniformly, nothing propagates unclassified.
    pub fn storage(operation: &'static str, err: impl std::fmt::Display) -> Self {
        error!("Error on {}, {}", operation, err);
        AppError::Storage {
            operation,
            message: err.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UserAlreadyExists
            | AppError::AuthorNotFound
            | AppError::PostNotFound
            | AppError::CustomerNotFound
            | AppError::Storage { .. }
            | AppError::Webhook { .. } => StatusCode::CONFLICT,
            AppError::UserNotFound | AppError::CustomerProvisioning { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::PaymentProvider { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::QueuePublish | AppError::QueueConsume => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_render_with_operation_and_cause() {
        let err = AppError::Storage {
            operation: "create",
            message: "duplicate key value violates unique constraint".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Fail to create, error-message: duplicate key value violates unique constraint"
        );
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn provisioning_errors_embed_the_originating_message() {
        let err = AppError::CustomerProvisioning {
            source: Box::new(AppError::PaymentProvider {
                message: "No such customer".to_string(),
            }),
        };

        assert_eq!(err.to_string(), "Something went wrong, error: No such customer");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn queue_failures_are_service_unavailable() {
        assert_eq!(
            AppError::QueuePublish.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::QueueConsume.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
