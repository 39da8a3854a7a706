use thiserror::Error;

use crate::model::WebhookEvent;

/// Validation failures raised at the service boundary.
///
/// Delivery failures are not errors: they come back as a
/// [`WebhookResponse`](crate::model::WebhookResponse) with `success: false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// Unknown id or a disabled configuration. The message says which.
    #[error("{0}")]
    NotFoundOrInactive(String),

    #[error("webhook {id} is not subscribed to {event}")]
    EventNotSubscribed { id: String, event: WebhookEvent },
}

pub type Result<T> = std::result::Result<T, WebhookError>;
