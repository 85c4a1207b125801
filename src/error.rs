use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the facade and the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request is missing something required; nothing was sent to the store.
    #[error("{0}")]
    Validation(&'static str),

    /// The store rejected the operation.
    #[error("{message}")]
    Store {
        /// Message reported by the store.
        message: String,
    },

    /// A value could not be converted to or from DynamoDB attribute values.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_dynamo::Error),

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(String),

    /// A JSON payload could not be encoded or decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The runtime configuration is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap a store error, keeping the message the service reported.
    ///
    /// Errors that never reached the service (construction, dispatch,
    /// timeouts) carry no metadata and are described by their full context.
    pub fn store<E, R>(error: &SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        let message = match error.message() {
            Some(message) => message.to_string(),
            None => DisplayErrorContext(error).to_string(),
        };
        Self::Store { message }
    }
}

impl<E, R> From<SdkError<E, R>> for Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        Self::store(&error)
    }
}
