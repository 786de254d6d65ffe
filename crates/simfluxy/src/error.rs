use thiserror::Error;

/// Errors raised synchronously by store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Malformed reducers mapping, detected when the store is built
    #[error("reducers must be an object of functions: {0}")]
    Configuration(String),

    /// Bad input to `init_state`, `dispatch` or `wait`
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `wait` or `dispatcher` called outside a tokio runtime
    #[error("no tokio runtime available to drive pending operations")]
    NoRuntime,
}

/// Outcome of a pending operation that did not lead to a dispatch.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("pending `{action_type}` rejected: {reason}")]
    Rejected { action_type: String, reason: String },

    #[error("payload for `{action_type}` is not serializable: {source}")]
    Payload {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dispatch queue closed before `{0}` was delivered")]
    QueueClosed(String),
}
