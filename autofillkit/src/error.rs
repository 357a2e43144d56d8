use thiserror::Error;

/// Error outputs from `AutofillKit`
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum AutofillKitError {
    /// No delegate is registered, or the registered delegate has been
    /// deallocated. The module holds only a weak reference, so this is the
    /// normal signal once the extension's view controller goes away.
    #[error("delegate_unavailable")]
    DelegateUnavailable,
    /// A resolution or query was attempted while no autofill request is in
    /// progress
    #[error("no_pending_request")]
    NoPendingRequest,
    /// The current request has already been resolved with credentials or a
    /// cancellation; a request resolves exactly once
    #[error("request_already_resolved")]
    AlreadyResolved,
    /// The single-shot reply for the enablement query was resolved a second
    /// time
    #[error("reply_already_used")]
    ReplyAlreadyUsed,
    /// The delegate discarded the enablement reply without resolving it
    #[error("reply_dropped")]
    ReplyDropped,
    /// The enablement query deadline elapsed before the delegate resolved
    /// the reply
    #[error("query_timed_out: {seconds}s")]
    QueryTimedOut {
        /// The deadline that elapsed, in seconds.
        seconds: u64,
    },
    /// Unexpected error serializing information
    #[error("serialization_error: {0}")]
    SerializationError(String),
    /// The presented input is not valid for the requested operation
    #[error("invalid_input: {parameter} - {message}")]
    InvalidInput {
        /// Parameter name.
        parameter: String,
        /// Error message.
        message: String,
    },
}

/// Result type for `AutofillKit` operations.
pub type Result<T> = std::result::Result<T, AutofillKitError>;
