use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::error::AutofillKitError;

/// The capability set an object must implement to receive
/// credential-provider lifecycle events from the module.
///
/// The platform's credential-provider extension (on iOS, typically the
/// `ASCredentialProviderViewController` subclass) implements this trait and
/// registers itself with
/// [`CredentialProviderRequest::set_delegate`](crate::CredentialProviderRequest::set_delegate).
/// Registration is weak: the module never extends the delegate's lifetime.
///
/// For a single autofill request, exactly one of [`generated_credentials`]
/// and [`cancelled_request`] is invoked; the module enforces this with its
/// single-resolution request state.
///
/// ## Swift
///
/// ```swift
/// extension CredentialProviderViewController: CredentialProviderDelegate {
///     func generatedCredentials(username: String, password: String) {
///         let credential = ASPasswordCredential(user: username, password: password)
///         extensionContext.completeRequest(withSelectedCredential: credential)
///     }
///
///     func cancelledRequest(reason: String) {
///         extensionContext.cancelRequest(withError: NSError(
///             domain: ASExtensionErrorDomain,
///             code: ASExtensionError.userCanceled.rawValue))
///     }
///
///     func autofillIsEnabled(reply: AutofillEnabledReply) {
///         ASCredentialIdentityStore.shared.getState { state in
///             try? reply.resolve(isEnabled: state.isEnabled)
///         }
///     }
/// }
/// ```
///
/// [`generated_credentials`]: CredentialProviderDelegate::generated_credentials
/// [`cancelled_request`]: CredentialProviderDelegate::cancelled_request
#[uniffi::export(with_foreign)]
pub trait CredentialProviderDelegate: Send + Sync {
    /// Signals that the user selected or generated a credential for the
    /// pending request. The receiver is expected to hand the pair to the
    /// waiting OS autofill request; ownership of the values transfers with
    /// the call.
    fn generated_credentials(&self, username: String, password: String);

    /// Signals that the pending request was aborted by the user or the
    /// system. `reason` is a free-form descriptive string for logging and
    /// display, not a structured error code.
    fn cancelled_request(&self, reason: String);

    /// Asks whether system-level autofill is enabled for this app. The
    /// receiver must resolve `reply` exactly once, possibly after a deferred
    /// system query.
    fn autofill_is_enabled(&self, reply: Arc<AutofillEnabledReply>);
}

/// Single-shot reply to an autofill-enabled query.
///
/// Wraps the sending half of a one-shot channel. [`resolve`] succeeds
/// exactly once; dropping the reply unresolved surfaces as
/// [`AutofillKitError::ReplyDropped`] on the querying side.
///
/// [`resolve`]: AutofillEnabledReply::resolve
#[derive(uniffi::Object)]
pub struct AutofillEnabledReply {
    sender: Mutex<Option<oneshot::Sender<bool>>>,
}

#[uniffi::export]
impl AutofillEnabledReply {
    /// Fulfills the query with the system's enablement state.
    ///
    /// # Errors
    /// Returns [`AutofillKitError::ReplyAlreadyUsed`] if the reply has
    /// already been resolved.
    pub fn resolve(&self, is_enabled: bool) -> Result<(), AutofillKitError> {
        let Some(sender) = self.sender.lock().unwrap().take() else {
            return Err(AutofillKitError::ReplyAlreadyUsed);
        };
        if sender.send(is_enabled).is_err() {
            // The querying side gave up (deadline elapsed) before the reply
            // arrived; the late resolution is still a valid single use.
            log::debug!("autofill-enabled reply resolved after the query was abandoned");
        }
        Ok(())
    }
}

impl AutofillEnabledReply {
    /// Creates a reply and the receiving half the module awaits on.
    pub(crate) fn new() -> (Arc<Self>, oneshot::Receiver<bool>) {
        let (sender, receiver) = oneshot::channel();
        (
            Arc::new(Self {
                sender: Mutex::new(Some(sender)),
            }),
            receiver,
        )
    }
}
