use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;

use log::{debug, warn};

use crate::delegate::{AutofillEnabledReply, CredentialProviderDelegate};
use crate::error::{AutofillKitError, Result};
use crate::identifiers::ServiceIdentifier;
use crate::request::AutofillRequest;
use crate::settings::AutofillSettings;

/// Deadline for the autofill-enabled query. The delegate's reply may be
/// deferred behind a system call, but it must not leave the host runtime
/// hanging forever.
pub const ENABLED_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Bridge endpoint between the host application runtime and the platform's
/// credential-provider extension.
///
/// The extension registers a [`CredentialProviderDelegate`] (weakly; the
/// module never owns it) and begins a request when the OS asks for
/// credentials; the host runtime resolves that request with either a
/// credential pair or a cancellation, and can query the system's autofill
/// enablement state through the same delegate.
///
/// ## Swift
///
/// ```swift
/// let module = CredentialProviderRequest()
/// module.setDelegate(delegate: self)
/// let request = module.beginRequest(serviceIdentifiers: identifiers)
/// ```
#[derive(uniffi::Object)]
pub struct CredentialProviderRequest {
    delegate: RwLock<Option<Weak<dyn CredentialProviderDelegate>>>,
    settings: RwLock<Option<Weak<dyn AutofillSettings>>>,
    current: Mutex<Option<Arc<AutofillRequest>>>,
}

#[uniffi::export]
impl CredentialProviderRequest {
    /// Creates a new module with no delegate registered.
    #[uniffi::constructor]
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            delegate: RwLock::new(None),
            settings: RwLock::new(None),
            current: Mutex::new(None),
        })
    }

    /// Registers the delegate that receives forwarded events.
    ///
    /// Only a weak reference is stored: the delegate's lifetime is managed
    /// entirely by its owner, and once it is deallocated the module behaves
    /// as if no delegate were registered.
    pub fn set_delegate(&self, delegate: Arc<dyn CredentialProviderDelegate>) {
        debug!("credential provider delegate registered");
        *self.delegate.write().unwrap() = Some(Arc::downgrade(&delegate));
    }

    /// Unregisters the delegate, if any.
    pub fn clear_delegate(&self) {
        *self.delegate.write().unwrap() = None;
    }

    /// Whether a delegate is currently registered and alive.
    #[must_use]
    pub fn has_delegate(&self) -> bool {
        self.delegate().is_ok()
    }

    /// Registers the platform settings provider backing
    /// [`autofill_is_supported`] and [`ask_for_permissions`]. Stored weakly,
    /// like the delegate.
    ///
    /// [`autofill_is_supported`]: CredentialProviderRequest::autofill_is_supported
    /// [`ask_for_permissions`]: CredentialProviderRequest::ask_for_permissions
    pub fn set_settings(&self, settings: Arc<dyn AutofillSettings>) {
        *self.settings.write().unwrap() = Some(Arc::downgrade(&settings));
    }

    /// Unregisters the platform settings provider, if any.
    pub fn clear_settings(&self) {
        *self.settings.write().unwrap() = None;
    }

    /// Starts a new autofill request for the given services.
    ///
    /// Called by the extension when the OS presents a credential list. Any
    /// previous request is discarded; an unresolved predecessor is logged,
    /// since it indicates the extension was torn down mid-flow.
    pub fn begin_request(
        &self,
        service_identifiers: Vec<ServiceIdentifier>,
    ) -> Arc<AutofillRequest> {
        let request = Arc::new(AutofillRequest::new(service_identifiers));
        debug!("autofill request {} started", request.id());
        if let Some(previous) = self
            .current
            .lock()
            .unwrap()
            .replace(Arc::clone(&request))
        {
            if !previous.is_resolved() {
                warn!("discarding unresolved autofill request {}", previous.id());
            }
        }
        request
    }

    /// Returns the request currently in progress, if any.
    #[must_use]
    pub fn current_request(&self) -> Option<Arc<AutofillRequest>> {
        self.current.lock().unwrap().clone()
    }

    /// Resolves the pending request with the credential pair the user
    /// selected or generated, and forwards it to the delegate exactly once.
    ///
    /// # Errors
    /// - [`AutofillKitError::InvalidInput`] if `username` is empty.
    /// - [`AutofillKitError::DelegateUnavailable`] if no delegate is alive;
    ///   the request is left pending so a re-registered delegate can still
    ///   receive the outcome.
    /// - [`AutofillKitError::NoPendingRequest`] if no request was begun.
    /// - [`AutofillKitError::AlreadyResolved`] if the request has already
    ///   resolved; the delegate is not invoked a second time.
    pub fn authentication_request_completed(
        &self,
        username: String,
        password: String,
    ) -> Result<()> {
        if username.is_empty() {
            return Err(AutofillKitError::InvalidInput {
                parameter: "username".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let delegate = self.delegate()?;
        let request = self
            .current_request()
            .ok_or(AutofillKitError::NoPendingRequest)?;
        request.resolve_credentials(&username, &password)?;
        debug!("autofill request {} completed", request.id());
        delegate.generated_credentials(username, password);
        Ok(())
    }

    /// Resolves the pending request as cancelled and forwards the reason to
    /// the delegate exactly once. `reason` is free-form and intended for
    /// logging and display only.
    ///
    /// # Errors
    /// - [`AutofillKitError::DelegateUnavailable`] if no delegate is alive.
    /// - [`AutofillKitError::NoPendingRequest`] if no request was begun.
    /// - [`AutofillKitError::AlreadyResolved`] if the request has already
    ///   resolved; the delegate is not invoked a second time.
    pub fn authentication_request_cancelled(&self, reason: String) -> Result<()> {
        let delegate = self.delegate()?;
        let request = self
            .current_request()
            .ok_or(AutofillKitError::NoPendingRequest)?;
        request.resolve_cancelled(&reason)?;
        debug!("autofill request {} cancelled: {reason}", request.id());
        delegate.cancelled_request(reason);
        Ok(())
    }

    /// Whether the OS supports credential autofill on this device.
    ///
    /// # Errors
    /// Returns [`AutofillKitError::DelegateUnavailable`] if no settings
    /// provider is registered and alive.
    pub fn autofill_is_supported(&self) -> Result<bool> {
        Ok(self.settings()?.is_autofill_supported())
    }

    /// Asks the platform to present the system screen where the user can
    /// enroll this app as the device's credential provider.
    ///
    /// # Errors
    /// Returns [`AutofillKitError::DelegateUnavailable`] if no settings
    /// provider is registered and alive.
    pub fn ask_for_permissions(&self) -> Result<()> {
        self.settings()?.request_enrollment();
        Ok(())
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl CredentialProviderRequest {
    /// Asks the delegate whether system-level autofill is enabled,
    /// resolving within [`ENABLED_QUERY_TIMEOUT`].
    ///
    /// # Errors
    /// - [`AutofillKitError::DelegateUnavailable`] if no delegate is alive.
    /// - [`AutofillKitError::ReplyDropped`] if the delegate discarded the
    ///   reply without resolving it.
    /// - [`AutofillKitError::QueryTimedOut`] if the deadline elapsed.
    pub async fn autofill_is_enabled(&self) -> Result<bool> {
        self.autofill_is_enabled_within(ENABLED_QUERY_TIMEOUT).await
    }
}

impl CredentialProviderRequest {
    /// Variant of [`autofill_is_enabled`] with a caller-chosen deadline, for
    /// Rust-level consumers.
    ///
    /// # Errors
    /// Same conditions as [`autofill_is_enabled`].
    ///
    /// [`autofill_is_enabled`]: CredentialProviderRequest::autofill_is_enabled
    pub async fn autofill_is_enabled_within(&self, deadline: Duration) -> Result<bool> {
        let delegate = self.delegate()?;
        let (reply, receiver) = AutofillEnabledReply::new();
        delegate.autofill_is_enabled(reply);
        match tokio::time::timeout(deadline, receiver).await {
            Ok(Ok(is_enabled)) => Ok(is_enabled),
            Ok(Err(_)) => Err(AutofillKitError::ReplyDropped),
            Err(_) => Err(AutofillKitError::QueryTimedOut {
                seconds: deadline.as_secs(),
            }),
        }
    }

    fn delegate(&self) -> Result<Arc<dyn CredentialProviderDelegate>> {
        self.delegate
            .read()
            .unwrap()
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(AutofillKitError::DelegateUnavailable)
    }

    fn settings(&self) -> Result<Arc<dyn AutofillSettings>> {
        self.settings
            .read()
            .unwrap()
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(AutofillKitError::DelegateUnavailable)
    }
}
