use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::error::{AutofillKitError, Result};
use crate::identifiers::ServiceIdentifier;

/// The outcome of a resolved autofill request.
///
/// For any request, exactly one of the two variants is ever produced; the
/// not-yet-resolved state is observable as `None` from
/// [`AutofillRequest::outcome`].
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum RequestOutcome {
    /// The user selected or generated a credential.
    GeneratedCredentials {
        /// The account name for the targeted service.
        username: String,
        /// The password for the targeted service.
        password: String,
    },
    /// The request was aborted by the user or the system.
    Cancelled {
        /// Free-form description of why the request was cancelled.
        reason: String,
    },
}

enum FlowState {
    Pending,
    Credentials {
        username: String,
        password: SecretString,
    },
    Cancelled {
        reason: String,
    },
}

/// A single credential-provider flow.
///
/// Created by
/// [`CredentialProviderRequest::begin_request`](crate::CredentialProviderRequest::begin_request)
/// when the OS hands the extension a list of service identifiers. The
/// request resolves exactly once, with credentials or with a cancellation,
/// and rejects any later resolution attempt.
///
/// The retained password is held as a [`SecretString`] so it is zeroized
/// when the request is dropped. Note that [`outcome`] necessarily hands out
/// plain copies, and the FFI layer makes further copies in foreign memory;
/// the host is responsible for those.
///
/// [`outcome`]: AutofillRequest::outcome
#[derive(uniffi::Object)]
pub struct AutofillRequest {
    id: String,
    service_identifiers: Vec<ServiceIdentifier>,
    state: Mutex<FlowState>,
}

#[uniffi::export]
impl AutofillRequest {
    /// Returns the unique identifier for this request, as used in log lines.
    #[must_use]
    pub fn id(&self) -> String {
        self.id.clone()
    }

    /// Returns the services the OS is requesting credentials for.
    #[must_use]
    pub fn service_identifiers(&self) -> Vec<ServiceIdentifier> {
        self.service_identifiers.clone()
    }

    /// Whether this request has been resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(*self.state.lock().unwrap(), FlowState::Pending)
    }

    /// Returns the resolution of this request, or `None` while it is still
    /// pending.
    #[must_use]
    pub fn outcome(&self) -> Option<RequestOutcome> {
        match &*self.state.lock().unwrap() {
            FlowState::Pending => None,
            FlowState::Credentials { username, password } => {
                Some(RequestOutcome::GeneratedCredentials {
                    username: username.clone(),
                    password: password.expose_secret().to_owned(),
                })
            }
            FlowState::Cancelled { reason } => Some(RequestOutcome::Cancelled {
                reason: reason.clone(),
            }),
        }
    }
}

impl AutofillRequest {
    pub(crate) fn new(service_identifiers: Vec<ServiceIdentifier>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            service_identifiers,
            state: Mutex::new(FlowState::Pending),
        }
    }

    /// Records the generated credential pair. Fails if the request already
    /// resolved.
    pub(crate) fn resolve_credentials(&self, username: &str, password: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !matches!(*state, FlowState::Pending) {
            return Err(AutofillKitError::AlreadyResolved);
        }
        *state = FlowState::Credentials {
            username: username.to_owned(),
            password: SecretString::from(password.to_owned()),
        };
        Ok(())
    }

    /// Records the cancellation. Fails if the request already resolved.
    pub(crate) fn resolve_cancelled(&self, reason: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !matches!(*state, FlowState::Pending) {
            return Err(AutofillKitError::AlreadyResolved);
        }
        *state = FlowState::Cancelled {
            reason: reason.to_owned(),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_request() -> AutofillRequest {
        AutofillRequest::new(vec![])
    }

    #[test]
    fn test_outcome_is_none_while_pending() {
        let request = pending_request();
        assert!(!request.is_resolved());
        assert_eq!(request.outcome(), None);
    }

    #[test]
    fn test_resolves_with_credentials_exactly_once() {
        let request = pending_request();
        request.resolve_credentials("alice", "s3cr3t").unwrap();

        assert_eq!(
            request.resolve_cancelled("user dismissed"),
            Err(AutofillKitError::AlreadyResolved)
        );
        assert_eq!(
            request.resolve_credentials("bob", "other"),
            Err(AutofillKitError::AlreadyResolved)
        );
        assert_eq!(
            request.outcome(),
            Some(RequestOutcome::GeneratedCredentials {
                username: "alice".to_string(),
                password: "s3cr3t".to_string(),
            })
        );
    }

    #[test]
    fn test_resolves_with_cancellation_exactly_once() {
        let request = pending_request();
        request.resolve_cancelled("user dismissed").unwrap();

        assert_eq!(
            request.resolve_credentials("alice", "s3cr3t"),
            Err(AutofillKitError::AlreadyResolved)
        );
        assert_eq!(
            request.outcome(),
            Some(RequestOutcome::Cancelled {
                reason: "user dismissed".to_string(),
            })
        );
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(pending_request().id(), pending_request().id());
    }
}
