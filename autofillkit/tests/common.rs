#![allow(dead_code)]
#![allow(missing_docs)]

//! Common test utilities shared across integration tests.

use std::sync::{Arc, Mutex};

use autofillkit::{
    AutofillEnabledReply, AutofillSettings, CredentialProviderDelegate, ServiceIdentifier,
    ServiceIdentifierKind,
};

/// An event observed by [`RecordingDelegate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateEvent {
    GeneratedCredentials { username: String, password: String },
    CancelledRequest { reason: String },
}

/// How [`RecordingDelegate`] treats enablement queries.
#[derive(Debug, Clone, Copy)]
pub enum ReplyMode {
    /// Resolve immediately with the given enablement state.
    Resolve(bool),
    /// Discard the reply without resolving it.
    Drop,
    /// Keep the reply alive without ever resolving it.
    Hold,
}

/// Delegate that records every forwarded event.
pub struct RecordingDelegate {
    events: Mutex<Vec<DelegateEvent>>,
    reply_mode: ReplyMode,
    held_replies: Mutex<Vec<Arc<AutofillEnabledReply>>>,
}

impl RecordingDelegate {
    pub fn new(reply_mode: ReplyMode) -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            reply_mode,
            held_replies: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<DelegateEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CredentialProviderDelegate for RecordingDelegate {
    fn generated_credentials(&self, username: String, password: String) {
        self.events
            .lock()
            .unwrap()
            .push(DelegateEvent::GeneratedCredentials { username, password });
    }

    fn cancelled_request(&self, reason: String) {
        self.events
            .lock()
            .unwrap()
            .push(DelegateEvent::CancelledRequest { reason });
    }

    fn autofill_is_enabled(&self, reply: Arc<AutofillEnabledReply>) {
        match self.reply_mode {
            ReplyMode::Resolve(is_enabled) => reply.resolve(is_enabled).unwrap(),
            ReplyMode::Drop => drop(reply),
            ReplyMode::Hold => self.held_replies.lock().unwrap().push(reply),
        }
    }
}

/// Settings provider with a fixed support answer and an enrollment counter.
pub struct StaticSettings {
    supported: bool,
    enrollment_requests: Mutex<u32>,
}

impl StaticSettings {
    pub fn new(supported: bool) -> Arc<Self> {
        Arc::new(Self {
            supported,
            enrollment_requests: Mutex::new(0),
        })
    }

    pub fn enrollment_requests(&self) -> u32 {
        *self.enrollment_requests.lock().unwrap()
    }
}

impl AutofillSettings for StaticSettings {
    fn is_autofill_supported(&self) -> bool {
        self.supported
    }

    fn request_enrollment(&self) {
        *self.enrollment_requests.lock().unwrap() += 1;
    }
}

/// Shorthand for a domain service identifier.
pub fn domain(identifier: &str) -> ServiceIdentifier {
    ServiceIdentifier {
        identifier: identifier.to_string(),
        kind: ServiceIdentifierKind::Domain,
    }
}
