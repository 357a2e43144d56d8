#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! AutofillKit bridges an OS credential-autofill subsystem to a
//! cross-platform application runtime.
//!
//! The host runtime talks to a single [`CredentialProviderRequest`] module;
//! the platform's credential-provider extension registers a
//! [`CredentialProviderDelegate`] to receive the forwarded events. The
//! module never owns its delegate: registration stores a weak reference, so
//! the delegate's lifetime is managed entirely by the platform side.

mod delegate;
pub use delegate::*;

mod error;
pub use error::*;

mod identifiers;
pub use identifiers::*;

pub mod logger;

mod module;
pub use module::*;

mod request;
pub use request::*;

mod settings;
pub use settings::*;

uniffi::setup_scaffolding!("autofillkit");
