/// Platform autofill-settings surface.
///
/// Implemented by foreign code against the platform settings API (on
/// Android, `AutofillManager`; on iOS, `ASCredentialIdentityStore` and the
/// Settings app). Registered weakly with
/// [`CredentialProviderRequest::set_settings`](crate::CredentialProviderRequest::set_settings),
/// separately from the request delegate: the settings provider usually
/// outlives any single autofill request.
#[uniffi::export(with_foreign)]
pub trait AutofillSettings: Send + Sync {
    /// Whether the OS supports credential autofill at all on this device.
    fn is_autofill_supported(&self) -> bool;

    /// Opens the system screen where the user can enroll this app as the
    /// device's credential provider. No-op if the app is already enrolled.
    fn request_enrollment(&self);
}
