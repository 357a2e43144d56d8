use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::AutofillKitError;

/// The kind of service an autofill request targets.
///
/// Mirrors the two identifier forms the OS reports for a login form: a bare
/// domain (`example.org`) or a full URL.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceIdentifierKind {
    /// The identifier is a registrable domain, e.g. `example.org`.
    Domain,
    /// The identifier is a full URL, including scheme and path.
    Url,
}

/// A service the OS is requesting credentials for.
///
/// The credential-provider extension receives these from the system when the
/// user focuses a login form; they are forwarded to the host runtime as
/// JSON so its UI can rank matching credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record)]
pub struct ServiceIdentifier {
    /// The domain or URL identifying the service.
    pub identifier: String,
    /// Whether `identifier` is a domain or a URL.
    #[serde(rename = "type")]
    pub kind: ServiceIdentifierKind,
}

/// Deserializes service identifiers from the JSON form the host runtime
/// receives as initial props.
///
/// # Errors
/// Returns an error if the JSON is invalid or does not match the expected
/// shape.
#[uniffi::export]
pub fn service_identifiers_from_json(
    json: &str,
) -> Result<Vec<ServiceIdentifier>, AutofillKitError> {
    serde_json::from_str(json).map_err(|e| {
        AutofillKitError::SerializationError(format!("invalid service identifier json: {e}"))
    })
}

/// Serializes service identifiers to the JSON form handed to the host
/// runtime as initial props.
///
/// # Errors
/// Returns an error if serialization fails.
#[uniffi::export]
pub fn service_identifiers_to_json(
    identifiers: Vec<ServiceIdentifier>,
) -> Result<String, AutofillKitError> {
    serde_json::to_string(&identifiers).map_err(|e| {
        AutofillKitError::SerializationError(format!(
            "critical unexpected error serializing to json: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_identifier_serialization() {
        let identifier = ServiceIdentifier {
            identifier: "example.org".to_string(),
            kind: ServiceIdentifierKind::Domain,
        };
        let serialized = serde_json::to_string(&identifier).unwrap();
        assert_eq!(
            serialized,
            "{\"identifier\":\"example.org\",\"type\":\"domain\"}"
        );
    }

    #[test]
    fn test_kind_string_forms() {
        assert_eq!(ServiceIdentifierKind::Url.to_string(), "url");
        assert_eq!(
            "domain".parse::<ServiceIdentifierKind>().unwrap(),
            ServiceIdentifierKind::Domain
        );
        assert!("bundle_id".parse::<ServiceIdentifierKind>().is_err());
    }

    #[test]
    fn test_service_identifiers_from_json() {
        let json = r#"[
            {"identifier": "example.org", "type": "domain"},
            {"identifier": "https://login.example.org/session", "type": "url"}
        ]"#;
        let identifiers = service_identifiers_from_json(json).unwrap();
        assert_eq!(identifiers.len(), 2);
        assert_eq!(identifiers[0].kind, ServiceIdentifierKind::Domain);
        assert_eq!(
            identifiers[1].identifier,
            "https://login.example.org/session"
        );

        // Unknown kinds are rejected, not coerced.
        let result = service_identifiers_from_json(
            r#"[{"identifier": "example.org", "type": "bundle_id"}]"#,
        );
        assert!(result.is_err());
    }
}
