use super::backend_ref::CertificateObjectReference;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The Secret type required of Secrets referenced as client certificates.
pub const TLS_SECRET_TYPE: &str = "kubernetes.io/tls";

/// Secret data key holding a PEM-encoded client certificate.
pub const TLS_CERT_KEY: &str = "tls.crt";

/// Secret data key holding a PEM-encoded client private key.
pub const TLS_PRIVATE_KEY_KEY: &str = "tls.key";

/// Secret data key holding PEM-encoded trusted CA certificates.
pub const CA_CERT_KEY: &str = "ca.crt";

/// BackendTLSConfig describes TLS configuration for a backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackendTlsConfig {
    /// ClientCertificateRef is a reference to a TLS client certificate-key
    /// pair that may be used to connect to these backends. If the reference
    /// omits or specifies the empty string for both the group and the
    /// resource, the resource defaults to "secrets". An implementation may
    /// support other resources (for example, resource "mycertificates" in
    /// group "networking.acme.io").
    ///
    /// If a Secret is referenced, it must be of type "kubernetes.io/tls" and
    /// contain tls.crt and tls.key data fields that contain the certificate
    /// and private key to use for TLS.
    ///
    /// Support: Extended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_ref: Option<CertificateObjectReference>,

    /// CertificateAuthorityRef is a reference to a resource that includes
    /// trusted CA certificates for the associated backends. If the reference
    /// omits or specifies the empty string for both the group and the
    /// resource, the resource defaults to "secrets".
    ///
    /// When stored in a Secret, certificates must be PEM encoded and
    /// specified within the "ca.crt" data field of the Secret. Multiple
    /// certificates can be specified, concatenated by new lines.
    ///
    /// Support: Extended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority_ref: Option<CertificateObjectReference>,

    /// Options are a list of key/value pairs to give extended options to the
    /// provider.
    ///
    /// Support: Implementation-specific.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, String>>,
}

impl BackendTlsConfig {
    /// Looks up an implementation-specific option.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.as_ref()?.get(key).map(String::as_str)
    }
}
