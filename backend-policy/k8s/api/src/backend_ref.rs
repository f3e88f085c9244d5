use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU16};

/// The group a reference resolves to when it omits one.
pub const CORE_GROUP: &str = "core";

/// The resource a [`BackendRef`] resolves to when it omits one.
pub const SERVICES_RESOURCE: &str = "services";

/// The resource a [`CertificateObjectReference`] resolves to when it omits one.
pub const SECRETS_RESOURCE: &str = "secrets";

/// BackendRef identifies an API object within a known namespace that defaults
/// group to core and resource to services if unspecified.
///
/// The reference is weak: it is only resolved against the live object graph
/// by a controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackendRef {
    /// Group is the group of the referent. Omitting the value or specifying
    /// the empty string indicates the core API group. For example, use the
    /// following to specify a service:
    ///
    /// ```yaml
    /// fooRef:
    ///   resource: services
    ///   name: myservice
    /// ```
    ///
    /// Otherwise, if the core API group is not desired, specify the desired
    /// group:
    ///
    /// ```yaml
    /// fooRef:
    ///   group: acme.io
    ///   resource: foos
    ///   name: myfoo
    /// ```
    ///
    /// The schema is not nullable, so the API server applies the default
    /// when the field is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(default = "default_core_group", schema_with = "defaulted_name_schema")]
    pub group: Option<String>,

    /// Resource is the API resource name of the referent. Omitting the value
    /// or specifying the empty string indicates the services resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(default = "default_services_resource", schema_with = "defaulted_name_schema")]
    pub resource: Option<String>,

    /// Name is the name of the referent.
    #[schemars(length(max = 253))]
    pub name: String,

    /// Port is the port of the referent. If unspecified, this policy applies
    /// to all ports on the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65535))]
    pub port: Option<NonZeroU16>,
}

/// CertificateObjectReference identifies a certificate object within a known
/// namespace that defaults group to core and resource to secrets if
/// unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateObjectReference {
    /// Group is the group of the referent. Omitting the value or specifying
    /// the empty string indicates the core API group.
    ///
    /// The schema is not nullable, so the API server applies the default
    /// when the field is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(default = "default_core_group", schema_with = "defaulted_name_schema")]
    pub group: Option<String>,

    /// Resource is the API resource name of the referent. Omitting the value
    /// or specifying the empty string indicates the secrets resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(default = "default_secrets_resource", schema_with = "defaulted_name_schema")]
    pub resource: Option<String>,

    /// Name is the name of the referent.
    #[schemars(length(max = 253))]
    pub name: String,
}

/// The canonical identity of a backend target.
///
/// Group and resource are normalized: omitted or empty values take their
/// defaults and comparisons ignore ASCII case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackendKey {
    pub group: String,
    pub resource: String,
    pub name: String,
    pub port: Option<NonZeroU16>,
}

// === impl BackendRef ===

impl BackendRef {
    /// References a Service in the policy's namespace, on all ports.
    pub fn service(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Restricts the reference to a single port.
    #[must_use]
    pub fn with_port(self, port: NonZeroU16) -> Self {
        Self {
            port: Some(port),
            ..self
        }
    }

    /// The referent's group, with omitted or empty values resolved to `core`.
    pub fn group(&self) -> &str {
        or_default(self.group.as_deref(), CORE_GROUP)
    }

    /// The referent's resource, with omitted or empty values resolved to
    /// `services`.
    pub fn resource(&self) -> &str {
        or_default(self.resource.as_deref(), SERVICES_RESOURCE)
    }

    /// Fills in omitted or empty group and resource fields the way the API
    /// server does when it applies schema defaults.
    #[must_use]
    pub fn with_defaults(self) -> Self {
        Self {
            group: Some(self.group().to_string()),
            resource: Some(self.resource().to_string()),
            ..self
        }
    }

    /// Returns the canonical identity of the referenced target.
    pub fn key(&self) -> BackendKey {
        BackendKey {
            group: self.group().to_ascii_lowercase(),
            resource: self.resource().to_ascii_lowercase(),
            name: self.name.clone(),
            port: self.port,
        }
    }

    /// Checks whether the reference names the given resource type.
    pub fn targets_kind<T>(&self) -> bool
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        targets_kind::<T>(self.group(), self.resource())
    }

    /// Checks whether the reference names the given object, which must live
    /// in the policy's namespace.
    pub fn targets<T>(&self, resource: &T, policy_ns: &str) -> bool
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        if !self.targets_kind::<T>() {
            return false;
        }

        // Backends in other namespaces can never be selected.
        match resource.meta().namespace.as_deref() {
            Some(rns) if rns == policy_ns => {}
            _ => return false,
        }

        resource.meta().name.as_deref() == Some(self.name.as_str())
    }

    /// Checks whether the reference covers the given port of its referent.
    pub fn applies_to_port(&self, port: NonZeroU16) -> bool {
        self.port.map_or(true, |p| p == port)
    }
}

// === impl CertificateObjectReference ===

impl CertificateObjectReference {
    /// References a Secret in the policy's namespace.
    pub fn secret(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The referent's group, with omitted or empty values resolved to `core`.
    pub fn group(&self) -> &str {
        or_default(self.group.as_deref(), CORE_GROUP)
    }

    /// The referent's resource, with omitted or empty values resolved to
    /// `secrets`.
    pub fn resource(&self) -> &str {
        or_default(self.resource.as_deref(), SECRETS_RESOURCE)
    }

    #[must_use]
    pub fn with_defaults(self) -> Self {
        Self {
            group: Some(self.group().to_string()),
            resource: Some(self.resource().to_string()),
            ..self
        }
    }

    /// Indicates whether the reference resolves to a core Secret.
    pub fn is_secret(&self) -> bool {
        self.group().eq_ignore_ascii_case(CORE_GROUP)
            && self.resource().eq_ignore_ascii_case(SECRETS_RESOURCE)
    }

    /// Checks whether the reference names the given resource type.
    pub fn targets_kind<T>(&self) -> bool
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        targets_kind::<T>(self.group(), self.resource())
    }
}

// === impl BackendKey ===

impl fmt::Display for BackendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/{}", self.resource, self.group, self.name)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

fn targets_kind<T>(group: &str, resource: &str) -> bool
where
    T: kube::Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();

    let tgroup = T::group(&dt);
    let tgroup = if tgroup.is_empty() {
        CORE_GROUP
    } else {
        &*tgroup
    };

    group.eq_ignore_ascii_case(tgroup) && resource.eq_ignore_ascii_case(&T::plural(&dt))
}

// A non-nullable string of at most 253 characters.
fn defaulted_name_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    use schemars::schema::{InstanceType, SchemaObject, StringValidation};

    SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        string: Some(Box::new(StringValidation {
            max_length: Some(253),
            ..StringValidation::default()
        })),
        ..SchemaObject::default()
    }
    .into()
}

fn default_core_group() -> Option<String> {
    Some(CORE_GROUP.to_string())
}

fn default_services_resource() -> Option<String> {
    Some(SERVICES_RESOURCE.to_string())
}

fn default_secrets_resource() -> Option<String> {
    Some(SECRETS_RESOURCE.to_string())
}
