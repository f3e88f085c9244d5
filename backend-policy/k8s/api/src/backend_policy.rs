use super::{
    backend_ref::{BackendKey, BackendRef},
    condition::BackendPolicyConditionType,
    tls::BackendTlsConfig,
};
use crate::{Condition, ListMeta};
use kube::{CustomResource, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// BackendPolicy defines policies associated with backends. For the purpose
/// of this API, a backend is defined as any resource that a route can forward
/// traffic to. A common example of a backend is a Service. Configuration that
/// is implementation specific may be represented with similar implementation
/// specific custom resources.
#[derive(Clone, Debug, Default, PartialEq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "networking.x-k8s.io",
    version = "v1alpha1",
    kind = "BackendPolicy",
    plural = "backendpolicies",
    status = "BackendPolicyStatus",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct BackendPolicySpec {
    /// BackendRefs define which backends this policy should be applied to.
    /// This policy can only apply to backends within the same namespace. If
    /// more than one BackendPolicy targets the same backend, precedence must
    /// be given to the oldest BackendPolicy.
    ///
    /// Support: Core
    #[schemars(length(max = 16))]
    pub backend_refs: Vec<BackendRef>,

    /// TLS is the TLS configuration for these backends.
    ///
    /// Support: Extended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<BackendTlsConfig>,
}

/// BackendPolicyStatus defines the observed state of BackendPolicy.
///
/// Conditions that are related to a specific Route or Gateway should be
/// placed on the Route(s) using backends configured by this BackendPolicy.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct BackendPolicyStatus {
    /// Conditions describe the current conditions of the BackendPolicy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 8))]
    pub conditions: Option<Vec<Condition>>,
}

/// BackendPolicyList contains a list of BackendPolicy.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPolicyList {
    #[serde(default = "BackendPolicyList::default_api_version")]
    pub api_version: String,

    #[serde(default = "BackendPolicyList::default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ListMeta,

    pub items: Vec<BackendPolicy>,
}

// === impl BackendPolicy ===

impl BackendPolicy {
    /// Checks whether any of the policy's backend references names the given
    /// object. The object must live in the policy's own namespace.
    pub fn targets<T>(&self, resource: &T) -> bool
    where
        T: Resource,
        T::DynamicType: Default,
    {
        let Some(ns) = self.metadata.namespace.as_deref() else {
            return false;
        };
        self.spec.backend_refs.iter().any(|r| r.targets(resource, ns))
    }

    /// Returns the canonical identities of all backends referenced by the
    /// policy, in declaration order.
    pub fn backend_keys(&self) -> impl Iterator<Item = BackendKey> + '_ {
        self.spec.backend_refs.iter().map(BackendRef::key)
    }
}

// === impl BackendPolicyStatus ===

impl BackendPolicyStatus {
    pub fn condition(&self, ty: &BackendPolicyConditionType) -> Option<&Condition> {
        self.conditions.as_ref()?.iter().find(|c| ty.matches(c))
    }

    /// Adds the condition or replaces the existing condition of the same
    /// type. The existing transition time is kept when the status value does
    /// not change.
    pub fn set_condition(&mut self, mut condition: Condition) {
        let conditions = self.conditions.get_or_insert_with(Vec::new);
        match conditions.iter_mut().find(|c| c.type_ == condition.type_) {
            Some(existing) => {
                if existing.status == condition.status {
                    condition.last_transition_time = existing.last_transition_time.clone();
                }
                *existing = condition;
            }
            None => conditions.push(condition),
        }
    }

    pub fn remove_condition(&mut self, ty: &BackendPolicyConditionType) -> Option<Condition> {
        let conditions = self.conditions.as_mut()?;
        let idx = conditions.iter().position(|c| ty.matches(c))?;
        Some(conditions.remove(idx))
    }
}

// === impl BackendPolicyList ===

impl BackendPolicyList {
    pub fn new(items: Vec<BackendPolicy>) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ListMeta::default(),
            items,
        }
    }

    fn default_api_version() -> String {
        BackendPolicy::api_version(&()).to_string()
    }

    fn default_kind() -> String {
        format!("{}List", BackendPolicy::kind(&()))
    }
}

impl Default for BackendPolicyList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<BackendPolicy> for BackendPolicyList {
    fn from_iter<T: IntoIterator<Item = BackendPolicy>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
