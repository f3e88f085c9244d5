#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod backend_policy;
pub mod backend_ref;
pub mod condition;
pub mod tls;

pub use self::{
    backend_policy::{BackendPolicy, BackendPolicyList, BackendPolicySpec, BackendPolicyStatus},
    backend_ref::{BackendKey, BackendRef, CertificateObjectReference},
    condition::BackendPolicyConditionType,
    tls::BackendTlsConfig,
};
pub use k8s_openapi::{
    api::core::v1::{Secret, Service},
    apimachinery::pkg::apis::meta::v1::{Condition, ListMeta, ObjectMeta, Time},
};
pub use kube::{CustomResourceExt, Resource, ResourceExt};

/// The API group that all types in this crate belong to.
pub const GROUP: &str = "networking.x-k8s.io";

/// The API version that all types in this crate belong to.
pub const VERSION: &str = "v1alpha1";
