use crate::{Condition, Time};
use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// BackendPolicyConditionType is a type of condition associated with a
/// BackendPolicy.
///
/// Values not known to this crate are preserved as [`Other`] so that
/// conditions written by newer controllers survive a round trip.
///
/// Values compare by their string form, so an `Other` holding a known value
/// equals the named variant.
///
/// [`Other`]: BackendPolicyConditionType::Other
#[derive(Clone, Debug, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum BackendPolicyConditionType {
    /// Indicates that one or more of the specified backends does not exist.
    NoSuchBackend,
    Other(String),
}

// === impl BackendPolicyConditionType ===

impl BackendPolicyConditionType {
    const NO_SUCH_BACKEND: &'static str = "NoSuchBackend";

    pub fn as_str(&self) -> &str {
        match self {
            Self::NoSuchBackend => Self::NO_SUCH_BACKEND,
            Self::Other(s) => s,
        }
    }

    /// Indicates whether the given condition is of this type.
    pub fn matches(&self, condition: &Condition) -> bool {
        condition.type_ == self.as_str()
    }

    /// Builds a status condition of this type.
    pub fn condition(
        &self,
        status: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
        observed_generation: Option<i64>,
        last_transition_time: Time,
    ) -> Condition {
        Condition {
            type_: self.as_str().to_string(),
            status: status.into(),
            reason: reason.into(),
            message: message.into(),
            observed_generation,
            last_transition_time,
        }
    }
}

impl PartialEq for BackendPolicyConditionType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Hash for BackendPolicyConditionType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for BackendPolicyConditionType {
    fn from(s: String) -> Self {
        if s == Self::NO_SUCH_BACKEND {
            return Self::NoSuchBackend;
        }
        Self::Other(s)
    }
}

impl From<&str> for BackendPolicyConditionType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<BackendPolicyConditionType> for String {
    fn from(ty: BackendPolicyConditionType) -> Self {
        match ty {
            BackendPolicyConditionType::Other(s) => s,
            ty => ty.as_str().to_string(),
        }
    }
}

impl FromStr for BackendPolicyConditionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for BackendPolicyConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_such_backend_is_a_literal_string() {
        let ty = BackendPolicyConditionType::NoSuchBackend;
        let json = serde_json::to_value(&ty).unwrap();
        assert_eq!(json, serde_json::json!("NoSuchBackend"));
        assert_eq!(
            serde_json::from_value::<BackendPolicyConditionType>(json).unwrap(),
            ty
        );
        assert_eq!(ty.to_string(), "NoSuchBackend");
    }

    #[test]
    fn unknown_types_are_preserved() {
        let ty: BackendPolicyConditionType = serde_json::from_str("\"Accepted\"").unwrap();
        assert_eq!(ty, BackendPolicyConditionType::Other("Accepted".to_string()));
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"Accepted\"");
        assert_eq!(
            "NoSuchBackend".parse::<BackendPolicyConditionType>().unwrap(),
            BackendPolicyConditionType::NoSuchBackend
        );
    }

    #[test]
    fn compares_by_string_form() {
        use std::collections::HashSet;

        let named = BackendPolicyConditionType::NoSuchBackend;
        let other = BackendPolicyConditionType::Other("NoSuchBackend".to_string());
        assert_eq!(named, other);
        assert_ne!(named, BackendPolicyConditionType::from("Accepted"));

        let set = [named, other].into_iter().collect::<HashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn builds_conditions() {
        let time: Time = serde_json::from_str("\"2021-01-01T00:00:00Z\"").unwrap();
        let c = BackendPolicyConditionType::NoSuchBackend.condition(
            "True",
            "BackendNotFound",
            "services/web not found",
            Some(3),
            time.clone(),
        );
        assert_eq!(c.type_, "NoSuchBackend");
        assert_eq!(c.status, "True");
        assert_eq!(c.reason, "BackendNotFound");
        assert_eq!(c.observed_generation, Some(3));
        assert_eq!(c.last_transition_time, time);
        assert!(BackendPolicyConditionType::NoSuchBackend.matches(&c));
        assert!(!BackendPolicyConditionType::from("Accepted").matches(&c));
    }
}
