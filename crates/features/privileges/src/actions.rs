//! Action namespace: well-known constants and namespaced constructors.
//!
//! An [`Action`] is the atomic unit a downstream authorizer evaluates against.
//! Actions are opaque strings; the constructors here are the only place their
//! wire format is assembled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque authorization-check token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Action {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Action {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Factory for every action the compiler emits.
///
/// The `version` segment is baked in at construction so compiled tables are
/// tied to the product version that produced them.
#[derive(Debug, Clone)]
pub struct Actions {
    version_action: Action,
}

impl Actions {
    #[must_use]
    pub fn new(version: impl AsRef<str>) -> Self {
        Self { version_action: Action(format!("version:{}", version.as_ref())) }
    }

    /// Granted by every assignable privilege.
    #[must_use]
    pub fn login(&self) -> Action {
        Action::from("login:")
    }

    #[must_use]
    pub fn version(&self) -> Action {
        self.version_action.clone()
    }

    /// Catch-all sentinel appended to every `all`-scoped action list.
    #[must_use]
    pub fn all_hack(&self) -> Action {
        Action::from("allHack:")
    }

    /// API-route action for one tagged operation.
    #[must_use]
    pub fn api(&self, operation: &str) -> Action {
        Action(format!("api:{operation}"))
    }

    /// Application-visibility action.
    #[must_use]
    pub fn app(&self, app_id: &str) -> Action {
        Action(format!("app:{app_id}"))
    }

    /// UI-location action for one capability of one feature.
    #[must_use]
    pub fn ui(&self, feature_id: &str, capability: &str) -> Action {
        Action(format!("ui:{feature_id}/{capability}"))
    }

    /// Saved-object action for one operation on one object type.
    #[must_use]
    pub fn saved_object(&self, object_type: &str, operation: &str) -> Action {
        Action(format!("saved_object:{object_type}/{operation}"))
    }

    /// Space-management action.
    #[must_use]
    pub fn space(&self, operation: &str) -> Action {
        Action(format!("space:{operation}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_stable_wire_formats() {
        let actions = Actions::new("1.0.0");

        assert_eq!(actions.login().as_str(), "login:");
        assert_eq!(actions.version().as_str(), "version:1.0.0");
        assert_eq!(actions.all_hack().as_str(), "allHack:");
        assert_eq!(actions.api("features").as_str(), "api:features");
        assert_eq!(actions.app("dashboard").as_str(), "app:dashboard");
        assert_eq!(actions.ui("spaces", "manage").as_str(), "ui:spaces/manage");
        assert_eq!(
            actions.saved_object("index-pattern", "get").as_str(),
            "saved_object:index-pattern/get"
        );
        assert_eq!(actions.space("manage").as_str(), "space:manage");
    }

    #[test]
    fn action_serializes_transparently() {
        let action = Actions::new("1.0.0").api("features");
        assert_eq!(serde_json::to_value(&action).unwrap(), "api:features");
    }
}
