//! Per-concern action builders.
//!
//! Each builder translates one capability list of a privilege into concrete
//! actions. The composite builder concatenates them in a fixed order
//! (api, app, saved-object, ui) so compiled action lists stay stable across
//! runs.

use crate::actions::{Action, Actions};
use warden_domain::features::{CapabilityContributor, Feature};

/// Saved-object operations granted by read access.
const READ_OPERATIONS: &[&str] = &["bulk_get", "get", "find"];

/// Saved-object operations granted by write access. Write access implies the
/// read operations.
const WRITE_OPERATIONS: &[&str] = &[
    "create",
    "bulk_create",
    "update",
    "bulk_update",
    "delete",
    "share_to_space",
];

/// Translates one capability concern of a privilege into actions.
pub trait FeaturePrivilegeBuilder: std::fmt::Debug + Send + Sync {
    fn actions(&self, privilege: &dyn CapabilityContributor, feature: &Feature) -> Vec<Action>;
}

#[derive(Debug)]
struct ApiPrivilegeBuilder {
    actions: Actions,
}

impl FeaturePrivilegeBuilder for ApiPrivilegeBuilder {
    fn actions(&self, privilege: &dyn CapabilityContributor, _feature: &Feature) -> Vec<Action> {
        privilege.api().iter().map(|operation| self.actions.api(operation)).collect()
    }
}

#[derive(Debug)]
struct AppPrivilegeBuilder {
    actions: Actions,
}

impl FeaturePrivilegeBuilder for AppPrivilegeBuilder {
    fn actions(&self, privilege: &dyn CapabilityContributor, _feature: &Feature) -> Vec<Action> {
        privilege.app().iter().map(|app_id| self.actions.app(app_id)).collect()
    }
}

#[derive(Debug)]
struct SavedObjectPrivilegeBuilder {
    actions: Actions,
}

impl FeaturePrivilegeBuilder for SavedObjectPrivilegeBuilder {
    fn actions(&self, privilege: &dyn CapabilityContributor, _feature: &Feature) -> Vec<Action> {
        let rights = privilege.saved_object();
        let write_types = rights.all.iter().flat_map(|object_type| {
            READ_OPERATIONS
                .iter()
                .chain(WRITE_OPERATIONS)
                .map(|operation| self.actions.saved_object(object_type, operation))
        });
        let read_types = rights.read.iter().flat_map(|object_type| {
            READ_OPERATIONS.iter().map(|operation| self.actions.saved_object(object_type, operation))
        });
        write_types.chain(read_types).collect()
    }
}

#[derive(Debug)]
struct UiPrivilegeBuilder {
    actions: Actions,
}

impl FeaturePrivilegeBuilder for UiPrivilegeBuilder {
    fn actions(&self, privilege: &dyn CapabilityContributor, feature: &Feature) -> Vec<Action> {
        privilege.ui().iter().map(|capability| self.actions.ui(&feature.id, capability)).collect()
    }
}

/// Aggregates every per-concern builder behind the generic
/// `get_actions(privilege, feature)` contract the compiler consumes.
#[derive(Debug)]
pub struct CompositePrivilegeBuilder {
    builders: Vec<Box<dyn FeaturePrivilegeBuilder>>,
}

impl CompositePrivilegeBuilder {
    #[must_use]
    pub fn new(actions: &Actions) -> Self {
        Self {
            builders: vec![
                Box::new(ApiPrivilegeBuilder { actions: actions.clone() }),
                Box::new(AppPrivilegeBuilder { actions: actions.clone() }),
                Box::new(SavedObjectPrivilegeBuilder { actions: actions.clone() }),
                Box::new(UiPrivilegeBuilder { actions: actions.clone() }),
            ],
        }
    }

    /// Every action granted by one privilege, in builder order.
    ///
    /// Total function: an empty privilege yields an empty list, never an
    /// error. Duplicates are left for the caller to collapse.
    #[must_use]
    pub fn get_actions(
        &self,
        privilege: &dyn CapabilityContributor,
        feature: &Feature,
    ) -> Vec<Action> {
        self.builders.iter().flat_map(|builder| builder.actions(privilege, feature)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_domain::features::{FeaturePrivilege, SavedObjectRights};

    fn feature() -> Feature {
        Feature {
            id: "dashboard".to_owned(),
            name: "Dashboard".to_owned(),
            app: vec!["dashboard".to_owned()],
            catalogue: Vec::new(),
            nav_link_id: None,
            exclude_from_base_privileges: false,
            privileges: Some(Default::default()),
            sub_features: Vec::new(),
            reserved: None,
        }
    }

    #[test]
    fn builders_concatenate_in_fixed_order() {
        let builder = CompositePrivilegeBuilder::new(&Actions::new("1.0.0"));
        let privilege = FeaturePrivilege {
            api: vec!["search".to_owned()],
            app: vec!["dashboard".to_owned()],
            saved_object: SavedObjectRights {
                all: Vec::new(),
                read: vec!["index-pattern".to_owned()],
            },
            ui: vec!["show".to_owned()],
            exclude_from_base_privileges: false,
        };

        let raw = builder.get_actions(&privilege, &feature());
        let actions: Vec<&str> = raw.iter().map(Action::as_str).collect();
        assert_eq!(
            actions,
            [
                "api:search",
                "app:dashboard",
                "saved_object:index-pattern/bulk_get",
                "saved_object:index-pattern/get",
                "saved_object:index-pattern/find",
                "ui:dashboard/show",
            ]
        );
    }

    #[test]
    fn write_access_implies_read_operations() {
        let builder = CompositePrivilegeBuilder::new(&Actions::new("1.0.0"));
        let privilege = FeaturePrivilege {
            saved_object: SavedObjectRights { all: vec!["dash".to_owned()], read: Vec::new() },
            ..Default::default()
        };

        let actions = builder.get_actions(&privilege, &feature());
        let expected: Vec<Action> = [
            "bulk_get",
            "get",
            "find",
            "create",
            "bulk_create",
            "update",
            "bulk_update",
            "delete",
            "share_to_space",
        ]
        .iter()
        .map(|operation| Action::from(format!("saved_object:dash/{operation}")))
        .collect();
        assert_eq!(actions, expected);
    }

    #[test]
    fn empty_privilege_yields_no_actions() {
        let builder = CompositePrivilegeBuilder::new(&Actions::new("1.0.0"));
        assert!(builder.get_actions(&FeaturePrivilege::default(), &feature()).is_empty());
    }
}
