use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Privilege id of the full-access top-level privilege.
pub const PRIVILEGE_ALL: &str = "all";
/// Privilege id of the read-only top-level privilege.
pub const PRIVILEGE_READ: &str = "read";
/// Prefix of the synthesized minimal privilege variants.
///
/// Privilege ids starting with this prefix are rejected at registration time
/// so declared ids can never collide with the synthesized entries.
pub const MINIMAL_PRIVILEGE_PREFIX: &str = "minimal_";

/// A registrable unit of functionality with its own privilege set and
/// UI capability flags.
///
/// Features are created once at registration time and treated as read-only
/// input afterwards. All compiled outputs (privilege tables, capability maps)
/// are pure functions of the registered feature collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Feature {
    /// Unique feature id, used as the key in every compiled output.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Application identifiers this feature makes visible.
    #[serde(default)]
    pub app: Vec<String>,
    /// Catalogue entry ids, merged into the shared catalogue namespace.
    #[serde(default)]
    pub catalogue: Vec<String>,
    /// Optional navigation link associated with this feature.
    #[serde(default)]
    pub nav_link_id: Option<String>,
    /// When true, no privilege of this feature contributes to the
    /// global/space base privileges. The feature's own table is unaffected.
    #[serde(default)]
    pub exclude_from_base_privileges: bool,
    /// Top-level privileges, keyed by privilege id (typically `all`/`read`).
    ///
    /// `None` is a configuration error surfaced at compile time; a feature
    /// with no grantable privileges declares an empty map instead.
    #[serde(default)]
    pub privileges: Option<BTreeMap<String, FeaturePrivilege>>,
    /// Finer-grained permission dimensions, in declaration order.
    /// Never absent, only empty.
    #[serde(default)]
    pub sub_features: Vec<SubFeature>,
    /// Optional reserved privilege, granted outside normal assignable scopes.
    #[serde(default)]
    pub reserved: Option<ReservedPrivilege>,
}

impl Feature {
    /// Top-level privilege entries in stable (key) order, or an empty
    /// iterator when no privileges are declared.
    pub fn privilege_entries(&self) -> impl Iterator<Item = (&str, &FeaturePrivilege)> {
        self.privileges
            .iter()
            .flat_map(|map| map.iter().map(|(id, privilege)| (id.as_str(), privilege)))
    }
}

/// A named bundle of grantable capabilities.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeaturePrivilege {
    /// API-route action tags granted by this privilege.
    #[serde(default)]
    pub api: Vec<String>,
    /// Application identifiers this privilege makes accessible.
    #[serde(default)]
    pub app: Vec<String>,
    /// Saved-object types this privilege can write or read.
    #[serde(default)]
    pub saved_object: SavedObjectRights,
    /// UI capability keys toggled on by this privilege.
    #[serde(default)]
    pub ui: Vec<String>,
    /// When true, this privilege never contributes to the global/space
    /// base privileges even if its feature is base-eligible.
    #[serde(default)]
    pub exclude_from_base_privileges: bool,
}

/// Saved-object access lists, split by write (`all`) and read access.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SavedObjectRights {
    #[serde(default)]
    pub all: Vec<String>,
    #[serde(default)]
    pub read: Vec<String>,
}

/// A finer-grained, optional permission dimension nested under a feature,
/// organized into privilege groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubFeature {
    pub name: String,
    #[serde(default)]
    pub privilege_groups: Vec<SubFeaturePrivilegeGroup>,
}

/// An ordered group of sub-feature privileges with shared combination
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubFeaturePrivilegeGroup {
    pub group_type: SubFeatureGroupType,
    #[serde(default)]
    pub privileges: Vec<SubFeaturePrivilege>,
}

/// Combination semantics of a privilege group.
///
/// The compiler emits actions for every privilege regardless of group type;
/// `MutuallyExclusive` is an assignment-time constraint used by UI tooling to
/// render exclusive choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubFeatureGroupType {
    /// Every privilege in the group may be granted simultaneously.
    Independent,
    /// At most one privilege in the group is grantable per assignment.
    MutuallyExclusive,
}

/// A standalone grantable privilege declared by a sub-feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubFeaturePrivilege {
    /// Unique privilege id within the owning feature.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub api: Vec<String>,
    #[serde(default)]
    pub app: Vec<String>,
    #[serde(default)]
    pub saved_object: SavedObjectRights,
    #[serde(default)]
    pub ui: Vec<String>,
    /// Which top-level privilege this sub-feature privilege folds into.
    pub include_in: IncludeIn,
}

/// Folding policy of a sub-feature privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeIn {
    /// Folded into the `all` top-level privilege (and into `read`, which
    /// always absorbs `all`-level sub-feature privileges).
    All,
    /// Folded into the `read` top-level privilege only.
    Read,
    /// Never folded; grantable only as a standalone sub-feature privilege.
    None,
}

/// A feature-declared grant outside normal assignable scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReservedPrivilege {
    pub description: String,
    pub privilege: FeaturePrivilege,
}

/// Uniform read access to the capability lists of a privilege, regardless of
/// whether it is a top-level or a sub-feature privilege.
///
/// Action builders and the privilege iterator consume privileges exclusively
/// through this trait, so neither needs to inspect the concrete shape.
pub trait CapabilityContributor {
    fn api(&self) -> &[String];
    fn app(&self) -> &[String];
    fn saved_object(&self) -> &SavedObjectRights;
    fn ui(&self) -> &[String];
}

impl CapabilityContributor for FeaturePrivilege {
    fn api(&self) -> &[String] {
        &self.api
    }

    fn app(&self) -> &[String] {
        &self.app
    }

    fn saved_object(&self) -> &SavedObjectRights {
        &self.saved_object
    }

    fn ui(&self) -> &[String] {
        &self.ui
    }
}

impl CapabilityContributor for SubFeaturePrivilege {
    fn api(&self) -> &[String] {
        &self.api
    }

    fn app(&self) -> &[String] {
        &self.app
    }

    fn saved_object(&self) -> &SavedObjectRights {
        &self.saved_object
    }

    fn ui(&self) -> &[String] {
        &self.ui
    }
}
