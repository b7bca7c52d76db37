//! Feature registry: validated, insertion-ordered feature definitions.
//!
//! Features are registered once (typically during startup), the registry is
//! then locked, and every compiled output downstream is a pure function of
//! [`FeatureRegistry::get_features`].

use crate::features::{Feature, MINIMAL_PRIVILEGE_PREFIX};
use std::collections::HashSet;
use thiserror::Error;

/// Registration-time configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("feature '{id}' is already registered")]
    DuplicateFeature { id: String },

    #[error("feature '{feature_id}' declares privilege '{privilege_id}' more than once")]
    DuplicatePrivilege {
        feature_id: String,
        privilege_id: String,
    },

    #[error(
        "feature '{feature_id}' declares privilege '{privilege_id}', \
         which collides with the reserved '{MINIMAL_PRIVILEGE_PREFIX}' prefix"
    )]
    ReservedPrivilegePrefix {
        feature_id: String,
        privilege_id: String,
    },

    #[error("registry is locked; features cannot be registered after startup")]
    Locked,
}

/// Insertion-ordered collection of validated feature definitions.
///
/// Registration order affects only the stable ordering of compiled output,
/// never its semantics.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    features: Vec<Feature>,
    locked: bool,
}

impl FeatureRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a feature definition.
    ///
    /// # Errors
    /// Returns a [`RegistryError`] when the registry is locked, the feature id
    /// is already taken, a privilege id is declared twice within the feature
    /// (across top-level and sub-feature privileges), or a privilege id uses
    /// the reserved `minimal_` prefix.
    pub fn register(&mut self, feature: Feature) -> Result<(), RegistryError> {
        if self.locked {
            return Err(RegistryError::Locked);
        }
        if self.features.iter().any(|f| f.id == feature.id) {
            return Err(RegistryError::DuplicateFeature { id: feature.id });
        }
        validate_privilege_ids(&feature)?;

        tracing::debug!(feature = %feature.id, "feature registered");
        self.features.push(feature);
        Ok(())
    }

    /// Seals the registry; further registration fails with
    /// [`RegistryError::Locked`].
    pub fn lock(&mut self) {
        self.locked = true;
        tracing::info!(features = self.features.len(), "feature registry locked");
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Registered features in registration order.
    #[must_use]
    pub fn get_features(&self) -> &[Feature] {
        &self.features
    }
}

/// Privilege ids must be unique per feature across both hierarchy levels, and
/// must not collide with the synthesized `minimal_` namespace.
fn validate_privilege_ids(feature: &Feature) -> Result<(), RegistryError> {
    let mut seen: HashSet<&str> = HashSet::new();

    let top_level = feature.privilege_entries().map(|(id, _)| id);
    let sub_feature = feature
        .sub_features
        .iter()
        .flat_map(|sub| &sub.privilege_groups)
        .flat_map(|group| &group.privileges)
        .map(|privilege| privilege.id.as_str());

    for id in top_level.chain(sub_feature) {
        if id.starts_with(MINIMAL_PRIVILEGE_PREFIX) {
            return Err(RegistryError::ReservedPrivilegePrefix {
                feature_id: feature.id.clone(),
                privilege_id: id.to_owned(),
            });
        }
        if !seen.insert(id) {
            return Err(RegistryError::DuplicatePrivilege {
                feature_id: feature.id.clone(),
                privilege_id: id.to_owned(),
            });
        }
    }

    Ok(())
}
