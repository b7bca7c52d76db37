//! # UI Capabilities Merger
//!
//! Builds the nested map of boolean capability flags the UI layer consults to
//! gate interface elements: one entry per feature id plus a shared catalogue
//! namespace merged across all features.
//!
//! The merge is independent of privilege compilation and of the sub-feature
//! folding rules: every declared capability — top-level and every sub-feature
//! privilege, across every group, regardless of group type or `includeIn` —
//! contributes unconditionally. Folding semantics apply to authorization-time
//! action grants, not to UI-capability discovery.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use warden_domain::features::Feature;

/// Merged capability flags: `catalogue` plus one map per feature id.
///
/// Every feature id appears as a key even when its map is empty, and
/// `catalogue` is always present. All values are `true`; a capability is
/// revoked by never being declared, not by flipping a flag.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiCapabilities {
    pub catalogue: BTreeMap<String, bool>,
    #[serde(flatten)]
    pub features: BTreeMap<String, BTreeMap<String, bool>>,
}

impl UiCapabilities {
    /// Capability flags of one feature, if it was merged.
    #[must_use]
    pub fn feature(&self, feature_id: &str) -> Option<&BTreeMap<String, bool>> {
        self.features.get(feature_id)
    }

    #[must_use]
    pub fn has_capability(&self, feature_id: &str, capability: &str) -> bool {
        self.feature(feature_id)
            .and_then(|capabilities| capabilities.get(capability))
            .copied()
            .unwrap_or(false)
    }
}

/// Merges every feature's declared UI capabilities and catalogue entries.
///
/// Pure and side-effect-free. The merge is monotonic (only additive) and
/// idempotent: duplicate keys across features simply re-assert `true`, so
/// merge order never changes the result.
#[must_use]
pub fn merge_capabilities(features: &[Feature]) -> UiCapabilities {
    let mut merged = UiCapabilities::default();

    for feature in features {
        let capabilities = merged.features.entry(feature.id.clone()).or_default();

        for (_, privilege) in feature.privilege_entries() {
            for capability in &privilege.ui {
                capabilities.insert(capability.clone(), true);
            }
        }
        for sub_feature in &feature.sub_features {
            for group in &sub_feature.privilege_groups {
                for privilege in &group.privileges {
                    for capability in &privilege.ui {
                        capabilities.insert(capability.clone(), true);
                    }
                }
            }
        }

        for entry in &feature.catalogue {
            merged.catalogue.insert(entry.clone(), true);
        }
    }

    tracing::debug!(
        features = features.len(),
        catalogue = merged.catalogue.len(),
        "merged ui capabilities"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_only_an_empty_catalogue() {
        let merged = merge_capabilities(&[]);
        assert!(merged.catalogue.is_empty());
        assert!(merged.features.is_empty());
        assert_eq!(serde_json::to_value(&merged).unwrap(), serde_json::json!({ "catalogue": {} }));
    }
}
