//! The privilege compiler: features in, the full authorization table out.
//!
//! ## Compilation
//! One call walks the feature collection four times, producing:
//!
//! 1. **Base privileges** (`global`/`space`): every action of every
//!    base-eligible privilege, deduplicated across features.
//! 2. **Per-feature tables**: one action list per declared privilege, plus
//!    synthesized `minimal_<id>` variants (no sub-feature augmentation) when
//!    the feature has sub-features, plus one standalone entry per sub-feature
//!    privilege.
//! 3. **Reserved grants**: version-gated action lists for features declaring
//!    a reserved privilege; reserved privileges are not assignable through
//!    normal login-gated grants.
//!
//! The computation is pure and deterministic: the same feature collection
//! always compiles to a structurally identical table.

use crate::actions::{Action, Actions};
use crate::builder::CompositePrivilegeBuilder;
use crate::error::PrivilegesError;
use crate::iterator::{
    IterationOptions, feature_privilege_iterator, sub_feature_privilege_iterator,
};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use warden_domain::features::{
    Feature, FeaturePrivilege, MINIMAL_PRIVILEGE_PREFIX, PRIVILEGE_ALL, PRIVILEGE_READ,
};

/// Action lists of one scope, keyed by base privilege id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePrivileges {
    pub all: Vec<Action>,
    pub read: Vec<Action>,
}

/// The compiled authorization table consumed by a downstream authorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrivileges {
    /// Base privileges spanning every space.
    pub global: BasePrivileges,
    /// Base privileges scoped to a single space.
    pub space: BasePrivileges,
    /// Per-feature tables: feature id → privilege id → actions. Features
    /// contributing no privileges are omitted entirely.
    pub features: BTreeMap<String, BTreeMap<String, Vec<Action>>>,
    /// Reserved grants, present only for features declaring one.
    pub reserved: BTreeMap<String, Vec<Action>>,
}

/// Running base-privilege accumulation; deduplicated once at the end.
#[derive(Default)]
struct BaseActions {
    all: Vec<Action>,
    read: Vec<Action>,
}

/// Compiles registered features into a [`RawPrivileges`] table.
#[derive(Debug)]
pub struct PrivilegeCompiler {
    actions: Actions,
    builder: CompositePrivilegeBuilder,
}

impl PrivilegeCompiler {
    #[must_use]
    pub fn new(actions: Actions) -> Self {
        let builder = CompositePrivilegeBuilder::new(&actions);
        Self { actions, builder }
    }

    /// Compiles the complete authorization table for a feature collection.
    ///
    /// Pure and side-effect-free; safe to call repeatedly and from multiple
    /// threads. Callers on hot paths cache the result, since every call
    /// re-walks the entire collection.
    ///
    /// # Errors
    /// [`PrivilegesError::MissingPrivileges`] when any feature lacks a
    /// privilege definition. No partial table is produced.
    pub fn compile(&self, features: &[Feature]) -> Result<RawPrivileges, PrivilegesError> {
        for feature in features {
            if feature.privileges.is_none() {
                return Err(PrivilegesError::MissingPrivileges { feature_id: feature.id.clone() });
            }
        }

        let base = self.accumulate_base_actions(features);
        let all_actions = dedup_stable(base.all);
        let read_actions = dedup_stable(base.read);

        let compiled = RawPrivileges {
            global: BasePrivileges {
                all: self.global_all(&all_actions),
                read: self.base_read(&read_actions),
            },
            space: BasePrivileges {
                all: self.space_all(&all_actions),
                read: self.base_read(&read_actions),
            },
            features: self.feature_tables(features),
            reserved: self.reserved_grants(features),
        };

        tracing::debug!(
            features = features.len(),
            base_all = compiled.global.all.len(),
            base_read = compiled.global.read.len(),
            "compiled privileges"
        );
        Ok(compiled)
    }

    /// Folds every base-eligible privilege's actions into one accumulator.
    ///
    /// Every base-eligible privilege contributes to `all` regardless of its
    /// id, since the base `all` grant must cover every grantable base action;
    /// only privileges literally named `read` contribute to `read`.
    fn accumulate_base_actions(&self, features: &[Feature]) -> BaseActions {
        let base_eligible =
            |_: &str, privilege: &FeaturePrivilege| !privilege.exclude_from_base_privileges;
        let options = IterationOptions::augmented().with_predicate(&base_eligible);

        features
            .iter()
            .filter(|feature| !feature.exclude_from_base_privileges)
            .flat_map(|feature| {
                feature_privilege_iterator(feature, options)
                    .map(move |(id, privilege)| (feature, id, privilege))
            })
            .fold(BaseActions::default(), |mut base, (feature, id, privilege)| {
                let actions = self.builder.get_actions(privilege.as_ref(), feature);
                if id == PRIVILEGE_READ {
                    base.read.extend(actions.iter().cloned());
                }
                base.all.extend(actions);
                base
            })
    }

    fn feature_tables(&self, features: &[Feature]) -> BTreeMap<String, BTreeMap<String, Vec<Action>>> {
        let mut tables = BTreeMap::new();

        for feature in features {
            let mut table = BTreeMap::new();

            for (id, privilege) in feature_privilege_iterator(feature, IterationOptions::augmented())
            {
                table.insert(id.to_owned(), self.privilege_actions(id, privilege.as_ref(), feature));
            }

            // Minimal variants intentionally exclude sub-feature augmentation.
            if !feature.sub_features.is_empty() {
                for (id, privilege) in feature_privilege_iterator(feature, IterationOptions::raw())
                {
                    table.insert(
                        format!("{MINIMAL_PRIVILEGE_PREFIX}{id}"),
                        self.privilege_actions(id, privilege.as_ref(), feature),
                    );
                }
            }

            for sub_privilege in sub_feature_privilege_iterator(feature) {
                let mut list = vec![self.actions.login(), self.actions.version()];
                list.extend(self.builder.get_actions(sub_privilege, feature));
                table.insert(sub_privilege.id.clone(), dedup_stable(list));
            }

            if !table.is_empty() {
                tables.insert(feature.id.clone(), table);
            }
        }

        tables
    }

    /// `[login, version]` + builder output, with the catch-all sentinel
    /// appended only for the `all` privilege (minimal variant included).
    fn privilege_actions(
        &self,
        privilege_id: &str,
        privilege: &FeaturePrivilege,
        feature: &Feature,
    ) -> Vec<Action> {
        let mut list = vec![self.actions.login(), self.actions.version()];
        list.extend(self.builder.get_actions(privilege, feature));
        if privilege_id == PRIVILEGE_ALL {
            list.push(self.actions.all_hack());
        }
        dedup_stable(list)
    }

    fn reserved_grants(&self, features: &[Feature]) -> BTreeMap<String, Vec<Action>> {
        features
            .iter()
            .filter_map(|feature| {
                feature.reserved.as_ref().map(|reserved| {
                    // No login action: reserved privileges are not assignable
                    // through normal login-gated grants.
                    let mut list = vec![self.actions.version()];
                    list.extend(self.builder.get_actions(&reserved.privilege, feature));
                    (feature.id.clone(), dedup_stable(list))
                })
            })
            .collect()
    }

    fn global_all(&self, all_actions: &[Action]) -> Vec<Action> {
        let mut list = vec![
            self.actions.login(),
            self.actions.version(),
            self.actions.api("features"),
            self.actions.space("manage"),
            self.actions.ui("spaces", "manage"),
        ];
        list.extend(all_actions.iter().cloned());
        list.push(self.actions.all_hack());
        dedup_stable(list)
    }

    fn space_all(&self, all_actions: &[Action]) -> Vec<Action> {
        let mut list = vec![self.actions.login(), self.actions.version()];
        list.extend(all_actions.iter().cloned());
        list.push(self.actions.all_hack());
        dedup_stable(list)
    }

    fn base_read(&self, read_actions: &[Action]) -> Vec<Action> {
        let mut list = vec![self.actions.login(), self.actions.version()];
        list.extend(read_actions.iter().cloned());
        dedup_stable(list)
    }
}

/// Stable set union: first occurrence wins, order preserved.
fn dedup_stable(actions: Vec<Action>) -> Vec<Action> {
    let mut seen = FxHashSet::default();
    actions.into_iter().filter(|action| seen.insert(action.clone())).collect()
}
