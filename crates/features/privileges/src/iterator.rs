//! Flattened, ordered iteration over a feature's privileges.
//!
//! Two walks are provided: [`feature_privilege_iterator`] yields the
//! top-level privileges (optionally augmented with the sub-feature privileges
//! that fold into them), and [`sub_feature_privilege_iterator`] flat-walks
//! every sub-feature privilege across every group.

use std::borrow::Cow;
use warden_domain::features::{
    CapabilityContributor, Feature, FeaturePrivilege, IncludeIn, PRIVILEGE_READ,
    SubFeaturePrivilege,
};

/// Inclusion policy for [`feature_privilege_iterator`].
#[derive(Clone, Copy, Default)]
pub struct IterationOptions<'a> {
    /// When true, each yielded privilege is the union of its own capability
    /// lists and every sub-feature privilege folding into it. When false,
    /// privileges pass through verbatim (the `minimal_` variants).
    pub augment_with_sub_feature_privileges: bool,
    /// Filters which top-level privileges are yielded. Defaults to all.
    pub predicate: Option<&'a dyn Fn(&str, &FeaturePrivilege) -> bool>,
}

impl std::fmt::Debug for IterationOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IterationOptions")
            .field(
                "augment_with_sub_feature_privileges",
                &self.augment_with_sub_feature_privileges,
            )
            .field("predicate", &self.predicate.map(|_| "<fn>"))
            .finish()
    }
}

impl<'a> IterationOptions<'a> {
    /// Augmented iteration without a predicate.
    #[must_use]
    pub const fn augmented() -> Self {
        Self { augment_with_sub_feature_privileges: true, predicate: None }
    }

    /// Verbatim iteration without a predicate.
    #[must_use]
    pub const fn raw() -> Self {
        Self { augment_with_sub_feature_privileges: false, predicate: None }
    }

    #[must_use]
    pub fn with_predicate(
        mut self,
        predicate: &'a dyn Fn(&str, &FeaturePrivilege) -> bool,
    ) -> Self {
        self.predicate = Some(predicate);
        self
    }
}

/// Ordered sequence of `(privilege_id, privilege)` for a feature's top-level
/// privileges.
///
/// A feature without a privilege definition yields an empty sequence; the
/// compiler rejects such features before iterating.
pub fn feature_privilege_iterator<'a>(
    feature: &'a Feature,
    options: IterationOptions<'a>,
) -> impl Iterator<Item = (&'a str, Cow<'a, FeaturePrivilege>)> + 'a {
    feature
        .privilege_entries()
        .filter(move |(id, privilege)| options.predicate.is_none_or(|accept| accept(id, privilege)))
        .map(move |(id, privilege)| {
            if options.augment_with_sub_feature_privileges {
                (id, Cow::Owned(merge_with_sub_features(id, privilege, feature)))
            } else {
                (id, Cow::Borrowed(privilege))
            }
        })
}

/// Flat walk of every sub-feature privilege: sub-feature declaration order,
/// then group order, then privilege order.
pub fn sub_feature_privilege_iterator(
    feature: &Feature,
) -> impl Iterator<Item = &SubFeaturePrivilege> {
    feature
        .sub_features
        .iter()
        .flat_map(|sub_feature| &sub_feature.privilege_groups)
        .flat_map(|group| &group.privileges)
}

/// Whether a sub-feature privilege folds into the given top-level privilege.
///
/// `all`-included privileges fold into every top-level privilege;
/// `read`-included ones fold into `read` only.
fn folds_into(include_in: IncludeIn, privilege_id: &str) -> bool {
    match include_in {
        IncludeIn::None => false,
        IncludeIn::All => true,
        IncludeIn::Read => privilege_id == PRIVILEGE_READ,
    }
}

/// Union of a top-level privilege with every sub-feature privilege folding
/// into it. Own capabilities first, sub-feature capabilities appended in
/// declaration order, deduplicated.
fn merge_with_sub_features(
    privilege_id: &str,
    privilege: &FeaturePrivilege,
    feature: &Feature,
) -> FeaturePrivilege {
    let mut merged = privilege.clone();

    for sub_privilege in sub_feature_privilege_iterator(feature) {
        if !folds_into(sub_privilege.include_in, privilege_id) {
            continue;
        }
        extend_unique(&mut merged.api, sub_privilege.api());
        extend_unique(&mut merged.app, sub_privilege.app());
        extend_unique(&mut merged.saved_object.all, &sub_privilege.saved_object().all);
        extend_unique(&mut merged.saved_object.read, &sub_privilege.saved_object().read);
        extend_unique(&mut merged.ui, sub_privilege.ui());
    }

    merged
}

fn extend_unique(target: &mut Vec<String>, additions: &[String]) {
    for value in additions {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}
