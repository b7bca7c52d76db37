//! Facade crate for `Warden` features and shared modules.
//! Re-exports the domain primitives and aggregates the compiled outputs.
//! Keep this crate thin: it should compose other crates, not implement
//! business logic.
//!
//! ## Usage
//! - Register features into a [`domain::registry::FeatureRegistry`] and lock it.
//! - Call [`compile`] to produce the authorization table and the UI
//!   capabilities map in one pass over the registered features.

pub use warden_capabilities as capabilities;
pub use warden_domain as domain;
pub use warden_privileges as privileges;

use warden_capabilities::UiCapabilities;
use warden_domain::registry::FeatureRegistry;
use warden_privileges::{Actions, PrivilegeCompiler, PrivilegesError, RawPrivileges};

/// The full compiled authorization model of one feature registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationModel {
    pub privileges: RawPrivileges,
    pub capabilities: UiCapabilities,
}

/// Compiles the privilege table and the UI capabilities map for every
/// registered feature.
///
/// Pure function of the registry contents; callers on hot paths cache the
/// result and recompute only when the registry changes.
///
/// # Errors
/// Returns [`PrivilegesError`] when any registered feature lacks a privilege
/// definition.
pub fn compile(
    registry: &FeatureRegistry,
    actions: Actions,
) -> Result<AuthorizationModel, PrivilegesError> {
    let features = registry.get_features();
    let privileges = PrivilegeCompiler::new(actions).compile(features)?;
    let capabilities = warden_capabilities::merge_capabilities(features);
    Ok(AuthorizationModel { privileges, capabilities })
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_domain::features::{Feature, FeaturePrivilege};

    #[test]
    fn compile_combines_both_outputs() {
        let mut registry = FeatureRegistry::new();
        registry
            .register(Feature {
                id: "search".to_owned(),
                name: "Search".to_owned(),
                app: Vec::new(),
                catalogue: vec!["search".to_owned()],
                nav_link_id: None,
                exclude_from_base_privileges: false,
                privileges: Some(std::collections::BTreeMap::from([(
                    "all".to_owned(),
                    FeaturePrivilege { ui: vec!["show".to_owned()], ..Default::default() },
                )])),
                sub_features: Vec::new(),
                reserved: None,
            })
            .unwrap();
        registry.lock();

        let model = compile(&registry, Actions::new("1.0.0")).unwrap();
        assert!(model.privileges.features.contains_key("search"));
        assert!(model.capabilities.has_capability("search", "show"));
        assert!(model.capabilities.catalogue["search"]);
    }
}
