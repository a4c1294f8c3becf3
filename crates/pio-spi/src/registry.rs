//! Registry routing grant types to auth plugins.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::SpiError;
use crate::plugin::{AuthPlugin, AuthPluginFactory, FactoryConfig};

/// Registry of auth plugins keyed by grant type.
///
/// Registration and lookup may happen from any thread. A plugin is fully
/// constructed before it is inserted, so every thread that finds it sees
/// its initialized state.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Map of grant type to registered plugin.
    plugins: DashMap<String, Arc<dyn AuthPlugin>>,
}

impl PluginRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under its grant type.
    ///
    /// ## Errors
    ///
    /// Returns [`SpiError::DuplicateGrantType`] if another plugin already
    /// handles the grant type.
    pub fn register(&self, plugin: Arc<dyn AuthPlugin>) -> Result<(), SpiError> {
        let grant_type = plugin.grant_type().to_string();
        match self.plugins.entry(grant_type.clone()) {
            Entry::Occupied(_) => Err(SpiError::DuplicateGrantType(grant_type)),
            Entry::Vacant(slot) => {
                tracing::info!(
                    grant_type = %grant_type,
                    account_type = plugin.account_type(),
                    "auth plugin registered"
                );
                slot.insert(plugin);
                Ok(())
            }
        }
    }

    /// Creates a plugin from `factory` and registers it.
    ///
    /// ## Errors
    ///
    /// Returns the factory's error if creation fails, in which case nothing
    /// is registered, or [`SpiError::DuplicateGrantType`].
    pub fn register_factory(
        &self,
        factory: &dyn AuthPluginFactory,
        config: &dyn FactoryConfig,
    ) -> Result<(), SpiError> {
        let metadata = factory.metadata();
        tracing::debug!(factory = metadata.id, name = metadata.name, "creating auth plugin");

        let plugin = factory.create(config).map_err(|err| {
            tracing::error!(factory = metadata.id, error = %err, "auth plugin creation failed");
            err
        })?;
        self.register(plugin)
    }

    /// Gets the plugin for a grant type.
    #[must_use]
    pub fn get(&self, grant_type: &str) -> Option<Arc<dyn AuthPlugin>> {
        self.plugins
            .get(grant_type)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Gets the plugin for a grant type, failing if none is registered.
    ///
    /// ## Errors
    ///
    /// Returns [`SpiError::PluginNotFound`] for unknown grant types.
    pub fn route(&self, grant_type: &str) -> Result<Arc<dyn AuthPlugin>, SpiError> {
        self.get(grant_type)
            .ok_or_else(|| SpiError::PluginNotFound(grant_type.to_string()))
    }

    /// Finds the plugin that authenticates accounts of `account_type`.
    #[must_use]
    pub fn find_by_account_type(&self, account_type: &str) -> Option<Arc<dyn AuthPlugin>> {
        self.plugins
            .iter()
            .find(|entry| entry.value().account_type() == account_type)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Lists registered grant types in sorted order.
    #[must_use]
    pub fn grant_types(&self) -> Vec<String> {
        let mut grant_types: Vec<String> =
            self.plugins.iter().map(|entry| entry.key().clone()).collect();
        grant_types.sort();
        grant_types
    }

    /// Checks if a grant type is registered.
    #[must_use]
    pub fn has_grant_type(&self, grant_type: &str) -> bool {
        self.plugins.contains_key(grant_type)
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns whether no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Validates that required grant types are registered.
    ///
    /// ## Errors
    ///
    /// Returns an error naming the first missing grant type.
    pub fn validate_required(&self, grant_types: &[&str]) -> Result<(), SpiError> {
        for grant_type in grant_types {
            if !self.has_grant_type(grant_type) {
                return Err(SpiError::PluginNotFound((*grant_type).to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::error::AuthPluginResult;
    use crate::plugin::{AuthOutcome, FormBody, PluginMetadata};

    #[derive(Debug)]
    struct StaticPlugin {
        grant_type: &'static str,
        account_type: &'static str,
    }

    impl AuthPlugin for StaticPlugin {
        fn grant_type(&self) -> &str {
            self.grant_type
        }

        fn account_type(&self) -> &str {
            self.account_type
        }

        fn authenticate(&self, _body: &FormBody) -> AuthPluginResult<AuthOutcome> {
            Ok(AuthOutcome::Rejected)
        }
    }

    #[derive(Debug)]
    struct StaticFactory {
        fail: bool,
    }

    impl AuthPluginFactory for StaticFactory {
        fn id(&self) -> &'static str {
            "static"
        }

        fn metadata(&self) -> PluginMetadata {
            PluginMetadata {
                id: "static",
                name: "Static",
                description: "Rejects everything",
            }
        }

        fn create(&self, _config: &dyn FactoryConfig) -> Result<Arc<dyn AuthPlugin>, SpiError> {
            if self.fail {
                return Err(SpiError::InitializationFailed("boom".to_string()));
            }
            Ok(Arc::new(StaticPlugin {
                grant_type: "urn:test:static",
                account_type: "test:static",
            }))
        }
    }

    fn plugin(grant_type: &'static str, account_type: &'static str) -> Arc<dyn AuthPlugin> {
        Arc::new(StaticPlugin {
            grant_type,
            account_type,
        })
    }

    #[test]
    fn registry_starts_empty() {
        let registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("urn:test:a").is_none());
    }

    #[test]
    fn routes_by_grant_type() {
        let registry = PluginRegistry::new();
        registry.register(plugin("urn:test:a", "test:a")).unwrap();
        registry.register(plugin("urn:test:b", "test:b")).unwrap();

        assert_eq!(registry.route("urn:test:b").unwrap().account_type(), "test:b");
        assert_eq!(registry.grant_types(), vec!["urn:test:a", "urn:test:b"]);
    }

    #[test]
    fn unknown_grant_type_is_not_found() {
        let registry = PluginRegistry::new();
        let err = registry.route("urn:test:missing").unwrap_err();
        assert!(matches!(err, SpiError::PluginNotFound(ref g) if g == "urn:test:missing"));
    }

    #[test]
    fn duplicate_grant_type_is_rejected() {
        let registry = PluginRegistry::new();
        registry.register(plugin("urn:test:a", "test:a")).unwrap();

        let err = registry.register(plugin("urn:test:a", "test:other")).unwrap_err();
        assert!(matches!(err, SpiError::DuplicateGrantType(_)));
        assert_eq!(registry.route("urn:test:a").unwrap().account_type(), "test:a");
    }

    #[test]
    fn finds_plugin_by_account_type() {
        let registry = PluginRegistry::new();
        registry.register(plugin("urn:test:a", "test:a")).unwrap();

        let found = registry.find_by_account_type("test:a").unwrap();
        assert_eq!(found.grant_type(), "urn:test:a");
        assert!(registry.find_by_account_type("test:b").is_none());
    }

    #[test]
    fn factory_registration_registers_created_plugin() {
        let registry = PluginRegistry::new();
        registry
            .register_factory(&StaticFactory { fail: false }, &HashMap::<String, String>::new())
            .unwrap();

        assert_eq!(registry.route("urn:test:static").unwrap().account_type(), "test:static");
        assert!(registry.validate_required(&["urn:test:static"]).is_ok());
    }

    #[test]
    fn failed_factory_registers_nothing() {
        let registry = PluginRegistry::new();
        let result = registry.register_factory(&StaticFactory { fail: true }, &HashMap::<String, String>::new());

        assert!(matches!(result, Err(SpiError::InitializationFailed(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn validate_required_fails_for_missing() {
        let registry = PluginRegistry::new();
        let result = registry.validate_required(&["urn:test:required"]);
        assert!(result.is_err());
    }
}
