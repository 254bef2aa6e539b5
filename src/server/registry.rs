//! Resource registry for managing resource descriptors and their list routes

use crate::config::SelectConfig;
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait that describes how to build the list route of a resource kind
///
/// Each resource kind (secret, product, ...) implements this trait to expose
/// `GET /{plural}` through the selection pipeline.
pub trait ResourceDescriptor: Send + Sync {
    /// The resource kind (singular, e.g., "secret")
    fn kind(&self) -> &str;

    /// The plural form used as the route segment (e.g., "secrets")
    fn plural(&self) -> &str;

    /// Build the routes for this resource
    fn build_routes(&self, config: Arc<SelectConfig>) -> Router;
}

/// Registry for all resource kinds served by the application
#[derive(Default)]
pub struct ResourceRegistry {
    descriptors: HashMap<String, Box<dyn ResourceDescriptor>>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register a resource descriptor
    ///
    /// The kind is used as the key, so registering a kind twice replaces the
    /// earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn ResourceDescriptor>) {
        let kind = descriptor.kind().to_string();
        if self.descriptors.insert(kind.clone(), descriptor).is_some() {
            tracing::warn!(kind = %kind, "resource kind registered twice, replacing");
        }
    }

    /// Build a router with all registered resource routes
    pub fn build_routes(&self, config: Arc<SelectConfig>) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(config.clone()));
        }

        router
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.descriptors.keys().map(|s| s.as_str()).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Plural route segment of a registered kind
    pub fn plural_of(&self, kind: &str) -> Option<&str> {
        self.descriptors.get(kind).map(|d| d.plural())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal descriptor for testing
    struct MockDescriptor {
        kind: String,
        plural: String,
    }

    impl MockDescriptor {
        fn new(kind: &str, plural: &str) -> Self {
            Self {
                kind: kind.to_string(),
                plural: plural.to_string(),
            }
        }
    }

    impl ResourceDescriptor for MockDescriptor {
        fn kind(&self) -> &str {
            &self.kind
        }

        fn plural(&self) -> &str {
            &self.plural
        }

        fn build_routes(&self, _config: Arc<SelectConfig>) -> Router {
            Router::new()
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ResourceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.kinds().is_empty());
    }

    #[test]
    fn test_kinds_are_sorted() {
        let mut registry = ResourceRegistry::new();
        registry.register(Box::new(MockDescriptor::new("secret", "secrets")));
        registry.register(Box::new(MockDescriptor::new("product", "products")));
        registry.register(Box::new(MockDescriptor::new("rule_chain_msg_log", "rule_chain_msg_logs")));

        assert_eq!(
            registry.kinds(),
            vec!["product", "rule_chain_msg_log", "secret"]
        );
        assert_eq!(registry.plural_of("product"), Some("products"));
        assert_eq!(registry.plural_of("device"), None);
    }

    #[test]
    fn test_register_same_kind_replaces() {
        let mut registry = ResourceRegistry::new();
        registry.register(Box::new(MockDescriptor::new("product", "products")));
        registry.register(Box::new(MockDescriptor::new("product", "catalog")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.plural_of("product"), Some("catalog"));
    }

    #[test]
    fn test_build_routes_with_no_descriptors() {
        let registry = ResourceRegistry::new();
        let _router = registry.build_routes(Arc::new(SelectConfig::default()));
    }
}
