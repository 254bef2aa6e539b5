//! Generic list endpoint for any resource kind with a cell adapter

use crate::config::SelectConfig;
use crate::core::cell::{CellAdapter, EntityAdapter};
use crate::core::entity::Data;
use crate::core::error::SelectError;
use crate::core::extractors::SelectQuery;
use crate::core::select::{ResultEnvelope, select};
use crate::core::store::ItemStore;
use crate::server::registry::ResourceDescriptor;
use axum::extract::{FromRef, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// State of a list endpoint
pub struct ListState<A, S> {
    pub kind: Arc<str>,
    pub adapter: Arc<A>,
    pub store: Arc<S>,
    pub config: Arc<SelectConfig>,
}

impl<A, S> Clone for ListState<A, S> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            adapter: self.adapter.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<A, S> FromRef<ListState<A, S>> for Arc<SelectConfig> {
    fn from_ref(state: &ListState<A, S>) -> Self {
        state.config.clone()
    }
}

/// List items - GET /{plural}
///
/// Loads every item from the store and runs the request's selection over
/// them.
pub async fn list_resources<A, S>(
    State(state): State<ListState<A, S>>,
    SelectQuery(query): SelectQuery,
) -> Result<Json<ResultEnvelope<A::Item>>, SelectError>
where
    A: CellAdapter + Send + Sync + 'static,
    A::Item: Serialize + Send + 'static,
    S: ItemStore<A::Item> + 'static,
{
    let items = state
        .store
        .list()
        .await
        .map_err(|source| SelectError::Source {
            kind: state.kind.to_string(),
            source,
        })?;

    let envelope = select(state.adapter.as_ref(), items, &query);
    tracing::info!(
        kind = %state.kind,
        total = envelope.list_meta.total_items,
        returned = envelope.items.len(),
        "listed resources"
    );

    Ok(Json(envelope))
}

/// Descriptor serving `GET /{plural}` for one adapter and store
pub struct ListResource<A, S> {
    kind: String,
    plural: String,
    adapter: Arc<A>,
    store: Arc<S>,
}

impl<A, S> ListResource<A, S> {
    pub fn new(kind: impl Into<String>, plural: impl Into<String>, adapter: A, store: S) -> Self {
        Self {
            kind: kind.into(),
            plural: plural.into(),
            adapter: Arc::new(adapter),
            store: Arc::new(store),
        }
    }
}

impl<T, S> ListResource<EntityAdapter<T>, S>
where
    T: Data,
{
    /// List endpoint for an entity, named after the entity's resource names
    pub fn for_entity(store: S) -> Self {
        Self::new(
            T::resource_name_singular(),
            T::resource_name(),
            EntityAdapter::new(),
            store,
        )
    }
}

impl<A, S> ResourceDescriptor for ListResource<A, S>
where
    A: CellAdapter + Send + Sync + 'static,
    A::Item: Serialize + Send + 'static,
    S: ItemStore<A::Item> + 'static,
{
    fn kind(&self) -> &str {
        &self.kind
    }

    fn plural(&self) -> &str {
        &self.plural
    }

    fn build_routes(&self, config: Arc<SelectConfig>) -> Router {
        let state = ListState {
            kind: Arc::from(self.kind.as_str()),
            adapter: self.adapter.clone(),
            store: self.store.clone(),
            config,
        };

        Router::new()
            .route(&format!("/{}", self.plural), get(list_resources::<A, S>))
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::product::Product;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_for_entity_uses_resource_names() {
        let resource = ListResource::<EntityAdapter<Product>, _>::for_entity(
            InMemoryStore::<Product>::new(),
        );

        assert_eq!(resource.kind(), "product");
        assert_eq!(resource.plural(), "products");
    }
}
