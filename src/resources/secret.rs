//! Cluster secrets
//!
//! Secrets arrive from the cluster as [`ClusterSecret`] and leave the list
//! endpoint as [`Secret`], which carries the object and type metadata but
//! never the secret payload.

use crate::config::SelectConfig;
use crate::core::cell::{CellAdapter, DataCell};
use crate::core::error::SelectError;
use crate::core::extractors::SelectQuery;
use crate::core::select::{DataSelectQuery, ResultEnvelope, select};
use crate::core::store::ItemStore;
use crate::core::value::{ComparableValue, ToComparable};
use crate::resources::k8s::{ObjectMeta, ResourceKind, TypeMeta, property};
use crate::server::registry::ResourceDescriptor;
use axum::extract::{FromRef, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Property holding the names of the keys stored in a secret
pub const DATA_KEYS: &str = "dataKeys";

/// Secret type as reported by the cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SecretType {
    #[default]
    Opaque,
    ServiceAccountToken,
    Dockercfg,
    DockerConfigJson,
    BasicAuth,
    SshAuth,
    Tls,
    BootstrapToken,
    Other(String),
}

impl SecretType {
    pub fn as_str(&self) -> &str {
        match self {
            SecretType::Opaque => "Opaque",
            SecretType::ServiceAccountToken => "kubernetes.io/service-account-token",
            SecretType::Dockercfg => "kubernetes.io/dockercfg",
            SecretType::DockerConfigJson => "kubernetes.io/dockerconfigjson",
            SecretType::BasicAuth => "kubernetes.io/basic-auth",
            SecretType::SshAuth => "kubernetes.io/ssh-auth",
            SecretType::Tls => "kubernetes.io/tls",
            SecretType::BootstrapToken => "bootstrap.kubernetes.io/token",
            SecretType::Other(other) => other,
        }
    }
}

impl From<&str> for SecretType {
    fn from(value: &str) -> Self {
        match value {
            "Opaque" | "" => SecretType::Opaque,
            "kubernetes.io/service-account-token" => SecretType::ServiceAccountToken,
            "kubernetes.io/dockercfg" => SecretType::Dockercfg,
            "kubernetes.io/dockerconfigjson" => SecretType::DockerConfigJson,
            "kubernetes.io/basic-auth" => SecretType::BasicAuth,
            "kubernetes.io/ssh-auth" => SecretType::SshAuth,
            "kubernetes.io/tls" => SecretType::Tls,
            "bootstrap.kubernetes.io/token" => SecretType::BootstrapToken,
            other => SecretType::Other(other.to_string()),
        }
    }
}

impl From<String> for SecretType {
    fn from(value: String) -> Self {
        SecretType::from(value.as_str())
    }
}

impl From<SecretType> for String {
    fn from(value: SecretType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secret as returned by the cluster API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSecret {
    pub metadata: ObjectMeta,

    #[serde(rename = "type", default)]
    pub secret_type: SecretType,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Vec<u8>>,
}

impl ClusterSecret {
    pub fn new(metadata: ObjectMeta, secret_type: SecretType) -> Self {
        Self {
            metadata,
            secret_type,
            data: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// A secret as presented to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub object_meta: ObjectMeta,
    pub type_meta: TypeMeta,
    #[serde(rename = "type")]
    pub secret_type: SecretType,
}

/// Secret list response body
pub type SecretList = ResultEnvelope<Secret>;

pub fn to_secret(secret: ClusterSecret) -> Secret {
    Secret {
        object_meta: secret.metadata,
        type_meta: TypeMeta::new(ResourceKind::Secret),
        secret_type: secret.secret_type,
    }
}

/// Select secrets and present them
pub fn to_secret_list(secrets: Vec<ClusterSecret>, query: &DataSelectQuery) -> SecretList {
    select(&SecretAdapter, secrets, query).map(to_secret)
}

/// Cell over a [`ClusterSecret`]
#[derive(Debug, Clone)]
pub struct SecretCell(ClusterSecret);

impl DataCell for SecretCell {
    fn property(&self, name: &str) -> Option<ComparableValue> {
        let secret = &self.0;
        match name {
            property::NAME => secret.metadata.name.to_comparable(),
            property::NAMESPACE => secret.metadata.namespace.to_comparable(),
            property::CREATION_TIMESTAMP => secret.metadata.creation_timestamp.to_comparable(),
            property::TYPE => Some(ComparableValue::from(secret.secret_type.as_str())),
            property::LABELS => Some(ComparableValue::from(secret.metadata.label_selectors())),
            DATA_KEYS => Some(ComparableValue::from(
                secret.data.keys().cloned().collect::<Vec<_>>(),
            )),
            _ => None,
        }
    }
}

/// Adapter between [`ClusterSecret`] and [`SecretCell`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretAdapter;

impl CellAdapter for SecretAdapter {
    type Item = ClusterSecret;
    type Cell = SecretCell;

    fn to_cell(&self, item: ClusterSecret) -> SecretCell {
        SecretCell(item)
    }

    fn from_cell(&self, cell: SecretCell) -> ClusterSecret {
        cell.0
    }
}

/// State of the secret list endpoint
pub struct SecretState<S> {
    pub store: Arc<S>,
    pub config: Arc<SelectConfig>,
}

impl<S> Clone for SecretState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> FromRef<SecretState<S>> for Arc<SelectConfig> {
    fn from_ref(state: &SecretState<S>) -> Self {
        state.config.clone()
    }
}

/// List secrets - GET /secrets
pub async fn list_secrets<S>(
    State(state): State<SecretState<S>>,
    SelectQuery(query): SelectQuery,
) -> Result<Json<SecretList>, SelectError>
where
    S: ItemStore<ClusterSecret> + 'static,
{
    let secrets = state
        .store
        .list()
        .await
        .map_err(|source| SelectError::Source {
            kind: ResourceKind::Secret.to_string(),
            source,
        })?;

    let list = to_secret_list(secrets, &query);
    tracing::info!(
        total = list.list_meta.total_items,
        returned = list.items.len(),
        "listed secrets"
    );

    Ok(Json(list))
}

/// Descriptor registering the secret list endpoint
pub struct SecretResource<S> {
    store: Arc<S>,
}

impl<S> SecretResource<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S> ResourceDescriptor for SecretResource<S>
where
    S: ItemStore<ClusterSecret> + 'static,
{
    fn kind(&self) -> &str {
        ResourceKind::Secret.as_str()
    }

    fn plural(&self) -> &str {
        "secrets"
    }

    fn build_routes(&self, config: Arc<SelectConfig>) -> Router {
        let state = SecretState {
            store: self.store.clone(),
            config,
        };

        Router::new()
            .route("/secrets", get(list_secrets::<S>))
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::FilterCriterion;
    use crate::core::metric::MetricRequest;
    use crate::core::pagination::PaginationQuery;
    use crate::core::sort::SortQuery;
    use chrono::{TimeZone, Utc};

    fn secret(name: &str, namespace: &str, secret_type: SecretType, day: u32) -> ClusterSecret {
        let metadata = ObjectMeta::new(name, namespace)
            .with_creation_timestamp(Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap());
        ClusterSecret::new(metadata, secret_type)
    }

    fn secrets() -> Vec<ClusterSecret> {
        vec![
            secret("registry", "default", SecretType::DockerConfigJson, 4)
                .with_data(".dockerconfigjson", "{}"),
            secret("db-password", "default", SecretType::Opaque, 2)
                .with_data("password", "hunter2"),
            secret("ingress-cert", "web", SecretType::Tls, 3)
                .with_data("tls.crt", "cert")
                .with_data("tls.key", "key"),
            secret("api-token", "web", SecretType::Opaque, 1),
        ]
    }

    fn names(list: &SecretList) -> Vec<&str> {
        list.items
            .iter()
            .map(|s| s.object_meta.name.as_str())
            .collect()
    }

    #[test]
    fn test_secret_type_strings() {
        assert_eq!(SecretType::from("kubernetes.io/tls"), SecretType::Tls);
        assert_eq!(
            SecretType::from("example.com/custom"),
            SecretType::Other("example.com/custom".to_string())
        );
        assert_eq!(
            SecretType::ServiceAccountToken.to_string(),
            "kubernetes.io/service-account-token"
        );

        let json = serde_json::to_value(SecretType::BootstrapToken).unwrap();
        assert_eq!(json, "bootstrap.kubernetes.io/token");
    }

    #[test]
    fn test_cell_properties() {
        let mut secret = secrets().remove(2);
        secret.metadata = secret.metadata.with_label("app", "shop");
        let cell = SecretAdapter.to_cell(secret);

        assert_eq!(cell.property("namespace"), Some(ComparableValue::from("web")));
        assert_eq!(cell.property("type"), Some(ComparableValue::from("kubernetes.io/tls")));
        assert_eq!(
            cell.property("dataKeys"),
            Some(ComparableValue::from(vec!["tls.crt", "tls.key"]))
        );
        assert_eq!(cell.property("labels"), Some(ComparableValue::from(vec!["app=shop"])));
        assert_eq!(cell.property("data"), None);
    }

    #[test]
    fn test_filter_sort_and_page() {
        let query = DataSelectQuery::new()
            .with_filter(FilterCriterion::equals("type", "Opaque"))
            .with_sort(SortQuery::descending("creationTimestamp"))
            .with_pagination(PaginationQuery::new(1, 1))
            .with_metric(MetricRequest::count_by("namespace"));

        let list = to_secret_list(secrets(), &query);

        assert_eq!(names(&list), vec!["db-password"]);
        assert_eq!(list.list_meta.total_items, 2);

        let metrics = list.metrics.expect("metrics requested");
        assert_eq!(metrics["namespace"]["default"], 1);
        assert_eq!(metrics["namespace"]["web"], 1);
    }

    #[test]
    fn test_filter_by_data_key() {
        let query = DataSelectQuery::new().with_filter(FilterCriterion::contains("dataKeys", "tls.key"));
        let list = to_secret_list(secrets(), &query);
        assert_eq!(names(&list), vec!["ingress-cert"]);
    }

    #[test]
    fn test_creation_range_filter() {
        let query = DataSelectQuery::new()
            .with_filter(FilterCriterion::in_range(
                "creationTimestamp",
                "2024-03-02",
                "2024-03-03",
            ))
            .with_sort(SortQuery::ascending("name"));

        let list = to_secret_list(secrets(), &query);
        assert_eq!(names(&list), vec!["db-password", "ingress-cert"]);
    }

    #[test]
    fn test_presented_secret_has_no_payload() {
        let list = to_secret_list(secrets(), &DataSelectQuery::new());
        let json = serde_json::to_value(&list).unwrap();

        let first = &json["items"][0];
        assert_eq!(first["objectMeta"]["name"], "registry");
        assert_eq!(first["typeMeta"]["kind"], "secret");
        assert_eq!(first["type"], "kubernetes.io/dockerconfigjson");
        assert!(first.get("data").is_none());
        assert_eq!(json["listMeta"]["totalItems"], 4);
    }
}
