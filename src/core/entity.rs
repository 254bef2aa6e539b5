//! Entity traits for domain objects listed through the selection pipeline

use crate::core::value::{ComparableValue, ToComparable};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all entities.
///
/// All entities have:
/// - id: Unique identifier
/// - type: Entity type name (e.g., "product", "rule_chain_msg_log")
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - deleted_at: Soft deletion timestamp (optional)
/// - status: Current status of the entity
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "products")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "product")
    fn resource_name_singular() -> &'static str;

    fn id(&self) -> Uuid;

    fn entity_type(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn status(&self) -> &str;

    /// Value of one of the base entity properties
    ///
    /// Recognized names: `id`, `type`, `created_at`, `updated_at`,
    /// `deleted_at` and `status`. `deleted_at` is absent while unset.
    fn base_property(&self, name: &str) -> Option<ComparableValue> {
        match name {
            "id" => self.id().to_comparable(),
            "type" => self.entity_type().to_comparable(),
            "created_at" => self.created_at().to_comparable(),
            "updated_at" => self.updated_at().to_comparable(),
            "deleted_at" => self.deleted_at().to_comparable(),
            "status" => self.status().to_comparable(),
            _ => None,
        }
    }
}

/// Trait for data entities that represent concrete domain objects.
///
/// Data entities extend the base Entity with:
/// - name: A human-readable name
/// - indexed_fields: Free-text search fields, matched case-insensitively
/// - property: Named property access for filtering, sorting and metrics
pub trait Data: Entity {
    /// Get the name of this data entity
    fn name(&self) -> &str;

    /// Fields searched as free text
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a property by name, `None` when the entity has no
    /// such property or its value is unset
    fn property(&self, name: &str) -> Option<ComparableValue>;
}
