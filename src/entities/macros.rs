//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed for
//! each entity type to be listed through the selection pipeline.

/// Complete macro to create a Data entity with automatic trait implementations
///
/// Every field becomes a property named after it, next to the base entity
/// properties (`id`, `type`, `name`, `status`, `created_at`, `updated_at`,
/// `deleted_at`). The indexed fields are the free-text search fields and are
/// matched case-insensitively.
///
/// # Example
///
/// ```rust,ignore
/// use dataselect::prelude::*;
///
/// impl_data_entity!(
///     Device,
///     "device",
///     "devices",
///     ["name"],
///     {
///         product_id: String,
///         online: bool,
///     }
/// );
///
/// // Usage
/// let device = Device::new(
///     "gateway-01".to_string(),
///     "active".to_string(),
///     "p-1".to_string(),
///     true,
/// );
/// assert_eq!(device.property("online"), Some(ComparableValue::Boolean(true)));
/// ```
#[macro_export]
macro_rules! impl_data_entity {
    (
        $type:ident,
        $type_name:expr,
        $plural_name:expr,
        [ $( $indexed_field:expr ),* $(,)? ],
        {
            $( $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,

            /// Type of the entity
            #[serde(rename = "type")]
            pub entity_type: String,

            /// When this entity was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was soft-deleted (if applicable)
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,

            /// Current status of the entity
            pub status: String,

            /// Name of this data entity
            pub name: String,
            $( pub $specific_field : $specific_type ),*
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural_name
            }

            fn resource_name_singular() -> &'static str {
                $type_name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn entity_type(&self) -> &str {
                &self.entity_type
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn status(&self) -> &str {
                &self.status
            }
        }

        impl $crate::core::entity::Data for $type {
            fn name(&self) -> &str {
                &self.name
            }

            fn indexed_fields() -> &'static [&'static str] {
                &[ $( $indexed_field ),* ]
            }

            fn property(&self, name: &str) -> Option<$crate::core::value::ComparableValue> {
                use $crate::core::value::ToComparable;

                $(
                    if name == stringify!($specific_field) {
                        return self.$specific_field.to_comparable();
                    }
                )*

                if name == "name" {
                    return self.name.to_comparable();
                }

                $crate::core::entity::Entity::base_property(self, name)
            }
        }

        impl $type {
            /// Create a new instance of this entity
            #[allow(clippy::too_many_arguments)]
            pub fn new(
                name: String,
                status: String,
                $( $specific_field: $specific_type ),*
            ) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    entity_type: $type_name.to_string(),
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                    status,
                    name,
                    $( $specific_field ),*
                }
            }
        }
    };
}
