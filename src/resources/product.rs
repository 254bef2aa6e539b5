//! Product catalog entries

use crate::impl_data_entity;

impl_data_entity!(
    Product,
    "product",
    "products",
    ["name"],
    {
        product_category_id: String,
        protocol_name: String,
        device_type: String,
        rule_chain_id: String,
        owner: String,
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::EntityAdapter;
    use crate::core::filter::FilterCriterion;
    use crate::core::metric::MetricRequest;
    use crate::core::select::{DataSelectQuery, select};
    use crate::core::sort::SortQuery;

    fn product(name: &str, protocol: &str, owner: &str) -> Product {
        Product::new(
            name.to_string(),
            "active".to_string(),
            "cat-1".to_string(),
            protocol.to_string(),
            "sensor".to_string(),
            "rc-1".to_string(),
            owner.to_string(),
        )
    }

    fn products() -> Vec<Product> {
        vec![
            product("Thermometer Pro", "mqtt", "alice"),
            product("Smart Plug", "zigbee", "bob"),
            product("thermostat", "mqtt", "alice"),
            product("Door Sensor", "zigbee", "alice"),
        ]
    }

    #[test]
    fn test_name_search_ignores_case() {
        let query = DataSelectQuery::new()
            .with_filter(FilterCriterion::contains("name", "THERMO"))
            .with_sort(SortQuery::ascending("name"));

        let result = select(&EntityAdapter::new(), products(), &query);
        let names: Vec<_> = result.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Thermometer Pro", "thermostat"]);
    }

    #[test]
    fn test_owner_match_is_exact() {
        let query = DataSelectQuery::new().with_filter(FilterCriterion::equals("owner", "Alice"));
        let result = select(&EntityAdapter::<Product>::new(), products(), &query);
        assert_eq!(result.list_meta.total_items, 0);
    }

    #[test]
    fn test_metrics_by_protocol() {
        let query = DataSelectQuery::new()
            .with_filter(FilterCriterion::equals("owner", "alice"))
            .with_metric(MetricRequest::count_by("protocol_name"));

        let result = select(&EntityAdapter::<Product>::new(), products(), &query);
        let metrics = result.metrics.expect("metrics requested");

        assert_eq!(metrics["protocol_name"]["mqtt"], 2);
        assert_eq!(metrics["protocol_name"]["zigbee"], 1);
    }
}
