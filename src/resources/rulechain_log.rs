//! Rule chain message logs

use crate::impl_data_entity;

impl_data_entity!(
    RuleChainMsgLog,
    "rule_chain_msg_log",
    "rule_chain_msg_logs",
    ["device_name"],
    {
        device_name: String,
        msg_type: String,
        owner: String,
        ts: chrono::DateTime<chrono::Utc>,
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::EntityAdapter;
    use crate::core::filter::FilterCriterion;
    use crate::core::pagination::PaginationQuery;
    use crate::core::select::{DataSelectQuery, select};
    use crate::core::sort::SortQuery;
    use chrono::{DateTime, TimeZone, Utc};

    fn log(device: &str, msg_type: &str, hour: u32) -> RuleChainMsgLog {
        RuleChainMsgLog::new(
            format!("{}-{}", device, hour),
            "ok".to_string(),
            device.to_string(),
            msg_type.to_string(),
            "alice".to_string(),
            at(hour),
        )
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn logs() -> Vec<RuleChainMsgLog> {
        vec![
            log("Gateway-A", "POST_TELEMETRY", 9),
            log("gateway-b", "POST_ATTRIBUTES", 10),
            log("Gateway-A", "POST_TELEMETRY", 11),
            log("sensor-1", "POST_TELEMETRY", 12),
        ]
    }

    #[test]
    fn test_device_name_is_case_insensitive() {
        let query = DataSelectQuery::new()
            .with_filter(FilterCriterion::equals("device_name", "gateway-a"));

        let result = select(&EntityAdapter::<RuleChainMsgLog>::new(), logs(), &query);
        assert_eq!(result.list_meta.total_items, 2);
    }

    #[test]
    fn test_time_window_newest_first() {
        let query = DataSelectQuery::new()
            .with_filter(FilterCriterion::in_range(
                "ts",
                "2024-05-01T10:00:00Z",
                "2024-05-01T12:00:00Z",
            ))
            .with_sort(SortQuery::descending("ts"))
            .with_pagination(PaginationQuery::new(1, 2));

        let result = select(&EntityAdapter::<RuleChainMsgLog>::new(), logs(), &query);
        let times: Vec<_> = result.items.iter().map(|l| l.ts).collect();

        assert_eq!(result.list_meta.total_items, 3);
        assert_eq!(times, vec![at(12), at(11)]);
    }
}
