//! Liquidation lifecycle snapshot derived from one transaction's logs.
//!
//! Liquidation proceeds in multiple contract-side steps as stake unlocks
//! over validator epochs; each `process_claims` call advances at most one
//! step and reports its progress through events. The snapshot is computed
//! fresh per call from that call's log set alone — there is no persisted
//! state machine, and callers re-invoke to progress further.

use crate::event::{find_event_data, log_contains_event};
use serde_json::{Map, Value};

/// Detail payload for an unstake event (recorded or failed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnstakeDetail {
    pub validator: Option<String>,
    /// yoctoNEAR string, as emitted.
    pub amount: Option<String>,
    pub epoch_height: Option<u64>,
}

/// Flags and display data for one liquidation step.
///
/// The flags are not mutually exclusive: a single call can advance the flow
/// through several steps atomically (e.g. start and record an unstake).
#[derive(Debug, Clone, Default)]
pub struct LiquidationView {
    pub started: bool,
    pub lender: Option<String>,
    /// Start time, already formatted; omitted when the `at` payload is
    /// missing, zero, or non-numeric.
    pub started_at: Option<String>,

    pub unstake_recorded: bool,
    pub unstake: UnstakeDetail,

    pub waiting: bool,
    pub waiting_reason: Option<String>,

    pub unstake_failed: bool,
    pub failed: UnstakeDetail,

    pub completed: bool,
    /// yoctoNEAR string, as emitted.
    pub total_repaid: Option<String>,
}

fn string_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

fn formatted_start_time(data: &Map<String, Value>) -> Option<String> {
    let at = data.get("at")?;
    // Emitted as a stringified nanosecond integer, but tolerate a bare number.
    let ns = match at {
        Value::String(s) => s.parse::<i64>().ok()?,
        Value::Number(n) => n.as_i64()?,
        _ => return None,
    };
    if ns <= 0 {
        return None;
    }
    crate::format::format_near_timestamp(ns)
}

fn unstake_detail(data: Option<Map<String, Value>>) -> UnstakeDetail {
    let Some(data) = data else {
        return UnstakeDetail::default();
    };
    UnstakeDetail {
        validator: string_field(&data, "validator"),
        amount: string_field(&data, "amount"),
        epoch_height: data.get("epoch_height").and_then(Value::as_u64),
    }
}

impl LiquidationView {
    /// Scan `logs` and derive every lifecycle flag independently, plus the
    /// optional detail payload per flag. Total: malformed payloads degrade
    /// to flags without details.
    pub fn from_logs(logs: &[String]) -> Self {
        let mut view = LiquidationView {
            started: log_contains_event(logs, "liquidation_started"),
            unstake_recorded: log_contains_event(logs, "unstake_recorded"),
            waiting: log_contains_event(logs, "liquidation_progress"),
            unstake_failed: log_contains_event(logs, "unstake_failed"),
            completed: log_contains_event(logs, "liquidation_complete"),
            ..Default::default()
        };

        if view.started {
            if let Some(data) = find_event_data(logs, "liquidation_started") {
                view.lender = string_field(&data, "lender");
                view.started_at = formatted_start_time(&data);
            }
        }
        if view.unstake_recorded {
            view.unstake = unstake_detail(find_event_data(logs, "unstake_recorded"));
        }
        if view.waiting {
            if let Some(data) = find_event_data(logs, "liquidation_progress") {
                view.waiting_reason =
                    string_field(&data, "reason").filter(|reason| !reason.is_empty());
            }
        }
        if view.unstake_failed {
            view.failed = unstake_detail(find_event_data(logs, "unstake_failed"));
        }
        if view.completed {
            if let Some(data) = find_event_data(logs, "liquidation_complete") {
                view.total_repaid = string_field(&data, "total_repaid");
            }
        }

        view
    }

    /// True when any progress-type signal is set. Progress takes precedence
    /// over completion in the composed reply, even when both signals appear
    /// in the same log set.
    pub fn in_progress(&self) -> bool {
        self.started || self.unstake_recorded || self.waiting || self.unstake_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_json(event: &str, data: Value) -> String {
        format!("EVENT_JSON:{}", json!({"event": event, "data": data}))
    }

    #[test]
    fn empty_logs_yield_quiet_view() {
        let view = LiquidationView::from_logs(&[]);
        assert!(!view.in_progress());
        assert!(!view.completed);
    }

    #[test]
    fn started_with_lender_and_time() {
        let logs = vec![event_json(
            "liquidation_started",
            json!({"lender": "alice.testnet", "at": "1700000000000000000"}),
        )];
        let view = LiquidationView::from_logs(&logs);
        assert!(view.started);
        assert_eq!(view.lender.as_deref(), Some("alice.testnet"));
        assert_eq!(view.started_at.as_deref(), Some("2023-11-14 22:13 UTC"));
    }

    #[test]
    fn bad_start_time_is_omitted_not_fatal() {
        for at in [json!("0"), json!("soon"), json!(null), json!({"ns": 1})] {
            let logs = vec![event_json(
                "liquidation_started",
                json!({"lender": "alice.testnet", "at": at}),
            )];
            let view = LiquidationView::from_logs(&logs);
            assert!(view.started);
            assert!(view.started_at.is_none(), "expected no time for {at}");
        }
        // Missing entirely is also fine.
        let logs = vec![event_json("liquidation_started", json!({}))];
        assert!(LiquidationView::from_logs(&logs).started_at.is_none());
    }

    #[test]
    fn unstake_recorded_details_are_independent() {
        let logs = vec![event_json(
            "unstake_recorded",
            json!({"validator": "val.poolv1.near", "epoch_height": 424242}),
        )];
        let view = LiquidationView::from_logs(&logs);
        assert!(view.unstake_recorded);
        assert_eq!(view.unstake.validator.as_deref(), Some("val.poolv1.near"));
        assert_eq!(view.unstake.epoch_height, Some(424242));
        assert!(view.unstake.amount.is_none());
    }

    #[test]
    fn waiting_reason_only_when_non_empty_string() {
        let logs = vec![event_json("liquidation_progress", json!({"reason": ""}))];
        assert!(LiquidationView::from_logs(&logs).waiting_reason.is_none());

        let logs = vec![event_json(
            "liquidation_progress",
            json!({"reason": "awaiting unstake"}),
        )];
        let view = LiquidationView::from_logs(&logs);
        assert!(view.waiting);
        assert_eq!(view.waiting_reason.as_deref(), Some("awaiting unstake"));
    }

    #[test]
    fn bare_tag_sets_flag_without_detail() {
        let logs = vec!["liquidation_complete".to_string()];
        let view = LiquidationView::from_logs(&logs);
        assert!(view.completed);
        assert!(view.total_repaid.is_none());
    }

    #[test]
    fn multiple_steps_in_one_batch() {
        let logs = vec![
            event_json(
                "liquidation_started",
                json!({"lender": "bob.near", "at": "1700000000000000000"}),
            ),
            event_json(
                "unstake_recorded",
                json!({"validator": "v.pool", "amount": "1000000", "epoch_height": 7}),
            ),
            event_json("liquidation_complete", json!({"total_repaid": "42"})),
        ];
        let view = LiquidationView::from_logs(&logs);
        assert!(view.started && view.unstake_recorded && view.completed);
        assert!(view.in_progress());
        assert_eq!(view.total_repaid.as_deref(), Some("42"));
    }
}
