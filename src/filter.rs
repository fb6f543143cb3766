//! Client-side record filtering.
//!
//! Event and forecast queries return arrays of loosely-shaped JSON
//! records. The remote API only narrows by time range, so any further
//! narrowing happens here, after the response is parsed.

use std::fmt;

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use serde_json::{Map, Value};

/// One day in epoch milliseconds.
pub(crate) const DAY_MS: i64 = 86_400_000;

/// Record-matching criteria for event queries.
///
/// `Fields` keeps records whose top-level fields contain every listed
/// key with an equal value. The comparison is shallow: a nested object
/// must match wholesale. An empty field set matches every record, the
/// same as [`Criteria::All`].
pub enum Criteria {
    All,
    Fields(Map<String, Value>),
    Predicate(Box<dyn Fn(&Value) -> bool + Send + Sync>),
}

impl Criteria {
    /// Criteria matching records where `name` equals `value`.
    pub fn field(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert(name.into(), value.into());
        Criteria::Fields(fields)
    }

    /// Criteria matching records where every pair is present and equal.
    pub fn fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Criteria::Fields(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Criteria keeping records for which `keep` returns `true`.
    pub fn predicate(keep: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Criteria::Predicate(Box::new(keep))
    }

    /// Whether `record` satisfies the criteria.
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Criteria::All => true,
            Criteria::Fields(fields) => {
                fields.iter().all(|(key, expected)| record.get(key) == Some(expected))
            }
            Criteria::Predicate(keep) => keep(record),
        }
    }

    /// Keep the matching records, preserving their order.
    pub(crate) fn apply(&self, records: Vec<Value>) -> Vec<Value> {
        records.into_iter().filter(|record| self.matches(record)).collect()
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria::All
    }
}

impl fmt::Debug for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::All => f.write_str("All"),
            Criteria::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            Criteria::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Keep records whose `localizedTimeStamp` lies in `[start_time, end_time)`.
///
/// The lower bound is inclusive and the upper bound exclusive, so
/// adjacent windows never share a record. No `start_time` disables time
/// filtering entirely; a missing `end_time` defaults to one day past
/// `start_time`. Records without a usable timestamp are dropped while a
/// window is active.
pub(crate) fn time_window(
    records: Vec<Value>,
    start_time: Option<i64>,
    end_time: Option<i64>,
) -> Vec<Value> {
    let Some(start) = start_time else {
        return records;
    };
    let end = end_time.unwrap_or(start + DAY_MS);

    records
        .into_iter()
        .filter(|record| {
            record
                .get("localizedTimeStamp")
                .and_then(Value::as_i64)
                .is_some_and(|ts| start <= ts && ts < end)
        })
        .collect()
}

/// Millisecond bounds of the local calendar day containing `now`:
/// midnight through one millisecond before the next midnight.
pub(crate) fn local_day_window(now: DateTime<Local>) -> (i64, i64) {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    // A local midnight skipped by a DST transition falls back to `now`.
    let start = Local
        .from_local_datetime(&midnight)
        .earliest()
        .map_or(now.timestamp_millis(), |dt| dt.timestamp_millis());
    (start, start + DAY_MS - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stamped(timestamps: &[i64]) -> Vec<Value> {
        timestamps.iter().map(|ts| json!({ "localizedTimeStamp": ts })).collect()
    }

    #[test]
    fn empty_field_criteria_are_the_identity() {
        let records = vec![json!({ "a": 1 }), json!({ "b": 2 })];

        let kept = Criteria::fields(Vec::<(String, Value)>::new()).apply(records.clone());
        assert_eq!(kept, records);

        let kept = Criteria::default().apply(records.clone());
        assert_eq!(kept, records);
    }

    #[test]
    fn field_criteria_partial_match() {
        let records = vec![json!({ "a": 1, "b": 2 }), json!({ "a": 2 })];

        let kept = Criteria::field("a", 1).apply(records);
        assert_eq!(kept, vec![json!({ "a": 1, "b": 2 })]);
    }

    #[test]
    fn field_criteria_require_every_pair() {
        let records = vec![
            json!({ "a": 1, "b": 2 }),
            json!({ "a": 1, "b": 3 }),
            json!({ "a": 1 }),
        ];

        let kept = Criteria::fields([("a", 1), ("b", 2)]).apply(records);
        assert_eq!(kept, vec![json!({ "a": 1, "b": 2 })]);
    }

    #[test]
    fn field_criteria_compare_nested_values_wholesale() {
        let records = vec![
            json!({ "zone": { "id": 1, "name": "front" } }),
            json!({ "zone": { "id": 1 } }),
        ];

        let kept = Criteria::field("zone", json!({ "id": 1 })).apply(records);
        assert_eq!(kept, vec![json!({ "zone": { "id": 1 } })]);
    }

    #[test]
    fn predicate_criteria_apply_the_closure() {
        let records = vec![json!({ "a": 1 }), json!({ "a": 2 }), json!({ "a": 3 })];

        let kept = Criteria::predicate(|r| r["a"].as_i64().is_some_and(|a| a > 1)).apply(records);
        assert_eq!(kept, vec![json!({ "a": 2 }), json!({ "a": 3 })]);
    }

    #[test]
    fn no_start_time_means_no_filtering() {
        let records = stamped(&[1, 500, 1_000_000]);
        assert_eq!(time_window(records.clone(), None, Some(2)), records);
    }

    #[test]
    fn window_is_inclusive_start_exclusive_end() {
        let records = stamped(&[99, 100, 150, 199, 200]);
        let kept = time_window(records, Some(100), Some(200));
        assert_eq!(kept, stamped(&[100, 150, 199]));
    }

    #[test]
    fn missing_end_time_defaults_to_one_day() {
        let start = 1_600_000_000_000;
        let records = stamped(&[start, start + DAY_MS - 1, start + DAY_MS]);

        let kept = time_window(records, Some(start), None);
        assert_eq!(kept, stamped(&[start, start + DAY_MS - 1]));
    }

    #[test]
    fn records_without_timestamps_are_dropped_by_active_windows() {
        let records = vec![json!({ "localizedTimeStamp": 150 }), json!({ "other": true })];

        let kept = time_window(records, Some(100), Some(200));
        assert_eq!(kept, stamped(&[150]));
    }

    #[test]
    fn local_day_window_spans_the_current_day() {
        let now = Local::now();
        let (start, end) = local_day_window(now);

        let now_ms = now.timestamp_millis();
        assert!(start <= now_ms);
        assert!(now_ms <= end);
        assert_eq!(end - start, DAY_MS - 1);
    }
}
