use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::data::record::Dataset;

/// One frame of the animation: a `(day, hour)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TimeKey {
    pub day: String,
    pub hour: String,
}

impl TimeKey {
    pub fn new(day: impl Into<String>, hour: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            hour: hour.into(),
        }
    }

    /// Parse `"{day} {hour}"` (split at the last space).
    pub fn parse(label: &str) -> Option<Self> {
        let (day, hour) = label.trim().rsplit_once(' ')?;
        let day = day.trim_end();
        if day.is_empty() || hour.is_empty() {
            return None;
        }
        Some(Self::new(day, hour))
    }

    /// `"{day} {hour}"`, the string keys are sorted on.
    pub fn label(&self) -> String {
        format!("{} {}", self.day, self.hour)
    }

    /// The hour as an integer, if it parses.
    pub fn hour_of_day(&self) -> Option<i64> {
        self.hour.trim().parse().ok()
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.hour)
    }
}

/// One key per distinct `"{day} {hour}"` label, ascending on the literal label string.
///
/// Pairs that print the same label collapse into the first one seen in dataset order.
///
/// The order is lexical, not chronological: `"Mon 10"` sorts before `"Mon 9"` unless the
/// upstream data pads hours to a fixed width.
pub fn derive_keys(dataset: &Dataset) -> Arc<[TimeKey]> {
    let mut unique: BTreeMap<String, TimeKey> = BTreeMap::new();
    for r in dataset.records() {
        let key = TimeKey::new(r.day.as_str(), r.hour.as_str());
        unique.entry(key.label()).or_insert(key);
    }
    unique.into_values().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/data/time_key.rs"]
mod tests;
