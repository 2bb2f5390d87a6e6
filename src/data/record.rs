use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{HeatmapError, HeatmapResult};

/// One station's ridership count for one (day, hour).
///
/// Field names on the wire follow the source dataset export.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StationRecord {
    #[serde(rename = "station_complex_id")]
    pub station_id: String,
    #[serde(rename = "transit_day")]
    pub day: String,
    /// Numeric string, `"0"..="23"`.
    #[serde(rename = "transit_hour")]
    pub hour: String,
    #[serde(rename = "station_complex")]
    pub station_name: String,
    #[serde(rename = "total_ridership")]
    pub ridership: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub borough: String,
}

impl StationRecord {
    pub fn is_at(&self, day: &str, hour: &str) -> bool {
        self.day == day && self.hour == hour
    }
}

/// Immutable, ordered collection of records, shared cheaply between the driver and the renderer.
///
/// Duplicate station/time pairs are kept; both render.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Arc<[StationRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<StationRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn from_json_str(s: &str) -> HeatmapResult<Self> {
        let records: Vec<StationRecord> =
            serde_json::from_str(s).map_err(|e| HeatmapError::serde(e.to_string()))?;
        Ok(Self::new(records))
    }

    pub fn from_path(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset '{}'", path.display()))?;
        let ds = Self::from_json_str(&s)?;
        tracing::info!(records = ds.len(), path = %path.display(), "loaded dataset");
        Ok(ds)
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records at exactly this day/hour pair, in dataset order.
    pub fn at<'a>(
        &'a self,
        day: &'a str,
        hour: &'a str,
    ) -> impl Iterator<Item = &'a StationRecord> + 'a {
        self.records.iter().filter(move |r| r.is_at(day, hour))
    }
}

impl From<Vec<StationRecord>> for Dataset {
    fn from(records: Vec<StationRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/record.rs"]
mod tests;
