//! Override persistence behind a narrow trait.
//!
//! Keys are (lowercased city, date); city casing as submitted is preserved
//! inside the record but never participates in matching.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::model::ForecastOverride;

/// Storage for operator overrides. At most one record per
/// (case-insensitive city, date); `upsert` replaces wholesale.
pub trait OverrideStore: Send + Sync {
    /// Look up an override, matching the city case-insensitively.
    fn get(&self, city: &str, date: NaiveDate) -> Option<ForecastOverride>;

    /// Insert or fully replace the override for its (city, date) key.
    fn upsert(&self, record: ForecastOverride);
}

fn key_for(city: &str, date: NaiveDate) -> (String, NaiveDate) {
    (city.to_lowercase(), date)
}

/// In-memory store. The `RwLock` guarantees a reader racing a writer on the
/// same key sees either the old or the new record, never a partial one.
#[derive(Debug, Default)]
pub struct MemoryOverrideStore {
    records: RwLock<HashMap<(String, NaiveDate), ForecastOverride>>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn get(&self, city: &str, date: NaiveDate) -> Option<ForecastOverride> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.get(&key_for(city, date)).cloned()
    }

    fn upsert(&self, record: ForecastOverride) {
        let key = key_for(&record.city, record.date);
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.insert(key, record);
    }
}
