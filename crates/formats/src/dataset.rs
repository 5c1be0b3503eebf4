use std::collections::HashMap;

use crate::country_features::{CountryCollection, CountryFeature, FeatureParseError};
use crate::stat_table::{StatTable, StatTableError, normalize_name};

/// ISO 3166-1 alpha-2 code excluded from every dataset (Antarctica).
pub const EXCLUDED_ISO_A2: &str = "AQ";

#[derive(Debug)]
pub enum DataFormatError {
    StatTable(StatTableError),
    Features(FeatureParseError),
    EmptyFeatureSet,
}

impl std::fmt::Display for DataFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormatError::StatTable(e) => write!(f, "statistic table error: {e}"),
            DataFormatError::Features(e) => write!(f, "feature collection error: {e}"),
            DataFormatError::EmptyFeatureSet => write!(f, "no features remain after filtering"),
        }
    }
}

impl std::error::Error for DataFormatError {}

/// Joined view of country boundaries and the statistic's latest-year
/// values: each feature carries its stat, and the collection remembers
/// the latest year and the maximum stat for ramp scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Vec<CountryFeature>,
    pub latest_year: i32,
    pub max_stat: f64,
}

impl Dataset {
    /// Build a dataset from raw CSV text and already-parsed features.
    ///
    /// Features whose ISO code matches [`EXCLUDED_ISO_A2`] (any casing)
    /// are dropped. Every remaining feature gets the latest-year value
    /// matched by normalized name, or 0 when the table has no row for
    /// it. Negative values floor to 0.
    pub fn ingest(
        raw_table: &str,
        features: Vec<CountryFeature>,
    ) -> Result<Self, DataFormatError> {
        let table = StatTable::parse(raw_table).map_err(DataFormatError::StatTable)?;
        let latest = table.latest_values();
        Self::join(&latest, table.latest_year, features)
    }

    /// Convenience wrapper that also parses the GeoJSON payload.
    pub fn ingest_geojson(
        raw_table: &str,
        features_geojson: &str,
    ) -> Result<Self, DataFormatError> {
        let collection = CountryCollection::from_geojson_str(features_geojson)
            .map_err(DataFormatError::Features)?;
        Self::ingest(raw_table, collection.features)
    }

    fn join(
        latest: &HashMap<String, f64>,
        latest_year: i32,
        features: Vec<CountryFeature>,
    ) -> Result<Self, DataFormatError> {
        let mut kept: Vec<CountryFeature> = features
            .into_iter()
            .filter(|f| !f.iso_a2.eq_ignore_ascii_case(EXCLUDED_ISO_A2))
            .collect();
        if kept.is_empty() {
            return Err(DataFormatError::EmptyFeatureSet);
        }

        let mut max_stat: f64 = 0.0;
        for feature in &mut kept {
            let stat = latest
                .get(&normalize_name(&feature.name))
                .copied()
                .unwrap_or(0.0)
                .max(0.0);
            feature.derived_stat = stat;
            if stat > max_stat {
                max_stat = stat;
            }
        }

        Ok(Self {
            features: kept,
            latest_year,
            max_stat,
        })
    }

    pub fn feature(&self, iso_a2: &str) -> Option<&CountryFeature> {
        self.features.iter().find(|f| f.iso_a2 == iso_a2)
    }

    pub fn contains(&self, iso_a2: &str) -> bool {
        self.feature(iso_a2).is_some()
    }
}
