use std::collections::BTreeMap;

use serde::Serialize;

use super::result::{SourceResult, SourceValue};
use super::types::{SourceName, SourceParams};
use crate::config::SnapshotDefaults;

/// The set of sources to fetch for one snapshot, with their parameters.
///
/// Each source appears at most once; inserting a name again replaces its
/// parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotRequest {
    entries: BTreeMap<SourceName, SourceParams>,
}

impl SnapshotRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default page: every source with its default parameters.
    pub fn full(defaults: &SnapshotDefaults) -> Self {
        Self::new()
            .with(SourceName::News, SourceParams::None)
            .with(
                SourceName::Horoscope,
                SourceParams::Sign(defaults.horoscope_sign.clone()),
            )
            .with(SourceName::History, SourceParams::None)
            .with(
                SourceName::Weather,
                SourceParams::Location(defaults.city.clone()),
            )
            .with(SourceName::Quote, SourceParams::None)
            .with(
                SourceName::ExchangeRates,
                SourceParams::Rates {
                    base: defaults.rate_base.clone(),
                    targets: defaults.rate_targets.clone(),
                },
            )
            .with(SourceName::Fact, SourceParams::None)
            .with(
                SourceName::Crypto,
                SourceParams::Symbol(defaults.crypto_symbol.clone()),
            )
    }

    pub fn with(mut self, name: SourceName, params: SourceParams) -> Self {
        self.insert(name, params);
        self
    }

    pub fn insert(&mut self, name: SourceName, params: SourceParams) {
        self.entries.insert(name, params);
    }

    pub fn names(&self) -> impl Iterator<Item = SourceName> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceName, &SourceParams)> {
        self.entries.iter().map(|(name, params)| (*name, params))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(SourceName, SourceParams)> for SnapshotRequest {
    fn from_iter<I: IntoIterator<Item = (SourceName, SourceParams)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One result per requested source, keyed by source name.
///
/// Built once by the aggregator and never modified afterwards. The key set
/// always equals the requested set, whatever failed upstream.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompositeSnapshot {
    results: BTreeMap<SourceName, SourceResult>,
}

impl CompositeSnapshot {
    pub(crate) fn from_results(
        results: impl IntoIterator<Item = (SourceName, SourceResult)>,
    ) -> Self {
        Self {
            results: results.into_iter().collect(),
        }
    }

    pub fn get(&self, name: SourceName) -> Option<&SourceResult> {
        self.results.get(&name)
    }

    /// Renderable value for a source: data on success, fallback otherwise.
    pub fn value(&self, name: SourceName) -> Option<&SourceValue> {
        self.get(name).map(SourceResult::display_value)
    }

    pub fn keys(&self) -> impl Iterator<Item = SourceName> + '_ {
        self.results.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceName, &SourceResult)> {
        self.results.iter().map(|(name, result)| (*name, result))
    }

    /// Sources whose result is a failure placeholder.
    pub fn failures(&self) -> impl Iterator<Item = SourceName> + '_ {
        self.results
            .iter()
            .filter(|(_, result)| !result.is_ok())
            .map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;

    #[test]
    fn test_full_request_covers_every_source() {
        let request = SnapshotRequest::full(&SnapshotDefaults::default());
        let names: Vec<SourceName> = request.names().collect();
        assert_eq!(names, SourceName::ALL.to_vec());
    }

    #[test]
    fn test_duplicate_insert_replaces_params() {
        let request = SnapshotRequest::new()
            .with(SourceName::Horoscope, SourceParams::Sign("leo".to_string()))
            .with(SourceName::Horoscope, SourceParams::Sign("virgo".to_string()));
        assert_eq!(request.len(), 1);
        let (_, params) = request.iter().next().unwrap();
        assert_eq!(params, &SourceParams::Sign("virgo".to_string()));
    }

    #[test]
    fn test_snapshot_serializes_keyed_by_source_name() {
        let snapshot = CompositeSnapshot::from_results([
            (
                SourceName::Fact,
                SourceResult::Ok(SourceValue::Text("Honey never spoils.".to_string())),
            ),
            (
                SourceName::ExchangeRates,
                SourceResult::failed(
                    FailureKind::Network,
                    SourceValue::Rates(Default::default()),
                ),
            ),
        ]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["fact"]["data"], "Honey never spoils.");
        assert_eq!(json["exchange_rates"]["status"], "failed");
        assert_eq!(snapshot.failures().collect::<Vec<_>>(), vec![SourceName::ExchangeRates]);
    }
}
