//! Property-based tests for snapshot aggregation and sign parsing.
//!
//! These tests verify that universal properties hold across arbitrary
//! request sets and failure patterns, using `proptest` for case generation.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use daybrief_sources::{
    Aggregator, FailureKind, ResponseFormat, SnapshotRequest, SourceAdapter, SourceError,
    SourceName, SourceParams, SourceValue, SourcesConfig, ZodiacSign,
};
use proptest::prelude::*;

// =============================================================================
// Test adapters
// =============================================================================

/// Outcome a scripted adapter produces.
#[derive(Clone, Copy, Debug)]
enum Script {
    Succeed,
    Fail(FailureKind),
}

struct ScriptedAdapter {
    name: SourceName,
    script: Script,
}

#[async_trait]
impl SourceAdapter for ScriptedAdapter {
    fn name(&self) -> SourceName {
        self.name
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        SourceValue::Text(format!("{} failed: {}", self.name, kind))
    }

    fn validate(&self, _params: &SourceParams) -> Result<(), SourceError> {
        Ok(())
    }

    async fn fetch_value(&self, _params: &SourceParams) -> Result<SourceValue, SourceError> {
        match self.script {
            Script::Succeed => Ok(SourceValue::Text(self.name.to_string())),
            Script::Fail(FailureKind::Network) => Err(SourceError::Network("down".into())),
            Script::Fail(FailureKind::Parse) => Err(SourceError::Parse("bad body".into())),
            Script::Fail(FailureKind::Empty) => Err(SourceError::Empty),
            Script::Fail(FailureKind::Timeout) => Err(SourceError::Timeout),
            Script::Fail(FailureKind::InvalidData) => Err(SourceError::InvalidData("x".into())),
            Script::Fail(FailureKind::InvalidInput) => Err(SourceError::InvalidInput("x".into())),
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// =============================================================================
// Generators
// =============================================================================

fn arb_source() -> impl Strategy<Value = SourceName> {
    proptest::sample::select(SourceName::ALL.to_vec())
}

fn arb_script() -> impl Strategy<Value = Script> {
    prop_oneof![
        Just(Script::Succeed),
        Just(Script::Fail(FailureKind::Network)),
        Just(Script::Fail(FailureKind::Parse)),
        Just(Script::Fail(FailureKind::Empty)),
        Just(Script::Fail(FailureKind::Timeout)),
        Just(Script::Fail(FailureKind::InvalidData)),
    ]
}

/// Sign name with random per-character casing.
fn arb_cased_sign() -> impl Strategy<Value = (ZodiacSign, String)> {
    (
        proptest::sample::select(ZodiacSign::ALL.to_vec()),
        proptest::collection::vec(any::<bool>(), 11),
    )
        .prop_map(|(sign, upper)| {
            let cased: String = sign
                .as_str()
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            (sign, cased)
        })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The snapshot key set equals the requested set, whatever fails and
    /// whichever adapters are registered.
    #[test]
    fn prop_snapshot_keys_equal_requested_keys(
        requested in proptest::sample::subsequence(SourceName::ALL.to_vec(), 0..=8),
        registered in proptest::collection::vec((arb_source(), arb_script()), 0..=8),
    ) {
        let adapters: Vec<Arc<dyn SourceAdapter>> = registered
            .iter()
            .map(|(name, script)| {
                Arc::new(ScriptedAdapter { name: *name, script: *script }) as Arc<dyn SourceAdapter>
            })
            .collect();
        let aggregator = Aggregator::new(adapters, Duration::from_secs(5));
        let requested: BTreeSet<SourceName> = requested.into_iter().collect();
        let request: SnapshotRequest = requested
            .iter()
            .map(|name| (*name, SourceParams::None))
            .collect();

        let snapshot = runtime().block_on(aggregator.snapshot(&request));

        let keys: BTreeSet<SourceName> = snapshot.keys().collect();
        prop_assert_eq!(keys, requested);
        for (_, result) in snapshot.iter() {
            // Every entry renders something, failed or not
            prop_assert!(!result.display_value().to_string().is_empty());
        }
    }

    /// Every recognized sign parses regardless of casing.
    #[test]
    fn prop_sign_parsing_ignores_case((sign, cased) in arb_cased_sign()) {
        prop_assert_eq!(cased.parse::<ZodiacSign>().unwrap(), sign);
    }

    /// Unrecognized signs are rejected as invalid input without a request.
    ///
    /// The horoscope endpoint points at a closed port, so any request would
    /// surface as a network failure instead.
    #[test]
    fn prop_unknown_sign_is_invalid_input(input in "[a-zA-Z]{0,14}") {
        prop_assume!(ZodiacSign::ALL
            .iter()
            .all(|sign| !sign.as_str().eq_ignore_ascii_case(&input)));

        let aggregator =
            Aggregator::from_config(&SourcesConfig::with_base_url("http://127.0.0.1:9"));
        let result = runtime().block_on(aggregator.horoscope(&input));

        prop_assert_eq!(result.failure_kind(), Some(FailureKind::InvalidInput));
        prop_assert_eq!(result.display_value().as_text(), Some("Invalid sign."));
    }
}
