#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Class names without surrounding whitespace.
pub fn arb_class_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// A list of distinct class names.
pub fn arb_class_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(arb_class_name(), 1..=max)
        .prop_map(|names| names.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// A label line's trailing fields: four geometry values and an optional
/// confidence, as they would be printed by a detector.
pub fn arb_trailing_fields() -> impl Strategy<Value = Vec<String>> {
    (
        prop::collection::vec(0.0f64..1.0, 4),
        prop::option::of(0.0f64..1.0),
    )
        .prop_map(|(geometry, confidence)| {
            geometry
                .into_iter()
                .chain(confidence)
                .map(|v| format!("{v:.6}"))
                .collect()
        })
}

/// Label lines whose class indices are drawn from `0..class_count`.
pub fn arb_label_lines(
    class_count: usize,
    max_lines: usize,
) -> impl Strategy<Value = Vec<(u64, Vec<String>)>> {
    prop::collection::vec(
        (0..class_count as u64, arb_trailing_fields()),
        0..=max_lines,
    )
}

pub fn render_lines(lines: &[(u64, Vec<String>)]) -> String {
    lines
        .iter()
        .map(|(index, fields)| format!("{} {}", index, fields.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}
