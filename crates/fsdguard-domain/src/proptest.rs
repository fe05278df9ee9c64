//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Verdict determinism
//! - Same-layer and downward imports in the canonical graph
//! - External specifiers never being judged
//! - Graph construction rejecting upward edges

use crate::engine::evaluate;
use crate::graph::{GraphError, LayerGraph, LayerSet};
use crate::layer::Layer;
use crate::model::ImportEdge;
use crate::resolve::{ImportTarget, ResolverConfig, SkipReason, resolve_import_layer};
use crate::test_support::{config, edge_at, model, source_file};
use crate::validate::{EdgeVerdict, validate};
use fsdguard_types::Severity;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_layer() -> impl Strategy<Value = Layer> {
    prop::sample::select(Layer::ALL.to_vec())
}

/// Lowercase path segment that is never a layer name.
fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_-]{0,11}")
        .unwrap()
        .prop_filter("must not be a layer name", |s| Layer::parse(s).is_none())
}

fn arb_file_in(layer: Layer) -> impl Strategy<Value = String> {
    (arb_segment(), arb_segment())
        .prop_map(move |(slice, file)| format!("src/{}/{}/{}.ts", layer, slice, file))
}

/// Package names: plain or npm-scoped, never starting with an alias or a layer name.
fn arb_external_specifier() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_segment(),
        (arb_segment(), arb_segment()).prop_map(|(scope, name)| format!("@{}/{}", scope, name)),
        (arb_segment(), arb_segment()).prop_map(|(pkg, sub)| format!("{}/{}", pkg, sub)),
    ]
    .prop_filter("must not hit the src alias", |s| {
        s != "src" && !s.starts_with("src/")
    })
}

fn arb_layer_subset() -> impl Strategy<Value = Vec<Layer>> {
    prop::sample::subsequence(Layer::ALL.to_vec(), 0..=Layer::ALL.len())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn validate_is_deterministic(
        from in arb_layer(),
        to in arb_layer(),
        slice in arb_segment(),
    ) {
        let file = format!("src/{}/{}/index.ts", from, slice);
        let edge = ImportEdge::new(&file, format!("@/{}/{}", to, slice));
        let graph = LayerGraph::canonical();
        let resolver = ResolverConfig::default();

        let first = validate(&edge, &graph, &resolver);
        let second = validate(&edge, &graph, &resolver);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn same_layer_and_downward_imports_are_allowed(
        (from, file) in arb_layer().prop_flat_map(|l| (Just(l), arb_file_in(l))),
        to in arb_layer(),
        slice in arb_segment(),
    ) {
        let edge = ImportEdge::new(&file, format!("@/{}/{}", to, slice));
        let verdict = validate(&edge, &LayerGraph::canonical(), &ResolverConfig::default());
        if to <= from {
            prop_assert_eq!(verdict, EdgeVerdict::Allowed);
        } else {
            prop_assert!(verdict.is_violation(), "{} -> {} should violate", from, to);
        }
    }

    #[test]
    fn external_specifiers_are_never_judged(
        (_layer, file) in arb_layer().prop_flat_map(|l| (Just(l), arb_file_in(l))),
        specifier in arb_external_specifier(),
    ) {
        prop_assert_eq!(
            resolve_import_layer(&specifier, &ResolverConfig::default()),
            ImportTarget::NotApplicable(SkipReason::External)
        );
        let edge = ImportEdge::new(&file, specifier);
        let verdict = validate(&edge, &LayerGraph::canonical(), &ResolverConfig::default());
        prop_assert!(!verdict.is_violation());
        prop_assert_ne!(verdict, EdgeVerdict::Allowed);
    }

    #[test]
    fn from_table_accepts_exactly_the_monotonic_tables(
        subsets in prop::collection::vec(arb_layer_subset(), 6),
    ) {
        let table: Vec<(Layer, LayerSet)> = Layer::ALL
            .into_iter()
            .zip(subsets)
            .map(|(layer, targets)| (layer, targets.into_iter().collect()))
            .collect();
        let monotonic = table
            .iter()
            .all(|(from, targets)| targets.iter().all(|to| to <= *from));

        match LayerGraph::from_table(table) {
            Ok(graph) => {
                prop_assert!(monotonic);
                for (from, targets) in graph.iter() {
                    prop_assert!(targets.iter().all(|to| to <= from));
                }
            }
            Err(GraphError::UpwardEdge { from, to }) => {
                prop_assert!(!monotonic);
                prop_assert!(to > from);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn evaluate_finding_count_matches_upward_edges(
        edges in prop::collection::vec((arb_layer(), arb_layer()), 0..20),
    ) {
        let files = edges
            .iter()
            .enumerate()
            .map(|(i, (from, to))| {
                let path = format!("src/{}/slice{}/ui.ts", from, i);
                let edge = edge_at(&path, &format!("@/{}/target", to), 1);
                source_file(&path, vec![edge])
            })
            .collect();

        let report = evaluate(&model(files), &config(Severity::Error));
        let expected = edges.iter().filter(|(from, to)| to > from).count();
        prop_assert_eq!(report.findings.len(), expected);
        prop_assert_eq!(report.data.imports_scanned as usize, edges.len());
    }
}
