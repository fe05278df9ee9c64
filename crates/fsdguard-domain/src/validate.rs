//! The edge validator: one import edge in, one verdict out.

use crate::graph::{LayerGraph, LayerSet};
use crate::layer::Layer;
use crate::model::ImportEdge;
use crate::resolve::{
    FileLayer, ImportTarget, ResolverConfig, SkipReason, resolve_file_layer, resolve_import_layer,
    resolve_relative_import,
};
use std::fmt;

/// A layer-boundary breach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub current: Layer,
    pub target: Layer,
    pub permitted: LayerSet,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid import from '{}' to '{}'. Allowed imports: {}",
            self.current, self.target, self.permitted
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeVerdict {
    Allowed,
    Violated(Violation),
    NotApplicable(SkipReason),
}

impl EdgeVerdict {
    pub fn is_violation(&self) -> bool {
        matches!(self, EdgeVerdict::Violated(_))
    }
}

/// Judge a single import edge.
///
/// Only edges between two recognized layers can be `Allowed` or `Violated`; everything
/// else is `NotApplicable` with the reason it was skipped.
pub fn validate(edge: &ImportEdge, graph: &LayerGraph, resolver: &ResolverConfig) -> EdgeVerdict {
    validate_import(edge.source_file.as_str(), &edge.specifier, graph, resolver)
}

pub fn validate_import(
    file: &str,
    specifier: &str,
    graph: &LayerGraph,
    resolver: &ResolverConfig,
) -> EdgeVerdict {
    let Some(current) = resolve_file_layer(file, resolver) else {
        return EdgeVerdict::NotApplicable(SkipReason::OutsideLayerTree);
    };

    let target = match resolve_import_layer(specifier, resolver) {
        ImportTarget::NotApplicable(SkipReason::Relative) if resolver.resolve_relative => {
            resolve_relative_import(file, specifier.trim(), resolver)
        }
        other => other,
    };
    let target = match target {
        ImportTarget::Layer(layer) => layer,
        ImportTarget::NotApplicable(reason) => return EdgeVerdict::NotApplicable(reason),
    };

    let current = match current {
        FileLayer::Known(layer) => layer,
        FileLayer::Unrecognized(name) => {
            return EdgeVerdict::NotApplicable(SkipReason::UnrecognizedCurrentLayer(
                name.to_string(),
            ));
        }
    };

    let permitted = graph.permitted_targets(current);
    if permitted.contains(target) {
        EdgeVerdict::Allowed
    } else {
        EdgeVerdict::Violated(Violation {
            current,
            target,
            permitted: permitted.clone(),
        })
    }
}
