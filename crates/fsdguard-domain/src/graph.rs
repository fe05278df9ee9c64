//! The layer graph: which layers each layer may import from.

use crate::layer::Layer;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Rejections raised while building a [`LayerGraph`].
///
/// A graph that fails here must never reach validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown layer '{0}' (expected one of: app, pages, widgets, features, entities, shared)")]
    UnknownLayer(String),
    #[error("layer '{0}' is missing from the layer graph")]
    MissingLayer(Layer),
    #[error("layer '{0}' is defined more than once in the layer graph")]
    DuplicateLayer(Layer),
    #[error("layer '{from}' may not import from '{to}': imports must point to the same or a lower layer")]
    UpwardEdge { from: Layer, to: Layer },
}

/// Ordered, de-duplicated set of permitted target layers.
///
/// Order is preserved because it is part of the rendered violation message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerSet(Vec<Layer>);

impl LayerSet {
    pub const fn empty() -> Self {
        LayerSet(Vec::new())
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0.contains(&layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|l| l.as_str()).collect()
    }

    fn push(&mut self, layer: Layer) {
        if !self.contains(layer) {
            self.0.push(layer);
        }
    }

    fn remove(&mut self, layer: Layer) {
        self.0.retain(|l| *l != layer);
    }
}

impl FromIterator<Layer> for LayerSet {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        let mut set = LayerSet::empty();
        for layer in iter {
            set.push(layer);
        }
        set
    }
}

impl fmt::Display for LayerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

static NO_TARGETS: LayerSet = LayerSet::empty();

/// Immutable mapping from each layer to the layers it may import from.
///
/// Invariants (enforced by the constructors):
/// - total: every [`Layer`] has an entry
/// - monotonic: no entry permits a layer above its importer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerGraph {
    edges: BTreeMap<Layer, LayerSet>,
}

impl Default for LayerGraph {
    fn default() -> Self {
        LayerGraph::canonical()
    }
}

impl LayerGraph {
    /// The canonical Feature-Sliced Design graph: every layer may import all lower
    /// layers (nearest first) followed by itself.
    pub fn canonical() -> Self {
        let edges = Layer::ALL
            .into_iter()
            .map(|layer| {
                let targets = layer.below().chain(std::iter::once(layer)).collect();
                (layer, targets)
            })
            .collect();
        LayerGraph { edges }
    }

    /// Build a graph from an explicit table, rejecting anything that is not total
    /// and monotonic.
    pub fn from_table<I>(table: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (Layer, LayerSet)>,
    {
        let mut edges = BTreeMap::new();
        for (from, targets) in table {
            if let Some(to) = targets.iter().find(|to| *to > from) {
                return Err(GraphError::UpwardEdge { from, to });
            }
            if edges.insert(from, targets).is_some() {
                return Err(GraphError::DuplicateLayer(from));
            }
        }

        if let Some(missing) = Layer::ALL.into_iter().find(|l| !edges.contains_key(l)) {
            return Err(GraphError::MissingLayer(missing));
        }

        Ok(LayerGraph { edges })
    }

    /// Apply the same-layer policy: `true` appends each layer to its own targets
    /// (if absent), `false` removes every self edge.
    pub fn with_same_layer(mut self, allow: bool) -> Self {
        for (layer, targets) in self.edges.iter_mut() {
            if allow {
                targets.push(*layer);
            } else {
                targets.remove(*layer);
            }
        }
        self
    }

    pub fn permitted_targets(&self, layer: Layer) -> &LayerSet {
        self.edges.get(&layer).unwrap_or(&NO_TARGETS)
    }

    pub fn permits(&self, from: Layer, to: Layer) -> bool {
        self.permitted_targets(from).contains(to)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Layer, &LayerSet)> {
        self.edges.iter().map(|(l, s)| (*l, s))
    }
}
