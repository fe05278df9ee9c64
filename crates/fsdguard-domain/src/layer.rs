use crate::graph::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Feature-Sliced Design layer.
///
/// Variants are declared from most reusable to most application-specific, so the
/// derived `Ord` is the hierarchy: `Shared < Entities < Features < Widgets < Pages < App`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Shared,
    Entities,
    Features,
    Widgets,
    Pages,
    App,
}

impl Layer {
    /// All layers, top of the hierarchy first.
    pub const ALL: [Layer; 6] = [
        Layer::App,
        Layer::Pages,
        Layer::Widgets,
        Layer::Features,
        Layer::Entities,
        Layer::Shared,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::App => "app",
            Layer::Pages => "pages",
            Layer::Widgets => "widgets",
            Layer::Features => "features",
            Layer::Entities => "entities",
            Layer::Shared => "shared",
        }
    }

    /// Exact, case-sensitive match of a directory or specifier segment.
    pub fn parse(segment: &str) -> Option<Layer> {
        Layer::ALL.into_iter().find(|l| l.as_str() == segment)
    }

    /// Layers strictly below `self`, nearest first.
    pub fn below(self) -> impl Iterator<Item = Layer> {
        Layer::ALL.into_iter().filter(move |l| *l < self)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layer::parse(s).ok_or_else(|| GraphError::UnknownLayer(s.to_string()))
    }
}
