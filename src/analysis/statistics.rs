//! Usage counts over a solved or partially solved grid

use crate::spatial::direction::Position;
use crate::tileset::TileVariant;
use std::collections::BTreeMap;
use std::fmt;

/// How often each tile name was placed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileUsage {
    /// Resolved cells per display name, sorted by name
    pub counts: BTreeMap<String, usize>,
    /// Cells that still hold several candidates
    pub unresolved: usize,
}

impl TileUsage {
    /// Tally the output of a solver's tile iterator
    pub fn from_tiles<'a>(tiles: impl IntoIterator<Item = (Position, Option<&'a TileVariant>)>) -> Self {
        let mut usage = Self::default();
        for (_, variant) in tiles {
            match variant {
                Some(variant) => *usage.counts.entry(variant.name()).or_insert(0) += 1,
                None => usage.unresolved += 1,
            }
        }
        usage
    }

    /// Number of resolved cells
    pub fn resolved(&self) -> usize {
        self.counts.values().sum()
    }

    /// Resolved plus unresolved cells
    pub fn total(&self) -> usize {
        self.resolved() + self.unresolved
    }

    /// Share of cells resolved to `name`, zero for an empty tally
    pub fn share(&self, name: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.counts.get(name).copied().unwrap_or(0) as f64 / total as f64
    }

    /// The most frequent name, ties going to the alphabetically first
    pub fn most_common(&self) -> Option<(&str, usize)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&str, usize)>, (name, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((name.as_str(), count)),
            })
    }
}

impl fmt::Display for TileUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in &self.counts {
            writeln!(f, "{name:>24}: {count}")?;
        }
        write!(f, "{:>24}: {}", "unresolved", self.unresolved)
    }
}
