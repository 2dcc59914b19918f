//! Tiered selection of particle collections
//!
//! A [Selector] is a predicate over one particle, parameterized by the
//! cut thresholds of one selection tier. A [CollectionSelector] applies
//! it across a collection, optionally restricted to a single slot
//! (leading, subleading, ...) among the passing entries.
//!
//! Threshold comparisons are inclusive unless documented otherwise at
//! the individual cut.

/// Muon and electron working points
pub mod lepton;
/// Hadronic-tau working points
pub mod had_tau;
/// Jet selection and b-tagging working points
pub mod jet;

use strum::{Display, EnumString};
use thiserror::Error;

/// Decision whether one particle passes a selection tier
pub trait Selector<P> {
    fn accept(&self, particle: &P) -> bool;
}

impl<S, P> Selector<P> for &S
where
    S: Selector<P>,
{
    fn accept(&self, particle: &P) -> bool {
        (*self).accept(particle)
    }
}

/// Which entries among the passing particles to keep
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
pub enum SelIndex {
    /// Keep every passing particle
    #[default]
    All,
    /// Keep only the n-th passing particle (0-based)
    Nth(usize),
}

/// Apply a [Selector] across a particle collection
///
/// Input order is preserved. With [SelIndex::Nth] the result is a
/// singleton or empty, realizing leading/subleading selection for one
/// particle flavor. Two slots of the same tier can still overlap in
/// phase space; removing that overlap is the cleaner's job.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CollectionSelector<S> {
    selector: S,
    index: SelIndex,
}

impl<S> CollectionSelector<S> {
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            index: SelIndex::All,
        }
    }

    /// Restrict to the n-th passing particle
    pub fn nth(selector: S, index: usize) -> Self {
        Self {
            selector,
            index: SelIndex::Nth(index),
        }
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    pub fn index(&self) -> SelIndex {
        self.index
    }

    /// The subset of `particles` passing the predicate, respecting the
    /// slot restriction
    pub fn select<'a, P>(&self, particles: &[&'a P]) -> Vec<&'a P>
    where
        S: Selector<P>,
    {
        let mut selected = Vec::new();
        let mut npassed = 0;
        for &particle in particles {
            if self.selector.accept(particle) {
                match self.index {
                    SelIndex::All => selected.push(particle),
                    SelIndex::Nth(n) if npassed == n => {
                        selected.push(particle)
                    }
                    SelIndex::Nth(_) => {}
                }
                npassed += 1;
            }
        }
        selected
    }
}

/// Borrow every entry of a collection, the starting point of a
/// selection chain
pub fn as_refs<T>(particles: &[T]) -> Vec<&T> {
    particles.iter().collect()
}

/// Data-taking era selecting the working-point constants
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
)]
pub enum Era {
    #[strum(serialize = "2016")]
    Era2016,
    #[strum(serialize = "2017")]
    Era2017,
}

/// Invalid selection configuration, reported at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("inverted cut window for {name}: min {min} > max {max}")]
    InvertedWindow {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error(
        "binned threshold needs one more value than edges, \
         got {nvalues} values for {nedges} edges"
    )]
    BinningArity { nedges: usize, nvalues: usize },
    #[error("bin edges must increase strictly: edge {idx} ({value}) does not")]
    NonMonotonicBinning { idx: usize, value: f64 },
    #[error("negative threshold for {name}: {value}")]
    NegativeThreshold { name: &'static str, value: f64 },
    #[error("unknown era: {0}")]
    UnknownEra(String),
}

/// Cut thresholds binned in some observable
///
/// Bin `i` covers observable values up to and including `edges[i]`;
/// the last bin extends to infinity. Well-formedness is checked at
/// construction, never at lookup time.
#[derive(Clone, Debug, PartialEq)]
pub struct Binned<T> {
    edges: Vec<f64>,
    values: Vec<T>,
}

impl<T> Binned<T> {
    pub fn new(edges: Vec<f64>, values: Vec<T>) -> Result<Self, ConfigError> {
        if values.len() != edges.len() + 1 {
            return Err(ConfigError::BinningArity {
                nedges: edges.len(),
                nvalues: values.len(),
            });
        }
        for (idx, pair) in edges.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::NonMonotonicBinning {
                    idx: idx + 1,
                    value: pair[1],
                });
            }
        }
        Ok(Self { edges, values })
    }

    /// A single bin covering everything
    pub fn constant(value: T) -> Self {
        Self {
            edges: Vec::new(),
            values: vec![value],
        }
    }

    /// The threshold for the bin containing `x`
    pub fn at(&self, x: f64) -> &T {
        let idx = self
            .edges
            .iter()
            .position(|&edge| x <= edge)
            .unwrap_or(self.edges.len());
        &self.values[idx]
    }
}
