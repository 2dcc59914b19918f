//! Gen-matching of hadronic top-quark decay triplets
//!
//! A reconstructed top candidate is a b-jet plus two light jets
//! hypothesized to come from the W decay, optionally accompanied by a
//! large-radius jet capturing the whole decay. Matching against the
//! truth record proceeds in two steps: resolve the truth decay products
//! of the hypothesis side (top or antitop), then test each candidate
//! jet against its truth counterpart within topology-dependent angular
//! windows.

use itertools::Itertools;
use log::debug;
use noisy_float::prelude::*;
use particle_id::{
    gauge_bosons::W_plus,
    sm_elementary_particles::{bottom, top, W_minus},
    ParticleID,
};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::distance::delta_r;
use crate::four_vector::FourVector;
use crate::gen_particle::GenParticle;

/// Half-width of the truth mass windows, in GeV
pub const MASS_WINDOW: f64 = 15.;

/// Which side of the top pair the candidate is tested against
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
)]
#[strum(serialize_all = "lowercase")]
pub enum TopHypothesis {
    Top,
    AntiTop,
}

impl TopHypothesis {
    fn top_id(self) -> ParticleID {
        match self {
            Self::Top => top,
            Self::AntiTop => ParticleID::new(-top.id()),
        }
    }

    fn b_id(self) -> ParticleID {
        match self {
            Self::Top => bottom,
            Self::AntiTop => ParticleID::new(-bottom.id()),
        }
    }

    fn w_id(self) -> ParticleID {
        match self {
            Self::Top => W_plus,
            Self::AntiTop => W_minus,
        }
    }

    fn w_charge(self) -> f64 {
        match self {
            Self::Top => 1.,
            Self::AntiTop => -1.,
        }
    }
}

/// Topology of the reconstructed top candidate
///
/// The jet reconstruction differs between the tiers, and with it the
/// angular resolution, so each tier has its own default matching
/// windows.
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
pub enum TopologyTier {
    /// All three decay products inside one large-radius jet
    FullyMerged,
    /// The W decay products merged, the b-jet resolved
    SemiMerged,
    /// Three separate jets
    Resolved,
}

impl TopologyTier {
    /// Pick the tier from the per-event candidate counts
    ///
    /// Fully merged candidates take precedence over merged-W
    /// candidates, which take precedence over a resolved triplet.
    pub fn classify(
        n_fat_top: usize,
        n_fat_w: usize,
        n_resolved: usize,
    ) -> Option<Self> {
        if n_fat_top > 0 {
            Some(Self::FullyMerged)
        } else if n_fat_w > 0 {
            Some(Self::SemiMerged)
        } else if n_resolved >= 3 {
            Some(Self::Resolved)
        } else {
            None
        }
    }
}

/// Angular matching windows of the triplet gen matcher
///
/// Configurable per call site; the per-tier constructors provide the
/// defaults.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TripletWindows {
    pub b_jet: f64,
    pub w_jet: f64,
    pub fat_jet: f64,
}

impl TripletWindows {
    pub fn for_tier(tier: TopologyTier) -> Self {
        match tier {
            TopologyTier::FullyMerged => Self {
                b_jet: 0.75,
                w_jet: 0.75,
                fat_jet: 0.75,
            },
            TopologyTier::SemiMerged => Self {
                b_jet: 0.3,
                w_jet: 0.75,
                fat_jet: 0.75,
            },
            TopologyTier::Resolved => Self {
                b_jet: 0.3,
                w_jet: 0.3,
                fat_jet: 1.5,
            },
        }
    }
}

/// Result of one triplet gen-matching test
///
/// The three flags are independent. The truth top transverse momentum
/// is reported whenever the full triplet matched.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TripletMatch {
    pub b_matched: bool,
    pub fat_jet_matched: bool,
    pub triplet_matched: bool,
    pub gen_top_pt: Option<N64>,
}

/// The truth record cannot identify the requested hypothesis side
#[derive(Debug, Error)]
pub enum TruthTopologyError {
    #[error("no truth {0} quark in event record")]
    MissingTop(TopHypothesis),
    #[error("found {count} truth {hypothesis} quarks, expected exactly one")]
    AmbiguousTop {
        hypothesis: TopHypothesis,
        count: usize,
    },
}

/// Truth-level decay products relevant for top-triplet matching
#[derive(Clone, Copy, Debug)]
pub struct TopDecayTruth<'a> {
    pub top_quarks: &'a [GenParticle],
    pub b_quarks: &'a [GenParticle],
    pub w_bosons: &'a [GenParticle],
    pub w_daughters: &'a [GenParticle],
}

/// Test a reconstructed (b, W-jet, W-jet) triplet against the truth
/// decay of one top quark
///
/// The hypothesis side is resolved by PDG sign. The two truth W
/// daughters are chosen as the charge-compatible pair whose combined
/// mass is closest to the truth W mass; the resolved side must then
/// lie within [MASS_WINDOW] of the truth W and top masses, otherwise
/// no match is reported. A missing or duplicated truth top quark is an
/// error, to be handled by the caller.
pub fn classify_triplet(
    rec_b_jet: &FourVector,
    rec_w_jet1: &FourVector,
    rec_w_jet2: &FourVector,
    truth: &TopDecayTruth<'_>,
    hypothesis: TopHypothesis,
    windows: &TripletWindows,
    rec_fat_jet: Option<&FourVector>,
) -> Result<TripletMatch, TruthTopologyError> {
    let top_quark = unique_top(truth.top_quarks, hypothesis)?;

    let Some(b_quark) =
        nearest_with_id(truth.b_quarks, hypothesis.b_id(), top_quark)
    else {
        debug!("no truth b quark for the {hypothesis} hypothesis");
        return Ok(TripletMatch::default());
    };
    let Some(w_boson) =
        nearest_with_id(truth.w_bosons, hypothesis.w_id(), top_quark)
    else {
        debug!("no truth W boson for the {hypothesis} hypothesis");
        return Ok(TripletMatch::default());
    };
    let Some((w_daughter1, w_daughter2)) = best_w_daughter_pair(
        truth.w_daughters,
        hypothesis.w_charge(),
        w_boson.mass(),
    ) else {
        debug!("no charge-compatible truth W daughter pair");
        return Ok(TripletMatch::default());
    };

    let m_w = (w_daughter1.p4() + w_daughter2.p4()).m();
    let m_top =
        (b_quark.p4() + w_daughter1.p4() + w_daughter2.p4()).m();
    if (m_w - w_boson.mass()).abs() > MASS_WINDOW
        || (m_top - top_quark.mass()).abs() > MASS_WINDOW
    {
        debug!(
            "truth side fails mass windows: m(jj) = {m_w}, m(bjj) = {m_top}"
        );
        return Ok(TripletMatch::default());
    }

    let b_matched = delta_r(rec_b_jet, b_quark) < windows.b_jet;
    let pair_matched = |first: &GenParticle, second: &GenParticle| {
        delta_r(rec_w_jet1, first) < windows.w_jet
            && delta_r(rec_w_jet2, second) < windows.w_jet
    };
    let w_jets_matched = pair_matched(w_daughter1, w_daughter2)
        || pair_matched(w_daughter2, w_daughter1);
    let triplet_matched = b_matched && w_jets_matched;
    let fat_jet_matched = rec_fat_jet
        .map(|fat| delta_r(fat, top_quark) < windows.fat_jet)
        .unwrap_or(false);

    Ok(TripletMatch {
        b_matched,
        fat_jet_matched,
        triplet_matched,
        gen_top_pt: triplet_matched.then(|| top_quark.pt()),
    })
}

fn unique_top(
    top_quarks: &[GenParticle],
    hypothesis: TopHypothesis,
) -> Result<&GenParticle, TruthTopologyError> {
    let mut found = top_quarks
        .iter()
        .filter(|t| t.pdg_id() == hypothesis.top_id());
    let first = found
        .next()
        .ok_or(TruthTopologyError::MissingTop(hypothesis))?;
    let extra = found.count();
    if extra > 0 {
        return Err(TruthTopologyError::AmbiguousTop {
            hypothesis,
            count: extra + 1,
        });
    }
    Ok(first)
}

fn nearest_with_id<'a>(
    candidates: &'a [GenParticle],
    id: ParticleID,
    anchor: &GenParticle,
) -> Option<&'a GenParticle> {
    candidates
        .iter()
        .filter(|c| c.pdg_id() == id)
        .min_by_key(|c| delta_r(*c, anchor))
}

fn best_w_daughter_pair(
    daughters: &[GenParticle],
    w_charge: f64,
    w_mass: N64,
) -> Option<(&GenParticle, &GenParticle)> {
    daughters
        .iter()
        .tuple_combinations::<(_, _)>()
        .filter(|(a, b)| (a.charge() + b.charge() - w_charge).abs() < 1e-6)
        .min_by_key(|(a, b)| ((a.p4() + b.p4()).m() - w_mass).abs())
}
