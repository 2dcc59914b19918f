use noisy_float::prelude::*;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::distance::Direction;
use crate::four_vector::FourVector;
use crate::gen_particle::GenIdx;
use crate::particle::Particle;

/// Truth handles attached to a reconstructed object by the gen matcher
///
/// The three flavor slots are independent: an object may hold a lepton
/// match and a jet match at the same time. Which one wins is a
/// downstream analysis decision.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenMatches {
    pub lepton: Option<GenIdx>,
    pub had_tau: Option<GenIdx>,
    pub jet: Option<GenIdx>,
}

/// Access to the truth-match slots of a reconstructed object
pub trait HasGenMatches {
    fn gen_matches(&self) -> &GenMatches;
    fn gen_matches_mut(&mut self) -> &mut GenMatches;
}

/// A reconstructed muon
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, TypedBuilder)]
pub struct RecoMuon {
    particle: Particle,
    charge: i32,
    /// Transverse momentum corrected for nearby jet activity
    cone_pt: f64,
    dxy: f64,
    dz: f64,
    rel_iso: f64,
    sip3d: f64,
    /// Prompt-lepton MVA score
    mva_tth: f64,
    jet_pt_ratio: f64,
    jet_btag_csv: f64,
    segment_compatibility: f64,
    passes_loose_id: bool,
    passes_medium_id: bool,
    #[serde(skip)]
    #[builder(default)]
    gen_matches: GenMatches,
}

impl RecoMuon {
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn pt(&self) -> N64 {
        self.particle.pt()
    }

    pub fn eta(&self) -> N64 {
        self.particle.eta()
    }

    pub fn abs_eta(&self) -> N64 {
        self.particle.abs_eta()
    }

    pub fn phi(&self) -> N64 {
        self.particle.phi()
    }

    pub fn mass(&self) -> N64 {
        self.particle.mass()
    }

    pub fn p4(&self) -> FourVector {
        self.particle.p4()
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn cone_pt(&self) -> f64 {
        self.cone_pt
    }

    pub fn dxy(&self) -> f64 {
        self.dxy
    }

    pub fn dz(&self) -> f64 {
        self.dz
    }

    pub fn rel_iso(&self) -> f64 {
        self.rel_iso
    }

    pub fn sip3d(&self) -> f64 {
        self.sip3d
    }

    pub fn mva_tth(&self) -> f64 {
        self.mva_tth
    }

    pub fn jet_pt_ratio(&self) -> f64 {
        self.jet_pt_ratio
    }

    pub fn jet_btag_csv(&self) -> f64 {
        self.jet_btag_csv
    }

    pub fn segment_compatibility(&self) -> f64 {
        self.segment_compatibility
    }

    pub fn passes_loose_id(&self) -> bool {
        self.passes_loose_id
    }

    pub fn passes_medium_id(&self) -> bool {
        self.passes_medium_id
    }
}

impl Direction for RecoMuon {
    fn pseudorapidity(&self) -> N64 {
        self.particle.eta()
    }

    fn azimuth(&self) -> N64 {
        self.particle.phi()
    }
}

impl HasGenMatches for RecoMuon {
    fn gen_matches(&self) -> &GenMatches {
        &self.gen_matches
    }

    fn gen_matches_mut(&mut self) -> &mut GenMatches {
        &mut self.gen_matches
    }
}

/// A reconstructed electron
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, TypedBuilder)]
pub struct RecoElectron {
    particle: Particle,
    charge: i32,
    /// Transverse momentum corrected for nearby jet activity
    cone_pt: f64,
    dxy: f64,
    dz: f64,
    rel_iso: f64,
    sip3d: f64,
    /// Prompt-lepton MVA score
    mva_tth: f64,
    jet_pt_ratio: f64,
    jet_btag_csv: f64,
    /// POG identification MVA score
    mva_pog: f64,
    sigma_eta_eta: f64,
    h_over_e: f64,
    delta_eta_trk: f64,
    delta_phi_trk: f64,
    ooe_minus_oop: f64,
    n_lost_hits: u32,
    passes_conversion_veto: bool,
    #[serde(skip)]
    #[builder(default)]
    gen_matches: GenMatches,
}

impl RecoElectron {
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn pt(&self) -> N64 {
        self.particle.pt()
    }

    pub fn eta(&self) -> N64 {
        self.particle.eta()
    }

    pub fn abs_eta(&self) -> N64 {
        self.particle.abs_eta()
    }

    pub fn phi(&self) -> N64 {
        self.particle.phi()
    }

    pub fn mass(&self) -> N64 {
        self.particle.mass()
    }

    pub fn p4(&self) -> FourVector {
        self.particle.p4()
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn cone_pt(&self) -> f64 {
        self.cone_pt
    }

    pub fn dxy(&self) -> f64 {
        self.dxy
    }

    pub fn dz(&self) -> f64 {
        self.dz
    }

    pub fn rel_iso(&self) -> f64 {
        self.rel_iso
    }

    pub fn sip3d(&self) -> f64 {
        self.sip3d
    }

    pub fn mva_tth(&self) -> f64 {
        self.mva_tth
    }

    pub fn jet_pt_ratio(&self) -> f64 {
        self.jet_pt_ratio
    }

    pub fn jet_btag_csv(&self) -> f64 {
        self.jet_btag_csv
    }

    pub fn mva_pog(&self) -> f64 {
        self.mva_pog
    }

    pub fn sigma_eta_eta(&self) -> f64 {
        self.sigma_eta_eta
    }

    pub fn h_over_e(&self) -> f64 {
        self.h_over_e
    }

    pub fn delta_eta_trk(&self) -> f64 {
        self.delta_eta_trk
    }

    pub fn delta_phi_trk(&self) -> f64 {
        self.delta_phi_trk
    }

    pub fn ooe_minus_oop(&self) -> f64 {
        self.ooe_minus_oop
    }

    pub fn n_lost_hits(&self) -> u32 {
        self.n_lost_hits
    }

    pub fn passes_conversion_veto(&self) -> bool {
        self.passes_conversion_veto
    }
}

impl Direction for RecoElectron {
    fn pseudorapidity(&self) -> N64 {
        self.particle.eta()
    }

    fn azimuth(&self) -> N64 {
        self.particle.phi()
    }
}

impl HasGenMatches for RecoElectron {
    fn gen_matches(&self) -> &GenMatches {
        &self.gen_matches
    }

    fn gen_matches_mut(&mut self) -> &mut GenMatches {
        &mut self.gen_matches
    }
}

/// A reconstructed hadronic tau candidate
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, TypedBuilder)]
pub struct RecoHadTau {
    particle: Particle,
    charge: i32,
    dxy: f64,
    dz: f64,
    decay_mode_finding: bool,
    /// Identification MVA working-point count passed (0 = none)
    id_mva: i32,
    raw_mva: f64,
    anti_electron: i32,
    anti_muon: i32,
    #[serde(skip)]
    #[builder(default)]
    gen_matches: GenMatches,
}

impl RecoHadTau {
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn pt(&self) -> N64 {
        self.particle.pt()
    }

    pub fn eta(&self) -> N64 {
        self.particle.eta()
    }

    pub fn abs_eta(&self) -> N64 {
        self.particle.abs_eta()
    }

    pub fn phi(&self) -> N64 {
        self.particle.phi()
    }

    pub fn mass(&self) -> N64 {
        self.particle.mass()
    }

    pub fn p4(&self) -> FourVector {
        self.particle.p4()
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn dxy(&self) -> f64 {
        self.dxy
    }

    pub fn dz(&self) -> f64 {
        self.dz
    }

    pub fn decay_mode_finding(&self) -> bool {
        self.decay_mode_finding
    }

    pub fn id_mva(&self) -> i32 {
        self.id_mva
    }

    pub fn raw_mva(&self) -> f64 {
        self.raw_mva
    }

    pub fn anti_electron(&self) -> i32 {
        self.anti_electron
    }

    pub fn anti_muon(&self) -> i32 {
        self.anti_muon
    }
}

impl Direction for RecoHadTau {
    fn pseudorapidity(&self) -> N64 {
        self.particle.eta()
    }

    fn azimuth(&self) -> N64 {
        self.particle.phi()
    }
}

impl HasGenMatches for RecoHadTau {
    fn gen_matches(&self) -> &GenMatches {
        &self.gen_matches
    }

    fn gen_matches_mut(&mut self) -> &mut GenMatches {
        &mut self.gen_matches
    }
}

/// A reconstructed jet
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, TypedBuilder)]
pub struct RecoJet {
    particle: Particle,
    btag_csv: f64,
    #[serde(skip)]
    #[builder(default)]
    gen_matches: GenMatches,
}

impl RecoJet {
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn pt(&self) -> N64 {
        self.particle.pt()
    }

    pub fn eta(&self) -> N64 {
        self.particle.eta()
    }

    pub fn abs_eta(&self) -> N64 {
        self.particle.abs_eta()
    }

    pub fn phi(&self) -> N64 {
        self.particle.phi()
    }

    pub fn mass(&self) -> N64 {
        self.particle.mass()
    }

    pub fn p4(&self) -> FourVector {
        self.particle.p4()
    }

    pub fn btag_csv(&self) -> f64 {
        self.btag_csv
    }
}

impl Direction for RecoJet {
    fn pseudorapidity(&self) -> N64 {
        self.particle.eta()
    }

    fn azimuth(&self) -> N64 {
        self.particle.phi()
    }
}

impl HasGenMatches for RecoJet {
    fn gen_matches(&self) -> &GenMatches {
        &self.gen_matches
    }

    fn gen_matches_mut(&mut self) -> &mut GenMatches {
        &mut self.gen_matches
    }
}
