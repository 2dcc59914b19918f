//! Per-event object selection
//!
//! [ObjectSelection] wires the selectors, cleaners and the gen matcher
//! into the canonical per-event sequence: muons first (highest overlap
//! priority, no cleaning), then electrons cleaned against muons, then
//! hadronic taus cleaned against both lepton flavors, then jets
//! cleaned against everything. Each collection is classified into
//! monotone loose/fakeable/tight tiers by chaining, so the tight set
//! is a subset of the fakeable set is a subset of the loose set.
//!
//! All collections are rebuilt per event; the pipeline itself only
//! holds configuration-time thresholds and is stateless across events.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clean::{remove_overlaps, Cleaner, OverlapVeto};
use crate::config::{GenMatchConfig, SelectionConfig};
use crate::gen_match::GenMatcher;
use crate::gen_particle::GenParticle;
use crate::reco::{RecoElectron, RecoHadTau, RecoJet, RecoMuon};
use crate::select::had_tau::HadTauSelector;
use crate::select::jet::{JetSelector, JetSelectorBtag};
use crate::select::lepton::{
    ElectronSelectorFakeable, ElectronSelectorLoose, ElectronSelectorTight,
    MuonSelectorFakeable, MuonSelectorLoose, MuonSelectorTight,
};
use crate::select::{as_refs, CollectionSelector, ConfigError};

/// Generator-level truth collections of one event
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TruthRecord {
    pub leptons: Vec<GenParticle>,
    pub had_taus: Vec<GenParticle>,
    pub jets: Vec<GenParticle>,
}

/// Reconstructed collections of one event
///
/// Populated by the reader layer, consumed and annotated by
/// [ObjectSelection::run], discarded at the end of the event.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EventRecord {
    pub muons: Vec<RecoMuon>,
    pub electrons: Vec<RecoElectron>,
    pub had_taus: Vec<RecoHadTau>,
    pub jets: Vec<RecoJet>,
    pub truth: Option<TruthRecord>,
}

/// Selection tiers of one lepton flavor
#[derive(Clone, Debug, PartialEq)]
pub struct LeptonSets<'a, T> {
    pub loose: Vec<&'a T>,
    pub fakeable: Vec<&'a T>,
    pub tight: Vec<&'a T>,
}

/// Selection tiers of the hadronic taus
///
/// The fakeable and tight sets are the concatenation of the leading
/// and subleading slot, at most one entry each.
#[derive(Clone, Debug, PartialEq)]
pub struct HadTauSets<'a> {
    pub loose: Vec<&'a RecoHadTau>,
    pub fakeable: Vec<&'a RecoHadTau>,
    pub tight: Vec<&'a RecoHadTau>,
}

/// Jet working sets
#[derive(Clone, Debug, PartialEq)]
pub struct JetSets<'a> {
    pub cleaned: Vec<&'a RecoJet>,
    pub selected: Vec<&'a RecoJet>,
    pub btag_loose: Vec<&'a RecoJet>,
    pub btag_medium: Vec<&'a RecoJet>,
}

/// All working sets produced for one event
#[derive(Clone, Debug, PartialEq)]
pub struct WorkingSets<'a> {
    pub muons: LeptonSets<'a, RecoMuon>,
    pub electrons: LeptonSets<'a, RecoElectron>,
    pub had_taus: HadTauSets<'a>,
    pub jets: JetSets<'a>,
}

/// The per-event object-selection driver
pub struct ObjectSelection {
    muon_loose: CollectionSelector<MuonSelectorLoose>,
    muon_fakeable: CollectionSelector<MuonSelectorFakeable>,
    muon_tight: CollectionSelector<MuonSelectorTight>,
    electron_cleaner: Cleaner,
    electron_loose: CollectionSelector<ElectronSelectorLoose>,
    electron_fakeable: CollectionSelector<ElectronSelectorFakeable>,
    electron_tight: CollectionSelector<ElectronSelectorTight>,
    had_tau_cleaner: Cleaner,
    had_tau_loose: CollectionSelector<HadTauSelector>,
    had_tau_fakeable_lead: CollectionSelector<HadTauSelector>,
    had_tau_fakeable_sublead: CollectionSelector<HadTauSelector>,
    had_tau_tight_lead: CollectionSelector<HadTauSelector>,
    had_tau_tight_sublead: CollectionSelector<HadTauSelector>,
    jet_selector: CollectionSelector<JetSelector>,
    jet_btag_loose: CollectionSelector<JetSelectorBtag>,
    jet_btag_medium: CollectionSelector<JetSelectorBtag>,
    jet_clean_delta_r: f64,
    gen_matcher: GenMatcher,
    gen_match: GenMatchConfig,
}

impl ObjectSelection {
    pub fn new(config: &SelectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let era = config.era()?;

        let mut jet_kinematics = JetSelector::default();
        if let Some(min_pt) = config.jets.min_pt {
            jet_kinematics.min_pt = min_pt;
        }
        if let Some(max_abs_eta) = config.jets.max_abs_eta {
            jet_kinematics.max_abs_eta = max_abs_eta;
        }
        let mut jet_btag_loose = JetSelectorBtag::loose(era);
        let mut jet_btag_medium = JetSelectorBtag::medium(era);
        jet_btag_loose.kinematics = jet_kinematics;
        jet_btag_medium.kinematics = jet_kinematics;

        let mut tau_loose = HadTauSelector::loose();
        let mut tau_fakeable = HadTauSelector::fakeable();
        let mut tau_tight = HadTauSelector::tight();
        if let Some(min_pt) = config.had_taus.min_pt {
            tau_loose.min_pt = min_pt;
            tau_fakeable.min_pt = min_pt;
            tau_tight.min_pt = min_pt;
        }
        if let Some(min_id_mva) = config.had_taus.min_id_mva {
            tau_loose.min_id_mva = tau_loose.min_id_mva.max(min_id_mva);
            tau_fakeable.min_id_mva =
                tau_fakeable.min_id_mva.max(min_id_mva);
            tau_tight.min_id_mva = tau_tight.min_id_mva.max(min_id_mva);
        }

        Ok(Self {
            muon_loose: CollectionSelector::new(MuonSelectorLoose::new()),
            muon_fakeable: CollectionSelector::new(
                MuonSelectorFakeable::for_era(era)?,
            ),
            muon_tight: CollectionSelector::new(MuonSelectorTight::for_era(
                era,
            )),
            electron_cleaner: Cleaner::new(config.cleaning.electron_delta_r),
            electron_loose: CollectionSelector::new(
                ElectronSelectorLoose::new()?,
            ),
            electron_fakeable: CollectionSelector::new(
                ElectronSelectorFakeable::for_era(era)?,
            ),
            electron_tight: CollectionSelector::new(
                ElectronSelectorTight::for_era(era)?,
            ),
            had_tau_cleaner: Cleaner::new(config.cleaning.had_tau_delta_r),
            had_tau_loose: CollectionSelector::new(tau_loose),
            had_tau_fakeable_lead: CollectionSelector::nth(tau_fakeable, 0),
            had_tau_fakeable_sublead: CollectionSelector::nth(
                tau_fakeable,
                1,
            ),
            had_tau_tight_lead: CollectionSelector::nth(tau_tight, 0),
            had_tau_tight_sublead: CollectionSelector::nth(tau_tight, 1),
            jet_selector: CollectionSelector::new(jet_kinematics),
            jet_btag_loose: CollectionSelector::new(jet_btag_loose),
            jet_btag_medium: CollectionSelector::new(jet_btag_medium),
            jet_clean_delta_r: config.cleaning.jet_delta_r,
            gen_matcher: GenMatcher::new(),
            gen_match: config.gen_match,
        })
    }

    /// Build the working sets of one event
    ///
    /// Attaches truth matches to the reconstructed records (when a
    /// truth record is present), then resolves overlaps and classifies
    /// every collection into its selection tiers.
    pub fn run<'a>(&self, event: &'a mut EventRecord) -> WorkingSets<'a> {
        let EventRecord {
            muons,
            electrons,
            had_taus,
            jets,
            truth,
        } = event;

        if let Some(truth) = truth.as_ref() {
            let dr = &self.gen_match;
            let matcher = &self.gen_matcher;
            matcher.add_lepton_match(muons, &truth.leptons, dr.lepton_delta_r);
            matcher.add_had_tau_match(
                muons,
                &truth.had_taus,
                dr.had_tau_delta_r,
            );
            matcher.add_jet_match(muons, &truth.jets, dr.jet_delta_r);
            matcher.add_lepton_match(
                electrons,
                &truth.leptons,
                dr.lepton_delta_r,
            );
            matcher.add_had_tau_match(
                electrons,
                &truth.had_taus,
                dr.had_tau_delta_r,
            );
            matcher.add_jet_match(electrons, &truth.jets, dr.jet_delta_r);
            matcher.add_lepton_match(
                had_taus,
                &truth.leptons,
                dr.lepton_delta_r,
            );
            matcher.add_had_tau_match(
                had_taus,
                &truth.had_taus,
                dr.had_tau_delta_r,
            );
            matcher.add_jet_match(had_taus, &truth.jets, dr.jet_delta_r);
            matcher.add_lepton_match(jets, &truth.leptons, dr.lepton_delta_r);
            matcher.add_had_tau_match(
                jets,
                &truth.had_taus,
                dr.had_tau_delta_r,
            );
            matcher.add_jet_match(jets, &truth.jets, dr.jet_delta_r);
        }

        // muons have the highest priority in the overlap removal, so
        // they are not cleaned against anything
        let loose_muons = self.muon_loose.select(&as_refs(muons));
        let fakeable_muons = self.muon_fakeable.select(&loose_muons);
        let tight_muons = self.muon_tight.select(&fakeable_muons);

        let cleaned_electrons = self
            .electron_cleaner
            .clean(as_refs(electrons), &tight_muons);
        let loose_electrons = self.electron_loose.select(&cleaned_electrons);
        let fakeable_electrons =
            self.electron_fakeable.select(&loose_electrons);
        let tight_electrons = self.electron_tight.select(&fakeable_electrons);

        let cleaned_taus = {
            let vs_muons = self
                .had_tau_cleaner
                .clean(as_refs(had_taus), &tight_muons);
            self.had_tau_cleaner.clean(vs_muons, &tight_electrons)
        };
        let loose_taus = self.had_tau_loose.select(&cleaned_taus);
        let fakeable_lead = self.had_tau_fakeable_lead.select(&loose_taus);
        let fakeable_sublead = self.had_tau_cleaner.clean(
            self.had_tau_fakeable_sublead.select(&loose_taus),
            &fakeable_lead,
        );
        assert!(fakeable_lead.len() <= 1 && fakeable_sublead.len() <= 1);
        let mut fakeable_taus = fakeable_lead;
        fakeable_taus.extend(fakeable_sublead);
        let tight_lead = self.had_tau_tight_lead.select(&loose_taus);
        let tight_sublead = self.had_tau_cleaner.clean(
            self.had_tau_tight_sublead.select(&loose_taus),
            &tight_lead,
        );
        assert!(tight_lead.len() <= 1 && tight_sublead.len() <= 1);
        let mut tight_taus = tight_lead;
        tight_taus.extend(tight_sublead);

        let cleaned_jets = remove_overlaps(
            as_refs(jets),
            &[
                OverlapVeto::new(&tight_muons, self.jet_clean_delta_r),
                OverlapVeto::new(&tight_electrons, self.jet_clean_delta_r),
                OverlapVeto::new(&fakeable_taus, self.jet_clean_delta_r),
            ],
        );
        let selected_jets = self.jet_selector.select(&cleaned_jets);
        let btag_loose = self.jet_btag_loose.select(&cleaned_jets);
        let btag_medium = self.jet_btag_medium.select(&cleaned_jets);

        debug!(
            "working sets: {} tight muons, {} tight electrons, \
             {} fakeable taus, {} selected jets",
            tight_muons.len(),
            tight_electrons.len(),
            fakeable_taus.len(),
            selected_jets.len()
        );

        WorkingSets {
            muons: LeptonSets {
                loose: loose_muons,
                fakeable: fakeable_muons,
                tight: tight_muons,
            },
            electrons: LeptonSets {
                loose: loose_electrons,
                fakeable: fakeable_electrons,
                tight: tight_electrons,
            },
            had_taus: HadTauSets {
                loose: loose_taus,
                fakeable: fakeable_taus,
                tight: tight_taus,
            },
            jets: JetSets {
                cleaned: cleaned_jets,
                selected: selected_jets,
                btag_loose,
                btag_medium,
            },
        }
    }
}
