use super::jet::btag_working_points;
use super::{Binned, ConfigError, Era, Selector};
use crate::reco::{RecoElectron, RecoMuon};

/// Loose muon identification
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MuonSelectorLoose {
    min_pt: f64,
    max_abs_eta: f64,
    max_abs_dxy: f64,
    max_abs_dz: f64,
    max_rel_iso: f64,
    max_sip3d: f64,
    apply_loose_id: bool,
}

impl MuonSelectorLoose {
    pub fn new() -> Self {
        Self {
            min_pt: 5.,
            max_abs_eta: 2.4,
            max_abs_dxy: 0.05,
            max_abs_dz: 0.1,
            max_rel_iso: 0.4,
            max_sip3d: 8.,
            apply_loose_id: true,
        }
    }
}

impl Default for MuonSelectorLoose {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector<RecoMuon> for MuonSelectorLoose {
    fn accept(&self, muon: &RecoMuon) -> bool {
        muon.pt() >= self.min_pt
            && muon.abs_eta() <= self.max_abs_eta
            && muon.dxy().abs() <= self.max_abs_dxy
            && muon.dz().abs() <= self.max_abs_dz
            && muon.rel_iso() <= self.max_rel_iso
            && muon.sip3d() <= self.max_sip3d
            && (muon.passes_loose_id() || !self.apply_loose_id)
    }
}

/// Thresholds applied per prompt-lepton MVA bin for fakeable muons
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MuonPromptMvaBin {
    pub min_jet_pt_ratio: f64,
    pub max_jet_btag_csv: f64,
    /// Lower cut on segment compatibility; strictly greater-than
    pub min_segment_compatibility: f64,
}

/// Fakeable muon identification
#[derive(Clone, Debug, PartialEq)]
pub struct MuonSelectorFakeable {
    min_cone_pt: f64,
    min_pt: f64,
    max_abs_eta: f64,
    max_abs_dxy: f64,
    max_abs_dz: f64,
    max_rel_iso: f64,
    max_sip3d: f64,
    apply_loose_id: bool,
    prompt_mva_bins: Binned<MuonPromptMvaBin>,
}

impl MuonSelectorFakeable {
    pub fn for_era(era: Era) -> Result<Self, ConfigError> {
        let (_, btag_medium) = btag_working_points(era);
        let prompt_mva_bins = Binned::new(
            vec![0.90],
            vec![
                MuonPromptMvaBin {
                    min_jet_pt_ratio: 0.50,
                    max_jet_btag_csv: 0.3,
                    min_segment_compatibility: 0.3,
                },
                MuonPromptMvaBin {
                    min_jet_pt_ratio: f64::NEG_INFINITY,
                    max_jet_btag_csv: btag_medium,
                    min_segment_compatibility: f64::NEG_INFINITY,
                },
            ],
        )?;
        Ok(Self {
            min_cone_pt: 10.,
            min_pt: 5.,
            max_abs_eta: 2.4,
            max_abs_dxy: 0.05,
            max_abs_dz: 0.1,
            max_rel_iso: 0.4,
            max_sip3d: 8.,
            apply_loose_id: true,
            prompt_mva_bins,
        })
    }
}

impl Selector<RecoMuon> for MuonSelectorFakeable {
    fn accept(&self, muon: &RecoMuon) -> bool {
        if muon.cone_pt() < self.min_cone_pt
            || muon.pt() < self.min_pt
            || muon.abs_eta() > self.max_abs_eta
            || muon.dxy().abs() > self.max_abs_dxy
            || muon.dz().abs() > self.max_abs_dz
            || muon.rel_iso() > self.max_rel_iso
            || muon.sip3d() > self.max_sip3d
            || (self.apply_loose_id && !muon.passes_loose_id())
        {
            return false;
        }
        let bin = self.prompt_mva_bins.at(muon.mva_tth());
        muon.jet_pt_ratio() >= bin.min_jet_pt_ratio
            && muon.jet_btag_csv() <= bin.max_jet_btag_csv
            && muon.segment_compatibility() > bin.min_segment_compatibility
    }
}

/// Tight muon identification
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MuonSelectorTight {
    min_pt: f64,
    max_abs_eta: f64,
    max_abs_dxy: f64,
    max_abs_dz: f64,
    max_rel_iso: f64,
    max_sip3d: f64,
    min_mva_tth: f64,
    max_jet_btag_csv: f64,
    apply_loose_id: bool,
    apply_medium_id: bool,
}

impl MuonSelectorTight {
    pub fn for_era(era: Era) -> Self {
        let (_, btag_medium) = btag_working_points(era);
        Self {
            min_pt: 10.,
            max_abs_eta: 2.4,
            max_abs_dxy: 0.05,
            max_abs_dz: 0.1,
            max_rel_iso: 0.4,
            max_sip3d: 8.,
            min_mva_tth: 0.90,
            max_jet_btag_csv: btag_medium,
            apply_loose_id: true,
            apply_medium_id: true,
        }
    }
}

impl Selector<RecoMuon> for MuonSelectorTight {
    fn accept(&self, muon: &RecoMuon) -> bool {
        muon.pt() >= self.min_pt
            && muon.abs_eta() <= self.max_abs_eta
            && muon.dxy().abs() <= self.max_abs_dxy
            && muon.dz().abs() <= self.max_abs_dz
            && muon.rel_iso() <= self.max_rel_iso
            && muon.sip3d() <= self.max_sip3d
            && muon.mva_tth() >= self.min_mva_tth
            && muon.jet_btag_csv() <= self.max_jet_btag_csv
            && (muon.passes_loose_id() || !self.apply_loose_id)
            && (muon.passes_medium_id() || !self.apply_medium_id)
    }
}

/// Loose electron identification
#[derive(Clone, Debug, PartialEq)]
pub struct ElectronSelectorLoose {
    min_pt: f64,
    max_abs_eta: f64,
    max_abs_dxy: f64,
    max_abs_dz: f64,
    max_rel_iso: f64,
    max_sip3d: f64,
    max_lost_hits: u32,
    /// POG identification MVA cut, binned in |eta|
    min_mva_pog: Binned<f64>,
}

impl ElectronSelectorLoose {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            min_pt: 7.,
            max_abs_eta: 2.5,
            max_abs_dxy: 0.05,
            max_abs_dz: 0.1,
            max_rel_iso: 0.4,
            max_sip3d: 8.,
            max_lost_hits: 1,
            min_mva_pog: Binned::new(vec![0.8, 1.479], vec![0.0, 0.0, 0.7])?,
        })
    }
}

impl Selector<RecoElectron> for ElectronSelectorLoose {
    fn accept(&self, electron: &RecoElectron) -> bool {
        electron.pt() >= self.min_pt
            && electron.abs_eta() <= self.max_abs_eta
            && electron.dxy().abs() <= self.max_abs_dxy
            && electron.dz().abs() <= self.max_abs_dz
            && electron.rel_iso() <= self.max_rel_iso
            && electron.sip3d() <= self.max_sip3d
            && electron.n_lost_hits() <= self.max_lost_hits
            && electron.mva_pog()
                >= *self.min_mva_pog.at(electron.abs_eta().raw())
    }
}

/// Emulation of the online electron identification, binned in |eta|
///
/// Applied on top of the fakeable cuts when the corresponding trigger
/// path has no offline counterpart; can be switched off per run.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerEmulationCuts {
    max_sigma_eta_eta: Binned<f64>,
    max_h_over_e: Binned<f64>,
    max_delta_eta: Binned<f64>,
    max_delta_phi: Binned<f64>,
    min_ooe_minus_oop: f64,
    max_ooe_minus_oop: Binned<f64>,
}

impl TriggerEmulationCuts {
    pub fn new() -> Result<Self, ConfigError> {
        let edges = vec![0.8, 1.479];
        Ok(Self {
            max_sigma_eta_eta: Binned::new(
                edges.clone(),
                vec![0.011, 0.011, 0.030],
            )?,
            max_h_over_e: Binned::new(edges.clone(), vec![0.10, 0.10, 0.07])?,
            max_delta_eta: Binned::new(
                edges.clone(),
                vec![0.01, 0.01, 0.008],
            )?,
            max_delta_phi: Binned::new(edges.clone(), vec![0.04, 0.04, 0.07])?,
            min_ooe_minus_oop: -0.05,
            max_ooe_minus_oop: Binned::new(
                edges,
                vec![0.010, 0.010, 0.005],
            )?,
        })
    }

    fn accept(&self, electron: &RecoElectron) -> bool {
        let abs_eta = electron.abs_eta().raw();
        electron.sigma_eta_eta() <= *self.max_sigma_eta_eta.at(abs_eta)
            && electron.h_over_e() <= *self.max_h_over_e.at(abs_eta)
            && electron.delta_eta_trk().abs() <= *self.max_delta_eta.at(abs_eta)
            && electron.delta_phi_trk().abs() <= *self.max_delta_phi.at(abs_eta)
            && electron.ooe_minus_oop() >= self.min_ooe_minus_oop
            && electron.ooe_minus_oop() <= *self.max_ooe_minus_oop.at(abs_eta)
    }
}

/// Thresholds applied per prompt-lepton MVA bin for fakeable electrons
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectronPromptMvaBin {
    pub min_jet_pt_ratio: f64,
    pub max_jet_btag_csv: f64,
}

/// Fakeable electron identification
#[derive(Clone, Debug, PartialEq)]
pub struct ElectronSelectorFakeable {
    min_cone_pt: f64,
    min_pt: f64,
    max_abs_eta: f64,
    max_abs_dxy: f64,
    max_abs_dz: f64,
    max_rel_iso: f64,
    max_sip3d: f64,
    max_lost_hits: u32,
    apply_conversion_veto: bool,
    prompt_mva_bins: Binned<ElectronPromptMvaBin>,
    trigger_cuts: TriggerEmulationCuts,
    apply_trigger_cuts: bool,
}

impl ElectronSelectorFakeable {
    pub fn for_era(era: Era) -> Result<Self, ConfigError> {
        let (_, btag_medium) = btag_working_points(era);
        let prompt_mva_bins = Binned::new(
            vec![0.90],
            vec![
                ElectronPromptMvaBin {
                    min_jet_pt_ratio: 0.50,
                    max_jet_btag_csv: 0.3,
                },
                ElectronPromptMvaBin {
                    min_jet_pt_ratio: f64::NEG_INFINITY,
                    max_jet_btag_csv: btag_medium,
                },
            ],
        )?;
        Ok(Self {
            min_cone_pt: 10.,
            min_pt: 7.,
            max_abs_eta: 2.5,
            max_abs_dxy: 0.05,
            max_abs_dz: 0.1,
            max_rel_iso: 0.4,
            max_sip3d: 8.,
            max_lost_hits: 0,
            apply_conversion_veto: false,
            prompt_mva_bins,
            trigger_cuts: TriggerEmulationCuts::new()?,
            apply_trigger_cuts: true,
        })
    }

    pub fn enable_trigger_emulation_cuts(&mut self) {
        self.apply_trigger_cuts = true;
    }

    pub fn disable_trigger_emulation_cuts(&mut self) {
        self.apply_trigger_cuts = false;
    }
}

impl Selector<RecoElectron> for ElectronSelectorFakeable {
    fn accept(&self, electron: &RecoElectron) -> bool {
        if electron.cone_pt() < self.min_cone_pt
            || electron.pt() < self.min_pt
            || electron.abs_eta() > self.max_abs_eta
            || electron.dxy().abs() > self.max_abs_dxy
            || electron.dz().abs() > self.max_abs_dz
            || electron.rel_iso() > self.max_rel_iso
            || electron.sip3d() > self.max_sip3d
            || electron.n_lost_hits() > self.max_lost_hits
            || (self.apply_conversion_veto
                && !electron.passes_conversion_veto())
        {
            return false;
        }
        let bin = self.prompt_mva_bins.at(electron.mva_tth());
        electron.jet_pt_ratio() >= bin.min_jet_pt_ratio
            && electron.jet_btag_csv() <= bin.max_jet_btag_csv
            && (!self.apply_trigger_cuts || self.trigger_cuts.accept(electron))
    }
}

/// Tight electron identification
#[derive(Clone, Debug, PartialEq)]
pub struct ElectronSelectorTight {
    min_pt: f64,
    max_abs_eta: f64,
    max_abs_dxy: f64,
    max_abs_dz: f64,
    max_rel_iso: f64,
    max_sip3d: f64,
    max_lost_hits: u32,
    min_mva_pog: Binned<f64>,
    min_mva_tth: f64,
    max_jet_btag_csv: f64,
}

impl ElectronSelectorTight {
    pub fn for_era(era: Era) -> Result<Self, ConfigError> {
        let (_, btag_medium) = btag_working_points(era);
        Ok(Self {
            min_pt: 10.,
            max_abs_eta: 2.5,
            max_abs_dxy: 0.05,
            max_abs_dz: 0.1,
            max_rel_iso: 0.4,
            max_sip3d: 8.,
            max_lost_hits: 0,
            min_mva_pog: Binned::new(vec![0.8, 1.479], vec![0.0, 0.0, 0.7])?,
            min_mva_tth: 0.90,
            max_jet_btag_csv: btag_medium,
        })
    }
}

impl Selector<RecoElectron> for ElectronSelectorTight {
    fn accept(&self, electron: &RecoElectron) -> bool {
        electron.pt() >= self.min_pt
            && electron.abs_eta() <= self.max_abs_eta
            && electron.dxy().abs() <= self.max_abs_dxy
            && electron.dz().abs() <= self.max_abs_dz
            && electron.rel_iso() <= self.max_rel_iso
            && electron.sip3d() <= self.max_sip3d
            && electron.n_lost_hits() <= self.max_lost_hits
            && electron.passes_conversion_veto()
            && electron.mva_pog()
                >= *self.min_mva_pog.at(electron.abs_eta().raw())
            && electron.mva_tth() >= self.min_mva_tth
            && electron.jet_btag_csv() <= self.max_jet_btag_csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::select::{as_refs, CollectionSelector};

    fn muon(pt: f64, mva_tth: f64, rel_iso: f64) -> RecoMuon {
        RecoMuon::builder()
            .particle(Particle::new(pt, 1.0, 0.5, 0.106))
            .charge(-1)
            .cone_pt(pt)
            .dxy(0.01)
            .dz(0.02)
            .rel_iso(rel_iso)
            .sip3d(2.)
            .mva_tth(mva_tth)
            .jet_pt_ratio(0.8)
            .jet_btag_csv(0.1)
            .segment_compatibility(0.6)
            .passes_loose_id(true)
            .passes_medium_id(true)
            .build()
    }

    fn electron(pt: f64, mva_tth: f64) -> RecoElectron {
        RecoElectron::builder()
            .particle(Particle::new(pt, 0.5, -1.0, 0.000511))
            .charge(1)
            .cone_pt(pt)
            .dxy(0.01)
            .dz(0.02)
            .rel_iso(0.1)
            .sip3d(2.)
            .mva_tth(mva_tth)
            .jet_pt_ratio(0.8)
            .jet_btag_csv(0.1)
            .mva_pog(0.8)
            .sigma_eta_eta(0.009)
            .h_over_e(0.05)
            .delta_eta_trk(0.005)
            .delta_phi_trk(0.02)
            .ooe_minus_oop(0.005)
            .n_lost_hits(0)
            .passes_conversion_veto(true)
            .build()
    }

    #[test]
    fn muon_tiers_are_monotone() {
        let muons = vec![
            muon(25., 0.95, 0.1),
            muon(25., 0.5, 0.1),
            muon(7., 0.95, 0.1),
            muon(25., 0.95, 0.6),
        ];
        let refs = as_refs(&muons);
        let loose = CollectionSelector::new(MuonSelectorLoose::new());
        let fakeable = CollectionSelector::new(
            MuonSelectorFakeable::for_era(Era::Era2017).unwrap(),
        );
        let tight =
            CollectionSelector::new(MuonSelectorTight::for_era(Era::Era2017));

        let loose_set = loose.select(&refs);
        let fakeable_set = fakeable.select(&loose_set);
        let tight_set = tight.select(&fakeable_set);

        assert_eq!(loose_set.len(), 3);
        // the low-pt muon fails the cone-pt cut
        assert_eq!(fakeable_set.len(), 2);
        assert_eq!(tight_set.len(), 1);
        assert!(fakeable_set.iter().all(|m| loose_set.contains(m)));
        assert!(tight_set.iter().all(|m| fakeable_set.contains(m)));
    }

    #[test]
    fn fakeable_muon_mva_binning() {
        let sel = MuonSelectorFakeable::for_era(Era::Era2017).unwrap();
        // high MVA: only the medium b-tag cut applies
        let mut m = muon(25., 0.95, 0.1);
        assert!(sel.accept(&m));
        // low MVA: the tight b-tag cut of the first bin applies
        m = muon(25., 0.5, 0.1);
        assert!(sel.accept(&m));
        let bad_btag = RecoMuon::builder()
            .particle(Particle::new(25., 1.0, 0.5, 0.106))
            .charge(-1)
            .cone_pt(25.)
            .dxy(0.01)
            .dz(0.02)
            .rel_iso(0.1)
            .sip3d(2.)
            .mva_tth(0.5)
            .jet_pt_ratio(0.8)
            .jet_btag_csv(0.5)
            .segment_compatibility(0.6)
            .passes_loose_id(true)
            .passes_medium_id(true)
            .build();
        assert!(!sel.accept(&bad_btag));
    }

    #[test]
    fn electron_tiers_are_monotone() {
        let electrons = vec![electron(30., 0.95), electron(30., 0.5)];
        let refs = as_refs(&electrons);
        let loose =
            CollectionSelector::new(ElectronSelectorLoose::new().unwrap());
        let fakeable = CollectionSelector::new(
            ElectronSelectorFakeable::for_era(Era::Era2017).unwrap(),
        );
        let tight = CollectionSelector::new(
            ElectronSelectorTight::for_era(Era::Era2017).unwrap(),
        );

        let loose_set = loose.select(&refs);
        let fakeable_set = fakeable.select(&loose_set);
        let tight_set = tight.select(&fakeable_set);

        assert_eq!(loose_set.len(), 2);
        assert_eq!(fakeable_set.len(), 2);
        assert_eq!(tight_set.len(), 1);
    }

    #[test]
    fn trigger_emulation_toggle() {
        let mut sel = ElectronSelectorFakeable::for_era(Era::Era2017).unwrap();
        let mut e = electron(30., 0.95);
        assert!(sel.accept(&e));
        // fails the shower-shape emulation when enabled
        e = RecoElectron::builder()
            .particle(Particle::new(30., 0.5, -1.0, 0.000511))
            .charge(1)
            .cone_pt(30.)
            .dxy(0.01)
            .dz(0.02)
            .rel_iso(0.1)
            .sip3d(2.)
            .mva_tth(0.95)
            .jet_pt_ratio(0.8)
            .jet_btag_csv(0.1)
            .mva_pog(0.8)
            .sigma_eta_eta(0.05)
            .h_over_e(0.05)
            .delta_eta_trk(0.005)
            .delta_phi_trk(0.02)
            .ooe_minus_oop(0.005)
            .n_lost_hits(0)
            .passes_conversion_veto(true)
            .build();
        assert!(!sel.accept(&e));
        sel.disable_trigger_emulation_cuts();
        assert!(sel.accept(&e));
    }
}
