use serde::{Deserialize, Serialize};

use super::Selector;
use crate::reco::RecoHadTau;

/// Hadronic-tau identification tier
///
/// The three working points (`loose`, `fakeable`, `tight`) only differ
/// in the identification and discrimination thresholds, so chaining
/// them yields monotone subsets.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct HadTauSelector {
    pub min_pt: f64,
    pub max_abs_eta: f64,
    pub max_abs_dxy: f64,
    pub max_abs_dz: f64,
    pub require_decay_mode: bool,
    /// Minimum number of identification MVA working points passed
    pub min_id_mva: i32,
    pub min_anti_electron: i32,
    pub min_anti_muon: i32,
}

impl HadTauSelector {
    pub fn loose() -> Self {
        Self {
            min_pt: 20.,
            max_abs_eta: 2.3,
            max_abs_dxy: 1000.,
            max_abs_dz: 0.2,
            require_decay_mode: true,
            min_id_mva: 1,
            min_anti_electron: 0,
            min_anti_muon: 0,
        }
    }

    pub fn fakeable() -> Self {
        Self {
            min_id_mva: 2,
            min_anti_electron: 1,
            min_anti_muon: 1,
            ..Self::loose()
        }
    }

    pub fn tight() -> Self {
        Self {
            min_id_mva: 3,
            min_anti_electron: 2,
            min_anti_muon: 1,
            ..Self::loose()
        }
    }
}

impl Selector<RecoHadTau> for HadTauSelector {
    fn accept(&self, tau: &RecoHadTau) -> bool {
        tau.pt() >= self.min_pt
            && tau.abs_eta() <= self.max_abs_eta
            && tau.dxy().abs() <= self.max_abs_dxy
            && tau.dz().abs() <= self.max_abs_dz
            && (tau.decay_mode_finding() || !self.require_decay_mode)
            && tau.id_mva() >= self.min_id_mva
            && tau.anti_electron() >= self.min_anti_electron
            && tau.anti_muon() >= self.min_anti_muon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::select::{as_refs, CollectionSelector};

    fn tau(pt: f64, id_mva: i32, anti_e: i32, anti_mu: i32) -> RecoHadTau {
        RecoHadTau::builder()
            .particle(Particle::new(pt, 0.5, 0., 1.777))
            .charge(-1)
            .dxy(0.01)
            .dz(0.05)
            .decay_mode_finding(true)
            .id_mva(id_mva)
            .raw_mva(0.9)
            .anti_electron(anti_e)
            .anti_muon(anti_mu)
            .build()
    }

    #[test]
    fn tiers_are_monotone() {
        let taus = vec![
            tau(25., 3, 2, 1),
            tau(25., 2, 1, 1),
            tau(25., 1, 0, 0),
            tau(15., 3, 2, 1),
        ];
        let refs = as_refs(&taus);
        let loose = CollectionSelector::new(HadTauSelector::loose());
        let fakeable = CollectionSelector::new(HadTauSelector::fakeable());
        let tight = CollectionSelector::new(HadTauSelector::tight());

        let loose_set = loose.select(&refs);
        let fakeable_set = fakeable.select(&loose_set);
        let tight_set = tight.select(&fakeable_set);

        assert_eq!(loose_set.len(), 3);
        assert_eq!(fakeable_set.len(), 2);
        assert_eq!(tight_set.len(), 1);
        assert!(fakeable_set.iter().all(|t| loose_set.contains(t)));
        assert!(tight_set.iter().all(|t| fakeable_set.contains(t)));
    }
}
