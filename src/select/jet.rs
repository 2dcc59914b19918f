use serde::{Deserialize, Serialize};

use super::{Era, Selector};
use crate::reco::RecoJet;

/// Kinematic jet selection
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct JetSelector {
    pub min_pt: f64,
    pub max_abs_eta: f64,
}

impl Default for JetSelector {
    fn default() -> Self {
        Self {
            min_pt: 25.,
            max_abs_eta: 2.4,
        }
    }
}

impl Selector<RecoJet> for JetSelector {
    fn accept(&self, jet: &RecoJet) -> bool {
        jet.pt() >= self.min_pt && jet.abs_eta() <= self.max_abs_eta
    }
}

/// The (loose, medium) b-tag discriminant working points of an era
pub fn btag_working_points(era: Era) -> (f64, f64) {
    match era {
        Era::Era2016 => (0.460, 0.800),
        Era::Era2017 => (0.5803, 0.8484),
    }
}

/// Selection of b-tagged jets
///
/// The kinematic cuts are applied on top of the discriminant cut.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct JetSelectorBtag {
    pub kinematics: JetSelector,
    pub min_btag_csv: f64,
}

impl JetSelectorBtag {
    pub fn loose(era: Era) -> Self {
        let (loose, _) = btag_working_points(era);
        Self {
            kinematics: JetSelector::default(),
            min_btag_csv: loose,
        }
    }

    pub fn medium(era: Era) -> Self {
        let (_, medium) = btag_working_points(era);
        Self {
            kinematics: JetSelector::default(),
            min_btag_csv: medium,
        }
    }
}

impl Selector<RecoJet> for JetSelectorBtag {
    fn accept(&self, jet: &RecoJet) -> bool {
        self.kinematics.accept(jet) && jet.btag_csv() >= self.min_btag_csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    fn jet(pt: f64, eta: f64, btag: f64) -> RecoJet {
        RecoJet::builder()
            .particle(Particle::new(pt, eta, 0., 5.))
            .btag_csv(btag)
            .build()
    }

    #[test]
    fn kinematic_cuts() {
        let sel = JetSelector::default();
        assert!(sel.accept(&jet(30., 1.0, 0.)));
        // the pt cut is inclusive
        assert!(sel.accept(&jet(25., 1.0, 0.)));
        assert!(!sel.accept(&jet(20., 1.0, 0.)));
        assert!(!sel.accept(&jet(30., 3.0, 0.)));
    }

    #[test]
    fn btag_tiers_are_nested() {
        let loose = JetSelectorBtag::loose(Era::Era2016);
        let medium = JetSelectorBtag::medium(Era::Era2016);
        let j = jet(30., 1.0, 0.6);
        assert!(loose.accept(&j));
        assert!(!medium.accept(&j));
        let j = jet(30., 1.0, 0.9);
        assert!(loose.accept(&j));
        assert!(medium.accept(&j));
    }
}
