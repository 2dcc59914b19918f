use log::trace;
use noisy_float::prelude::*;

use crate::distance::{delta_r, Direction};
use crate::gen_particle::{GenIdx, GenParticle};
use crate::reco::{GenMatches, HasGenMatches};

/// Nearest-neighbour matching of reconstructed objects to truth records
///
/// Every reconstructed object is matched independently: the truth
/// particle with the smallest angular distance is attached if that
/// distance is below the threshold, otherwise the slot stays empty.
/// Several reconstructed objects may match the same truth particle.
///
/// The three truth flavors (lepton, hadronic tau, jet) are matched by
/// separate calls against separate truth collections and do not
/// exclude each other.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenMatcher {}

impl GenMatcher {
    pub fn new() -> Self {
        Self {}
    }

    /// Attach generator-lepton matches
    pub fn add_lepton_match<P>(
        &self,
        reco: &mut [P],
        truth: &[GenParticle],
        max_delta_r: f64,
    ) where
        P: HasGenMatches + Direction,
    {
        add_match(reco, truth, max_delta_r, |matches| &mut matches.lepton)
    }

    /// Attach generator-level hadronic-tau matches
    pub fn add_had_tau_match<P>(
        &self,
        reco: &mut [P],
        truth: &[GenParticle],
        max_delta_r: f64,
    ) where
        P: HasGenMatches + Direction,
    {
        add_match(reco, truth, max_delta_r, |matches| &mut matches.had_tau)
    }

    /// Attach generator-jet matches
    pub fn add_jet_match<P>(
        &self,
        reco: &mut [P],
        truth: &[GenParticle],
        max_delta_r: f64,
    ) where
        P: HasGenMatches + Direction,
    {
        add_match(reco, truth, max_delta_r, |matches| &mut matches.jet)
    }
}

fn add_match<P, F>(
    reco: &mut [P],
    truth: &[GenParticle],
    max_delta_r: f64,
    slot: F,
) where
    P: HasGenMatches + Direction,
    F: Fn(&mut GenMatches) -> &mut Option<GenIdx>,
{
    let max_delta_r = n64(max_delta_r);
    for rec in reco.iter_mut() {
        let nearest = truth
            .iter()
            .enumerate()
            .map(|(idx, gen)| (idx, delta_r(&*rec, gen)))
            .min_by_key(|&(_, dist)| dist);
        if let Some((idx, dist)) = nearest {
            if dist < max_delta_r {
                trace!("truth match at index {idx}, distance {dist}");
                *slot(rec.gen_matches_mut()) = Some(GenIdx(idx));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::reco::RecoJet;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn jet(pt: f64, eta: f64, phi: f64) -> RecoJet {
        RecoJet::builder()
            .particle(Particle::new(pt, eta, phi, 0.))
            .btag_csv(0.)
            .build()
    }

    fn gen_jet(eta: f64, phi: f64) -> GenParticle {
        GenParticle::new(45., eta, phi, 0., 21, 0.)
    }

    #[test]
    fn nearest_within_window() {
        log_init();
        let mut jets = vec![jet(50., 0.1, 0.0), jet(30., 2.0, 1.0)];
        let truth = vec![gen_jet(0.1, 0.05)];
        GenMatcher::new().add_jet_match(&mut jets, &truth, 0.3);

        assert_eq!(jets[0].gen_matches().jet, Some(GenIdx(0)));
        assert_eq!(jets[1].gen_matches().jet, None);
        // the other flavor slots stay untouched
        assert_eq!(jets[0].gen_matches().lepton, None);
    }

    #[test]
    fn independent_of_unrelated_truth() {
        log_init();
        let matcher = GenMatcher::new();

        let mut jets = vec![jet(50., 0.1, 0.0)];
        let near = gen_jet(0.1, 0.05);
        let far = gen_jet(3.0, -2.0);
        matcher.add_jet_match(&mut jets, &[near, far], 0.3);
        let with_far = jets[0].gen_matches().jet;

        let mut jets = vec![jet(50., 0.1, 0.0)];
        matcher.add_jet_match(&mut jets, &[near], 0.3);
        let without_far = jets[0].gen_matches().jet;

        assert_eq!(with_far, Some(GenIdx(0)));
        assert_eq!(without_far, Some(GenIdx(0)));
    }

    #[test]
    fn several_reco_may_share_one_truth() {
        log_init();
        let mut jets = vec![jet(50., 0.1, 0.0), jet(30., 0.15, 0.02)];
        let truth = vec![gen_jet(0.1, 0.05)];
        GenMatcher::new().add_jet_match(&mut jets, &truth, 0.3);

        assert_eq!(jets[0].gen_matches().jet, Some(GenIdx(0)));
        assert_eq!(jets[1].gen_matches().jet, Some(GenIdx(0)));
    }

    #[test]
    fn empty_truth_collection() {
        log_init();
        let mut jets = vec![jet(50., 0.1, 0.0)];
        GenMatcher::new().add_jet_match(&mut jets, &[], 0.3);
        assert_eq!(jets[0].gen_matches().jet, None);
    }

    #[test]
    fn flavor_slots_are_independent() {
        log_init();
        let mut jets = vec![jet(50., 0.1, 0.0)];
        let gen_leptons = vec![GenParticle::new(48., 0.1, 0.02, 0., 13, -1.)];
        let gen_jets = vec![gen_jet(0.12, -0.03)];
        let matcher = GenMatcher::new();
        matcher.add_lepton_match(&mut jets, &gen_leptons, 0.3);
        matcher.add_jet_match(&mut jets, &gen_jets, 0.5);

        assert_eq!(jets[0].gen_matches().lepton, Some(GenIdx(0)));
        assert_eq!(jets[0].gen_matches().jet, Some(GenIdx(0)));
    }
}
