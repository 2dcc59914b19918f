use log::trace;
use noisy_float::prelude::*;

use crate::distance::{delta_r, Direction};

/// Overlap removal between particle collections
///
/// A candidate survives if its angular distance to every particle of
/// the veto collection is at least the configured threshold. A
/// distance exactly equal to the threshold does not count as an
/// overlap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Cleaner {
    min_delta_r: N64,
}

impl Cleaner {
    pub fn new(min_delta_r: f64) -> Self {
        Self {
            min_delta_r: n64(min_delta_r),
        }
    }

    /// Remove candidates overlapping with any of `overlaps`
    ///
    /// Vetoes against several collections with the same threshold are
    /// chained calls, applied in decreasing order of priority.
    pub fn clean<'a, P, O>(
        &self,
        particles: Vec<&'a P>,
        overlaps: &[&O],
    ) -> Vec<&'a P>
    where
        P: Direction,
        O: Direction + ?Sized,
    {
        let mut particles = particles;
        particles.retain(|p| {
            let keep = overlaps
                .iter()
                .all(|o| delta_r(*p, o) >= self.min_delta_r);
            if !keep {
                trace!(
                    "removing candidate at (eta, phi) = ({}, {})",
                    p.pseudorapidity(),
                    p.azimuth()
                );
            }
            keep
        });
        particles
    }
}

/// One step of an ordered overlap-removal sequence
pub struct OverlapVeto<'a> {
    directions: Vec<&'a dyn Direction>,
    min_delta_r: N64,
}

impl<'a> OverlapVeto<'a> {
    pub fn new<T: Direction>(overlaps: &[&'a T], min_delta_r: f64) -> Self {
        Self {
            directions: overlaps
                .iter()
                .map(|&o| o as &dyn Direction)
                .collect(),
            min_delta_r: n64(min_delta_r),
        }
    }
}

/// Apply a sequence of overlap vetoes, in the given order
///
/// Each veto can carry its own angular-distance threshold. The output
/// of one veto is the candidate list of the next.
pub fn remove_overlaps<'a, P: Direction>(
    particles: Vec<&'a P>,
    vetoes: &[OverlapVeto<'_>],
) -> Vec<&'a P> {
    let mut particles = particles;
    for veto in vetoes {
        particles.retain(|p| {
            veto.directions
                .iter()
                .all(|o| delta_r(*p, o) >= veto.min_delta_r)
        });
    }
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn particles() -> Vec<Particle> {
        vec![
            Particle::new(50., 0.1, 0.0, 0.),
            Particle::new(30., 2.0, 1.0, 0.),
            Particle::new(20., -1.5, -2.0, 0.),
        ]
    }

    #[test]
    fn never_grows() {
        log_init();
        let ps = particles();
        let veto = [Particle::new(10., 0.1, 0.05, 0.)];
        let cleaner = Cleaner::new(0.4);
        let refs: Vec<_> = ps.iter().collect();
        let vrefs: Vec<_> = veto.iter().collect();
        let cleaned = cleaner.clean(refs.clone(), &vrefs);
        assert!(cleaned.len() <= refs.len());
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn idempotent() {
        log_init();
        let ps = particles();
        let veto = [Particle::new(10., 2.0, 1.1, 0.)];
        let cleaner = Cleaner::new(0.4);
        let refs: Vec<_> = ps.iter().collect();
        let vrefs: Vec<_> = veto.iter().collect();
        let once = cleaner.clean(refs, &vrefs);
        let twice = cleaner.clean(once.clone(), &vrefs);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_inputs() {
        log_init();
        let ps = particles();
        let cleaner = Cleaner::new(0.4);
        let no_veto: Vec<&Particle> = Vec::new();
        let refs: Vec<_> = ps.iter().collect();
        assert_eq!(cleaner.clean(refs.clone(), &no_veto), refs);
        let empty: Vec<&Particle> = Vec::new();
        let vrefs: Vec<_> = ps.iter().collect();
        assert!(cleaner.clean(empty, &vrefs).is_empty());
    }

    #[test]
    fn boundary_distance_survives() {
        log_init();
        // veto exactly 0.3 away in eta
        let electron = [Particle::new(25., 0.0, 0.0, 0.)];
        let muon = [Particle::new(25., 0.3, 0.0, 0.)];
        let cleaner = Cleaner::new(0.3);
        let erefs: Vec<_> = electron.iter().collect();
        let mrefs: Vec<_> = muon.iter().collect();
        let cleaned = cleaner.clean(erefs, &mrefs);
        assert_eq!(cleaned.len(), 1);
        // anything closer is removed
        let close = [Particle::new(25., 0.29, 0.0, 0.)];
        let crefs: Vec<_> = close.iter().collect();
        let erefs: Vec<_> = electron.iter().collect();
        assert!(cleaner.clean(erefs, &crefs).is_empty());
    }

    #[test]
    fn veto_sequence_applies_in_order() {
        log_init();
        let ps = particles();
        let muons = [Particle::new(10., 0.1, 0.1, 0.)];
        let taus = [Particle::new(10., -1.5, -1.9, 0.)];
        let refs: Vec<_> = ps.iter().collect();
        let mrefs: Vec<_> = muons.iter().collect();
        let trefs: Vec<_> = taus.iter().collect();
        let cleaned = remove_overlaps(
            refs,
            &[OverlapVeto::new(&mrefs, 0.4), OverlapVeto::new(&trefs, 0.3)],
        );
        // first and third candidate each overlap one veto collection
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0], &ps[1]);
    }
}
