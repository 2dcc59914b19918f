use noisy_float::prelude::*;
use serde::{Deserialize, Serialize};

use crate::distance::{wrap_phi, Direction};
use crate::four_vector::FourVector;

/// Kinematic record of a single particle
///
/// Immutable after construction. The azimuth is stored wrapped into
/// (−π, π].
#[derive(
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Clone,
    Copy,
    Default,
)]
pub struct Particle {
    pt: N64,
    eta: N64,
    phi: N64,
    mass: N64,
}

impl Particle {
    /// Construct from transverse momentum, pseudorapidity, azimuth and mass
    ///
    /// # Panics
    ///
    /// Panics if the transverse momentum or the mass is negative.
    pub fn new(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        assert!(pt >= 0., "negative transverse momentum: {pt}");
        assert!(mass >= 0., "negative mass: {mass}");
        Self {
            pt: n64(pt),
            eta: n64(eta),
            phi: wrap_phi(n64(phi)),
            mass: n64(mass),
        }
    }

    /// The scalar transverse momentum
    pub fn pt(&self) -> N64 {
        self.pt
    }

    /// The pseudorapidity
    pub fn eta(&self) -> N64 {
        self.eta
    }

    /// The absolute value of the pseudorapidity
    pub fn abs_eta(&self) -> N64 {
        self.eta.abs()
    }

    /// The azimuth, in (−π, π]
    pub fn phi(&self) -> N64 {
        self.phi
    }

    /// The mass
    pub fn mass(&self) -> N64 {
        self.mass
    }

    /// The four-momentum
    pub fn p4(&self) -> FourVector {
        FourVector::from_pt_eta_phi_m(self.pt, self.eta, self.phi, self.mass)
    }
}

impl Direction for Particle {
    fn pseudorapidity(&self) -> N64 {
        self.eta
    }

    fn azimuth(&self) -> N64 {
        self.phi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn azimuth_is_wrapped() {
        let p = Particle::new(25., 0.4, 4., 0.);
        assert!(p.phi() <= std::f64::consts::PI);
        let wrapped = n64(4. - 2. * std::f64::consts::PI);
        assert!((p.phi() - wrapped).abs() < 1e-12);
    }

    #[test]
    fn four_momentum_matches_kinematics() {
        let p = Particle::new(30., -0.7, 1.2, 1.777);
        let p4 = p.p4();
        assert!((p4.pt() - p.pt()).abs() < 1e-9);
        assert!((p4.eta() - p.eta()).abs() < 1e-9);
        assert!((p4.phi() - p.phi()).abs() < 1e-9);
        assert!((p4.m() - p.mass()).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn rejects_negative_pt() {
        let _ = Particle::new(-1., 0., 0., 0.);
    }
}
