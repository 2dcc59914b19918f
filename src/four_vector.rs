use noisy_float::prelude::*;
use serde::{Deserialize, Serialize};

use crate::distance::{wrap_phi, Direction};

/// A basic four-vector
///
/// The zero component is the energy/time component. The remainder are
/// the spatial components
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
pub struct FourVector {
    pt: N64,
    p: [N64; 4],
}

impl FourVector {
    /// Construct a new four-vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct from transverse momentum, pseudorapidity, azimuth and mass
    pub fn from_pt_eta_phi_m(pt: N64, eta: N64, phi: N64, m: N64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let e = (m * m + px * px + py * py + pz * pz).sqrt();
        [e, px, py, pz].into()
    }

    /// The spatial norm \sqrt{\sum v_i^2} with i = 1,2,3
    pub fn spatial_norm(&self) -> N64 {
        self.spatial_norm_sq().sqrt()
    }

    /// The square \sum v_i^2 with i = 1,2,3 of the spatial norm
    pub fn spatial_norm_sq(&self) -> N64 {
        self.p.iter().skip(1).map(|e| *e * *e).sum()
    }

    /// The scalar transverse momentum
    pub fn pt(&self) -> N64 {
        self.pt
    }

    /// The pseudorapidity
    pub fn eta(&self) -> N64 {
        if self.pt > 0. {
            (self.p[3] / self.pt).asinh()
        } else if self.p[3] > 0. {
            n64(f64::INFINITY)
        } else if self.p[3] < 0. {
            n64(f64::NEG_INFINITY)
        } else {
            n64(0.)
        }
    }

    /// The azimuth, in (−π, π]
    pub fn phi(&self) -> N64 {
        if self.pt > 0. {
            wrap_phi(self.p[2].atan2(self.p[1]))
        } else {
            n64(0.)
        }
    }

    const fn len() -> usize {
        4
    }

    fn update_pt(&mut self) {
        self.pt = (self.p[1] * self.p[1] + self.p[2] * self.p[2]).sqrt();
    }

    /// The invariant mass \sqrt{v_0^2 - \sum v_i^2} with i = 1,2,3
    ///
    /// Truncated to zero for momenta that are lightlike up to a
    /// rounding error.
    pub fn m(&self) -> N64 {
        std::cmp::max(self.m_sq(), n64(0.)).sqrt()
    }

    /// The invariant mass square v_0^2 - \sum v_i^2 with i = 1,2,3
    pub fn m_sq(&self) -> N64 {
        self.p[0] * self.p[0] - self.spatial_norm_sq()
    }
}

impl std::convert::From<[N64; 4]> for FourVector {
    fn from(p: [N64; 4]) -> FourVector {
        let mut res = FourVector {
            p,
            pt: std::default::Default::default(),
        };
        res.update_pt();
        res
    }
}

impl std::ops::Index<usize> for FourVector {
    type Output = N64;

    fn index(&self, i: usize) -> &Self::Output {
        &self.p[i]
    }
}

impl std::ops::AddAssign for FourVector {
    fn add_assign(&mut self, rhs: FourVector) {
        for i in 0..Self::len() {
            self.p[i] += rhs[i]
        }
        self.update_pt();
    }
}

impl std::ops::SubAssign for FourVector {
    fn sub_assign(&mut self, rhs: FourVector) {
        for i in 0..Self::len() {
            self.p[i] -= rhs[i]
        }
        self.update_pt();
    }
}

impl std::ops::Add for FourVector {
    type Output = Self;

    fn add(mut self, rhs: FourVector) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::Sub for FourVector {
    type Output = Self;

    fn sub(mut self, rhs: FourVector) -> Self::Output {
        self -= rhs;
        self
    }
}

impl Direction for FourVector {
    fn pseudorapidity(&self) -> N64 {
        self.eta()
    }

    fn azimuth(&self) -> N64 {
        self.phi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_eta_phi_m_round_trip() {
        let p = FourVector::from_pt_eta_phi_m(
            n64(50.),
            n64(1.2),
            n64(-2.1),
            n64(4.8),
        );
        assert!((p.pt() - n64(50.)).abs() < 1e-9);
        assert!((p.eta() - n64(1.2)).abs() < 1e-9);
        assert!((p.phi() + n64(2.1)).abs() < 1e-9);
        assert!((p.m() - n64(4.8)).abs() < 1e-9);
    }

    #[test]
    fn invariant_mass_of_sum() {
        // two massless back-to-back momenta with pT = 40
        let p1 = FourVector::from_pt_eta_phi_m(n64(40.), n64(0.), n64(0.), n64(0.));
        let p2 = FourVector::from_pt_eta_phi_m(
            n64(40.),
            n64(0.),
            n64(std::f64::consts::PI),
            n64(0.),
        );
        assert!(((p1 + p2).m() - n64(80.)).abs() < 1e-9);
        assert!(p1.m() < 1e-9);
    }
}
