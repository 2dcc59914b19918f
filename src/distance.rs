use std::f64::consts::PI;

use noisy_float::prelude::*;

/// Direction of a particle in the detector frame
///
/// Everything that carries a pseudorapidity and an azimuth can take
/// part in angular-distance computations: reconstructed objects,
/// generator-level records, bare four-vectors.
pub trait Direction {
    /// Pseudorapidity η
    fn pseudorapidity(&self) -> N64;

    /// Azimuth φ, in (−π, π]
    fn azimuth(&self) -> N64;
}

impl<D: Direction + ?Sized> Direction for &D {
    fn pseudorapidity(&self) -> N64 {
        (*self).pseudorapidity()
    }

    fn azimuth(&self) -> N64 {
        (*self).azimuth()
    }
}

/// Wrap an azimuth into the interval (−π, π]
pub fn wrap_phi(mut phi: N64) -> N64 {
    let two_pi = n64(2. * PI);
    while phi > PI {
        phi -= two_pi;
    }
    while phi <= -PI {
        phi += two_pi;
    }
    phi
}

/// Difference in azimuth, wrapped into (−π, π]
pub fn delta_phi(phi1: N64, phi2: N64) -> N64 {
    wrap_phi(phi1 - phi2)
}

/// The angular distance ΔR = √(Δη² + Δφ²) between two directions
pub fn delta_r<P, Q>(p: &P, q: &Q) -> N64
where
    P: Direction + ?Sized,
    Q: Direction + ?Sized,
{
    let deta = p.pseudorapidity() - q.pseudorapidity();
    let dphi = delta_phi(p.azimuth(), q.azimuth());
    (deta * deta + dphi * dphi).sqrt()
}
