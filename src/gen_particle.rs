use noisy_float::prelude::*;
use particle_id::ParticleID;
use serde::{Deserialize, Serialize};

use crate::distance::Direction;
use crate::four_vector::FourVector;
use crate::particle::Particle;

/// A generator-level particle: kinematics plus PDG identity and charge
///
/// Produced by the truth reader once per event and owned by the
/// per-event truth collection. Reconstructed objects refer to entries
/// of that collection through [GenIdx] handles.
#[derive(Deserialize, Serialize, PartialEq, Debug, Clone, Copy)]
pub struct GenParticle {
    particle: Particle,
    pdg_id: ParticleID,
    charge: f64,
}

impl GenParticle {
    pub fn new(
        pt: f64,
        eta: f64,
        phi: f64,
        mass: f64,
        pdg_id: i32,
        charge: f64,
    ) -> Self {
        Self {
            particle: Particle::new(pt, eta, phi, mass),
            pdg_id: ParticleID::new(pdg_id),
            charge,
        }
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn pt(&self) -> N64 {
        self.particle.pt()
    }

    pub fn eta(&self) -> N64 {
        self.particle.eta()
    }

    pub fn phi(&self) -> N64 {
        self.particle.phi()
    }

    pub fn mass(&self) -> N64 {
        self.particle.mass()
    }

    pub fn pdg_id(&self) -> ParticleID {
        self.pdg_id
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn p4(&self) -> FourVector {
        self.particle.p4()
    }
}

impl Direction for GenParticle {
    fn pseudorapidity(&self) -> N64 {
        self.particle.eta()
    }

    fn azimuth(&self) -> N64 {
        self.particle.phi()
    }
}

/// Handle to a matched truth particle
///
/// Indexes into the truth collection that was passed to the gen
/// matcher. Truth collections are rebuilt for every event, so a handle
/// is only meaningful for the event it was created in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GenIdx(pub(crate) usize);

impl GenIdx {
    /// The position in the truth collection
    pub fn index(self) -> usize {
        self.0
    }

    /// Look up the matched truth particle
    ///
    /// # Panics
    ///
    /// Panics if `truth` is not the collection this handle was created
    /// from and is too short, which indicates a broken caller contract.
    pub fn resolve(self, truth: &[GenParticle]) -> &GenParticle {
        &truth[self.0]
    }
}
