//! `recosel` implements the object-selection pipeline shared by
//! offline event-selection analyses on reconstructed collider data:
//! predicate-based tiered selection of leptons, hadronic taus and
//! jets, overlap removal between particle collections by angular
//! distance, and nearest-neighbour matching of reconstructed objects
//! to generator-level truth records, including the gen-matching of
//! hadronic top-quark decay triplets.
//!
//! # How to use
//!
//! Probably the best way to get started is to look at the demos,
//! starting with `demos/minimal.rs`.
//!
//! ## Most relevant modules
//!
//! - [prelude] exports a list of the most relevant classes and objects
//! - [pipeline] contains the per-event driver and lists the steps that
//!   are performed
//! - [select] for tiered selection of particle collections
//! - [clean] for overlap removal between collections
//! - [gen_match] for matching reconstructed objects to truth records
//! - [top_match] for gen-matching hadronic top-quark decay triplets
//! - [config] for run-time configuration
//!

/// Overlap removal between particle collections
pub mod clean;
/// Run-time configuration
pub mod config;
/// Angular distances
pub mod distance;
/// Matching of reconstructed objects to truth records
pub mod gen_match;
/// Generator-level particle records
pub mod gen_particle;
/// Four-vector class
pub mod four_vector;
/// Particle kinematics
pub mod particle;
/// Per-event object selection
pub mod pipeline;
/// Most important exports
pub mod prelude;
/// Reconstructed-object records
pub mod reco;
/// Tiered collection selection
pub mod select;
/// Gen-matching of hadronic top-quark decay triplets
pub mod top_match;

use lazy_static::lazy_static;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
lazy_static! {
    pub static ref VERSION_MAJOR: u32 =
        env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap();
    pub static ref VERSION_MINOR: u32 =
        env!("CARGO_PKG_VERSION_MINOR").parse().unwrap();
    pub static ref VERSION_PATCH: u32 =
        env!("CARGO_PKG_VERSION_PATCH").parse().unwrap();
}
