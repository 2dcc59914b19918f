pub use crate::{
    clean::{remove_overlaps, Cleaner, OverlapVeto},
    config::SelectionConfig,
    distance::{delta_phi, delta_r, Direction},
    four_vector::FourVector,
    gen_match::GenMatcher,
    gen_particle::{GenIdx, GenParticle},
    particle::Particle,
    pipeline::{EventRecord, ObjectSelection, TruthRecord, WorkingSets},
    reco::{
        GenMatches, HasGenMatches, RecoElectron, RecoHadTau, RecoJet,
        RecoMuon,
    },
    select::{as_refs, CollectionSelector, Era, SelIndex, Selector},
    top_match::{
        classify_triplet, TopDecayTruth, TopHypothesis, TopologyTier,
        TripletMatch, TripletWindows,
    },
};
