// gen-matching of a hadronic top-quark decay triplet
// run with `cargo run --example top_truth`
use std::error::Error;

use noisy_float::prelude::*;
use recosel::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // truth record of one hadronically decaying top quark
    let w_daughter1 = GenParticle::new(60., 0.2, 0.5, 0., 2, 2. / 3.);
    let w_daughter2 = GenParticle::new(55., -0.4, 2.2, 0., -1, 1. / 3.);
    let b_quark = GenParticle::new(70., -0.1, -1.0, 4.8, 5, -1. / 3.);
    let w_p4 = w_daughter1.p4() + w_daughter2.p4();
    let w_boson = GenParticle::new(
        w_p4.pt().raw(),
        w_p4.eta().raw(),
        w_p4.phi().raw(),
        w_p4.m().raw(),
        24,
        1.,
    );
    let top_p4 = b_quark.p4() + w_p4;
    let top_quark = GenParticle::new(
        top_p4.pt().raw(),
        top_p4.eta().raw(),
        top_p4.phi().raw(),
        top_p4.m().raw(),
        6,
        2. / 3.,
    );

    let truth = TopDecayTruth {
        top_quarks: std::slice::from_ref(&top_quark),
        b_quarks: std::slice::from_ref(&b_quark),
        w_bosons: std::slice::from_ref(&w_boson),
        w_daughters: &[w_daughter1, w_daughter2],
    };

    // a resolved candidate triplet, slightly off the truth directions
    let rec_b = FourVector::from_pt_eta_phi_m(
        n64(72.),
        n64(-0.12),
        n64(-1.02),
        n64(5.),
    );
    let rec_w1 = FourVector::from_pt_eta_phi_m(
        n64(58.),
        n64(0.22),
        n64(0.48),
        n64(3.),
    );
    let rec_w2 = FourVector::from_pt_eta_phi_m(
        n64(54.),
        n64(-0.41),
        n64(2.24),
        n64(3.),
    );

    // three resolved jets, no large-radius candidates
    let tier = TopologyTier::classify(0, 0, 3).expect("resolved topology");
    let windows = TripletWindows::for_tier(tier);

    let result = classify_triplet(
        &rec_b,
        &rec_w1,
        &rec_w2,
        &truth,
        TopHypothesis::Top,
        &windows,
        None,
    )?;

    println!("topology tier: {tier}");
    println!("b-jet matched: {}", result.b_matched);
    println!("triplet matched: {}", result.triplet_matched);
    if let Some(pt) = result.gen_top_pt {
        println!("truth top pT: {pt:.1}");
    }

    // the same candidate tested against the antitop side finds no
    // truth record and reports an error instead of guessing
    let antitop = classify_triplet(
        &rec_b,
        &rec_w1,
        &rec_w2,
        &truth,
        TopHypothesis::AntiTop,
        &windows,
        None,
    );
    println!("antitop hypothesis: {}", antitop.unwrap_err());

    Ok(())
}
