// minimal example for the object-selection pipeline
// run with `cargo run --example minimal`
// set the environment variable `RUST_LOG=debug` for diagnostic output
use std::error::Error;

use recosel::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    // initialise logging from the RUST_LOG environment variable
    env_logger::init();

    // Thresholds for the selection, overlap removal and gen matching.
    // `SelectionConfig::from_yaml` reads the same structure from a
    // configuration file.
    let config = SelectionConfig::for_era(Era::Era2017);

    // The pipeline object holds all configuration-time thresholds and
    // is reused for every event
    let selection = ObjectSelection::new(&config)?;

    // One event, as the reader layer would populate it
    let mut event: EventRecord = serde_yaml::from_str(EVENT)?;
    let truth = event.truth.clone();

    let sets = selection.run(&mut event);

    println!(
        "muons: {} loose, {} fakeable, {} tight",
        sets.muons.loose.len(),
        sets.muons.fakeable.len(),
        sets.muons.tight.len(),
    );
    println!(
        "electrons: {} loose, {} fakeable, {} tight",
        sets.electrons.loose.len(),
        sets.electrons.fakeable.len(),
        sets.electrons.tight.len(),
    );
    println!(
        "hadronic taus: {} loose, {} fakeable, {} tight",
        sets.had_taus.loose.len(),
        sets.had_taus.fakeable.len(),
        sets.had_taus.tight.len(),
    );
    println!(
        "jets: {} cleaned, {} selected, {} b-tagged (medium)",
        sets.jets.cleaned.len(),
        sets.jets.selected.len(),
        sets.jets.btag_medium.len(),
    );

    for muon in &sets.muons.tight {
        if let (Some(gen), Some(truth)) =
            (muon.gen_matches().lepton, truth.as_ref())
        {
            let gen = gen.resolve(&truth.leptons);
            println!(
                "tight muon with pT = {:.1} matches truth lepton with pT = {:.1}",
                muon.pt(),
                gen.pt()
            );
        }
    }

    Ok(())
}

const EVENT: &str = r#"
muons:
  - particle: { pt: 25.0, eta: 1.0, phi: 0.5, mass: 0.106 }
    charge: -1
    cone_pt: 25.0
    dxy: 0.01
    dz: 0.02
    rel_iso: 0.1
    sip3d: 2.0
    mva_tth: 0.95
    jet_pt_ratio: 0.8
    jet_btag_csv: 0.1
    segment_compatibility: 0.6
    passes_loose_id: true
    passes_medium_id: true
electrons:
  - particle: { pt: 30.0, eta: 0.5, phi: -1.0, mass: 0.000511 }
    charge: 1
    cone_pt: 30.0
    dxy: 0.01
    dz: 0.02
    rel_iso: 0.1
    sip3d: 2.0
    mva_tth: 0.95
    jet_pt_ratio: 0.8
    jet_btag_csv: 0.1
    mva_pog: 0.8
    sigma_eta_eta: 0.009
    h_over_e: 0.05
    delta_eta_trk: 0.005
    delta_phi_trk: 0.02
    ooe_minus_oop: 0.005
    n_lost_hits: 0
    passes_conversion_veto: true
had_taus:
  - particle: { pt: 40.0, eta: 0.5, phi: 0.0, mass: 1.777 }
    charge: -1
    dxy: 0.01
    dz: 0.05
    decay_mode_finding: true
    id_mva: 3
    raw_mva: 0.9
    anti_electron: 2
    anti_muon: 1
  - particle: { pt: 35.0, eta: -0.5, phi: 1.5, mass: 1.777 }
    charge: 1
    dxy: 0.01
    dz: 0.05
    decay_mode_finding: true
    id_mva: 3
    raw_mva: 0.9
    anti_electron: 2
    anti_muon: 1
jets:
  - particle: { pt: 60.0, eta: 1.0, phi: 0.55, mass: 5.0 }
    btag_csv: 0.2
  - particle: { pt: 45.0, eta: -1.0, phi: 2.0, mass: 5.0 }
    btag_csv: 0.9
  - particle: { pt: 40.0, eta: 3.0, phi: 0.0, mass: 5.0 }
    btag_csv: 0.1
truth:
  leptons:
    - particle: { pt: 24.0, eta: 1.0, phi: 0.52, mass: 0.106 }
      pdg_id: 13
      charge: -1.0
  had_taus:
    - particle: { pt: 38.0, eta: 0.5, phi: 0.02, mass: 1.777 }
      pdg_id: 15
      charge: -1.0
  jets:
    - particle: { pt: 44.0, eta: -1.0, phi: 2.05, mass: 5.0 }
      pdg_id: 21
      charge: 0.0
"#;
