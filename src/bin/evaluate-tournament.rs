/// Evaluate the tournament predictor against the synthetic workload suite.

use axon::*;
use axon::stats::BranchStats;
use axon::workload::{ standard_suite, BranchEvent };
use std::env;

fn run_test(events: &[BranchEvent], cfg: TournamentConfig) -> BranchStats {
    let mut p = cfg.build().unwrap();
    let mut stat = BranchStats::new();

    for event in events {
        let pred = p.predict(&event.query);
        if event.query.is_conditional() {
            stat.update_global(pred.outcome, event.outcome);
            stat.update_per_branch(event.query.pc, pred.outcome, event.outcome);
        }
        p.update(Resolution { outcome: event.outcome, tgt: event.tgt }).unwrap();
    }
    stat
}

fn main() {
    let seed = env::args().nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xa807);

    let cfg = TournamentConfig::default();
    println!("[*] TournamentPredictor, {} bits of predictor state", cfg.storage_bits());

    for (name, events) in standard_suite(seed) {
        let stat = run_test(&events, cfg);
        println!("[*] {}", name);
        println!("  Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
            stat.global_hits(),
            stat.global_brns(),
            stat.hit_rate() * 100.0,
            stat.global_miss()
        );

        for (pc, data) in stat.get_worst_branches(3) {
            println!("    {:#010x}: {:5}/{:5} hits, recent outcomes {:?}",
                pc, data.hits, data.occ, data.recent_outcomes(16));
        }
    }
}
