/// Evaluate the baseline predictors against the synthetic workload suite.

use axon::*;
use axon::stats::BranchStats;
use axon::workload::{ standard_suite, BranchEvent };
use std::env;

fn run_test(events: &[BranchEvent], p: impl SimplePredictor) {
    let mut stat = BranchStats::new();

    for event in events.iter().filter(|e| e.query.is_conditional()) {
        stat.update_global(p.predict(), event.outcome);
    }

    println!("  {:20} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
        p.name(),
        stat.global_hits(),
        stat.global_brns(),
        stat.hit_rate() * 100.0,
        stat.global_miss()
    );
}

fn main() {
    let seed = env::args().nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xa807);

    for (name, events) in standard_suite(seed) {
        println!("[*] {}", name);
        run_test(&events, RandomPredictor);
        run_test(&events, StaticPredictor::Taken);
        run_test(&events, StaticPredictor::NotTaken);
    }
}
