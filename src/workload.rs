//! Synthetic branch workloads for exercising predictors.
//!
//! These stand in for a traced program: a stream of executed branches in
//! program order, each with the address/kind visible at fetch time and the
//! outcome the machine eventually resolved.

use rand::prelude::*;
use crate::branch::{ BranchKind, BranchQuery, Outcome };

/// A single executed branch: what the front-end sees, and how the branch
/// actually resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchEvent {
    pub query: BranchQuery,
    pub outcome: Outcome,
    pub tgt: usize,
}

/// Builds a branch event stream in program order.
pub struct WorkloadBuilder {
    events: Vec<BranchEvent>,
    rng: StdRng,
}

impl WorkloadBuilder {
    /// Create a builder; `seed` fixes the stream produced by the random
    /// emitters, so a workload is reproducible across runs.
    pub fn new(seed: u64) -> Self {
        Self {
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn push(&mut self, pc: usize, kind: BranchKind, outcome: Outcome, tgt: usize) {
        self.events.push(BranchEvent {
            query: BranchQuery::new(pc, kind),
            outcome,
            tgt,
        });
    }

    /// A loop's backward branch: taken `trips - 1` times, then not-taken
    /// once, repeated for `iterations` executions of the whole loop.
    pub fn loop_branch(&mut self, pc: usize, tgt: usize, trips: usize, iterations: usize) {
        for _ in 0..iterations {
            for _ in 1..trips {
                self.push(pc, BranchKind::DirectBranch, Outcome::T, tgt);
            }
            self.push(pc, BranchKind::DirectBranch, Outcome::N, tgt);
        }
    }

    /// A data-dependent branch taken with probability `p`, executed `n`
    /// times.
    pub fn biased_branch(&mut self, pc: usize, tgt: usize, p: f64, n: usize) {
        for _ in 0..n {
            let outcome = Outcome::from_bool(self.rng.gen_bool(p));
            self.push(pc, BranchKind::DirectBranch, outcome, tgt);
        }
    }

    /// A branch flipping direction every execution, `n` times.
    pub fn alternating_branch(&mut self, pc: usize, tgt: usize, n: usize) {
        for i in 0..n {
            let outcome = Outcome::from_bool(i % 2 == 0);
            self.push(pc, BranchKind::DirectBranch, outcome, tgt);
        }
    }

    /// An unconditional direct jump, executed `n` times.
    pub fn jump(&mut self, pc: usize, tgt: usize, n: usize) {
        for _ in 0..n {
            self.push(pc, BranchKind::DirectJump, Outcome::T, tgt);
        }
    }

    /// A call/return pair, executed `n` times.
    pub fn call_return(&mut self, call_pc: usize, callee: usize, n: usize) {
        for _ in 0..n {
            self.push(call_pc, BranchKind::DirectCall, Outcome::T, callee);
            self.push(callee + 0x40, BranchKind::Return, Outcome::T, call_pc + 4);
        }
    }

    pub fn build(self) -> Vec<BranchEvent> {
        self.events
    }
}

/// The workload suite the evaluation bins run: one behavior per entry, plus
/// a mixed stream shaped like a small program.
pub fn standard_suite(seed: u64) -> Vec<(&'static str, Vec<BranchEvent>)> {
    let mut suite = Vec::new();

    let mut b = WorkloadBuilder::new(seed);
    b.loop_branch(0x0000_1000, 0x0000_0f80, 8, 512);
    suite.push(("inner-loop", b.build()));

    let mut b = WorkloadBuilder::new(seed);
    b.biased_branch(0x0000_2000, 0x0000_2100, 0.85, 4096);
    suite.push(("biased-85", b.build()));

    let mut b = WorkloadBuilder::new(seed);
    b.alternating_branch(0x0000_3000, 0x0000_3080, 4096);
    suite.push(("alternating", b.build()));

    let mut b = WorkloadBuilder::new(seed);
    for _ in 0..256 {
        b.loop_branch(0x0040_1000, 0x0040_0f80, 6, 1);
        b.biased_branch(0x0040_2000, 0x0040_2100, 0.7, 4);
        b.call_return(0x0040_2010, 0x0041_0000, 1);
        b.biased_branch(0x0040_2020, 0x0040_2f00, 0.3, 2);
        b.jump(0x0040_2030, 0x0040_1000, 1);
    }
    suite.push(("mixed", b.build()));

    suite
}
