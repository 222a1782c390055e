//! Implementations of different branch predictors.

pub mod counter;
pub mod index;
pub mod simple;
pub mod table;
pub mod tournament;

pub use counter::*;
pub use index::*;
pub use simple::*;
pub use table::*;
pub use tournament::*;

use crate::branch::{ BranchQuery, Outcome, Prediction, Resolution };
use crate::error::ProtocolError;

/// Interface to a "trivial" predictor that guesses an outcome without
/// accepting feedback from the rest of the machine.
pub trait SimplePredictor {
    fn name(&self) -> &'static str;
    fn predict(&self) -> Outcome;
}

/// Interface to a predictor with some internal state which is only subject to
/// change by the correct branch outcome.
pub trait StatefulPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the current predicted outcome.
    fn predict(&self) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, outcome: Outcome);
}

/// Interface to a predictor driven by an external pipeline or trace model.
///
/// The driver issues one `predict()` per branch and resolves it with exactly
/// one `update()` before predicting the next branch; a single prediction is
/// outstanding at any time. Issuing `predict()` again before resolving
/// silently replaces the outstanding prediction.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Issue a direction prediction for a branch.
    fn predict(&mut self, query: &BranchQuery) -> Prediction;

    /// Resolve the outstanding prediction with the actual branch outcome.
    fn update(&mut self, res: Resolution) -> Result<(), ProtocolError>;
}
