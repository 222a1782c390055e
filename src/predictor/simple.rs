//! Baseline predictors with no learned state.

use crate::branch::Outcome;
use crate::predictor::SimplePredictor;

/// A predictor fixed to one direction, in either flavor.
///
/// `Taken` is the classic static policy (and what a hybrid predictor falls
/// back to for unconditional control flow); `NotTaken` mostly exists to
/// bound a workload's bias from the other side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticPredictor {
    Taken,
    NotTaken,
}

impl SimplePredictor for StaticPredictor {
    fn name(&self) -> &'static str {
        match self {
            Self::Taken => "StaticTaken",
            Self::NotTaken => "StaticNotTaken",
        }
    }
    fn predict(&self) -> Outcome {
        match self {
            Self::Taken => Outcome::T,
            Self::NotTaken => Outcome::N,
        }
    }
}

/// A simple predictor with no state: randomly predict an outcome.
pub struct RandomPredictor;
impl SimplePredictor for RandomPredictor {
    fn name(&self) -> &'static str { "RandomPredictor" }
    fn predict(&self) -> Outcome { rand::random::<bool>().into() }
}
