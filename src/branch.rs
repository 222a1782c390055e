//! Types for representing branches and branch outcomes.

use bitvec::prelude::*;

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1,
}

impl Outcome {
    pub fn vec_from_bitvec(bits: &BitVec) -> Vec<Self> {
        bits.iter().map(|b| (*b).into()).collect()
    }
    pub fn from_bool(b: bool) -> Self {
        match b {
            true => Self::T,
            false => Self::N,
        }
    }
    pub fn is_taken(self) -> bool {
        self == Self::T
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N,
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}

/// Representing different kinds of branch/control-flow instructions.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BranchKind {
    /// A direct conditional branch instruction.
    DirectBranch = BranchFlags::BRN_FLAG,

    /// A direct unconditional jump instruction.
    DirectJump   = BranchFlags::JMP_FLAG,

    /// An indirect unconditional jump instruction.
    IndirectJump = BranchFlags::JMP_FLAG | BranchFlags::IND_FLAG,

    /// A direct procedure call instruction.
    DirectCall   = BranchFlags::CALL_FLAG,

    /// An indirect procedure call instruction.
    IndirectCall = BranchFlags::CALL_FLAG | BranchFlags::IND_FLAG,

    /// A return instruction.
    Return       = BranchFlags::RET_FLAG | BranchFlags::IND_FLAG,
}

/// Flag bits describing a control-flow instruction.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BranchFlags(pub u32);
impl BranchFlags {
    const BRN_FLAG: u32  = (1 << 0);
    const JMP_FLAG: u32  = (1 << 1);
    const CALL_FLAG: u32 = (1 << 2);
    const RET_FLAG: u32  = (1 << 3);
    const IND_FLAG: u32  = (1 << 4);

    pub fn new(kind: BranchKind) -> Self {
        Self(kind as u32)
    }

    pub fn is_brn(&self) -> bool { self.0 & Self::BRN_FLAG != 0 }
    pub fn is_jmp(&self) -> bool { self.0 & Self::JMP_FLAG != 0 }
    pub fn is_call(&self) -> bool { self.0 & Self::CALL_FLAG != 0 }
    pub fn is_ret(&self) -> bool { self.0 & Self::RET_FLAG != 0 }
    pub fn is_direct(&self) -> bool { self.0 & Self::IND_FLAG == 0 }
    pub fn is_indirect(&self) -> bool { self.0 & Self::IND_FLAG != 0 }
}

/// A branch presented for prediction: the program counter value and the
/// kind of control-flow instruction, known at fetch time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BranchQuery {
    /// The program counter value for this branch
    pub pc: usize,

    pub flags: BranchFlags,
}
impl BranchQuery {
    pub fn new(pc: usize, kind: BranchKind) -> Self {
        Self { pc, flags: BranchFlags::new(kind) }
    }

    /// Returns 'true' if this is a conditional instruction.
    pub fn is_conditional(&self) -> bool {
        self.flags.is_brn()
    }

    /// Returns 'true' if this is an unconditional instruction.
    pub fn is_unconditional(&self) -> bool {
        !self.flags.is_brn()
    }
}

/// The resolved result of a branch, fed back to a predictor after the
/// machine evaluates the instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The direction the branch actually took
    pub outcome: Outcome,

    /// The target address evaluated for this branch
    pub tgt: usize,
}

/// A predicted direction, and a predicted target when one is available.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Prediction {
    pub outcome: Outcome,

    /// Predicted target address; [None] when the predictor leaves target
    /// resolution to the front-end.
    pub tgt: Option<usize>,
}
impl Prediction {
    pub fn taken(&self) -> bool {
        self.outcome.is_taken()
    }
}
