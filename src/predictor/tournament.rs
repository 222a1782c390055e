//! A tournament predictor: global-history and local-history predictions
//! run side by side, and a choice table learns which one to trust.

use crate::branch::{ BranchQuery, Outcome, Prediction, Resolution };
use crate::error::{ ConfigError, ProtocolError };
use crate::history::{ HistoryRegister, LocalHistoryTable };
use crate::predictor::index::compute_index;
use crate::predictor::table::CounterTable;
use crate::predictor::BranchPredictor;

/// The choice index folds the global history with a copy of itself shifted
/// by this amount, decorrelating it from the global table index.
const CHOICE_FOLD_SHIFT: usize = 4;

/// Configuration for a [TournamentPredictor].
///
/// Table sizes are always `2^bits` entries. The defaults are the reference
/// constants this predictor was tuned with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Bits of global history hashed into the global table index
    pub global_history_len: usize,

    /// Bits of per-bucket history hashed into the local table index
    pub local_history_len: usize,

    /// log2 of the global counter table size
    pub global_table_bits: usize,

    /// log2 of the local counter table size
    pub local_table_bits: usize,

    /// log2 of the number of local history buckets
    pub local_history_table_bits: usize,

    /// Bits of global history hashed into the choice table index
    pub choice_history_len: usize,

    /// log2 of the choice counter table size
    pub choice_table_bits: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            global_history_len: 18,
            local_history_len: 14,
            global_table_bits: 14,
            local_table_bits: 14,
            local_history_table_bits: 10,
            choice_history_len: 18,
            choice_table_bits: 14,
        }
    }
}

impl TournamentConfig {
    /// Get the [approximate] number of storage bits.
    pub fn storage_bits(&self) -> usize {
        let counters = 2 * ((1 << self.global_table_bits)
            + (1 << self.local_table_bits)
            + (1 << self.choice_table_bits));
        let local_hist = self.local_history_len << self.local_history_table_bits;
        counters + local_hist + self.global_history_len
    }

    fn check(name: &'static str, bits: usize) -> Result<(), ConfigError> {
        if bits == 0 {
            return Err(ConfigError::Zero(name));
        }
        // Shift amounts and `1 << bits` masks both require room in the word.
        if bits >= usize::BITS as usize {
            return Err(ConfigError::ExceedsWord { field: name, bits });
        }
        Ok(())
    }

    /// Reject widths that would produce degenerate shifts or masks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check("global_history_len", self.global_history_len)?;
        Self::check("local_history_len", self.local_history_len)?;
        Self::check("global_table_bits", self.global_table_bits)?;
        Self::check("local_table_bits", self.local_table_bits)?;
        Self::check("local_history_table_bits", self.local_history_table_bits)?;
        Self::check("choice_history_len", self.choice_history_len)?;
        Self::check("choice_table_bits", self.choice_table_bits)?;
        Ok(())
    }

    /// Use this configuration to create a new [TournamentPredictor].
    pub fn build(self) -> Result<TournamentPredictor, ConfigError> {
        self.validate()?;
        Ok(TournamentPredictor {
            ghr: HistoryRegister::new(self.global_history_len),
            local_history: LocalHistoryTable::new(
                self.local_history_table_bits,
                self.local_history_len,
            ),
            global_table: CounterTable::new(self.global_table_bits),
            local_table: CounterTable::new(self.local_table_bits),
            choice_table: CounterTable::new(self.choice_table_bits),
            pending: None,
            cfg: self,
        })
    }
}

/// The state captured by `predict()` for the matching `update()`.
///
/// Capacity is exactly one record; each `predict()` call replaces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingUpdate {
    /// The predicted branch was unconditional; nothing was read, and there
    /// is nothing to learn from its resolution.
    Unconditional,

    /// Table slots read while predicting a conditional branch, and the
    /// branch address that selects its local history bucket.
    Conditional {
        pc: usize,
        gindex: usize,
        lindex: usize,
        choice_index: usize,
    },
}

/// A hybrid direction predictor.
///
/// Two component predictors cover complementary behavior: the global table
/// is indexed with the outcome history of all recent branches (cross-branch
/// correlation), the local table with the branch's own bucket history
/// (per-branch repeating patterns). A choice table, indexed from global
/// history, selects which component to trust for each prediction.
///
/// The driver contract is one `update()` per `predict()`, in order, with a
/// single prediction outstanding at any time (see [BranchPredictor]). All
/// tables are allocated at construction and never grow; distinct branches
/// may alias to shared slots.
pub struct TournamentPredictor {
    cfg: TournamentConfig,

    /// Global history register
    ghr: HistoryRegister,

    /// Local history table
    local_history: LocalHistoryTable,

    /// Prediction tables
    global_table: CounterTable,
    local_table: CounterTable,
    choice_table: CounterTable,

    /// The single in-flight prediction
    pending: Option<PendingUpdate>,
}

impl TournamentPredictor {
    pub fn config(&self) -> &TournamentConfig {
        &self.cfg
    }

    /// The (global, local, choice) table indices for `pc` under the current
    /// history state.
    fn indices(&self, pc: usize) -> (usize, usize, usize) {
        let ghist = self.ghr.value();
        let lhist = self.local_history.read(pc);
        let gindex = compute_index(
            pc,
            ghist,
            self.cfg.global_table_bits,
            self.cfg.global_history_len,
        );
        let lindex = compute_index(
            pc,
            lhist,
            self.cfg.local_table_bits,
            self.cfg.local_history_len,
        );
        let choice_index = compute_index(
            pc,
            ghist ^ (ghist >> CHOICE_FOLD_SHIFT),
            self.cfg.choice_table_bits,
            self.cfg.choice_history_len,
        );
        (gindex, lindex, choice_index)
    }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str { "TournamentPredictor" }

    fn predict(&mut self, query: &BranchQuery) -> Prediction {
        if query.is_unconditional() {
            // No learned state applies; the front-end resolves the target.
            self.pending = Some(PendingUpdate::Unconditional);
            return Prediction { outcome: Outcome::T, tgt: None };
        }

        let (gindex, lindex, choice_index) = self.indices(query.pc);
        let global_pred = self.global_table.read(gindex);
        let local_pred = self.local_table.read(lindex);
        let use_global = self.choice_table.read(choice_index);

        let outcome = if use_global.is_taken() {
            global_pred
        } else {
            local_pred
        };

        self.pending = Some(PendingUpdate::Conditional {
            pc: query.pc,
            gindex,
            lindex,
            choice_index,
        });
        Prediction { outcome, tgt: None }
    }

    fn update(&mut self, res: Resolution) -> Result<(), ProtocolError> {
        let pending = self.pending
            .take()
            .ok_or(ProtocolError::NoPendingPrediction)?;

        let PendingUpdate::Conditional { pc, gindex, lindex, choice_index } =
            pending
        else {
            return Ok(());
        };

        let taken = res.outcome;

        // The stored indices name the exact slots read at predict time.
        let global_pred = self.global_table.read(gindex);
        let local_pred = self.local_table.read(lindex);

        // The choice counter learns only from genuinely discriminating
        // cases. Its taken side means "trust the global component".
        if global_pred != local_pred {
            let winner = Outcome::from_bool(global_pred == taken);
            self.choice_table.bump(choice_index, winner);
        }

        self.global_table.bump(gindex, taken);
        self.local_table.bump(lindex, taken);

        self.local_history.shift_in(pc, taken);
        self.ghr.shift_in(taken);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::branch::BranchKind;
    use crate::predictor::table::PredictorTable;

    /// A deliberately small shape: 16-entry tables, 4 history buckets.
    /// Index arithmetic over 4-bit tables only consumes address bits 0..=5,
    /// which makes alias pairs easy to construct.
    fn small_cfg() -> TournamentConfig {
        TournamentConfig {
            global_history_len: 4,
            local_history_len: 4,
            global_table_bits: 4,
            local_table_bits: 4,
            local_history_table_bits: 2,
            choice_history_len: 4,
            choice_table_bits: 4,
        }
    }

    fn branch(pc: usize) -> BranchQuery {
        BranchQuery::new(pc, BranchKind::DirectBranch)
    }

    fn resolved(outcome: Outcome) -> Resolution {
        Resolution { outcome, tgt: 0 }
    }

    fn pending_indices(p: &TournamentPredictor) -> (usize, usize, usize) {
        match p.pending {
            Some(PendingUpdate::Conditional { gindex, lindex, choice_index, .. }) => {
                (gindex, lindex, choice_index)
            },
            _ => panic!("no conditional prediction pending"),
        }
    }

    #[test]
    fn fresh_predictor_predicts_taken() {
        let mut p = TournamentConfig::default().build().unwrap();
        assert_eq!(p.ghr.value(), 0);
        assert!(p.global_table.is_pristine());
        assert!(p.local_table.is_pristine());
        assert!(p.choice_table.is_pristine());

        let pred = p.predict(&branch(0x1000));
        assert_eq!(pred.outcome, Outcome::T);
        assert_eq!(pred.tgt, None);
    }

    #[test]
    fn repeated_taken_branch_saturates_its_counters() {
        let mut p = TournamentConfig::default().build().unwrap();
        let q = branch(0x1000);

        let mut touched = Vec::new();
        for _ in 0..3 {
            let pred = p.predict(&q);
            assert_eq!(pred.outcome, Outcome::T);
            touched.push(pending_indices(&p));
            p.update(resolved(Outcome::T)).unwrap();
        }

        // Every involved counter was bumped toward taken from the weak
        // state, so each sits at the saturation point; the components never
        // disagreed, so the choice counters are untouched.
        for (gindex, lindex, choice_index) in touched {
            assert_eq!(p.global_table.get_entry(gindex).value(), 3);
            assert_eq!(p.local_table.get_entry(lindex).value(), 3);
            assert_eq!(p.choice_table.get_entry(choice_index).value(), 2);
        }
    }

    #[test]
    fn choice_unchanged_when_components_agree() {
        let mut p = small_cfg().build().unwrap();
        let q = branch(0x2008);

        // Fresh tables agree on taken; resolving not-taken weakens both
        // components but must leave the choice counter alone.
        let _ = p.predict(&q);
        let (gindex, lindex, choice_index) = pending_indices(&p);
        p.update(resolved(Outcome::N)).unwrap();

        assert_eq!(p.choice_table.get_entry(choice_index).value(), 2);
        assert_eq!(p.global_table.get_entry(gindex).value(), 1);
        assert_eq!(p.local_table.get_entry(lindex).value(), 1);
    }

    #[test]
    fn choice_learns_from_disagreement() {
        let mut p = small_cfg().build().unwrap();
        let pc = 0x1000;

        // Force the global component to not-taken before any history moves.
        let (gindex, _, _) = p.indices(pc);
        p.global_table.bump(gindex, Outcome::N);
        p.global_table.bump(gindex, Outcome::N);

        let pred = p.predict(&branch(pc));
        let (gindex, lindex, choice_index) = pending_indices(&p);
        // The fresh choice counter prefers the global component.
        assert_eq!(pred.outcome, Outcome::N);

        p.update(resolved(Outcome::T)).unwrap();

        // Local was right and global wrong: the choice counter moves toward
        // the local side, and both components move toward taken.
        assert_eq!(p.choice_table.get_entry(choice_index).value(), 1);
        assert_eq!(p.global_table.get_entry(gindex).value(), 1);
        assert_eq!(p.local_table.get_entry(lindex).value(), 3);
    }

    #[test]
    fn unconditional_branches_learn_nothing() {
        let mut p = small_cfg().build().unwrap();
        let q = BranchQuery::new(0x3000, BranchKind::DirectJump);

        let pred = p.predict(&q);
        assert_eq!(pred.outcome, Outcome::T);
        assert_eq!(pred.tgt, None);
        p.update(resolved(Outcome::T)).unwrap();

        assert_eq!(p.ghr.value(), 0);
        assert_eq!(p.local_history.read(0x3000), 0);
        assert!(p.global_table.is_pristine());
        assert!(p.local_table.is_pristine());
        assert!(p.choice_table.is_pristine());
    }

    #[test]
    fn update_without_prediction_is_rejected() {
        let mut p = small_cfg().build().unwrap();
        assert_eq!(
            p.update(resolved(Outcome::T)),
            Err(ProtocolError::NoPendingPrediction)
        );
    }

    #[test]
    fn double_update_is_rejected() {
        let mut p = small_cfg().build().unwrap();
        let _ = p.predict(&branch(0x1000));
        p.update(resolved(Outcome::T)).unwrap();
        assert_eq!(
            p.update(resolved(Outcome::T)),
            Err(ProtocolError::NoPendingPrediction)
        );

        // The unconditional no-op consumes its record too.
        let _ = p.predict(&BranchQuery::new(0x3000, BranchKind::Return));
        p.update(resolved(Outcome::T)).unwrap();
        assert_eq!(
            p.update(resolved(Outcome::T)),
            Err(ProtocolError::NoPendingPrediction)
        );
    }

    #[test]
    fn aliased_branches_share_table_state() {
        let mut p = small_cfg().build().unwrap();

        // Addresses differing only above bit 5 are indistinguishable to
        // 4-bit tables and 2-bit bucket selection: a full alias pair.
        let pc_a = 0x1000;
        let pc_b = 0x1040;
        assert_eq!(p.indices(pc_a), p.indices(pc_b));

        // Drive the pair with opposing outcomes. The shared slots absorb
        // the conflict; nothing panics and every counter stays bounded.
        for _ in 0..256 {
            let _ = p.predict(&branch(pc_a));
            p.update(resolved(Outcome::T)).unwrap();
            let _ = p.predict(&branch(pc_b));
            p.update(resolved(Outcome::N)).unwrap();

            // Aliasing holds under every history state, not just at reset.
            assert_eq!(p.indices(pc_a), p.indices(pc_b));
        }

        for idx in 0..p.global_table.size() {
            assert!(p.global_table.get_entry(idx).value() <= 3);
            assert!(p.local_table.get_entry(idx).value() <= 3);
            assert!(p.choice_table.get_entry(idx).value() <= 3);
        }

        // Whatever the tables settled on, the pair sees one shared answer.
        let (gindex, lindex, choice_index) = p.indices(pc_a);
        let shared = if p.choice_table.read(choice_index).is_taken() {
            p.global_table.read(gindex)
        } else {
            p.local_table.read(lindex)
        };
        let pred_a = p.predict(&branch(pc_a));
        assert_eq!(pred_a.outcome, shared);
    }

    #[test]
    fn histories_fill_and_mask() {
        let mut p = small_cfg().build().unwrap();
        let q = branch(0x1000);

        for n in 1..=10 {
            let _ = p.predict(&q);
            p.update(resolved(Outcome::T)).unwrap();
            let expect = (1 << n.min(4)) - 1;
            assert_eq!(p.ghr.value(), expect);
            assert_eq!(p.local_history.read(0x1000), expect);
        }

        let _ = p.predict(&q);
        p.update(resolved(Outcome::N)).unwrap();
        assert_eq!(p.ghr.value(), 0b1110);
        assert_eq!(p.local_history.read(0x1000), 0b1110);
    }

    #[test]
    fn predict_replaces_the_outstanding_record() {
        let mut p = small_cfg().build().unwrap();
        let _ = p.predict(&branch(0x1000));
        let first = pending_indices(&p);

        // A second predict() before resolution discards the first record;
        // the single update() then resolves the second prediction only.
        let _ = p.predict(&branch(0x2004));
        let second = pending_indices(&p);
        assert_ne!(first, second);

        p.update(resolved(Outcome::T)).unwrap();
        assert_eq!(
            p.update(resolved(Outcome::T)),
            Err(ProtocolError::NoPendingPrediction)
        );
    }

    #[test]
    fn degenerate_configurations_are_rejected() {
        let cfg = TournamentConfig { global_history_len: 0, ..TournamentConfig::default() };
        assert_eq!(cfg.build().err(), Some(ConfigError::Zero("global_history_len")));

        let cfg = TournamentConfig {
            choice_table_bits: usize::BITS as usize,
            ..TournamentConfig::default()
        };
        assert_eq!(
            cfg.build().err(),
            Some(ConfigError::ExceedsWord {
                field: "choice_table_bits",
                bits: usize::BITS as usize,
            })
        );

        assert!(TournamentConfig::default().build().is_ok());
    }

    #[test]
    fn default_storage_accounting() {
        let cfg = TournamentConfig::default();
        // Three 16K-entry 2-bit tables, 1K 14-bit local histories, the GHR.
        assert_eq!(cfg.storage_bits(), 2 * 3 * 16384 + 14 * 1024 + 18);
    }
}
