//! Types for implementing a table of predictors.

use crate::branch::Outcome;
use crate::predictor::counter::SaturatingCounter;
use crate::predictor::StatefulPredictor;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of input to the table used to form an index.
    type Input;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given some input, return the corresponding index into the table.
    fn get_index(&self, input: Self::Input) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, input: Self::Input) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, input: Self::Input) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// A table of [SaturatingCounter] addressed by a precomputed hash index.
///
/// All entries start weakly taken.
pub struct CounterTable {
    data: Vec<SaturatingCounter>,
    size: usize,
}

impl CounterTable {
    /// Create a table with `2^table_bits` entries.
    pub fn new(table_bits: usize) -> Self {
        assert!(table_bits != 0 && table_bits < usize::BITS as usize);
        let size = 1 << table_bits;
        Self {
            data: vec![SaturatingCounter::new(); size],
            size,
        }
    }

    /// The predicted direction at `idx`.
    pub fn read(&self, idx: usize) -> Outcome {
        self.get_entry(idx).predict()
    }

    /// Move the counter at `idx` toward `outcome`.
    pub fn bump(&mut self, idx: usize, outcome: Outcome) {
        self.get_entry_mut(idx).update(outcome);
    }

    /// Returns 'true' if every entry is still in the reset state.
    pub fn is_pristine(&self) -> bool {
        self.data.iter().all(|c| c.value() == SaturatingCounter::WEAKLY_TAKEN)
    }
}

impl PredictorTable for CounterTable {
    type Input = usize;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.size }

    fn get_index(&self, idx: usize) -> usize {
        idx & self.index_mask()
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        &self.data[self.get_index(idx)]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = self.get_index(idx);
        &mut self.data[index]
    }
}
