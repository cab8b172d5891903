//! Residue numbering checks for consecutive alpha-carbon records.
//!
//! A traced chain is only usable when its residue numbers climb by exactly one from record to
//! record. Repeated numbers come from alternate conformations and are dropped, any other jump is
//! a gap in the deposited model.

use std::fmt;

/// Outcome of checking the next alpha-carbon residue number against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueConfirmation {
    /// First residue of the model, or exactly one past the previous residue.
    Valid,
    /// Same number as the previous residue; the atom must be skipped entirely.
    Duplicate,
    /// Any other jump, including backwards ones.
    OutOfSequence { prev: i32, next: i32 },
}

impl fmt::Display for ResidueConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResidueConfirmation::Valid => write!(f, "valid"),
            ResidueConfirmation::Duplicate => write!(f, "duplicate residue"),
            ResidueConfirmation::OutOfSequence { prev, next } => {
                write!(f, "missing residues; prev={prev}, next={next}")
            }
        }
    }
}

/// Tracks the previous and first alpha-carbon residue numbers of the current model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueSequencer {
    prev: Option<i32>,
    first: Option<i32>,
}

impl ResidueSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `next` and advances the previous residue number unless it is a duplicate.
    ///
    /// # Arguments
    ///
    /// * `next` - Residue sequence number of the incoming alpha-carbon.
    ///
    /// # Returns
    ///
    /// The [`ResidueConfirmation`] the caller uses to accept, skip, or flag the residue.
    pub fn validate(&mut self, next: i32) -> ResidueConfirmation {
        let Some(prev) = self.prev else {
            self.prev = Some(next);
            self.first = Some(next);
            return ResidueConfirmation::Valid;
        };

        if prev.checked_add(1) == Some(next) {
            self.prev = Some(next);
            return ResidueConfirmation::Valid;
        }

        if prev == next {
            return ResidueConfirmation::Duplicate;
        }

        self.prev = Some(next);
        ResidueConfirmation::OutOfSequence { prev, next }
    }

    /// Last accepted residue number, `None` before the first alpha-carbon of a model.
    pub fn previous(&self) -> Option<i32> {
        self.prev
    }

    pub fn first(&self) -> Option<i32> {
        self.first
    }

    pub fn reset(&mut self) {
        self.prev = None;
        self.first = None;
    }
}
