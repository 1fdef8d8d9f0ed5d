//! Start-order tracking for asynchronous results
//!
//! Every asynchronous operation that writes a state key takes a ticket when it
//! starts. A result is only applied when its ticket is newer than the last one
//! applied for that key, so an operation that started earlier can never
//! overwrite the result of one that started later.

use super::field::FieldName;

/// Monotonic counter pair for one state key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequencer {
    started: u64,
    applied: u64,
}

impl Sequencer {
    /// Issue the ticket for a newly started operation
    pub fn start(&mut self) -> u64 {
        self.started += 1;
        self.started
    }

    /// Record a resolved ticket. Returns false when it has been superseded.
    pub fn try_apply(&mut self, ticket: u64) -> bool {
        if ticket > self.applied {
            self.applied = ticket;
            true
        } else {
            false
        }
    }

    /// True while the most recently started operation has not been applied
    pub fn is_pending(&self) -> bool {
        self.started > self.applied
    }
}

/// One sequencer per registration field
#[derive(Debug, Clone, Default)]
pub struct FieldSequencers {
    fields: [Sequencer; 4],
}

impl FieldSequencers {
    pub fn start(&mut self, field: FieldName) -> u64 {
        self.fields[field.index()].start()
    }

    pub fn try_apply(&mut self, field: FieldName, ticket: u64) -> bool {
        self.fields[field.index()].try_apply(ticket)
    }

    pub fn is_pending(&self, field: FieldName) -> bool {
        self.fields[field.index()].is_pending()
    }
}
