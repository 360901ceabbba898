//! Mount tracking for view-models.
//!
//! A fetch is issued under a [`FetchTicket`]. Its result may only be written
//! back while the issuing view-model is still mounted, in the same mount
//! generation, and while no newer fetch of the same kind has been issued.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    seq: u64,
}

/// Tracks the latest ticket handed out for one kind of fetch.
#[derive(Debug, Default)]
pub struct FetchSlot {
    issued: u64,
}

#[derive(Debug, Default)]
pub struct Lifecycle {
    generation: u64,
    mounted: bool,
}

/// What happened to a fetch result handed back to a view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    Stale,
}

impl Lifecycle {
    pub fn mount(&mut self) {
        self.generation += 1;
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn issue(&self, slot: &mut FetchSlot) -> FetchTicket {
        slot.issued += 1;
        FetchTicket {
            generation: self.generation,
            seq: slot.issued,
        }
    }

    pub fn is_current(&self, slot: &FetchSlot, ticket: FetchTicket) -> bool {
        self.mounted && ticket.generation == self.generation && ticket.seq == slot.issued
    }
}
