use crate::error::Result;

/// Durable home of the completed-cycles tally.
///
/// Only this counter survives a restart; the in-progress session count is
/// deliberately not stored.
pub trait CycleStore {
    fn load_completed_cycles(&self) -> Result<u64>;
    fn save_completed_cycles(&mut self, cycles: u64) -> Result<()>;
}

/// Process-local store, for tests and for shells without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCycleStore {
    cycles: u64,
}

impl MemoryCycleStore {
    pub fn new(cycles: u64) -> Self {
        Self { cycles }
    }
}

impl CycleStore for MemoryCycleStore {
    fn load_completed_cycles(&self) -> Result<u64> {
        Ok(self.cycles)
    }

    fn save_completed_cycles(&mut self, cycles: u64) -> Result<()> {
        self.cycles = cycles;
        Ok(())
    }
}

impl<S: CycleStore + ?Sized> CycleStore for &mut S {
    fn load_completed_cycles(&self) -> Result<u64> {
        (**self).load_completed_cycles()
    }

    fn save_completed_cycles(&mut self, cycles: u64) -> Result<()> {
        (**self).save_completed_cycles(cycles)
    }
}
