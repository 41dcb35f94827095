//! Mock thread provider for testing

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use critical_section::Mutex;
use pico_tasks_core::traits::{MockTime, SpawnError, ThreadEntry, ThreadId, ThreadProvider};

#[derive(Default)]
struct State {
    next_id: u32,
    refusal: Option<SpawnError>,
    entries: Vec<(ThreadId, ThreadEntry)>,
    yields: u32,
    delays: Vec<u32>,
}

/// Mock thread provider
///
/// Never starts a real thread. Spawned entries are kept so a test can run
/// them by hand, and every yield and delay is recorded. Clones share the
/// same recorder.
///
/// With `with_clock`, each `delay_ms` also advances the given `MockTime`, so
/// a worker loop driven on the test thread sees simulated time pass.
#[derive(Clone)]
pub struct MockThreads {
    state: Arc<Mutex<RefCell<State>>>,
    clock: Option<MockTime>,
}

impl MockThreads {
    /// Create a provider that accepts every spawn
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RefCell::new(State::default()))),
            clock: None,
        }
    }

    /// Create a provider whose delays advance `clock`
    pub fn with_clock(clock: MockTime) -> Self {
        Self {
            clock: Some(clock),
            ..Self::new()
        }
    }

    /// Make subsequent spawns fail with `error`
    pub fn refuse_spawns(&self, error: SpawnError) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).refusal = Some(error));
    }

    /// Accept spawns again
    pub fn accept_spawns(&self) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).refusal = None);
    }

    /// Number of spawned entries not yet taken
    pub fn spawned(&self) -> usize {
        critical_section::with(|cs| self.state.borrow_ref(cs).entries.len())
    }

    /// Take ownership of the spawned entries, oldest first
    pub fn take_entries(&self) -> Vec<(ThreadId, ThreadEntry)> {
        critical_section::with(|cs| core::mem::take(&mut self.state.borrow_ref_mut(cs).entries))
    }

    /// Number of `yield_now` calls
    pub fn yields(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow_ref(cs).yields)
    }

    /// Every `delay_ms` argument in call order
    pub fn delays(&self) -> Vec<u32> {
        critical_section::with(|cs| self.state.borrow_ref(cs).delays.clone())
    }
}

impl Default for MockThreads {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadProvider for MockThreads {
    fn spawn(&self, entry: ThreadEntry) -> Result<ThreadId, SpawnError> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if let Some(error) = state.refusal {
                return Err(error);
            }
            let id = ThreadId(state.next_id);
            state.next_id += 1;
            state.entries.push((id, entry));
            Ok(id)
        })
    }

    fn yield_now(&self) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).yields += 1);
    }

    fn delay_ms(&self, ms: u32) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).delays.push(ms));
        if let Some(clock) = &self.clock {
            clock.advance(ms);
        }
    }
}
