use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;

/// Counts recoverable problems encountered during a run.
///
/// Missing parameter-table entries never abort a computation: the affected
/// contribution is zero (no bond inferred, no energy added) and the event is
/// counted here. The sink is shared by reference between workers; all
/// counters are atomic.
#[derive(Default)]
pub struct Diagnostics {
    unknown_elements: AtomicUsize,
    parameter_fallbacks: AtomicUsize,
}

impl Diagnostics {

    /// Creates a sink with all counters at zero
    pub fn new() -> Diagnostics { Diagnostics::default() }

    /// Records an atom whose element is absent from the parameter tables
    pub fn count_unknown_element(&self) {
        self.unknown_elements.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a missing parameter-table entry replaced with a zero contribution
    pub fn count_parameter_fallback(&self) {
        self.parameter_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// The number of atoms skipped because of an unknown element
    pub fn unknown_elements(&self) -> usize { self.unknown_elements.load(Ordering::Relaxed) }

    /// The number of zeroed contributions caused by missing parameters
    pub fn parameter_fallbacks(&self) -> usize { self.parameter_fallbacks.load(Ordering::Relaxed) }

    /// Logs a summary of the recorded problems
    pub fn log_summary(&self) {
        let unknown = self.unknown_elements();
        let fallbacks = self.parameter_fallbacks();
        if unknown + fallbacks == 0 { return; }
        info!("{} atom(s) with an unknown element skipped, {} energy contribution(s) zeroed",
              unknown, fallbacks);
    }
}
