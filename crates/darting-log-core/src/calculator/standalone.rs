//! Standalone calculator that records every successful run in history.

use crate::models::HistoryEntry;
use crate::store::{HistoryLog, KeyValueStore, StoreResult};

use super::{calculate, CalculationOutcome, DoseRequest};

/// Calculator outside of any case.
pub struct StandaloneCalculator<'a, S: ?Sized> {
    history: HistoryLog<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> StandaloneCalculator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            history: HistoryLog::new(store),
        }
    }

    /// Run the calculator and append a history entry when it completes.
    ///
    /// An aborted run (no species or bad weight) writes nothing.
    pub fn run(&self, request: &DoseRequest<'_>) -> StoreResult<CalculationOutcome> {
        let outcome = calculate(request);
        if let Some(calc) = &outcome.calculation {
            let count = self.history.append(&HistoryEntry::from(calc))?;
            tracing::debug!(history_len = count, "History entry recorded");
        }
        Ok(outcome)
    }
}
