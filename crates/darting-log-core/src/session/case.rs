//! Live case form used during a procedure.

use crate::calculator::{calculate, CalculationOutcome, DoseRequest};
use crate::models::{now, Calculation, Case, Interval, MonitoringEvent};
use crate::store::{KeyValueStore, RecordStore, StoreResult};

use super::EditSession;

/// Working copy of a case, mutated by monitoring button presses.
///
/// Nothing reaches the store until [`CaseSession::save`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseSession {
    inner: EditSession<Case>,
}

impl CaseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stored case for editing.
    pub fn begin_edit(&mut self, case: Case) {
        tracing::debug!(case_id = %case.id, "Editing case");
        self.inner.begin_edit(case);
    }

    pub fn is_editing(&self) -> bool {
        self.inner.is_editing()
    }

    pub fn case(&self) -> &Case {
        self.inner.form()
    }

    /// Mutable access for identity fields (name, number, date).
    pub fn case_mut(&mut self) -> &mut Case {
        self.inner.form_mut()
    }

    /// Stamp a monitoring event with the current time.
    pub fn mark_event(&mut self, event: MonitoringEvent) {
        self.mark_event_at(event, now());
    }

    pub fn mark_event_at(&mut self, event: MonitoringEvent, timestamp: String) {
        self.case_mut().monitoring.mark(event, timestamp);
    }

    pub fn clear_event(&mut self, event: MonitoringEvent) {
        self.case_mut().monitoring.clear(event);
    }

    /// Record a vital-sign observation taken now.
    pub fn add_interval(&mut self, respiration: impl Into<String>, temperature: impl Into<String>) {
        self.case_mut().monitoring.add_interval(Interval {
            timestamp: now(),
            respiration: respiration.into(),
            temperature: temperature.into(),
        });
    }

    pub fn remove_interval(&mut self, index: usize) -> Option<Interval> {
        self.case_mut().monitoring.remove_interval(index)
    }

    /// Run the in-case calculator.
    ///
    /// A completed calculation is appended to the case log. History is not
    /// written.
    pub fn run_calculation(&mut self, request: &DoseRequest<'_>) -> CalculationOutcome {
        let outcome = calculate(request);
        if let Some(calc) = &outcome.calculation {
            self.case_mut().monitoring.append_calculation(calc.clone());
        }
        outcome
    }

    pub fn calculations(&self) -> &[Calculation] {
        self.case().monitoring.calculations()
    }

    /// Persist the whole case, calculations included, and start a new one.
    pub fn save<S: KeyValueStore + ?Sized>(
        &mut self,
        cases: &RecordStore<'_, Case, S>,
    ) -> StoreResult<Case> {
        let saved = self.inner.save(cases)?;
        tracing::info!(
            case_id = %saved.id,
            calculations = saved.monitoring.calculations().len(),
            intervals = saved.monitoring.intervals.len(),
            "Case saved"
        );
        Ok(saved)
    }

    /// Discard the working copy, including any calculations made in it.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}
