//! Case and monitoring models.

use serde::{Deserialize, Serialize};

use super::calculation::Calculation;

/// One immobilization procedure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    /// Unique case ID
    pub id: String,
    /// Optional field case number
    #[serde(default)]
    pub case_number: Option<String>,
    /// Case name (animal or location label)
    #[serde(default)]
    pub name: String,
    /// Procedure date (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,
    /// Monitoring log
    #[serde(default)]
    pub monitoring: Monitoring,
}

impl Default for Case {
    fn default() -> Self {
        Self::new()
    }
}

impl Case {
    /// Create an empty case dated today.
    pub fn new() -> Self {
        Self {
            id: super::new_id(),
            case_number: None,
            name: String::new(),
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            monitoring: Monitoring::default(),
        }
    }
}

/// Monitoring events recorded once per procedure by button press.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MonitoringEvent {
    DrugAdministration,
    Induction,
    HeadDown,
    Approach,
    Revival,
    HeadUp,
    Sternal,
    Standing,
}

impl MonitoringEvent {
    /// All events in their usual procedural order.
    pub const ALL: [MonitoringEvent; 8] = [
        MonitoringEvent::DrugAdministration,
        MonitoringEvent::Induction,
        MonitoringEvent::HeadDown,
        MonitoringEvent::Approach,
        MonitoringEvent::Revival,
        MonitoringEvent::HeadUp,
        MonitoringEvent::Sternal,
        MonitoringEvent::Standing,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MonitoringEvent::DrugAdministration => "Drug administration",
            MonitoringEvent::Induction => "Induction",
            MonitoringEvent::HeadDown => "Head down",
            MonitoringEvent::Approach => "Approach",
            MonitoringEvent::Revival => "Revival",
            MonitoringEvent::HeadUp => "Head up",
            MonitoringEvent::Sternal => "Sternal",
            MonitoringEvent::Standing => "Standing",
        }
    }
}

/// Vital-sign observation taken during monitoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interval {
    pub timestamp: String,
    /// Respiration (free text, e.g. "12/min")
    #[serde(default)]
    pub respiration: String,
    /// Temperature (free text, e.g. "38.5")
    #[serde(default)]
    pub temperature: String,
}

/// Event timestamps, interval observations and calculations for a case.
///
/// Every field defaults so records written before a field existed still load.
/// Event order is not validated: a later stage may be stamped before an
/// earlier one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Monitoring {
    pub drug_administration: Option<String>,
    pub induction: Option<String>,
    pub head_down: Option<String>,
    pub approach: Option<String>,
    pub revival: Option<String>,
    pub head_up: Option<String>,
    pub sternal: Option<String>,
    pub standing: Option<String>,
    pub intervals: Vec<Interval>,
    calculations: Vec<Calculation>,
}

impl Monitoring {
    fn slot(&mut self, event: MonitoringEvent) -> &mut Option<String> {
        match event {
            MonitoringEvent::DrugAdministration => &mut self.drug_administration,
            MonitoringEvent::Induction => &mut self.induction,
            MonitoringEvent::HeadDown => &mut self.head_down,
            MonitoringEvent::Approach => &mut self.approach,
            MonitoringEvent::Revival => &mut self.revival,
            MonitoringEvent::HeadUp => &mut self.head_up,
            MonitoringEvent::Sternal => &mut self.sternal,
            MonitoringEvent::Standing => &mut self.standing,
        }
    }

    /// Timestamp recorded for an event, if any.
    pub fn event_time(&self, event: MonitoringEvent) -> Option<&str> {
        let slot = match event {
            MonitoringEvent::DrugAdministration => &self.drug_administration,
            MonitoringEvent::Induction => &self.induction,
            MonitoringEvent::HeadDown => &self.head_down,
            MonitoringEvent::Approach => &self.approach,
            MonitoringEvent::Revival => &self.revival,
            MonitoringEvent::HeadUp => &self.head_up,
            MonitoringEvent::Sternal => &self.sternal,
            MonitoringEvent::Standing => &self.standing,
        };
        slot.as_deref()
    }

    /// Stamp an event. Re-marking replaces the previous timestamp.
    pub fn mark(&mut self, event: MonitoringEvent, timestamp: String) {
        *self.slot(event) = Some(timestamp);
    }

    /// Clear an event timestamp.
    pub fn clear(&mut self, event: MonitoringEvent) {
        *self.slot(event) = None;
    }

    /// Append a vital-sign observation.
    pub fn add_interval(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }

    /// Remove an observation by position.
    pub fn remove_interval(&mut self, index: usize) -> Option<Interval> {
        (index < self.intervals.len()).then(|| self.intervals.remove(index))
    }

    /// Append a calculation. Existing entries are never touched.
    pub fn append_calculation(&mut self, calculation: Calculation) {
        self.calculations.push(calculation);
    }

    /// All calculations in the order they were made.
    pub fn calculations(&self) -> &[Calculation] {
        &self.calculations
    }
}
