//! Editing sessions for forms.
//!
//! A form is either idle (holding a blank template for a new record) or
//! editing an existing record. `save` and `cancel` are the only ways back to
//! idle, and both reset the working copy to a fresh template.

mod case;

pub use case::*;

use crate::store::{KeyValueStore, Record, RecordStore, StoreResult};
use crate::models::{Drug, Species};

/// Current state of a form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState<T> {
    /// New record being filled in
    Idle(T),
    /// Existing record loaded for editing
    Editing(T),
}

/// Working copy of one record with explicit commit and discard.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<T> {
    state: FormState<T>,
}

/// Drug form.
pub type DrugSession = EditSession<Drug>;
/// Species form.
pub type SpeciesSession = EditSession<Species>;

impl<T: Record + Default> Default for EditSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record + Default> EditSession<T> {
    /// Start idle with a blank template.
    pub fn new() -> Self {
        Self {
            state: FormState::Idle(T::default()),
        }
    }

    /// Load an existing record, replacing whatever the form held.
    pub fn begin_edit(&mut self, record: T) {
        self.state = FormState::Editing(record);
    }

    /// Whether an existing record is loaded.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, FormState::Editing(_))
    }

    pub fn state(&self) -> &FormState<T> {
        &self.state
    }

    /// The working copy.
    pub fn form(&self) -> &T {
        match &self.state {
            FormState::Idle(record) | FormState::Editing(record) => record,
        }
    }

    /// Mutable access to the working copy.
    pub fn form_mut(&mut self) -> &mut T {
        match &mut self.state {
            FormState::Idle(record) | FormState::Editing(record) => record,
        }
    }

    /// Persist the working copy and return to idle.
    ///
    /// A new record is appended; an edited one replaces the stored record with
    /// the same identifier. On a store error the form is left untouched.
    pub fn save<S: KeyValueStore + ?Sized>(
        &mut self,
        records: &RecordStore<'_, T, S>,
    ) -> StoreResult<T> {
        records.upsert(self.form())?;
        let saved = std::mem::replace(&mut self.state, FormState::Idle(T::default()));
        Ok(match saved {
            FormState::Idle(record) | FormState::Editing(record) => record,
        })
    }

    /// Discard the working copy and return to idle.
    pub fn cancel(&mut self) {
        self.state = FormState::Idle(T::default());
    }
}
