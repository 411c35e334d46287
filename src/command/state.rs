//! Option state with cross-field invariants
//!
//! `OptionState` holds the value of every field in the form. Each mutation
//! goes through one setter which writes a single field and then re-applies
//! the dependency rules:
//!
//! - `Full` clears and disables Symbol, Footprint and 3D Model.
//! - An empty Output Folder clears and disables Library Name, Create Folder
//!   and Project Relative.
//!
//! Invalid combinations are never rejected at the setter; they surface as
//! [`InputIssue`]s from [`OptionState::validation_issues`].

use std::collections::BTreeMap;

use super::error::{InputIssue, StateError};
use super::field::{FieldId, FieldValue, FlagField, TextField, TypedField};

/// Field id → enabled
pub type Enablement = BTreeMap<FieldId, bool>;

/// Current value of every user-settable option
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionState {
    lcsc_id: String,
    output_path: String,
    library_name: String,
    create_folder: bool,
    full: bool,
    symbol: bool,
    footprint: bool,
    model_3d: bool,
    overwrite: bool,
    project_relative: bool,
    v5_legacy: bool,
    debug: bool,
}

impl OptionState {
    /// All fields empty/false
    pub fn new() -> Self {
        Self::default()
    }

    /// Set any field from a dynamically typed value.
    ///
    /// Returns `StateError::KindMismatch` when the value kind does not match
    /// the field; the state is left untouched in that case.
    pub fn set_field(&mut self, id: FieldId, value: FieldValue) -> Result<(), StateError> {
        match (id.typed(), value) {
            (TypedField::Text(field), FieldValue::Text(text)) => {
                self.set_text(field, text);
                Ok(())
            }
            (TypedField::Flag(field), FieldValue::Flag(flag)) => {
                self.set_flag(field, flag);
                Ok(())
            }
            (_, value) => Err(StateError::KindMismatch {
                field: id,
                expected: id.kind(),
                actual: value.kind(),
            }),
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::LcscId => self.lcsc_id = value,
            TextField::OutputPath => self.output_path = value,
            TextField::LibraryName => self.library_name = value,
        }
        self.enforce_invariants();
    }

    pub fn set_flag(&mut self, field: FlagField, value: bool) {
        *self.flag_mut(field) = value;
        self.enforce_invariants();
    }

    pub fn toggle(&mut self, field: FlagField) {
        let current = self.flag(field);
        self.set_flag(field, !current);
    }

    pub fn get(&self, id: FieldId) -> FieldValue {
        match id.typed() {
            TypedField::Text(field) => FieldValue::Text(self.raw_text(field).to_string()),
            TypedField::Flag(field) => FieldValue::Flag(self.flag(field)),
        }
    }

    /// Text as typed, including surrounding whitespace
    pub fn raw_text(&self, field: TextField) -> &str {
        match field {
            TextField::LcscId => &self.lcsc_id,
            TextField::OutputPath => &self.output_path,
            TextField::LibraryName => &self.library_name,
        }
    }

    /// Text with surrounding whitespace removed; this is what the tool sees
    pub fn text(&self, field: TextField) -> &str {
        self.raw_text(field).trim()
    }

    pub fn flag(&self, field: FlagField) -> bool {
        match field {
            FlagField::CreateFolder => self.create_folder,
            FlagField::Full => self.full,
            FlagField::Symbol => self.symbol,
            FlagField::Footprint => self.footprint,
            FlagField::Model3d => self.model_3d,
            FlagField::Overwrite => self.overwrite,
            FlagField::ProjectRelative => self.project_relative,
            FlagField::V5Legacy => self.v5_legacy,
            FlagField::Debug => self.debug,
        }
    }

    fn flag_mut(&mut self, field: FlagField) -> &mut bool {
        match field {
            FlagField::CreateFolder => &mut self.create_folder,
            FlagField::Full => &mut self.full,
            FlagField::Symbol => &mut self.symbol,
            FlagField::Footprint => &mut self.footprint,
            FlagField::Model3d => &mut self.model_3d,
            FlagField::Overwrite => &mut self.overwrite,
            FlagField::ProjectRelative => &mut self.project_relative,
            FlagField::V5Legacy => &mut self.v5_legacy,
            FlagField::Debug => &mut self.debug,
        }
    }

    pub fn has_output_path(&self) -> bool {
        !self.text(TextField::OutputPath).is_empty()
    }

    pub fn has_generation_target(&self) -> bool {
        self.full || self.symbol || self.footprint || self.model_3d
    }

    fn enforce_invariants(&mut self) {
        if self.full {
            self.symbol = false;
            self.footprint = false;
            self.model_3d = false;
        }
        if !self.has_output_path() {
            self.library_name.clear();
            self.create_folder = false;
            self.project_relative = false;
        }
    }

    pub fn is_enabled(&self, id: FieldId) -> bool {
        match id {
            FieldId::Symbol | FieldId::Footprint | FieldId::Model3d => !self.full,
            // Gated on the output path only, even when the library name is empty.
            FieldId::LibraryName | FieldId::CreateFolder | FieldId::ProjectRelative => {
                self.has_output_path()
            }
            _ => true,
        }
    }

    pub fn enablement(&self) -> Enablement {
        FieldId::ALL
            .iter()
            .map(|&id| (id, self.is_enabled(id)))
            .collect()
    }

    /// Every reason the state cannot run, in a fixed order
    pub fn validation_issues(&self) -> Vec<InputIssue> {
        let mut issues = Vec::new();
        if self.text(TextField::LcscId).is_empty() {
            issues.push(InputIssue::MissingIdentifier);
        }
        if !self.has_generation_target() {
            issues.push(InputIssue::NoGenerationTarget);
        }
        if self.project_relative && !self.has_output_path() {
            issues.push(InputIssue::ProjectRelativeWithoutOutput);
        }
        issues
    }

    pub fn is_valid_to_run(&self) -> bool {
        self.validation_issues().is_empty()
    }
}
