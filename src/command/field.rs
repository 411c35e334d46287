//! Field identifiers and values for the option form

use std::fmt;

use serde::Serialize;

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
}

/// Every user-settable field, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    LcscId,
    OutputPath,
    LibraryName,
    CreateFolder,
    Full,
    Symbol,
    Footprint,
    Model3d,
    Overwrite,
    ProjectRelative,
    V5Legacy,
    Debug,
}

impl FieldId {
    pub const ALL: [FieldId; 12] = [
        FieldId::LcscId,
        FieldId::OutputPath,
        FieldId::LibraryName,
        FieldId::CreateFolder,
        FieldId::Full,
        FieldId::Symbol,
        FieldId::Footprint,
        FieldId::Model3d,
        FieldId::Overwrite,
        FieldId::ProjectRelative,
        FieldId::V5Legacy,
        FieldId::Debug,
    ];

    pub fn kind(self) -> FieldKind {
        match self.typed() {
            TypedField::Text(_) => FieldKind::Text,
            TypedField::Flag(_) => FieldKind::Flag,
        }
    }

    /// Label shown next to the field in the form and summary table
    pub fn label(self) -> &'static str {
        match self {
            FieldId::LcscId => "LCSC Part #",
            FieldId::OutputPath => "Output Folder",
            FieldId::LibraryName => "Library Name",
            FieldId::CreateFolder => "Create Folder",
            FieldId::Full => "Full",
            FieldId::Symbol => "Symbol",
            FieldId::Footprint => "Footprint",
            FieldId::Model3d => "3D Model",
            FieldId::Overwrite => "Overwrite",
            FieldId::ProjectRelative => "Project Relative",
            FieldId::V5Legacy => "KiCad v5",
            FieldId::Debug => "Debug",
        }
    }

    /// Split into the typed text/flag identifier
    pub fn typed(self) -> TypedField {
        match self {
            FieldId::LcscId => TypedField::Text(TextField::LcscId),
            FieldId::OutputPath => TypedField::Text(TextField::OutputPath),
            FieldId::LibraryName => TypedField::Text(TextField::LibraryName),
            FieldId::CreateFolder => TypedField::Flag(FlagField::CreateFolder),
            FieldId::Full => TypedField::Flag(FlagField::Full),
            FieldId::Symbol => TypedField::Flag(FlagField::Symbol),
            FieldId::Footprint => TypedField::Flag(FlagField::Footprint),
            FieldId::Model3d => TypedField::Flag(FlagField::Model3d),
            FieldId::Overwrite => TypedField::Flag(FlagField::Overwrite),
            FieldId::ProjectRelative => TypedField::Flag(FlagField::ProjectRelative),
            FieldId::V5Legacy => TypedField::Flag(FlagField::V5Legacy),
            FieldId::Debug => TypedField::Flag(FlagField::Debug),
        }
    }

    pub fn as_text(self) -> Option<TextField> {
        match self.typed() {
            TypedField::Text(field) => Some(field),
            TypedField::Flag(_) => None,
        }
    }

    pub fn as_flag(self) -> Option<FlagField> {
        match self.typed() {
            TypedField::Flag(field) => Some(field),
            TypedField::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field id resolved to its value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedField {
    Text(TextField),
    Flag(FlagField),
}

/// Text-valued fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    LcscId,
    OutputPath,
    LibraryName,
}

/// Boolean-valued fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    CreateFolder,
    Full,
    Symbol,
    Footprint,
    Model3d,
    Overwrite,
    ProjectRelative,
    V5Legacy,
    Debug,
}

impl From<TextField> for FieldId {
    fn from(field: TextField) -> Self {
        match field {
            TextField::LcscId => FieldId::LcscId,
            TextField::OutputPath => FieldId::OutputPath,
            TextField::LibraryName => FieldId::LibraryName,
        }
    }
}

impl From<FlagField> for FieldId {
    fn from(field: FlagField) -> Self {
        match field {
            FlagField::CreateFolder => FieldId::CreateFolder,
            FlagField::Full => FieldId::Full,
            FlagField::Symbol => FieldId::Symbol,
            FlagField::Footprint => FieldId::Footprint,
            FlagField::Model3d => FieldId::Model3d,
            FlagField::Overwrite => FieldId::Overwrite,
            FlagField::ProjectRelative => FieldId::ProjectRelative,
            FlagField::V5Legacy => FieldId::V5Legacy,
            FlagField::Debug => FieldId::Debug,
        }
    }
}

/// Current value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Flag(_) => FieldKind::Flag,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_fields_round_trip_through_field_id() {
        for id in FieldId::ALL {
            match id.kind() {
                FieldKind::Text => {
                    let text = id.as_text().unwrap();
                    assert_eq!(FieldId::from(text), id);
                    assert!(id.as_flag().is_none());
                }
                FieldKind::Flag => {
                    let flag = id.as_flag().unwrap();
                    assert_eq!(FieldId::from(flag), id);
                    assert!(id.as_text().is_none());
                }
            }
        }
    }
}
