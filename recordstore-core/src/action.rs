//! Mutating action kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::RecordStoreError;

/// A single mutating operation targeting one record by its `uuid` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert the record as a new document.
    Create,
    /// Remove the document matching the record's identifier.
    Delete,
    /// Apply a partial field-set overwrite to the matching document.
    Update,
}

impl Action {
    /// Returns the lowercase name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Delete => "delete",
            Action::Update => "update",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RecordStoreError;

    /// Parses an action name. This is where loosely-typed action values enter
    /// the system, and the only place `UnsupportedAction` can arise: a held
    /// [`Action`] value is always valid.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "create" => Ok(Action::Create),
            "delete" => Ok(Action::Delete),
            "update" => Ok(Action::Update),
            other => Err(RecordStoreError::UnsupportedAction(other.to_string())),
        }
    }
}
