use serde::{Deserialize, Serialize};
use std::fmt;

/// One ingredient requirement attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsage {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Free-text modifier, e.g. "finely chopped".
    pub note: Option<String>,
}

impl IngredientUsage {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl fmt::Display for IngredientUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.fract() == 0.0 {
            write!(f, "{} {} {}", self.quantity as i64, self.unit, self.name)?;
        } else {
            write!(f, "{} {} {}", self.quantity, self.unit, self.name)?;
        }
        if let Some(note) = &self.note {
            write!(f, " ({})", note)?;
        }
        Ok(())
    }
}
