use crate::global_variables::*;

/// One named scalar of a post-processing column file.
#[derive(Clone, Debug, PartialEq)]
pub struct PostResult {
    pub name: String,
    pub label: String,
    pub value: Float,
    pub unit: Option<String>,
}

impl PostResult {
    pub fn new(name: String, label: String, value: Float, unit: Option<String>) -> Self {
        Self {
            name,
            label,
            value,
            unit,
        }
    }

    /// Label followed by the unit, if there is one.
    pub fn caption(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} [{}]", self.label, unit),
            None => self.label.clone(),
        }
    }
}
