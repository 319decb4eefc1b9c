//! Text transformations offered by the text action.

use serde::{Deserialize, Serialize};

/// Supported text transformations. Unknown values fall back to upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformationType {
    ToUpperCase,
    ToLowerCase,
}

impl TransformationType {
    /// Parse the wire value, defaulting to [`TransformationType::ToUpperCase`].
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("TO_LOWER_CASE") => TransformationType::ToLowerCase,
            _ => TransformationType::ToUpperCase,
        }
    }

    pub fn apply(self, value: &str) -> String {
        match self {
            TransformationType::ToUpperCase => value.to_uppercase(),
            TransformationType::ToLowerCase => value.to_lowercase(),
        }
    }
}

/// One entry of the remote list offered to the platform's recipe editor.
#[derive(Debug, Clone, Serialize)]
pub struct TransformationOption {
    pub title: &'static str,
    pub value: TransformationType,
}

/// All options, in display order.
pub const TRANSFORMATION_OPTIONS: [TransformationOption; 2] = [
    TransformationOption {
        title: "to upper case",
        value: TransformationType::ToUpperCase,
    },
    TransformationOption {
        title: "to lower case",
        value: TransformationType::ToLowerCase,
    },
];
