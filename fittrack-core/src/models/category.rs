use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// The kind of activity a record tracks. Determines which unit set is valid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Running,
    Water,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Running, Category::Water];

    /// The tag written to the backing files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Water => "Water",
        }
    }

    /// Exact match against a stored tag. Anything else, including a
    /// differently-cased tag, is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Running" => Some(Self::Running),
            "Water" => Some(Self::Water),
            _ => None,
        }
    }

    /// Unit names accepted for this category.
    pub fn unit_names(&self) -> Vec<&'static str> {
        match self {
            Self::Running => super::DistanceUnit::ALL.iter().map(|u| u.as_str()).collect(),
            Self::Water => super::WaterUnit::ALL.iter().map(|u| u.as_str()).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for user input: case-insensitive.
impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}
