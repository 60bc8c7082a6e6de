use serde::{Deserialize, Serialize};

use super::{Category, DistanceUnit, ModelError, RunningDistance, WaterContent, WaterUnit};

/// A value object tagged by its category.
///
/// This is the typed form of a record's `category`/`value`/`unit` triple: the
/// variant fixes the category, and the payload's unit type restricts the unit
/// to that category's set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Measurement {
    Running(RunningDistance),
    Water(WaterContent),
}

impl Measurement {
    /// Decode a category, magnitude and unit name. The magnitude is not
    /// validated here; see [`Measurement::validate`].
    pub fn parse(category: Category, value: f64, unit: &str) -> Result<Self, ModelError> {
        match category {
            Category::Running => Ok(Self::Running(RunningDistance::new(value, unit.parse()?))),
            Category::Water => Ok(Self::Water(WaterContent::new(value, unit.parse()?))),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Running(_) => Category::Running,
            Self::Water(_) => Category::Water,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Running(d) => d.value,
            Self::Water(w) => w.value,
        }
    }

    pub fn unit_name(&self) -> &'static str {
        match self {
            Self::Running(d) => d.unit.as_str(),
            Self::Water(w) => w.unit.as_str(),
        }
    }

    /// Records only accept finite, strictly positive magnitudes.
    pub fn validate(&self) -> Result<(), ModelError> {
        let value = self.value();
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ModelError::InvalidValue(value))
        }
    }

    /// Convert to another unit name of the same category.
    pub fn convert_to(&self, unit: &str) -> Result<Self, ModelError> {
        match self {
            Self::Running(d) => {
                let target: DistanceUnit = unit.parse()?;
                Ok(Self::Running(RunningDistance::new(d.convert_to(target), target)))
            }
            Self::Water(w) => {
                let target: WaterUnit = unit.parse()?;
                Ok(Self::Water(WaterContent::new(w.convert_to(target), target)))
            }
        }
    }
}

impl From<RunningDistance> for Measurement {
    fn from(d: RunningDistance) -> Self {
        Self::Running(d)
    }
}

impl From<WaterContent> for Measurement {
    fn from(w: WaterContent) -> Self {
        Self::Water(w)
    }
}
