use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Category, DistanceUnit, Measurement, ModelError, RunningDistance, WaterContent, WaterUnit};

/// What a record store needs from the records it holds.
///
/// Records are plain owned values: cloning one yields an independent copy, so
/// handing out clones is enough to keep callers away from store internals.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn category(&self) -> Category;
}

pub(crate) fn running_distance(
    category: Category,
    value: f64,
    unit: &str,
) -> Result<RunningDistance, ModelError> {
    if category != Category::Running {
        return Err(ModelError::CategoryMismatch {
            expected: Category::Running,
            actual: category,
        });
    }
    let unit = DistanceUnit::from_name(unit).ok_or_else(|| ModelError::InvalidUnit {
        category,
        unit: unit.to_string(),
    })?;
    Ok(RunningDistance::new(value, unit))
}

pub(crate) fn water_content(
    category: Category,
    value: f64,
    unit: &str,
) -> Result<WaterContent, ModelError> {
    if category != Category::Water {
        return Err(ModelError::CategoryMismatch {
            expected: Category::Water,
            actual: category,
        });
    }
    let unit = WaterUnit::from_name(unit).ok_or_else(|| ModelError::InvalidUnit {
        category,
        unit: unit.to_string(),
    })?;
    Ok(WaterContent::new(value, unit))
}

/// Decode a stored category/value/unit triple. Unit names must match exactly.
pub(crate) fn decode_measurement(
    category: Category,
    value: f64,
    unit: &str,
) -> Result<Measurement, ModelError> {
    match category {
        Category::Running => running_distance(category, value, unit).map(Measurement::Running),
        Category::Water => water_content(category, value, unit).map(Measurement::Water),
    }
}

pub(crate) fn default_true() -> bool {
    true
}
