use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{decode_measurement, default_true, running_distance, water_content};
use super::{Category, Measurement, ModelError, Record, RunningDistance, WaterContent};

/// A target amount for one category.
///
/// Older goals are deactivated rather than deleted when a new goal of the same
/// category is saved, so the goals file doubles as a history of targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Assigned by the store on insertion; `0` until then.
    #[serde(default)]
    pub id: u32,
    pub category: Category,
    pub value: f64,
    /// Unit name. Deserializing does not check it; `to_running_distance`,
    /// `to_water_content` and `measurement` reject names outside `category`'s set.
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Goal {
    /// Build an unsaved goal, rejecting non-positive or non-finite values.
    pub fn from_measurement(measurement: impl Into<Measurement>) -> Result<Self, ModelError> {
        let measurement = measurement.into();
        measurement.validate()?;
        Ok(Self {
            id: 0,
            category: measurement.category(),
            value: measurement.value(),
            unit: measurement.unit_name().to_string(),
            created_at: None,
            is_active: true,
        })
    }

    pub fn from_running_distance(running: &RunningDistance) -> Result<Self, ModelError> {
        Self::from_measurement(*running)
    }

    pub fn from_water_content(water: &WaterContent) -> Result<Self, ModelError> {
        Self::from_measurement(*water)
    }

    pub fn is_running(&self) -> bool {
        self.category == Category::Running
    }

    pub fn is_water(&self) -> bool {
        self.category == Category::Water
    }

    pub fn to_running_distance(&self) -> Result<RunningDistance, ModelError> {
        running_distance(self.category, self.value, &self.unit)
    }

    pub fn to_water_content(&self) -> Result<WaterContent, ModelError> {
        water_content(self.category, self.value, &self.unit)
    }

    pub fn measurement(&self) -> Result<Measurement, ModelError> {
        decode_measurement(self.category, self.value, &self.unit)
    }
}

impl Record for Goal {
    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
    }

    fn category(&self) -> Category {
        self.category
    }
}
