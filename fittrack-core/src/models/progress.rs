use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{decode_measurement, running_distance, water_content};
use super::{Category, Measurement, ModelError, Record, RunningDistance, WaterContent};

/// A logged amount of running distance or water intake.
///
/// Same shape as [`Goal`](super::Goal) without the activity flag. Entries are
/// append-only: nothing deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    #[serde(default)]
    pub id: u32,
    pub category: Category,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProgressEntry {
    pub fn from_measurement(measurement: impl Into<Measurement>) -> Result<Self, ModelError> {
        let measurement = measurement.into();
        measurement.validate()?;
        Ok(Self {
            id: 0,
            category: measurement.category(),
            value: measurement.value(),
            unit: measurement.unit_name().to_string(),
            created_at: None,
        })
    }

    pub fn from_running_distance(running: &RunningDistance) -> Result<Self, ModelError> {
        Self::from_measurement(*running)
    }

    pub fn from_water_content(water: &WaterContent) -> Result<Self, ModelError> {
        Self::from_measurement(*water)
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

impl Record for ProgressEntry {
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
