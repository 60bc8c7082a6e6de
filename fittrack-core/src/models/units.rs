use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Category, ModelError};

const METERS_PER_MILE: f64 = 1609.34;
const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_FOOT: f64 = 0.3048;

const OUNCES_PER_CUP: f64 = 8.0;
const OUNCES_PER_LITER: f64 = 33.814;

/// Units valid for [`Category::Running`]. Meters is the conversion base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    Miles,
    Meters,
    Kilometers,
    Feet,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 4] = [
        DistanceUnit::Miles,
        DistanceUnit::Meters,
        DistanceUnit::Kilometers,
        DistanceUnit::Feet,
    ];

    /// Exact match on a stored unit name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miles => "Miles",
            Self::Meters => "Meters",
            Self::Kilometers => "Kilometers",
            Self::Feet => "Feet",
        }
    }

    /// Meters in one of this unit.
    fn meters(&self) -> f64 {
        match self {
            Self::Miles => METERS_PER_MILE,
            Self::Meters => 1.0,
            Self::Kilometers => METERS_PER_KILOMETER,
            Self::Feet => METERS_PER_FOOT,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for user input: trimmed, case-insensitive.
impl FromStr for DistanceUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::InvalidUnit {
                category: Category::Running,
                unit: s.to_string(),
            })
    }
}

/// Units valid for [`Category::Water`]. Ounces is the conversion base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WaterUnit {
    Ounces,
    Cups,
    Liters,
}

impl WaterUnit {
    pub const ALL: [WaterUnit; 3] = [WaterUnit::Ounces, WaterUnit::Cups, WaterUnit::Liters];

    /// Exact match on a stored unit name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ounces => "Ounces",
            Self::Cups => "Cups",
            Self::Liters => "Liters",
        }
    }

    /// Ounces in one of this unit.
    fn ounces(&self) -> f64 {
        match self {
            Self::Ounces => 1.0,
            Self::Cups => OUNCES_PER_CUP,
            Self::Liters => OUNCES_PER_LITER,
        }
    }
}

impl fmt::Display for WaterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for user input: trimmed, case-insensitive.
impl FromStr for WaterUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::InvalidUnit {
                category: Category::Water,
                unit: s.to_string(),
            })
    }
}

/// A running distance. Pure value; conversion never mutates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunningDistance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl RunningDistance {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    /// The magnitude expressed in `target`, going through meters.
    pub fn convert_to(&self, target: DistanceUnit) -> f64 {
        if self.unit == target {
            return self.value;
        }
        self.value * self.unit.meters() / target.meters()
    }
}

/// An amount of water. Pure value; conversion never mutates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WaterContent {
    pub value: f64,
    pub unit: WaterUnit,
}

impl WaterContent {
    pub fn new(value: f64, unit: WaterUnit) -> Self {
        Self { value, unit }
    }

    /// The magnitude expressed in `target`, going through ounces.
    pub fn convert_to(&self, target: WaterUnit) -> f64 {
        if self.unit == target {
            return self.value;
        }
        self.value * self.unit.ounces() / target.ounces()
    }
}
