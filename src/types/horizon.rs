//! Horizon slots: the three user-adjustable offsets (in years from now) at
//! which the fitted trends are extrapolated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizonSlot {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Horizon offset {offset} is outside the {slot} range {min}-{max}")]
pub struct HorizonError {
    pub slot: HorizonSlot,
    pub offset: u32,
    pub min: u32,
    pub max: u32,
}

impl HorizonSlot {
    pub const ALL: [HorizonSlot; 3] = [HorizonSlot::Short, HorizonSlot::Medium, HorizonSlot::Long];

    /// Recommended offset range; the three ranges do not overlap.
    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            HorizonSlot::Short => 1..=50,
            HorizonSlot::Medium => 51..=500,
            HorizonSlot::Long => 501..=2000,
        }
    }

    pub fn default_offset(&self) -> u32 {
        match self {
            HorizonSlot::Short => 10,
            HorizonSlot::Medium => 100,
            HorizonSlot::Long => 1000,
        }
    }

    pub fn validate(&self, offset: u32) -> Result<u32, HorizonError> {
        let range = self.range();
        if range.contains(&offset) {
            Ok(offset)
        } else {
            Err(HorizonError {
                slot: *self,
                offset,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }
}

impl fmt::Display for HorizonSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HorizonSlot::Short => "short",
            HorizonSlot::Medium => "medium",
            HorizonSlot::Long => "long",
        };
        write!(f, "{}", name)
    }
}

/// Offsets for the short, medium and long horizon, validated against their slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonOffsets {
    short: u32,
    medium: u32,
    long: u32,
}

impl HorizonOffsets {
    pub fn new(short: u32, medium: u32, long: u32) -> Result<Self, HorizonError> {
        Ok(Self {
            short: HorizonSlot::Short.validate(short)?,
            medium: HorizonSlot::Medium.validate(medium)?,
            long: HorizonSlot::Long.validate(long)?,
        })
    }

    pub fn get(&self, slot: HorizonSlot) -> u32 {
        match slot {
            HorizonSlot::Short => self.short,
            HorizonSlot::Medium => self.medium,
            HorizonSlot::Long => self.long,
        }
    }

    /// Target years `current_year + offset`, in slot order.
    pub fn years(&self, current_year: i32) -> Vec<i32> {
        HorizonSlot::ALL
            .iter()
            .map(|slot| current_year + self.get(*slot) as i32)
            .collect()
    }
}

impl Default for HorizonOffsets {
    fn default() -> Self {
        Self {
            short: HorizonSlot::Short.default_offset(),
            medium: HorizonSlot::Medium.default_offset(),
            long: HorizonSlot::Long.default_offset(),
        }
    }
}
