//! # Unit Types
//!
//! Type-safe wrappers for the units that appear on a weight & balance
//! worksheet, plus the display-unit choices used when narrating a scenario.
//!
//! ## Internal Units
//!
//! All computation happens in:
//! - Mass: kilograms (kg)
//! - Arm: millimetres aft of datum (mm)
//! - Fuel volume: US gallons (gal)
//!
//! Pounds and litres only ever appear in generated text.
//!
//! ## Conversion Factors
//!
//! The factors are the exam approximations, not SI-exact values:
//! - 1 kg = 2.2 lb
//! - 1 US gal = 2.72 L (the worksheet figure, already density-adjusted)
//!
//! ## Example
//!
//! ```rust
//! use wb_core::units::{Kilograms, Pounds, UsGallons, Litres};
//!
//! let cargo = Kilograms(100.0);
//! let cargo_lb: Pounds = cargo.into();
//! assert_eq!(cargo_lb.0, 220.0);
//!
//! let fuel: Litres = UsGallons(50.0).into();
//! assert_eq!(fuel.0, 136.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::equations::round_to;

/// Pounds per kilogram (exam approximation)
pub const LB_PER_KG: f64 = 2.2;

/// Litres per US gallon as printed on the Echo loading data
pub const LITRES_PER_US_GALLON: f64 = 2.72;

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LB_PER_KG)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Fuel volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsGallons(pub f64);

/// Fuel volume in litres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Litres(pub f64);

impl From<UsGallons> for Litres {
    fn from(gal: UsGallons) -> Self {
        Litres(gal.0 * LITRES_PER_US_GALLON)
    }
}

// ============================================================================
// Display Units
// ============================================================================

/// Unit used when a weight is quoted in scenario text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Short label used in prompts ("kg" / "lbs")
    pub fn label(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Quote a mass held in kg in this unit, e.g. "80 kg" or "176 lbs".
    ///
    /// Pounds are rounded to whole numbers; kilograms are printed as held.
    pub fn format(&self, kg: f64) -> String {
        match self {
            WeightUnit::Kg => format!("{} kg", kg),
            WeightUnit::Lbs => format!("{} lbs", round_to(Pounds::from(Kilograms(kg)).0, 0)),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit used when a fuel quantity is quoted in scenario text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelUnit {
    #[default]
    Gal,
    Lt,
}

impl FuelUnit {
    /// Short label used in prompts and table rows ("gal" / "lt")
    pub fn label(&self) -> &'static str {
        match self {
            FuelUnit::Gal => "gal",
            FuelUnit::Lt => "lt",
        }
    }

    /// Numeric value of a gallon quantity in this unit (litres rounded to whole numbers).
    pub fn display_value(&self, gallons: f64) -> f64 {
        match self {
            FuelUnit::Gal => gallons,
            FuelUnit::Lt => round_to(Litres::from(UsGallons(gallons)).0, 0),
        }
    }

    /// Quote a fuel quantity held in gallons, e.g. "80 US gallons" or "218 litres".
    pub fn format(&self, gallons: f64) -> String {
        match self {
            FuelUnit::Gal => format!("{} US gallons", gallons),
            FuelUnit::Lt => format!("{} litres", self.display_value(gallons)),
        }
    }
}

impl fmt::Display for FuelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
