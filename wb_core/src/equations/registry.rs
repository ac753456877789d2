//! # Formula Registry
//!
//! Central list of the formulas printed on reference sheets and quoted in
//! worked solutions. Expressions are plain ASCII so they read the same in a
//! terminal, in JSON and in the monospace working block of a PDF.
//!
//! ## Usage
//!
//! ```rust
//! use wb_core::aircraft::ECHO;
//! use wb_core::equations::registry::Formula;
//!
//! let meta = Formula::CgPosition.metadata(&ECHO);
//! assert_eq!(meta.expression, "CG = (Moment Index x 10000) / Weight");
//! ```

use serde::{Deserialize, Serialize};

use crate::aircraft::AircraftConfig;

/// Groups used to lay out the reference sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    /// Moment index and CG position
    Balance,
    /// CG envelope and %MAC
    Limits,
    /// Shifting the CG with added mass
    Ballast,
    /// Fuel and weight unit conversions
    Conversions,
}

impl FormulaCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::Balance => "Balance",
            FormulaCategory::Limits => "Limits",
            FormulaCategory::Ballast => "Ballast",
            FormulaCategory::Conversions => "Conversions",
        }
    }
}

/// Every formula the trainer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    MomentIndex,
    CgPosition,
    PercentMac,
    ForwardLimitRatio,
    ForwardLimitInterpolation,
    AddWeight,
    FuelGallonsToKg,
    FuelLitresToKg,
    GallonsToLitres,
    KgToLb,
}

/// Display metadata for one formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaMetadata {
    pub formula: Formula,
    pub name: &'static str,
    /// ASCII expression with the aircraft's constants substituted where the
    /// worksheet prints them
    pub expression: String,
    pub category: FormulaCategory,
}

impl Formula {
    /// Reference sheet order
    pub const ALL: [Formula; 10] = [
        Formula::MomentIndex,
        Formula::CgPosition,
        Formula::PercentMac,
        Formula::ForwardLimitRatio,
        Formula::ForwardLimitInterpolation,
        Formula::AddWeight,
        Formula::FuelGallonsToKg,
        Formula::FuelLitresToKg,
        Formula::GallonsToLitres,
        Formula::KgToLb,
    ];

    /// Short name for the formula
    pub fn name(&self) -> &'static str {
        match self {
            Formula::MomentIndex => "Moment Index",
            Formula::CgPosition => "CG Position",
            Formula::PercentMac => "%MAC",
            Formula::ForwardLimitRatio => "Interpolation Ratio",
            Formula::ForwardLimitInterpolation => "Forward CG Limit",
            Formula::AddWeight => "Add Weight (Ballast)",
            Formula::FuelGallonsToKg => "Fuel (US gal to kg)",
            Formula::FuelLitresToKg => "Fuel (litres to kg)",
            Formula::GallonsToLitres => "US gal to litres",
            Formula::KgToLb => "kg to lb",
        }
    }

    /// Category for reference sheet grouping
    pub fn category(&self) -> FormulaCategory {
        match self {
            Formula::MomentIndex | Formula::CgPosition => FormulaCategory::Balance,
            Formula::PercentMac | Formula::ForwardLimitRatio | Formula::ForwardLimitInterpolation => {
                FormulaCategory::Limits
            }
            Formula::AddWeight => FormulaCategory::Ballast,
            Formula::FuelGallonsToKg | Formula::FuelLitresToKg | Formula::GallonsToLitres | Formula::KgToLb => {
                FormulaCategory::Conversions
            }
        }
    }

    /// Expression text with the configuration's constants filled in.
    pub fn expression(&self, config: &AircraftConfig) -> String {
        let light = &config.cg_range.light;
        let heavy = &config.cg_range.heavy;
        match self {
            Formula::MomentIndex => "Moment Index = Weight x Arm / 10000".to_string(),
            Formula::CgPosition => "CG = (Moment Index x 10000) / Weight".to_string(),
            Formula::PercentMac => "%MAC = (CG - LE) / MAC x 100".to_string(),
            Formula::ForwardLimitRatio => format!(
                "Ratio = (Weight - {}) / ({} - {})",
                light.weight_kg, heavy.weight_kg, light.weight_kg
            ),
            Formula::ForwardLimitInterpolation => format!(
                "Forward Limit = {} + Ratio x ({} - {})",
                light.forward_mm, heavy.forward_mm, light.forward_mm
            ),
            Formula::AddWeight => {
                "Ballast = Weight x (Target CG - Current CG) / (Ballast Arm - Target CG)".to_string()
            }
            Formula::FuelGallonsToKg => format!(
                "kg = US gal x {} x {}",
                config.fuel.gal_to_litre, config.fuel.density_kg_per_l
            ),
            Formula::FuelLitresToKg => format!("kg = litres x {}", config.fuel.density_kg_per_l),
            Formula::GallonsToLitres => format!("litres = US gal x {}", config.fuel.gal_to_litre),
            Formula::KgToLb => format!("lb = kg x {}", crate::units::LB_PER_KG),
        }
    }

    /// Full metadata record
    pub fn metadata(&self, config: &AircraftConfig) -> FormulaMetadata {
        FormulaMetadata {
            formula: *self,
            name: self.name(),
            expression: self.expression(config),
            category: self.category(),
        }
    }
}

/// Metadata for every formula, in reference sheet order.
pub fn all_formulas(config: &AircraftConfig) -> Vec<FormulaMetadata> {
    Formula::ALL.iter().map(|f| f.metadata(config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::ECHO;

    #[test]
    fn test_all_formulas_listed_once() {
        let formulas = all_formulas(&ECHO);
        assert_eq!(formulas.len(), Formula::ALL.len());
        for (i, a) in Formula::ALL.iter().enumerate() {
            for b in Formula::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_expressions_use_config_constants() {
        assert_eq!(
            Formula::ForwardLimitRatio.expression(&ECHO),
            "Ratio = (Weight - 2360) / (2950 - 2360)"
        );
        assert_eq!(
            Formula::ForwardLimitInterpolation.expression(&ECHO),
            "Forward Limit = 2400 + Ratio x (2560 - 2400)"
        );
        assert_eq!(Formula::FuelGallonsToKg.expression(&ECHO), "kg = US gal x 2.72 x 0.72");
    }

    #[test]
    fn test_categories() {
        assert_eq!(Formula::AddWeight.category(), FormulaCategory::Ballast);
        assert_eq!(Formula::KgToLb.category().display_name(), "Conversions");
    }
}
