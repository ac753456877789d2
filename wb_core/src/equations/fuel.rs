//! # Fuel Conversions
//!
//! AVGAS volume-to-mass conversions used on the Echo worksheets. The factors
//! come from the aircraft configuration so the reference sheet and the
//! answers always agree.

use crate::aircraft::AircraftConfig;

/// Fuel mass for a volume in US gallons.
///
/// # Formula
/// - kg = gal x 2.72 x 0.72
#[inline]
pub fn fuel_gal_to_kg(config: &AircraftConfig, gallons: f64) -> f64 {
    gallons * config.fuel.gal_to_litre * config.fuel.density_kg_per_l
}

/// Fuel volume in US gallons for a mass.
#[inline]
pub fn fuel_kg_to_gal(config: &AircraftConfig, kg: f64) -> f64 {
    kg / (config.fuel.gal_to_litre * config.fuel.density_kg_per_l)
}

/// US gallons to litres using the worksheet factor.
#[inline]
pub fn gal_to_litres(config: &AircraftConfig, gallons: f64) -> f64 {
    gallons * config.fuel.gal_to_litre
}
