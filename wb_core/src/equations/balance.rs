//! # Balance Formulas
//!
//! Moment index, CG position, %MAC, the two-point CG envelope and the
//! add-weight (ballast) formula.
//!
//! ## Notation
//!
//! - `W` = Total weight (kg)
//! - `I` = Total moment index (kg·mm / 10000)
//! - `a` = Station arm (mm aft of datum)
//! - `CG` = Centre of gravity (mm aft of datum)
//! - `LE` = MAC leading edge (mm aft of datum)
//! - `MAC` = Mean aerodynamic chord length (mm)
//!
//! ## Example
//!
//! ```rust
//! use wb_core::aircraft::ECHO;
//! use wb_core::equations::{cg_position, percent_mac, forward_cg_limit};
//!
//! let cg = cg_position(2267.0, 561.2).unwrap();
//! assert!((percent_mac(&ECHO, cg) - 15.03).abs() < 0.01);
//! assert_eq!(forward_cg_limit(&ECHO, 2267.0), 2400.0);
//! ```

use tracing::warn;

use crate::aircraft::AircraftConfig;
use crate::errors::{WbError, WbResult};

/// Divisor that turns kg·mm into index units
pub const INDEX_DIVISOR: f64 = 10_000.0;

/// Moment index for a mass at an arm.
///
/// # Formula
/// - I = W·a / 10000
///
/// No rounding is applied here; worksheets round each row to 1 dp.
#[inline]
pub fn moment_index(weight_kg: f64, arm_mm: f64) -> f64 {
    weight_kg * arm_mm / INDEX_DIVISOR
}

/// CG position from total weight and total moment index.
///
/// # Formula
/// - CG = I·10000 / W
///
/// # Errors
/// `DegenerateDivision` when the total weight is zero or not finite.
pub fn cg_position(total_weight_kg: f64, total_index: f64) -> WbResult<f64> {
    if !total_weight_kg.is_finite() || total_weight_kg == 0.0 {
        warn!(total_weight_kg, "cg position requested for a degenerate total weight");
        return Err(WbError::degenerate_division(
            "cg_position",
            format!("total weight is {}", total_weight_kg),
        ));
    }
    Ok(total_index * INDEX_DIVISOR / total_weight_kg)
}

/// CG expressed as a percentage of the mean aerodynamic chord.
///
/// # Formula
/// - %MAC = (CG - LE) / MAC x 100
#[inline]
pub fn percent_mac(config: &AircraftConfig, cg_mm: f64) -> f64 {
    (cg_mm - config.mac.leading_edge_mm) / config.mac.length_mm * 100.0
}

/// Position of `weight_kg` between the light and heavy envelope anchors.
///
/// Returns `None` at or outside the anchors, where the forward limit is flat.
pub fn forward_limit_ratio(config: &AircraftConfig, weight_kg: f64) -> Option<f64> {
    let light = &config.cg_range.light;
    let heavy = &config.cg_range.heavy;
    if weight_kg <= light.weight_kg || weight_kg >= heavy.weight_kg {
        return None;
    }
    Some((weight_kg - light.weight_kg) / (heavy.weight_kg - light.weight_kg))
}

/// Forward CG limit at a given weight.
///
/// # Formula
/// - W ≤ W_light: light forward limit
/// - W ≥ W_heavy: heavy forward limit
/// - otherwise: fwd_light + r·(fwd_heavy - fwd_light), r = (W - W_light)/(W_heavy - W_light)
pub fn forward_cg_limit(config: &AircraftConfig, weight_kg: f64) -> f64 {
    let light = &config.cg_range.light;
    let heavy = &config.cg_range.heavy;
    if weight_kg <= light.weight_kg {
        return light.forward_mm;
    }
    if weight_kg >= heavy.weight_kg {
        return heavy.forward_mm;
    }
    let ratio = (weight_kg - light.weight_kg) / (heavy.weight_kg - light.weight_kg);
    light.forward_mm + ratio * (heavy.forward_mm - light.forward_mm)
}

/// Aft CG limit (the same at every weight).
#[inline]
pub fn aft_cg_limit(config: &AircraftConfig) -> f64 {
    config.cg_range.light.aft_mm
}

/// Whether a CG lies inside the envelope at the given weight.
///
/// Only the CG is checked. MTOW/MLW/MZFW are the caller's responsibility.
pub fn is_within_limits(config: &AircraftConfig, weight_kg: f64, cg_mm: f64) -> bool {
    cg_mm >= forward_cg_limit(config, weight_kg) && cg_mm <= aft_cg_limit(config)
}

/// Mass to add at `ballast_arm_mm` to move the CG from `current_cg_mm` to `target_cg_mm`.
///
/// # Formula
/// - B = W·(CG_target - CG_current) / (a_ballast - CG_target)
///
/// A positive result means mass is added. A negative result means the
/// station is on the wrong side of the target for adding mass.
///
/// # Errors
/// `DegenerateDivision` when the ballast arm coincides with the target CG.
pub fn ballast_required(
    current_weight_kg: f64,
    current_cg_mm: f64,
    target_cg_mm: f64,
    ballast_arm_mm: f64,
) -> WbResult<f64> {
    let lever = ballast_arm_mm - target_cg_mm;
    if lever == 0.0 || !lever.is_finite() {
        warn!(ballast_arm_mm, target_cg_mm, "ballast arm has no lever about the target CG");
        return Err(WbError::degenerate_division(
            "ballast_required",
            format!("ballast arm {} mm coincides with target CG", ballast_arm_mm),
        ));
    }
    Ok(current_weight_kg * (target_cg_mm - current_cg_mm) / lever)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::ECHO;

    #[test]
    fn test_moment_index_is_unrounded() {
        assert_eq!(moment_index(80.0, 2290.0), 80.0 * 2290.0 / 10000.0);
        assert_eq!(moment_index(157.0, 1780.0), 27.946);
        assert_eq!(moment_index(-50.0, 1780.0), -8.9);
    }

    #[test]
    fn test_cg_position() {
        let cg = cg_position(2000.0, 500.0).unwrap();
        assert_eq!(cg, 2500.0);
    }

    #[test]
    fn test_cg_position_zero_weight_is_an_error() {
        let err = cg_position(0.0, 12.0).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_DIVISION");
    }

    #[test]
    fn test_percent_mac() {
        assert_eq!(percent_mac(&ECHO, 2190.0), 0.0);
        assert_eq!(percent_mac(&ECHO, 4090.0), 100.0);
        assert!((percent_mac(&ECHO, 2400.0) - 11.0526).abs() < 1e-3);
    }

    #[test]
    fn test_forward_limit_flat_regions() {
        assert_eq!(forward_cg_limit(&ECHO, 1500.0), 2400.0);
        assert_eq!(forward_cg_limit(&ECHO, 2360.0), 2400.0);
        assert_eq!(forward_cg_limit(&ECHO, 2950.0), 2560.0);
        assert_eq!(forward_cg_limit(&ECHO, 3200.0), 2560.0);
    }

    #[test]
    fn test_forward_limit_interpolation() {
        // Midpoint of 2360..2950 is 2655 -> 2480 mm
        assert!((forward_cg_limit(&ECHO, 2655.0) - 2480.0).abs() < 1e-9);
        assert_eq!(forward_limit_ratio(&ECHO, 2655.0), Some(0.5));
        assert_eq!(forward_limit_ratio(&ECHO, 2360.0), None);
    }

    #[test]
    fn test_forward_limit_is_monotonic_and_continuous() {
        let mut previous = forward_cg_limit(&ECHO, 2300.0);
        let mut weight = 2300.0;
        while weight <= 3000.0 {
            let limit = forward_cg_limit(&ECHO, weight);
            assert!(limit >= previous, "limit decreased at {} kg", weight);
            // 160 mm over 590 kg: a 1 kg step moves the limit < 0.3 mm
            assert!(limit - previous < 0.3, "jump at {} kg", weight);
            previous = limit;
            weight += 1.0;
        }
    }

    #[test]
    fn test_within_limits() {
        assert!(is_within_limits(&ECHO, 2200.0, 2400.0));
        assert!(is_within_limits(&ECHO, 2200.0, 2680.0));
        assert!(!is_within_limits(&ECHO, 2200.0, 2399.9));
        assert!(!is_within_limits(&ECHO, 2200.0, 2680.1));
        // Heavier aircraft has a more restrictive forward limit
        assert!(!is_within_limits(&ECHO, 2950.0, 2500.0));
        assert_eq!(aft_cg_limit(&ECHO), 2680.0);
    }

    #[test]
    fn test_ballast_required() {
        // 2100 kg at 2350 mm, target 2410 mm, ballast at 5000 mm
        let b = ballast_required(2100.0, 2350.0, 2410.0, 5000.0).unwrap();
        assert!((b - 2100.0 * 60.0 / 2590.0).abs() < 1e-9);
        assert!(b > 0.0);

        // Ballast forward of the target gives a negative answer
        let wrong_side = ballast_required(2100.0, 2350.0, 2410.0, 500.0).unwrap();
        assert!(wrong_side < 0.0);
    }

    #[test]
    fn test_ballast_at_target_is_an_error() {
        assert!(ballast_required(2100.0, 2350.0, 2410.0, 2410.0).is_err());
    }
}
