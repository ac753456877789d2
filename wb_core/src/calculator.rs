//! # Manual Weight & Balance Calculator
//!
//! A worksheet the student fills in by hand. Each row has a weight, an arm
//! and a moment index:
//!
//! - changing a row's weight or arm recomputes its index (1 dp) when both
//!   are positive
//! - otherwise the index keeps whatever was last entered
//! - CG, %MAC and the limits verdict exist only once the total weight is
//!   positive
//!
//! ## Example
//!
//! ```rust
//! use wb_core::aircraft::ECHO;
//! use wb_core::calculator::{ManualCalculator, CalculatorRowId};
//!
//! let mut calc = ManualCalculator::for_aircraft(&ECHO);
//! calc.set_weight(CalculatorRowId::BasicEmpty, 2000.0).unwrap();
//! calc.set_index(CalculatorRowId::BasicEmpty, 500.0).unwrap();
//! calc.set_weight(CalculatorRowId::Row1, 80.0).unwrap();
//!
//! let result = calc.evaluate(&ECHO);
//! assert_eq!(result.totals.weight, 2080.0);
//! assert!(result.balance.is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::aircraft::{AircraftConfig, Station};
use crate::equations::{aft_cg_limit, cg_position, forward_cg_limit, moment_index, percent_mac, round_to};
use crate::errors::{WbError, WbResult};

/// The fixed worksheet rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorRowId {
    BasicEmpty,
    Row1,
    Row2,
    Row3,
    ForwardCompartment,
    RearCompartment,
    MainFuel,
}

impl CalculatorRowId {
    pub const ALL: [CalculatorRowId; 7] = [
        CalculatorRowId::BasicEmpty,
        CalculatorRowId::Row1,
        CalculatorRowId::Row2,
        CalculatorRowId::Row3,
        CalculatorRowId::ForwardCompartment,
        CalculatorRowId::RearCompartment,
        CalculatorRowId::MainFuel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CalculatorRowId::BasicEmpty => "Basic Empty Weight",
            CalculatorRowId::Row1 => "Row 1 (Pilot + Pax)",
            CalculatorRowId::Row2 => "Row 2 (2 Pax)",
            CalculatorRowId::Row3 => "Row 3 (2 Pax)",
            CalculatorRowId::ForwardCompartment => "Forward Compt",
            CalculatorRowId::RearCompartment => "Rear Compt",
            CalculatorRowId::MainFuel => "Main Fuel",
        }
    }

    /// Station whose arm is preset; the basic empty row has none
    pub fn station(&self) -> Option<Station> {
        match self {
            CalculatorRowId::BasicEmpty => None,
            CalculatorRowId::Row1 => Some(Station::Row1),
            CalculatorRowId::Row2 => Some(Station::Row2),
            CalculatorRowId::Row3 => Some(Station::Row3),
            CalculatorRowId::ForwardCompartment => Some(Station::ForwardCompartment),
            CalculatorRowId::RearCompartment => Some(Station::RearCompartment),
            CalculatorRowId::MainFuel => Some(Station::MainTanks),
        }
    }
}

/// One editable row. Zero means "not entered".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorRow {
    pub id: CalculatorRowId,
    pub weight_kg: f64,
    pub arm_mm: f64,
    pub index: f64,
}

impl CalculatorRow {
    fn recompute_index(&mut self) {
        if self.weight_kg > 0.0 && self.arm_mm > 0.0 {
            self.index = round_to(moment_index(self.weight_kg, self.arm_mm), 1);
        }
    }
}

/// Summed worksheet columns
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatorTotals {
    pub weight: f64,
    pub index: f64,
}

/// CG figures and limits verdict for a positive total weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceFigures {
    pub cg_mm: f64,
    pub percent_mac: f64,
    pub forward_limit_mm: f64,
    pub aft_limit_mm: f64,
    pub cg_within_limits: bool,
    pub weight_within_mtow: bool,
}

impl BalanceFigures {
    pub fn within_limits(&self) -> bool {
        self.cg_within_limits && self.weight_within_mtow
    }
}

/// Worksheet totals plus CG figures when they exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub totals: CalculatorTotals,
    pub balance: Option<BalanceFigures>,
}

/// The editable worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualCalculator {
    pub rows: Vec<CalculatorRow>,
}

impl ManualCalculator {
    /// Empty worksheet with the aircraft's station arms preset.
    pub fn for_aircraft(config: &AircraftConfig) -> Self {
        let rows = CalculatorRowId::ALL
            .iter()
            .map(|&id| CalculatorRow {
                id,
                weight_kg: 0.0,
                arm_mm: id.station().map_or(0.0, |s| config.arm(s)),
                index: 0.0,
            })
            .collect();
        ManualCalculator { rows }
    }

    pub fn row(&self, id: CalculatorRowId) -> Option<&CalculatorRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    fn row_mut(&mut self, id: CalculatorRowId) -> WbResult<&mut CalculatorRow> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WbError::invalid_input("row", id.label(), "row is not on this worksheet"))
    }

    pub fn set_weight(&mut self, id: CalculatorRowId, weight_kg: f64) -> WbResult<()> {
        check_finite("weight", weight_kg)?;
        let row = self.row_mut(id)?;
        row.weight_kg = weight_kg;
        row.recompute_index();
        Ok(())
    }

    pub fn set_arm(&mut self, id: CalculatorRowId, arm_mm: f64) -> WbResult<()> {
        check_finite("arm", arm_mm)?;
        let row = self.row_mut(id)?;
        row.arm_mm = arm_mm;
        row.recompute_index();
        Ok(())
    }

    /// Enter an index directly. A later weight or arm change may overwrite it.
    pub fn set_index(&mut self, id: CalculatorRowId, index: f64) -> WbResult<()> {
        check_finite("index", index)?;
        self.row_mut(id)?.index = index;
        Ok(())
    }

    pub fn totals(&self) -> CalculatorTotals {
        self.rows.iter().fold(CalculatorTotals::default(), |acc, r| CalculatorTotals {
            weight: acc.weight + r.weight_kg,
            index: acc.index + r.index,
        })
    }

    /// Totals, and CG figures when the total weight is positive.
    pub fn evaluate(&self, config: &AircraftConfig) -> CalculatorResult {
        let totals = self.totals();
        let balance = if totals.weight > 0.0 {
            cg_position(totals.weight, totals.index).ok().map(|cg_mm| {
                let forward_limit_mm = forward_cg_limit(config, totals.weight);
                let aft_limit_mm = aft_cg_limit(config);
                BalanceFigures {
                    cg_mm,
                    percent_mac: percent_mac(config, cg_mm),
                    forward_limit_mm,
                    aft_limit_mm,
                    cg_within_limits: cg_mm >= forward_limit_mm && cg_mm <= aft_limit_mm,
                    weight_within_mtow: totals.weight <= config.weights.max_takeoff_kg,
                }
            })
        } else {
            None
        };
        CalculatorResult { totals, balance }
    }
}

fn check_finite(field: &str, value: f64) -> WbResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WbError::invalid_input(field, value.to_string(), "must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::ECHO;
    use approx::assert_relative_eq;

    #[test]
    fn test_preset_arms() {
        let calc = ManualCalculator::for_aircraft(&ECHO);
        let arms: Vec<f64> = calc.rows.iter().map(|r| r.arm_mm).collect();
        assert_eq!(arms, vec![0.0, 2290.0, 3300.0, 4300.0, 500.0, 5000.0, 1780.0]);
        assert_eq!(calc.rows[0].id.label(), "Basic Empty Weight");
    }

    #[test]
    fn test_index_auto_computed() {
        let mut calc = ManualCalculator::for_aircraft(&ECHO);
        calc.set_weight(CalculatorRowId::Row1, 80.0).unwrap();
        // 80 * 2290 / 10000 = 18.32
        assert_eq!(calc.row(CalculatorRowId::Row1).unwrap().index, 18.3);

        calc.set_arm(CalculatorRowId::Row1, 3300.0).unwrap();
        assert_eq!(calc.row(CalculatorRowId::Row1).unwrap().index, 26.4);
    }

    #[test]
    fn test_index_editable_without_arm() {
        let mut calc = ManualCalculator::for_aircraft(&ECHO);
        calc.set_weight(CalculatorRowId::BasicEmpty, 2000.0).unwrap();
        assert_eq!(calc.row(CalculatorRowId::BasicEmpty).unwrap().index, 0.0);

        calc.set_index(CalculatorRowId::BasicEmpty, 500.0).unwrap();
        calc.set_weight(CalculatorRowId::BasicEmpty, 2010.0).unwrap();
        assert_eq!(calc.row(CalculatorRowId::BasicEmpty).unwrap().index, 500.0);
    }

    #[test]
    fn test_no_balance_figures_when_empty() {
        let calc = ManualCalculator::for_aircraft(&ECHO);
        let result = calc.evaluate(&ECHO);
        assert_eq!(result.totals.weight, 0.0);
        assert!(result.balance.is_none());
    }

    #[test]
    fn test_worked_loading() {
        let mut calc = ManualCalculator::for_aircraft(&ECHO);
        calc.set_weight(CalculatorRowId::BasicEmpty, 2000.0).unwrap();
        calc.set_index(CalculatorRowId::BasicEmpty, 500.0).unwrap();
        calc.set_weight(CalculatorRowId::Row1, 80.0).unwrap();
        calc.set_weight(CalculatorRowId::RearCompartment, 30.0).unwrap();
        calc.set_weight(CalculatorRowId::MainFuel, 157.0).unwrap();

        let result = calc.evaluate(&ECHO);
        assert_eq!(result.totals.weight, 2267.0);
        assert_relative_eq!(result.totals.index, 561.2, epsilon = 1e-9);

        let balance = result.balance.unwrap();
        assert_relative_eq!(balance.cg_mm, 2475.518, epsilon = 0.001);
        assert_relative_eq!(balance.percent_mac, 15.03, epsilon = 0.01);
        assert_eq!(balance.forward_limit_mm, 2400.0);
        assert!(balance.within_limits());
    }

    #[test]
    fn test_mtow_exceeded() {
        let mut calc = ManualCalculator::for_aircraft(&ECHO);
        calc.set_weight(CalculatorRowId::BasicEmpty, 3000.0).unwrap();
        calc.set_index(CalculatorRowId::BasicEmpty, 780.0).unwrap();

        let balance = calc.evaluate(&ECHO).balance.unwrap();
        assert!(balance.cg_within_limits);
        assert!(!balance.weight_within_mtow);
        assert!(!balance.within_limits());
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut calc = ManualCalculator::for_aircraft(&ECHO);
        let err = calc.set_weight(CalculatorRowId::Row2, f64::NAN).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
