//! # Weight & Balance Check Question
//!
//! Take-off and landing weight and CG for a loading with planned burn-off,
//! and a verdict on whether the aircraft stays within limits for the whole
//! flight.
//!
//! The flight passes only when both phases pass:
//! - take-off: TOW ≤ MTOW and fwd(TOW) ≤ CG ≤ aft
//! - landing: LW ≤ MLW and fwd(LW) ≤ CG ≤ aft

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::workings::{totals_row, Workings};
use super::{new_question_id, units_note, Question, QuestionType};
use crate::aircraft::AircraftConfig;
use crate::equations::{aft_cg_limit, cg_position, forward_cg_limit, round_to};
use crate::errors::WbResult;
use crate::loading::{build_loading_table, burn_off, take_off_totals, LoadingItem, Totals};
use crate::scenario::{
    join_paragraphs, LoadingScenario, PassengerConfig, PassengerRanges, UnitConfig, WeightRange,
    STANDARD_EMPTY_INDEX, STANDARD_EMPTY_WEIGHT,
};

const FORWARD_CARGO: WeightRange = WeightRange::new(15.0, 40.0, 5.0);
const REAR_CARGO: WeightRange = WeightRange::new(40.0, 100.0, 5.0);
const FUEL_GAL: WeightRange = WeightRange::new(80.0, 100.0, 5.0);
const BURN_GAL: WeightRange = WeightRange::new(20.0, 40.0, 5.0);

/// Chance that the third row is considered at all
const THIRD_ROW_PROBABILITY: f64 = 0.5;

/// Limits check for one phase of flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseCheck {
    pub weight_kg: f64,
    pub index: f64,
    pub cg_mm: f64,
    pub max_weight_kg: f64,
    pub forward_limit_mm: f64,
    pub aft_limit_mm: f64,
}

impl PhaseCheck {
    /// # Errors
    /// `DegenerateDivision` when `weight_kg` is zero.
    pub fn evaluate(config: &AircraftConfig, weight_kg: f64, index: f64, max_weight_kg: f64) -> WbResult<Self> {
        Ok(PhaseCheck {
            weight_kg,
            index,
            cg_mm: cg_position(weight_kg, index)?,
            max_weight_kg,
            forward_limit_mm: forward_cg_limit(config, weight_kg),
            aft_limit_mm: aft_cg_limit(config),
        })
    }

    pub fn weight_ok(&self) -> bool {
        self.weight_kg <= self.max_weight_kg
    }

    pub fn cg_ok(&self) -> bool {
        self.cg_mm >= self.forward_limit_mm && self.cg_mm <= self.aft_limit_mm
    }

    pub fn within_limits(&self) -> bool {
        self.weight_ok() && self.cg_ok()
    }
}

/// Take-off and landing checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBalanceSolution {
    pub take_off: PhaseCheck,
    pub landing: PhaseCheck,
}

impl WeightBalanceSolution {
    pub fn within_limits(&self) -> bool {
        self.take_off.within_limits() && self.landing.within_limits()
    }
}

pub fn scenario<R: Rng + ?Sized>(ranges: &PassengerRanges, rng: &mut R) -> LoadingScenario {
    let units = UnitConfig::random(rng);
    let basic_empty_weight_kg = STANDARD_EMPTY_WEIGHT.sample(rng);
    let basic_empty_index = STANDARD_EMPTY_INDEX.sample(rng);
    let include_row3 = rng.gen_bool(THIRD_ROW_PROBABILITY);
    let passengers = PassengerConfig::random(rng, ranges, include_row3);
    let forward_cargo_kg = FORWARD_CARGO.sample(rng);
    let rear_cargo_kg = REAR_CARGO.sample(rng);
    let fuel_gal = FUEL_GAL.sample(rng);
    let burn_gal = BURN_GAL.sample(rng);

    LoadingScenario {
        units,
        basic_empty_weight_kg,
        basic_empty_index,
        passengers,
        forward_cargo_kg: Some(forward_cargo_kg),
        rear_cargo_kg: Some(rear_cargo_kg),
        fuel_gal: Some(fuel_gal),
        burn_gal: Some(burn_gal),
    }
}

pub fn narrative(scenario: &LoadingScenario) -> String {
    let w = scenario.units.weight_unit;
    let f = scenario.units.fuel_unit;
    let mut paragraphs = vec![scenario.basic_empty_sentence("and")];
    paragraphs.extend(scenario.passengers.narrate(&scenario.units));
    if let (Some(fwd), Some(rear)) = (scenario.forward_cargo_kg, scenario.rear_cargo_kg) {
        paragraphs.push(format!(
            "The forward compartment is loaded with {} of cargo and the rear compartment contains {} of baggage.",
            w.format(fwd),
            w.format(rear)
        ));
    }
    match (scenario.fuel_gal, scenario.burn_gal) {
        (Some(fuel), Some(burn)) => paragraphs.push(format!(
            "The main fuel tanks are filled with {} of fuel. The flight is expected to use {} of fuel.",
            f.format(fuel),
            f.format(burn)
        )),
        (Some(fuel), None) => paragraphs.push(format!("The main fuel tanks are filled with {} of fuel.", f.format(fuel))),
        _ => {}
    }
    join_paragraphs(paragraphs)
}

/// Take-off totals exclude the ZFW subtotal and burn-off; landing removes
/// the burn-off from them.
pub fn solve(config: &AircraftConfig, items: &[LoadingItem]) -> WbResult<WeightBalanceSolution> {
    let tow = take_off_totals(items);
    let (burn_weight, burn_index) = burn_off(items)
        .map(|b| (b.weight.abs(), b.moment_index.abs()))
        .unwrap_or((0.0, 0.0));
    let landing_weight = tow.weight - burn_weight;
    let landing_index = round_to(tow.index - burn_index, 1);

    Ok(WeightBalanceSolution {
        take_off: PhaseCheck::evaluate(config, tow.weight, tow.index, config.weights.max_takeoff_kg)?,
        landing: PhaseCheck::evaluate(config, landing_weight, landing_index, config.weights.max_landing_kg)?,
    })
}

fn phase_lines(w: &mut Workings, heading: &str, max_label: &str, phase: &PhaseCheck) {
    w.line(heading)
        .line(format!(
            "Weight: {} kg ({}: {} kg) {}",
            phase.weight_kg,
            max_label,
            phase.max_weight_kg,
            if phase.weight_ok() { "OK" } else { "EXCEEDED" }
        ))
        .line(format!("CG: {} mm", round_to(phase.cg_mm, 1)))
        .line(format!(
            "Forward Limit at {} kg: {} mm",
            phase.weight_kg,
            round_to(phase.forward_limit_mm, 0)
        ))
        .line(format!("Aft Limit: {} mm", phase.aft_limit_mm))
        .line(format!(
            "Status: {}",
            if phase.within_limits() { "WITHIN LIMITS" } else { "OUTSIDE LIMITS" }
        ));
}

fn workings(items: &[LoadingItem], s: &WeightBalanceSolution) -> String {
    let take_off = Totals { weight: s.take_off.weight_kg, index: s.take_off.index };
    let landing = Totals { weight: s.landing.weight_kg, index: s.landing.index };

    let mut w = Workings::new();
    w.loading_table("WEIGHT & BALANCE TABLE:", items)
        .rule()
        .line(totals_row("TAKE-OFF TOTALS", &take_off))
        .line(totals_row("LANDING TOTALS", &landing))
        .rule()
        .blank();
    phase_lines(&mut w, "TAKE-OFF CHECK:", "MTOW", &s.take_off);
    w.blank();
    phase_lines(&mut w, "LANDING CHECK:", "MLW", &s.landing);
    w.blank().line(format!(
        "FINAL RESULT: {}",
        if s.within_limits() { "Aircraft is within all limits" } else { "Aircraft exceeds limits" }
    ));
    w.finish()
}

pub fn build_question(
    id: String,
    scenario: &LoadingScenario,
    items: Vec<LoadingItem>,
    solution: &WeightBalanceSolution,
) -> Question {
    let take_off = &solution.take_off;
    let landing = &solution.landing;
    Question {
        id,
        question_type: QuestionType::WeightBalance,
        title: QuestionType::WeightBalance.title().to_string(),
        scenario: format!(
            "Using Loading System ECHO, verify the aircraft loading is within limits. {}",
            units_note(&scenario.units)
        ),
        scenario_text: narrative(scenario),
        workings: workings(&items, solution),
        loading_table: items,
        question: "1. Calculate the Take-off Weight and CG position\n\
                   2. Calculate the Landing Weight and CG position\n\
                   3. Is the aircraft within weight and balance limits for the entire flight?"
            .to_string(),
        answer: format!(
            "1. Take-off Weight: {} kg, CG: {} mm aft of datum\n2. Landing Weight: {} kg, CG: {} mm aft of datum\n3. {}",
            take_off.weight_kg,
            round_to(take_off.cg_mm, 1),
            landing.weight_kg,
            round_to(landing.cg_mm, 1),
            if solution.within_limits() { "Yes, within limits" } else { "No, outside limits" }
        ),
        numerical_answer: take_off.weight_kg,
        unit: "kg".to_string(),
    }
}

/// Generate a complete weight & balance check question.
pub fn generate<R: Rng + ?Sized>(config: &AircraftConfig, ranges: &PassengerRanges, rng: &mut R) -> WbResult<Question> {
    let scenario = scenario(ranges, rng);
    let items = build_loading_table(config, &scenario);
    let solution = solve(config, &items)?;
    let id = new_question_id(rng);
    Ok(build_question(id, &scenario, items, &solution))
}
