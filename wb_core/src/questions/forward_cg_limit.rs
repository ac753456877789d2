//! # Forward CG Limit Question
//!
//! Forward CG limit at the take-off weight, by linear interpolation between
//! the envelope anchors, in mm and as %MAC. All three seat rows may be
//! occupied and both cargo compartments are loaded.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::workings::{totals_row, Workings};
use super::{new_question_id, units_note, Question, QuestionType};
use crate::aircraft::AircraftConfig;
use crate::equations::{forward_cg_limit, forward_limit_ratio, percent_mac, round_to, Formula};
use crate::errors::WbResult;
use crate::loading::{build_loading_table, take_off_totals, LoadingItem, Totals};
use crate::scenario::{
    join_paragraphs, LoadingScenario, PassengerConfig, PassengerRanges, UnitConfig, WeightRange,
    STANDARD_EMPTY_INDEX, STANDARD_EMPTY_WEIGHT,
};

const FORWARD_CARGO: WeightRange = WeightRange::new(10.0, 30.0, 5.0);
const REAR_CARGO: WeightRange = WeightRange::new(20.0, 60.0, 5.0);
const FUEL_GAL: WeightRange = WeightRange::new(70.0, 100.0, 5.0);

/// Intermediate values shared by the answer and the workings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardLimitSolution {
    pub totals: Totals,
    /// Interpolation ratio; `None` where the limit is flat
    pub ratio: Option<f64>,
    pub forward_limit_mm: f64,
    pub forward_limit_mac: f64,
}

pub fn scenario<R: Rng + ?Sized>(ranges: &PassengerRanges, rng: &mut R) -> LoadingScenario {
    let units = UnitConfig::random(rng);
    let basic_empty_weight_kg = STANDARD_EMPTY_WEIGHT.sample(rng);
    let basic_empty_index = STANDARD_EMPTY_INDEX.sample(rng);
    let passengers = PassengerConfig::random(rng, ranges, true);
    let forward_cargo_kg = FORWARD_CARGO.sample(rng);
    let rear_cargo_kg = REAR_CARGO.sample(rng);
    let fuel_gal = FUEL_GAL.sample(rng);

    LoadingScenario {
        units,
        basic_empty_weight_kg,
        basic_empty_index,
        passengers,
        forward_cargo_kg: Some(forward_cargo_kg),
        rear_cargo_kg: Some(rear_cargo_kg),
        fuel_gal: Some(fuel_gal),
        burn_gal: None,
    }
}

pub fn narrative(scenario: &LoadingScenario) -> String {
    let w = scenario.units.weight_unit;
    let mut paragraphs = vec![scenario.basic_empty_sentence("with")];
    paragraphs.extend(scenario.passengers.narrate(&scenario.units));
    match (scenario.forward_cargo_kg, scenario.rear_cargo_kg) {
        (Some(fwd), Some(rear)) => paragraphs.push(format!(
            "The forward compartment contains {} of equipment and the rear compartment holds {} of luggage.",
            w.format(fwd),
            w.format(rear)
        )),
        (Some(fwd), None) => paragraphs.push(format!("The forward compartment contains {} of equipment.", w.format(fwd))),
        (None, Some(rear)) => paragraphs.push(format!("The rear compartment holds {} of luggage.", w.format(rear))),
        (None, None) => {}
    }
    if let Some(fuel) = scenario.fuel_gal {
        paragraphs.push(format!(
            "The aircraft has {} of fuel in the main tanks.",
            scenario.units.fuel_unit.format(fuel)
        ));
    }
    join_paragraphs(paragraphs)
}

/// Forward limit at take-off weight.
pub fn solve(config: &AircraftConfig, items: &[LoadingItem]) -> WbResult<ForwardLimitSolution> {
    let totals = take_off_totals(items);
    let forward_limit_mm = forward_cg_limit(config, totals.weight);
    Ok(ForwardLimitSolution {
        totals,
        ratio: forward_limit_ratio(config, totals.weight),
        forward_limit_mm,
        forward_limit_mac: percent_mac(config, forward_limit_mm),
    })
}

fn workings(config: &AircraftConfig, items: &[LoadingItem], s: &ForwardLimitSolution) -> String {
    let light = &config.cg_range.light;
    let heavy = &config.cg_range.heavy;
    let limit = round_to(s.forward_limit_mm, 0);
    let weight = s.totals.weight;

    let mut w = Workings::new();
    w.loading_table("WEIGHT & BALANCE TABLE:", items)
        .rule()
        .line(totals_row("TAKE-OFF TOTALS", &s.totals))
        .rule()
        .blank()
        .line("CALCULATIONS:")
        .line(format!("1. Take-off Weight = {} kg", weight))
        .blank();

    match s.ratio {
        Some(ratio) => {
            let r = round_to(ratio, 3);
            w.line("2. Forward CG Limit (Linear Interpolation):")
                .line(format!("   At {} kg: Forward limit = {} mm", light.weight_kg, light.forward_mm))
                .line(format!("   At {} kg: Forward limit = {} mm", heavy.weight_kg, heavy.forward_mm))
                .blank()
                .line(format!(
                    "   Ratio = ({} - {}) / ({} - {})",
                    weight, light.weight_kg, heavy.weight_kg, light.weight_kg
                ))
                .line(format!("   Ratio = {}", r))
                .blank()
                .line(format!(
                    "   Forward Limit = {} + {} x ({} - {})",
                    light.forward_mm, r, heavy.forward_mm, light.forward_mm
                ));
        }
        None => {
            let (relation, anchor) = if weight <= light.weight_kg {
                ("at or below", light)
            } else {
                ("at or above", heavy)
            };
            w.line("2. Forward CG Limit:")
                .line(format!("   At {} kg: Forward limit = {} mm", light.weight_kg, light.forward_mm))
                .line(format!("   At {} kg: Forward limit = {} mm", heavy.weight_kg, heavy.forward_mm))
                .blank()
                .line(format!(
                    "   {} kg is {} {} kg, so the forward limit is constant.",
                    weight, relation, anchor.weight_kg
                ));
        }
    }

    w.line(format!("   Forward Limit = {} mm aft of datum", limit))
        .blank()
        .line("3. Convert to %MAC:")
        .line(format!("   {}", Formula::PercentMac.expression(config)))
        .line(format!(
            "   %MAC = ({} - {}) / {} x 100",
            round_to(s.forward_limit_mm, 1),
            config.mac.leading_edge_mm,
            config.mac.length_mm
        ))
        .line(format!("   %MAC = {}%", round_to(s.forward_limit_mac, 1)));
    w.finish()
}

pub fn build_question(
    config: &AircraftConfig,
    id: String,
    scenario: &LoadingScenario,
    items: Vec<LoadingItem>,
    solution: &ForwardLimitSolution,
) -> Question {
    let limit = round_to(solution.forward_limit_mm, 0);
    Question {
        id,
        question_type: QuestionType::ForwardCgLimit,
        title: QuestionType::ForwardCgLimit.title().to_string(),
        scenario: format!(
            "Using Loading System ECHO, determine the forward CG limit for the given loading. {}",
            units_note(&scenario.units)
        ),
        scenario_text: narrative(scenario),
        workings: workings(config, &items, solution),
        loading_table: items,
        question: "Determine the forward CG limit for this aircraft at the take-off weight, expressed as a position in mm aft of datum AND as %MAC."
            .to_string(),
        answer: format!(
            "Forward CG Limit: {} mm aft of datum ({}% MAC)",
            limit,
            round_to(solution.forward_limit_mac, 1)
        ),
        numerical_answer: limit,
        unit: "mm".to_string(),
    }
}

/// Generate a complete forward CG limit question.
pub fn generate<R: Rng + ?Sized>(config: &AircraftConfig, ranges: &PassengerRanges, rng: &mut R) -> WbResult<Question> {
    let scenario = scenario(ranges, rng);
    let items = build_loading_table(config, &scenario);
    let solution = solve(config, &items)?;
    let id = new_question_id(rng);
    Ok(build_question(config, id, &scenario, items, &solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::ECHO;
    use crate::scenario::{FrontRow, SeatPair};
    use crate::units::{FuelUnit, WeightUnit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn heavy_scenario() -> LoadingScenario {
        // 2050 + 150 + 150 + 80 + 30 + 60 + 196 (100 gal) = 2716 kg
        LoadingScenario {
            units: UnitConfig::default(),
            basic_empty_weight_kg: 2050.0,
            basic_empty_index: 500.0,
            passengers: PassengerConfig {
                row1: FrontRow { pilot: 75.0, passenger: Some(75.0) },
                row2: SeatPair { first: Some(75.0), second: Some(75.0) },
                row3: SeatPair { first: Some(40.0), second: Some(40.0) },
            },
            forward_cargo_kg: Some(30.0),
            rear_cargo_kg: Some(60.0),
            fuel_gal: Some(100.0),
            burn_gal: None,
        }
    }

    #[test]
    fn test_interpolated_limit() {
        let scenario = heavy_scenario();
        let items = build_loading_table(&ECHO, &scenario);
        let solution = solve(&ECHO, &items).unwrap();
        assert_eq!(solution.totals.weight, 2716.0);

        // (2716 - 2360) / 590 = 0.6034 -> 2400 + 96.54 = 2496.54
        let ratio = solution.ratio.unwrap();
        assert!((ratio - 356.0 / 590.0).abs() < 1e-12);
        assert!((solution.forward_limit_mm - 2496.54).abs() < 0.01);

        let q = build_question(&ECHO, "id".into(), &scenario, items, &solution);
        assert_eq!(q.numerical_answer, 2497.0);
        assert_eq!(q.unit, "mm");
        assert_eq!(q.answer, "Forward CG Limit: 2497 mm aft of datum (16.1% MAC)");
        assert!(q.workings.contains("   Ratio = (2716 - 2360) / (2950 - 2360)"));
        assert!(q.workings.contains("   Ratio = 0.603"));
        assert!(q.workings.contains("   Forward Limit = 2400 + 0.603 x (2560 - 2400)"));
        assert!(q.workings.contains("   %MAC = (2496.5 - 2190) / 1900 x 100"));
    }

    #[test]
    fn test_flat_region_workings() {
        let scenario = LoadingScenario {
            basic_empty_weight_kg: 1900.0,
            passengers: PassengerConfig {
                row1: FrontRow { pilot: 60.0, passenger: None },
                row2: SeatPair::EMPTY,
                row3: SeatPair::EMPTY,
            },
            forward_cargo_kg: Some(10.0),
            rear_cargo_kg: Some(20.0),
            fuel_gal: Some(70.0),
            ..heavy_scenario()
        };
        let items = build_loading_table(&ECHO, &scenario);
        let solution = solve(&ECHO, &items).unwrap();
        assert!(solution.totals.weight < 2360.0);
        assert_eq!(solution.ratio, None);
        assert_eq!(solution.forward_limit_mm, 2400.0);

        let q = build_question(&ECHO, "id".into(), &scenario, items, &solution);
        assert_eq!(q.numerical_answer, 2400.0);
        assert!(q.workings.contains("so the forward limit is constant"));
        assert!(!q.workings.contains("Ratio ="));
    }

    #[test]
    fn test_narrative_uses_display_units() {
        let scenario = LoadingScenario {
            units: UnitConfig { weight_unit: WeightUnit::Lbs, fuel_unit: FuelUnit::Lt },
            ..heavy_scenario()
        };
        let text = narrative(&scenario);
        assert!(text.starts_with("An Echo aircraft has a basic empty weight of 4510 lbs with a basic moment index of 500."));
        assert!(text.contains("The forward compartment contains 66 lbs of equipment and the rear compartment holds 132 lbs of luggage."));
        assert!(text.ends_with("The aircraft has 272 litres of fuel in the main tanks."));
        assert!(text.contains("Two children occupy the third row"));
    }

    #[test]
    fn test_generated_limits_lie_in_envelope() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..50 {
            let q = generate(&ECHO, &PassengerRanges::default(), &mut rng).unwrap();
            assert!(q.numerical_answer >= 2400.0 && q.numerical_answer <= 2560.0);
            assert_eq!(q.question_type, QuestionType::ForwardCgLimit);
        }
    }
}
