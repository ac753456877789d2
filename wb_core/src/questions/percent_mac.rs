//! # %MAC Question
//!
//! Take-off CG expressed as a percentage of the mean aerodynamic chord.
//! Occupants in rows 1 and 2, baggage in the rear compartment, fuel in the
//! main tanks.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::workings::{totals_row, Workings};
use super::{new_question_id, units_note, Question, QuestionType};
use crate::aircraft::AircraftConfig;
use crate::equations::{percent_mac, round_to, Formula};
use crate::errors::WbResult;
use crate::loading::{build_loading_table, take_off_totals, LoadingItem, Totals};
use crate::scenario::{
    join_paragraphs, LoadingScenario, PassengerConfig, PassengerRanges, UnitConfig, WeightRange,
    STANDARD_EMPTY_INDEX, STANDARD_EMPTY_WEIGHT,
};

const REAR_CARGO: WeightRange = WeightRange::new(15.0, 45.0, 5.0);
const FUEL_GAL: WeightRange = WeightRange::new(60.0, 100.0, 5.0);

/// Intermediate values shared by the answer and the workings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentMacSolution {
    pub totals: Totals,
    pub cg_mm: f64,
    pub percent_mac: f64,
}

/// Draw a loading: rows 1-2, rear baggage, main tank fuel.
pub fn scenario<R: Rng + ?Sized>(ranges: &PassengerRanges, rng: &mut R) -> LoadingScenario {
    let units = UnitConfig::random(rng);
    let basic_empty_weight_kg = STANDARD_EMPTY_WEIGHT.sample(rng);
    let basic_empty_index = STANDARD_EMPTY_INDEX.sample(rng);
    let passengers = PassengerConfig::random(rng, ranges, false);
    let rear_cargo_kg = REAR_CARGO.sample(rng);
    let fuel_gal = FUEL_GAL.sample(rng);

    LoadingScenario {
        units,
        basic_empty_weight_kg,
        basic_empty_index,
        passengers,
        forward_cargo_kg: None,
        rear_cargo_kg: Some(rear_cargo_kg),
        fuel_gal: Some(fuel_gal),
        burn_gal: None,
    }
}

/// Narrative paragraphs for the scenario
pub fn narrative(scenario: &LoadingScenario) -> String {
    let w = scenario.units.weight_unit;
    let mut paragraphs = vec![scenario.basic_empty_sentence("and")];
    paragraphs.extend(scenario.passengers.narrate(&scenario.units));
    if let Some(rear) = scenario.rear_cargo_kg {
        paragraphs.push(format!("The rear compartment contains {} of baggage.", w.format(rear)));
    }
    if let Some(fuel) = scenario.fuel_gal {
        paragraphs.push(format!(
            "The main fuel tanks contain {} of fuel.",
            scenario.units.fuel_unit.format(fuel)
        ));
    }
    join_paragraphs(paragraphs)
}

/// CG and %MAC at take-off.
///
/// # Errors
/// `DegenerateDivision` if the take-off weight is zero.
pub fn solve(config: &AircraftConfig, items: &[LoadingItem]) -> WbResult<PercentMacSolution> {
    let totals = take_off_totals(items);
    let cg_mm = totals.cg()?;
    Ok(PercentMacSolution {
        totals,
        cg_mm,
        percent_mac: percent_mac(config, cg_mm),
    })
}

fn workings(config: &AircraftConfig, items: &[LoadingItem], s: &PercentMacSolution) -> String {
    let cg = round_to(s.cg_mm, 1);
    let pmac = round_to(s.percent_mac, 1);
    let mut w = Workings::new();
    w.loading_table("WEIGHT & BALANCE TABLE:", items)
        .rule()
        .line(totals_row("TAKE-OFF TOTALS", &s.totals))
        .rule()
        .blank()
        .line("CALCULATIONS:")
        .line("1. CG Position:")
        .line(format!("   {}", Formula::CgPosition.expression(config)))
        .line(format!("   CG = ({} x 10000) / {}", s.totals.index, s.totals.weight))
        .line(format!("   CG = {} mm aft of datum", cg))
        .blank()
        .line("2. %MAC Calculation:")
        .line(format!("   MAC Length = {} mm", config.mac.length_mm))
        .line(format!("   MAC Leading Edge = {} mm aft of datum", config.mac.leading_edge_mm))
        .blank()
        .line(format!("   {}", Formula::PercentMac.expression(config)))
        .line(format!(
            "   %MAC = ({} - {}) / {} x 100",
            cg, config.mac.leading_edge_mm, config.mac.length_mm
        ))
        .line(format!("   %MAC = {}%", pmac));
    w.finish()
}

/// Assemble the question record.
pub fn build_question(
    config: &AircraftConfig,
    id: String,
    scenario: &LoadingScenario,
    items: Vec<LoadingItem>,
    solution: &PercentMacSolution,
) -> Question {
    let answer = round_to(solution.percent_mac, 1);
    Question {
        id,
        question_type: QuestionType::PercentMac,
        title: QuestionType::PercentMac.title().to_string(),
        scenario: format!(
            "Using Loading System ECHO, calculate the Centre of Gravity position as a percentage of Mean Aerodynamic Chord. {}",
            units_note(&scenario.units)
        ),
        scenario_text: narrative(scenario),
        workings: workings(config, &items, solution),
        loading_table: items,
        question: "Calculate the Centre of Gravity position as a percentage of the Mean Aerodynamic Chord (%MAC) at take-off."
            .to_string(),
        answer: format!("{}% MAC", answer),
        numerical_answer: answer,
        unit: "% MAC".to_string(),
    }
}

/// Generate a complete %MAC question.
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
    use crate::equations::cg_position;
    use crate::loading::ItemKind;
    use crate::scenario::{FrontRow, SeatPair};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn worked_scenario() -> LoadingScenario {
        LoadingScenario {
            units: UnitConfig::default(),
            basic_empty_weight_kg: 2000.0,
            basic_empty_index: 500.0,
            passengers: PassengerConfig {
                row1: FrontRow { pilot: 80.0, passenger: None },
                row2: SeatPair::EMPTY,
                row3: SeatPair::EMPTY,
            },
            forward_cargo_kg: None,
            rear_cargo_kg: Some(30.0),
            fuel_gal: Some(80.0),
            burn_gal: None,
        }
    }

    #[test]
    fn test_worked_scenario() {
        let scenario = worked_scenario();
        let items = build_loading_table(&ECHO, &scenario);
        let solution = solve(&ECHO, &items).unwrap();
        assert_eq!(solution.totals.weight, 2267.0);
        assert!((solution.totals.index - 561.2).abs() < 1e-9);
        assert!((solution.cg_mm - 2475.5).abs() < 0.05);

        let q = build_question(&ECHO, "q1".into(), &scenario, items, &solution);
        assert_eq!(q.numerical_answer, 15.0);
        assert_eq!(q.answer, "15% MAC");
        assert_eq!(q.unit, "% MAC");
        assert!(q.workings.contains("TAKE-OFF TOTALS"));
        assert!(q.workings.contains("   CG = (561.2 x 10000) / 2267"));
        assert!(q.workings.contains("   CG = 2475.5 mm aft of datum"));
        assert!(q.workings.contains("   %MAC = (2475.5 - 2190) / 1900 x 100"));
        assert!(q.workings.ends_with("   %MAC = 15%"));
    }

    #[test]
    fn test_worked_scenario_narrative() {
        let text = narrative(&worked_scenario());
        assert_eq!(
            text,
            "An Echo aircraft has a basic empty weight of 2000 kg and a basic moment index of 500.\n\n\
             The pilot weighs 80 kg and is the only occupant in the front row.\n\n\
             The second row is empty.\n\n\
             The rear compartment contains 30 kg of baggage.\n\n\
             The main fuel tanks contain 80 US gallons of fuel."
        );
    }

    #[test]
    fn test_answer_reproducible_from_own_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..50 {
            let q = generate(&ECHO, &PassengerRanges::default(), &mut rng).unwrap();
            let rows: Vec<&LoadingItem> = q
                .loading_table
                .iter()
                .filter(|i| i.kind != ItemKind::ZeroFuelSubtotal)
                .collect();
            let weight: f64 = rows.iter().map(|i| i.weight).sum();
            let index: f64 = rows.iter().map(|i| i.moment_index).sum();
            let cg = cg_position(weight, index).unwrap();
            let pmac = percent_mac(&ECHO, cg);
            assert!((pmac - q.numerical_answer).abs() < 0.1, "{} vs {}", pmac, q.numerical_answer);
        }
    }

    #[test]
    fn test_scenario_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..100 {
            let s = scenario(&PassengerRanges::default(), &mut rng);
            assert!(STANDARD_EMPTY_WEIGHT.contains(s.basic_empty_weight_kg));
            assert!(STANDARD_EMPTY_INDEX.contains(s.basic_empty_index));
            assert!(s.passengers.row3.is_empty());
            assert!(s.forward_cargo_kg.is_none());
            assert!(REAR_CARGO.contains(s.rear_cargo_kg.unwrap()));
            assert!(FUEL_GAL.contains(s.fuel_gal.unwrap()));
            assert!(s.burn_gal.is_none());
        }
    }

    #[test]
    fn test_scenario_line_names_units() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let q = generate(&ECHO, &PassengerRanges::default(), &mut rng).unwrap();
        assert!(q.scenario.starts_with("Using Loading System ECHO"));
        assert!(q.scenario.contains("(Weights given in "));
        assert_eq!(q.title, "%MAC Calculation");
    }
}
