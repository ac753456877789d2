//! # Ballast Question
//!
//! A forward-heavy, unfuelled loading whose CG sits forward of the forward
//! limit. The student works out how much mass to add aft to bring the CG to
//! a target just inside the limit, either as fuel in the auxiliary tanks or
//! as 5 kg / 10 kg weights in an aft compartment.
//!
//! ## Resampling
//!
//! Not every forward-biased draw is actually forward of the limit, and some
//! that are cannot be fixed within a station's capacity. The method is
//! chosen first; scenarios are then drawn until one is usable, up to
//! [`MAX_BALLAST_ATTEMPTS`]. A usable scenario has:
//!
//! - CG strictly forward of the forward limit at the current weight
//! - a strictly positive ballast mass that fits the station
//! - the loaded ballast (rounded as the answer is) inside the envelope

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::workings::{totals_row, Workings};
use super::{new_question_id, Question, QuestionType};
use crate::aircraft::{AircraftConfig, Station};
use crate::equations::{
    ballast_required, cg_position, forward_cg_limit, fuel_kg_to_gal, gal_to_litres, is_within_limits,
    moment_index, round_to, Formula,
};
use crate::errors::{WbError, WbResult};
use crate::loading::{build_loading_table, fuel_mass_kg, take_off_totals, LoadingItem, Totals};
use crate::scenario::{
    join_paragraphs, FrontRow, LoadingScenario, PassengerConfig, PassengerRanges, SeatPair, UnitConfig,
    WeightRange,
};
use crate::units::FuelUnit;

/// Distance aft of the forward limit the ballast aims for (mm)
pub const TARGET_MARGIN_MM: f64 = 10.0;

/// Scenario draws allowed before giving up
pub const MAX_BALLAST_ATTEMPTS: u32 = 100;

/// Weight sizes available for discrete ballast (kg)
pub const WEIGHT_SIZES_KG: [f64; 2] = [5.0, 10.0];

/// Compartments aft of every reachable target CG
pub const WEIGHT_STATIONS: [Station; 3] = [
    Station::RearCompartment,
    Station::LeftWingCompartment,
    Station::RightWingCompartment,
];

/// Station receiving fuel ballast
pub const FUEL_STATION: Station = Station::AuxTanks;

const EMPTY_WEIGHT: WeightRange = WeightRange::new(1920.0, 2000.0, 10.0);
const EMPTY_INDEX: WeightRange = WeightRange::new(470.0, 490.0, 5.0);
const FORWARD_CARGO: WeightRange = WeightRange::new(45.0, 55.0, 5.0);
const REAR_CARGO: WeightRange = WeightRange::new(5.0, 15.0, 5.0);
const FRONT_PASSENGER_PROBABILITY: f64 = 0.5;

/// How the CG is to be moved aft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum BallastMethod {
    /// Fuel in the auxiliary tanks, answered to the nearest whole unit
    Fuel,
    /// Discrete weights of `unit_kg` placed at `station`, rounded up
    Weights { unit_kg: f64, station: Station },
}

impl BallastMethod {
    /// Fuel or weights with equal probability; size and station uniform
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            return BallastMethod::Fuel;
        }
        let unit_kg = WEIGHT_SIZES_KG[rng.gen_range(0..WEIGHT_SIZES_KG.len())];
        let station = WEIGHT_STATIONS[rng.gen_range(0..WEIGHT_STATIONS.len())];
        BallastMethod::Weights { unit_kg, station }
    }

    pub fn station(&self) -> Station {
        match self {
            BallastMethod::Fuel => FUEL_STATION,
            BallastMethod::Weights { station, .. } => *station,
        }
    }
}

/// A loading plus the ballast method the question asks about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallastScenario {
    pub loading: LoadingScenario,
    pub method: BallastMethod,
}

impl BallastScenario {
    /// Mass already at the ballast station (kg)
    pub fn existing_load_kg(&self) -> f64 {
        match self.method.station() {
            Station::RearCompartment => self.loading.rear_cargo_kg.unwrap_or(0.0),
            Station::ForwardCompartment => self.loading.forward_cargo_kg.unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Ballast as it would actually be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum LoadedBallast {
    Fuel { gallons: f64, kg: f64 },
    Weights { count: u32, unit_kg: f64, kg: f64 },
}

impl LoadedBallast {
    pub fn kg(&self) -> f64 {
        match self {
            LoadedBallast::Fuel { kg, .. } | LoadedBallast::Weights { kg, .. } => *kg,
        }
    }
}

/// Intermediate values shared by the answer and the workings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallastSolution {
    pub totals: Totals,
    pub current_cg_mm: f64,
    pub forward_limit_mm: f64,
    pub target_cg_mm: f64,
    pub ballast_arm_mm: f64,
    /// Exact mass from the ballast formula (kg)
    pub required_kg: f64,
    pub loaded: LoadedBallast,
    pub final_weight_kg: f64,
    pub final_cg_mm: f64,
}

impl BallastSolution {
    /// Why this scenario cannot be used, or `None` if it can.
    pub fn rejection(&self, config: &AircraftConfig, scenario: &BallastScenario) -> Option<String> {
        if self.current_cg_mm >= self.forward_limit_mm {
            return Some(format!(
                "CG {:.1} mm is not forward of the {:.1} mm limit",
                self.current_cg_mm, self.forward_limit_mm
            ));
        }
        if self.required_kg <= 0.0 || self.loaded.kg() <= 0.0 {
            return Some(format!("ballast of {:.1} kg is not positive", self.required_kg));
        }

        let station = scenario.method.station();
        let over_capacity = match self.loaded {
            LoadedBallast::Fuel { gallons, .. } => config
                .tank_capacity_gal(station)
                .map_or(true, |capacity| gallons > capacity),
            LoadedBallast::Weights { kg, .. } => kg > config.max_load_kg(station) - scenario.existing_load_kg(),
        };
        if over_capacity {
            return Some(format!(
                "{:.1} kg does not fit the {}",
                self.loaded.kg(),
                station.phrase()
            ));
        }

        if self.final_weight_kg > config.weights.max_takeoff_kg
            || !is_within_limits(config, self.final_weight_kg, self.final_cg_mm)
        {
            return Some(format!(
                "loaded ballast leaves CG at {:.1} mm for {} kg",
                self.final_cg_mm, self.final_weight_kg
            ));
        }
        None
    }
}

/// One forward-biased, unfuelled loading.
pub fn scenario<R: Rng + ?Sized>(ranges: &PassengerRanges, method: BallastMethod, rng: &mut R) -> BallastScenario {
    let units = UnitConfig::random(rng);
    let basic_empty_weight_kg = EMPTY_WEIGHT.sample(rng);
    let basic_empty_index = EMPTY_INDEX.sample(rng);
    let pilot = ranges.adult.sample(rng);
    let passenger = if rng.gen_bool(FRONT_PASSENGER_PROBABILITY) {
        Some(ranges.adult.sample(rng))
    } else {
        None
    };
    let forward_cargo_kg = FORWARD_CARGO.sample(rng);
    let rear_cargo_kg = REAR_CARGO.sample(rng);

    BallastScenario {
        loading: LoadingScenario {
            units,
            basic_empty_weight_kg,
            basic_empty_index,
            passengers: PassengerConfig {
                row1: FrontRow { pilot, passenger },
                row2: SeatPair::EMPTY,
                row3: SeatPair::EMPTY,
            },
            forward_cargo_kg: Some(forward_cargo_kg),
            rear_cargo_kg: Some(rear_cargo_kg),
            fuel_gal: None,
            burn_gal: None,
        },
        method,
    }
}

fn task_sentence(method: &BallastMethod) -> String {
    match method {
        BallastMethod::Fuel => format!(
            "Calculate how much fuel must be added to the {} to bring the CG within limits.",
            FUEL_STATION.phrase()
        ),
        BallastMethod::Weights { unit_kg, station } => format!(
            "Calculate how many {} kg weights must be placed in the {} to bring the CG within limits.",
            unit_kg,
            station.phrase()
        ),
    }
}

pub fn narrative(scenario: &BallastScenario) -> String {
    let loading = &scenario.loading;
    let w = loading.units.weight_unit;
    let row1 = &loading.passengers.row1;

    let occupants = match row1.passenger {
        Some(passenger) => format!(
            "The pilot weighing {} and a front seat passenger weighing {} are the only occupants.",
            w.format(row1.pilot),
            w.format(passenger)
        ),
        None => format!("The pilot weighing {} is the only occupant.", w.format(row1.pilot)),
    };

    let mut paragraphs = vec![loading.basic_empty_sentence("and"), occupants];
    if let (Some(fwd), Some(rear)) = (loading.forward_cargo_kg, loading.rear_cargo_kg) {
        paragraphs.push(format!(
            "The forward compartment contains {} of dense equipment and there is {} of light baggage in the rear compartment.",
            w.format(fwd),
            w.format(rear)
        ));
    }
    paragraphs.push(format!("No fuel has been loaded yet. {}", task_sentence(&scenario.method)));
    join_paragraphs(paragraphs)
}

/// Current CG, target, required ballast and the ballast as loaded.
///
/// # Errors
/// `DegenerateDivision` for a zero total weight or a ballast arm at the target CG.
pub fn solve(config: &AircraftConfig, scenario: &BallastScenario, items: &[LoadingItem]) -> WbResult<BallastSolution> {
    let totals = take_off_totals(items);
    let current_cg_mm = totals.cg()?;
    let forward_limit_mm = forward_cg_limit(config, totals.weight);
    let target_cg_mm = forward_limit_mm + TARGET_MARGIN_MM;
    let ballast_arm_mm = config.arm(scenario.method.station());
    let required_kg = ballast_required(totals.weight, current_cg_mm, target_cg_mm, ballast_arm_mm)?;

    let loaded = match scenario.method {
        BallastMethod::Fuel => {
            let gallons = round_to(fuel_kg_to_gal(config, required_kg), 0).max(0.0);
            LoadedBallast::Fuel {
                gallons,
                kg: fuel_mass_kg(config, gallons),
            }
        }
        BallastMethod::Weights { unit_kg, .. } => {
            let count = (required_kg / unit_kg).ceil().max(0.0) as u32;
            LoadedBallast::Weights {
                count,
                unit_kg,
                kg: count as f64 * unit_kg,
            }
        }
    };

    let final_weight_kg = totals.weight + loaded.kg();
    let final_cg_mm = cg_position(final_weight_kg, totals.index + moment_index(loaded.kg(), ballast_arm_mm))?;

    Ok(BallastSolution {
        totals,
        current_cg_mm,
        forward_limit_mm,
        target_cg_mm,
        ballast_arm_mm,
        required_kg,
        loaded,
        final_weight_kg,
        final_cg_mm,
    })
}

fn fuel_answer(config: &AircraftConfig, unit: FuelUnit, gallons: f64) -> (f64, &'static str) {
    match unit {
        FuelUnit::Gal => (gallons, "gallons"),
        FuelUnit::Lt => (round_to(gal_to_litres(config, gallons), 0), "litres"),
    }
}

fn workings(config: &AircraftConfig, scenario: &BallastScenario, items: &[LoadingItem], s: &BallastSolution) -> String {
    let cg = round_to(s.current_cg_mm, 1);
    let target = round_to(s.target_cg_mm, 1);
    let required = round_to(s.required_kg, 1);
    let station = scenario.method.station();

    let mut w = Workings::new();
    w.loading_table("INITIAL WEIGHT & BALANCE TABLE:", items)
        .rule()
        .line(totals_row("TOTALS (no fuel)", &s.totals))
        .rule()
        .blank()
        .line("CALCULATIONS:")
        .line("1. Current CG Position:")
        .line(format!("   CG = ({} x 10000) / {}", s.totals.index, s.totals.weight))
        .line(format!("   CG = {} mm aft of datum", cg))
        .blank()
        .line(format!("2. Forward CG Limit at {} kg:", s.totals.weight))
        .line(format!(
            "   Forward Limit = {} mm (CG is FORWARD of limit!)",
            round_to(s.forward_limit_mm, 1)
        ))
        .blank()
        .line(format!("3. Target CG = {} mm (just inside forward limit)", target))
        .blank();

    match s.loaded {
        LoadedBallast::Fuel { .. } => {
            w.line("4. Fuel required (Ballast Formula):")
                .line(format!("   Fuel Arm = {} mm ({})", s.ballast_arm_mm, station.phrase()));
        }
        LoadedBallast::Weights { .. } => {
            w.line(format!("4. Ballast required in {}:", station.phrase()))
                .line(format!("   Compartment Arm = {} mm", s.ballast_arm_mm));
        }
    }
    w.blank()
        .line(format!("   {}", Formula::AddWeight.expression(config)))
        .line(format!(
            "   Ballast = {} x ({} - {}) / ({} - {})",
            s.totals.weight, target, cg, s.ballast_arm_mm, target
        ))
        .line(format!("   Ballast = {} kg", required))
        .blank();

    let answer_line = match s.loaded {
        LoadedBallast::Fuel { gallons, .. } => {
            let litres = round_to(gal_to_litres(config, gallons), 0);
            w.line("5. Convert to volume:")
                .line(format!(
                    "   Fuel = {} / ({} x {}) = {} US gal",
                    required, config.fuel.gal_to_litre, config.fuel.density_kg_per_l, gallons
                ))
                .line(format!("   Or: {} litres", litres));
            format!(
                "ANSWER: Add approximately {} US gallons ({} lt) of fuel to the {}.",
                gallons,
                litres,
                station.phrase()
            )
        }
        LoadedBallast::Weights { count, unit_kg, kg } => {
            w.line(format!("5. Using {} kg weights:", unit_kg))
                .line(format!(
                    "   Number of weights = {} / {} = {}",
                    required,
                    unit_kg,
                    round_to(s.required_kg / unit_kg, 2)
                ))
                .line(format!("   Round up to {} weights = {} kg", count, kg));
            format!(
                "ANSWER: Add {} x {} kg weights ({} kg) to the {}.",
                count,
                unit_kg,
                kg,
                station.phrase()
            )
        }
    };

    w.blank()
        .line("6. Check with ballast loaded:")
        .line(format!(
            "   Weight = {} kg, CG = {} mm (limits {} - {} mm)",
            s.final_weight_kg,
            round_to(s.final_cg_mm, 1),
            round_to(forward_cg_limit(config, s.final_weight_kg), 1),
            config.cg_range.light.aft_mm
        ))
        .blank()
        .line(answer_line);
    w.finish()
}

pub fn build_question(
    config: &AircraftConfig,
    id: String,
    scenario: &BallastScenario,
    items: Vec<LoadingItem>,
    solution: &BallastSolution,
) -> Question {
    let units = &scenario.loading.units;
    let station = scenario.method.station().phrase();

    let (scenario_line, question, answer, numerical_answer, unit) = match solution.loaded {
        LoadedBallast::Fuel { gallons, .. } => {
            let (value, unit) = fuel_answer(config, units.fuel_unit, gallons);
            let answer = match units.fuel_unit {
                FuelUnit::Gal => format!("Approximately {} US gallons of fuel required", value),
                FuelUnit::Lt => format!("Approximately {} litres of fuel required", value),
            };
            (
                format!(
                    "(Weights given in {}, fuel in {})",
                    units.weight_unit.label(),
                    units.fuel_unit.label()
                ),
                format!("How much fuel must be added to the {} to bring the CG within limits?", station),
                answer,
                value,
                unit,
            )
        }
        LoadedBallast::Weights { count, unit_kg, kg } => (
            format!("(Weights given in {})", units.weight_unit.label()),
            format!(
                "How many {} kg weights must be placed in the {} to bring the CG within limits?",
                unit_kg, station
            ),
            format!("{} x {} kg weights ({} kg total) in the {}", count, unit_kg, kg, station),
            count as f64,
            "weights",
        ),
    };

    Question {
        id,
        question_type: QuestionType::Ballast,
        title: QuestionType::Ballast.title().to_string(),
        scenario: format!(
            "Using Loading System ECHO, calculate the ballast required to bring the CG within limits. {}",
            scenario_line
        ),
        scenario_text: narrative(scenario),
        workings: workings(config, scenario, &items, solution),
        loading_table: items,
        question,
        answer,
        numerical_answer,
        unit: unit.to_string(),
    }
}

/// Generate a complete ballast question.
///
/// # Errors
/// `ScenarioExhausted` when no usable scenario turns up within
/// [`MAX_BALLAST_ATTEMPTS`] draws.
pub fn generate<R: Rng + ?Sized>(config: &AircraftConfig, ranges: &PassengerRanges, rng: &mut R) -> WbResult<Question> {
    let method = BallastMethod::random(rng);

    for attempt in 1..=MAX_BALLAST_ATTEMPTS {
        let scenario = scenario(ranges, method, rng);
        let items = build_loading_table(config, &scenario.loading);
        let solution = solve(config, &scenario, &items)?;

        match solution.rejection(config, &scenario) {
            None => {
                debug!(attempt, required_kg = solution.required_kg, "ballast scenario accepted");
                let id = new_question_id(rng);
                return Ok(build_question(config, id, &scenario, items, &solution));
            }
            Some(reason) => debug!(attempt, %reason, "resampling ballast scenario"),
        }
    }

    warn!(attempts = MAX_BALLAST_ATTEMPTS, ?method, "no usable ballast scenario");
    Err(WbError::ScenarioExhausted {
        question_type: QuestionType::Ballast.as_str().to_string(),
        attempts: MAX_BALLAST_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::ECHO;
    use crate::units::WeightUnit;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixed_scenario(method: BallastMethod) -> BallastScenario {
        // 1950 + 70 + 55 + 10 = 2085 kg, index 480 + 16.0 + 2.8 + 5.0 = 503.8
        BallastScenario {
            loading: LoadingScenario {
                units: UnitConfig::default(),
                basic_empty_weight_kg: 1950.0,
                basic_empty_index: 480.0,
                passengers: PassengerConfig {
                    row1: FrontRow { pilot: 70.0, passenger: None },
                    row2: SeatPair::EMPTY,
                    row3: SeatPair::EMPTY,
                },
                forward_cargo_kg: Some(55.0),
                rear_cargo_kg: Some(10.0),
                fuel_gal: None,
                burn_gal: None,
            },
            method,
        }
    }

    #[test]
    fn test_table_has_no_fuel_rows() {
        let scenario = fixed_scenario(BallastMethod::Fuel);
        let items = build_loading_table(&ECHO, &scenario.loading);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Aeroplane Basic Empty Weight",
                "Row 1 (Pilot only)",
                "Forward Compartment",
                "Rear Compartment"
            ]
        );
    }

    #[test]
    fn test_weights_solution() {
        let method = BallastMethod::Weights { unit_kg: 10.0, station: Station::RearCompartment };
        let scenario = fixed_scenario(method);
        let items = build_loading_table(&ECHO, &scenario.loading);
        let s = solve(&ECHO, &scenario, &items).unwrap();

        assert_eq!(s.totals.weight, 2085.0);
        assert!((s.totals.index - 503.8).abs() < 1e-9);
        // 503.8e4 / 2085 = 2416.3 mm, limit 2400 at 2085 kg: not forward
        assert!(s.current_cg_mm > s.forward_limit_mm);
        assert!(s.rejection(&ECHO, &scenario).is_some());
    }

    #[test]
    fn test_forward_scenario_solution() {
        let mut scenario = fixed_scenario(BallastMethod::Weights { unit_kg: 5.0, station: Station::RearCompartment });
        scenario.loading.basic_empty_index = 470.0;
        let items = build_loading_table(&ECHO, &scenario.loading);
        let s = solve(&ECHO, &scenario, &items).unwrap();

        // index 493.8 -> CG 2368.3 mm, 31.7 mm forward of 2400
        assert!((s.current_cg_mm - 2368.35).abs() < 0.01);
        assert_eq!(s.forward_limit_mm, 2400.0);
        assert_eq!(s.target_cg_mm, 2410.0);

        // 2085 * 41.65 / 2590 = 33.5 kg -> 7 x 5 kg
        assert!((s.required_kg - 33.53).abs() < 0.01);
        match s.loaded {
            LoadedBallast::Weights { count, unit_kg, kg } => {
                assert_eq!(count, 7);
                assert_eq!(unit_kg, 5.0);
                assert_eq!(kg, 35.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(s.final_cg_mm >= forward_cg_limit(&ECHO, s.final_weight_kg));
        assert!(s.rejection(&ECHO, &scenario).is_none());

        let q = build_question(&ECHO, "id".into(), &scenario, items, &s);
        assert_eq!(q.numerical_answer, 7.0);
        assert_eq!(q.unit, "weights");
        assert_eq!(q.answer, "7 x 5 kg weights (35 kg total) in the rear compartment");
        assert!(q.workings.contains("   Round up to 7 weights = 35 kg"));
        assert!(q.workings.ends_with("ANSWER: Add 7 x 5 kg weights (35 kg) to the rear compartment."));
        assert!(q.scenario_text.ends_with(
            "No fuel has been loaded yet. Calculate how many 5 kg weights must be placed in the rear compartment to bring the CG within limits."
        ));
    }

    #[test]
    fn test_fuel_solution_uses_aux_tanks() {
        let mut scenario = fixed_scenario(BallastMethod::Fuel);
        scenario.loading.basic_empty_index = 470.0;
        scenario.loading.units = UnitConfig { weight_unit: WeightUnit::Kg, fuel_unit: FuelUnit::Lt };
        let items = build_loading_table(&ECHO, &scenario.loading);
        let s = solve(&ECHO, &scenario, &items).unwrap();

        assert_eq!(s.ballast_arm_mm, 2800.0);
        // 2085 * 41.65 / 390 = 222.7 kg -> 113.7 gal -> 114 gal, more than the 80 gal aux capacity
        match s.loaded {
            LoadedBallast::Fuel { gallons, .. } => assert_eq!(gallons, 114.0),
            other => panic!("unexpected {:?}", other),
        }
        let reason = s.rejection(&ECHO, &scenario).unwrap();
        assert!(reason.contains("auxiliary tanks"));
    }

    #[test]
    fn test_generated_ballast_is_forward_and_positive() {
        let mut rng = ChaCha8Rng::seed_from_u64(4242);
        for _ in 0..40 {
            let q = generate(&ECHO, &PassengerRanges::default(), &mut rng).unwrap();
            let totals = take_off_totals(&q.loading_table);
            let cg = totals.cg().unwrap();
            assert!(cg < forward_cg_limit(&ECHO, totals.weight));
            assert!(q.numerical_answer > 0.0);
            assert!(q.loading_table.iter().all(|i| !i.name.starts_with("Fuel")));
        }
    }

    #[test]
    fn test_both_methods_generated() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let units: Vec<String> = (0..30)
            .map(|_| generate(&ECHO, &PassengerRanges::default(), &mut rng).unwrap().unit)
            .collect();
        assert!(units.iter().any(|u| u == "weights"));
        assert!(units.iter().any(|u| u == "gallons" || u == "litres"));
    }

    #[test]
    fn test_method_serialization() {
        let method = BallastMethod::Weights { unit_kg: 10.0, station: Station::LeftWingCompartment };
        let json = serde_json::to_value(method).unwrap();
        assert_eq!(json["method"], "weights");
        assert_eq!(json["station"], "LeftWingCompartment");
        assert_eq!(BallastMethod::Fuel.station(), Station::AuxTanks);
    }
}
