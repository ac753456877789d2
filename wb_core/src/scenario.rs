//! # Scenario Randomizer
//!
//! Randomized loading configurations and the narrative sentences that
//! describe them. Every function takes the random source as a parameter so
//! callers can seed it for reproducible question sets.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wb_core::scenario::{random_in_range, PassengerConfig, PassengerRanges};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let bew = random_in_range(&mut rng, 1900.0, 2050.0, 10.0);
//! assert!(bew >= 1900.0 && bew <= 2050.0);
//!
//! let pax = PassengerConfig::random(&mut rng, &PassengerRanges::default(), false);
//! assert!(pax.row3.is_empty());
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::units::{FuelUnit, WeightUnit};

/// Probability that a second person sits in the front row
pub const FRONT_PASSENGER_PROBABILITY: f64 = 0.6;

/// Basic empty weight range for the standard loadings (kg)
pub const STANDARD_EMPTY_WEIGHT: WeightRange = WeightRange::new(1900.0, 2050.0, 10.0);

/// Basic moment index range for the standard loadings
pub const STANDARD_EMPTY_INDEX: WeightRange = WeightRange::new(465.0, 510.0, 5.0);

/// Uniformly chosen multiple of `step` in `[min, max]`.
///
/// The upper bound is included when `max - min` is a whole number of steps.
/// A non-positive step or an empty range yields `min`.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, step: f64) -> f64 {
    if step <= 0.0 || max <= min {
        return min;
    }
    let steps = ((max - min) / step).floor() as u32;
    min + rng.gen_range(0..=steps) as f64 * step
}

/// Inclusive weight range sampled in fixed steps (kg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl WeightRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        WeightRange { min, max, step }
    }

    /// Draw one value from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        random_in_range(rng, self.min, self.max, self.step)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Weight ranges used for occupants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassengerRanges {
    /// Pilot, front passenger and second row
    pub adult: WeightRange,
    /// Third row
    pub child: WeightRange,
}

impl Default for PassengerRanges {
    fn default() -> Self {
        PassengerRanges {
            // capped at the 77 kg standard seat weight
            adult: WeightRange::new(55.0, 77.0, 1.0),
            child: WeightRange::new(25.0, 45.0, 1.0),
        }
    }
}

/// Display units chosen for one question.
///
/// Arithmetic always uses kilograms and US gallons; these only affect the
/// narrative and the fuel row labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitConfig {
    pub weight_unit: WeightUnit,
    pub fuel_unit: FuelUnit,
}

impl UnitConfig {
    /// Weight and fuel units chosen independently, 50% each
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        UnitConfig {
            weight_unit: if rng.gen_bool(0.5) { WeightUnit::Kg } else { WeightUnit::Lbs },
            fuel_unit: if rng.gen_bool(0.5) { FuelUnit::Gal } else { FuelUnit::Lt },
        }
    }
}

/// The front row. The pilot's seat is always occupied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontRow {
    pub pilot: f64,
    pub passenger: Option<f64>,
}

impl FrontRow {
    pub fn total(&self) -> f64 {
        self.pilot + self.passenger.unwrap_or(0.0)
    }
}

/// A two-seat row. Empty seats are `None`; the first seat fills before the second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeatPair {
    pub first: Option<f64>,
    pub second: Option<f64>,
}

impl SeatPair {
    pub const EMPTY: SeatPair = SeatPair { first: None, second: None };

    /// Fill `count` seats (0, 1 or 2) from `range`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, count: u8, range: &WeightRange) -> Self {
        let first = if count >= 1 { Some(range.sample(rng)) } else { None };
        let second = if count >= 2 { Some(range.sample(rng)) } else { None };
        SeatPair { first, second }
    }

    pub fn count(&self) -> usize {
        self.first.is_some() as usize + self.second.is_some() as usize
    }

    pub fn total(&self) -> f64 {
        self.first.unwrap_or(0.0) + self.second.unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Seat occupancy for the three rows (kg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassengerConfig {
    pub row1: FrontRow,
    pub row2: SeatPair,
    pub row3: SeatPair,
}

impl PassengerConfig {
    /// Random occupancy: pilot always, front passenger with
    /// [`FRONT_PASSENGER_PROBABILITY`], rows 2 and 3 each 0, 1 or 2 seats
    /// uniformly. Row 3 stays empty unless `include_row3` is set.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, ranges: &PassengerRanges, include_row3: bool) -> Self {
        let pilot = ranges.adult.sample(rng);
        let passenger = if rng.gen_bool(FRONT_PASSENGER_PROBABILITY) {
            Some(ranges.adult.sample(rng))
        } else {
            None
        };

        let row2_count = rng.gen_range(0..=2u8);
        let row2 = SeatPair::random(rng, row2_count, &ranges.adult);

        let row3 = if include_row3 {
            let row3_count = rng.gen_range(0..=2u8);
            SeatPair::random(rng, row3_count, &ranges.child)
        } else {
            SeatPair::EMPTY
        };

        PassengerConfig {
            row1: FrontRow { pilot, passenger },
            row2,
            row3,
        }
    }

    /// Total occupant mass (kg)
    pub fn total(&self) -> f64 {
        self.row1.total() + self.row2.total() + self.row3.total()
    }

    /// One sentence per row, in row order.
    ///
    /// An empty second row is stated explicitly; an empty third row is
    /// left out.
    pub fn narrate(&self, units: &UnitConfig) -> Vec<String> {
        let w = |kg: f64| units.weight_unit.format(kg);
        let mut sentences = Vec::with_capacity(3);

        sentences.push(match self.row1.passenger {
            Some(passenger) => format!(
                "The pilot weighs {} and sits in the left front seat. A front seat passenger weighing {} occupies the right front seat.",
                w(self.row1.pilot),
                w(passenger)
            ),
            None => format!(
                "The pilot weighs {} and is the only occupant in the front row.",
                w(self.row1.pilot)
            ),
        });

        sentences.push(match (self.row2.first, self.row2.second) {
            (Some(a), Some(b)) => format!(
                "In the second row, there are two passengers weighing {} and {}.",
                w(a),
                w(b)
            ),
            (Some(a), None) | (None, Some(a)) => {
                format!("There is one passenger in the second row weighing {}.", w(a))
            }
            (None, None) => "The second row is empty.".to_string(),
        });

        match (self.row3.first, self.row3.second) {
            (Some(a), Some(b)) => sentences.push(format!(
                "Two children occupy the third row, weighing {} and {}.",
                w(a),
                w(b)
            )),
            (Some(a), None) | (None, Some(a)) => {
                sentences.push(format!("One child sits in the third row, weighing {}.", w(a)))
            }
            (None, None) => {}
        }

        sentences
    }
}

/// A randomized loading: empty aircraft, occupants, cargo and fuel.
///
/// Absent items are `None`, never zero. Fuel quantities are US gallons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingScenario {
    pub units: UnitConfig,
    pub basic_empty_weight_kg: f64,
    pub basic_empty_index: f64,
    pub passengers: PassengerConfig,
    pub forward_cargo_kg: Option<f64>,
    pub rear_cargo_kg: Option<f64>,
    /// Fuel in the main tanks at take-off
    pub fuel_gal: Option<f64>,
    /// Planned burn-off from the main tanks
    pub burn_gal: Option<f64>,
}

impl LoadingScenario {
    /// Opening sentence shared by every question type
    pub fn basic_empty_sentence(&self, connective: &str) -> String {
        format!(
            "An Echo aircraft has a basic empty weight of {} {} a basic moment index of {}.",
            self.units.weight_unit.format(self.basic_empty_weight_kg),
            connective,
            self.basic_empty_index
        )
    }
}

/// Join narrative paragraphs with a blank line between them
pub fn join_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paragraphs
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
