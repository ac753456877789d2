//! # Question Generators
//!
//! Each question type lives in its own module and follows the same shape:
//!
//! - `scenario(..)` - draw a randomized loading
//! - `solve(..)` - pure calculation over the loading table
//! - `build_question(..)` - render narrative, answer and workings
//! - `generate(..)` - all of the above with a fresh id
//!
//! Workings and numeric answers are rendered from the same solution values,
//! so the two can never disagree.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wb_core::questions::{generate_question_set, QuestionType};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let set = generate_question_set(&[QuestionType::PercentMac, QuestionType::Ballast], 2, &mut rng).unwrap();
//! let types: Vec<_> = set.iter().map(|q| q.question_type).collect();
//! assert_eq!(
//!     types,
//!     vec![QuestionType::PercentMac, QuestionType::PercentMac, QuestionType::Ballast, QuestionType::Ballast]
//! );
//! ```

pub mod ballast;
pub mod forward_cg_limit;
pub mod percent_mac;
pub mod weight_balance;
pub mod workings;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::aircraft::{AircraftConfig, ECHO};
use crate::errors::{WbError, WbResult};
use crate::loading::LoadingItem;
use crate::scenario::{PassengerRanges, UnitConfig};

/// The four kinds of practice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    PercentMac,
    ForwardCgLimit,
    WeightBalance,
    Ballast,
}

impl QuestionType {
    /// All types in selection order
    pub const ALL: [QuestionType; 4] = [
        QuestionType::PercentMac,
        QuestionType::ForwardCgLimit,
        QuestionType::WeightBalance,
        QuestionType::Ballast,
    ];

    /// Kebab-case name used in JSON and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::PercentMac => "percent-mac",
            QuestionType::ForwardCgLimit => "forward-cg-limit",
            QuestionType::WeightBalance => "weight-balance",
            QuestionType::Ballast => "ballast",
        }
    }

    /// Title printed above a question
    pub fn title(&self) -> &'static str {
        match self {
            QuestionType::PercentMac => "%MAC Calculation",
            QuestionType::ForwardCgLimit => "Forward CG Limit",
            QuestionType::WeightBalance => "Weight & Balance Check",
            QuestionType::Ballast => "Ballast Calculation",
        }
    }

    /// Short label for type badges and selection lists
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::PercentMac => "%MAC",
            QuestionType::ForwardCgLimit => "Forward CG Limit",
            QuestionType::WeightBalance => "Weight & Balance",
            QuestionType::Ballast => "Ballast",
        }
    }

    /// One-line summary shown when listing the types
    pub fn description(&self) -> &'static str {
        match self {
            QuestionType::PercentMac => "Calculate CG as percentage of MAC",
            QuestionType::ForwardCgLimit => "Determine forward CG limits",
            QuestionType::WeightBalance => "Full W&B verification",
            QuestionType::Ballast => "Calculate ballast requirements",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = WbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| WbError::unknown_question_type(name))
    }
}

/// A complete practice question with all text pre-rendered.
///
/// Immutable once generated; serializes to flat camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub title: String,
    /// One-line task statement including the display units
    pub scenario: String,
    /// Narrative description of the loading
    pub scenario_text: String,
    pub loading_table: Vec<LoadingItem>,
    pub question: String,
    pub answer: String,
    pub workings: String,
    pub numerical_answer: f64,
    pub unit: String,
}

/// Question factory bound to an aircraft configuration.
#[derive(Debug, Clone, Copy)]
pub struct QuestionGenerator<'a> {
    pub config: &'a AircraftConfig,
    pub passengers: PassengerRanges,
}

impl Default for QuestionGenerator<'static> {
    fn default() -> Self {
        QuestionGenerator::new(&ECHO)
    }
}

impl<'a> QuestionGenerator<'a> {
    pub fn new(config: &'a AircraftConfig) -> Self {
        QuestionGenerator {
            config,
            passengers: PassengerRanges::default(),
        }
    }

    /// Generate one question of the given type.
    ///
    /// # Errors
    /// `ScenarioExhausted` if a ballast scenario cannot be found within the
    /// attempt budget; `DegenerateDivision` never occurs for the built-in
    /// ranges but is propagated rather than hidden.
    pub fn generate<R: Rng + ?Sized>(&self, question_type: QuestionType, rng: &mut R) -> WbResult<Question> {
        let question = match question_type {
            QuestionType::PercentMac => percent_mac::generate(self.config, &self.passengers, rng),
            QuestionType::ForwardCgLimit => forward_cg_limit::generate(self.config, &self.passengers, rng),
            QuestionType::WeightBalance => weight_balance::generate(self.config, &self.passengers, rng),
            QuestionType::Ballast => ballast::generate(self.config, &self.passengers, rng),
        }?;
        debug!(
            id = %question.id,
            question_type = %question.question_type,
            answer = question.numerical_answer,
            unit = %question.unit,
            "generated question"
        );
        Ok(question)
    }

    /// Generate `count_per_type` questions for each type, grouped by type in
    /// the order given.
    ///
    /// An empty type list gives an empty set.
    ///
    /// # Errors
    /// `InvalidInput` when `count_per_type` is zero.
    pub fn generate_set<R: Rng + ?Sized>(
        &self,
        types: &[QuestionType],
        count_per_type: usize,
        rng: &mut R,
    ) -> WbResult<Vec<Question>> {
        if count_per_type == 0 {
            return Err(WbError::invalid_input(
                "count_per_type",
                "0",
                "At least one question per type is required",
            ));
        }

        let mut questions = Vec::with_capacity(types.len() * count_per_type);
        for &question_type in types {
            for _ in 0..count_per_type {
                questions.push(self.generate(question_type, rng)?);
            }
        }
        Ok(questions)
    }

    /// One question of a uniformly chosen type
    pub fn generate_random<R: Rng + ?Sized>(&self, rng: &mut R) -> WbResult<Question> {
        let index = rng.gen_range(0..QuestionType::ALL.len());
        self.generate(QuestionType::ALL[index], rng)
    }
}

/// Generate one question for the Echo aircraft.
pub fn generate_question<R: Rng + ?Sized>(question_type: QuestionType, rng: &mut R) -> WbResult<Question> {
    QuestionGenerator::default().generate(question_type, rng)
}

/// Generate a grouped question set for the Echo aircraft.
pub fn generate_question_set<R: Rng + ?Sized>(
    types: &[QuestionType],
    count_per_type: usize,
    rng: &mut R,
) -> WbResult<Vec<Question>> {
    QuestionGenerator::default().generate_set(types, count_per_type, rng)
}

/// Generate one question of a random type for the Echo aircraft.
pub fn generate_random_question<R: Rng + ?Sized>(rng: &mut R) -> WbResult<Question> {
    QuestionGenerator::default().generate_random(rng)
}

/// Question id drawn from the caller's random source, so seeded runs
/// reproduce ids as well as content.
pub(crate) fn new_question_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    seeded_uuid(rng).to_string()
}

/// Version 4 UUID built from the caller's random source.
pub(crate) fn seeded_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Parse an id back into a UUID, if it is one.
pub fn parse_question_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// "(Weights given in kg, fuel in gal)"
pub(crate) fn units_note(units: &UnitConfig) -> String {
    format!(
        "(Weights given in {}, fuel in {})",
        units.weight_unit.label(),
        units.fuel_unit.label()
    )
}
