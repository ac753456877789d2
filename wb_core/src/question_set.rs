//! # Question Sets
//!
//! A `QuestionSet` is the root container handed from the generator to the
//! print and study views. Sets serialize to `.wbq` files as human-readable
//! JSON (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! QuestionSet
//! ├── version: schema version
//! ├── id / name / created_at
//! ├── settings: SheetSettings (title, types, count per type, seed)
//! └── questions: Vec<Question> (grouped by type, in settings order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wb_core::question_set::{QuestionSet, SheetSettings};
//! use wb_core::questions::QuestionType;
//!
//! let settings = SheetSettings::new(vec![QuestionType::PercentMac], 2);
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let set = QuestionSet::generate("Week 3 practice", settings, &mut rng).unwrap();
//! assert_eq!(set.questions.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{WbError, WbResult};
use crate::questions::{seeded_uuid, Question, QuestionGenerator, QuestionType};

/// Current schema version for .wbq files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Sheet title used when none is given
pub const DEFAULT_SHEET_TITLE: &str = "CPL Weight & Balance Questions";

/// Largest count per type offered by the generator
pub const MAX_COUNT_PER_TYPE: usize = 5;

/// Generated questions plus the settings that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub id: Uuid,

    /// Free-form name shown in listings
    pub name: String,

    pub created_at: DateTime<Utc>,

    pub settings: SheetSettings,

    /// Questions grouped by type in `settings.types` order
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// Wrap already generated questions.
    pub fn new(name: impl Into<String>, settings: SheetSettings, questions: Vec<Question>) -> Self {
        QuestionSet {
            version: SCHEMA_VERSION.to_string(),
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            settings,
            questions,
        }
    }

    /// Generate a set for the Echo aircraft. The set id is drawn from `rng`
    /// after the questions, so a seed reproduces the ids as well.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - count per type outside 1..=5
    /// * `ScenarioExhausted` - a ballast question could not be drawn
    pub fn generate<R: Rng + ?Sized>(name: impl Into<String>, settings: SheetSettings, rng: &mut R) -> WbResult<Self> {
        settings.validate()?;
        let questions = QuestionGenerator::default().generate_set(&settings.types, settings.count_per_type, rng)?;
        let mut set = QuestionSet::new(name, settings, questions);
        set.id = seeded_uuid(rng);
        debug!(id = %set.id, count = set.len(), types = set.settings.types.len(), "question set generated");
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Number of printed pages: a question page and an answer page each.
    pub fn page_count(&self) -> usize {
        2 * self.questions.len()
    }
}

/// Settings stored with each question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSettings {
    /// Title printed on the sheet header
    pub title: String,

    /// Selected question types, in generation order
    pub types: Vec<QuestionType>,

    pub count_per_type: usize,

    /// Seed used for generation, if the run was seeded
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SheetSettings {
    pub fn new(types: Vec<QuestionType>, count_per_type: usize) -> Self {
        SheetSettings {
            types,
            count_per_type,
            ..SheetSettings::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check the count per type.
    pub fn validate(&self) -> WbResult<()> {
        if !(1..=MAX_COUNT_PER_TYPE).contains(&self.count_per_type) {
            return Err(WbError::invalid_input(
                "count_per_type",
                self.count_per_type.to_string(),
                format!("must be between 1 and {}", MAX_COUNT_PER_TYPE),
            ));
        }
        Ok(())
    }
}

impl Default for SheetSettings {
    fn default() -> Self {
        SheetSettings {
            title: DEFAULT_SHEET_TITLE.to_string(),
            types: QuestionType::ALL.to_vec(),
            count_per_type: 1,
            seed: None,
        }
    }
}
