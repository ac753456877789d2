//! # wb_core - Weight & Balance Question Engine
//!
//! `wb_core` generates randomized CPL weight-and-balance practice questions
//! for the six-seat "Echo" loading system, each with a loading table, a
//! narrative scenario, a numeric answer and a fully worked solution. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Seeded**: every generator takes the caller's RNG, so a seed reproduces a set
//! - **JSON-First**: questions and sets implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **One Source of Truth**: answers and workings come from the same solution values
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use wb_core::{generate_question, QuestionType};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let question = generate_question(QuestionType::PercentMac, &mut rng).unwrap();
//! assert_eq!(question.unit, "% MAC");
//!
//! let json = serde_json::to_string_pretty(&question).unwrap();
//! assert!(json.contains("\"type\": \"percent-mac\""));
//! ```
//!
//! ## Modules
//!
//! - [`aircraft`] - The Echo loading system constants
//! - [`equations`] - Balance, envelope, ballast and fuel formulas
//! - [`scenario`] - Randomized loadings
//! - [`loading`] - Loading table rows and totals
//! - [`questions`] - The four question generators
//! - [`question_set`] - Question set container and sheet settings
//! - [`file_io`] - Hand-off files with atomic saves
//! - [`render`] / [`reference`] / [`pdf`] - Text and printable output
//! - [`calculator`] - Manual weight & balance worksheet
//! - [`units`] - Type-safe unit wrappers and display units
//! - [`errors`] - Structured error types

pub mod aircraft;
pub mod calculator;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loading;
pub mod pdf;
pub mod question_set;
pub mod questions;
pub mod reference;
pub mod render;
pub mod scenario;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use aircraft::{AircraftConfig, ECHO};
pub use errors::{WbError, WbResult};
pub use file_io::{load_for_print, load_question_set, save_question_set};
pub use question_set::{QuestionSet, SheetSettings};
pub use questions::{
    generate_question, generate_question_set, generate_random_question, Question, QuestionGenerator, QuestionType,
};
