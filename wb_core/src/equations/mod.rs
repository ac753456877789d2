//! # Weight & Balance Equations
//!
//! Every formula used by the question generators and the manual calculator
//! lives here, so worked solutions and numeric answers come from one place.
//!
//! ## Modules
//!
//! - [`balance`] - Moment index, CG position, %MAC, CG envelope, ballast
//! - [`fuel`] - AVGAS volume/mass conversions
//! - [`rounding`] - Worksheet rounding
//! - [`registry`] - Formula metadata for reference sheets and workings text
//!
//! ## Sign Conventions
//!
//! - **Arm**: Positive aft of datum (mm)
//! - **Weight**: Positive when added; burn-off rows carry negative weight
//! - **Moment index**: weight x arm / 10000, same sign as weight
//! - **Ballast**: Positive when mass must be added at the ballast arm

pub mod balance;
pub mod fuel;
pub mod registry;
pub mod rounding;

pub use balance::{
    aft_cg_limit,
    ballast_required,
    cg_position,
    forward_cg_limit,
    forward_limit_ratio,
    is_within_limits,
    moment_index,
    percent_mac,
};
pub use fuel::{
    fuel_gal_to_kg,
    fuel_kg_to_gal,
    gal_to_litres,
};
pub use registry::{Formula, FormulaMetadata};
pub use rounding::round_to;
