//! # Echo Aircraft Configuration
//!
//! Fixed loading data for the six-seat "Echo" aircraft used in CPL weight
//! and balance examinations. The configuration is a single `const` value;
//! formulas in [`crate::equations`] take it by reference.
//!
//! ## Example
//!
//! ```rust
//! use wb_core::aircraft::{Station, ECHO};
//!
//! assert_eq!(ECHO.weights.max_takeoff_kg, 2950.0);
//! assert_eq!(ECHO.arm(Station::RearCompartment), 5000.0);
//! assert_eq!(ECHO.mac.trailing_edge_mm(), 4090.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::LITRES_PER_US_GALLON;

/// The Echo loading system.
pub const ECHO: AircraftConfig = AircraftConfig {
    name: "Echo",
    seats: 6,
    weights: WeightLimits {
        max_takeoff_kg: 2950.0,
        max_landing_kg: 2725.0,
        max_zero_fuel_kg: 2630.0,
    },
    mac: MacGeometry {
        length_mm: 1900.0,
        leading_edge_mm: 2190.0,
    },
    cg_range: CgEnvelope {
        light: CgAnchor {
            weight_kg: 2360.0,
            forward_mm: 2400.0,
            aft_mm: 2680.0,
        },
        heavy: CgAnchor {
            weight_kg: 2950.0,
            forward_mm: 2560.0,
            aft_mm: 2680.0,
        },
    },
    arms: StationArms {
        row1_mm: 2290.0,
        row2_mm: 3300.0,
        row3_mm: 4300.0,
        forward_compartment_mm: 500.0,
        left_wing_compartment_mm: 3550.0,
        right_wing_compartment_mm: 3550.0,
        rear_compartment_mm: 5000.0,
        main_tanks_mm: 1780.0,
        aux_tanks_mm: 2800.0,
    },
    max_loads: StationLimits {
        forward_compartment_kg: 55.0,
        left_wing_compartment_kg: 55.0,
        right_wing_compartment_kg: 55.0,
        rear_compartment_kg: 155.0,
        seat_area_kg: 82.0,
        main_tank_gal: 50.0,
        aux_tank_gal: 40.0,
    },
    fuel: FuelProperties {
        main_tank_gal: 50.0,
        aux_tank_gal: 40.0,
        density_kg_per_l: 0.72,
        gal_to_litre: LITRES_PER_US_GALLON,
    },
    seat_weight_kg: 5.0,
};

/// Complete loading configuration for one aircraft type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AircraftConfig {
    /// Loading system name as printed on question sheets
    pub name: &'static str,
    /// Number of seats
    pub seats: u8,
    /// Structural weight limits
    pub weights: WeightLimits,
    /// Mean aerodynamic chord geometry
    pub mac: MacGeometry,
    /// Two-point CG envelope
    pub cg_range: CgEnvelope,
    /// Loading station arms (mm aft of datum)
    pub arms: StationArms,
    /// Maximum load per station
    pub max_loads: StationLimits,
    /// Fuel tank capacities and conversion data
    pub fuel: FuelProperties,
    /// Weight of one removable seat (kg)
    pub seat_weight_kg: f64,
}

impl AircraftConfig {
    /// Arm of a loading station in mm aft of datum.
    pub fn arm(&self, station: Station) -> f64 {
        match station {
            Station::Row1 => self.arms.row1_mm,
            Station::Row2 => self.arms.row2_mm,
            Station::Row3 => self.arms.row3_mm,
            Station::ForwardCompartment => self.arms.forward_compartment_mm,
            Station::LeftWingCompartment => self.arms.left_wing_compartment_mm,
            Station::RightWingCompartment => self.arms.right_wing_compartment_mm,
            Station::RearCompartment => self.arms.rear_compartment_mm,
            Station::MainTanks => self.arms.main_tanks_mm,
            Station::AuxTanks => self.arms.aux_tanks_mm,
        }
    }

    /// Maximum mass a station may carry, in kg.
    ///
    /// Seat rows are limited per seat area; tanks are converted from their
    /// gallon capacity (both sides) at the configured density.
    pub fn max_load_kg(&self, station: Station) -> f64 {
        let tank_kg = |gal_each: f64| 2.0 * gal_each * self.fuel.gal_to_litre * self.fuel.density_kg_per_l;
        match station {
            Station::Row1 | Station::Row2 | Station::Row3 => 2.0 * self.max_loads.seat_area_kg,
            Station::ForwardCompartment => self.max_loads.forward_compartment_kg,
            Station::LeftWingCompartment => self.max_loads.left_wing_compartment_kg,
            Station::RightWingCompartment => self.max_loads.right_wing_compartment_kg,
            Station::RearCompartment => self.max_loads.rear_compartment_kg,
            Station::MainTanks => tank_kg(self.fuel.main_tank_gal),
            Station::AuxTanks => tank_kg(self.fuel.aux_tank_gal),
        }
    }

    /// Combined capacity of a tank pair (left + right) in US gallons.
    ///
    /// Returns `None` for stations that are not fuel tanks.
    pub fn tank_capacity_gal(&self, station: Station) -> Option<f64> {
        match station {
            Station::MainTanks => Some(2.0 * self.fuel.main_tank_gal),
            Station::AuxTanks => Some(2.0 * self.fuel.aux_tank_gal),
            _ => None,
        }
    }
}

/// Maximum take-off, landing and zero-fuel weights (kg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightLimits {
    pub max_takeoff_kg: f64,
    pub max_landing_kg: f64,
    pub max_zero_fuel_kg: f64,
}

/// Mean aerodynamic chord (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacGeometry {
    /// Chord length
    pub length_mm: f64,
    /// Leading edge position aft of datum
    pub leading_edge_mm: f64,
}

impl MacGeometry {
    /// Trailing edge position aft of datum
    pub fn trailing_edge_mm(&self) -> f64 {
        self.leading_edge_mm + self.length_mm
    }
}

/// One corner of the CG envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgAnchor {
    pub weight_kg: f64,
    pub forward_mm: f64,
    pub aft_mm: f64,
}

/// CG envelope defined by a light and a heavy anchor.
///
/// `light.weight_kg < heavy.weight_kg` and the aft limit is the same at both
/// anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgEnvelope {
    /// At or below this weight the forward limit is constant
    pub light: CgAnchor,
    /// At or above this weight the forward limit is constant
    pub heavy: CgAnchor,
}

/// Loading station arms in mm aft of datum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationArms {
    pub row1_mm: f64,
    pub row2_mm: f64,
    pub row3_mm: f64,
    pub forward_compartment_mm: f64,
    pub left_wing_compartment_mm: f64,
    pub right_wing_compartment_mm: f64,
    pub rear_compartment_mm: f64,
    pub main_tanks_mm: f64,
    pub aux_tanks_mm: f64,
}

/// Structural limits per station. Tank limits are per side, in gallons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationLimits {
    pub forward_compartment_kg: f64,
    pub left_wing_compartment_kg: f64,
    pub right_wing_compartment_kg: f64,
    pub rear_compartment_kg: f64,
    /// Per seat position when the seat is removed
    pub seat_area_kg: f64,
    pub main_tank_gal: f64,
    pub aux_tank_gal: f64,
}

/// Fuel capacities and AVGAS conversion data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProperties {
    /// Capacity of each main tank (US gal)
    pub main_tank_gal: f64,
    /// Capacity of each auxiliary tank (US gal)
    pub aux_tank_gal: f64,
    /// AVGAS density (kg/L)
    pub density_kg_per_l: f64,
    /// Worksheet gallon-to-litre factor
    pub gal_to_litre: f64,
}

/// Named loading stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Station {
    Row1,
    Row2,
    Row3,
    ForwardCompartment,
    LeftWingCompartment,
    RightWingCompartment,
    RearCompartment,
    MainTanks,
    AuxTanks,
}

impl Station {
    /// All stations in worksheet order
    pub const ALL: [Station; 9] = [
        Station::Row1,
        Station::Row2,
        Station::Row3,
        Station::ForwardCompartment,
        Station::LeftWingCompartment,
        Station::RightWingCompartment,
        Station::RearCompartment,
        Station::MainTanks,
        Station::AuxTanks,
    ];

    /// Worksheet label
    pub fn display_name(&self) -> &'static str {
        match self {
            Station::Row1 => "Row 1 (Pilot + 1 Passenger)",
            Station::Row2 => "Row 2 (2 Passengers)",
            Station::Row3 => "Row 3 (2 Passengers)",
            Station::ForwardCompartment => "Forward Compartment",
            Station::LeftWingCompartment => "Left Wing Compartment",
            Station::RightWingCompartment => "Right Wing Compartment",
            Station::RearCompartment => "Rear Compartment",
            Station::MainTanks => "Main Tanks (L + R)",
            Station::AuxTanks => "Auxiliary Tanks (L + R)",
        }
    }

    /// Lower-case phrase used inside narrative sentences
    pub fn phrase(&self) -> &'static str {
        match self {
            Station::Row1 => "front row",
            Station::Row2 => "second row",
            Station::Row3 => "third row",
            Station::ForwardCompartment => "forward compartment",
            Station::LeftWingCompartment => "left wing compartment",
            Station::RightWingCompartment => "right wing compartment",
            Station::RearCompartment => "rear compartment",
            Station::MainTanks => "main tanks",
            Station::AuxTanks => "auxiliary tanks",
        }
    }
}
