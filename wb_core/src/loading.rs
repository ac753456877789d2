//! # Loading Table Builder
//!
//! Turns a [`LoadingScenario`] into the ordered rows of a weight and balance
//! worksheet:
//!
//! ```text
//! Aeroplane Basic Empty Weight
//! Row 1 .. Row 3                (occupied rows only)
//! Forward Compartment           (if loaded)
//! Rear Compartment              (if loaded)
//! Zero Fuel Weight              (subtotal, only when fuel follows)
//! Fuel (Main Tanks - n gal)
//! Fuel Burn-off (n gal)         (negative weight and index)
//! ```
//!
//! Every row's moment index is rounded to 1 dp. Running totals round the
//! index again after every addition, exactly as done by hand.

use serde::{Deserialize, Serialize};

use crate::aircraft::{AircraftConfig, Station};
use crate::equations::{cg_position, fuel_gal_to_kg, moment_index, round_to};
use crate::errors::WbResult;
use crate::scenario::{LoadingScenario, PassengerConfig, UnitConfig};

/// Row label for the empty aircraft
pub const BASIC_EMPTY_WEIGHT_LABEL: &str = "Aeroplane Basic Empty Weight";

/// Row label for the zero fuel subtotal
pub const ZERO_FUEL_WEIGHT_LABEL: &str = "Zero Fuel Weight";

/// What a worksheet row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    /// Basic empty weight and index (no arm)
    BasicEmpty,
    /// Occupants or cargo at a station
    #[default]
    Station,
    /// Zero fuel weight subtotal (no arm)
    ZeroFuelSubtotal,
    /// Fuel loaded at take-off
    Fuel,
    /// Fuel burnt in flight, stored negative
    BurnOff,
}

/// One worksheet row.
///
/// `weight` is signed (kg); `arm` is 0 for rows without a single arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingItem {
    pub name: String,
    pub weight: f64,
    pub arm: f64,
    pub moment_index: f64,
    #[serde(default)]
    pub kind: ItemKind,
}

impl LoadingItem {
    /// A station row; the index is computed and rounded to 1 dp.
    pub fn at_arm(name: impl Into<String>, weight_kg: f64, arm_mm: f64, kind: ItemKind) -> Self {
        LoadingItem {
            name: name.into(),
            weight: weight_kg,
            arm: arm_mm,
            moment_index: round_to(moment_index(weight_kg, arm_mm), 1),
            kind,
        }
    }

    /// The basic empty row, whose index is given rather than computed.
    pub fn basic_empty(weight_kg: f64, index: f64) -> Self {
        LoadingItem {
            name: BASIC_EMPTY_WEIGHT_LABEL.to_string(),
            weight: weight_kg,
            arm: 0.0,
            moment_index: round_to(index, 1),
            kind: ItemKind::BasicEmpty,
        }
    }

    /// Subtotal and burn-off rows are excluded from take-off totals
    pub fn is_adjustment(&self) -> bool {
        matches!(self.kind, ItemKind::ZeroFuelSubtotal | ItemKind::BurnOff)
    }

    /// Whether the arm column applies to this row
    pub fn has_arm(&self) -> bool {
        !matches!(self.kind, ItemKind::BasicEmpty | ItemKind::ZeroFuelSubtotal)
    }
}

/// Accumulated weight and moment index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub weight: f64,
    pub index: f64,
}

impl Totals {
    /// Add a row, rounding the running index to 1 dp
    pub fn add(self, weight: f64, index: f64) -> Self {
        Totals {
            weight: self.weight + weight,
            index: round_to(self.index + index, 1),
        }
    }

    /// CG in mm aft of datum.
    ///
    /// # Errors
    /// `DegenerateDivision` when the total weight is zero.
    pub fn cg(&self) -> WbResult<f64> {
        cg_position(self.weight, self.index)
    }
}

/// Sum rows in order, rounding the index at every step.
pub fn accumulate<'a, I>(items: I) -> Totals
where
    I: IntoIterator<Item = &'a LoadingItem>,
{
    items
        .into_iter()
        .fold(Totals::default(), |acc, item| acc.add(item.weight, item.moment_index))
}

/// Take-off totals: every row except the ZFW subtotal and burn-off.
pub fn take_off_totals(items: &[LoadingItem]) -> Totals {
    accumulate(items.iter().filter(|item| !item.is_adjustment()))
}

/// The burn-off row, if the table has one.
pub fn burn_off(items: &[LoadingItem]) -> Option<&LoadingItem> {
    items.iter().find(|item| item.kind == ItemKind::BurnOff)
}

/// One row per occupied seat row, named by who sits there.
pub fn passenger_items(config: &AircraftConfig, passengers: &PassengerConfig) -> Vec<LoadingItem> {
    let mut items = Vec::with_capacity(3);

    let row1_name = if passengers.row1.passenger.is_some() {
        "Row 1 (Pilot + Passenger)"
    } else {
        "Row 1 (Pilot only)"
    };
    let row1 = passengers.row1.total();
    if row1 > 0.0 {
        items.push(LoadingItem::at_arm(row1_name, row1, config.arm(Station::Row1), ItemKind::Station));
    }

    if !passengers.row2.is_empty() {
        let name = match passengers.row2.count() {
            2 => "Row 2 (2 Passengers)",
            _ => "Row 2 (1 Passenger)",
        };
        items.push(LoadingItem::at_arm(
            name,
            passengers.row2.total(),
            config.arm(Station::Row2),
            ItemKind::Station,
        ));
    }

    if !passengers.row3.is_empty() {
        let name = match passengers.row3.count() {
            2 => "Row 3 (2 Children)",
            _ => "Row 3 (1 Child)",
        };
        items.push(LoadingItem::at_arm(
            name,
            passengers.row3.total(),
            config.arm(Station::Row3),
            ItemKind::Station,
        ));
    }

    items
}

/// Fuel mass as entered on the worksheet (whole kg).
pub fn fuel_mass_kg(config: &AircraftConfig, gallons: f64) -> f64 {
    round_to(fuel_gal_to_kg(config, gallons), 0)
}

fn fuel_quantity_label(units: &UnitConfig, gallons: f64) -> String {
    format!("{} {}", units.fuel_unit.display_value(gallons), units.fuel_unit.label())
}

/// Build the ordered worksheet rows for a scenario.
///
/// The ZFW subtotal is inserted only when fuel is loaded; burn-off is
/// appended only when both fuel and a burn are present.
pub fn build_loading_table(config: &AircraftConfig, scenario: &LoadingScenario) -> Vec<LoadingItem> {
    let mut items = vec![LoadingItem::basic_empty(
        scenario.basic_empty_weight_kg,
        scenario.basic_empty_index,
    )];
    items.extend(passenger_items(config, &scenario.passengers));

    if let Some(kg) = scenario.forward_cargo_kg {
        items.push(LoadingItem::at_arm(
            "Forward Compartment",
            kg,
            config.arm(Station::ForwardCompartment),
            ItemKind::Station,
        ));
    }
    if let Some(kg) = scenario.rear_cargo_kg {
        items.push(LoadingItem::at_arm(
            "Rear Compartment",
            kg,
            config.arm(Station::RearCompartment),
            ItemKind::Station,
        ));
    }

    let Some(fuel_gal) = scenario.fuel_gal else {
        return items;
    };

    let zfw = accumulate(&items);
    items.push(LoadingItem {
        name: ZERO_FUEL_WEIGHT_LABEL.to_string(),
        weight: zfw.weight,
        arm: 0.0,
        moment_index: zfw.index,
        kind: ItemKind::ZeroFuelSubtotal,
    });

    let main_arm = config.arm(Station::MainTanks);
    items.push(LoadingItem::at_arm(
        format!("Fuel (Main Tanks - {})", fuel_quantity_label(&scenario.units, fuel_gal)),
        fuel_mass_kg(config, fuel_gal),
        main_arm,
        ItemKind::Fuel,
    ));

    if let Some(burn_gal) = scenario.burn_gal {
        let burn = LoadingItem::at_arm(
            format!("Fuel Burn-off ({})", fuel_quantity_label(&scenario.units, burn_gal)),
            fuel_mass_kg(config, burn_gal),
            main_arm,
            ItemKind::BurnOff,
        );
        items.push(LoadingItem {
            weight: -burn.weight,
            moment_index: -burn.moment_index,
            ..burn
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::ECHO;
    use crate::scenario::{FrontRow, PassengerRanges, SeatPair};
    use crate::units::{FuelUnit, WeightUnit};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pilot_only(kg: f64) -> PassengerConfig {
        PassengerConfig {
            row1: FrontRow { pilot: kg, passenger: None },
            row2: SeatPair::EMPTY,
            row3: SeatPair::EMPTY,
        }
    }

    /// BEW 2000 kg / 500.0, pilot 80 kg alone, rear cargo 30 kg, 80 gal of fuel
    fn worked_scenario() -> LoadingScenario {
        LoadingScenario {
            units: UnitConfig::default(),
            basic_empty_weight_kg: 2000.0,
            basic_empty_index: 500.0,
            passengers: pilot_only(80.0),
            forward_cargo_kg: None,
            rear_cargo_kg: Some(30.0),
            fuel_gal: Some(80.0),
            burn_gal: None,
        }
    }

    #[test]
    fn test_worked_scenario_rows() {
        let items = build_loading_table(&ECHO, &worked_scenario());
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Aeroplane Basic Empty Weight",
                "Row 1 (Pilot only)",
                "Rear Compartment",
                "Zero Fuel Weight",
                "Fuel (Main Tanks - 80 gal)",
            ]
        );

        assert_eq!(items[1].moment_index, 18.3);
        assert_eq!(items[2].moment_index, 15.0);

        // ZFW: 2000 + 80 + 30, 500.0 + 18.3 + 15.0
        assert_eq!(items[3].weight, 2110.0);
        assert_abs_diff_eq!(items[3].moment_index, 533.3, epsilon = 1e-9);

        // 80 gal -> 157 kg at 1780 mm -> 27.946 -> 27.9
        assert_eq!(items[4].weight, 157.0);
        assert_eq!(items[4].moment_index, 27.9);
    }

    #[test]
    fn test_worked_scenario_totals() {
        let items = build_loading_table(&ECHO, &worked_scenario());
        let totals = take_off_totals(&items);
        assert_eq!(totals.weight, 2267.0);
        assert_abs_diff_eq!(totals.index, 561.2, epsilon = 1e-9);

        let cg = totals.cg().unwrap();
        assert_abs_diff_eq!(cg, 2475.52, epsilon = 0.01);
    }

    #[test]
    fn test_zero_fuel_row_equals_sum_of_preceding_rows() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let ranges = PassengerRanges::default();
        for _ in 0..100 {
            let scenario = LoadingScenario {
                units: UnitConfig::random(&mut rng),
                basic_empty_weight_kg: 1950.0,
                basic_empty_index: 485.0,
                passengers: PassengerConfig::random(&mut rng, &ranges, true),
                forward_cargo_kg: Some(20.0),
                rear_cargo_kg: Some(45.0),
                fuel_gal: Some(90.0),
                burn_gal: Some(30.0),
            };
            let items = build_loading_table(&ECHO, &scenario);
            let zfw_pos = items
                .iter()
                .position(|i| i.kind == ItemKind::ZeroFuelSubtotal)
                .unwrap();
            let weight: f64 = items[..zfw_pos].iter().map(|i| i.weight).sum();
            let index: f64 = items[..zfw_pos].iter().map(|i| i.moment_index).sum();
            assert_eq!(items[zfw_pos].weight, weight);
            assert!((items[zfw_pos].moment_index - index).abs() <= 0.05);
            // subtotal directly precedes fuel
            assert_eq!(items[zfw_pos + 1].kind, ItemKind::Fuel);
        }
    }

    #[test]
    fn test_burn_off_row_is_negated() {
        let scenario = LoadingScenario {
            fuel_gal: Some(90.0),
            burn_gal: Some(25.0),
            ..worked_scenario()
        };
        let items = build_loading_table(&ECHO, &scenario);
        let burn = burn_off(&items).unwrap();
        assert_eq!(burn.name, "Fuel Burn-off (25 gal)");
        // 25 gal -> 48.96 -> 49 kg, 49 * 1780 / 10000 = 8.722 -> 8.7
        assert_eq!(burn.weight, -49.0);
        assert_eq!(burn.moment_index, -8.7);
        assert_eq!(burn.arm, 1780.0);

        // burn-off and subtotal excluded from take-off totals
        let totals = take_off_totals(&items);
        let expected = accumulate(items.iter().filter(|i| !i.is_adjustment()));
        assert_eq!(totals, expected);
        assert_eq!(totals.weight, 2000.0 + 80.0 + 30.0 + 176.0);
    }

    #[test]
    fn test_litre_labels() {
        let scenario = LoadingScenario {
            units: UnitConfig { weight_unit: WeightUnit::Lbs, fuel_unit: FuelUnit::Lt },
            burn_gal: Some(25.0),
            ..worked_scenario()
        };
        let items = build_loading_table(&ECHO, &scenario);
        assert!(items.iter().any(|i| i.name == "Fuel (Main Tanks - 218 lt)"));
        assert!(items.iter().any(|i| i.name == "Fuel Burn-off (68 lt)"));
    }

    #[test]
    fn test_no_fuel_means_no_subtotal() {
        let scenario = LoadingScenario {
            fuel_gal: None,
            forward_cargo_kg: Some(50.0),
            ..worked_scenario()
        };
        let items = build_loading_table(&ECHO, &scenario);
        assert!(items.iter().all(|i| i.kind != ItemKind::ZeroFuelSubtotal));
        assert_eq!(items.last().map(|i| i.name.as_str()), Some("Rear Compartment"));
        assert_eq!(items[2].name, "Forward Compartment");
        assert_eq!(items[2].moment_index, 2.5);
    }

    #[test]
    fn test_row_names_follow_occupancy() {
        let pax = PassengerConfig {
            row1: FrontRow { pilot: 70.0, passenger: Some(65.0) },
            row2: SeatPair { first: Some(60.0), second: None },
            row3: SeatPair { first: Some(30.0), second: Some(35.0) },
        };
        let items = passenger_items(&ECHO, &pax);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Row 1 (Pilot + Passenger)", "Row 2 (1 Passenger)", "Row 3 (2 Children)"]
        );
        assert_eq!(items[2].weight, 65.0);
        assert_eq!(items[2].arm, 4300.0);
    }

    #[test]
    fn test_arm_column_applicability() {
        let items = build_loading_table(&ECHO, &worked_scenario());
        assert!(!items[0].has_arm());
        assert!(items[1].has_arm());
        assert!(!items[3].has_arm());
    }

    #[test]
    fn test_json_field_names() {
        let item = LoadingItem::at_arm("Rear Compartment", 30.0, 5000.0, ItemKind::Station);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["momentIndex"], 15.0);
        assert_eq!(json["kind"], "station");

        let parsed: LoadingItem =
            serde_json::from_str(r#"{"name":"X","weight":1.0,"arm":2.0,"momentIndex":0.0}"#).unwrap();
        assert_eq!(parsed.kind, ItemKind::Station);
    }
}
