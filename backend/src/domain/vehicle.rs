//! Vehicle catalogue entries and fare quotes.
//!
//! The catalogue is read-only reference data. It drives price display on the
//! booking screen; bookings copy the chosen vehicle's name and type rather
//! than referencing the catalogue row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Vehicle class offered by the catalogue and driven by drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Taxi,
    Bus,
}

impl VehicleType {
    /// Stable lower-case label used in storage and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Taxi => "taxi",
            Self::Bus => "bus",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a vehicle type label is not one of the known classes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle type: {0}")]
pub struct UnknownVehicleType(pub String);

impl FromStr for VehicleType {
    type Err = UnknownVehicleType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "taxi" => Ok(Self::Taxi),
            "bus" => Ok(Self::Bus),
            _ => Err(UnknownVehicleType(value.to_owned())),
        }
    }
}

/// Trip distance used for fare quotes.
///
/// ## Invariants
/// - Finite, non-negative and at most [`DistanceKm::MAX`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceKm(f64);

/// Raised when a distance is negative, not finite or beyond [`DistanceKm::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("distance must be between 0 and 20000 kilometres")]
pub struct InvalidDistance;

impl DistanceKm {
    /// Longest quotable trip: roughly half the Earth's circumference.
    pub const MAX: f64 = 20_000.0;

    /// Validate a raw kilometre value.
    pub fn new(km: f64) -> Result<Self, InvalidDistance> {
        if (0.0..=Self::MAX).contains(&km) {
            Ok(Self(km))
        } else {
            Err(InvalidDistance)
        }
    }

    /// Kilometres as a float.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Catalogue entry describing a bookable vehicle offering.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub image: String,
    /// Human-readable capacity label such as "4 passengers".
    pub capacity: String,
    pub base_price: f64,
    pub price_per_km: f64,
    pub features: Vec<String>,
    /// Human-readable pickup estimate such as "5-10 mins".
    pub estimated_time: String,
    /// Number of vehicles of this kind currently available.
    pub available: u32,
}

impl Vehicle {
    /// Fare for a trip: base price plus the per-kilometre rate.
    ///
    /// # Examples
    /// ```
    /// use rideease::domain::{DistanceKm, Vehicle, VehicleType};
    /// use uuid::Uuid;
    ///
    /// let taxi = Vehicle {
    ///     id: Uuid::nil(),
    ///     name: "WagonR Taxi".into(),
    ///     vehicle_type: VehicleType::Taxi,
    ///     image: "/images/wagonr.jpg".into(),
    ///     capacity: "4 passengers".into(),
    ///     base_price: 50.0,
    ///     price_per_km: 10.0,
    ///     features: vec![],
    ///     estimated_time: "5-10 mins".into(),
    ///     available: 3,
    /// };
    /// let distance = DistanceKm::new(55.0).expect("valid distance");
    /// assert_eq!(taxi.quote(distance), 600.0);
    /// ```
    pub fn quote(&self, distance: DistanceKm) -> f64 {
        self.base_price + self.price_per_km * distance.get()
    }

    /// Whether the catalogue entry matches an optional type filter.
    pub fn matches(&self, filter: Option<VehicleType>) -> bool {
        filter.is_none_or(|wanted| wanted == self.vehicle_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bus() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            name: "Bumpa Bus".into(),
            vehicle_type: VehicleType::Bus,
            image: "/images/bus.jpg".into(),
            capacity: "30 passengers".into(),
            base_price: 150.0,
            price_per_km: 8.0,
            features: vec!["AC".into()],
            estimated_time: "15-20 mins".into(),
            available: 2,
        }
    }

    #[rstest]
    #[case("taxi", VehicleType::Taxi)]
    #[case(" Bus ", VehicleType::Bus)]
    fn parses_known_types(#[case] raw: &str, #[case] expected: VehicleType) {
        assert_eq!(raw.parse::<VehicleType>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_types() {
        assert!("rickshaw".parse::<VehicleType>().is_err());
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(20_000.5)]
    #[case(1e308)]
    fn rejects_invalid_distances(#[case] km: f64) {
        assert_eq!(DistanceKm::new(km), Err(InvalidDistance));
    }

    #[rstest]
    fn longest_distance_quotes_a_finite_fare(bus: Vehicle) {
        let distance = DistanceKm::new(DistanceKm::MAX).expect("valid distance");
        assert!(bus.quote(distance).is_finite());
    }

    #[rstest]
    fn quote_adds_distance_charge(bus: Vehicle) {
        let distance = DistanceKm::new(55.0).expect("valid distance");
        assert_eq!(bus.quote(distance), 590.0);
    }

    #[rstest]
    fn filter_matches_type(bus: Vehicle) {
        assert!(bus.matches(None));
        assert!(bus.matches(Some(VehicleType::Bus)));
        assert!(!bus.matches(Some(VehicleType::Taxi)));
    }
}
