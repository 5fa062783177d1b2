//! Public vehicle catalogue with optional fare estimates.
//!
//! ```text
//! GET /api/vehicles?type=taxi&distanceKm=12.5
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::VehicleRepositoryError;
use crate::domain::{DistanceKm, Error, Vehicle, VehicleType};

use super::ApiResult;
use super::state::HttpState;
use super::validation::{FieldName, invalid_distance_error, invalid_vehicle_type_error};

const TYPE: FieldName = FieldName::new("type");
const DISTANCE_KM: FieldName = FieldName::new("distanceKm");

/// Query string for `GET /api/vehicles`.
///
/// Both values arrive as text so malformed input is reported with field
/// details rather than a generic query error.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehiclesQuery {
    /// `taxi` or `bus`.
    #[serde(rename = "type")]
    #[param(example = "taxi")]
    pub vehicle_type: Option<String>,
    /// Trip length used to compute `estimatedFare`.
    #[param(example = "12.5")]
    pub distance_km: Option<String>,
}

impl VehiclesQuery {
    fn parse(self) -> Result<(Option<VehicleType>, Option<DistanceKm>), Error> {
        let vehicle_type = self
            .vehicle_type
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.trim()
                    .to_ascii_lowercase()
                    .parse::<VehicleType>()
                    .map_err(|_| invalid_vehicle_type_error(TYPE, &raw))
            })
            .transpose()?;
        let distance = self
            .distance_km
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(|km| DistanceKm::new(km).ok())
                    .ok_or_else(|| invalid_distance_error(DISTANCE_KM))
            })
            .transpose()?;
        Ok((vehicle_type, distance))
    }
}

/// A catalogue entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: Uuid,
    #[schema(example = "WagonR Taxi")]
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub image: String,
    #[schema(example = "4 passengers")]
    pub capacity: String,
    pub base_price: f64,
    pub price_per_km: f64,
    pub features: Vec<String>,
    #[schema(example = "5-10 mins")]
    pub estimated_time: String,
    pub available: u32,
    /// Present only when `distanceKm` was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_fare: Option<f64>,
}

impl VehicleDto {
    fn new(vehicle: Vehicle, distance: Option<DistanceKm>) -> Self {
        let estimated_fare = distance.map(|km| vehicle.quote(km));
        Self {
            id: vehicle.id,
            name: vehicle.name,
            vehicle_type: vehicle.vehicle_type,
            image: vehicle.image,
            capacity: vehicle.capacity,
            base_price: vehicle.base_price,
            price_per_km: vehicle.price_per_km,
            features: vehicle.features,
            estimated_time: vehicle.estimated_time,
            available: vehicle.available,
            estimated_fare,
        }
    }
}

/// `{vehicles}` envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehiclesResponse {
    pub vehicles: Vec<VehicleDto>,
}

fn map_vehicle_error(err: VehicleRepositoryError) -> Error {
    error!(error = %err, "vehicle catalogue lookup failed");
    match err {
        VehicleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vehicle repository unavailable: {message}"))
        }
        VehicleRepositoryError::Query { message } => {
            Error::internal(format!("vehicle repository error: {message}"))
        }
    }
}

/// List catalogue vehicles, optionally filtered and priced for a distance.
#[utoipa::path(
    get,
    path = "/api/vehicles",
    params(VehiclesQuery),
    responses(
        (status = 200, description = "Vehicle catalogue", body = VehiclesResponse),
        (status = 400, description = "Invalid type or distance", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["vehicles"],
    operation_id = "listVehicles",
    security([])
)]
#[get("/vehicles")]
pub async fn list_vehicles(
    state: web::Data<HttpState>,
    query: web::Query<VehiclesQuery>,
) -> ApiResult<web::Json<VehiclesResponse>> {
    let (vehicle_type, distance) = query.into_inner().parse()?;
    let vehicles = state
        .vehicles
        .list(vehicle_type)
        .await
        .map_err(map_vehicle_error)?;
    Ok(web::Json(VehiclesResponse {
        vehicles: vehicles
            .into_iter()
            .map(|vehicle| VehicleDto::new(vehicle, distance))
            .collect(),
    }))
}
