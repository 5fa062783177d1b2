//! PostgreSQL-backed `VehicleRepository` over the seeded catalogue.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VehicleRepository, VehicleRepositoryError};
use crate::domain::{Vehicle, VehicleType};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::VehicleRow;
use super::pool::DbPool;
use super::schema::vehicles;

#[derive(Clone)]
pub struct DieselVehicleRepository {
    pool: DbPool,
}

impl DieselVehicleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_vehicle(row: VehicleRow) -> Result<Vehicle, VehicleRepositoryError> {
    let vehicle_type: VehicleType = row
        .vehicle_type
        .parse()
        .map_err(|err| VehicleRepositoryError::query(format!("vehicle {}: {err}", row.id)))?;
    Ok(Vehicle {
        id: row.id,
        name: row.name,
        vehicle_type,
        image: row.image,
        capacity: row.capacity,
        base_price: row.base_price,
        price_per_km: row.price_per_km,
        features: row.features,
        estimated_time: row.estimated_time,
        available: u32::try_from(row.available).unwrap_or(0),
    })
}

#[async_trait]
impl VehicleRepository for DieselVehicleRepository {
    async fn list(
        &self,
        vehicle_type: Option<VehicleType>,
    ) -> Result<Vec<Vehicle>, VehicleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, VehicleRepositoryError::connection))?;
        let mut query = vehicles::table
            .select(VehicleRow::as_select())
            .order(vehicles::name.asc())
            .into_boxed();
        if let Some(wanted) = vehicle_type {
            query = query.filter(vehicles::vehicle_type.eq(wanted.as_str()));
        }
        let rows: Vec<VehicleRow> = query.load(&mut conn).await.map_err(|err| {
            map_diesel_error(
                err,
                VehicleRepositoryError::query,
                VehicleRepositoryError::connection,
            )
        })?;
        rows.into_iter().map(row_to_vehicle).collect()
    }
}
