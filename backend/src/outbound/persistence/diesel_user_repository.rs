//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::dsl::{exists, now};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{
    DriverProfile, Email, PasswordDigest, PersonName, Phone, Role, RoleProfile, User, UserId,
    VehicleType,
};

use super::error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the account store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    if let Some(constraint) = unique_violation(&error) {
        return UserPersistenceError::duplicate(constraint);
    }
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn corrupt(id: uuid::Uuid, what: impl std::fmt::Display) -> UserPersistenceError {
    UserPersistenceError::query(format!("user {id}: {what}"))
}

fn driver_profile(row: &UserRow) -> Result<DriverProfile, UserPersistenceError> {
    let (Some(license), Some(vehicle_type), Some(vehicle_number), Some(experience)) = (
        row.license_number.as_deref(),
        row.driver_vehicle_type.as_deref(),
        row.vehicle_number.as_deref(),
        row.experience_years,
    ) else {
        return Err(corrupt(row.id, "driver account is missing driver details"));
    };
    let vehicle_type: VehicleType = vehicle_type.parse().map_err(|err| corrupt(row.id, err))?;
    DriverProfile::new(license, vehicle_type, vehicle_number, experience)
        .map_err(|err| corrupt(row.id, err))
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let role: Role = row.role.parse().map_err(|err| corrupt(row.id, err))?;
    let profile = match role {
        Role::Passenger => RoleProfile::Passenger,
        Role::Driver => RoleProfile::Driver(driver_profile(&row)?),
        Role::Admin => RoleProfile::Admin,
    };
    Ok(User {
        id: UserId::from_uuid(row.id),
        name: PersonName::new(&row.name).map_err(|err| corrupt(row.id, err))?,
        email: Email::new(&row.email).map_err(|err| corrupt(row.id, err))?,
        phone: Phone::new(&row.phone).map_err(|err| corrupt(row.id, err))?,
        profile,
        is_verified: row.is_verified,
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password: &PasswordDigest,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let driver = user.profile.driver();
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            phone: user.phone.as_ref(),
            password_hash: password.as_str(),
            role: user.role().as_str(),
            license_number: driver.map(DriverProfile::license_number),
            driver_vehicle_type: driver.map(|profile| profile.vehicle_type().as_str()),
            vehicle_number: driver.map(DriverProfile::vehicle_number),
            experience_years: driver.map(|profile| i32::from(profile.experience_years())),
            is_verified: user.is_verified,
            created_at: user.created_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let found: Option<(UserRow, String)> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select((UserRow::as_select(), users::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        found
            .map(|(row, hash)| {
                Ok(StoredCredentials {
                    user: row_to_user(row)?,
                    password: PasswordDigest::new(hash),
                })
            })
            .transpose()
    }

    async fn contact_in_use(
        &self,
        email: &Email,
        phone: &Phone,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::select(exists(
            users::table.filter(
                users::email
                    .eq(email.as_ref())
                    .or(users::phone.eq(phone.as_ref())),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error)
    }

    async fn update_profile(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let driver = user.profile.driver();
        let changes = UserProfileUpdate {
            name: user.name.as_ref(),
            phone: user.phone.as_ref(),
            license_number: driver.map(DriverProfile::license_number),
            driver_vehicle_type: driver.map(|profile| profile.vehicle_type().as_str()),
            vehicle_number: driver.map(DriverProfile::vehicle_number),
            experience_years: driver.map(|profile| i32::from(profile.experience_years())),
        };
        let row: Option<UserRow> = diesel::update(users::table.find(user.id.as_uuid()))
            .set((&changes, users::updated_at.eq(now)))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }
}
