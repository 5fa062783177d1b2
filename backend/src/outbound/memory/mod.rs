//! In-process store used when no database is configured.
//!
//! One mutex guards users and bookings together, so every guarded booking
//! transition is a compare-and-swap: the predicate is checked and the update
//! written under the same lock acquisition.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, StoredCredentials, UserPersistenceError,
    UserRepository, VehicleRepository, VehicleRepositoryError,
};
use crate::domain::{
    Booking, BookingStatus, BookingTransition, Email, PassengerContact, PasswordDigest, Phone,
    RideListing, User, UserId, Vehicle, VehicleType,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, (User, PasswordDigest)>,
    bookings: Vec<Booking>,
}

impl State {
    fn contact(&self, passenger: &UserId) -> Option<PassengerContact> {
        self.users.get(passenger).map(|(user, _)| PassengerContact {
            name: user.name.as_ref().to_owned(),
            email: user.email.as_ref().to_owned(),
            phone: user.phone.as_ref().to_owned(),
        })
    }

    /// Bookings matching `keep`, newest first.
    fn newest_first(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let mut found: Vec<Booking> = self
            .bookings
            .iter()
            .rev()
            .filter(|booking| keep(booking))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        found
    }

    fn listings(&self, keep: impl Fn(&Booking) -> bool) -> Vec<RideListing> {
        self.newest_first(keep)
            .into_iter()
            .map(|booking| RideListing {
                passenger: self.contact(booking.passenger()),
                booking,
            })
            .collect()
    }
}

/// Thread-safe in-memory implementation of the user, booking and vehicle
/// ports.
pub struct InMemoryStore {
    state: Mutex<State>,
    vehicles: Vec<Vehicle>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_vehicles(seed_catalogue())
    }
}

impl InMemoryStore {
    /// An empty store with the standard vehicle catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            vehicles,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

fn features(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_owned()).collect()
}

/// The catalogue seeded by the vehicles migration, ordered by name.
pub fn seed_catalogue() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: Uuid::from_u128(0x0b6f1c7e_3f52_4c1e_9a43_5c2d8f1e0a02),
            name: "Bumpa Bus".to_owned(),
            vehicle_type: VehicleType::Bus,
            image: "https://images.unsplash.com/photo-1544620347-c4fd4a3d5957?auto=format&fit=crop&w=1000&q=80".to_owned(),
            capacity: "12 passengers".to_owned(),
            base_price: 150.0,
            price_per_km: 8.0,
            features: features(&["AC", "WiFi", "Shared ride"]),
            estimated_time: "1h 30m".to_owned(),
            available: 2,
        },
        Vehicle {
            id: Uuid::from_u128(0x0b6f1c7e_3f52_4c1e_9a43_5c2d8f1e0a03),
            name: "Luxury Taxi".to_owned(),
            vehicle_type: VehicleType::Taxi,
            image: "https://images.unsplash.com/photo-1555215695-3004980ad54e?auto=format&fit=crop&w=1000&q=80".to_owned(),
            capacity: "4 passengers".to_owned(),
            base_price: 100.0,
            price_per_km: 15.0,
            features: features(&["Premium AC", "Professional driver", "Leather seats"]),
            estimated_time: "1h 15m".to_owned(),
            available: 3,
        },
        Vehicle {
            id: Uuid::from_u128(0x0b6f1c7e_3f52_4c1e_9a43_5c2d8f1e0a01),
            name: "WagonR Taxi".to_owned(),
            vehicle_type: VehicleType::Taxi,
            image: "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?auto=format&fit=crop&w=1000&q=80".to_owned(),
            capacity: "3 passengers".to_owned(),
            base_price: 50.0,
            price_per_km: 10.0,
            features: features(&["AC", "Local driver", "Comfortable seats"]),
            estimated_time: "1h 15m".to_owned(),
            available: 5,
        },
    ]
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut state = self.lock();
        if state.bookings.iter().any(|existing| existing.id() == booking.id()) {
            return Err(BookingRepositoryError::query(format!(
                "booking {} already exists",
                booking.id()
            )));
        }
        state.bookings.push(booking.clone());
        Ok(())
    }

    async fn transition(
        &self,
        transition: &BookingTransition,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut state = self.lock();
        let Some(slot) = state
            .bookings
            .iter_mut()
            .find(|booking| booking.id() == transition.booking_id())
        else {
            return Ok(None);
        };
        let updated = transition.apply(slot);
        if let Some(next) = &updated {
            *slot = next.clone();
        }
        Ok(updated)
    }

    async fn list_for_passenger(
        &self,
        passenger: &UserId,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(self
            .lock()
            .newest_first(|booking| booking.passenger() == passenger))
    }

    async fn list_claimable(&self) -> Result<Vec<RideListing>, BookingRepositoryError> {
        Ok(self.lock().listings(Booking::is_claimable))
    }

    async fn list_for_driver(
        &self,
        driver: &UserId,
        statuses: &[BookingStatus],
    ) -> Result<Vec<RideListing>, BookingRepositoryError> {
        Ok(self.lock().listings(|booking| {
            booking.driver() == Some(driver) && statuses.contains(&booking.status())
        }))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(
        &self,
        user: &User,
        password: &PasswordDigest,
    ) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        if state
            .users
            .values()
            .any(|(existing, _)| existing.email == user.email)
        {
            return Err(UserPersistenceError::duplicate("users_email_key"));
        }
        state
            .users
            .insert(user.id.clone(), (user.clone(), password.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.get(id).map(|(user, _)| user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|(user, _)| &user.email == email)
            .map(|(user, password)| StoredCredentials {
                user: user.clone(),
                password: password.clone(),
            }))
    }

    async fn contact_in_use(
        &self,
        email: &Email,
        phone: &Phone,
    ) -> Result<bool, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .any(|(user, _)| &user.email == email || &user.phone == phone))
    }

    async fn update_profile(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock();
        let Some((stored, _)) = state.users.get_mut(&user.id) else {
            return Ok(None);
        };
        stored.name = user.name.clone();
        stored.phone = user.phone.clone();
        if stored.profile.driver().is_some() && user.profile.driver().is_some() {
            stored.profile = user.profile.clone();
        }
        Ok(Some(stored.clone()))
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn list(
        &self,
        vehicle_type: Option<VehicleType>,
    ) -> Result<Vec<Vehicle>, VehicleRepositoryError> {
        Ok(self
            .vehicles
            .iter()
            .filter(|vehicle| vehicle.matches(vehicle_type))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests;
