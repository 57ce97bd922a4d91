//! Resource assignment engine
//!
//! Maintains the live view of trips in progress, the driver roster, and the
//! queue of trips awaiting assignment, and performs the assignment operation
//! binding a driver and vehicle to a pending trip.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::{
    error::AppResult,
    models::{
        driver::{DriverOverview, DriverWithTrip},
        enums::{DriverStatus, TripPriority, VehicleStatus},
        notification::NewNotification,
        schedule::{DriverScheduleEntry, UpsertDriverSchedule},
        stats::{OperationsOverview, OperationsStats},
        trip::{ActiveTrip, PendingTrip, Trip, UpdateTripStatus},
        user::Role,
        vehicle::Vehicle,
    },
    repository::Repository,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Staff roles notified of every assignment, in addition to the driver
const ASSIGNMENT_WATCHERS: [Role; 3] = [Role::Admin, Role::AdminHelper, Role::OperationsCoordinator];

/// Days until a driver's current trip ends, floored at zero. Both dates are
/// already midnight-normalized, so a trip ending today yields 0 regardless
/// of time of day.
pub(crate) fn days_until_available(end_date: NaiveDate, today: NaiveDate) -> i64 {
    (end_date - today).num_days().max(0)
}

/// Whole days until departure, rounded up from wall-clock now. Unlike the
/// driver-availability computation this does not normalize to midnight; the
/// two views intentionally disagree near day boundaries and callers depend
/// on the current behavior of each.
pub(crate) fn days_until_start(start_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let start = start_date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
    let secs = (start - now).num_seconds();
    (secs + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}

/// Assignment priority from days until departure
pub(crate) fn priority_for(days_until_start: i64) -> TripPriority {
    if days_until_start <= 1 {
        TripPriority::Urgent
    } else if days_until_start <= 3 {
        TripPriority::High
    } else if days_until_start <= 7 {
        TripPriority::Medium
    } else {
        TripPriority::Low
    }
}

/// Derive dashboard counts from a fetched snapshot
pub(crate) fn derive_stats(
    active_trips: &[ActiveTrip],
    drivers: &[DriverOverview],
    pending_trips: &[PendingTrip],
    vehicles: &[Vehicle],
) -> OperationsStats {
    OperationsStats {
        active_trips: active_trips.len() as i64,
        available_drivers: drivers
            .iter()
            .filter(|d| d.status == DriverStatus::Available)
            .count() as i64,
        operational_vehicles: vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Available)
            .count() as i64,
        pending_assignments: pending_trips.len() as i64,
        total_vehicles: vehicles.len() as i64,
    }
}

fn overview_entry(row: DriverWithTrip, today: NaiveDate) -> DriverOverview {
    let status = if row.current_trip.is_some() {
        DriverStatus::OnTrip
    } else {
        DriverStatus::Available
    };
    let days = row
        .current_trip
        .as_ref()
        .map(|t| days_until_available(t.end_date, today))
        .unwrap_or(0);

    DriverOverview {
        id: row.driver.id,
        user_id: row.driver.user_id,
        name: row.name,
        rating: row.driver.rating,
        experience: row.driver.experience,
        languages: row.driver.languages,
        specialties: row.driver.specialties,
        total_trips: row.driver.total_trips,
        average_rating: row.driver.average_rating,
        on_time_percentage: row.driver.on_time_percentage,
        status,
        current_trip_id: row.current_trip.as_ref().map(|t| t.id),
        vehicle_plate: row.vehicle_plate,
        current_trip: row.current_trip,
        days_until_available: days,
    }
}

#[derive(Clone)]
pub struct AssignmentService {
    repository: Repository,
}

impl AssignmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// In-progress trips enriched with driver name and vehicle plate
    pub async fn list_active_trips(&self) -> AppResult<Vec<ActiveTrip>> {
        self.repository.trips.list_active().await
    }

    /// Full driver roster with derived availability
    pub async fn list_drivers(&self) -> AppResult<Vec<DriverOverview>> {
        let rows = self.repository.drivers.list_with_current_trip().await?;
        let today = Utc::now().date_naive();
        Ok(rows.into_iter().map(|r| overview_entry(r, today)).collect())
    }

    /// Trips awaiting assignment, annotated with derived priority
    pub async fn list_pending_trips(&self) -> AppResult<Vec<PendingTrip>> {
        let trips = self.repository.trips.list_pending().await?;
        let now = Utc::now();
        Ok(trips
            .into_iter()
            .map(|t| {
                let days = days_until_start(t.start_date, now);
                PendingTrip {
                    id: t.id,
                    customer_name: t.customer_name,
                    package_name: t.package_name,
                    start_date: t.start_date,
                    end_date: t.end_date,
                    guests: t.guests,
                    booking_id: t.booking_id,
                    notes: t.notes,
                    days_until_start: days,
                    priority: priority_for(days),
                }
            })
            .collect())
    }

    /// All trips (back-office table view)
    pub async fn list_trips(&self) -> AppResult<Vec<Trip>> {
        self.repository.trips.list().await
    }

    pub async fn get_trip(&self, trip_id: i32) -> AppResult<Trip> {
        self.repository.trips.get_by_id(trip_id).await
    }

    /// Bind a driver and vehicle to a trip, transition it to in_progress,
    /// and return the refreshed operations snapshot.
    ///
    /// The trip and vehicle writes are transactional and fatal on failure.
    /// The booking mirror and notification fan-out are best-effort: their
    /// failures are logged and swallowed. The engine does not check the
    /// driver's own availability; callers are expected to pick from the
    /// filtered roster.
    pub async fn assign_trip_resources(
        &self,
        trip_id: i32,
        driver_id: i32,
        vehicle_id: i32,
    ) -> AppResult<OperationsOverview> {
        let driver_user_id = self.repository.drivers.get_user_id(driver_id).await?;

        let trip = self
            .repository
            .trips
            .assign_resources(trip_id, driver_id, vehicle_id)
            .await?;

        tracing::info!(
            trip_id,
            driver_id,
            vehicle_id,
            "assigned driver and vehicle to trip"
        );

        self.mirror_booking(&trip, driver_user_id, vehicle_id).await;
        self.notify_assignment(&trip, driver_id, driver_user_id, vehicle_id)
            .await;

        self.operations_overview().await
    }

    /// Mirror the assignment onto the owning booking. Best-effort.
    async fn mirror_booking(&self, trip: &Trip, driver_user_id: Option<i32>, vehicle_id: i32) {
        let (Some(booking_id), Some(user_id)) = (trip.booking_id, driver_user_id) else {
            return;
        };
        if let Err(e) = self
            .repository
            .bookings
            .mirror_assignment(booking_id, user_id, vehicle_id)
            .await
        {
            tracing::warn!(
                trip_id = trip.id,
                booking_id,
                "failed to mirror assignment onto booking: {}",
                e
            );
        }
    }

    /// Announce the assignment to coordinators and the driver. Best-effort.
    async fn notify_assignment(
        &self,
        trip: &Trip,
        driver_id: i32,
        driver_user_id: Option<i32>,
        vehicle_id: i32,
    ) {
        let metadata = json!({
            "trip_id": trip.id,
            "driver_id": driver_id,
            "vehicle_id": vehicle_id,
        });

        let watcher_ids = match self.repository.users.ids_with_roles(&ASSIGNMENT_WATCHERS).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(trip_id = trip.id, "failed to resolve assignment watchers: {}", e);
                Vec::new()
            }
        };

        for user_id in watcher_ids {
            let notification = NewNotification {
                target_user_id: user_id,
                title: "Trip resources assigned".to_string(),
                message: format!(
                    "{} ({}) now has a driver and vehicle assigned",
                    trip.customer_name, trip.package_name
                ),
                notification_type: "operations".to_string(),
                event: "trip_assigned".to_string(),
                metadata: Some(metadata.clone()),
            };
            if let Err(e) = self.repository.notifications.insert(&notification).await {
                tracing::warn!(trip_id = trip.id, user_id, "failed to insert notification: {}", e);
            }
        }

        if let Some(user_id) = driver_user_id {
            let notification = NewNotification {
                target_user_id: user_id,
                title: "New trip assigned to you".to_string(),
                message: format!(
                    "You are driving {} ({}) starting {}",
                    trip.customer_name, trip.package_name, trip.start_date
                ),
                notification_type: "operations".to_string(),
                event: "trip_assigned".to_string(),
                metadata: Some(metadata),
            };
            if let Err(e) = self.repository.notifications.insert(&notification).await {
                tracing::warn!(trip_id = trip.id, user_id, "failed to notify driver: {}", e);
            }
        }
    }

    /// Partial trip status update, returning the refreshed snapshot
    pub async fn update_trip_status(
        &self,
        trip_id: i32,
        data: &UpdateTripStatus,
    ) -> AppResult<OperationsOverview> {
        self.repository.trips.update_status(trip_id, data).await?;
        self.operations_overview().await
    }

    /// Upsert a driver's weekly-schedule entry, returning the entry
    pub async fn update_driver_schedule(
        &self,
        driver_id: i32,
        data: &UpsertDriverSchedule,
    ) -> AppResult<DriverScheduleEntry> {
        // Verify the driver exists so a typo'd id fails loudly
        self.repository.drivers.get_by_id(driver_id).await?;
        self.repository.schedules.upsert_entry(driver_id, data).await
    }

    pub async fn list_driver_schedule(&self, driver_id: i32) -> AppResult<Vec<DriverScheduleEntry>> {
        self.repository.schedules.list_for_driver(driver_id).await
    }

    /// Fleet views (vehicle listing and maintenance flagging)
    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.vehicles.list().await
    }

    pub async fn set_vehicle_status(
        &self,
        vehicle_id: i32,
        status: VehicleStatus,
    ) -> AppResult<Vehicle> {
        self.repository.vehicles.update_status(vehicle_id, status).await
    }

    /// Consistent snapshot of the whole dashboard state. The four list
    /// queries are independent and fetched concurrently.
    pub async fn operations_overview(&self) -> AppResult<OperationsOverview> {
        let (active_trips, drivers, pending_trips, vehicles) = tokio::try_join!(
            self.list_active_trips(),
            self.list_drivers(),
            self.list_pending_trips(),
            self.list_vehicles(),
        )?;

        let stats = derive_stats(&active_trips, &drivers, &pending_trips, &vehicles);

        Ok(OperationsOverview {
            active_trips,
            drivers,
            pending_trips,
            vehicles,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_until_available_is_never_negative() {
        let today = date(2025, 6, 15);
        assert_eq!(days_until_available(date(2025, 6, 10), today), 0);
        assert_eq!(days_until_available(date(2025, 6, 15), today), 0);
        assert_eq!(days_until_available(date(2025, 6, 16), today), 1);
        assert_eq!(days_until_available(date(2025, 6, 22), today), 7);
    }

    #[test]
    fn trip_ending_today_yields_zero_regardless_of_time() {
        // Date subtraction is midnight-to-midnight, so the wall clock never
        // enters into it.
        let today = date(2025, 6, 15);
        assert_eq!(days_until_available(today, today), 0);
    }

    #[test]
    fn priority_boundaries() {
        assert_eq!(priority_for(0), TripPriority::Urgent);
        assert_eq!(priority_for(1), TripPriority::Urgent);
        assert_eq!(priority_for(2), TripPriority::High);
        assert_eq!(priority_for(3), TripPriority::High);
        assert_eq!(priority_for(4), TripPriority::Medium);
        assert_eq!(priority_for(7), TripPriority::Medium);
        assert_eq!(priority_for(8), TripPriority::Low);
        assert_eq!(priority_for(30), TripPriority::Low);
    }

    #[test]
    fn priority_for_past_departures_is_urgent() {
        assert_eq!(priority_for(-2), TripPriority::Urgent);
    }

    #[test]
    fn days_until_start_rounds_up_from_wall_clock() {
        // 18:00 the day before departure: 6 hours remain, rounds up to 1
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 18, 0, 0).unwrap();
        assert_eq!(days_until_start(date(2025, 6, 15), now), 1);

        // Exactly at departure midnight
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(days_until_start(date(2025, 6, 15), now), 0);

        // One second into departure day: already negative fraction, ceil is 0
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 1).unwrap();
        assert_eq!(days_until_start(date(2025, 6, 15), now), 0);

        // A week and a bit out
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();
        assert_eq!(days_until_start(date(2025, 6, 22), now), 8);
    }

    #[test]
    fn pending_and_driver_views_disagree_near_midnight() {
        // Departure tomorrow: the midnight-normalized view says 1 day, and
        // so does the wall-clock view late in the evening; but mid-morning
        // the wall-clock view still says 1 while a naive floor would say 0.
        // This pins the rounding direction.
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 9, 30, 0).unwrap();
        assert_eq!(days_until_start(date(2025, 6, 15), now), 1);
        assert_eq!(days_until_available(date(2025, 6, 15), now.date_naive()), 1);
    }

    fn vehicle(id: i32, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id,
            plate: format!("KDB {:03}A", id),
            model: "Land Cruiser".to_string(),
            status,
        }
    }

    fn driver_entry(id: i32, current_trip: Option<TripSummary>) -> DriverOverview {
        overview_entry(
            DriverWithTrip {
                driver: crate::models::driver::Driver {
                    id,
                    user_id: id + 100,
                    rating: 4.5,
                    experience: 6,
                    languages: vec!["en".to_string(), "sw".to_string()],
                    specialties: vec!["big five".to_string()],
                    total_trips: 42,
                    average_rating: 4.6,
                    on_time_percentage: 97.0,
                    next_available: None,
                },
                name: Some(format!("Driver {}", id)),
                current_trip,
                vehicle_plate: None,
            },
            date(2025, 6, 15),
        )
    }

    use crate::models::trip::TripSummary;

    fn summary(id: i32, end: NaiveDate) -> TripSummary {
        TripSummary {
            id,
            customer_name: "Okoye family".to_string(),
            package_name: "Mara Classic".to_string(),
            start_date: date(2025, 6, 10),
            end_date: end,
        }
    }

    #[test]
    fn driver_with_in_progress_trip_is_on_trip() {
        let entry = driver_entry(1, Some(summary(7, date(2025, 6, 18))));
        assert_eq!(entry.status, DriverStatus::OnTrip);
        assert_eq!(entry.current_trip_id, Some(7));
        assert_eq!(entry.days_until_available, 3);
    }

    #[test]
    fn idle_driver_is_available_now() {
        let entry = driver_entry(2, None);
        assert_eq!(entry.status, DriverStatus::Available);
        assert_eq!(entry.current_trip_id, None);
        assert_eq!(entry.days_until_available, 0);
    }

    #[test]
    fn derive_stats_counts_each_bucket() {
        let drivers = vec![
            driver_entry(1, Some(summary(7, date(2025, 6, 18)))),
            driver_entry(2, None),
            driver_entry(3, None),
        ];
        let vehicles = vec![
            vehicle(1, VehicleStatus::Available),
            vehicle(2, VehicleStatus::OnTrip),
            vehicle(3, VehicleStatus::Maintenance),
            vehicle(4, VehicleStatus::Available),
        ];
        let pending = vec![PendingTrip {
            id: 9,
            customer_name: "Smith".to_string(),
            package_name: "Amboseli Short".to_string(),
            start_date: date(2025, 6, 17),
            end_date: date(2025, 6, 20),
            guests: 2,
            booking_id: None,
            notes: None,
            days_until_start: 2,
            priority: TripPriority::High,
        }];
        let active = vec![ActiveTrip {
            id: 7,
            customer_name: "Okoye family".to_string(),
            package_name: "Mara Classic".to_string(),
            start_date: date(2025, 6, 10),
            end_date: date(2025, 6, 18),
            status: crate::models::enums::TripStatus::InProgress,
            progress: 40,
            current_location: "In transit".to_string(),
            next_stop: None,
            estimated_arrival: None,
            guests: 4,
            driver_id: Some(1),
            vehicle_id: Some(2),
            driver_name: Some("Driver 1".to_string()),
            vehicle_plate: Some("KDB 002A".to_string()),
        }];

        let stats = derive_stats(&active, &drivers, &pending, &vehicles);
        assert_eq!(stats.active_trips, 1);
        assert_eq!(stats.available_drivers, 2);
        assert_eq!(stats.operational_vehicles, 2);
        assert_eq!(stats.pending_assignments, 1);
        assert_eq!(stats.total_vehicles, 4);
    }

    #[test]
    fn assignment_moves_counts_by_one() {
        // A pending trip becoming active shifts exactly one unit between
        // the two counters; the other buckets follow the vehicle/driver
        // state changes.
        let before = derive_stats(
            &[],
            &[driver_entry(1, None)],
            &[PendingTrip {
                id: 9,
                customer_name: "Smith".to_string(),
                package_name: "Amboseli Short".to_string(),
                start_date: date(2025, 6, 17),
                end_date: date(2025, 6, 20),
                guests: 2,
                booking_id: None,
                notes: None,
                days_until_start: 2,
                priority: TripPriority::High,
            }],
            &[vehicle(1, VehicleStatus::Available)],
        );
        let after = derive_stats(
            &[ActiveTrip {
                id: 9,
                customer_name: "Smith".to_string(),
                package_name: "Amboseli Short".to_string(),
                start_date: date(2025, 6, 17),
                end_date: date(2025, 6, 20),
                status: crate::models::enums::TripStatus::InProgress,
                progress: 0,
                current_location: "In transit".to_string(),
                next_stop: None,
                estimated_arrival: None,
                guests: 2,
                driver_id: Some(1),
                vehicle_id: Some(1),
                driver_name: Some("Driver 1".to_string()),
                vehicle_plate: Some("KDB 001A".to_string()),
            }],
            &[driver_entry(1, Some(summary(9, date(2025, 6, 20))))],
            &[],
            &[vehicle(1, VehicleStatus::OnTrip)],
        );

        assert_eq!(after.active_trips, before.active_trips + 1);
        assert_eq!(after.pending_assignments, before.pending_assignments - 1);
        assert_eq!(after.available_drivers, before.available_drivers - 1);
        assert_eq!(after.operational_vehicles, before.operational_vehicles - 1);
        assert_eq!(after.total_vehicles, before.total_vehicles);
    }
}
