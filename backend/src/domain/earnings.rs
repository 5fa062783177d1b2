//! Driver earnings over calendar periods.

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeZone, Utc};

use super::Booking;

/// Earnings totals for one driver, in the booking currency.
///
/// Periods are evaluated in UTC; weeks start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EarningsSummary {
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub total: f64,
    pub total_rides: usize,
}

/// Start instants of the day, week and month containing `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodStarts {
    pub day: DateTime<Utc>,
    pub week: DateTime<Utc>,
    pub month: DateTime<Utc>,
}

impl PeriodStarts {
    pub fn containing(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let midnight = |date: chrono::NaiveDate| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let days_since_sunday = u64::from(today.weekday().num_days_from_sunday());
        let week = today
            .checked_sub_days(Days::new(days_since_sunday))
            .unwrap_or(today);
        let month = today.with_day(1).unwrap_or(today);
        Self {
            day: midnight(today),
            week: midnight(week),
            month: midnight(month),
        }
    }
}

impl EarningsSummary {
    /// Sum ride prices into period buckets by creation time.
    ///
    /// Callers pass only rides that count towards earnings (the driver's
    /// confirmed and completed rides).
    pub fn from_rides<'a>(rides: impl IntoIterator<Item = &'a Booking>, now: DateTime<Utc>) -> Self {
        let starts = PeriodStarts::containing(now);
        rides
            .into_iter()
            .fold(Self::default(), |mut summary, ride| {
                let price = ride.details().price();
                let created = ride.created_at();
                summary.total += price;
                summary.total_rides += 1;
                if created >= starts.day {
                    summary.today += price;
                }
                if created >= starts.week {
                    summary.this_week += price;
                }
                if created >= starts.month {
                    summary.this_month += price;
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingId, RideDetails, UserId};
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn ride(price: f64, created_at: DateTime<Utc>) -> Booking {
        let details = RideDetails::from_stored(
            "A".into(),
            "B".into(),
            created_at,
            Some(price),
            Some("taxi".into()),
            Some("WagonR Taxi".into()),
            Some(1),
        );
        Booking::new_pending(BookingId::random(), UserId::random(), details, created_at)
    }

    #[rstest]
    fn week_starts_on_sunday() {
        // 2026-03-04 is a Wednesday.
        let starts = PeriodStarts::containing(at(2026, 3, 4, 15));
        assert_eq!(starts.day, at(2026, 3, 4, 0));
        assert_eq!(starts.week, at(2026, 3, 1, 0));
        assert_eq!(starts.month, at(2026, 3, 1, 0));
    }

    #[rstest]
    fn sums_rides_into_periods() {
        let now = at(2026, 3, 18, 12);
        let rides = [
            ride(100.0, at(2026, 3, 18, 8)),
            ride(200.0, at(2026, 3, 16, 8)),
            ride(400.0, at(2026, 3, 2, 8)),
            ride(800.0, at(2026, 2, 27, 8)),
        ];

        let summary = EarningsSummary::from_rides(&rides, now);

        assert_eq!(summary.today, 100.0);
        assert_eq!(summary.this_week, 300.0);
        assert_eq!(summary.this_month, 700.0);
        assert_eq!(summary.total, 1500.0);
        assert_eq!(summary.total_rides, 4);
    }

    #[rstest]
    fn no_rides_yields_zeroes() {
        let summary = EarningsSummary::from_rides(&[], at(2026, 1, 1, 0));
        assert_eq!(summary, EarningsSummary::default());
    }
}
