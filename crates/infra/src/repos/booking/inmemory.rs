use super::IBookingRepo;
use crate::repos::shared::inmemory_repo::*;
use avtale_domain::{Booking, BookingStatus, ID};
use chrono::{DateTime, Utc};

pub struct InMemoryBookingRepo {
    bookings: std::sync::Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepo {
    pub fn new() -> Self {
        Self {
            bookings: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for InMemoryBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        insert(booking, &self.bookings);
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        find(booking_id, &self.bookings)
    }

    async fn find_pending_older_than(&self, cutoff: DateTime<Utc>) -> anyhow::Result<Vec<Booking>> {
        Ok(find_by(&self.bookings, |booking| {
            booking.status == BookingStatus::Pending && booking.created <= cutoff
        }))
    }

    async fn update_status(&self, booking_id: &ID, status: BookingStatus) -> anyhow::Result<()> {
        update_many(
            &self.bookings,
            |booking| booking.id == *booking_id,
            |booking| booking.status = status,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avtale_domain::Organizer;
    use chrono::{Duration, TimeZone};

    fn organizer() -> Organizer {
        Organizer {
            email: "jane@example.org".into(),
            name: Some("Jane".into()),
            username: None,
            timezone: Some(chrono_tz::UTC),
            locale: None,
            destination_calendar: None,
        }
    }

    fn booking_created_at(created: DateTime<Utc>) -> Booking {
        Booking::new(
            "30 min intro",
            organizer(),
            created,
            created + Duration::days(7),
            created + Duration::days(7) + Duration::minutes(30),
        )
    }

    #[tokio::test]
    async fn finds_pending_bookings_up_to_the_cutoff() {
        let repo = InMemoryBookingRepo::new();
        let cutoff = Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap();

        let old = booking_created_at(cutoff - Duration::hours(2));
        let at_cutoff = booking_created_at(cutoff);
        let fresh = booking_created_at(cutoff + Duration::minutes(1));
        for booking in [&old, &at_cutoff, &fresh] {
            repo.insert(booking).await.unwrap();
        }

        let found = repo.find_pending_older_than(cutoff).await.unwrap();
        let found_ids = found.iter().map(|b| b.id.clone()).collect::<Vec<_>>();
        assert_eq!(found_ids, vec![old.id, at_cutoff.id]);
    }

    #[tokio::test]
    async fn excludes_bookings_that_left_the_pending_state() {
        let repo = InMemoryBookingRepo::new();
        let cutoff = Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap();

        let booking = booking_created_at(cutoff - Duration::hours(2));
        repo.insert(&booking).await.unwrap();
        repo.update_status(&booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();

        assert!(repo.find_pending_older_than(cutoff).await.unwrap().is_empty());
        let stored = repo.find(&booking.id).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
    }
}
