mod inmemory;
mod postgres;

use avtale_domain::{Booking, BookingStatus, ID};
use chrono::{DateTime, Utc};
pub use inmemory::InMemoryBookingRepo;
pub use postgres::PostgresBookingRepo;

#[async_trait::async_trait]
pub trait IBookingRepo: Send + Sync {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn find(&self, booking_id: &ID) -> Option<Booking>;
    /// All bookings that are still awaiting organizer confirmation and were
    /// created at or before `cutoff`, with organizer and attendee
    /// projections attached
    async fn find_pending_older_than(&self, cutoff: DateTime<Utc>) -> anyhow::Result<Vec<Booking>>;
    async fn update_status(&self, booking_id: &ID, status: BookingStatus) -> anyhow::Result<()>;
}
