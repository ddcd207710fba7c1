mod inmemory;
mod postgres;

use avtale_domain::{ReminderKind, ReminderRecord, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Writes the dedup fence for a sent reminder. At most one record can
    /// exist per (booking, kind, elapsed_minutes); a conflicting insert is
    /// an error, which is what serializes concurrent job triggers racing on
    /// the same reminder.
    async fn insert(&self, record: &ReminderRecord) -> anyhow::Result<()>;
    /// Records of `kind` among `booking_ids` with an elapsed-minutes value
    /// at or above `min_elapsed_minutes`. A record at a larger interval
    /// counts as done for every smaller one, so callers pass the threshold
    /// they are about to process. Records of other kinds are never
    /// returned.
    async fn find_sent(
        &self,
        kind: ReminderKind,
        booking_ids: &[ID],
        min_elapsed_minutes: i64,
    ) -> anyhow::Result<Vec<ReminderRecord>>;
    async fn find_by_booking(&self, booking_id: &ID) -> Vec<ReminderRecord>;
}
