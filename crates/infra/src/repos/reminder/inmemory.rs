use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use avtale_domain::{ReminderKind, ReminderRecord, ID};

pub struct InMemoryReminderRepo {
    records: std::sync::Mutex<Vec<ReminderRecord>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, record: &ReminderRecord) -> anyhow::Result<()> {
        let conflicts = find_by(&self.records, |existing| {
            existing.booking_id == record.booking_id
                && existing.kind == record.kind
                && existing.elapsed_minutes == record.elapsed_minutes
        });
        if !conflicts.is_empty() {
            anyhow::bail!(
                "Reminder record already exists for booking: {} kind: {} elapsed minutes: {}",
                record.booking_id,
                record.kind,
                record.elapsed_minutes
            );
        }
        insert(record, &self.records);
        Ok(())
    }

    async fn find_sent(
        &self,
        kind: ReminderKind,
        booking_ids: &[ID],
        min_elapsed_minutes: i64,
    ) -> anyhow::Result<Vec<ReminderRecord>> {
        Ok(find_by(&self.records, |record| {
            record.kind == kind
                && record.elapsed_minutes >= min_elapsed_minutes
                && booking_ids.contains(&record.booking_id)
        }))
    }

    async fn find_by_booking(&self, booking_id: &ID) -> Vec<ReminderRecord> {
        find_by(&self.records, |record| record.booking_id == *booking_id)
    }
}
