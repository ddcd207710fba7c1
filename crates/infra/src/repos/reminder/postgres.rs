use super::IReminderRepo;

use avtale_domain::{ReminderKind, ReminderRecord, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRecordRaw {
    reminder_uid: Uuid,
    booking_uid: Uuid,
    reminder_kind: String,
    elapsed_minutes: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReminderRecordRaw> for ReminderRecord {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRecordRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.reminder_uid.into(),
            booking_id: raw.booking_uid.into(),
            kind: raw.reminder_kind.parse()?,
            elapsed_minutes: raw.elapsed_minutes,
            created: raw.created_at,
        })
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, record: &ReminderRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_mails
            (reminder_uid, booking_uid, reminder_kind, elapsed_minutes, created_at)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id.inner_ref())
        .bind(record.booking_id.inner_ref())
        .bind(record.kind.as_str())
        .bind(record.elapsed_minutes)
        .bind(record.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_sent(
        &self,
        kind: ReminderKind,
        booking_ids: &[ID],
        min_elapsed_minutes: i64,
    ) -> anyhow::Result<Vec<ReminderRecord>> {
        let booking_uids = booking_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<Uuid>>();
        let rows: Vec<ReminderRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_mails
            WHERE reminder_kind = $1 AND elapsed_minutes >= $2 AND booking_uid = ANY($3)
            "#,
        )
        .bind(kind.as_str())
        .bind(min_elapsed_minutes)
        .bind(booking_uids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReminderRecord::try_from).collect()
    }

    async fn find_by_booking(&self, booking_id: &ID) -> Vec<ReminderRecord> {
        let rows: Vec<ReminderRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_mails
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        rows.into_iter()
            .filter_map(|raw| raw.try_into().ok())
            .collect()
    }
}
