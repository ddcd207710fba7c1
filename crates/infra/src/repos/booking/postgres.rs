use super::IBookingRepo;

use avtale_domain::{Attendee, Booking, BookingStatus, CalendarDestination, Organizer, ID};
use chrono::{DateTime, Utc};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookingRaw {
    booking_uid: Uuid,
    correlation_uid: String,
    status: String,
    title: String,
    description: Option<String>,
    location: Option<String>,
    custom_inputs: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    organizer: Json<Organizer>,
    attendees: Json<Vec<Attendee>>,
    destination_calendar: Option<Json<CalendarDestination>>,
}

impl TryFrom<BookingRaw> for Booking {
    type Error = anyhow::Error;

    fn try_from(raw: BookingRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.booking_uid.into(),
            uid: raw.correlation_uid,
            status: raw.status.parse()?,
            title: raw.title,
            description: raw.description,
            location: raw.location,
            custom_inputs: raw.custom_inputs,
            created: raw.created_at,
            start_time: raw.start_time,
            end_time: raw.end_time,
            organizer: raw.organizer.0,
            attendees: raw.attendees.0,
            destination_calendar: raw.destination_calendar.map(|destination| destination.0),
        })
    }
}

#[async_trait::async_trait]
impl IBookingRepo for PostgresBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings
            (booking_uid, correlation_uid, status, title, description, location, custom_inputs,
             created_at, start_time, end_time, organizer, attendees, destination_calendar)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(&booking.uid)
        .bind(booking.status.as_str())
        .bind(&booking.title)
        .bind(&booking.description)
        .bind(&booking.location)
        .bind(&booking.custom_inputs)
        .bind(booking.created)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(Json(&booking.organizer))
        .bind(Json(&booking.attendees))
        .bind(booking.destination_calendar.as_ref().map(Json))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        let raw: Option<BookingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM bookings
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten();

        raw.and_then(|raw| raw.try_into().ok())
    }

    async fn find_pending_older_than(&self, cutoff: DateTime<Utc>) -> anyhow::Result<Vec<Booking>> {
        let rows: Vec<BookingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM bookings
            WHERE status = $1 AND created_at <= $2
            "#,
        )
        .bind(BookingStatus::Pending.as_str())
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn update_status(&self, booking_id: &ID, status: BookingStatus) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
