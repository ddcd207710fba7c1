use crate::error::AvtaleError;
use crate::shared::{
    auth::protect_cron_route,
    usecase::{execute, UseCase},
};
use actix_web::{http::Method, web, HttpRequest, HttpResponse};
use avtale_api_structs::send_booking_reminders::{APIResponse, QueryParams};
use avtale_domain::{Booking, BookingReminderEvent, ReminderKind, ReminderRecord, Translator};
use avtale_infra::{AvtaleContext, DEFAULT_LOCALE};
use futures::future::join_all;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Elapsed-minute thresholds at which the organizer of a booking that is
/// still awaiting confirmation gets reminded: 48 hours, 24 hours and 3
/// hours after the booking was requested.
pub const BOOKING_REMINDER_INTERVALS_IN_MINUTES: [i64; 3] = [2880, 1440, 180];

const REMINDER_KIND: ReminderKind = ReminderKind::PendingBookingConfirmation;

pub async fn send_booking_reminders_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AvtaleContext>,
) -> Result<HttpResponse, AvtaleError> {
    protect_cron_route(&http_req, &query_params, &ctx)?;
    if http_req.method() != Method::POST {
        return Err(AvtaleError::InvalidMethod);
    }

    let usecase = SendBookingRemindersUseCase;
    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report.notifications_sent())))
        .map_err(AvtaleError::from)
}

/// Scans bookings awaiting organizer confirmation and sends an escalating
/// reminder for every (booking, threshold) pair that has not been notified
/// before. The reminder ledger is both audit trail and dedup fence, which
/// makes the usecase safe to trigger repeatedly and concurrently with
/// itself.
#[derive(Debug)]
pub struct SendBookingRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for AvtaleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Why a booking was passed over without a notification attempt
#[derive(Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingOrganizerName,
    MissingOrganizerTimezone,
}

/// What happened to one candidate booking within a threshold pass
#[derive(Debug)]
pub enum BookingOutcome {
    Sent,
    Skipped(SkipReason),
    Failed(anyhow::Error),
}

#[derive(Debug)]
pub struct BookingDispatch {
    pub booking_uid: String,
    pub outcome: BookingOutcome,
}

#[derive(Debug)]
pub struct IntervalReport {
    pub elapsed_minutes: i64,
    pub dispatches: Vec<BookingDispatch>,
}

impl IntervalReport {
    pub fn notifications_sent(&self) -> usize {
        self.dispatches
            .iter()
            .filter(|dispatch| matches!(dispatch.outcome, BookingOutcome::Sent))
            .count()
    }
}

/// Tagged per-booking outcomes of a full run, one report per threshold.
/// The aggregate count returned to the trigger is derived from this instead
/// of a counter threaded through the loops.
#[derive(Debug)]
pub struct DispatchReport {
    pub intervals: Vec<IntervalReport>,
}

impl DispatchReport {
    pub fn notifications_sent(&self) -> usize {
        self.intervals
            .iter()
            .map(IntervalReport::notifications_sent)
            .sum()
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendBookingRemindersUseCase {
    type Response = DispatchReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendBookingReminders";

    async fn execute(&mut self, ctx: &AvtaleContext) -> Result<Self::Response, Self::Error> {
        let mut intervals = Vec::with_capacity(BOOKING_REMINDER_INTERVALS_IN_MINUTES.len());
        for elapsed_minutes in BOOKING_REMINDER_INTERVALS_IN_MINUTES {
            intervals.push(process_interval(elapsed_minutes, ctx).await?);
        }
        Ok(DispatchReport { intervals })
    }
}

/// One independent threshold pass: fetch the pending bookings that are old
/// enough, subtract those already reminded at this interval or a larger
/// one, and dispatch the rest. A failure of either bulk query aborts the
/// whole run; everything past that point is contained per booking.
async fn process_interval(
    elapsed_minutes: i64,
    ctx: &AvtaleContext,
) -> Result<IntervalReport, UseCaseError> {
    let cutoff = ctx.sys.get_utc_now() - chrono::Duration::minutes(elapsed_minutes);
    let bookings = ctx
        .repos
        .bookings
        .find_pending_older_than(cutoff)
        .await
        .map_err(|_| UseCaseError::StorageError)?;
    if bookings.is_empty() {
        return Ok(IntervalReport {
            elapsed_minutes,
            dispatches: Vec::new(),
        });
    }

    let booking_ids = bookings
        .iter()
        .map(|booking| booking.id.clone())
        .collect::<Vec<_>>();
    let reminded = ctx
        .repos
        .reminders
        .find_sent(REMINDER_KIND, &booking_ids, elapsed_minutes)
        .await
        .map_err(|_| UseCaseError::StorageError)?
        .into_iter()
        .map(|record| record.booking_id)
        .collect::<HashSet<_>>();

    let mut dispatches = Vec::new();
    for booking in bookings {
        if reminded.contains(&booking.id) {
            continue;
        }

        let outcome = dispatch_booking(&booking, elapsed_minutes, ctx).await;
        match &outcome {
            BookingOutcome::Sent => info!(
                "Reminded organizer of booking: {} at interval: {} minutes",
                booking.uid, elapsed_minutes
            ),
            BookingOutcome::Skipped(reason) => warn!(
                "Skipped reminder for booking: {} : {:?}",
                booking.uid, reason
            ),
            BookingOutcome::Failed(e) => error!(
                "Failed to remind organizer of booking: {} : {:?}",
                booking.uid, e
            ),
        }
        dispatches.push(BookingDispatch {
            booking_uid: booking.uid.clone(),
            outcome,
        });
    }

    Ok(IntervalReport {
        elapsed_minutes,
        dispatches,
    })
}

/// Sends one reminder: validate the organizer projection, resolve
/// translators, compose the payload, deliver it and write the ledger
/// fence. The fence is only written after a successful send, so every
/// failure before the insert is retried on the next pass.
async fn dispatch_booking(
    booking: &Booking,
    elapsed_minutes: i64,
    ctx: &AvtaleContext,
) -> BookingOutcome {
    let organizer_name = match booking.organizer.display_name() {
        Some(name) => name,
        None => return BookingOutcome::Skipped(SkipReason::MissingOrganizerName),
    };
    let organizer_timezone = match booking.organizer.timezone {
        Some(timezone) => timezone,
        None => return BookingOutcome::Skipped(SkipReason::MissingOrganizerTimezone),
    };

    let organizer_translator = resolve_translator(booking.organizer.locale.as_deref(), ctx).await;
    // Attendee translators resolve concurrently; join_all keeps the results
    // in attendee order no matter which resolution finishes first
    let attendee_translators = join_all(
        booking
            .attendees
            .iter()
            .map(|attendee| resolve_translator(attendee.locale.as_deref(), ctx)),
    )
    .await;

    let event = BookingReminderEvent::compose(
        booking,
        organizer_name,
        organizer_timezone,
        organizer_translator,
        attendee_translators,
    );

    if let Err(e) = ctx.services.mailer.send_confirmation_reminder(&event).await {
        return BookingOutcome::Failed(e.context("Notification send failed"));
    }

    let record = ReminderRecord::new(
        booking.id.clone(),
        REMINDER_KIND,
        elapsed_minutes,
        ctx.sys.get_utc_now(),
    );
    if let Err(e) = ctx.repos.reminders.insert(&record).await {
        // The notification is already out; without the fence the next pass
        // may send a duplicate
        return BookingOutcome::Failed(
            e.context("Reminder record write failed after a successful send"),
        );
    }

    BookingOutcome::Sent
}

async fn resolve_translator(locale: Option<&str>, ctx: &AvtaleContext) -> Translator {
    ctx.services
        .translations
        .resolve(locale.unwrap_or(DEFAULT_LOCALE))
        .await
}
