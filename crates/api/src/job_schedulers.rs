use crate::{
    booking::send_booking_reminders::SendBookingRemindersUseCase, shared::usecase::execute,
};
use actix_web::rt::time::interval;
use avtale_infra::AvtaleContext;
use std::time::Duration;
use tracing::{error, info};

/// How often the in-process trigger scans for bookings still awaiting
/// confirmation. Overlapping or extra runs are safe since the reminder
/// ledger is the dedup fence, so the cadence only has to be finer than the
/// smallest reminder threshold.
const SEND_BOOKING_REMINDERS_INTERVAL_SECS: u64 = 15 * 60;

pub fn start_booking_reminders_job(ctx: AvtaleContext) {
    actix_web::rt::spawn(async move {
        let mut job_interval = interval(Duration::from_secs(SEND_BOOKING_REMINDERS_INTERVAL_SECS));
        loop {
            job_interval.tick().await;

            let usecase = SendBookingRemindersUseCase;
            match execute(usecase, &ctx).await {
                Ok(report) => info!(
                    "Booking reminders job done. Notifications sent: {}",
                    report.notifications_sent()
                ),
                Err(e) => error!("Booking reminders job failed: {:?}", e),
            }
        }
    });
}
