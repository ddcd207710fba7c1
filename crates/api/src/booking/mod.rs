pub mod send_booking_reminders;

use actix_web::web;
use send_booking_reminders::send_booking_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Every method is routed to the controller so that non-POST triggers
    // get the documented 405 body instead of actix's default guard response
    cfg.route(
        "/booking/reminders",
        web::route().to(send_booking_reminders_controller),
    );
}
