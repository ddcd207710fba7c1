mod booking;
mod booking_reminder_event;
mod reminder;
mod shared;

pub use booking::{
    Attendee, Booking, BookingStatus, CalendarDestination, InvalidBookingStatusError, Organizer,
};
pub use booking_reminder_event::{BookingReminderEvent, EventLanguage, EventPerson};
pub use reminder::{InvalidReminderKindError, ReminderKind, ReminderRecord};
pub use shared::entity::{Entity, ID};
pub use shared::translation::Translator;
