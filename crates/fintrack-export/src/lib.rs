//! fintrack-export
//!
//! Pure projections of ledger data into exchange formats: calendar events,
//! iCalendar text, and CSV. Nothing here feeds back into the store.

pub mod calendar;
pub mod csv;
pub mod ical;

pub use calendar::{collect_events, CalendarEvent, EventCategory};
pub use csv::{read_transactions, write_transactions};
pub use ical::to_ical;
