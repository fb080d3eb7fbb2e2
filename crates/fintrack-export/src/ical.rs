//! iCalendar (RFC 5545) text rendering for exported events.

use crate::calendar::CalendarEvent;

const PRODID: &str = "-//fintrack//Financial Events//EN";

/// Renders the events as a VCALENDAR document. Each event occupies a fixed
/// noon-UTC hour so every calendar client shows it on the intended day.
pub fn to_ical(events: &[CalendarEvent]) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    for event in events {
        let stamp = event.date.format("%Y%m%d");
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@fintrack", event.id));
        lines.push(format!("DTSTART:{}T120000Z", stamp));
        lines.push(format!("DTEND:{}T130000Z", stamp));
        lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&event.description)));
        lines.push(format!("CATEGORIES:{}", event.category));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    lines.join("\r\n")
}

/// Escapes the characters RFC 5545 reserves inside TEXT values.
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}
