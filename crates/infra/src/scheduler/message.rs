use mynote_domain::{date::format_civil_datetime, NaiveDateTime, Note};
use std::fmt::Write;

pub const REMINDER_SUBJECT: &str = "Reminder Notification";

/// Plain text body of the notification sent for `note` at `occurrence`
pub fn compose_reminder_body(note: &Note, occurrence: &NaiveDateTime) -> String {
    let mut body = String::from("Reminder\n\n");
    let _ = writeln!(body, "Title: {}", note.title);
    if !note.content.is_empty() {
        let _ = writeln!(body, "Content: {}", note.content);
    }
    if !note.todo_items.is_empty() {
        body.push_str("Todo Items:\n");
        for item in &note.todo_items {
            let status = if item.is_done { "Done" } else { "Not Done" };
            let _ = writeln!(body, "- {} [{}]", item.content, status);
        }
    }
    let _ = writeln!(body, "\nReminder Time: {}", format_civil_datetime(occurrence));
    body
}
