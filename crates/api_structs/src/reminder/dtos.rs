use mynote_domain::{date::format_civil_datetime, Frequency, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub note_id: ID,
    /// `YYYY-MM-DD HH:MM:SS` in the reminder timezone of the server
    pub reminder_time: String,
    pub recurring: bool,
    pub frequency: Option<Frequency>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            note_id: reminder.note_id,
            reminder_time: format_civil_datetime(&reminder.reminder_time),
            recurring: reminder.recurring,
            frequency: reminder.frequency,
        }
    }
}
