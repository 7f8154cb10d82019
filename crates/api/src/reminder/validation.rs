use mynote_domain::{
    date::{civil_to_timestamp_millis, parse_civil_datetime},
    Frequency, NaiveDateTime,
};
use mynote_infra::MyNoteContext;

/// Parses a reminder time given in the reminder timezone. The time may
/// not lie before now.
pub fn parse_reminder_time(value: &str, ctx: &MyNoteContext) -> Result<NaiveDateTime, String> {
    let reminder_time = parse_civil_datetime(value).map_err(|_| {
        format!(
            "Invalid reminder time: `{}`, expected the format YYYY-MM-DD HH:MM:SS",
            value
        )
    })?;
    let tz = ctx.config.reminder_timezone;
    let timestamp = civil_to_timestamp_millis(&reminder_time, &tz).ok_or_else(|| {
        format!(
            "The reminder time: `{}` does not exist in the timezone {}",
            value, tz
        )
    })?;
    if timestamp < ctx.sys.get_timestamp_millis() {
        return Err(format!("The reminder time: `{}` is in the past", value));
    }
    Ok(reminder_time)
}

pub fn parse_frequency(value: Option<&str>) -> Result<Option<Frequency>, String> {
    match value {
        Some(frequency) => Frequency::parse_optional(frequency).map_err(|e| e.to_string()),
        None => Ok(None),
    }
}
