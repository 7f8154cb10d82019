pub mod date;
mod note;
mod reminder;
mod shared;
mod user;

pub use chrono::NaiveDateTime;
pub use chrono_tz::Tz;
pub use note::{Note, TodoItem};
pub use reminder::{Frequency, InvalidFrequencyError, Reminder};
pub use shared::entity::{Entity, ID};
pub use user::User;
