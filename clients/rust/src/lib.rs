mod base;
mod note;
mod reminder;
mod status;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use mynote_api_structs::dtos::*;
pub use mynote_domain::{Frequency, ID};
use note::NoteClient;
pub use note::CreateNoteInput;
use reminder::ReminderClient;
pub use reminder::{AddReminderInput, UpdateReminderInput};
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;

// Domain
pub use mynote_api_structs::dtos::NoteDTO as Note;
pub use mynote_api_structs::dtos::ReminderDTO as Reminder;
pub use mynote_api_structs::dtos::UserDTO as User;

/// MyNote Server SDK
///
/// The SDK contains methods for registering users and for interacting
/// with the note and reminder API of the MyNote server on behalf of a
/// single user.
#[derive(Clone)]
pub struct MyNoteSDK {
    pub user: UserClient,
    pub note: NoteClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl MyNoteSDK {
    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    /// SDK authenticated with the given user token
    pub fn with_user_token<T: Into<String>>(address: String, user_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_user_token(user_token.into());
        Self::create(base)
    }

    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let user = UserClient::new(base.clone());
        let note = NoteClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            user,
            note,
            reminder,
            status,
        }
    }
}
