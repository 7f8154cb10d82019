use crate::error::MyNoteError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use mynote_api_structs::delete_reminder::{APIResponse, PathParams};
use mynote_domain::{Reminder, ID};
use mynote_infra::MyNoteContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    ctx: web::Data<MyNoteContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, MyNoteError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = DeleteReminderUseCase {
        user_id,
        reminder_id: path.reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(MyNoteError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for MyNoteError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        match ctx.repos.notes.find(&reminder.note_id).await {
            Some(note) if note.is_owned_by(&self.user_id) => (),
            _ => return Err(UseCaseError::NotFound(self.reminder_id)),
        };

        let deleted = ctx
            .repos
            .reminders
            .delete(&reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.reminder_id))?;
        ctx.scheduler.cancel(&deleted.id);

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::test_utils::{civil_from_now, setup, sleep, FailingReminderRepo};
    use chrono::Duration;
    use mynote_domain::date::parse_civil_datetime;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn deleted_reminder_never_fires() {
        let test = setup().await;
        let reminder_time = civil_from_now(&test.ctx, Duration::minutes(5));
        let reminder = Reminder::new(test.note.id, parse_civil_datetime(&reminder_time).unwrap());
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();
        test.ctx.scheduler.arm(&reminder, reminder.reminder_time);

        let mut usecase = DeleteReminderUseCase {
            user_id: test.user.id,
            reminder_id: reminder.id,
        };
        assert_eq!(usecase.execute(&test.ctx).await, Ok(reminder.clone()));
        assert!(test.ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
        assert!(test.ctx.scheduler.pending().is_empty());

        sleep(Duration::hours(1)).await;
        assert!(test.notifier.deliveries().is_empty());

        // Deleting again is rejected
        assert_eq!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::NotFound(reminder.id))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_reminder_of_other_user() {
        let test = setup().await;
        let reminder_time = civil_from_now(&test.ctx, Duration::minutes(5));
        let reminder = Reminder::new(test.note.id, parse_civil_datetime(&reminder_time).unwrap());
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();
        test.ctx.scheduler.arm(&reminder, reminder.reminder_time);

        let mut usecase = DeleteReminderUseCase {
            user_id: ID::default(),
            reminder_id: reminder.id,
        };
        assert_eq!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::NotFound(reminder.id))
        );
        assert!(test.ctx.repos.reminders.find(&reminder.id).await.unwrap().is_some());

        sleep(Duration::minutes(6)).await;
        assert_eq!(test.notifier.deliveries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn storage_failure_is_not_reported_as_missing() {
        let mut test = setup().await;
        test.ctx.repos.reminders = Arc::new(FailingReminderRepo {});

        let mut usecase = DeleteReminderUseCase {
            user_id: test.user.id,
            reminder_id: ID::default(),
        };
        assert_eq!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::StorageError)
        );
    }
}
