use crate::shared::usecase::UseCase;
use mynote_infra::MyNoteContext;
use tracing::info;

/// Arms every stored reminder that still has an occurrence after now.
/// Pending timers only live in memory, so this runs on startup.
#[derive(Debug)]
pub struct RearmRemindersUseCase {}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub armed: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RearmRemindersUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "RearmReminders";

    async fn execute(&mut self, ctx: &MyNoteContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx
            .repos
            .reminders
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut res = UseCaseResponse {
            armed: 0,
            skipped: 0,
        };
        for reminder in reminders {
            match ctx.scheduler.arm_next_occurrence(&reminder) {
                Some(at) => {
                    info!("Rearmed reminder {} at {}", reminder.id, at);
                    res.armed += 1;
                }
                None => {
                    info!(
                        "Reminder {} at {} has passed and was not armed",
                        reminder.id, reminder.reminder_time
                    );
                    res.skipped += 1;
                }
            }
        }

        Ok(res)
    }
}
