use crate::{
    reminder::rearm_reminders::RearmRemindersUseCase,
    shared::usecase::execute,
};
use mynote_infra::MyNoteContext;
use tracing::{error, info};

/// Arms the reminders found in the store. Timers are not persisted, so
/// this has to run before the server starts accepting requests.
pub async fn start_reminder_scheduler(ctx: &MyNoteContext) {
    match execute(RearmRemindersUseCase {}, ctx).await {
        Ok(res) => info!(
            "Reminder scheduler started with {} armed reminders, {} passed reminders skipped",
            res.armed, res.skipped
        ),
        Err(e) => error!("Unable to rearm stored reminders: {:?}", e),
    }
}

pub fn stop_reminder_scheduler(ctx: &MyNoteContext) {
    ctx.scheduler.shutdown();
}
