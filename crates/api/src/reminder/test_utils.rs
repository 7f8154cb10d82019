use chrono::Duration;
use mynote_domain::{
    date::{format_civil_datetime, timestamp_millis_to_civil},
    Note, Reminder, User, ID,
};
use mynote_infra::{IReminderRepo, InMemoryNotifier, MockSys, MyNoteContext};
use std::sync::Arc;

/// 2030-01-01T00:00:00Z
const ORIGIN_MILLIS: i64 = 1_893_456_000_000;

pub struct TestContext {
    pub ctx: MyNoteContext,
    pub notifier: Arc<InMemoryNotifier>,
    pub user: User,
    pub note: Note,
}

/// In-memory context whose clock follows the paused tokio clock, with
/// a user owning a single note
pub async fn setup() -> TestContext {
    let notifier = Arc::new(InMemoryNotifier::new());
    let ctx = MyNoteContext::create_inmemory_with(
        Arc::new(MockSys::new(ORIGIN_MILLIS)),
        notifier.clone(),
    );
    let user = User::new("owner@example.com");
    ctx.repos.users.insert(&user).await.unwrap();
    let mut note = Note::new(user.id, "Book flights");
    note.content = "Check prices first".into();
    ctx.repos.notes.insert(&note).await.unwrap();

    TestContext {
        ctx,
        notifier,
        user,
        note,
    }
}

/// Civil time in the reminder timezone `offset` away from now
pub fn civil_from_now(ctx: &MyNoteContext, offset: Duration) -> String {
    let timestamp = ctx.sys.get_timestamp_millis() + offset.num_milliseconds();
    let civil = timestamp_millis_to_civil(timestamp, &ctx.config.reminder_timezone).unwrap();
    format_civil_datetime(&civil)
}

pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration.to_std().unwrap()).await;
}

/// Yields to other tasks right after every save, so that a concurrent use
/// case gets to run between saving a reminder and arming it
pub struct YieldingReminderRepo {
    inner: Arc<dyn IReminderRepo>,
}

impl YieldingReminderRepo {
    pub fn new(inner: Arc<dyn IReminderRepo>) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for YieldingReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let res = self.inner.save(reminder).await;
        tokio::task::yield_now().await;
        res
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.find(reminder_id).await
    }

    async fn find_by_note(&self, note_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_by_note(note_id).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_all().await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.delete(reminder_id).await
    }
}

/// A store that is unreachable
pub struct FailingReminderRepo {}

#[async_trait::async_trait]
impl IReminderRepo for FailingReminderRepo {
    async fn insert(&self, _: &Reminder) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("connection refused"))
    }

    async fn save(&self, _: &Reminder) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("connection refused"))
    }

    async fn find(&self, _: &ID) -> anyhow::Result<Option<Reminder>> {
        Err(anyhow::Error::msg("connection refused"))
    }

    async fn find_by_note(&self, _: &ID) -> anyhow::Result<Vec<Reminder>> {
        Err(anyhow::Error::msg("connection refused"))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        Err(anyhow::Error::msg("connection refused"))
    }

    async fn delete(&self, _: &ID) -> anyhow::Result<Option<Reminder>> {
        Err(anyhow::Error::msg("connection refused"))
    }
}
