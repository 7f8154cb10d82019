use super::IReminderRepo;
use mynote_domain::{Frequency, NaiveDateTime, Reminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    note_uid: Uuid,
    reminder_time: NaiveDateTime,
    recurring: bool,
    frequency: Option<String>,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        let frequency = match raw.frequency.as_deref().map(Frequency::parse_optional) {
            Some(Ok(frequency)) => frequency,
            Some(Err(e)) => {
                warn!("Stored reminder {} has an invalid frequency: {}", raw.reminder_uid, e);
                None
            }
            None => None,
        };
        Reminder {
            id: raw.reminder_uid.into(),
            note_id: raw.note_uid.into(),
            reminder_time: raw.reminder_time,
            recurring: raw.recurring,
            frequency,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, note_uid, reminder_time, recurring, frequency)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.note_id.inner_ref())
        .bind(reminder.reminder_time)
        .bind(reminder.recurring)
        .bind(reminder.frequency.map(|f| f.as_str()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET reminder_time = $2,
            recurring = $3,
            frequency = $4
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.reminder_time)
        .bind(reminder.recurring)
        .bind(reminder.frequency.map(|f| f.as_str()))
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(anyhow::Error::msg(format!(
                "Reminder {} does not exist",
                reminder.id
            )));
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(reminder.map(|reminder| reminder.into()))
    }

    async fn find_by_note(&self, note_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.note_uid = $1
            "#,
        )
        .bind(note_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>("SELECT * FROM reminders")
            .fetch_all(&self.pool)
            .await?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(reminder.map(|reminder| reminder.into()))
    }
}
