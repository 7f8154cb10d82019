use super::INoteRepo;
use mynote_domain::{Note, TodoItem, ID};
use serde::{Deserialize, Serialize};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresNoteRepo {
    pool: PgPool,
}

impl PostgresNoteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoItemRaw {
    content: String,
    is_done: bool,
}

#[derive(Debug, FromRow)]
struct NoteRaw {
    note_uid: Uuid,
    user_uid: Uuid,
    title: String,
    content: String,
    todo_items: Json<Vec<TodoItemRaw>>,
}

impl From<NoteRaw> for Note {
    fn from(raw: NoteRaw) -> Self {
        Note {
            id: raw.note_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            content: raw.content,
            todo_items: raw
                .todo_items
                .0
                .into_iter()
                .map(|item| TodoItem {
                    content: item.content,
                    is_done: item.is_done,
                })
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl INoteRepo for PostgresNoteRepo {
    async fn insert(&self, note: &Note) -> anyhow::Result<()> {
        let todo_items = note
            .todo_items
            .iter()
            .map(|item| TodoItemRaw {
                content: item.content.clone(),
                is_done: item.is_done,
            })
            .collect::<Vec<_>>();
        sqlx::query(
            r#"
            INSERT INTO notes(note_uid, user_uid, title, content, todo_items)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(note.id.inner_ref())
        .bind(note.user_id.inner_ref())
        .bind(&note.title)
        .bind(&note.content)
        .bind(Json(todo_items))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, note_id: &ID) -> Option<Note> {
        sqlx::query_as::<_, NoteRaw>(
            r#"
            SELECT * FROM notes AS n
            WHERE n.note_uid = $1
            "#,
        )
        .bind(note_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|note| note.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, NoteRaw>(
            r#"
            SELECT * FROM notes AS n
            WHERE n.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(notes.into_iter().map(|n| n.into()).collect())
    }
}
