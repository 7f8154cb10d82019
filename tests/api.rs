mod helpers;

use helpers::setup::spawn_app;
use mynote_sdk::{
    AddReminderInput, CreateNoteInput, Frequency, MyNoteSDK, TodoItemDTO, UpdateReminderInput, ID,
};
use reqwest::StatusCode;
use std::time::Duration;

fn one_shot(note_id: ID, reminder_time: String) -> AddReminderInput {
    AddReminderInput {
        note_id,
        reminder_time,
        recurring: false,
        frequency: None,
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_crud_reminder() {
    let (app, _, _) = spawn_app().await;
    let (_, note, sdk) = app.user_with_note("crud@example.com", "Dentist").await;

    let reminder_time = app.civil_from_now(60 * 60);
    let reminder = sdk
        .reminder
        .add(one_shot(note.id, reminder_time.clone()))
        .await
        .expect("Expected to add reminder")
        .reminder;
    assert_eq!(reminder.note_id, note.id);
    assert_eq!(reminder.reminder_time, reminder_time);
    assert!(!reminder.recurring);

    let res = sdk
        .reminder
        .get(reminder.id)
        .await
        .expect("Expected to get reminder");
    assert_eq!(res.reminder, reminder);
    assert_eq!(res.next_fire_time, Some(reminder_time.clone()));

    let reminders = sdk
        .reminder
        .get_by_note(note.id)
        .await
        .expect("Expected to get note reminders")
        .reminders;
    assert_eq!(reminders, vec![reminder.clone()]);

    let updated = sdk
        .reminder
        .update(UpdateReminderInput {
            reminder_id: reminder.id,
            reminder_time: None,
            recurring: Some(true),
            frequency: Some(Frequency::Daily),
        })
        .await
        .expect("Expected to update reminder")
        .reminder;
    assert!(updated.recurring);
    assert_eq!(updated.frequency, Some(Frequency::Daily));
    assert_eq!(updated.reminder_time, reminder_time);

    assert!(sdk.reminder.delete(reminder.id).await.is_ok());
    let res = sdk.reminder.get(reminder.id).await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::NOT_FOUND)
    );
    assert!(app.ctx.scheduler.pending().is_empty());
}

#[actix_web::main]
#[test]
async fn test_rejects_invalid_reminders() {
    let (app, _, _) = spawn_app().await;
    let (_, note, sdk) = app.user_with_note("invalid@example.com", "Taxes").await;

    let res = sdk
        .reminder
        .add(one_shot(note.id, app.civil_from_now(-60)))
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::BAD_REQUEST)
    );

    let res = sdk
        .reminder
        .add(one_shot(note.id, "tomorrow at noon".into()))
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::BAD_REQUEST)
    );

    assert!(sdk
        .reminder
        .add(one_shot(note.id, app.civil_from_now(60 * 60)))
        .await
        .is_ok());
    let res = sdk
        .reminder
        .add(one_shot(note.id, app.civil_from_now(2 * 60 * 60)))
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::CONFLICT)
    );
}

#[actix_web::main]
#[test]
async fn test_reminders_are_private() {
    let (app, anonymous_sdk, address) = spawn_app().await;
    let (_, note, sdk) = app.user_with_note("owner@example.com", "Groceries").await;
    let (_, _, other_sdk) = app.user_with_note("other@example.com", "Gym").await;

    let res = anonymous_sdk
        .reminder
        .add(one_shot(note.id, app.civil_from_now(60 * 60)))
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::UNAUTHORIZED)
    );

    let invalid_token_sdk = MyNoteSDK::with_user_token(address, "not-a-token");
    let res = invalid_token_sdk.reminder.get_by_note(note.id).await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::UNAUTHORIZED)
    );

    let res = other_sdk
        .reminder
        .add(one_shot(note.id, app.civil_from_now(60 * 60)))
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::NOT_FOUND)
    );

    let reminder = sdk
        .reminder
        .add(one_shot(note.id, app.civil_from_now(60 * 60)))
        .await
        .expect("Expected to add reminder")
        .reminder;
    let res = other_sdk.reminder.delete(reminder.id).await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::NOT_FOUND)
    );
    assert!(sdk.reminder.get(reminder.id).await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_reminder_notifies_owner() {
    let (app, _, _) = spawn_app().await;
    let (user, note, sdk) = app.user_with_note("notify@example.com", "Call mom").await;

    sdk.reminder
        .add(one_shot(note.id, app.civil_from_now(3)))
        .await
        .expect("Expected to add reminder");
    assert!(app.notifier.deliveries().is_empty());

    actix_web::rt::time::sleep(Duration::from_secs(5)).await;
    let deliveries = app.notifier.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].user_id, user.id);
    assert!(deliveries[0].body.contains("Title: Call mom"));
    assert!(app.ctx.scheduler.pending().is_empty());
}

#[actix_web::main]
#[test]
async fn test_registered_user_is_reminded_of_own_note() {
    let (app, sdk, address) = spawn_app().await;

    let user = sdk
        .user
        .create("writer@example.com".into(), "hunter2".into())
        .await
        .expect("Expected to create user")
        .user;
    let res = sdk
        .user
        .create("writer@example.com".into(), "other".into())
        .await;
    assert_eq!(res.err().and_then(|e| e.status()), Some(StatusCode::CONFLICT));
    let res = sdk
        .user
        .login("writer@example.com".into(), "wrong".into())
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::UNAUTHORIZED)
    );

    let login = sdk
        .user
        .login("writer@example.com".into(), "hunter2".into())
        .await
        .expect("Expected to log in");
    assert_eq!(login.user, user);
    let sdk = MyNoteSDK::with_user_token(address.clone(), login.token);

    let note = sdk
        .note
        .create(CreateNoteInput {
            title: "Packing".into(),
            content: None,
            todo_items: Some(vec![TodoItemDTO {
                content: "Passport".into(),
                is_done: false,
            }]),
        })
        .await
        .expect("Expected to create note")
        .note;
    assert_eq!(note.user_id, user.id);
    assert_eq!(
        sdk.note.get(note.id).await.expect("Expected to get note").note,
        note
    );
    assert_eq!(
        sdk.note.list().await.expect("Expected to list notes").notes,
        vec![note.clone()]
    );

    let res = sdk
        .note
        .create(CreateNoteInput {
            title: "Packing".into(),
            content: Some("Bags".into()),
            todo_items: Some(vec![]),
        })
        .await;
    assert_eq!(
        res.err().and_then(|e| e.status()),
        Some(StatusCode::BAD_REQUEST)
    );

    let (_, _, stranger) = app.user_with_note("stranger@example.com", "Other").await;
    let res = stranger.note.get(note.id).await;
    assert_eq!(res.err().and_then(|e| e.status()), Some(StatusCode::NOT_FOUND));

    sdk.reminder
        .add(one_shot(note.id, app.civil_from_now(3)))
        .await
        .expect("Expected to add reminder");
    actix_web::rt::time::sleep(Duration::from_secs(5)).await;
    let deliveries = app.notifier.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].user_id, user.id);
    assert!(deliveries[0].body.contains("- Passport [Not Done]"));
}
