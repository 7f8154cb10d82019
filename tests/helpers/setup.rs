use mynote_api::{create_user_token, Application};
use mynote_domain::{
    date::{format_civil_datetime, timestamp_millis_to_civil},
    Note, User,
};
use mynote_infra::{InMemoryNotifier, MyNoteContext, RealSys};
use mynote_sdk::MyNoteSDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: MyNoteContext,
    pub notifier: Arc<InMemoryNotifier>,
    pub address: String,
}

impl TestApp {
    /// Registers a user owning a single note and returns an sdk
    /// authenticated as that user
    pub async fn user_with_note(&self, email: &str, title: &str) -> (User, Note, MyNoteSDK) {
        let user = User::new(email);
        self.ctx
            .repos
            .users
            .insert(&user)
            .await
            .expect("Expected to insert user");
        let note = Note::new(user.id, title);
        self.ctx
            .repos
            .notes
            .insert(&note)
            .await
            .expect("Expected to insert note");

        let token = create_user_token(&user.id, &self.ctx.config.jwt_secret, 60 * 60)
            .expect("Expected to create user token");
        let sdk = MyNoteSDK::with_user_token(self.address.clone(), token);
        (user, note, sdk)
    }

    /// Civil time in the reminder timezone `offset_secs` away from now
    pub fn civil_from_now(&self, offset_secs: i64) -> String {
        let timestamp = self.ctx.sys.get_timestamp_millis() + offset_secs * 1000;
        let civil = timestamp_millis_to_civil(timestamp, &self.ctx.config.reminder_timezone)
            .expect("Expected a valid civil time");
        format_civil_datetime(&civil)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, MyNoteSDK, String) {
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut ctx = MyNoteContext::create_inmemory_with(Arc::new(RealSys {}), notifier.clone());
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        ctx,
        notifier,
        address: address.clone(),
    };
    let sdk = MyNoteSDK::new(address.clone());
    (app, sdk, address)
}
