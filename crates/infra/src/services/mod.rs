mod notifier;

pub use notifier::{Delivery, INotifier, InMemoryNotifier, LogNotifier, WebhookNotifier};
