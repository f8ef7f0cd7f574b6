pub mod notifier;

pub use notifier::TelegramNotifier;
