mod telegram_notifier;

pub use telegram_notifier::TelegramNotifier;
