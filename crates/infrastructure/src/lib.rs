pub mod korail;
pub mod notify;
pub mod storage;

pub use korail::KorailClient;
pub use notify::{CompositeNotifier, DesktopNotifier, EmailWebhookNotifier, KakaoNotifier};
pub use storage::JsonFileStore;
