pub mod composite;
pub mod desktop;
pub mod email;
pub mod kakao;

pub use composite::CompositeNotifier;
pub use desktop::DesktopNotifier;
pub use email::EmailWebhookNotifier;
pub use kakao::KakaoNotifier;
