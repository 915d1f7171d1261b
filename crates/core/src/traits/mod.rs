pub mod booking_client;
pub mod notifier;
pub mod state_store;

pub use booking_client::BookingClient;
pub use notifier::{ChatAuthGateway, NotificationMessage, Notifier};
pub use state_store::{StateStore, EMAIL_KEY, KAKAO_AUTH_KEY, TASKS_KEY};
