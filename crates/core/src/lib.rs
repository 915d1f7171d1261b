pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use errors::{KorresError, KorresResult};
pub use models::{
    OutcomeStatus, Reservation, ReservationTask, ReserveOutcome, Schedule, SearchRequest, Station,
    TaskOptions, Ticket, UserProfile,
};
