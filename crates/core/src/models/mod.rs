pub mod outcome;
pub mod reservation;
pub mod schedule;
pub mod station;
pub mod task;
pub mod user;

pub use outcome::{OutcomeStatus, ReserveOutcome};
pub use reservation::{Reservation, Ticket};
pub use schedule::{next_departure_cursor, Schedule, SearchRequest};
pub use station::Station;
pub use task::{ReservationTask, TaskOptions};
pub use user::UserProfile;
