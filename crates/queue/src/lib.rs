pub mod events;
pub mod queue;

pub use events::QueueEvent;
pub use queue::ReservationQueue;
