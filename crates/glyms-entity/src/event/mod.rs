//! Event domain entities.

pub mod model;
pub mod state;

pub use model::{CreateEvent, Event, EventDetails, UpdateEvent};
pub use state::EventState;
