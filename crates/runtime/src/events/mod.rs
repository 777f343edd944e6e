//! Topic-based event bus for runtime events.
//!
//! Flow lifecycle boundaries, rendered cards, and operator notifications are
//! published to separate topics so consumers subscribe only to what they
//! display.

mod bus;
mod relay;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use relay::EventRelay;
pub use types::FlowEvent;
