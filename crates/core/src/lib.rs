#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use error::Error;
pub use session::{Advance, SessionPhase, SessionState, SessionStateError, Tick};
pub use time::Clock;
