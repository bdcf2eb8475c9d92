mod clock;
mod engine;
mod hold;
mod runtime;
mod state;

pub use clock::{FixedClock, SystemClock, Ticker, WallClock, TICK_PERIOD};
pub use engine::{EngineSettings, TimerEngine};
pub use hold::{HoldController, HoldSettings};
pub use runtime::TimerRuntime;
pub use state::{format_time, TimerMode, TimerState, TimerStatus, DEFAULT_COUNTDOWN_SECS};
