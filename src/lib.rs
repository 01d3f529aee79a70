#![warn(missing_docs)]

//! # countdown-ring
//!
//! A countdown widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: a numeric label centred inside a circular progress ring,
//! counting down from an initial value to zero.
//!
//! ## Overview
//!
//! The widget follows the Elm Architecture like every bubbletea component:
//! operations return an optional `Cmd`, ticks arrive as messages through
//! `update()`, and `view()` renders the current state.
//!
//! Each tick counts down exactly one unit. The label shows the remaining
//! count and the ring shows the remaining fraction, both updated together.
//! When the count reaches zero the tick source is cancelled and the
//! completion callback runs once.
//!
//! ## Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`countdown`] | The countdown controller |
//! | [`scheduler`] | Tick sources: bubbletea runtime and a manual fake |
//! | [`label`] | Text sink for the remaining count |
//! | [`indicator`] | Progress ring |
//! | [`config`] | Styling configuration |
//! | [`error`] | Error type |
//!
//! ## Quick Start
//!
//! ```rust
//! use countdown_ring::prelude::*;
//! use std::time::Duration;
//!
//! let mut countdown = countdown_new(&[with_radius(4)])
//!     .with_on_completion(|| println!("done"));
//!
//! let first_tick = countdown.start(10).unwrap();
//! assert!(first_tick.is_some());
//!
//! // Speed the countdown up to two ticks per second.
//! countdown.accelerate(0.5).unwrap();
//! assert_eq!(countdown.interval(), Some(Duration::from_millis(500)));
//! ```
//!
//! ## Deterministic Driving
//!
//! Swap the runtime scheduler for [`scheduler::ManualScheduler`] to drive a
//! countdown without a clock:
//!
//! ```rust
//! use countdown_ring::prelude::*;
//!
//! let mut countdown = new_with_scheduler(ManualScheduler::new(), &[]);
//! countdown.start(2).unwrap();
//!
//! while let Some(tick) = countdown.scheduler_mut().fire() {
//!     countdown.handle_tick(&tick);
//! }
//! assert!(countdown.completed());
//! assert_eq!(countdown.text(), "0");
//! ```

pub mod config;
pub mod countdown;
pub mod error;
pub mod indicator;
pub mod label;
pub mod scheduler;

pub use config::Configuration;
pub use countdown::{
    new as countdown_new, new_with_scheduler, with_configuration, with_interval, with_radius,
    CountdownOption, Model as Countdown, Status, TickMsg as CountdownTickMsg,
};
pub use error::{Error, Result};
pub use indicator::{IndicatorConfig, Model as Indicator, ProgressSink};
pub use label::{Font, Model as Label, TextSink, Weight};
pub use scheduler::{ManualScheduler, Registration, RuntimeScheduler, Scheduler};

/// Prelude module for convenient imports.
///
/// ```rust
/// use countdown_ring::prelude::*;
///
/// let countdown: Countdown = countdown_new(&[]);
/// assert!(!countdown.running());
/// ```
pub mod prelude {
    pub use crate::config::Configuration;
    pub use crate::countdown::{
        new as countdown_new, new_with_scheduler, with_configuration, with_interval,
        with_radius, CountdownOption, Model as Countdown, Status, TickMsg as CountdownTickMsg,
    };
    pub use crate::error::Error;
    pub use crate::indicator::{IndicatorConfig, Model as Indicator, ProgressSink};
    pub use crate::label::{Font, Model as Label, TextSink, Weight};
    pub use crate::scheduler::{ManualScheduler, Registration, RuntimeScheduler, Scheduler};
}
