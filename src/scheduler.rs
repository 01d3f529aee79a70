//! Tick sources for the countdown widget.
//!
//! A countdown never talks to a clock directly. It hands a [`Registration`]
//! to a [`Scheduler`] and reacts to the [`TickMsg`] values that come back.
//! Two schedulers ship with the crate:
//!
//! - [`RuntimeScheduler`] produces bubbletea-rs `tick` commands and is what a
//!   running application uses.
//! - [`ManualScheduler`] never touches time. Ticks are produced on demand with
//!   [`ManualScheduler::fire`] or [`ManualScheduler::advance`], which makes the
//!   countdown fully deterministic in tests.
//!
//! # Example
//!
//! ```rust
//! use countdown_ring::countdown::new_with_scheduler;
//! use countdown_ring::scheduler::ManualScheduler;
//! use std::time::Duration;
//!
//! let mut countdown = new_with_scheduler(ManualScheduler::new(), &[]);
//! countdown.start(3).unwrap();
//!
//! for msg in countdown.scheduler_mut().advance(Duration::from_secs(2)) {
//!     countdown.handle_tick(&msg);
//! }
//! assert_eq!(countdown.remaining(), Some(1));
//! ```

use crate::countdown::TickMsg;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::time::Duration;

/// One repeating tick registration.
///
/// A registration is identified by the widget id and a tag that changes
/// every time the widget replaces its tick source. Ticks carry both values so
/// that a tick from a replaced or cancelled registration can be recognised
/// and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    id: i64,
    tag: i64,
    interval: Duration,
}

impl Registration {
    pub(crate) fn new(id: i64, tag: i64, interval: Duration) -> Self {
        Self { id, tag, interval }
    }

    /// The id of the widget that owns this registration.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The tag distinguishing this registration from earlier ones of the
    /// same widget.
    pub fn tag(&self) -> i64 {
        self.tag
    }

    /// Time between two firings.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The message delivered by one firing of this registration.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }
}

/// A source of repeating ticks.
///
/// The countdown owns its scheduler exclusively and keeps at most one
/// registration live at a time: it always cancels the old registration
/// before scheduling a new one.
pub trait Scheduler {
    /// Begins delivering ticks for `registration` every
    /// [`Registration::interval`].
    ///
    /// Runtime driven schedulers return the command that delivers the first
    /// tick; the caller must hand it to the bubbletea runtime.
    fn schedule(&mut self, registration: Registration) -> Option<Cmd>;

    /// Called after a tick of the live `registration` has been handled and
    /// the countdown still needs more ticks.
    ///
    /// bubbletea ticks are one-shot, so runtime schedulers re-arm here.
    /// Schedulers whose registrations repeat on their own keep the default.
    fn next_tick(&mut self, registration: &Registration) -> Option<Cmd> {
        let _ = registration;
        None
    }

    /// Releases `registration`. Once this returns, no tick of the
    /// registration is accepted by the countdown.
    fn cancel(&mut self, registration: &Registration);
}

/// Scheduler backed by the bubbletea-rs runtime.
///
/// Every tick is a one-shot [`bubbletea_rs::tick`] command carrying the
/// registration's id and tag. A command that is already in flight cannot be
/// recalled, so cancellation relies on the countdown rejecting ticks whose
/// tag no longer matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeScheduler;

impl RuntimeScheduler {
    /// Creates a runtime scheduler.
    pub fn new() -> Self {
        Self
    }

    fn tick(&self, registration: &Registration) -> Cmd {
        let id = registration.id;
        let tag = registration.tag;

        bubbletea_tick(registration.interval, move |_| {
            Box::new(TickMsg { id, tag }) as Msg
        })
    }
}

impl Scheduler for RuntimeScheduler {
    fn schedule(&mut self, registration: Registration) -> Option<Cmd> {
        Some(self.tick(&registration))
    }

    fn next_tick(&mut self, registration: &Registration) -> Option<Cmd> {
        Some(self.tick(registration))
    }

    fn cancel(&mut self, registration: &Registration) {
        log::trace!(
            "dropping runtime ticks for countdown {} tag {}",
            registration.id,
            registration.tag
        );
    }
}

/// Manually advanced scheduler for deterministic, time-free driving.
///
/// Holds at most one live registration. Nothing fires until the owner asks
/// for ticks.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    active: Option<Registration>,
    elapsed: Duration,
    schedule_count: usize,
    cancelled: Vec<Registration>,
}

impl ManualScheduler {
    /// Creates a scheduler with no live registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live registration, if any.
    pub fn active(&self) -> Option<&Registration> {
        self.active.as_ref()
    }

    /// Whether a registration is live.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// How many registrations have been scheduled over the scheduler's
    /// lifetime.
    pub fn schedule_count(&self) -> usize {
        self.schedule_count
    }

    /// Registrations cancelled so far, oldest first.
    pub fn cancelled(&self) -> &[Registration] {
        &self.cancelled
    }

    /// Fires the live registration once, regardless of elapsed time.
    ///
    /// Returns `None` when nothing is scheduled.
    pub fn fire(&mut self) -> Option<TickMsg> {
        self.active.map(|registration| registration.tick_msg())
    }

    /// Moves the clock forward by `elapsed` and returns every tick that
    /// became due, in order.
    ///
    /// Time left over after the last due tick carries into the next call.
    /// Nothing accumulates while no registration is live.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TickMsg> {
        let Some(registration) = self.active else {
            return Vec::new();
        };

        self.elapsed += elapsed;
        let mut due = Vec::new();
        while self.elapsed >= registration.interval {
            self.elapsed -= registration.interval;
            due.push(registration.tick_msg());
        }
        due
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, registration: Registration) -> Option<Cmd> {
        self.active = Some(registration);
        self.elapsed = Duration::ZERO;
        self.schedule_count += 1;
        None
    }

    fn cancel(&mut self, registration: &Registration) {
        if self.active.as_ref() == Some(registration) {
            self.active = None;
            self.elapsed = Duration::ZERO;
            self.cancelled.push(*registration);
        }
    }
}
