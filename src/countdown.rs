//! Countdown component for Bubble Tea applications.
//!
//! A countdown counts down from an initial value to zero, one unit per tick.
//! The remaining count is shown as a label centred inside a progress ring
//! that empties in step with the label. When the count reaches zero the
//! tick source is cancelled and a completion callback runs once.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_ring::countdown::new;
//! use std::time::Duration;
//!
//! let mut countdown = new(&[]);
//!
//! // Ten ticks, one per second by default.
//! let cmd = countdown.start(10).unwrap();
//! assert!(cmd.is_some());
//! assert_eq!(countdown.text(), "10");
//! assert_eq!(countdown.progress(), 1.0);
//!
//! // Double the tick rate without touching the displayed values.
//! let cmd = countdown.accelerate(0.5).unwrap();
//! assert_eq!(countdown.interval(), Some(Duration::from_millis(500)));
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use countdown_ring::countdown::{new, Model};
//!
//! struct App {
//!     countdown: Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = new(&[]).with_on_completion(|| {
//!             // Time's up.
//!         });
//!         let cmd = countdown.start(30).ok().flatten();
//!         (Self { countdown }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::indicator::{self, ProgressSink};
use crate::label::{self, TextSink};
use crate::scheduler::{Registration, RuntimeScheduler, Scheduler};
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_INITIAL_VALUE: u32 = 60;

/// Message delivered by every firing of a countdown's tick source.
///
/// Ticks carry the id of the countdown they belong to and the tag of the
/// registration that produced them. A countdown ignores ticks addressed to
/// another instance, and ticks from a registration it has since replaced or
/// cancelled. Application code forwards these messages to
/// [`Model::update`] and never needs to build them.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The id of the countdown this tick targets.
    pub id: i64,
    pub(crate) tag: i64,
}

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// Never started, or cancelled.
    Idle,
    /// Counting down.
    Running {
        /// Units left. Always at least one while running.
        remaining: u32,
        /// Progress represented by one unit, `1 / initial_value`.
        step: f64,
        /// The live tick registration.
        registration: Registration,
    },
    /// Reached zero. Only a new `start` leaves this state.
    Completed,
}

/// Construction options for [`new`] and [`new_with_scheduler`].
pub enum CountdownOption {
    /// Applies a styling configuration.
    WithConfiguration(Configuration),
    /// Sets the ring radius.
    WithRadius(u16),
    /// Sets the tick interval used by [`Model::start`].
    WithInterval(Duration),
}

impl CountdownOption {
    fn apply<S: Scheduler>(&self, m: &mut Model<S>) {
        match self {
            CountdownOption::WithConfiguration(config) => m.apply(config.clone()),
            CountdownOption::WithRadius(radius) => m.indicator.radius = *radius,
            CountdownOption::WithInterval(interval) => m.default_interval = *interval,
        }
    }
}

/// Applies a styling configuration at construction.
pub fn with_configuration(config: Configuration) -> CountdownOption {
    CountdownOption::WithConfiguration(config)
}

/// Sets the ring radius.
pub fn with_radius(radius: u16) -> CountdownOption {
    CountdownOption::WithRadius(radius)
}

/// Sets the tick interval used by [`Model::start`].
pub fn with_interval(interval: Duration) -> CountdownOption {
    CountdownOption::WithInterval(interval)
}

type CompletionCallback = Box<dyn FnMut() + Send>;

/// Countdown controller.
///
/// The controller owns its tick source and two display sinks: a
/// [`TextSink`] for the remaining count and a [`ProgressSink`] for the ring.
/// Both sinks are always updated together, so the label and the ring never
/// disagree.
///
/// # Type Parameters
///
/// - `S`: the tick source. [`RuntimeScheduler`] in applications,
///   [`crate::scheduler::ManualScheduler`] for deterministic driving.
/// - `T`: the text sink, [`label::Model`] by default.
/// - `P`: the progress sink, [`indicator::Model`] by default.
///
/// # Lifecycle
///
/// `Idle -> Running` on [`start`](Model::start); `Running -> Running` on
/// [`accelerate`](Model::accelerate); `Running -> Completed` on the tick
/// that reaches zero; `Running -> Idle` on [`cancel`](Model::cancel).
/// `start` may be called from any state and always begins afresh.
///
/// Dropping the controller cancels its live registration.
pub struct Model<
    S: Scheduler = RuntimeScheduler,
    T: TextSink = label::Model,
    P: ProgressSink = indicator::Model,
> {
    id: i64,
    tag: i64,
    default_interval: Duration,
    status: Status,
    configuration: Configuration,
    scheduler: S,
    label: T,
    indicator: P,
    on_completion: CompletionCallback,
}

/// Creates a countdown driven by the bubbletea runtime, applying `opts` in
/// order.
pub fn new(opts: &[CountdownOption]) -> Model {
    new_with_scheduler(RuntimeScheduler::new(), opts)
}

/// Creates a countdown driven by `scheduler`, applying `opts` in order.
pub fn new_with_scheduler<S: Scheduler>(scheduler: S, opts: &[CountdownOption]) -> Model<S> {
    let mut m = Model::with_parts(scheduler, label::Model::new(), indicator::new(&[]));

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

impl<S: Scheduler, T: TextSink, P: ProgressSink> Model<S, T, P> {
    /// Assembles a countdown from its collaborators and applies the default
    /// [`Configuration`] to the sinks.
    pub fn with_parts(scheduler: S, label: T, indicator: P) -> Self {
        let mut m = Self {
            id: next_id(),
            tag: 0,
            default_interval: DEFAULT_INTERVAL,
            status: Status::Idle,
            configuration: Configuration::default(),
            scheduler,
            label,
            indicator,
            on_completion: Box::new(|| {}),
        };
        m.apply(Configuration::default());
        m
    }

    /// Sets the callback run when the countdown reaches zero.
    ///
    /// The callback runs synchronously inside the update that handles the
    /// final tick, once per completed run.
    pub fn set_on_completion<F>(&mut self, f: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_completion = Box::new(f);
    }

    /// Builder form of [`set_on_completion`](Model::set_on_completion).
    pub fn with_on_completion<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.set_on_completion(f);
        self
    }

    /// Unique identifier of this countdown instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current lifecycle state.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the countdown is counting down.
    pub fn running(&self) -> bool {
        matches!(self.status, Status::Running { .. })
    }

    /// Whether the countdown has reached zero.
    pub fn completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Units left: `None` while idle, `Some(0)` once completed.
    pub fn remaining(&self) -> Option<u32> {
        match self.status {
            Status::Idle => None,
            Status::Running { remaining, .. } => Some(remaining),
            Status::Completed => Some(0),
        }
    }

    /// Interval of the live tick registration, if running.
    pub fn interval(&self) -> Option<Duration> {
        match self.status {
            Status::Running { registration, .. } => Some(registration.interval()),
            _ => None,
        }
    }

    /// Interval used by [`start`](Model::start).
    pub fn default_interval(&self) -> Duration {
        self.default_interval
    }

    /// Progress currently shown by the ring.
    pub fn progress(&self) -> f64 {
        self.indicator.progress()
    }

    /// Text currently shown by the label.
    pub fn text(&self) -> &str {
        self.label.text()
    }

    /// The configuration applied most recently.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The tick source.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the tick source, for driving manual schedulers.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The text sink.
    pub fn label(&self) -> &T {
        &self.label
    }

    /// The progress sink.
    pub fn indicator(&self) -> &P {
        &self.indicator
    }

    /// Restyles the label and the ring.
    ///
    /// Timing state is untouched: a running countdown keeps its remaining
    /// count and its registration.
    pub fn apply(&mut self, configuration: Configuration) {
        self.label
            .apply_style(&configuration.font, &configuration.text_color);
        self.indicator.apply_configuration(&configuration.indicator);
        self.configuration = configuration;
    }

    /// Starts counting down from `initial_value` at the default interval.
    ///
    /// See [`start_with_interval`](Model::start_with_interval).
    pub fn start(&mut self, initial_value: u32) -> Result<Option<Cmd>> {
        self.start_with_interval(initial_value, self.default_interval)
    }

    /// Starts counting down from `initial_value`, one unit every `interval`.
    ///
    /// Any live registration is cancelled first, so restarting a running
    /// countdown never produces duplicate ticks. The label shows
    /// `initial_value` and the ring is full once this returns.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInitialValue`] when `initial_value` is zero.
    /// - [`Error::InvalidInterval`] when `interval` is zero.
    ///
    /// On error the countdown is left exactly as it was.
    ///
    /// # Returns
    ///
    /// The command delivering the first tick when the scheduler is runtime
    /// driven. It must be handed to the bubbletea runtime.
    pub fn start_with_interval(
        &mut self,
        initial_value: u32,
        interval: Duration,
    ) -> Result<Option<Cmd>> {
        if initial_value == 0 {
            log::warn!("countdown {}: refusing to start from zero", self.id);
            return Err(Error::InvalidInitialValue);
        }
        if interval.is_zero() {
            log::warn!("countdown {}: refusing a zero tick interval", self.id);
            return Err(Error::InvalidInterval(interval));
        }

        self.release();

        let step = 1.0 / initial_value as f64;
        self.label.set_text(&initial_value.to_string());
        self.indicator.set_progress(1.0);

        let registration = self.register(interval);
        self.status = Status::Running {
            remaining: initial_value,
            step,
            registration,
        };
        log::debug!(
            "countdown {}: started from {} every {:?}",
            self.id,
            initial_value,
            interval
        );

        Ok(self.scheduler.schedule(registration))
    }

    /// Scales the tick interval of a running countdown by `multiplier`.
    ///
    /// Values below one speed the countdown up, values above one slow it
    /// down. Each tick still counts exactly one unit; only the rate of ticks
    /// changes. The remaining count, progress step, label and ring are not
    /// touched.
    ///
    /// # Errors
    ///
    /// - [`Error::NotRunning`] when the countdown is idle or completed.
    /// - [`Error::InvalidMultiplier`] when `multiplier` is not a finite
    ///   positive number, or the scaled interval rounds to zero or does not
    ///   fit in a [`Duration`].
    ///
    /// On error the countdown is left exactly as it was.
    pub fn accelerate(&mut self, multiplier: f64) -> Result<Option<Cmd>> {
        let Status::Running {
            remaining,
            step,
            registration,
        } = self.status
        else {
            log::warn!("countdown {}: accelerate while not running", self.id);
            return Err(Error::NotRunning);
        };

        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(Error::InvalidMultiplier(multiplier));
        }
        let interval =
            Duration::try_from_secs_f64(registration.interval().as_secs_f64() * multiplier)
                .ok()
                .filter(|interval| !interval.is_zero())
                .ok_or(Error::InvalidMultiplier(multiplier))?;

        self.scheduler.cancel(&registration);
        let registration = self.register(interval);
        self.status = Status::Running {
            remaining,
            step,
            registration,
        };
        log::debug!(
            "countdown {}: interval scaled by {} to {:?}",
            self.id,
            multiplier,
            interval
        );

        Ok(self.scheduler.schedule(registration))
    }

    /// Stops a running countdown without completing it.
    ///
    /// The live registration is cancelled and the countdown returns to
    /// [`Status::Idle`]. The label and ring keep their last values and the
    /// completion callback does not run. Does nothing unless running.
    pub fn cancel(&mut self) {
        if let Status::Running { remaining, .. } = self.status {
            self.release();
            self.status = Status::Idle;
            log::debug!("countdown {}: cancelled with {} left", self.id, remaining);
        }
    }

    /// Handles one tick.
    ///
    /// Ticks for another countdown, from a replaced or cancelled
    /// registration, or arriving while not running are ignored. An accepted
    /// tick counts down one unit and updates the label and ring; the tick
    /// that reaches zero cancels the registration and runs the completion
    /// callback.
    ///
    /// # Returns
    ///
    /// The command delivering the next tick, when the scheduler is runtime
    /// driven and the countdown has not completed.
    pub fn handle_tick(&mut self, msg: &TickMsg) -> Option<Cmd> {
        let Status::Running {
            remaining,
            step,
            registration,
        } = self.status
        else {
            return None;
        };

        if msg.id != self.id || msg.tag != registration.tag() {
            log::trace!(
                "countdown {}: ignoring stale tick (id {}, tag {})",
                self.id,
                msg.id,
                msg.tag
            );
            return None;
        }

        let remaining = remaining.saturating_sub(1);
        self.label.set_text(&remaining.to_string());
        // Derived from the count rather than accumulated, so zero is exact.
        self.indicator.set_progress(remaining as f64 * step);
        log::trace!("countdown {}: {} left", self.id, remaining);

        if remaining == 0 {
            self.scheduler.cancel(&registration);
            self.status = Status::Completed;
            log::debug!("countdown {}: completed", self.id);
            (self.on_completion)();
            return None;
        }

        self.status = Status::Running {
            remaining,
            step,
            registration,
        };
        self.scheduler.next_tick(&registration)
    }

    /// Processes a bubbletea message. Only [`TickMsg`] is handled.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            return self.handle_tick(tick_msg);
        }
        None
    }

    fn register(&mut self, interval: Duration) -> Registration {
        self.tag += 1;
        Registration::new(self.id, self.tag, interval)
    }

    fn release(&mut self) {
        if let Status::Running { registration, .. } = self.status {
            self.scheduler.cancel(&registration);
        }
    }
}

impl<S: Scheduler> Model<S> {
    /// Renders the ring with the remaining count centred inside it.
    pub fn view(&self) -> String {
        self.indicator
            .view_with_center(&self.label.view(), self.label.width())
    }
}

impl<S: Scheduler, T: TextSink, P: ProgressSink> fmt::Debug for Model<S, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("default_interval", &self.default_interval)
            .field("status", &self.status)
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler, T: TextSink, P: ProgressSink> Drop for Model<S, T, P> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new(&[]);
        let cmd = model.start(DEFAULT_INITIAL_VALUE).ok().flatten();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
