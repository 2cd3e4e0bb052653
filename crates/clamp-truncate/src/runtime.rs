//! Page lifecycle wiring.
//!
//! Mirrors how a page script would install the truncation: run once the
//! document is ready, then re-run on resize after the signals go quiet.
//! The host owns the event loop; it calls [`Runtime::on_ready`],
//! [`Runtime::on_resize`] and [`Runtime::tick`] as events and timers occur.

use std::hash::Hash;
use std::time::Duration;

use clamp_common::console::Console;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::config::{ConfigError, TruncateConfig};
use crate::debounce::Debouncer;
use crate::oracle::RenderHost;
use crate::orchestrator::{PassReport, Truncator};

/// [§ 3.1.8 Current document readiness](https://html.spec.whatwg.org/multipage/dom.html#current-document-readiness)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReadyState {
    /// "The document is still loading."
    Loading,
    /// "The document has finished loading and the document has been parsed."
    Interactive,
    /// "The document and all sub-resources have finished loading."
    #[default]
    Complete,
}

impl ReadyState {
    /// Whether the DOM can be queried yet.
    #[must_use]
    pub const fn is_parsed(self) -> bool {
        matches!(self, Self::Interactive | Self::Complete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Created but `install` not called.
    Detached,
    /// Installed on a loading document; waiting for the ready signal.
    AwaitingReady,
    /// The initial pass has run.
    Active,
}

/// Installs the truncation on a page and keeps it current across resizes.
#[derive(Debug, Clone)]
pub struct Runtime<E> {
    truncator: Truncator<E>,
    debouncer: Debouncer,
    phase: Phase,
    passes: usize,
}

impl<E: Copy + Eq + Hash> Runtime<E> {
    /// Build a runtime from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn new(config: &TruncateConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            truncator: Truncator::new(config)?,
            debouncer: Debouncer::new(config.debounce_delay()),
            phase: Phase::Detached,
            passes: 0,
        })
    }

    /// Attach to a document in `ready_state`.
    ///
    /// If the document is already parsed the initial pass runs now and its
    /// report is returned; otherwise it runs on [`Runtime::on_ready`].
    pub fn install<H, C>(
        &mut self,
        host: &mut H,
        ready_state: ReadyState,
        console: &mut C,
    ) -> Option<PassReport<E>>
    where
        H: RenderHost<Element = E>,
        C: Console + ?Sized,
    {
        if self.phase != Phase::Detached {
            return None;
        }
        if ready_state.is_parsed() {
            Some(self.initial_pass(host, console))
        } else {
            self.phase = Phase::AwaitingReady;
            None
        }
    }

    /// The document finished parsing. Runs the initial pass if `install`
    /// deferred it; otherwise does nothing.
    pub fn on_ready<H, C>(&mut self, host: &mut H, console: &mut C) -> Option<PassReport<E>>
    where
        H: RenderHost<Element = E>,
        C: Console + ?Sized,
    {
        (self.phase == Phase::AwaitingReady).then(|| self.initial_pass(host, console))
    }

    /// The viewport was resized at `now`. Re-arms the debounce timer.
    pub fn on_resize(&mut self, now: Duration) {
        self.debouncer.signal(now);
    }

    /// Timer check at `now`. Runs a pass if the debounce deadline has passed.
    pub fn tick<H>(&mut self, host: &mut H, now: Duration) -> Option<PassReport<E>>
    where
        H: RenderHost<Element = E>,
    {
        self.debouncer.poll(now).then(|| self.run_pass(host))
    }

    /// When the next debounced pass is due, if one is pending.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Number of passes run so far, initial pass included.
    #[must_use]
    pub const fn pass_count(&self) -> usize {
        self.passes
    }

    /// Whether the initial pass has run.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// The underlying truncator.
    #[must_use]
    pub const fn truncator(&self) -> &Truncator<E> {
        &self.truncator
    }

    fn initial_pass<H, C>(&mut self, host: &mut H, console: &mut C) -> PassReport<E>
    where
        H: RenderHost<Element = E>,
        C: Console + ?Sized,
    {
        let report = self.run_pass(host);
        self.phase = Phase::Active;
        console.log(&format!(
            "truncation initialized for {} ({} lines)",
            self.truncator.selector(),
            self.truncator.max_lines()
        ));
        report
    }

    fn run_pass<H>(&mut self, host: &mut H) -> PassReport<E>
    where
        H: RenderHost<Element = E>,
    {
        self.passes += 1;
        self.truncator.apply(host)
    }
}
