//! Pipeline status reporting.
//!
//! A run moves through five [`Stage`]s. Reporters announce each stage on
//! stderr, keeping stdout free for the prompt and the final result line.
//! Accessible mode prints one static line per stage; standard mode drives an
//! `indicatif` spinner that is cleared when the run ends.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::env;
use std::io::{self, Write};
use std::time::Duration;

/// The stages of one run, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Enumerate files under the root.
    Scan = 1,
    /// Read `require` directives and build the graph.
    Parse = 2,
    /// Look for circular dependencies.
    CycleCheck = 3,
    /// Compute the dependency-first order.
    Sort = 4,
    /// Write the concatenated artifact.
    Write = 5,
}

impl Stage {
    /// All stages in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Scan,
        Self::Parse,
        Self::CycleCheck,
        Self::Sort,
        Self::Write,
    ];

    /// 1-based position of the stage.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Scan => "Scanning files",
            Self::Parse => "Reading require directives",
            Self::CycleCheck => "Checking for circular dependencies",
            Self::Sort => "Ordering files",
            Self::Write => "Writing concatenated output",
        }
    }

    /// Label such as `Stage 3/5: Checking for circular dependencies`.
    #[must_use]
    pub fn label(self) -> String {
        format!(
            "Stage {}/{}: {}",
            self.index(),
            STAGE_COUNT,
            self.description()
        )
    }
}

/// Number of stages reported per run.
pub const STAGE_COUNT: u32 = 5;

/// Report pipeline progress to the user.
pub trait StatusReporter {
    /// A stage has started.
    fn report_stage(&self, stage: Stage);

    /// The run finished successfully.
    fn report_complete(&self);
}

/// Writes one labelled line per stage to stderr.
pub struct AccessibleReporter;

impl StatusReporter for AccessibleReporter {
    fn report_stage(&self, stage: Stage) {
        // Status output failures must not abort the run.
        drop(writeln!(io::stderr(), "{}", stage.label()));
    }

    fn report_complete(&self) {
        drop(writeln!(io::stderr(), "Concatenation finished"));
    }
}

/// Emits nothing.
pub struct SilentReporter;

impl StatusReporter for SilentReporter {
    fn report_stage(&self, _stage: Stage) {}
    fn report_complete(&self) {}
}

/// Animated spinner on stderr; cleared on completion or drop.
pub struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    /// Create a spinner drawing to stderr.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr_with_hz(12));
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl StatusReporter for SpinnerReporter {
    fn report_stage(&self, stage: Stage) {
        self.bar.set_message(stage.label());
    }

    fn report_complete(&self) {
        self.bar.finish_and_clear();
    }
}

/// Whether status output should be static text or animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMode {
    /// Static labelled lines, for screen readers, dumb terminals and CI.
    Accessible,
    /// Animated spinner.
    Standard,
}

impl StatusMode {
    /// Resolve the mode from an explicit flag and the process environment.
    #[must_use]
    pub fn resolve(explicit: Option<bool>) -> Self {
        Self::resolve_with(explicit, |key| env::var(key).ok())
    }

    /// Resolve the mode using `read_env` for variable lookups.
    ///
    /// An explicit flag wins; otherwise `NO_COLOR` (any value) or
    /// `TERM=dumb` selects accessible output.
    ///
    /// # Examples
    ///
    /// ```
    /// use catena::status::StatusMode;
    ///
    /// let mode = StatusMode::resolve_with(None, |key| {
    ///     (key == "TERM").then(|| String::from("dumb"))
    /// });
    /// assert_eq!(mode, StatusMode::Accessible);
    /// ```
    #[must_use]
    pub fn resolve_with<F>(explicit: Option<bool>, read_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match explicit {
            Some(true) => Self::Accessible,
            Some(false) => Self::Standard,
            None if read_env("NO_COLOR").is_some() => Self::Accessible,
            None if read_env("TERM").as_deref() == Some("dumb") => Self::Accessible,
            None => Self::Standard,
        }
    }

    /// Build the reporter for this mode.
    #[must_use]
    pub fn reporter(self) -> Box<dyn StatusReporter> {
        match self {
            Self::Accessible => Box::new(AccessibleReporter),
            Self::Standard => Box::new(SpinnerReporter::new()),
        }
    }
}
