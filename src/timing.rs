//! Repeated, timed measure and draw passes
//!
//! Each timed run returns its samples; the caller files them into a
//! [`TimingReport`] which prints them in a fixed order.

use crate::backend::{BackendKind, TextDraw, TextMeasure};
use crate::layout::measure_tokens;
use crate::surface::{Surface, PAPER};
use crate::token_store::TokenStore;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

/// Runs per timed operation
pub const DEFAULT_REPEAT_COUNT: usize = 3;

/// Wall-clock stopwatch reporting milliseconds
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// What was timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Measure,
    Draw,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Measure => "measure",
            Operation::Draw => "draw",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Elapsed milliseconds of each repeated run, in run order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingSamples(pub Vec<f64>);

impl TimingSamples {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Fastest run
    pub fn best(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::min)
    }
}

/// Repeats operations against a backend and times each repeat
#[derive(Debug, Clone, Copy)]
pub struct Harness {
    repeat_count: usize,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_COUNT)
    }
}

impl Harness {
    pub fn new(repeat_count: usize) -> Self {
        Self { repeat_count }
    }

    pub fn repeat_count(&self) -> usize {
        self.repeat_count
    }

    /// Measure every token, `repeat_count` times
    pub fn time_measure(
        &self,
        store: &mut TokenStore<'_>,
        measure: &mut dyn TextMeasure,
    ) -> TimingSamples {
        let mut samples = Vec::with_capacity(self.repeat_count);
        for run in 0..self.repeat_count {
            let timer = Timer::start();
            measure_tokens(store, measure);
            let ms = timer.elapsed_ms();
            log::debug!("measure run {}: {:.4} ms over {} tokens", run, ms, store.len());
            samples.push(ms);
        }
        TimingSamples(samples)
    }

    /// Draw every non-newline token, `repeat_count` times.
    ///
    /// The surface is cleared to paper before each run (outside the timed
    /// region). Backends that accumulate need it for a correct picture; for
    /// the others it keeps the runs comparable.
    pub fn time_draw(
        &self,
        store: &TokenStore<'_>,
        draw: &mut dyn TextDraw,
        surface: &mut Surface,
    ) -> TimingSamples {
        let mut samples = Vec::with_capacity(self.repeat_count);
        for run in 0..self.repeat_count {
            surface.fill(PAPER);
            let timer = Timer::start();
            draw_tokens(store, draw, surface);
            let ms = timer.elapsed_ms();
            log::debug!(
                "draw run {}: {:.4} ms (accumulates: {})",
                run,
                ms,
                draw.accumulates()
            );
            samples.push(ms);
        }
        TimingSamples(samples)
    }
}

/// Draw every token except newlines at its laid-out position
pub fn draw_tokens(store: &TokenStore<'_>, draw: &mut dyn TextDraw, surface: &mut Surface) {
    for token in store.drawable() {
        draw.draw(surface, token.text, token.bounds);
    }
}

/// All samples, keyed by operation then backend
#[derive(Debug, Clone, Default)]
pub struct TimingReport {
    samples: BTreeMap<(Operation, BackendKind), TimingSamples>,
}

impl TimingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// File the samples for one (operation, backend) pair, replacing any
    /// earlier ones
    pub fn insert(&mut self, op: Operation, backend: BackendKind, samples: TimingSamples) {
        self.samples.insert((op, backend), samples);
    }

    pub fn get(&self, op: Operation, backend: BackendKind) -> Option<&TimingSamples> {
        self.samples.get(&(op, backend))
    }

    /// `(label, ms)` for every sample: measure before draw, then backend
    /// order, then run order
    pub fn records(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.samples.iter().flat_map(|(&(op, backend), samples)| {
            let label = format!("{} {}", backend.label(), op.label());
            samples.0.iter().map(move |&ms| (label.clone(), ms))
        })
    }

    /// Write one `label,ms` line per sample
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        for (label, ms) in self.records() {
            out.write_all(format_record(&label, ms).as_bytes())?;
        }
        Ok(())
    }

    /// Send every record to the log at info level
    pub fn log(&self) {
        for (label, ms) in self.records() {
            log::info!("{}", format_record(&label, ms).trim_end());
        }
    }
}

/// `"<label>,<ms with 4 decimals>\n"`
pub fn format_record(label: &str, ms: f64) -> String {
    format!("{},{:.4}\n", label, ms)
}
