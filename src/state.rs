use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::chart::ChartSpec;
use crate::data::model::SunspotDataset;
use crate::data::transform::{compute_cycle_fold, compute_range_smooth};

// ---------------------------------------------------------------------------
// Control domains
// ---------------------------------------------------------------------------

pub const YEAR_DOMAIN: RangeInclusive<i32> = 1800..=2020;
pub const YEAR_STEP: i32 = 20;
pub const WINDOW_DOMAIN: RangeInclusive<usize> = 1..=30;
pub const CYCLE_DOMAIN: RangeInclusive<u32> = 1..=15;

fn clamp_to<T: PartialOrd + Copy>(value: T, domain: &RangeInclusive<T>) -> T {
    if value < *domain.start() {
        *domain.start()
    } else if value > *domain.end() {
        *domain.end()
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Controls + events
// ---------------------------------------------------------------------------

/// Current slider values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Begin year (inclusive) and end year (exclusive).
    pub year_range: (i32, i32),
    /// Months per moving-average window.
    pub smoothing_window: usize,
    /// Years per folded cycle.
    pub cycle_years: u32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            year_range: (1850, 2000),
            smoothing_window: 12,
            cycle_years: 11,
        }
    }
}

impl Controls {
    /// Pull every value into its slider domain.
    ///
    /// An inverted year range is kept inverted; it renders as an empty chart.
    pub fn clamped(self) -> Self {
        Self {
            year_range: (
                clamp_to(self.year_range.0, &YEAR_DOMAIN),
                clamp_to(self.year_range.1, &YEAR_DOMAIN),
            ),
            smoothing_window: clamp_to(self.smoothing_window, &WINDOW_DOMAIN),
            cycle_years: clamp_to(self.cycle_years, &CYCLE_DOMAIN),
        }
    }
}

/// A single control-value change coming from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    YearRange(i32, i32),
    SmoothingWindow(usize),
    CycleLength(u32),
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct DashboardState {
    /// Loaded dataset, shared read-only with every transform call.
    dataset: Arc<SunspotDataset>,

    /// Where the dataset came from (shown in the top bar).
    pub source_label: String,

    controls: Controls,

    /// Raw + smoothed time series for the selected years.
    sunspot_chart: ChartSpec,

    /// Cycle-folded scatter.
    cycle_chart: ChartSpec,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether `status_message` came from a failed cycle recompute.
    cycle_failed: bool,
}

impl DashboardState {
    /// Bind a dataset and compute both charts for the initial controls.
    pub fn new(dataset: Arc<SunspotDataset>, source_label: String, controls: Controls) -> Self {
        let controls = controls.clamped();
        let (begin, end) = controls.year_range;
        let sunspot_chart = compute_range_smooth(&dataset, begin, end, controls.smoothing_window);
        let mut status_message = None;
        let cycle_chart = match compute_cycle_fold(&dataset, controls.cycle_years as f64) {
            Ok(chart) => chart,
            Err(e) => {
                status_message = Some(e.to_string());
                ChartSpec::new("Sunspot cycles", "Years into cycle", "Monthly mean total sunspot number")
            }
        };
        Self {
            dataset,
            source_label,
            controls,
            sunspot_chart,
            cycle_chart,
            cycle_failed: status_message.is_some(),
            status_message,
        }
    }

    pub fn dataset(&self) -> &SunspotDataset {
        &self.dataset
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn sunspot_chart(&self) -> &ChartSpec {
        &self.sunspot_chart
    }

    pub fn cycle_chart(&self) -> &ChartSpec {
        &self.cycle_chart
    }

    /// Apply one control change, recomputing only the chart that depends on it.
    ///
    /// Returns `true` when a chart was replaced. Values are clamped into their
    /// slider domain; a value equal to the current one is a no-op.
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        log::debug!("control event: {event:?}");
        match event {
            ControlEvent::YearRange(begin, end) => {
                let range = (clamp_to(begin, &YEAR_DOMAIN), clamp_to(end, &YEAR_DOMAIN));
                if range == self.controls.year_range {
                    return false;
                }
                self.controls.year_range = range;
                self.refresh_sunspot();
                true
            }
            ControlEvent::SmoothingWindow(window) => {
                let window = clamp_to(window, &WINDOW_DOMAIN);
                if window == self.controls.smoothing_window {
                    return false;
                }
                self.controls.smoothing_window = window;
                self.refresh_sunspot();
                true
            }
            ControlEvent::CycleLength(years) => {
                let years = clamp_to(years, &CYCLE_DOMAIN);
                if years == self.controls.cycle_years {
                    return false;
                }
                self.controls.cycle_years = years;
                self.refresh_cycle(years as f64)
            }
        }
    }

    /// Swap in a newly opened dataset and recompute both charts.
    pub fn replace_dataset(&mut self, dataset: Arc<SunspotDataset>, source_label: String) {
        self.dataset = dataset;
        self.source_label = source_label;
        self.clear_status();
        self.refresh_sunspot();
        self.refresh_cycle(self.controls.cycle_years as f64);
    }

    /// Show an error raised outside the chart recomputes (open, export).
    pub fn report_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.cycle_failed = false;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.cycle_failed = false;
    }

    fn refresh_sunspot(&mut self) {
        let (begin, end) = self.controls.year_range;
        self.sunspot_chart =
            compute_range_smooth(&self.dataset, begin, end, self.controls.smoothing_window);
    }

    /// On failure the previous chart stays on screen. Success only clears a
    /// status this recompute set itself; file and export errors stay.
    fn refresh_cycle(&mut self, cycle_years: f64) -> bool {
        match compute_cycle_fold(&self.dataset, cycle_years) {
            Ok(chart) => {
                self.cycle_chart = chart;
                if self.cycle_failed {
                    self.status_message = None;
                    self.cycle_failed = false;
                }
                true
            }
            Err(e) => {
                log::warn!("keeping previous cycle chart: {e}");
                self.status_message = Some(e.to_string());
                self.cycle_failed = true;
                false
            }
        }
    }
}
