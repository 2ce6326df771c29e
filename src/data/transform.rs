use super::chart::{ChartSpec, Series, SeriesKind};
use super::error::DataError;
use super::filter::select_years;
use super::model::SunspotDataset;

pub const TOTAL_SERIES: &str = "Total";
pub const SMOOTHED_SERIES: &str = "Smoothed";

// ---------------------------------------------------------------------------
// Range + moving average
// ---------------------------------------------------------------------------

/// Raw and smoothed monthly totals for `begin_year <= year < end_year`.
///
/// The smoothed series is a trailing mean over `window` selected rows. A
/// point exists only once a full window has been seen, so it is
/// `window - 1` points shorter than the raw series and is empty when the
/// window exceeds the selection. Each mean sits at the x of its last row.
/// A window of 0 behaves as 1.
pub fn compute_range_smooth(
    dataset: &SunspotDataset,
    begin_year: i32,
    end_year: i32,
    window: usize,
) -> ChartSpec {
    let window = window.max(1);
    let selection = select_years(dataset, begin_year, end_year);

    let total: Vec<[f64; 2]> = selection
        .iter()
        .map(|o| [o.fractional_date, o.monthly_total])
        .collect();

    let smoothed: Vec<[f64; 2]> = total
        .windows(window)
        .map(|w| {
            let mean = w.iter().map(|p| p[1]).sum::<f64>() / window as f64;
            [w[window - 1][0], mean]
        })
        .collect();

    ChartSpec::new("Sunspot activity", "Year", "Monthly mean total sunspot number")
        .with_series(Series::new(TOTAL_SERIES, SeriesKind::Line, total))
        .with_series(Series::new(SMOOTHED_SERIES, SeriesKind::Line, smoothed))
}

// ---------------------------------------------------------------------------
// Cycle fold
// ---------------------------------------------------------------------------

/// Fold every observation onto `[0, cycle_years)` by its fractional date.
///
/// Points keep dataset order; they are meant to be drawn as a scatter.
pub fn compute_cycle_fold(dataset: &SunspotDataset, cycle_years: f64) -> Result<ChartSpec, DataError> {
    if !(cycle_years > 0.0) || !cycle_years.is_finite() {
        return Err(DataError::InvalidCycle(cycle_years));
    }

    let points: Vec<[f64; 2]> = dataset
        .observations()
        .iter()
        .map(|o| [phase(o.fractional_date, cycle_years), o.monthly_total])
        .collect();

    Ok(
        ChartSpec::new("Sunspot cycles", "Years into cycle", "Monthly mean total sunspot number")
            .with_series(Series::new(TOTAL_SERIES, SeriesKind::Scatter, points)),
    )
}

fn phase(date: f64, cycle: f64) -> f64 {
    let p = date.rem_euclid(cycle);
    // rem_euclid may round up to `cycle` for tiny negative inputs
    if p >= cycle {
        0.0
    } else {
        p
    }
}
