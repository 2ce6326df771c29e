use super::model::{Observation, SunspotDataset};

// ---------------------------------------------------------------------------
// Year-interval selection
// ---------------------------------------------------------------------------

/// Return the contiguous run of observations with `begin <= year < end`.
///
/// Rows are ordered by fractional date and the loader guarantees
/// `year == floor(fractional_date)`, so years are non-decreasing and the
/// selection is a slice found by binary search.
///
/// * `begin >= end` → empty slice (inverted ranges are not an error)
pub fn select_years(dataset: &SunspotDataset, begin: i32, end: i32) -> &[Observation] {
    if begin >= end {
        return &[];
    }
    let obs = dataset.observations();
    let start = obs.partition_point(|o| o.year < begin);
    let stop = obs.partition_point(|o| o.year < end);
    &obs[start..stop]
}
