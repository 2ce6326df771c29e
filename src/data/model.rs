// ---------------------------------------------------------------------------
// Observation – one monthly record
// ---------------------------------------------------------------------------

/// Source encoding for a month without a usable total.
pub const MISSING_SENTINEL: f64 = -1.0;

/// A single monthly sunspot record (one row of the source file).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub year: i32,
    /// 1–12.
    pub month: u8,
    /// Year plus elapsed fraction of the year, e.g. `1749.042`.
    pub fractional_date: f64,
    pub monthly_total: f64,
    pub standard_deviation: f64,
    /// Early records carry `-1` here, hence signed.
    pub num_observations: i64,
    pub provisional: bool,
}

impl Observation {
    /// Whether the monthly total is the "missing" sentinel.
    pub fn is_missing(&self) -> bool {
        self.monthly_total == MISSING_SENTINEL
    }
}

// ---------------------------------------------------------------------------
// SunspotDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset, in file order. Never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct SunspotDataset {
    observations: Vec<Observation>,
}

impl SunspotDataset {
    /// Wrap already-validated observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        SunspotDataset { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of monthly records.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First and last calendar year present, if any.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some((first.year, last.year))
    }

    /// Count of months whose total is the missing sentinel.
    pub fn missing_count(&self) -> usize {
        self.observations.iter().filter(|o| o.is_missing()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// One observation per month starting at January of `start_year`,
    /// with the given totals.
    pub(crate) fn monthly(start_year: i32, totals: &[f64]) -> SunspotDataset {
        let observations = totals
            .iter()
            .enumerate()
            .map(|(i, &total)| {
                let year = start_year + (i / 12) as i32;
                let month = (i % 12) as u8 + 1;
                Observation {
                    year,
                    month,
                    fractional_date: year as f64 + (month as f64 - 0.5) / 12.0,
                    monthly_total: total,
                    standard_deviation: 1.0,
                    num_observations: 10,
                    provisional: false,
                }
            })
            .collect();
        SunspotDataset::from_observations(observations)
    }

    #[test]
    fn year_bounds_and_missing() {
        let ds = monthly(1800, &[5.0, MISSING_SENTINEL, 7.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(ds.len(), 13);
        assert_eq!(ds.year_bounds(), Some((1800, 1801)));
        assert_eq!(ds.missing_count(), 1);
        assert!(ds.observations()[1].is_missing());
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = SunspotDataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds(), None);
    }
}
