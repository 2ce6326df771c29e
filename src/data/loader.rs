use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::DataError;
use super::model::{Observation, SunspotDataset};

/// Columns per row, in positional order:
/// year; month; fractional date; monthly total; std deviation; observations; provisional.
const FIELD_COUNT: usize = 7;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the monthly sunspot table from a semicolon-separated file.
///
/// The layout is the one published by SILSO (`SN_m_tot_V2.0.csv`): no header,
/// space-padded fields, e.g.
///
/// ```text
/// 1749;01;1749.042;  96.7; -1.0;   -1;1
/// ```
///
/// Loading is all-or-nothing: the first bad row aborts with
/// [`DataError::MalformedRow`].
pub fn load_file(path: &Path) -> Result<SunspotDataset, DataError> {
    let file = File::open(path).map_err(|source| DataError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse(file, path)?;
    log::info!(
        "Loaded {} monthly observations from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Load from any reader, e.g. an in-memory buffer.
pub fn load_reader<R: Read>(reader: R) -> Result<SunspotDataset, DataError> {
    parse(reader, Path::new("<reader>"))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse<R: Read>(reader: R, source: &Path) -> Result<SunspotDataset, DataError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut observations: Vec<Observation> = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(e, source))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let obs = parse_record(&record, line)?;

        if let Some(prev) = observations.last() {
            if obs.fractional_date <= prev.fractional_date {
                return Err(DataError::MalformedRow {
                    line,
                    reason: format!(
                        "fractional date {} does not follow {}",
                        obs.fractional_date, prev.fractional_date
                    ),
                });
            }
        }
        observations.push(obs);
    }

    Ok(SunspotDataset::from_observations(observations))
}

fn parse_record(record: &StringRecord, line: u64) -> Result<Observation, DataError> {
    if record.len() != FIELD_COUNT {
        return Err(DataError::MalformedRow {
            line,
            reason: format!("expected {FIELD_COUNT} fields, found {}", record.len()),
        });
    }

    let year: i32 = field(record, 0, "year", line)?;
    let month: u8 = field(record, 1, "month", line)?;
    let fractional_date = finite_field(record, 2, "fractional_date", line)?;
    let monthly_total = finite_field(record, 3, "monthly_total", line)?;
    let standard_deviation = finite_field(record, 4, "standard_deviation", line)?;
    let num_observations: i64 = field(record, 5, "num_observations", line)?;
    let provisional = match &record[6] {
        "1" => true,
        "0" => false,
        other => {
            return Err(DataError::MalformedRow {
                line,
                reason: format!("provisional_flag: '{other}' is not 0 or 1"),
            })
        }
    };

    if !(1..=12).contains(&month) {
        return Err(DataError::MalformedRow {
            line,
            reason: format!("month {month} is outside 1-12"),
        });
    }
    if fractional_date.floor() as i32 != year {
        return Err(DataError::MalformedRow {
            line,
            reason: format!("fractional date {fractional_date} does not lie in year {year}"),
        });
    }

    Ok(Observation {
        year,
        month,
        fractional_date,
        monthly_total,
        standard_deviation,
        num_observations,
        provisional,
    })
}

fn field<T: FromStr>(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<T, DataError> {
    let raw = &record[idx];
    raw.parse::<T>().map_err(|_| DataError::MalformedRow {
        line,
        reason: format!("{name}: '{raw}' is not a valid number"),
    })
}

/// `NaN` and `inf` parse as `f64` but would poison every window they touch.
fn finite_field(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<f64, DataError> {
    let value: f64 = field(record, idx, name, line)?;
    if !value.is_finite() {
        return Err(DataError::MalformedRow {
            line,
            reason: format!("{name}: '{}' is not a finite number", &record[idx]),
        });
    }
    Ok(value)
}

fn csv_error(err: csv::Error, source: &Path) -> DataError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(io) => DataError::DataUnavailable {
            path: source.to_path_buf(),
            source: io,
        },
        other => DataError::MalformedRow {
            line,
            reason: format!("{other:?}"),
        },
    }
}

// ---------------------------------------------------------------------------
// Process-lifetime cache
// ---------------------------------------------------------------------------

/// Loads the dataset at `path` once and hands out shared references.
///
/// Racing first callers block on the same mutex, so at most one load runs.
/// A failed load leaves the cache empty and the next call tries again.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    slot: Mutex<Option<Arc<SunspotDataset>>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            slot: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached dataset, loading it on first use.
    pub fn get(&self) -> Result<Arc<SunspotDataset>, DataError> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(ds) = slot.as_ref() {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_file(&self.path)?);
        *slot = Some(Arc::clone(&ds));
        Ok(ds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Barrier;
    use std::thread;

    const SAMPLE: &str = "\
1749;01;1749.042;  96.7; -1.0;   -1;1
1749;02;1749.123; 104.3; -1.0;   -1;1
1749;03;1749.204; 116.7; -1.0;   -1;1
1749;04;1749.288;  92.8; -1.0;   -1;1
";

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn malformed_line(result: Result<SunspotDataset, DataError>) -> u64 {
        match result {
            Err(DataError::MalformedRow { line, .. }) => line,
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn loads_all_rows_in_order() {
        let file = write_temp(SAMPLE);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 4);
        let obs = ds.observations();
        assert_eq!(obs[0].year, 1749);
        assert_eq!(obs[0].month, 1);
        assert_eq!(obs[0].fractional_date, 1749.042);
        assert_eq!(obs[0].monthly_total, 96.7);
        assert_eq!(obs[0].standard_deviation, -1.0);
        assert_eq!(obs[0].num_observations, -1);
        assert!(obs[0].provisional);
        let months: Vec<u8> = obs.iter().map(|o| o.month).collect();
        assert_eq!(months, vec![1, 2, 3, 4]);
    }

    #[test]
    fn first_row_is_data_not_header() {
        let ds = load_reader("2000;06;2000.455; 120.1;  8.2;  900;0\n".as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert!(!ds.observations()[0].provisional);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "1749;01;1749.042;96.7;-1.0;-1;1\n\n1749;02;1749.123;104.3;-1.0;-1;1\n";
        assert_eq!(load_reader(text.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        match load_file(&path) {
            Err(DataError::DataUnavailable { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let text = "1749;01;1749.042;96.7;-1.0;-1;1\n1749;02;1749.123;104.3\n";
        assert_eq!(malformed_line(load_reader(text.as_bytes())), 2);
    }

    #[test]
    fn unparsable_number_is_malformed() {
        let text = "1749;01;1749.042;abc;-1.0;-1;1\n";
        assert_eq!(malformed_line(load_reader(text.as_bytes())), 1);
    }

    #[test]
    fn non_finite_values_are_malformed() {
        let nan_total = "1749;01;1749.042;NaN;-1.0;-1;1\n";
        assert_eq!(malformed_line(load_reader(nan_total.as_bytes())), 1);

        let inf_total = "1749;01;1749.042;5.0;-1.0;-1;1\n1749;02;1749.123;inf;-1.0;-1;1\n";
        assert_eq!(malformed_line(load_reader(inf_total.as_bytes())), 2);

        let nan_std_dev = "1749;01;1749.042;5.0;NaN;-1;1\n";
        assert_eq!(malformed_line(load_reader(nan_std_dev.as_bytes())), 1);

        let inf_date = "1749;01;inf;5.0;-1.0;-1;1\n";
        assert_eq!(malformed_line(load_reader(inf_date.as_bytes())), 1);
    }

    #[test]
    fn month_out_of_range_is_malformed() {
        let text = "1749;13;1749.042;96.7;-1.0;-1;1\n";
        assert_eq!(malformed_line(load_reader(text.as_bytes())), 1);
    }

    #[test]
    fn non_increasing_dates_are_malformed() {
        let text = "1749;02;1749.123;96.7;-1.0;-1;1\n1749;01;1749.042;104.3;-1.0;-1;1\n";
        assert_eq!(malformed_line(load_reader(text.as_bytes())), 2);
    }

    #[test]
    fn year_must_match_fractional_date() {
        let text = "1750;01;1749.042;96.7;-1.0;-1;1\n";
        assert_eq!(malformed_line(load_reader(text.as_bytes())), 1);
    }

    #[test]
    fn bad_provisional_flag_is_malformed() {
        let text = "1749;01;1749.042;96.7;-1.0;-1;yes\n";
        assert_eq!(malformed_line(load_reader(text.as_bytes())), 1);
    }

    #[test]
    fn cache_loads_once_under_concurrent_access() {
        let file = write_temp(SAMPLE);
        let cache = Arc::new(DatasetCache::new(file.path()));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get().unwrap()
                })
            })
            .collect();

        let loaded: Vec<Arc<SunspotDataset>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        for ds in &loaded[1..] {
            assert!(Arc::ptr_eq(&loaded[0], ds));
        }
        assert_eq!(loaded[0].len(), 4);
    }

    #[test]
    fn cache_retries_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let cache = DatasetCache::new(&path);
        assert!(cache.get().is_err());

        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(cache.get().unwrap().len(), 4);
    }
}
