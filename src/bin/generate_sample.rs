use std::path::PathBuf;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use sundash::data::loader::load_file;

const FIRST_YEAR: i32 = 1749;
const LAST_YEAR: i32 = 2020;
/// Mean length of a solar cycle in years.
const CYCLE_YEARS: f64 = 11.0;
/// Before this year the source has no per-month uncertainty or counts.
const FIRST_COUNTED_YEAR: i32 = 1818;

/// Synthetic monthly total: a squared-sine envelope per cycle whose peak
/// height drifts slowly, plus noise. Never negative.
fn monthly_total(fractional_date: f64, rng: &mut SimpleRng) -> f64 {
    let phase = (fractional_date - FIRST_YEAR as f64).rem_euclid(CYCLE_YEARS) / CYCLE_YEARS;
    let cycle_no = ((fractional_date - FIRST_YEAR as f64) / CYCLE_YEARS).floor();
    let peak = 120.0 + 60.0 * (cycle_no * 0.9).sin();
    let envelope = (std::f64::consts::PI * phase).sin().powi(2);
    (peak * envelope + rng.gauss(0.0, 8.0 + 0.1 * peak * envelope)).max(0.0)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("SN_m_tot_V2.0.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let total_months = (LAST_YEAR - FIRST_YEAR + 1) * 12;
    let mut rows = 0;
    for year in FIRST_YEAR..=LAST_YEAR {
        for month in 1..=12u32 {
            let fractional_date = year as f64 + (month as f64 - 0.5) / 12.0;
            let total = monthly_total(fractional_date, &mut rng);
            let (std_dev, observations) = if year < FIRST_COUNTED_YEAR {
                (-1.0, -1)
            } else {
                (2.0 + total.sqrt(), 20 + (rng.next_u64() % 30) as i64)
            };
            // the last six months are still provisional
            let provisional = rows >= total_months - 6;

            writer.write_record([
                format!("{year}"),
                format!("{month:02}"),
                format!("{fractional_date:.3}"),
                format!("{total:6.1}"),
                format!("{std_dev:5.1}"),
                format!("{observations:5}"),
                if provisional { "1" } else { "0" }.to_string(),
            ])?;
            rows += 1;
        }
    }
    writer.flush().context("flushing sample data")?;
    drop(writer);

    // Read it back through the real loader so a bad sample never ships.
    let dataset = load_file(&output_path)?;
    println!(
        "Wrote {} monthly observations ({FIRST_YEAR}–{LAST_YEAR}) to {}",
        dataset.len(),
        output_path.display()
    );
    Ok(())
}
