use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One row of a World Bank style long-format export.
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Country Name")]
    country_name: &'a str,
    #[serde(rename = "Country Code")]
    country_code: &'a str,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Indicator Name")]
    indicator_name: &'a str,
    #[serde(rename = "Indicator Code")]
    indicator_code: &'a str,
    #[serde(rename = "Value")]
    value: Option<f64>,
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

/// (name, code, value in first survey year, change per year, noise)
const INDICATORS: [(&str, &str, f64, f64, f64); 8] = [
    ("Gini index", "SI.POV.GINI", 32.5, 0.2, 0.6),
    ("Income share held by lowest 20%", "SI.DST.FRST.20", 8.0, -0.03, 0.15),
    ("Income share held by highest 20%", "SI.DST.05TH.20", 44.0, 0.15, 0.5),
    ("Income share held by highest 10%", "SI.DST.10TH.10", 28.5, 0.12, 0.4),
    (
        "Poverty headcount ratio at $2.15 a day (2017 PPP) (% of population)",
        "SI.POV.DDAY",
        9.5,
        -0.35,
        0.3,
    ),
    (
        "Poverty headcount ratio at national poverty lines (% of population)",
        "SI.POV.NAHC",
        28.0,
        -0.8,
        0.8,
    ),
    ("Poverty gap at $2.15 a day (2017 PPP) (%)", "SI.POV.GAPS", 1.8, -0.06, 0.08),
    (
        "Multidimensional poverty headcount ratio (% of total population)",
        "SI.POV.MDIM",
        22.0,
        -0.4,
        0.5,
    ),
];

/// Household income and expenditure survey years.
const SURVEY_YEARS: [i32; 10] = [1985, 1990, 1995, 2002, 2006, 2009, 2012, 2016, 2019, 2022];

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("poverty_lka_cleaned.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut rows = 0usize;
    for &(name, code, start, slope, noise) in &INDICATORS {
        for &year in &SURVEY_YEARS {
            // Some indicators were only surveyed recently; leave gaps.
            let value = if code == "SI.POV.MDIM" && year < 2009 {
                None
            } else if rng.next_f64() < 0.08 {
                None
            } else {
                let trend = start + slope * (year - SURVEY_YEARS[0]) as f64;
                Some((rng.gauss(trend, noise).max(0.0) * 10.0).round() / 10.0)
            };

            writer
                .serialize(Row {
                    country_name: "Sri Lanka",
                    country_code: "LKA",
                    year,
                    indicator_name: name,
                    indicator_code: code,
                    value,
                })
                .context("writing CSV row")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!(
        "Wrote {rows} observations ({} indicators × {} years) to {}",
        INDICATORS.len(),
        SURVEY_YEARS.len(),
        output_path.display()
    );
    Ok(())
}
