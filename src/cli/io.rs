// Sample loading and generation.

use std::path::Path;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Reads one column of floats from a CSV file.
///
/// `column` is a header name, or a 0-based index; `None` picks the first column.
pub fn load_csv_column(
    path: &Path,
    has_header: bool,
    column: Option<&str>,
) -> anyhow::Result<Vec<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open CSV {}", path.display()))?;

    let col_idx = match column {
        None => 0,
        Some(sel) => match sel.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) if has_header => {
                let headers = rdr
                    .headers()
                    .with_context(|| format!("failed to read CSV headers from {}", path.display()))?;
                match headers.iter().position(|h| h == sel) {
                    Some(idx) => idx,
                    None => bail!("column {sel:?} not found in {}", path.display()),
                }
            }
            Err(_) => bail!("column {sel:?} is not an index and the file has no header"),
        },
    };

    let mut values = Vec::new();
    for (row_idx, rec) in rdr.records().enumerate() {
        let row_num = row_idx + 1;
        let rec = rec.with_context(|| format!("failed to read CSV record at row {row_num}"))?;
        let Some(raw) = rec.get(col_idx) else {
            bail!(
                "row {row_num} has {} fields; column index {col_idx} out of range",
                rec.len()
            );
        };
        let parsed: f64 = raw.parse().with_context(|| {
            format!("failed to parse float at row {row_num}, column {col_idx}: raw={raw:?}")
        })?;
        values.push(parsed);
    }

    if values.is_empty() {
        bail!("no observations found in {}", path.display());
    }
    Ok(values)
}

/// Draws `n` observations from Normal(`mu`, `sigma`) with a seeded RNG.
pub fn generate_normal(n: usize, mu: f64, sigma: f64, seed: u64) -> anyhow::Result<Vec<f64>> {
    if n == 0 {
        bail!("--generate must be >= 1");
    }
    let normal = Normal::new(mu, sigma)
        .with_context(|| format!("invalid Normal parameters mu={mu}, sigma={sigma}"))?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..n).map(|_| normal.sample(&mut rng)).collect())
}
