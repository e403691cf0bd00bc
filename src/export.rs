use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use ising_sim::SpinGrid;

/// Write `grid` as `size` lines of `size` comma-separated ±1 values, row-major,
/// without a header.
pub fn write_csv(grid: &SpinGrid, path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in grid.rows() {
        writer.write_record(row.iter().map(|s| s.to_string()))?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
