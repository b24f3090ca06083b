//! Minimal whitespace-separated file formats for the demo CLI. Real
//! ingestion (VCF, tree-sequence stores, etc.) is an external collaborator
//! per the core's scope and is not reimplemented here.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use located_error::LocatedError;

/// One parsed line of a `--genotypes` file: `site_id frequency g0 .. gN-1`.
pub struct GenotypeRecord {
    pub site_id: u32,
    pub frequency: u32,
    pub genotypes: Vec<u8>,
}

pub fn read_genotypes(path: &Path) -> Result<Vec<GenotypeRecord>> {
    let contents = fs::read_to_string(path)
        .with_loc(|| format!("failed to read genotypes file {}", path.display()))?;

    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.split_whitespace();
            let site_id: u32 = fields
                .next()
                .context("missing site_id column")?
                .parse()
                .context("site_id must be an integer")?;
            let frequency: u32 = fields
                .next()
                .context("missing frequency column")?
                .parse()
                .context("frequency must be an integer")?;
            let genotypes = fields
                .map(|g| g.parse::<u8>().context("genotype entries must be 0 or 1"))
                .collect::<Result<Vec<u8>>>()?;
            Ok(GenotypeRecord { site_id, frequency, genotypes })
        })
        .collect()
}

pub fn read_panel_matrix(path: &Path) -> Result<(Vec<u8>, u32, u32)> {
    let contents = fs::read_to_string(path)
        .with_loc(|| format!("failed to read panel file {}", path.display()))?;

    let rows: Vec<Vec<u8>> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split_whitespace()
                .map(|g| g.parse::<u8>().context("panel entries must be 0 or 1"))
                .collect::<Result<Vec<u8>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let num_samples = rows.len() as u32;
    let num_sites = rows.first().map_or(0, Vec::len) as u32;
    let flat = rows.into_iter().flatten().collect();
    Ok((flat, num_samples, num_sites))
}

pub fn read_positions(path: &Path) -> Result<Vec<f64>> {
    let contents = fs::read_to_string(path)
        .with_loc(|| format!("failed to read positions file {}", path.display()))?;

    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim().parse::<f64>().context("position must be a real number"))
        .collect()
}

pub fn write_lines(path: &Path, lines: impl IntoIterator<Item = String>) -> Result<()> {
    let body = lines.into_iter().collect::<Vec<_>>().join("\n");
    fs::write(path, body).with_loc(|| format!("failed to write {}", path.display()))
}
