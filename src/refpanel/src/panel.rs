use ids::{allele, HaplotypeIndex, SiteId};

use crate::error::RefPanelError;

/// Immutable reference panel: the observed haplotypes plus two synthetic
/// anchor rows, and the site positions padded with two virtual boundaries.
///
/// Constructed once per inference run and never mutated afterwards — there
/// is no `&mut` method on `ReferencePanel` at all, so any number of
/// [`threader::Threader`](../threader)s may hold a shared reference (or
/// `Arc`) to the same panel concurrently.
#[derive(Debug)]
pub struct ReferencePanel {
    num_samples: u32,
    num_sites: u32,
    sequence_length: f64,
    /// Row-major `(num_haplotypes x num_sites)`.
    haplotypes: Vec<u8>,
    /// Length `num_sites + 2`; indices `0` and `num_sites + 1` are virtual
    /// boundaries at `0.0` and `sequence_length`.
    positions: Vec<f64>,
}

impl ReferencePanel {
    /// Build a panel from `num_samples x num_sites` observed haplotypes
    /// (row-major) and `num_sites` real-valued positions.
    ///
    /// Appends two synthetic rows (all-ancestral, all-derived) and pads
    /// `positions` with virtual boundaries at `0.0` and `sequence_length`.
    pub fn new(
        haplotypes: &[u8],
        num_samples: u32,
        num_sites: u32,
        positions: &[f64],
        sequence_length: f64,
    ) -> Result<Self, RefPanelError> {
        if num_samples == 0 {
            return Err(RefPanelError::TooFewSamples(num_samples));
        }
        if num_sites == 0 {
            return Err(RefPanelError::TooFewSites(num_sites));
        }

        let expected_matrix_len = num_samples as usize * num_sites as usize;
        if haplotypes.len() != expected_matrix_len {
            return Err(RefPanelError::HaplotypeMatrixShapeMismatch {
                expected: expected_matrix_len,
                actual: haplotypes.len(),
            });
        }
        if positions.len() != num_sites as usize {
            return Err(RefPanelError::PositionsLengthMismatch {
                expected: num_sites as usize,
                actual: positions.len(),
            });
        }
        let monotonic = positions.first().is_some_and(|&p| p >= 0.0)
            && positions.windows(2).all(|w| w[0] < w[1]);
        if !monotonic {
            return Err(RefPanelError::PositionsNotMonotonic);
        }
        if *positions.last().expect("non-empty, checked above") >= sequence_length {
            return Err(RefPanelError::SequenceLengthTooSmall);
        }

        let num_sites_usize = num_sites as usize;
        let mut matrix = Vec::with_capacity((num_samples as usize + 2) * num_sites_usize);
        matrix.extend_from_slice(haplotypes);
        matrix.extend(std::iter::repeat(allele::ANCESTRAL).take(num_sites_usize));
        matrix.extend(std::iter::repeat(allele::DERIVED).take(num_sites_usize));

        let mut padded_positions = Vec::with_capacity(num_sites_usize + 2);
        padded_positions.push(0.0);
        padded_positions.extend_from_slice(positions);
        padded_positions.push(sequence_length);

        log::debug!(
            "built reference panel: {num_samples} samples, {num_sites} sites, \
             sequence_length={sequence_length}"
        );

        Ok(Self { num_samples, num_sites, sequence_length, haplotypes: matrix, positions: padded_positions })
    }

    #[must_use]
    pub fn num_samples(&self) -> u32 {
        self.num_samples
    }

    #[must_use]
    pub fn num_sites(&self) -> u32 {
        self.num_sites
    }

    /// `num_samples + 2` (the two synthetic anchor rows).
    #[must_use]
    pub fn num_haplotypes(&self) -> u32 {
        self.num_samples + 2
    }

    #[must_use]
    pub fn sequence_length(&self) -> f64 {
        self.sequence_length
    }

    /// Index of the synthetic all-ancestral haplotype.
    #[must_use]
    pub fn ancestral_row(&self) -> HaplotypeIndex {
        HaplotypeIndex::new(self.num_samples)
    }

    /// Index of the synthetic all-derived haplotype.
    #[must_use]
    pub fn derived_row(&self) -> HaplotypeIndex {
        HaplotypeIndex::new(self.num_samples + 1)
    }

    /// Full `(num_haplotypes x num_sites)` matrix, row-major.
    #[must_use]
    pub fn get_haplotypes(&self) -> &[u8] {
        &self.haplotypes
    }

    /// The allele row for haplotype `h`.
    #[must_use]
    pub fn row(&self, h: HaplotypeIndex) -> &[u8] {
        let start = h.as_usize() * self.num_sites as usize;
        &self.haplotypes[start..start + self.num_sites as usize]
    }

    /// The allele at `(h, site)`.
    #[must_use]
    pub fn allele(&self, h: HaplotypeIndex, site: SiteId) -> u8 {
        self.haplotypes[h.as_usize() * self.num_sites as usize + site.as_usize()]
    }

    /// Padded positions, length `num_sites + 2`.
    #[must_use]
    pub fn get_positions(&self) -> &[f64] {
        &self.positions
    }

    /// Physical distance between `site` and the preceding site (or the left
    /// virtual boundary, for `site == 0`) — `positions[l+1] - positions[l]`
    /// in the padded array.
    #[must_use]
    pub fn site_gap(&self, site: SiteId) -> f64 {
        let l = site.as_usize();
        self.positions[l + 1] - self.positions[l]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> ReferencePanel {
        // 2 samples, 3 sites.
        let haps = vec![1, 0, 1, 0, 1, 0];
        let positions = vec![10.0, 20.0, 30.0];
        ReferencePanel::new(&haps, 2, 3, &positions, 100.0).unwrap()
    }

    #[test]
    fn appends_synthetic_anchor_rows() {
        let panel = toy();
        assert_eq!(panel.num_haplotypes(), 4);
        assert_eq!(panel.row(panel.ancestral_row()), &[0, 0, 0]);
        assert_eq!(panel.row(panel.derived_row()), &[1, 1, 1]);
        // Original rows preserved.
        assert_eq!(panel.row(HaplotypeIndex::new(0)), &[1, 0, 1]);
        assert_eq!(panel.row(HaplotypeIndex::new(1)), &[0, 1, 0]);
    }

    #[test]
    fn pads_positions_with_virtual_boundaries() {
        let panel = toy();
        assert_eq!(panel.get_positions(), &[0.0, 10.0, 20.0, 30.0, 100.0]);
    }

    #[test]
    fn site_gap_uses_padded_offsets() {
        let panel = toy();
        assert!((panel.site_gap(SiteId::new(0)) - 10.0).abs() < 1e-9);
        assert!((panel.site_gap(SiteId::new(1)) - 10.0).abs() < 1e-9);
        assert!((panel.site_gap(SiteId::new(2)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_shape_mismatch() {
        let haps = vec![1, 0, 1, 0, 1]; // one short
        let positions = vec![10.0, 20.0, 30.0];
        let err = ReferencePanel::new(&haps, 2, 3, &positions, 100.0).unwrap_err();
        assert!(matches!(err, RefPanelError::HaplotypeMatrixShapeMismatch { .. }));
    }

    #[test]
    fn rejects_non_monotonic_positions() {
        let haps = vec![1, 0, 1, 0, 1, 0];
        let positions = vec![10.0, 5.0, 30.0];
        let err = ReferencePanel::new(&haps, 2, 3, &positions, 100.0).unwrap_err();
        assert!(matches!(err, RefPanelError::PositionsNotMonotonic));
    }

    #[test]
    fn rejects_sequence_length_not_past_last_site() {
        let haps = vec![1, 0, 1, 0, 1, 0];
        let positions = vec![10.0, 20.0, 30.0];
        let err = ReferencePanel::new(&haps, 2, 3, &positions, 30.0).unwrap_err();
        assert!(matches!(err, RefPanelError::SequenceLengthTooSmall));
    }
}
