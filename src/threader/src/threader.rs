use ids::{HaplotypeIndex, SiteId};
use refpanel::ReferencePanel;

use crate::error::ThreaderError;
use crate::viterbi::{argmin, emission_cost, renormalize, transition_costs, two_smallest};

/// No predecessor recorded — used for every state's column-0 entry, since
/// the Viterbi recursion has nothing to transition from at the first site.
const NO_PREDECESSOR: u32 = u32::MAX;

/// Runs Li–Stephens Viterbi decoding of one panel row against a prefix of
/// the same panel.
///
/// Owns a mutable traceback matrix `T` sized `(num_haplotypes, num_sites)`
/// that is fully overwritten by every [`Self::run`] call within the rows
/// touched by that call's `panel_size`; rows `>= panel_size` retain
/// whatever an earlier call left there. Multiple `Threader`s may share one
/// immutable [`ReferencePanel`]; a single `Threader` must not be driven by
/// two concurrent `run` calls.
pub struct Threader<'panel> {
    panel: &'panel ReferencePanel,
    /// Flattened `(num_haplotypes x num_sites)`, row-major: `[h * m + l]`.
    traceback: Vec<u32>,
    num_haplotypes: usize,
    num_sites: usize,
}

impl<'panel> Threader<'panel> {
    pub fn new(panel: &'panel ReferencePanel) -> Result<Self, ThreaderError> {
        let num_haplotypes = panel.num_haplotypes() as usize;
        let num_sites = panel.num_sites() as usize;
        let requested = num_haplotypes * num_sites;

        let mut traceback = Vec::new();
        traceback
            .try_reserve_exact(requested)
            .map_err(|_| ThreaderError::OutOfMemory { requested })?;
        traceback.resize(requested, NO_PREDECESSOR);

        Ok(Self { panel, traceback, num_haplotypes, num_sites })
    }

    #[must_use]
    pub fn panel(&self) -> &'panel ReferencePanel {
        self.panel
    }

    /// Read-only view of `T`, flattened `(num_haplotypes x num_sites)`
    /// row-major.
    #[must_use]
    pub fn traceback(&self) -> &[u32] {
        &self.traceback
    }

    /// `T`'s row for haplotype `h`: the predecessor chosen at each site the
    /// last time `run` touched that row.
    #[must_use]
    pub fn traceback_row(&self, h: HaplotypeIndex) -> &[u32] {
        let start = h.as_usize() * self.num_sites;
        &self.traceback[start..start + self.num_sites]
    }

    fn set_predecessor(&mut self, h: usize, l: usize, pred: u32) {
        self.traceback[h * self.num_sites + l] = pred;
    }

    fn predecessor(&self, h: usize, l: usize) -> u32 {
        self.traceback[h * self.num_sites + l]
    }

    /// `run(haplotype_index, panel_size, ρ, ε, out_path, algorithm) →
    /// mutations`.
    ///
    /// `haplotype_index` selects which panel row is threaded as the query;
    /// `panel_size` restricts the copying sources to the prefix
    /// `0..panel_size` of the panel — this is how a caller threads ancestor
    /// `i` against only the ancestors already placed before it. Only
    /// `algorithm == 0` (the full-matrix recursion) is implemented; other
    /// values are rejected rather than silently aliased to it, since no
    /// compressed variant exists in this implementation to guarantee
    /// identical output.
    pub fn run(
        &mut self,
        haplotype_index: u32,
        panel_size: u32,
        recombination_rate: f64,
        error_probability: f64,
        out_path: &mut [u32],
        algorithm: i32,
    ) -> Result<Vec<u32>, ThreaderError> {
        if algorithm != 0 {
            return Err(ThreaderError::UnsupportedAlgorithm(algorithm));
        }
        if haplotype_index >= self.panel.num_haplotypes() {
            return Err(ThreaderError::HaplotypeIndexOutOfRange {
                haplotype_index,
                num_haplotypes: self.panel.num_haplotypes(),
            });
        }
        if panel_size == 0 || panel_size > self.panel.num_haplotypes() {
            return Err(ThreaderError::PanelSizeOutOfRange {
                panel_size,
                num_haplotypes: self.panel.num_haplotypes(),
            });
        }
        if out_path.len() != self.num_sites {
            return Err(ThreaderError::PathLengthMismatch {
                expected: self.panel.num_sites(),
                actual: out_path.len(),
            });
        }
        if !(error_probability > 0.0 && error_probability < 0.5) {
            return Err(ThreaderError::InvalidErrorProbability(error_probability));
        }
        if !(recombination_rate > 0.0) {
            return Err(ThreaderError::InvalidRecombinationRate(recombination_rate));
        }

        let panel_size = panel_size as usize;
        let m = self.num_sites;
        let query = self.panel.row(HaplotypeIndex::new(haplotype_index));

        let mut cost = vec![0.0f64; panel_size];
        for h in 0..panel_size {
            let allele = self.panel.allele(HaplotypeIndex::new(h as u32), SiteId::new(0));
            cost[h] = emission_cost(allele, query[0], error_probability);
            self.set_predecessor(h, 0, NO_PREDECESSOR);
        }
        renormalize(&mut cost);

        for l in 1..m {
            let gap = self.panel.site_gap(SiteId::new(l as u32));
            let (cost_stay, cost_switch) = transition_costs(recombination_rate, gap, panel_size);
            let (idx1, min1, idx2, min2) = two_smallest(&cost);

            let mut next_cost = vec![0.0f64; panel_size];
            for h in 0..panel_size {
                let (other_idx, other_val) = if h == idx1 { (idx2, min2) } else { (idx1, min1) };

                let stay_total = cost[h] + cost_stay;
                let switch_total = other_val + cost_switch;

                let pred = if stay_total < switch_total {
                    h
                } else if switch_total < stay_total {
                    other_idx
                } else {
                    h.min(other_idx)
                };
                let total = stay_total.min(switch_total);

                let allele = self.panel.allele(HaplotypeIndex::new(h as u32), SiteId::new(l as u32));
                next_cost[h] = total + emission_cost(allele, query[l], error_probability);
                self.set_predecessor(h, l, pred as u32);
            }

            renormalize(&mut next_cost);
            cost = next_cost;
        }

        let best = argmin(&cost);
        out_path[m - 1] = best as u32;
        for l in (1..m).rev() {
            out_path[l - 1] = self.predecessor(out_path[l] as usize, l);
        }

        let mutations = (0..m)
            .filter_map(|l| {
                let h = out_path[l];
                let allele = self.panel.allele(HaplotypeIndex::new(h), SiteId::new(l as u32));
                (allele != query[l]).then_some(l as u32)
            })
            .collect();

        log::debug!(
            "threaded haplotype {haplotype_index} against panel_size={panel_size}: {} mutations",
            out_path.len()
        );

        Ok(mutations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_identity() -> ReferencePanel {
        // 2 samples, 4 sites, no recombination signal needed for this test.
        let haps = vec![1, 0, 1, 0, 1, 0, 1, 0];
        let positions = vec![1.0, 2.0, 3.0, 4.0];
        ReferencePanel::new(&haps, 2, 4, &positions, 10.0).unwrap()
    }

    #[test]
    fn identity_query_copies_itself_with_no_mutations() {
        let panel = panel_identity();
        let mut threader = Threader::new(&panel).unwrap();
        let mut path = vec![0u32; 4];
        let mutations =
            threader.run(0, panel.num_haplotypes(), 1e-8, 1e-8, &mut path, 0).unwrap();
        assert_eq!(path, vec![0, 0, 0, 0]);
        assert!(mutations.is_empty());
    }

    #[test]
    fn forced_switch_at_a_differing_middle_site() {
        // Two copying sources (rows 0, 1) disagree at every site; the query
        // (row 2, excluded from the panel_size=2 copying prefix) matches row
        // 0 in the first half and row 1 in the second. With a tiny
        // recombination rate the optimal path switches exactly once, at the
        // boundary.
        let haps = vec![
            0, 0, 0, 0, // row 0: all-ancestral
            1, 1, 1, 1, // row 1: all-derived
            0, 0, 1, 1, // row 2: query, first half of row 0, second half of row 1
        ];
        let positions = vec![1.0, 2.0, 3.0, 4.0];
        let panel = ReferencePanel::new(&haps, 3, 4, &positions, 10.0).unwrap();

        let mut threader = Threader::new(&panel).unwrap();
        let mut path = vec![0u32; 4];
        let mutations = threader.run(2, 2, 1e-6, 1e-8, &mut path, 0).unwrap();

        assert_eq!(path[0], 0);
        assert_eq!(*path.last().unwrap(), 1);
        assert!(mutations.is_empty());
        // Exactly one switch, at the halfway boundary.
        let switches = path.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(switches, 1);
    }

    #[test]
    fn path_entries_are_always_within_panel_size() {
        let panel = panel_identity();
        let mut threader = Threader::new(&panel).unwrap();
        let mut path = vec![0u32; 4];
        threader.run(0, 2, 1e-4, 1e-3, &mut path, 0).unwrap();
        assert!(path.iter().all(|&h| h < 2));
    }

    #[test]
    fn rejects_out_of_range_haplotype_index() {
        let panel = panel_identity();
        let mut threader = Threader::new(&panel).unwrap();
        let mut path = vec![0u32; 4];
        let err = threader.run(99, 2, 1e-8, 1e-8, &mut path, 0).unwrap_err();
        assert!(matches!(err, ThreaderError::HaplotypeIndexOutOfRange { .. }));
    }

    #[test]
    fn rejects_path_length_mismatch() {
        let panel = panel_identity();
        let mut threader = Threader::new(&panel).unwrap();
        let mut path = vec![0u32; 3];
        let err = threader.run(0, 2, 1e-8, 1e-8, &mut path, 0).unwrap_err();
        assert!(matches!(err, ThreaderError::PathLengthMismatch { .. }));
    }

    #[test]
    fn rejects_unsupported_algorithm_variant() {
        let panel = panel_identity();
        let mut threader = Threader::new(&panel).unwrap();
        let mut path = vec![0u32; 4];
        let err = threader.run(0, 2, 1e-8, 1e-8, &mut path, 7).unwrap_err();
        assert!(matches!(err, ThreaderError::UnsupportedAlgorithm(7)));
    }

    #[test]
    fn determinism_across_repeated_runs() {
        let panel = panel_identity();
        let mut threader = Threader::new(&panel).unwrap();
        let mut path_a = vec![0u32; 4];
        let mut path_b = vec![0u32; 4];
        let mutations_a = threader.run(0, 2, 1e-6, 1e-8, &mut path_a, 0).unwrap();
        let mutations_b = threader.run(0, 2, 1e-6, 1e-8, &mut path_b, 0).unwrap();
        assert_eq!(path_a, path_b);
        assert_eq!(mutations_a, mutations_b);
    }
}
