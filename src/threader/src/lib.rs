//! Li–Stephens HMM matcher: Viterbi decoding of a query haplotype against a
//! prefix of an immutable reference panel, yielding a copying path and the
//! residual mutations it implies.

mod error;
mod threader;
mod viterbi;

pub use error::ThreaderError;
pub use threader::Threader;

use refpanel::ReferencePanel;

/// Threads every haplotype in `haplotype_indices` against `panel`,
/// `panel_size` wide, independently and in parallel via `rayon`.
///
/// Safe to parallelize: distinct `Threader` instances over the same
/// immutable panel never interfere with one another.
pub fn thread_many(
    panel: &ReferencePanel,
    haplotype_indices: &[u32],
    panel_size: u32,
    recombination_rate: f64,
    error_probability: f64,
    algorithm: i32,
) -> Result<Vec<(Vec<u32>, Vec<u32>)>, ThreaderError> {
    use rayon::prelude::*;

    haplotype_indices
        .par_iter()
        .map(|&haplotype_index| {
            let mut threader = Threader::new(panel)?;
            let mut path = vec![0u32; panel.num_sites() as usize];
            let mutations = threader.run(
                haplotype_index,
                panel_size,
                recombination_rate,
                error_probability,
                &mut path,
                algorithm,
            )?;
            Ok((path, mutations))
        })
        .collect()
}
