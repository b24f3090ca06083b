use ids::{allele, SampleId, SiteId};

use crate::site::Site;

/// Walks `older_sites` in the order given (ascending for the rightward
/// extension, descending for the leftward one), shrinking `working_set` by
/// the two-strike disagreement rule as it goes. Returns the last site whose
/// consensus was actually recorded, or `anchor` (the focal site) if no site
/// in `older_sites` survived long enough to be recorded.
///
/// `threshold` is `floor(f* / 2)` computed once by the caller from the
/// *original* working-set size; it does not shrink alongside the working
/// set as samples are evicted.
pub(crate) fn compute_older_sites(
    sites: &[Site<'_>],
    num_samples: u32,
    working_set: &mut Vec<SampleId>,
    older_sites: &[SiteId],
    threshold: u32,
    anchor: SiteId,
    out: &mut [i8],
) -> SiteId {
    let mut disagree = vec![false; num_samples as usize];
    let mut last_site = anchor;

    for &l in older_sites {
        let genotypes = sites[l.as_usize()]
            .genotypes
            .expect("an older site (frequency > f*) always carries a genotype pattern");

        let ones: u32 = working_set.iter().map(|&u| genotypes[u.as_usize()] as u32).sum();
        let zeros = working_set.len() as u32 - ones;
        let consensus: u8 = if ones >= zeros { allele::DERIVED } else { allele::ANCESTRAL };

        working_set.retain(|&u| {
            let two_strikes = disagree[u.as_usize()] && genotypes[u.as_usize()] != consensus;
            !two_strikes
        });

        if working_set.len() as u32 <= threshold {
            break;
        }

        out[l.as_usize()] = consensus as i8;
        last_site = l;

        for &u in working_set.iter() {
            disagree[u.as_usize()] = genotypes[u.as_usize()] != consensus;
        }
    }

    last_site
}
