use arena::BlockAllocator;
use ids::{allele, SampleId, SiteId};
use pattern_map::OrderedPatternMap;

use crate::consensus;
use crate::descriptor::AncestorDescriptor;
use crate::error::AncestorsError;
use crate::site::Site;

/// Entry point of the ancestor-synthesis pipeline: `init`/`add_site`/
/// `finalise`/`make_ancestor`, in that order.
///
/// `Builder` borrows its arena rather than owning it. An owning design would
/// make the builder self-referential (it would hold both the arena and
/// references into it), which requires `unsafe`; instead the caller
/// constructs the arena and hands the builder a borrow of it for its whole
/// working lifetime. One arena per builder, dropped together, is a caller
/// convention rather than a literal `Drop` impl.
pub struct Builder<'arena> {
    arena: &'arena BlockAllocator,
    num_samples: u32,
    num_sites: u32,
    flags: u32,
    sites: Vec<Site<'arena>>,
    buckets: Vec<OrderedPatternMap<'arena>>,
    descriptors: Vec<AncestorDescriptor>,
    finalised: bool,
}

impl<'arena> Builder<'arena> {
    /// `init(num_samples, num_sites, flags)`.
    ///
    /// `flags` is accepted and stored for interface parity with future
    /// callers but is otherwise unused — no builder-level flag is defined
    /// today.
    pub fn init(
        arena: &'arena BlockAllocator,
        num_samples: u32,
        num_sites: u32,
        flags: u32,
    ) -> Result<Self, AncestorsError> {
        if num_samples < 2 {
            return Err(AncestorsError::TooFewSamples(num_samples));
        }
        let sites = vec![Site::absent(0); num_sites as usize];
        let buckets = (0..=num_samples).map(|_| OrderedPatternMap::new()).collect();
        Ok(Self {
            arena,
            num_samples,
            num_sites,
            flags,
            sites,
            buckets,
            descriptors: Vec::with_capacity(num_sites as usize),
            finalised: false,
        })
    }

    #[must_use]
    pub fn num_samples(&self) -> u32 {
        self.num_samples
    }

    #[must_use]
    pub fn num_sites(&self) -> u32 {
        self.num_sites
    }

    #[must_use]
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// `add_site(site_id, frequency, genotypes)`.
    ///
    /// Calling this twice for the same `site_id`, or after [`Self::finalise`],
    /// is undefined; this implementation does not guard against it beyond
    /// the checks already required for fresh insertion.
    pub fn add_site(
        &mut self,
        site_id: u32,
        frequency: u32,
        genotypes: &[u8],
    ) -> Result<(), AncestorsError> {
        if site_id >= self.num_sites {
            return Err(AncestorsError::SiteOutOfRange { site_id, num_sites: self.num_sites });
        }
        if frequency > self.num_samples {
            return Err(AncestorsError::FrequencyOutOfRange {
                frequency,
                num_samples: self.num_samples,
            });
        }
        if genotypes.len() != self.num_samples as usize {
            return Err(AncestorsError::GenotypesLengthMismatch {
                expected: self.num_samples,
                actual: genotypes.len(),
            });
        }
        for (sample, &value) in genotypes.iter().enumerate() {
            if value != allele::ANCESTRAL && value != allele::DERIVED {
                return Err(AncestorsError::InvalidAllele { sample: sample as u32, value });
            }
        }

        if frequency <= 1 {
            self.sites[site_id as usize] = Site::absent(frequency);
            return Ok(());
        }

        let bucket = &mut self.buckets[frequency as usize];
        let handle = bucket.insert(genotypes, self.arena)?;
        bucket.entry_mut(handle).push_site(SiteId::new(site_id));
        let canonical = bucket.entry(handle).genotypes();
        self.sites[site_id as usize] = Site::patterned(frequency, canonical);
        Ok(())
    }

    /// `finalise()`. Walks buckets `num_samples` down to `2`, each in the
    /// pattern map's natural key order, emitting one descriptor per site in
    /// ascending `SiteId` order within each entry.
    pub fn finalise(&mut self) -> Result<(), AncestorsError> {
        self.descriptors.clear();
        for frequency in (2..=self.num_samples).rev() {
            let bucket = &self.buckets[frequency as usize];
            for (_key, entry) in bucket.iter_ordered() {
                for site in entry.sites_ascending() {
                    self.descriptors.push(AncestorDescriptor { frequency, focal_sites: vec![site] });
                }
            }
        }
        self.finalised = true;
        Ok(())
    }

    #[must_use]
    pub fn descriptors(&self) -> &[AncestorDescriptor] {
        &self.descriptors
    }

    /// `make_ancestor(focal_sites, out) -> (start, end)`: synthesizes an
    /// ancestor by propagating consensus alleles outward from the focal
    /// site(s) until eviction leaves too few samples to form a majority.
    ///
    /// Only the single-focal-site policy is implemented; `focal_sites` must
    /// have length 1.
    pub fn make_ancestor(
        &self,
        focal_sites: &[u32],
        out: &mut [i8],
    ) -> Result<(u32, u32), AncestorsError> {
        if !self.finalised {
            return Err(AncestorsError::NotFinalised);
        }
        if focal_sites.len() != 1 {
            return Err(AncestorsError::NotSingleFocalSite(focal_sites.len()));
        }
        if out.len() != self.num_sites as usize {
            return Err(AncestorsError::OutBufferLengthMismatch {
                expected: self.num_sites,
                actual: out.len(),
            });
        }

        let focal = SiteId::new(focal_sites[0]);
        if focal.get() >= self.num_sites {
            return Err(AncestorsError::SiteOutOfRange { site_id: focal.get(), num_sites: self.num_sites });
        }

        let focal_site = self.sites[focal.as_usize()];
        let f_star = focal_site.frequency;
        let genotypes =
            focal_site.genotypes.ok_or(AncestorsError::UnknownFocalSite(focal.get()))?;

        out.fill(allele::to_i8(allele::UNKNOWN));
        out[focal.as_usize()] = allele::to_i8(allele::DERIVED);

        let initial_set: Vec<SampleId> = (0..self.num_samples)
            .map(SampleId::new)
            .filter(|&s| genotypes[s.as_usize()] == allele::DERIVED)
            .collect();
        let threshold = f_star / 2;

        let right_order: Vec<SiteId> = ((focal.get() + 1)..self.num_sites)
            .map(SiteId::new)
            .filter(|&l| self.sites[l.as_usize()].frequency > f_star)
            .collect();
        let mut right_set = initial_set.clone();
        let last_right = consensus::compute_older_sites(
            &self.sites,
            self.num_samples,
            &mut right_set,
            &right_order,
            threshold,
            focal,
            out,
        );
        for l in (focal.get() + 1)..last_right.get() {
            if self.sites[l as usize].frequency <= f_star {
                out[l as usize] = allele::to_i8(allele::ANCESTRAL);
            }
        }
        let end = last_right.get() + 1;

        let left_order: Vec<SiteId> =
            (0..focal.get()).rev().map(SiteId::new).filter(|&l| self.sites[l.as_usize()].frequency > f_star).collect();
        let mut left_set = initial_set;
        let last_left = consensus::compute_older_sites(
            &self.sites,
            self.num_samples,
            &mut left_set,
            &left_order,
            threshold,
            focal,
            out,
        );
        for l in (last_left.get() + 1)..focal.get() {
            if self.sites[l as usize].frequency <= f_star {
                out[l as usize] = allele::to_i8(allele::ANCESTRAL);
            }
        }
        let start = last_left.get();

        Ok((start, end))
    }

    /// Convenience wrapper around repeated [`Self::make_ancestor`] calls,
    /// one per finalised descriptor, fanned out across `rayon`'s global pool.
    ///
    /// Safe to parallelize: each call reads only immutable builder state and
    /// writes into its own output buffer, and the builder is not mutated
    /// once finalised.
    pub fn make_ancestors_parallel(&self) -> Result<Vec<(Vec<i8>, u32, u32)>, AncestorsError> {
        use rayon::prelude::*;

        if !self.finalised {
            return Err(AncestorsError::NotFinalised);
        }

        self.descriptors
            .par_iter()
            .map(|descriptor| {
                let mut out = vec![allele::to_i8(allele::UNKNOWN); self.num_sites as usize];
                let focal_sites: Vec<u32> = descriptor.focal_sites.iter().map(|s| s.get()).collect();
                let (start, end) = self.make_ancestor(&focal_sites, &mut out)?;
                Ok((out, start, end))
            })
            .collect()
    }
}
