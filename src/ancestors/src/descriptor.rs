use ids::SiteId;

/// Produced by [`crate::Builder::finalise`]: the derived-allele frequency
/// shared by all focal sites, and the focal sites themselves.
///
/// With the current policy every descriptor carries exactly one focal site;
/// `focal_sites` is kept as a `Vec` (rather than a single field) so a future
/// multi-focal-site policy can widen it without changing the public shape.
#[derive(Debug, Clone)]
pub struct AncestorDescriptor {
    pub frequency: u32,
    pub focal_sites: Vec<SiteId>,
}
