//! Zero-based index newtypes shared by every crate in this workspace.
//!
//! Modelling each axis as its own type (rather than passing bare `u32`s
//! around) keeps a site index from being accidentally used where a sample
//! index is expected — the kind of mixup that is easy to make across the
//! builder/matcher boundary.
//!
//! A declarative macro is enough here: the index set is small and fixed (no
//! new coordinate types are ever added by a downstream user), so a
//! proc-macro crate would be ceremony without benefit.

use std::fmt;

pub mod allele;

macro_rules! index_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }

            #[must_use]
            pub fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<$name> for usize {
            fn from(value: $name) -> Self {
                value.0 as usize
            }
        }
    };
}

index_newtype!(
    /// Zero-based index into the sites axis, in genomic order.
    SiteId
);

index_newtype!(
    /// Zero-based index into the samples axis.
    SampleId
);

index_newtype!(
    /// Zero-based index into the reference panel's haplotype rows
    /// (`0..num_haplotypes`, which includes the two synthetic rows).
    HaplotypeIndex
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u32() {
        let s = SiteId::from(7u32);
        assert_eq!(u32::from(s), 7);
        assert_eq!(s.as_usize(), 7usize);
        assert_eq!(format!("{s}"), "7");
    }

    #[test]
    fn ordering_matches_wrapped_value() {
        let mut ids: Vec<SiteId> = vec![3, 1, 2].into_iter().map(SiteId::new).collect();
        ids.sort();
        assert_eq!(ids, vec![SiteId::new(1), SiteId::new(2), SiteId::new(3)]);
    }
}
