//! Allele encoding shared by the ancestor builder and the reference panel:
//! a small integer taking values `{0, 1, -1}`, where `-1` denotes unknown,
//! stored as an unsigned byte with `-1` encoded as `0xFF`.

/// Sentinel byte used to represent "unknown" in arena/panel storage.
pub const UNKNOWN: u8 = 0xFF;

/// Derived (variant) allele.
pub const DERIVED: u8 = 1;

/// Ancestral (reference) allele.
pub const ANCESTRAL: u8 = 0;

/// Convert a stored allele byte to the signed `{0, 1, -1}` representation
/// used at the external (i8) interface boundary.
#[must_use]
pub fn to_i8(allele: u8) -> i8 {
    if allele == UNKNOWN {
        -1
    } else {
        allele as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_and_unknown() {
        assert_eq!(to_i8(UNKNOWN), -1);
        assert_eq!(to_i8(ANCESTRAL), 0);
        assert_eq!(to_i8(DERIVED), 1);
    }
}
