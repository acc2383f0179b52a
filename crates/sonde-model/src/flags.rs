//! Per-level QC flag bits.
//!
//! Each check ORs its own bit into the shared bitmask; bits set by other
//! checks are never cleared.

/// Level reported at the surface rather than in the free atmosphere.
pub const SURFACE_LEVEL: i32 = 1 << 1;

/// Level failed the interpolation consistency check.
pub const INTERPOLATION: i32 = 1 << 3;

pub fn has_flag(value: i32, bit: i32) -> bool {
    value & bit != 0
}

/// Names of the bits set in `value`, for diagnostics.
pub fn flag_names(value: i32) -> Vec<&'static str> {
    let mut names = Vec::new();
    if has_flag(value, SURFACE_LEVEL) {
        names.push("SurfaceLevel");
    }
    if has_flag(value, INTERPOLATION) {
        names.push("Interpolation");
    }
    names
}
