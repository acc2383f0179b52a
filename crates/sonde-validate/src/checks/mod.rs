//! Concrete profile checks.

pub mod interpolation;

pub use interpolation::InterpolationCheck;
