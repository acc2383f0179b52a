//! Named per-level sequences for a single profile.

use std::collections::BTreeMap;

use crate::error::{ProfileError, Result};
use crate::names::{self, ValueKind};

/// Sentinel stored for a missing float value.
pub const MISSING_FLOAT: f32 = -3.368_795_3e38;

/// Sentinel stored for a missing integer value.
pub const MISSING_INT: i32 = -2_147_483_643;

/// Freezing point of water (K), used for Celsius diagnostics.
pub const T0C: f32 = 273.15;

/// Element types the handler can store.
pub trait ProfileValue: Copy + PartialEq + std::fmt::Debug + 'static {
    const KIND: ValueKind;

    fn store(data: &ProfileDataHandler) -> &BTreeMap<String, Vec<Self>>;

    fn store_mut(data: &mut ProfileDataHandler) -> &mut BTreeMap<String, Vec<Self>>;

    fn missing() -> Self;
}

impl ProfileValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn store(data: &ProfileDataHandler) -> &BTreeMap<String, Vec<Self>> {
        &data.floats
    }

    fn store_mut(data: &mut ProfileDataHandler) -> &mut BTreeMap<String, Vec<Self>> {
        &mut data.floats
    }

    fn missing() -> Self {
        MISSING_FLOAT
    }
}

impl ProfileValue for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn store(data: &ProfileDataHandler) -> &BTreeMap<String, Vec<Self>> {
        &data.ints
    }

    fn store_mut(data: &mut ProfileDataHandler) -> &mut BTreeMap<String, Vec<Self>> {
        &mut data.ints
    }

    fn missing() -> Self {
        MISSING_INT
    }
}

/// Owner of every named sequence of one profile.
///
/// Cross-variable length equality is not enforced here; each check verifies
/// the lengths of the sequences it reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDataHandler {
    floats: BTreeMap<String, Vec<f32>>,
    ints: BTreeMap<String, Vec<i32>>,
}

impl ProfileDataHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of a sequence.
    pub fn get<T: ProfileValue>(&self, name: &str) -> Result<&[T]> {
        match T::store(self).get(name) {
            Some(values) => Ok(values.as_slice()),
            None => Err(self.missing_error::<T>(name)),
        }
    }

    /// Mutable access to a sequence.
    pub fn get_mut<T: ProfileValue>(&mut self, name: &str) -> Result<&mut Vec<T>> {
        if !T::store(self).contains_key(name) {
            return Err(self.missing_error::<T>(name));
        }
        T::store_mut(self)
            .get_mut(name)
            .ok_or_else(|| ProfileError::not_found(name))
    }

    /// Store `values` under `name`, replacing any previous sequence.
    pub fn set<T: ProfileValue>(&mut self, name: impl Into<String>, values: Vec<T>) {
        T::store_mut(self).insert(name.into(), values);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.floats.contains_key(name) || self.ints.contains_key(name)
    }

    /// All variable names with their element type, sorted by name.
    pub fn names(&self) -> Vec<(&str, ValueKind)> {
        let mut all: Vec<(&str, ValueKind)> = self
            .floats
            .keys()
            .map(|name| (name.as_str(), ValueKind::Float))
            .chain(self.ints.keys().map(|name| (name.as_str(), ValueKind::Int)))
            .collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty() && self.ints.is_empty()
    }

    /// Create the flag, correction and counter sequences the checks update,
    /// leaving any that already exist untouched.
    pub fn initialise_derived(&mut self, num_levels: usize) {
        self.ints
            .entry(names::QC_T_FLAGS.to_string())
            .or_insert_with(|| vec![0; num_levels]);
        self.floats
            .entry(names::T_OBS_CORRECTION.to_string())
            .or_insert_with(|| vec![0.0; num_levels]);
        for counter in names::COUNTERS {
            self.ints
                .entry((*counter).to_string())
                .or_insert_with(|| vec![0]);
        }
    }

    /// First element of a single-element counter sequence.
    pub fn counter(&self, name: &str) -> Result<i32> {
        let values = self.get::<i32>(name)?;
        values
            .first()
            .copied()
            .ok_or_else(|| ProfileError::not_found(name))
    }

    fn missing_error<T: ProfileValue>(&self, name: &str) -> ProfileError {
        let other_kind = match T::KIND {
            ValueKind::Float => self.ints.contains_key(name).then_some(ValueKind::Int),
            ValueKind::Int => self.floats.contains_key(name).then_some(ValueKind::Float),
        };
        match other_kind {
            Some(actual) => ProfileError::WrongKind {
                name: name.to_string(),
                actual: actual.as_str(),
                requested: T::KIND.as_str(),
            },
            None => ProfileError::not_found(name),
        }
    }
}
