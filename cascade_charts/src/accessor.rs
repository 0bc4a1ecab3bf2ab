// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Config-time accessor resolution.
//!
//! Chart configuration names accessors either by field name or by callback.
//! The tagged variant is resolved once when the configuration is built into
//! a uniform `Fn(&R) -> T`, so the per-row layout loop never dispatches on
//! field names.

use std::sync::Arc;

use crate::error::ChartError;

/// Record types that can resolve a field name to a getter.
pub trait FieldLookup<T> {
    /// Returns the getter for `name`, or `None` when the record type has no
    /// such field of type `T`.
    fn field(name: &str) -> Option<fn(&Self) -> T>;
}

/// An accessor given either as a field name or as a callback.
pub enum AccessorSpec<R, T> {
    /// A field of the record, looked up by name at configuration build.
    Field(&'static str),
    /// An arbitrary callback.
    With(Arc<dyn Fn(&R) -> T>),
}

impl<R, T> AccessorSpec<R, T> {
    /// Creates a callback accessor.
    pub fn with(f: impl Fn(&R) -> T + 'static) -> Self {
        Self::With(Arc::new(f))
    }
}

impl<R: FieldLookup<T> + 'static, T: 'static> AccessorSpec<R, T> {
    /// Resolves this accessor into a uniform getter.
    ///
    /// Field names that the record type does not expose fail with
    /// [`ChartError::UnknownField`].
    pub fn resolve(&self) -> Result<Arc<dyn Fn(&R) -> T>, ChartError> {
        match self {
            Self::Field(name) => {
                let name = *name;
                let getter = R::field(name).ok_or(ChartError::UnknownField { field: name })?;
                Ok(Arc::new(move |record: &R| getter(record)))
            }
            Self::With(f) => Ok(f.clone()),
        }
    }
}

impl<R, T> Clone for AccessorSpec<R, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name),
            Self::With(f) => Self::With(f.clone()),
        }
    }
}

impl<R, T> core::fmt::Debug for AccessorSpec<R, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::With(_) => f.debug_tuple("With").field(&"<fn>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waterfall::CategoryRecord;

    #[test]
    fn field_accessor_resolves_known_record_fields() {
        let value: AccessorSpec<CategoryRecord, Option<f64>> = AccessorSpec::Field("value");
        let get = value.resolve().expect("value field should resolve");
        let row = CategoryRecord::new("Rent", -800.0);
        assert_eq!(get(&row), Some(-800.0));

        let name: AccessorSpec<CategoryRecord, String> = AccessorSpec::Field("name");
        let get = name.resolve().expect("name field should resolve");
        assert_eq!(get(&row), "Rent");
    }

    #[test]
    fn unknown_field_fails_at_resolution_time() {
        let bad: AccessorSpec<CategoryRecord, Option<f64>> = AccessorSpec::Field("amount");
        let err = bad.resolve().err().expect("expected resolution failure");
        assert_eq!(err, ChartError::UnknownField { field: "amount" });
    }

    #[test]
    fn callback_accessor_passes_through() {
        let spec: AccessorSpec<CategoryRecord, Option<f64>> =
            AccessorSpec::with(|r: &CategoryRecord| r.value.map(|v| v * 2.0));
        let get = spec.resolve().expect("callbacks always resolve");
        assert_eq!(get(&CategoryRecord::new("x", 3.0)), Some(6.0));
    }
}
