// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Library error type.

use thiserror::Error;

/// Errors surfaced by layout and configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A row referenced a category with no assigned column geometry.
    #[error("no column geometry assigned for category {name:?}")]
    UnknownColumn {
        /// The unresolved category name.
        name: String,
    },
    /// An accessor named a field the record type does not expose.
    #[error("unknown accessor field {field:?}")]
    UnknownField {
        /// The unresolved field name.
        field: &'static str,
    },
}
