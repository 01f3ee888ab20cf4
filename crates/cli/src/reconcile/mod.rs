// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Attach coverage and build warnings to the aggregated report.
//!
//! Coverage and warnings are keyed by build target and source file, the
//! report by test module and suite. Both reconcilers bridge the two naming
//! schemes with ordered cascades of name predicates; misses are logged and
//! counted, never errors.

pub mod coverage;
pub mod warnings;

pub use coverage::{CoverageStats, normalize_target_name, reconcile_coverage};
pub use warnings::{WarningIndex, WarningStats, normalize_message, reconcile_warnings};

/// Diagnostic counters from both reconcilers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub coverage: CoverageStats,
    pub warnings: WarningStats,
}
