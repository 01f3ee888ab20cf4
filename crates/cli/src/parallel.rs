// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Order-preserving parallel map on a bounded rayon pool.
//!
//! Every item runs to completion even when another one fails; the first
//! failure in input order is returned and no partial results escape.

use rayon::prelude::*;

use crate::error::{Error, Result};

/// A bounded worker pool for fallible fan-out.
pub struct TaskGroup {
    pool: rayon::ThreadPool,
}

impl TaskGroup {
    /// Pool with `jobs` workers, or one per CPU when `None`.
    pub fn new(jobs: Option<usize>) -> Result<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = jobs {
            if jobs == 0 {
                return Err(Error::Argument("--jobs must be at least 1".to_string()));
            }
            builder = builder.num_threads(jobs);
        }
        let pool = builder
            .thread_name(|i| format!("xcreport-{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("failed to start worker pool: {e}")))?;
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Apply `task` to every item, returning results in input order.
    ///
    /// A task that panics fails the group with an internal error.
    pub fn map_ordered<T, R, F>(&self, items: Vec<T>, task: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Sync,
    {
        let mut tagged: Vec<(usize, Result<R>)> = self.pool.install(|| {
            items
                .into_par_iter()
                .enumerate()
                .map(|(index, item)| {
                    let outcome =
                        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| task(item)))
                            .unwrap_or_else(|_| {
                                Err(Error::Internal(format!("task {index} panicked")))
                            });
                    (index, outcome)
                })
                .collect()
        });

        tagged.sort_by_key(|(index, _)| *index);
        tagged.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

#[cfg(test)]
#[path = "parallel_tests.rs"]
mod tests;
