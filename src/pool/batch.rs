//! Batch projection over pooled instances

use rayon::prelude::*;
use serde_json::Value;
use smallvec::SmallVec;

use super::{InstancePool, ScopeToken};
use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::projector::Projection;

/// Positional arguments of one batch row
type RowArgs = SmallVec<[Value; 4]>;

/// Split a row into positional arguments, an array is a tuple
fn row_args(row: Value) -> RowArgs {
    match row {
        Value::Array(values) => values.into_iter().collect(),
        other => smallvec::smallvec![other],
    }
}

impl InstancePool {
    /// Project every row through `set`, reusing the shared instance for `scope`
    ///
    /// Each row is zipped with the type's initialization field order to build
    /// its options. Output has one projection per row, in input order.
    ///
    /// # Errors
    /// Stops at the first row that fails to initialize or project
    pub fn project_batch<T, I>(
        &self,
        descriptor: &TypeDescriptor<T>,
        scope: ScopeToken,
        set: &str,
        rows: I,
    ) -> Result<Vec<Projection>>
    where
        T: Default + Send + 'static,
        I: IntoIterator<Item = Value>,
    {
        rows.into_iter()
            .map(|row| {
                let options = descriptor.options_from_args(row_args(row));
                self.shared_project(descriptor, scope, options, set)
            })
            .collect()
    }

    /// Like [`project_batch`](Self::project_batch), spread over the rayon pool
    ///
    /// Every worker uses the shared instance of its own thread scope.
    pub fn project_batch_parallel<T>(
        &self,
        descriptor: &TypeDescriptor<T>,
        set: &str,
        rows: Vec<Value>,
    ) -> Result<Vec<Projection>>
    where
        T: Default + Send + 'static,
    {
        rows.into_par_iter()
            .map(|row| {
                let options = descriptor.options_from_args(row_args(row));
                self.shared_project(descriptor, ScopeToken::current_thread(), options, set)
            })
            .collect()
    }
}
