//! Observation container for OI-SVMVAR models.
//!
//! Purpose
//! -------
//! Hold the standardized T×n observation matrix produced by an upstream
//! data pipeline, together with its group sizes and optional variable names,
//! and validate it once so every engine can assume clean input.
//!
//! Key behaviors
//! -------------
//! - [`ObservationMatrix::new`] checks `ncols == nm + nu + nf`, finiteness of
//!   every entry, and the name count when names are supplied.
//! - [`ObservationMatrix::group_view`] exposes the columns of one
//!   [`VariableGroup`] without copying.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rows are time periods, columns are variables in
//!   `[macro] + [unclassified] + [financial]` order.
//! - The matrix is immutable after construction; there are no setters.
//! - Standardization (centering/scaling) happens upstream; this type does
//!   not record or undo it.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, column-count and name-count
//!   mismatches, NaN rejection, and group views.
use crate::svmvar::{
    core::{
        shape::{GroupSizes, VariableGroup},
        validation::validate_finite,
    },
    errors::{SVMVARError, SVMVARResult},
};
use ndarray::{Array2, ArrayView2, s};

/// Validated T×n observation matrix with its group layout.
///
/// Fields
/// ------
/// - `data`: `Array2<f64>`, T×n, all finite.
/// - `groups`: [`GroupSizes`] with `groups.n() == data.ncols()`.
/// - `names`: `Option<Vec<String>>`, one per column when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationMatrix {
    data: Array2<f64>,
    groups: GroupSizes,
    names: Option<Vec<String>>,
}

impl ObservationMatrix {
    /// Construct a validated observation matrix.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `Array2<f64>`
    ///   T×n matrix of standardized observations.
    /// - `groups`: [`GroupSizes`]
    ///   Group sizes; their sum must equal `data.ncols()`.
    /// - `names`: `Option<Vec<String>>`
    ///   Optional variable names in column order.
    ///
    /// Returns
    /// -------
    /// `SVMVARResult<ObservationMatrix>`
    ///
    /// Errors
    /// ------
    /// - `SVMVARError::ColumnCountMismatch` if `data.ncols() != groups.n()`.
    /// - `SVMVARError::NameCountMismatch` if names are given with the wrong
    ///   length.
    /// - `SVMVARError::NonFiniteData` for the first NaN/±inf entry.
    pub fn new(
        data: Array2<f64>, groups: GroupSizes, names: Option<Vec<String>>,
    ) -> SVMVARResult<Self> {
        let n = groups.n();
        if data.ncols() != n {
            return Err(SVMVARError::ColumnCountMismatch { expected: n, actual: data.ncols() });
        }
        if let Some(names) = &names {
            if names.len() != n {
                return Err(SVMVARError::NameCountMismatch { expected: n, actual: names.len() });
            }
        }
        validate_finite("observations", data.view())?;
        Ok(ObservationMatrix { data, groups, names })
    }

    /// Full T×n matrix.
    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn groups(&self) -> GroupSizes {
        self.groups
    }

    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Number of time periods T.
    pub fn t_len(&self) -> usize {
        self.data.nrows()
    }

    /// Number of variables n.
    pub fn n(&self) -> usize {
        self.data.ncols()
    }

    /// T×n_g view of the columns that belong to `group`.
    pub fn group_view(&self, group: VariableGroup) -> ArrayView2<'_, f64> {
        let r = self.groups.range(group);
        self.data.slice(s![.., r])
    }
}
