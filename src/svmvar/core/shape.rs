//! Model configuration for OI-SVMVAR: variable groups and lag orders.
//!
//! Columns of every observation-sized object are ordered
//! `[macro (nm)] + [unclassified (nu)] + [financial (nf)]`. Lag orders:
//! - `p`: VAR lags on `y` (B₁…B_p), at least 1.
//! - `q`: volatility-in-mean lags on `h` (A₀…A_q, so `q + 1` matrices).
//! - `ph`: own lags of the common factors in the `h` equation (Φ₁…Φ_ph).
//! - `py`: lags of `y` in the `h` equation (Ψ₁…Ψ_py).
use crate::svmvar::errors::{SVMVARError, SVMVARResult};
use std::ops::Range;

/// The three variable groups of the observation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableGroup {
    Macro,
    Unclassified,
    Financial,
}

/// Sizes of the macro, unclassified and financial groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSizes {
    pub nm: usize,
    pub nu: usize,
    pub nf: usize,
}

impl GroupSizes {
    /// Construct group sizes; at least one group must be non-empty.
    ///
    /// # Errors
    /// - [`SVMVARError::EmptyModel`] if `nm + nu + nf == 0`.
    pub fn new(nm: usize, nu: usize, nf: usize) -> SVMVARResult<Self> {
        if nm + nu + nf == 0 {
            return Err(SVMVARError::EmptyModel);
        }
        Ok(GroupSizes { nm, nu, nf })
    }

    /// Total number of variables `n = nm + nu + nf`.
    pub fn n(&self) -> usize {
        self.nm + self.nu + self.nf
    }

    /// Number of variables in `group`.
    pub fn size(&self, group: VariableGroup) -> usize {
        match group {
            VariableGroup::Macro => self.nm,
            VariableGroup::Unclassified => self.nu,
            VariableGroup::Financial => self.nf,
        }
    }

    /// Column range of `group` within the observation vector.
    pub fn range(&self, group: VariableGroup) -> Range<usize> {
        match group {
            VariableGroup::Macro => 0..self.nm,
            VariableGroup::Unclassified => self.nm..self.nm + self.nu,
            VariableGroup::Financial => self.nm + self.nu..self.n(),
        }
    }

    /// Group that owns observation column `col`, or `None` if out of range.
    pub fn group_of(&self, col: usize) -> Option<VariableGroup> {
        [VariableGroup::Macro, VariableGroup::Unclassified, VariableGroup::Financial]
            .into_iter()
            .find(|&g| self.range(g).contains(&col))
    }
}

/// Dimensions and lag orders of an OI-SVMVAR(p, q; ph, py).
///
/// Invariants
/// ----------
/// - `n = nm + nu + nf ≥ 1`.
/// - `p ≥ 1`; `q`, `ph`, `py` may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SVMVARShape {
    pub groups: GroupSizes,
    pub p: usize,
    pub q: usize,
    pub ph: usize,
    pub py: usize,
}

impl SVMVARShape {
    /// Lag orders used by the reference application.
    pub const DEFAULT_P: usize = 6;
    pub const DEFAULT_Q: usize = 2;
    pub const DEFAULT_PH: usize = 2;
    pub const DEFAULT_PY: usize = 1;

    /// Construct and validate a model shape.
    ///
    /// # Arguments
    /// - `groups`: variable group sizes.
    /// - `p`: VAR lag order (≥ 1).
    /// - `q`: highest volatility-in-mean lag (A₀…A_q).
    /// - `ph`, `py`: lag orders of the common-factor equation.
    ///
    /// # Errors
    /// - [`SVMVARError::InvalidLagOrder`] if `p == 0`.
    pub fn new(groups: GroupSizes, p: usize, q: usize, ph: usize, py: usize) -> SVMVARResult<Self> {
        if p == 0 {
            return Err(SVMVARError::InvalidLagOrder {
                name: "p",
                value: p,
                reason: "the VAR needs at least one lag",
            });
        }
        Ok(SVMVARShape { groups, p, q, ph, py })
    }

    /// Shape with the reference lag orders `p = 6, q = 2, ph = 2, py = 1`.
    pub fn with_default_lags(groups: GroupSizes) -> SVMVARResult<Self> {
        Self::new(groups, Self::DEFAULT_P, Self::DEFAULT_Q, Self::DEFAULT_PH, Self::DEFAULT_PY)
    }

    /// Number of observed variables.
    pub fn n(&self) -> usize {
        self.groups.n()
    }

    /// First period with a non-zero VAR mean, `max(p, q)`.
    pub fn mean_burn_in(&self) -> usize {
        self.p.max(self.q)
    }

    /// First period with a non-zero common-factor mean, `max(ph, py)`.
    pub fn h_burn_in(&self) -> usize {
        self.ph.max(self.py)
    }

    /// Number of free contemporaneous parameters, `n(n − 1)/2`.
    pub fn n_impact_params(&self) -> usize {
        let n = self.n();
        n * (n - 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Group ranges tile `0..n` in macro, unclassified, financial order.
    //
    // Given
    // -----
    // - nm = 2, nu = 1, nf = 3.
    //
    // Expect
    // ------
    // - Ranges 0..2, 2..3, 3..6 and `group_of` agrees with them.
    fn group_ranges_follow_column_order() {
        let g = GroupSizes::new(2, 1, 3).unwrap();

        assert_eq!(g.n(), 6);
        assert_eq!(g.range(VariableGroup::Macro), 0..2);
        assert_eq!(g.range(VariableGroup::Unclassified), 2..3);
        assert_eq!(g.range(VariableGroup::Financial), 3..6);
        assert_eq!(g.group_of(2), Some(VariableGroup::Unclassified));
        assert_eq!(g.group_of(5), Some(VariableGroup::Financial));
        assert_eq!(g.group_of(6), None);
    }

    #[test]
    // Purpose
    // -------
    // Construction guards and the reference defaults.
    //
    // Given
    // -----
    // - Empty groups; p = 0; `with_default_lags` on n = 4.
    //
    // Expect
    // ------
    // - `EmptyModel`, `InvalidLagOrder`, and (6, 2, 2, 1) with burn-ins 6 / 2.
    fn shape_validates_and_applies_defaults() {
        let g = GroupSizes::new(2, 1, 1).unwrap();

        assert_eq!(GroupSizes::new(0, 0, 0), Err(SVMVARError::EmptyModel));
        assert!(matches!(
            SVMVARShape::new(g, 0, 1, 1, 1),
            Err(SVMVARError::InvalidLagOrder { name: "p", .. })
        ));

        let shape = SVMVARShape::with_default_lags(g).unwrap();
        assert_eq!((shape.p, shape.q, shape.ph, shape.py), (6, 2, 2, 1));
        assert_eq!(shape.mean_burn_in(), 6);
        assert_eq!(shape.h_burn_in(), 2);
        assert_eq!(shape.n_impact_params(), 6);
    }
}
