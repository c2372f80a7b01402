//! Time-varying classification of the unclassified series.
//!
//! Each unclassified series `i` is, at each period `t`, driven either by the
//! macro or by the financial common factor. [`ClassificationPath`] stores
//! that assignment as a dense nu×T table: every `(i, t)` pair is resolvable
//! and no persistence across `t` or synchronization across `i` is assumed.
use crate::svmvar::errors::{SVMVARError, SVMVARResult};
use ndarray::{Array2, ArrayView2};

/// Common factor assigned to an unclassified series at one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Macro,
    Financial,
}

impl Regime {
    /// Decode an integer label: 0 = macro, 1 = financial.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Regime::Macro),
            1 => Some(Regime::Financial),
            _ => None,
        }
    }

    /// Integer label of the regime (0 = macro, 1 = financial).
    pub fn code(self) -> i64 {
        match self {
            Regime::Macro => 0,
            Regime::Financial => 1,
        }
    }

    /// Column of the regime's factor in the T×2 common-factor matrix `h`.
    pub fn factor_index(self) -> usize {
        match self {
            Regime::Macro => 0,
            Regime::Financial => 1,
        }
    }
}

/// Dense nu×T table of regime labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationPath {
    labels: Array2<Regime>,
}

impl ClassificationPath {
    /// Wrap an nu×T table of labels.
    pub fn new(labels: Array2<Regime>) -> Self {
        ClassificationPath { labels }
    }

    /// Decode an nu×T table of integer codes.
    ///
    /// # Errors
    /// - [`SVMVARError::UnknownRegimeCode`] for the first code other than 0
    ///   or 1, reported with its series index and period.
    pub fn from_codes(codes: ArrayView2<i64>) -> SVMVARResult<Self> {
        let mut labels = Array2::from_elem(codes.dim(), Regime::Macro);
        for ((series, t), &code) in codes.indexed_iter() {
            labels[[series, t]] =
                Regime::from_code(code).ok_or(SVMVARError::UnknownRegimeCode { series, t, code })?;
        }
        Ok(ClassificationPath { labels })
    }

    /// Every series assigned to `regime` in every one of `t_len` periods.
    pub fn constant(nu: usize, t_len: usize, regime: Regime) -> Self {
        ClassificationPath { labels: Array2::from_elem((nu, t_len), regime) }
    }

    /// Regime of unclassified series `i` at period `t`.
    ///
    /// # Panics
    /// If `(i, t)` is out of bounds.
    pub fn regime(&self, i: usize, t: usize) -> Regime {
        self.labels[[i, t]]
    }

    pub fn labels(&self) -> ArrayView2<'_, Regime> {
        self.labels.view()
    }

    /// nu×T integer codes (0 = macro, 1 = financial).
    pub fn to_codes(&self) -> Array2<i64> {
        self.labels.mapv(Regime::code)
    }

    /// Number of unclassified series.
    pub fn nu(&self) -> usize {
        self.labels.nrows()
    }

    /// Number of periods.
    pub fn t_len(&self) -> usize {
        self.labels.ncols()
    }

    /// Number of `(i, t)` pairs labelled `regime`.
    pub fn count(&self, regime: Regime) -> usize {
        self.labels.iter().filter(|&&r| r == regime).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Integer codes decode per (i, t) and round-trip.
    //
    // Given
    // -----
    // - codes = [[0, 1, 0], [1, 1, 0]] (nu = 2, T = 3).
    //
    // Expect
    // ------
    // - regime(0, 1) = Financial, regime(1, 2) = Macro; 3 of each label.
    fn from_codes_decodes_each_pair() {
        let codes = array![[0_i64, 1, 0], [1, 1, 0]];

        let path = ClassificationPath::from_codes(codes.view()).unwrap();

        assert_eq!((path.nu(), path.t_len()), (2, 3));
        assert_eq!(path.regime(0, 1), Regime::Financial);
        assert_eq!(path.regime(1, 2), Regime::Macro);
        assert_eq!(path.count(Regime::Macro), 3);
        assert_eq!(path.to_codes(), codes);
    }

    #[test]
    // Purpose
    // -------
    // Unknown codes fail instead of defaulting to a regime.
    //
    // Given
    // -----
    // - codes = [[0, 2]].
    //
    // Expect
    // ------
    // - `UnknownRegimeCode { series: 0, t: 1, code: 2 }`.
    fn from_codes_rejects_unknown_code() {
        let codes = array![[0_i64, 2]];

        let err = ClassificationPath::from_codes(codes.view()).unwrap_err();

        assert_eq!(err, SVMVARError::UnknownRegimeCode { series: 0, t: 1, code: 2 });
    }
}
