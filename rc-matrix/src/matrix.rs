use std::{collections::BTreeMap, fmt};

use common::{Error, Result};
use nalgebra::{DMatrix, Dim};
use nanorand::{Rng, WyRand};

use crate::spectral;

/// Dense 2-D grid of `f64` values.
/// The shape never changes after construction and every operation
/// returns a new matrix, leaving both operands untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// A zero filled matrix of the given shape
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: DMatrix::from_element_generic(Dim::from_usize(rows), Dim::from_usize(cols), 0.0),
        }
    }

    /// Every cell drawn independently and uniformly from `[min, max)`
    pub fn random(rows: usize, cols: usize, min: f64, max: f64, rng: &mut WyRand) -> Self {
        let data = DMatrix::from_fn_generic(Dim::from_usize(rows), Dim::from_usize(cols), |_, _| {
            min + rng.generate::<f64>() * (max - min)
        });

        Self { data }
    }

    /// Build a matrix from row major rows, all of which must have the same length
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(Error::RaggedRows {
                row,
                expected: ncols,
                found: r.len(),
            });
        }
        let data = DMatrix::from_fn_generic(
            Dim::from_usize(rows.len()),
            Dim::from_usize(ncols),
            |i, j| rows[i][j],
        );

        Ok(Self { data })
    }

    /// A 1 x N row vector
    pub fn row_vector(values: &[f64]) -> Self {
        Self {
            data: DMatrix::from_row_slice(1, values.len(), values),
        }
    }

    /// Wrap an existing nalgebra matrix
    pub fn from_dmatrix(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// The value at `(row, col)`, if it is in bounds
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// A copy of a single row
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        if row >= self.nrows() {
            return None;
        }
        Some(self.data.row(row).iter().copied().collect())
    }

    /// All values in row major order
    pub fn to_row_major(&self) -> Vec<f64> {
        self.data.transpose().as_slice().to_vec()
    }

    /// The backing nalgebra matrix
    #[inline(always)]
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Matrix product, requires `self.ncols() == other.nrows()`
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.ncols() != other.nrows() {
            return Err(Error::dimension_mismatch("multiply", self.shape(), other.shape()));
        }

        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    /// Elementwise sum, requires equal shapes
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::dimension_mismatch("add", self.shape(), other.shape()));
        }

        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    /// Apply `f` to every cell
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Self {
            data: self.data.map(f),
        }
    }

    pub fn transpose(&self) -> Matrix {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Multiply every cell by `factor`
    pub fn scale(&self, factor: f64) -> Matrix {
        Self {
            data: &self.data * factor,
        }
    }

    /// Approximate largest absolute eigenvalue, only defined for square matrices
    pub fn spectral_radius(&self) -> Result<f64> {
        if self.nrows() != self.ncols() {
            return Err(Error::dimension_mismatch("spectral_radius", self.shape(), self.shape()));
        }

        Ok(spectral::spectral_radius(&self.data))
    }

    /// Every cell keyed as `{prefix}_{row}_{col}`
    pub fn to_named_entries(&self, prefix: &str) -> BTreeMap<String, f64> {
        let mut entries = BTreeMap::new();
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                entries.insert(format!("{prefix}_{i}_{j}"), self.data[(i, j)]);
            }
        }

        entries
    }

    /// Rebuild a matrix of the given shape from `{prefix}_{row}_{col}` entries.
    /// Keys with another prefix are ignored and missing cells stay zero.
    pub fn from_named_entries(
        entries: &BTreeMap<String, f64>,
        prefix: &str,
        shape: (usize, usize),
    ) -> Result<Matrix> {
        let (rows, cols) = shape;
        let mut m = Self::new(rows, cols);
        for (key, v) in entries {
            let Some(rest) = key.strip_prefix(prefix).and_then(|r| r.strip_prefix('_')) else {
                continue;
            };
            let (i, j) = rest
                .split_once('_')
                .and_then(|(i, j)| Some((i.parse::<usize>().ok()?, j.parse::<usize>().ok()?)))
                .ok_or_else(|| Error::MalformedKey(key.clone()))?;
            if i >= rows || j >= cols {
                let needed = (i.saturating_add(1), j.saturating_add(1));
                return Err(Error::dimension_mismatch("from_named_entries", shape, needed));
            }
            m.data[(i, j)] = *v;
        }

        Ok(m)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;

    fn a() -> Matrix {
        Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    fn b() -> Matrix {
        Matrix::from_rows(&[vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]).unwrap()
    }

    #[test]
    fn zero_filled() {
        let m = Matrix::new(2, 3);
        assert_eq!(m.shape(), (2, 3));
        assert!(m.to_row_major().iter().all(|v| *v == 0.0));

        let empty = Matrix::new(0, 0);
        assert_eq!(empty.shape(), (0, 0));
    }

    #[test]
    fn random_within_bounds() {
        let mut rng = WyRand::new_seed(0);
        let m = Matrix::random(10, 20, -0.5, 2.0, &mut rng);
        assert_eq!(m.shape(), (10, 20));
        for v in m.to_row_major() {
            assert!((-0.5..2.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn multiply() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let c = a().multiply(&b()).unwrap();
        info!("c: {}", c);

        let goal = Matrix::from_rows(&[vec![58.0, 64.0], vec![139.0, 154.0]]).unwrap();
        assert_eq!(c, goal);
    }

    #[test]
    fn multiply_dimension_mismatch() {
        let err = a().multiply(&a()).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                op: "multiply",
                left: (2, 3),
                right: (2, 3)
            }
        );
    }

    #[test]
    fn add() {
        let s = a().add(&a()).unwrap();
        assert_eq!(s.to_row_major(), vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);

        assert!(matches!(a().add(&b()), Err(Error::DimensionMismatch { op: "add", .. })));
    }

    #[test]
    fn operands_are_untouched() {
        let (x, y) = (a(), b());
        let _ = x.multiply(&y).unwrap();
        let _ = x.add(&x).unwrap();
        let _ = x.map(|v| v * 100.0);
        let _ = x.transpose();
        assert_eq!(x, a());
        assert_eq!(y, b());
    }

    #[test]
    fn map_identity_is_noop() {
        let mut rng = WyRand::new_seed(7);
        let m = Matrix::random(4, 6, -1.0, 1.0, &mut rng);
        assert_eq!(m.map(|v| v), m);
    }

    #[test]
    fn transpose_of_product() {
        let mut rng = WyRand::new_seed(42);
        for (r, inner, c) in [(1, 1, 1), (2, 3, 4), (5, 1, 3), (7, 6, 2)] {
            let x = Matrix::random(r, inner, -1.0, 1.0, &mut rng);
            let y = Matrix::random(inner, c, -1.0, 1.0, &mut rng);

            let lhs = x.multiply(&y).unwrap().transpose();
            let rhs = y.transpose().multiply(&x.transpose()).unwrap();
            assert_eq!(lhs.shape(), (c, r));
            for (l, r) in lhs.to_row_major().iter().zip(rhs.to_row_major().iter()) {
                assert!((l - r).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn ragged_rows() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            Error::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn row_major_access() {
        let m = a();
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row(0), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(m.row(2), None);
        assert_eq!(Matrix::row_vector(&[1.0, 2.0]).shape(), (1, 2));
    }

    #[test]
    fn spectral_radius_of_diagonal() {
        let m = Matrix::from_rows(&[vec![0.5, 0.0], vec![0.0, -2.0]]).unwrap();
        assert_eq!(round(m.spectral_radius().unwrap(), 6), 2.0);

        assert!(a().spectral_radius().is_err());
    }

    #[test]
    fn named_entries_round_trip() {
        let entries = a().to_named_entries("w");
        assert_eq!(entries.len(), 6);
        assert_eq!(entries["w_0_2"], 3.0);
        assert_eq!(entries["w_1_0"], 4.0);

        let back = Matrix::from_named_entries(&entries, "w", (2, 3)).unwrap();
        assert_eq!(back, a());
    }

    #[test]
    fn named_entries_filtering_and_gaps() {
        let mut entries = BTreeMap::new();
        entries.insert("w_1_1".to_string(), 2.5);
        entries.insert("other_0_0".to_string(), 9.0);

        let m = Matrix::from_named_entries(&entries, "w", (2, 2)).unwrap();
        assert_eq!(m.to_row_major(), vec![0.0, 0.0, 0.0, 2.5]);
    }

    #[test]
    fn named_entries_errors() {
        let mut entries = BTreeMap::new();
        entries.insert("w_2_0".to_string(), 1.0);
        let err = Matrix::from_named_entries(&entries, "w", (2, 2)).unwrap_err();
        assert_eq!(err, Error::dimension_mismatch("from_named_entries", (2, 2), (3, 1)));

        let mut entries = BTreeMap::new();
        entries.insert("w_x_0".to_string(), 1.0);
        let err = Matrix::from_named_entries(&entries, "w", (2, 2)).unwrap_err();
        assert_eq!(err, Error::MalformedKey("w_x_0".to_string()));
    }
}
