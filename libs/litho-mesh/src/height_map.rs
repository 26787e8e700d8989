//! # Height Maps
//!
//! Row-major grids of physical heights, one entry per pixel block.
//!
//! The same type carries a layer's delta thickness and the cumulative
//! height of every layer printed beneath a cell.

use config::constants::approx_zero;

use crate::error::{LithoError, LithoResult};

/// A rows × cols grid of heights in millimetres.
///
/// # Example
///
/// ```rust
/// use litho_mesh::HeightMap;
///
/// let below = HeightMap::filled(2, 3, 0.2);
/// let delta = HeightMap::filled(2, 3, 0.1);
/// let above = below.add(&delta).unwrap();
/// assert_eq!(above.shape(), (2, 3));
/// assert!((above.get(1, 2) - 0.3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl HeightMap {
    /// Creates a grid with every entry set to zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Creates a grid with every entry set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wraps a row-major buffer.
    ///
    /// Fails with [`LithoError::InvalidInput`] when the buffer length does not
    /// match `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> LithoResult<Self> {
        if data.len() != rows * cols {
            return Err(LithoError::invalid_input(format!(
                "height map of shape {rows}x{cols} needs {} values, got {}",
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> LithoResult<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(LithoError::invalid_input(format!(
                "row {bad} has {} values, expected {cols}",
                rows[bad].len()
            )));
        }
        Ok(Self {
            rows: row_count,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(r < self.rows && c < self.cols, "cell ({r}, {c}) out of bounds");
        self.data[r * self.cols + c]
    }

    /// Row-major view of all values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Largest entry, or 0.0 for an empty grid.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |m| m.max(v)))
        })
        .unwrap_or(0.0)
    }

    /// Smallest entry, or 0.0 for an empty grid.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |m| m.min(v)))
        })
        .unwrap_or(0.0)
    }

    /// Applies `f` to every entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Entrywise sum. Both grids must have the same shape.
    pub fn add(&self, other: &HeightMap) -> LithoResult<Self> {
        self.ensure_same_shape(other)?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// Fails unless `other` has the same shape as `self`.
    pub fn ensure_same_shape(&self, other: &HeightMap) -> LithoResult<()> {
        if self.shape() != other.shape() {
            return Err(LithoError::invalid_input(format!(
                "height map shapes differ: {:?} vs {:?}",
                self.shape(),
                other.shape()
            )));
        }
        Ok(())
    }

    /// Fails with [`LithoError::Configuration`] if any entry is negative or
    /// not finite. `what` names the grid in the message.
    pub fn ensure_non_negative(&self, what: &str) -> LithoResult<()> {
        match self
            .data
            .iter()
            .position(|v| !v.is_finite() || *v < 0.0)
        {
            Some(idx) => Err(LithoError::configuration(format!(
                "{what} has invalid height {} at cell ({}, {})",
                self.data[idx],
                idx / self.cols.max(1),
                idx % self.cols.max(1)
            ))),
            None => Ok(()),
        }
    }
}

/// Rounds `value` to the nearest multiple of `step`.
///
/// Ties round to even, so a value exactly half-way between two steps picks
/// the even multiple. A zero (or vanishingly small) step disables
/// quantization.
///
/// # Example
///
/// ```rust
/// use litho_mesh::height_map::quantize;
///
/// assert!((quantize(0.07, 0.1) - 0.1).abs() < 1e-12);
/// assert_eq!(quantize(0.04, 0.1), 0.0);
/// assert_eq!(quantize(0.123, 0.0), 0.123);
/// ```
#[inline]
pub fn quantize(value: f64, step: f64) -> f64 {
    if step > 0.0 && !approx_zero(step) {
        (value / step).round_ties_even() * step
    } else {
        value
    }
}
