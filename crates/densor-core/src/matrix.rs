//! The 2-D view type.
//!
//! A [`Matrix`] binds a [`MatShape`] descriptor to a shared [`Buffer`].
//! Affine operations (`view`, `row`, `col`, `transpose`) return views that
//! alias the same storage; mask selection and [`Matrix::to_owned`] copy.
//!
//! Cloning a `Matrix` clones the view, not the data.

use crate::buffer::Buffer;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::mask::{Mask, MatMask};
use crate::shape::MatShape;
use crate::slice::Slice;
use crate::vector::Vector;

/// A dense 2-D view over a shared storage buffer.
#[derive(Debug, Clone)]
pub struct Matrix<T: Element> {
    pub(crate) buf: Buffer<T>,
    pub(crate) shape: MatShape,
}

impl<T: Element> Matrix<T> {
    /// Bind a descriptor to a buffer. Internal constructor; callers
    /// guarantee the descriptor honors the bounds invariant.
    pub(crate) fn from_parts(buf: Buffer<T>, shape: MatShape) -> Self {
        debug_assert!(shape.validate(buf.capacity()).is_ok());
        Self { buf, shape }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// The number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// The logical shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.shape.rows, self.shape.cols)
    }

    /// The total number of logical elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.rows * self.shape.cols
    }

    /// Whether two views share the same storage buffer.
    pub fn aliases(&self, other: &Matrix<T>) -> bool {
        Buffer::ptr_eq(&self.buf, &other.buf)
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// The element at `(i, j)`; negative indices count from the end of
    /// their axis.
    pub fn get(&self, i: isize, j: isize) -> Result<T> {
        let off = self.shape.index(i, j)?;
        self.buf.read(off)
    }

    /// Overwrite the element at `(i, j)`. Visible through every aliasing
    /// view.
    pub fn set(&self, i: isize, j: isize, value: T) -> Result<()> {
        let off = self.shape.index(i, j)?;
        self.buf.write(off, value)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// An affine two-axis view: two independent single-axis resolutions
    /// composed. The result aliases `self`.
    pub fn view(&self, rows: Slice, cols: Slice) -> Result<Matrix<T>> {
        let shape = self.shape.slice(rows, cols)?;
        Ok(Matrix {
            buf: self.buf.clone(),
            shape,
        })
    }

    /// Row `i` as a reduced-rank vector view. Aliases `self`.
    ///
    /// Mixed scalar-and-range access composes: `m.row(i)?.slice(a, b)` is
    /// a view of part of one row, still aliasing `m`.
    pub fn row(&self, i: isize) -> Result<Vector<T>> {
        let shape = self.shape.row(i)?;
        Ok(Vector::from_parts(self.buf.clone(), shape))
    }

    /// Column `j` as a reduced-rank vector view. Aliases `self`.
    pub fn col(&self, j: isize) -> Result<Vector<T>> {
        let shape = self.shape.col(j)?;
        Ok(Vector::from_parts(self.buf.clone(), shape))
    }

    /// The transpose: axis roles swapped, no data movement. Aliases
    /// `self`, so writes through the transpose land in the original.
    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            buf: self.buf.clone(),
            shape: self.shape.transposed(),
        }
    }

    // ------------------------------------------------------------------
    // Mask selection (always copies)
    // ------------------------------------------------------------------

    /// Select the elements where `mask` is `true`, walking row-major, as a
    /// fresh owned vector. The mask must have this matrix's shape.
    pub fn select(&self, mask: &MatMask) -> Result<Vector<T>> {
        if (mask.rows(), mask.cols()) != self.shape() {
            return Err(Error::MaskLengthMismatch {
                mask_len: mask.rows() * mask.cols(),
                axis_len: self.numel(),
            });
        }
        let data = self.buf.borrow();
        let mut selected = Vec::with_capacity(mask.count_true());
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if mask.get(r, c) == Some(true) {
                    selected.push(data[self.shape.offset_of(r, c)]);
                }
            }
        }
        drop(data);
        Ok(Vector::from_vec(selected))
    }

    /// Keep the rows where `mask` is `true`, as a fresh owned matrix. The
    /// mask length must equal the row count.
    pub fn select_rows(&self, mask: &Mask) -> Result<Matrix<T>> {
        if mask.len() != self.rows() {
            return Err(Error::MaskLengthMismatch {
                mask_len: mask.len(),
                axis_len: self.rows(),
            });
        }
        let data = self.buf.borrow();
        let mut kept = Vec::with_capacity(mask.count_true() * self.cols());
        for r in 0..self.rows() {
            if mask.get(r) == Some(true) {
                for c in 0..self.cols() {
                    kept.push(data[self.shape.offset_of(r, c)]);
                }
            }
        }
        drop(data);
        Matrix::from_vec(kept, mask.count_true(), self.cols())
    }

    /// Keep the columns where `mask` is `true`, as a fresh owned matrix.
    /// The mask length must equal the column count.
    pub fn select_cols(&self, mask: &Mask) -> Result<Matrix<T>> {
        if mask.len() != self.cols() {
            return Err(Error::MaskLengthMismatch {
                mask_len: mask.len(),
                axis_len: self.cols(),
            });
        }
        let data = self.buf.borrow();
        let mut kept = Vec::with_capacity(self.rows() * mask.count_true());
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if mask.get(c) == Some(true) {
                    kept.push(data[self.shape.offset_of(r, c)]);
                }
            }
        }
        drop(data);
        Matrix::from_vec(kept, self.rows(), mask.count_true())
    }

    /// Materialize an independent, row-major copy, breaking aliasing.
    pub fn to_owned(&self) -> Matrix<T> {
        let (rows, cols) = self.shape();
        Matrix::from_parts(
            Buffer::from_vec(self.to_vec()),
            MatShape::row_major(rows, cols),
        )
    }

    // ------------------------------------------------------------------
    // Writes through the view
    // ------------------------------------------------------------------

    /// Write the elements of `src` through this view.
    ///
    /// Fails with `ShapeMismatch` if the logical shapes differ. If `src`
    /// shares this view's buffer, its elements are materialized before the
    /// first write, so overlapping assignment observes the pre-write
    /// values.
    pub fn assign(&self, src: &Matrix<T>) -> Result<()> {
        if src.shape() != self.shape() {
            return Err(Error::ShapeMismatch {
                lhs: vec![self.rows(), self.cols()],
                rhs: vec![src.rows(), src.cols()],
            });
        }
        if self.aliases(src) {
            let staged = src.to_vec();
            let mut data = self.buf.borrow_mut();
            for r in 0..self.rows() {
                for c in 0..self.cols() {
                    data[self.shape.offset_of(r, c)] = staged[r * self.cols() + c];
                }
            }
        } else {
            let src_data = src.buf.borrow();
            let mut data = self.buf.borrow_mut();
            for r in 0..self.rows() {
                for c in 0..self.cols() {
                    data[self.shape.offset_of(r, c)] = src_data[src.shape.offset_of(r, c)];
                }
            }
        }
        Ok(())
    }

    /// Broadcast a scalar through the view, overwriting every element.
    pub fn fill(&self, value: T) {
        let mut data = self.buf.borrow_mut();
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                data[self.shape.offset_of(r, c)] = value;
            }
        }
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Iterate over the elements in row-major logical order, by value.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols()).map(move |c| self.buf.borrow()[self.shape.offset_of(r, c)])
        })
    }

    /// Copy the elements into a `Vec` in row-major logical order.
    pub fn to_vec(&self) -> Vec<T> {
        let data = self.buf.borrow();
        let mut out = Vec::with_capacity(self.numel());
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                out.push(data[self.shape.offset_of(r, c)]);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Map
    // ------------------------------------------------------------------

    /// Apply a function to every element, returning a fresh owned matrix.
    pub fn map<F>(&self, f: F) -> Matrix<T>
    where
        F: Fn(T) -> T,
    {
        let (rows, cols) = self.shape();
        Matrix::from_parts(
            Buffer::from_vec(self.to_vec().into_iter().map(f).collect()),
            MatShape::row_major(rows, cols),
        )
    }

    /// Apply a function element-wise to two matrices of the same shape,
    /// returning a fresh owned matrix.
    pub fn zip_map<F>(&self, other: &Matrix<T>, f: F) -> Result<Matrix<T>>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                lhs: vec![self.rows(), self.cols()],
                rhs: vec![other.rows(), other.cols()],
            });
        }
        let (rows, cols) = self.shape();
        let data = self
            .to_vec()
            .into_iter()
            .zip(other.to_vec())
            .map(|(a, b)| f(a, b))
            .collect();
        Matrix::from_vec(data, rows, cols)
    }

    /// Apply a function to every element in place, through the view.
    pub fn apply<F>(&self, f: F)
    where
        F: Fn(T) -> T,
    {
        let mut data = self.buf.borrow_mut();
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                let off = self.shape.offset_of(r, c);
                data[off] = f(data[off]);
            }
        }
    }
}

impl<T: Element> PartialEq for Matrix<T> {
    /// Logical equality: same shape, same element values, regardless of
    /// strides, offset, or backing buffer.
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}
