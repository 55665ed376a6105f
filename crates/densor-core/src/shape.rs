//! Shape descriptors: how a flat buffer is read as a vector or a matrix.
//!
//! A descriptor is pure metadata: length/extents, signed strides, and a
//! base offset. Slicing derives new descriptors; it never touches storage.
//! Invariant, checked at construction: every offset reachable from a
//! descriptor lies within `[0, capacity)` of the buffer it will be bound to.

use crate::error::{Error, Result};
use crate::slice::{resolve_index, resolve_slice, Axis, Slice};

/// Descriptor interpreting a buffer as a 1-D vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VecShape {
    pub len: usize,
    pub stride: isize,
    pub offset: usize,
}

impl VecShape {
    /// A contiguous vector of `len` elements starting at offset 0.
    pub fn contiguous(len: usize) -> Self {
        Self {
            len,
            stride: 1,
            offset: 0,
        }
    }

    /// Storage offset of logical element `i`. Caller guarantees `i < len`.
    pub fn offset_of(&self, i: usize) -> usize {
        debug_assert!(i < self.len);
        (self.offset as isize + i as isize * self.stride) as usize
    }

    /// Resolve a scalar index (negative counts from the end) to a storage
    /// offset.
    pub fn index(&self, i: isize) -> Result<usize> {
        let i = resolve_index(self.len, i)?;
        Ok(self.offset_of(i))
    }

    /// Derive the descriptor for an affine slice of this vector.
    pub fn slice(&self, spec: Slice) -> Result<VecShape> {
        let axis = Axis {
            len: self.len,
            stride: self.stride,
        };
        let (axis, delta) = resolve_slice(axis, spec)?;
        Ok(VecShape {
            len: axis.len,
            stride: axis.stride,
            offset: shift(self.offset, delta),
        })
    }

    /// Reversed view of the whole vector.
    pub fn reversed(&self) -> VecShape {
        if self.len == 0 {
            return *self;
        }
        VecShape {
            len: self.len,
            stride: -self.stride,
            offset: self.offset_of(self.len - 1),
        }
    }

    /// Check the bounds invariant against a buffer capacity.
    pub fn validate(&self, capacity: usize) -> Result<()> {
        if self.len == 0 {
            return Ok(());
        }
        check_extremes(&[self.offset_of(0), self.offset_of(self.len - 1)], capacity)
    }
}

/// Descriptor interpreting a buffer as a 2-D matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatShape {
    pub rows: usize,
    pub cols: usize,
    pub row_stride: isize,
    pub col_stride: isize,
    pub offset: usize,
}

impl MatShape {
    /// A row-major `rows x cols` matrix starting at offset 0.
    pub fn row_major(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_stride: cols as isize,
            col_stride: 1,
            offset: 0,
        }
    }

    /// Storage offset of logical element `(r, c)`. Caller guarantees both
    /// indices are in range.
    pub fn offset_of(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.rows && c < self.cols);
        (self.offset as isize + r as isize * self.row_stride + c as isize * self.col_stride)
            as usize
    }

    /// Resolve a scalar index pair (negatives count from the end) to a
    /// storage offset.
    pub fn index(&self, r: isize, c: isize) -> Result<usize> {
        let r = resolve_index(self.rows, r)?;
        let c = resolve_index(self.cols, c)?;
        Ok(self.offset_of(r, c))
    }

    /// Derive the descriptor for an affine two-axis slice: two independent
    /// single-axis resolutions composed.
    pub fn slice(&self, rows: Slice, cols: Slice) -> Result<MatShape> {
        let (row_axis, row_delta) = resolve_slice(
            Axis {
                len: self.rows,
                stride: self.row_stride,
            },
            rows,
        )?;
        let (col_axis, col_delta) = resolve_slice(
            Axis {
                len: self.cols,
                stride: self.col_stride,
            },
            cols,
        )?;
        Ok(MatShape {
            rows: row_axis.len,
            cols: col_axis.len,
            row_stride: row_axis.stride,
            col_stride: col_axis.stride,
            offset: shift(self.offset, row_delta + col_delta),
        })
    }

    /// Reduced-rank view of row `i`.
    pub fn row(&self, i: isize) -> Result<VecShape> {
        let r = resolve_index(self.rows, i)?;
        Ok(VecShape {
            len: self.cols,
            stride: self.col_stride,
            offset: shift(self.offset, r as isize * self.row_stride),
        })
    }

    /// Reduced-rank view of column `j`.
    pub fn col(&self, j: isize) -> Result<VecShape> {
        let c = resolve_index(self.cols, j)?;
        Ok(VecShape {
            len: self.rows,
            stride: self.row_stride,
            offset: shift(self.offset, c as isize * self.col_stride),
        })
    }

    /// Swap the axis roles: rows become columns. Pure metadata.
    pub fn transposed(&self) -> MatShape {
        MatShape {
            rows: self.cols,
            cols: self.rows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
            offset: self.offset,
        }
    }

    /// Check the bounds invariant against a buffer capacity.
    pub fn validate(&self, capacity: usize) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Ok(());
        }
        check_extremes(
            &[
                self.offset_of(0, 0),
                self.offset_of(0, self.cols - 1),
                self.offset_of(self.rows - 1, 0),
                self.offset_of(self.rows - 1, self.cols - 1),
            ],
            capacity,
        )
    }
}

/// Apply a signed offset delta. The resolved offset of an in-bounds slice is
/// never negative; the checked conversion guards descriptor bugs in debug
/// and release alike.
fn shift(offset: usize, delta: isize) -> usize {
    let shifted = offset as isize + delta;
    debug_assert!(shifted >= 0);
    shifted.max(0) as usize
}

/// Offsets reachable from an affine descriptor are extremal at the corners.
fn check_extremes(corners: &[usize], capacity: usize) -> Result<()> {
    for &off in corners {
        if off >= capacity {
            return Err(Error::OutOfBounds {
                index: off as isize,
                len: capacity,
            });
        }
    }
    Ok(())
}
