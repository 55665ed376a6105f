//! Products and norms.
//!
//! All accumulating operations (`dot`, `matmul`, `matvec`, `norm`) run
//! their inner sums in the widened partner of the element type
//! ([`Element::Wide`]: `i32 -> i64`, `f32 -> f64`) and narrow once at the
//! end, bounding rounding and overflow consistently. Results are always
//! freshly allocated; products never alias their operands.

use log::trace;

use crate::buffer::Buffer;
use crate::element::{Element, Float};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::shape::{MatShape, VecShape};
use crate::vector::Vector;

/// Inner (dot) product of two vectors: `sum(x_i * y_i)`.
///
/// Accumulated in the widened element type; fails with
/// `DimensionMismatch` when the lengths differ.
///
/// ```
/// # use densor_core::vector::Vector;
/// # use densor_core::linalg::dot;
/// let x = Vector::from_vec(vec![1.0_f64, 2.0, 3.0]);
/// let y = Vector::from_vec(vec![4.0_f64, 5.0, 6.0]);
/// assert!((dot(&x, &y).unwrap() - 32.0).abs() < 1e-10);
/// ```
pub fn dot<T: Element>(x: &Vector<T>, y: &Vector<T>) -> Result<T> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch {
            lhs: vec![x.len()],
            rhs: vec![y.len()],
        });
    }
    let mut acc = T::wide_zero();
    for (a, b) in x.iter().zip(y.iter()) {
        acc = T::wide_mul_add(acc, a, b);
    }
    Ok(T::narrow(acc))
}

/// Matrix product `a x b`.
///
/// Requires `a.cols() == b.rows()` (`DimensionMismatch` otherwise). The
/// result is a freshly allocated `(a.rows, b.cols)` matrix; each output
/// element is a dot product accumulated in the widened element type.
///
/// ```
/// # use densor_core::matrix::Matrix;
/// # use densor_core::linalg::matmul;
/// let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
/// let b = Matrix::from_vec(vec![5.0, 6.0, 7.0, 8.0], 2, 2).unwrap();
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn matmul<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let (m, k) = a.shape();
    let (k2, n) = b.shape();
    if k != k2 {
        return Err(Error::DimensionMismatch {
            lhs: vec![m, k],
            rhs: vec![k2, n],
        });
    }
    trace!("matmul {m}x{k} by {k2}x{n}");

    let a_data = a.buf.borrow();
    let b_data = b.buf.borrow();
    let mut out = vec![T::zero(); m * n];

    // ijp loop order, reading both operands through their descriptors so
    // transposed and sliced views multiply without materializing.
    for i in 0..m {
        for j in 0..n {
            let mut acc = T::wide_zero();
            for p in 0..k {
                acc = T::wide_mul_add(
                    acc,
                    a_data[a.shape.offset_of(i, p)],
                    b_data[b.shape.offset_of(p, j)],
                );
            }
            out[i * n + j] = T::narrow(acc);
        }
    }
    drop(a_data);
    drop(b_data);

    Ok(Matrix::from_parts(
        Buffer::from_vec(out),
        MatShape::row_major(m, n),
    ))
}

/// Matrix–vector product, treating `x` as a column.
///
/// Requires `a.cols() == x.len()`; the result is a fresh vector of length
/// `a.rows()`, accumulated in the widened element type.
///
/// ```
/// # use densor_core::matrix::Matrix;
/// # use densor_core::vector::Vector;
/// # use densor_core::linalg::matvec;
/// let a = Matrix::from_vec(vec![2.0, 3.0, 5.0, 6.0, 8.0, 9.0], 3, 2).unwrap();
/// let x = Vector::from_vec(vec![1.0, 2.0]);
/// assert_eq!(matvec(&a, &x).unwrap().to_vec(), vec![8.0, 17.0, 26.0]);
/// ```
pub fn matvec<T: Element>(a: &Matrix<T>, x: &Vector<T>) -> Result<Vector<T>> {
    let (m, k) = a.shape();
    if k != x.len() {
        return Err(Error::DimensionMismatch {
            lhs: vec![m, k],
            rhs: vec![x.len()],
        });
    }

    let a_data = a.buf.borrow();
    let x_vals = x.to_vec();
    let mut out = Vec::with_capacity(m);
    for i in 0..m {
        let mut acc = T::wide_zero();
        for (p, &xv) in x_vals.iter().enumerate() {
            acc = T::wide_mul_add(acc, a_data[a.shape.offset_of(i, p)], xv);
        }
        out.push(T::narrow(acc));
    }
    drop(a_data);

    Ok(Vector::from_parts(
        Buffer::from_vec(out),
        VecShape::contiguous(m),
    ))
}

/// Euclidean (L2) norm of a vector: `sqrt(sum(x_i^2))`, with the sum of
/// squares accumulated in the widened element type.
pub fn norm<T: Float>(x: &Vector<T>) -> T {
    let mut acc = T::wide_zero();
    for v in x.iter() {
        acc = T::wide_mul_add(acc, v, v);
    }
    T::narrow(acc).sqrt()
}

// ======================================================================
// Convenience methods on the view types
// ======================================================================

impl<T: Element> Vector<T> {
    /// Dot product with another vector.
    pub fn dot(&self, other: &Vector<T>) -> Result<T> {
        dot(self, other)
    }
}

impl<T: Float> Vector<T> {
    /// Euclidean (L2) norm.
    pub fn norm(&self) -> T {
        norm(self)
    }
}

impl<T: Element> Matrix<T> {
    /// Matrix product: `self x other` as a fresh matrix.
    pub fn matmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        matmul(self, other)
    }

    /// Matrix–vector product: `self x x` as a fresh vector.
    pub fn matvec(&self, x: &Vector<T>) -> Result<Vector<T>> {
        matvec(self, x)
    }
}
