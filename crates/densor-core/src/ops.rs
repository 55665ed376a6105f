//! Element-wise arithmetic, scalar broadcasting, comparisons, and
//! reductions.
//!
//! Implements `Add`, `Sub`, `Mul`, `Div` for:
//! - `Vector op Vector` / `Matrix op Matrix` (element-wise, same logical
//!   shape; panics on mismatch)
//! - `Vector op T` / `Matrix op T` (broadcast the scalar to every element
//!   without materializing a replicated operand)
//!
//! The named `*_checked` duals return `Err(ShapeMismatch)` instead of
//! panicking. All results are freshly allocated; arithmetic never aliases
//! its operands. Comparisons produce boolean masks of the operand's
//! logical shape.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::buffer::Buffer;
use crate::element::{Element, Float};
use crate::error::{Error, Result};
use crate::mask::{Mask, MatMask};
use crate::matrix::Matrix;
use crate::shape::MatShape;
use crate::vector::Vector;

// ======================================================================
// Checked element-wise arithmetic
// ======================================================================

impl<T: Element> Vector<T> {
    /// Element-wise addition, returning `Err` on length mismatch.
    pub fn add_checked(&self, other: &Vector<T>) -> Result<Vector<T>> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Element-wise subtraction, returning `Err` on length mismatch.
    pub fn sub_checked(&self, other: &Vector<T>) -> Result<Vector<T>> {
        self.zip_map(other, |a, b| a - b)
    }

    /// Element-wise multiplication, returning `Err` on length mismatch.
    pub fn mul_checked(&self, other: &Vector<T>) -> Result<Vector<T>> {
        self.zip_map(other, |a, b| a * b)
    }

    /// Element-wise division, returning `Err` on length mismatch.
    pub fn div_checked(&self, other: &Vector<T>) -> Result<Vector<T>> {
        self.zip_map(other, |a, b| a / b)
    }
}

impl<T: Element> Matrix<T> {
    /// Element-wise addition, returning `Err` on shape mismatch.
    pub fn add_checked(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Element-wise subtraction, returning `Err` on shape mismatch.
    pub fn sub_checked(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_map(other, |a, b| a - b)
    }

    /// Element-wise multiplication, returning `Err` on shape mismatch.
    pub fn mul_checked(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_map(other, |a, b| a * b)
    }

    /// Element-wise division, returning `Err` on shape mismatch.
    pub fn div_checked(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_map(other, |a, b| a / b)
    }
}

// ======================================================================
// Operator sugar (panics on mismatch)
// ======================================================================

macro_rules! impl_vector_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Element> $trait for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: &Vector<T>) -> Vector<T> {
                assert_eq!(
                    self.len(), rhs.len(),
                    "shape mismatch in element-wise {}: [{}] vs [{}]",
                    stringify!($method), self.len(), rhs.len(),
                );
                let data = self.iter().zip(rhs.iter()).map(|(a, b)| a $op b).collect();
                Vector::from_vec(data)
            }
        }

        impl<T: Element> $trait for Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: Vector<T>) -> Vector<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_vector_binop!(Add, add, +);
impl_vector_binop!(Sub, sub, -);
impl_vector_binop!(Mul, mul, *);
impl_vector_binop!(Div, div, /);

macro_rules! impl_matrix_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Element> $trait for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                assert_eq!(
                    self.shape(), rhs.shape(),
                    "shape mismatch in element-wise {}: {:?} vs {:?}",
                    stringify!($method), self.shape(), rhs.shape(),
                );
                let (rows, cols) = self.shape();
                let data = self.iter().zip(rhs.iter()).map(|(a, b)| a $op b).collect();
                Matrix::from_parts(Buffer::from_vec(data), MatShape::row_major(rows, cols))
            }
        }

        impl<T: Element> $trait for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_matrix_binop!(Add, add, +);
impl_matrix_binop!(Sub, sub, -);
impl_matrix_binop!(Mul, mul, *);
impl_matrix_binop!(Div, div, /);

// ======================================================================
// Scalar broadcast
// ======================================================================

macro_rules! impl_scalar_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Element> $trait<T> for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: T) -> Vector<T> {
                self.map(|a| a $op rhs)
            }
        }

        impl<T: Element> $trait<T> for Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: T) -> Vector<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Element> $trait<T> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                self.map(|a| a $op rhs)
            }
        }

        impl<T: Element> $trait<T> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                (&self).$method(rhs)
            }
        }
    };
}

impl_scalar_binop!(Add, add, +);
impl_scalar_binop!(Sub, sub, -);
impl_scalar_binop!(Mul, mul, *);
impl_scalar_binop!(Div, div, /);

// ======================================================================
// Negation
// ======================================================================

impl<T: Float> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.map(|a| -a)
    }
}

impl<T: Float> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        -&self
    }
}

impl<T: Float> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|a| -a)
    }
}

impl<T: Float> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        -&self
    }
}

// ======================================================================
// Comparisons — produce masks of the operand's logical shape
// ======================================================================

impl<T: Element> Vector<T> {
    fn cmp_mask<F>(&self, other: &Vector<T>, pred: F) -> Result<Mask>
    where
        F: Fn(T, T) -> bool,
    {
        if self.len() != other.len() {
            return Err(Error::ShapeMismatch {
                lhs: vec![self.len()],
                rhs: vec![other.len()],
            });
        }
        Ok(Mask::new(
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| pred(a, b))
                .collect(),
        ))
    }

    /// Element-wise `<`, as a mask.
    pub fn lt(&self, other: &Vector<T>) -> Result<Mask> {
        self.cmp_mask(other, |a, b| a < b)
    }

    /// Element-wise `<=`, as a mask.
    pub fn le(&self, other: &Vector<T>) -> Result<Mask> {
        self.cmp_mask(other, |a, b| a <= b)
    }

    /// Element-wise `>`, as a mask.
    pub fn gt(&self, other: &Vector<T>) -> Result<Mask> {
        self.cmp_mask(other, |a, b| a > b)
    }

    /// Element-wise `>=`, as a mask.
    pub fn ge(&self, other: &Vector<T>) -> Result<Mask> {
        self.cmp_mask(other, |a, b| a >= b)
    }

    /// Element-wise `==`, as a mask.
    pub fn eq_mask(&self, other: &Vector<T>) -> Result<Mask> {
        self.cmp_mask(other, |a, b| a == b)
    }

    /// Element-wise `!=`, as a mask.
    pub fn ne_mask(&self, other: &Vector<T>) -> Result<Mask> {
        self.cmp_mask(other, |a, b| a != b)
    }

    /// Compare every element against a scalar, as a mask.
    pub fn lt_scalar(&self, rhs: T) -> Mask {
        Mask::new(self.iter().map(|a| a < rhs).collect())
    }

    /// Compare every element against a scalar, as a mask.
    pub fn le_scalar(&self, rhs: T) -> Mask {
        Mask::new(self.iter().map(|a| a <= rhs).collect())
    }

    /// Compare every element against a scalar, as a mask.
    pub fn gt_scalar(&self, rhs: T) -> Mask {
        Mask::new(self.iter().map(|a| a > rhs).collect())
    }

    /// Compare every element against a scalar, as a mask.
    pub fn ge_scalar(&self, rhs: T) -> Mask {
        Mask::new(self.iter().map(|a| a >= rhs).collect())
    }

    /// Compare every element against a scalar, as a mask.
    pub fn eq_scalar(&self, rhs: T) -> Mask {
        Mask::new(self.iter().map(|a| a == rhs).collect())
    }

    /// Compare every element against a scalar, as a mask.
    pub fn ne_scalar(&self, rhs: T) -> Mask {
        Mask::new(self.iter().map(|a| a != rhs).collect())
    }
}

impl<T: Element> Matrix<T> {
    fn cmp_mask<F>(&self, other: &Matrix<T>, pred: F) -> Result<MatMask>
    where
        F: Fn(T, T) -> bool,
    {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                lhs: vec![self.rows(), self.cols()],
                rhs: vec![other.rows(), other.cols()],
            });
        }
        Ok(MatMask::new(
            self.rows(),
            self.cols(),
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| pred(a, b))
                .collect(),
        ))
    }

    /// Element-wise `<`, as a mask.
    pub fn lt(&self, other: &Matrix<T>) -> Result<MatMask> {
        self.cmp_mask(other, |a, b| a < b)
    }

    /// Element-wise `<=`, as a mask.
    pub fn le(&self, other: &Matrix<T>) -> Result<MatMask> {
        self.cmp_mask(other, |a, b| a <= b)
    }

    /// Element-wise `>`, as a mask.
    pub fn gt(&self, other: &Matrix<T>) -> Result<MatMask> {
        self.cmp_mask(other, |a, b| a > b)
    }

    /// Element-wise `>=`, as a mask.
    pub fn ge(&self, other: &Matrix<T>) -> Result<MatMask> {
        self.cmp_mask(other, |a, b| a >= b)
    }

    /// Element-wise `==`, as a mask.
    pub fn eq_mask(&self, other: &Matrix<T>) -> Result<MatMask> {
        self.cmp_mask(other, |a, b| a == b)
    }

    /// Element-wise `!=`, as a mask.
    pub fn ne_mask(&self, other: &Matrix<T>) -> Result<MatMask> {
        self.cmp_mask(other, |a, b| a != b)
    }

    /// Compare every element against a scalar, as a mask.
    pub fn lt_scalar(&self, rhs: T) -> MatMask {
        MatMask::new(
            self.rows(),
            self.cols(),
            self.iter().map(|a| a < rhs).collect(),
        )
    }

    /// Compare every element against a scalar, as a mask.
    pub fn gt_scalar(&self, rhs: T) -> MatMask {
        MatMask::new(
            self.rows(),
            self.cols(),
            self.iter().map(|a| a > rhs).collect(),
        )
    }

    /// Compare every element against a scalar, as a mask.
    pub fn ge_scalar(&self, rhs: T) -> MatMask {
        MatMask::new(
            self.rows(),
            self.cols(),
            self.iter().map(|a| a >= rhs).collect(),
        )
    }

    /// Compare every element against a scalar, as a mask.
    pub fn le_scalar(&self, rhs: T) -> MatMask {
        MatMask::new(
            self.rows(),
            self.cols(),
            self.iter().map(|a| a <= rhs).collect(),
        )
    }

    /// Compare every element against a scalar, as a mask.
    pub fn eq_scalar(&self, rhs: T) -> MatMask {
        MatMask::new(
            self.rows(),
            self.cols(),
            self.iter().map(|a| a == rhs).collect(),
        )
    }

    /// Compare every element against a scalar, as a mask.
    pub fn ne_scalar(&self, rhs: T) -> MatMask {
        MatMask::new(
            self.rows(),
            self.cols(),
            self.iter().map(|a| a != rhs).collect(),
        )
    }
}

// ======================================================================
// Reductions
// ======================================================================

impl<T: Element> Vector<T> {
    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.iter().sum()
    }

    /// Product of all elements.
    pub fn product(&self) -> T {
        self.iter().fold(T::one(), |acc, x| acc * x)
    }

    /// Minimum element. Returns `None` for empty vectors.
    pub fn min_element(&self) -> Option<T> {
        self.iter().reduce(|a, b| if b < a { b } else { a })
    }

    /// Maximum element. Returns `None` for empty vectors.
    pub fn max_element(&self) -> Option<T> {
        self.iter().reduce(|a, b| if b > a { b } else { a })
    }
}

impl<T: Float> Vector<T> {
    /// Mean of all elements.
    pub fn mean(&self) -> T {
        self.sum() / T::from_usize(self.len())
    }
}

impl<T: Element> Matrix<T> {
    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.iter().sum()
    }

    /// Product of all elements.
    pub fn product(&self) -> T {
        self.iter().fold(T::one(), |acc, x| acc * x)
    }

    /// Minimum element. Returns `None` for empty matrices.
    pub fn min_element(&self) -> Option<T> {
        self.iter().reduce(|a, b| if b < a { b } else { a })
    }

    /// Maximum element. Returns `None` for empty matrices.
    pub fn max_element(&self) -> Option<T> {
        self.iter().reduce(|a, b| if b > a { b } else { a })
    }
}

impl<T: Float> Matrix<T> {
    /// Mean of all elements.
    pub fn mean(&self) -> T {
        self.sum() / T::from_usize(self.numel())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::slice::Slice;

    #[test]
    fn test_scalar_multiply() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        assert_eq!((&v * 2).to_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn test_vector_add() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        let w = Vector::from_vec(vec![4, 5, 6]);
        assert_eq!((&v + &w).to_vec(), vec![5, 7, 9]);
    }

    #[test]
    fn test_result_never_aliases_operands() {
        let v = Vector::from_vec(vec![1.0, 2.0]);
        let sum = &v + &v;
        sum.set(0, 9.0).unwrap();
        assert_eq!(v.to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_ops_through_views() {
        let v = Vector::from_vec(vec![0, 1, 2, 3, 4, 5]);
        let evens = v.view(Slice::StepRange(0, 6, 2)).unwrap();
        let odds = v.view(Slice::StepRange(1, 6, 2)).unwrap();
        assert_eq!((&evens + &odds).to_vec(), vec![1, 5, 9]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_add_panics_on_mismatch() {
        let v = Vector::from_vec(vec![1, 2]);
        let w = Vector::from_vec(vec![1, 2, 3]);
        let _ = &v + &w;
    }

    #[test]
    fn test_checked_add_mismatch() {
        let v = Vector::from_vec(vec![1, 2]);
        let w = Vector::from_vec(vec![1, 2, 3]);
        assert_eq!(
            v.add_checked(&w),
            Err(Error::ShapeMismatch {
                lhs: vec![2],
                rhs: vec![3]
            })
        );
    }

    #[test]
    fn test_matrix_elementwise() {
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let b = Matrix::from_vec(vec![10.0, 20.0, 30.0, 40.0], 2, 2).unwrap();
        assert_eq!((&a + &b).to_vec(), vec![11.0, 22.0, 33.0, 44.0]);
        assert_eq!((&b / 10.0).to_vec(), a.to_vec());
    }

    #[test]
    fn test_matrix_elementwise_against_transposed_view() {
        let a = Matrix::from_vec(vec![1, 2, 3, 4], 2, 2).unwrap();
        let sym = &a + &a.transpose();
        assert_eq!(sym.to_vec(), vec![2, 5, 5, 8]);
    }

    #[test]
    fn test_matrix_checked_shape_mismatch() {
        let a = Matrix::<i32>::zeros(2, 3);
        let b = Matrix::<i32>::zeros(3, 2);
        assert!(a.add_checked(&b).is_err());
    }

    #[test]
    fn test_neg() {
        let v = Vector::from_vec(vec![1.0_f64, -2.0]);
        assert_eq!((-&v).to_vec(), vec![-1.0, 2.0]);
    }

    #[test]
    fn test_comparison_to_mask_and_select() {
        let v = Vector::from_vec(vec![3, 1, 4, 1, 5]);
        let mask = v.gt_scalar(2);
        assert_eq!(mask.count_true(), 3);
        assert_eq!(v.select(&mask).unwrap().to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_comparison_between_vectors() {
        let v = Vector::from_vec(vec![1, 5, 3]);
        let w = Vector::from_vec(vec![2, 4, 3]);
        assert_eq!(
            v.lt(&w).unwrap(),
            Mask::from_slice(&[true, false, false])
        );
        assert_eq!(
            v.eq_mask(&w).unwrap(),
            Mask::from_slice(&[false, false, true])
        );
        assert!(v.lt(&Vector::from_vec(vec![1, 2])).is_err());
    }

    #[test]
    fn test_matrix_comparison_shape() {
        let m = Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        let mask = m.gt_scalar(3);
        assert_eq!((mask.rows(), mask.cols()), (2, 3));
        assert_eq!(m.select(&mask).unwrap().to_vec(), vec![4, 5, 6]);
    }

    #[test]
    fn test_reductions() {
        let v = Vector::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(v.sum(), 10);
        assert_eq!(v.product(), 24);
        assert_eq!(v.min_element(), Some(1));
        assert_eq!(v.max_element(), Some(4));

        let empty = Vector::<i32>::zeros(0);
        assert_eq!(empty.min_element(), None);
    }

    #[test]
    fn test_mean() {
        let v = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.mean(), 2.5);

        let m = Matrix::from_vec(vec![2.0, 4.0, 6.0, 8.0], 2, 2).unwrap();
        assert_eq!(m.mean(), 5.0);
    }
}
