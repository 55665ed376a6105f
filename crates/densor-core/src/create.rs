//! Construction helpers for vectors and matrices.

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::Buffer;
use crate::element::{Element, Float};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::shape::{MatShape, VecShape};
use crate::vector::Vector;

impl<T: Element> Vector<T> {
    /// A vector of `len` zeros backed by a fresh buffer.
    ///
    /// ```
    /// # use densor_core::vector::Vector;
    /// let v = Vector::<f64>::zeros(3);
    /// assert_eq!(v.to_vec(), vec![0.0, 0.0, 0.0]);
    /// ```
    pub fn zeros(len: usize) -> Self {
        Self::from_parts(Buffer::with_capacity(len), VecShape::contiguous(len))
    }

    /// A vector of `len` ones.
    pub fn ones(len: usize) -> Self {
        Self::full(len, T::one())
    }

    /// A vector of `len` copies of `value`.
    pub fn full(len: usize, value: T) -> Self {
        Self::from_vec(vec![value; len])
    }

    /// Take ownership of existing data as a contiguous vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        let len = data.len();
        Self::from_parts(Buffer::from_vec(data), VecShape::contiguous(len))
    }

    /// Copy a slice into a contiguous vector.
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// A vector where element `i` is `f(i)`.
    ///
    /// ```
    /// # use densor_core::vector::Vector;
    /// let squares = Vector::<i64>::tabulate(4, |i| (i * i) as i64);
    /// assert_eq!(squares.to_vec(), vec![0, 1, 4, 9]);
    /// ```
    pub fn tabulate<F>(len: usize, f: F) -> Self
    where
        F: Fn(usize) -> T,
    {
        Self::from_vec((0..len).map(f).collect())
    }

    /// The vector `[0, 1, 2, ..., n-1]`.
    pub fn arange(n: usize) -> Self {
        Self::tabulate(n, T::from_usize)
    }
}

impl<T: Float> Vector<T> {
    /// `count` evenly spaced values from `start` to `end`, both endpoints
    /// inclusive, with uniform spacing `(end - start) / (count - 1)`.
    ///
    /// Returns an error if `count < 2`.
    ///
    /// ```
    /// # use densor_core::vector::Vector;
    /// let t = Vector::<f64>::linspace(0.0, 1.0, 5).unwrap();
    /// assert_eq!(t.get(0).unwrap(), 0.0);
    /// assert_eq!(t.get(-1).unwrap(), 1.0);
    /// ```
    pub fn linspace(start: T, end: T, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(Error::InvalidArgument {
                reason: "linspace requires count >= 2",
            });
        }
        let step = (end - start) / T::from_usize(count - 1);
        Ok(Self::tabulate(count, |i| start + step * T::from_usize(i)))
    }
}

impl<T: Element> Vector<T>
where
    Standard: Distribution<T>,
{
    /// A vector of uniform random draws: floats uniform over `[0, 1)`,
    /// integer types uniform over the full type range.
    pub fn random(len: usize) -> Self {
        let mut rng = rand::thread_rng();
        Self::from_vec((0..len).map(|_| rng.gen()).collect())
    }

    /// Like [`Vector::random`] but reproducible from a seed.
    pub fn random_seeded(len: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_vec((0..len).map(|_| rng.gen()).collect())
    }
}

impl<T: Element> Matrix<T> {
    /// A `rows x cols` matrix of zeros backed by a fresh buffer.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_parts(
            Buffer::with_capacity(rows * cols),
            MatShape::row_major(rows, cols),
        )
    }

    /// A `rows x cols` matrix of ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, T::one())
    }

    /// A `rows x cols` matrix of copies of `value`.
    pub fn full(rows: usize, cols: usize, value: T) -> Self {
        Self::from_parts(
            Buffer::from_vec(vec![value; rows * cols]),
            MatShape::row_major(rows, cols),
        )
    }

    /// Take ownership of row-major data as a `rows x cols` matrix.
    ///
    /// Fails with `ShapeMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::ShapeMismatch {
                lhs: vec![data.len()],
                rhs: vec![rows, cols],
            });
        }
        Ok(Self::from_parts(
            Buffer::from_vec(data),
            MatShape::row_major(rows, cols),
        ))
    }

    /// Copy a row-major slice into a `rows x cols` matrix.
    pub fn from_slice(data: &[T], rows: usize, cols: usize) -> Result<Self> {
        Self::from_vec(data.to_vec(), rows, cols)
    }

    /// A matrix where element `(r, c)` is `f(r, c)`.
    pub fn tabulate<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self::from_parts(Buffer::from_vec(data), MatShape::row_major(rows, cols))
    }

    /// The `n x n` identity matrix.
    ///
    /// ```
    /// # use densor_core::matrix::Matrix;
    /// let eye = Matrix::<f64>::eye(2);
    /// assert_eq!(eye.to_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn eye(n: usize) -> Self {
        Self::tabulate(n, n, |r, c| if r == c { T::one() } else { T::zero() })
    }
}

impl<T: Element> Matrix<T>
where
    Standard: Distribution<T>,
{
    /// A matrix of uniform random draws; see [`Vector::random`] for the
    /// distribution per element type.
    pub fn random(rows: usize, cols: usize) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..rows * cols).map(|_| rng.gen()).collect();
        Self::from_parts(Buffer::from_vec(data), MatShape::row_major(rows, cols))
    }

    /// Like [`Matrix::random`] but reproducible from a seed.
    pub fn random_seeded(rows: usize, cols: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..rows * cols).map(|_| rng.gen()).collect();
        Self::from_parts(Buffer::from_vec(data), MatShape::row_major(rows, cols))
    }
}
