//! `Display` formatting for vectors, matrices, and masks.

use core::fmt;

use crate::element::Element;
use crate::mask::{Mask, MatMask};
use crate::matrix::Matrix;
use crate::vector::Vector;

impl<T: Element> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vector([")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "])")
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numel() == 0 {
            return write!(f, "matrix([], shape={:?})", [self.rows(), self.cols()]);
        }
        let vals = self.to_vec();
        writeln!(f, "matrix([")?;
        for r in 0..self.rows() {
            write!(f, "  [")?;
            for c in 0..self.cols() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", vals[r * self.cols() + c])?;
            }
            if r < self.rows() - 1 {
                writeln!(f, "],")?;
            } else {
                writeln!(f, "]")?;
            }
        }
        write!(f, "])")
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mask([")?;
        for (i, b) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", if b { "T" } else { "F" })?;
        }
        write!(f, "])")
    }
}

impl fmt::Display for MatMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mask(shape={:?}, [", [self.rows(), self.cols()])?;
        for (i, b) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", if b { "T" } else { "F" })?;
        }
        write!(f, "])")
    }
}
