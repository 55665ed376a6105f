//! The 1-D view type.
//!
//! A [`Vector`] binds a [`VecShape`] descriptor to a shared [`Buffer`].
//! Affine operations (`view`, `reversed`) return views that *alias* the
//! same storage: writing through one is visible through every view whose
//! offsets intersect it. Mask selection and [`Vector::to_owned`] are the
//! copying operations that break aliasing.
//!
//! Cloning a `Vector` clones the view, not the data: the clone aliases
//! the original.

use crate::buffer::Buffer;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::shape::VecShape;
use crate::slice::Slice;

/// A dense 1-D view over a shared storage buffer.
#[derive(Debug, Clone)]
pub struct Vector<T: Element> {
    pub(crate) buf: Buffer<T>,
    pub(crate) shape: VecShape,
}

impl<T: Element> Vector<T> {
    /// Bind a descriptor to a buffer. Internal constructor; callers
    /// guarantee the descriptor honors the bounds invariant.
    pub(crate) fn from_parts(buf: Buffer<T>, shape: VecShape) -> Self {
        debug_assert!(shape.validate(buf.capacity()).is_ok());
        Self { buf, shape }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The logical length of the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.len
    }

    /// Whether the view has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.len == 0
    }

    /// The stride of the view through storage, in elements.
    #[inline]
    pub fn stride(&self) -> isize {
        self.shape.stride
    }

    /// Whether two views share the same storage buffer.
    pub fn aliases(&self, other: &Vector<T>) -> bool {
        Buffer::ptr_eq(&self.buf, &other.buf)
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// The element at logical index `i`; negative indices count from the
    /// end.
    pub fn get(&self, i: isize) -> Result<T> {
        let off = self.shape.index(i)?;
        self.buf.read(off)
    }

    /// Overwrite the element at logical index `i`; negative indices count
    /// from the end. The write is visible through every aliasing view.
    pub fn set(&self, i: isize, value: T) -> Result<()> {
        let off = self.shape.index(i)?;
        self.buf.write(off, value)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// An affine view of this vector. The result aliases `self`: it shares
    /// the same buffer, and writes through either are visible through the
    /// other wherever their offsets intersect.
    pub fn view(&self, spec: Slice) -> Result<Vector<T>> {
        let shape = self.shape.slice(spec)?;
        Ok(Vector {
            buf: self.buf.clone(),
            shape,
        })
    }

    /// Shorthand for `view(Slice::Range(start, end))`.
    pub fn slice(&self, start: isize, end: isize) -> Result<Vector<T>> {
        self.view(Slice::Range(start, end))
    }

    /// A reversed view of the whole vector. Aliases `self`.
    pub fn reversed(&self) -> Vector<T> {
        Vector {
            buf: self.buf.clone(),
            shape: self.shape.reversed(),
        }
    }

    /// Select the elements where `mask` is `true`.
    ///
    /// The mask length must equal the vector length. The result owns a
    /// fresh buffer; a masked subset has no single affine stride, so it
    /// never aliases the source.
    pub fn select(&self, mask: &Mask) -> Result<Vector<T>> {
        if mask.len() != self.len() {
            return Err(Error::MaskLengthMismatch {
                mask_len: mask.len(),
                axis_len: self.len(),
            });
        }
        let data = self.borrow_data();
        let selected: Vec<T> = mask
            .iter()
            .enumerate()
            .filter(|&(_, keep)| keep)
            .map(|(i, _)| data[self.shape.offset_of(i)])
            .collect();
        drop(data);
        Ok(Vector::from_vec(selected))
    }

    /// Materialize an independent, contiguous copy, breaking aliasing.
    pub fn to_owned(&self) -> Vector<T> {
        Vector::from_vec(self.to_vec())
    }

    // ------------------------------------------------------------------
    // Writes through the view
    // ------------------------------------------------------------------

    /// Write the elements of `src` through this view, element by element.
    ///
    /// Fails with `ShapeMismatch` if the lengths differ. If `src` shares
    /// this view's buffer, its elements are materialized before the first
    /// write, so overlapping assignment observes the pre-write values.
    pub fn assign(&self, src: &Vector<T>) -> Result<()> {
        if src.len() != self.len() {
            return Err(Error::ShapeMismatch {
                lhs: vec![self.len()],
                rhs: vec![src.len()],
            });
        }
        if self.aliases(src) {
            let staged = src.to_vec();
            let mut data = self.buf.borrow_mut();
            for (i, v) in staged.into_iter().enumerate() {
                data[self.shape.offset_of(i)] = v;
            }
        } else {
            let src_data = src.borrow_data();
            let mut data = self.buf.borrow_mut();
            for i in 0..self.len() {
                data[self.shape.offset_of(i)] = src_data[src.shape.offset_of(i)];
            }
        }
        Ok(())
    }

    /// Broadcast a scalar through the view, overwriting every element.
    pub fn fill(&self, value: T) {
        let mut data = self.buf.borrow_mut();
        for i in 0..self.len() {
            data[self.shape.offset_of(i)] = value;
        }
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Iterate over the elements in logical order, by value.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len()).map(move |i| self.buf.borrow()[self.shape.offset_of(i)])
    }

    /// Copy the elements into a `Vec` in logical order.
    pub fn to_vec(&self) -> Vec<T> {
        let data = self.borrow_data();
        (0..self.len())
            .map(|i| data[self.shape.offset_of(i)])
            .collect()
    }

    // ------------------------------------------------------------------
    // Map / apply
    // ------------------------------------------------------------------

    /// Apply a function to every element, returning a fresh owned vector.
    pub fn map<F>(&self, f: F) -> Vector<T>
    where
        F: Fn(T) -> T,
    {
        Vector::from_vec(self.to_vec().into_iter().map(f).collect())
    }

    /// Apply a function element-wise to two vectors of the same length,
    /// returning a fresh owned vector.
    pub fn zip_map<F>(&self, other: &Vector<T>, f: F) -> Result<Vector<T>>
    where
        F: Fn(T, T) -> T,
    {
        if self.len() != other.len() {
            return Err(Error::ShapeMismatch {
                lhs: vec![self.len()],
                rhs: vec![other.len()],
            });
        }
        let lhs = self.to_vec();
        let rhs = other.to_vec();
        Ok(Vector::from_vec(
            lhs.into_iter().zip(rhs).map(|(a, b)| f(a, b)).collect(),
        ))
    }

    /// Apply a function to every element in place, through the view.
    pub fn apply<F>(&self, f: F)
    where
        F: Fn(T) -> T,
    {
        let mut data = self.buf.borrow_mut();
        for i in 0..self.len() {
            let off = self.shape.offset_of(i);
            data[off] = f(data[off]);
        }
    }

    fn borrow_data(&self) -> std::cell::Ref<'_, Vec<T>> {
        self.buf.borrow()
    }
}

impl<T: Element> PartialEq for Vector<T> {
    /// Logical equality: same length, same element values, regardless of
    /// stride, offset, or which buffer backs each view.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_negative_index() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        assert_eq!(v.get(0).unwrap(), 1);
        assert_eq!(v.get(-1).unwrap(), 3);
        v.set(-2, 20).unwrap();
        assert_eq!(v.to_vec(), vec![1, 20, 3]);
        assert!(v.get(3).is_err());
    }

    #[test]
    fn test_negative_index_equivalence() {
        let v = Vector::from_vec(vec![10, 11, 12, 13]);
        let n = v.len() as isize;
        for i in 0..n {
            assert_eq!(v.get(i).unwrap(), v.get(i - n).unwrap());
        }
    }

    #[test]
    fn test_slice_view_aliases_parent() {
        let v = Vector::from_vec(vec![1, 2, 3, 4, 5]);
        let s = v.slice(1, 4).unwrap();
        assert_eq!(s.to_vec(), vec![2, 3, 4]);
        assert!(s.aliases(&v));

        s.set(0, 99).unwrap();
        assert_eq!(v.to_vec(), vec![1, 99, 3, 4, 5]);

        v.set(3, 40).unwrap();
        assert_eq!(s.to_vec(), vec![99, 3, 40]);
    }

    #[test]
    fn test_stepped_view_aliases_parent() {
        let v = Vector::from_vec(vec![0, 1, 2, 3, 4, 5]);
        let s = v.view(Slice::StepRange(0, 6, 2)).unwrap();
        assert_eq!(s.to_vec(), vec![0, 2, 4]);
        s.fill(7);
        assert_eq!(v.to_vec(), vec![7, 1, 7, 3, 7, 5]);
    }

    #[test]
    fn test_view_of_view_composes() {
        let v = Vector::from_vec(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let evens = v.view(Slice::StepRange(0, 10, 2)).unwrap();
        let tail = evens.slice(2, 5).unwrap();
        assert_eq!(tail.to_vec(), vec![4, 6, 8]);
        tail.set(0, 44).unwrap();
        assert_eq!(v.get(4).unwrap(), 44);
    }

    #[test]
    fn test_reversed_view() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        let r = v.reversed();
        assert_eq!(r.to_vec(), vec![3, 2, 1]);
        r.set(0, 30).unwrap();
        assert_eq!(v.to_vec(), vec![1, 2, 30]);
    }

    #[test]
    fn test_select_copies() {
        let v = Vector::from_vec(vec![0, 1, 2, 3, 4]);
        let mask = Mask::from_slice(&[true, false, false, true, true]);
        let picked = v.select(&mask).unwrap();
        assert_eq!(picked.to_vec(), vec![0, 3, 4]);
        assert!(!picked.aliases(&v));

        picked.set(0, 100).unwrap();
        assert_eq!(v.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_select_length_mismatch() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        let mask = Mask::from_slice(&[true, false]);
        assert_eq!(
            v.select(&mask),
            Err(Error::MaskLengthMismatch {
                mask_len: 2,
                axis_len: 3
            })
        );
    }

    #[test]
    fn test_assign_round_trip() {
        let v = Vector::<i64>::zeros(5);
        let x = Vector::from_vec(vec![7, 8, 9]);
        v.slice(1, 4).unwrap().assign(&x).unwrap();
        assert_eq!(v.to_vec(), vec![0, 7, 8, 9, 0]);
        assert_eq!(v.slice(1, 4).unwrap().to_vec(), vec![7, 8, 9]);
    }

    #[test]
    fn test_assign_overlapping_reversal() {
        // Assigning a reversed view of a vector onto the vector itself
        // must observe the pre-write values.
        let v = Vector::from_vec(vec![1, 2, 3, 4]);
        v.assign(&v.reversed()).unwrap();
        assert_eq!(v.to_vec(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_assign_shape_mismatch() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        let w = Vector::from_vec(vec![1, 2]);
        assert!(v.assign(&w).is_err());
    }

    #[test]
    fn test_to_owned_breaks_aliasing() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        let o = v.slice(0, 2).unwrap().to_owned();
        o.set(0, 10).unwrap();
        assert_eq!(v.to_vec(), vec![1, 2, 3]);
        assert!(!o.aliases(&v));
    }

    #[test]
    fn test_map_and_zip_map() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        assert_eq!(v.map(|x| x * 10).to_vec(), vec![10, 20, 30]);

        let w = Vector::from_vec(vec![4, 5, 6]);
        let sum = v.zip_map(&w, |a, b| a + b).unwrap();
        assert_eq!(sum.to_vec(), vec![5, 7, 9]);
    }

    #[test]
    fn test_apply_through_view() {
        let v = Vector::from_vec(vec![1, 2, 3, 4]);
        v.slice(1, 3).unwrap().apply(|x| x * 100);
        assert_eq!(v.to_vec(), vec![1, 200, 300, 4]);
    }

    #[test]
    fn test_logical_eq_across_strides() {
        let v = Vector::from_vec(vec![1, 2, 3]);
        let w = Vector::from_vec(vec![3, 2, 1]).reversed();
        assert_eq!(v, w);
        assert_ne!(v, Vector::from_vec(vec![1, 2]));
    }
}
