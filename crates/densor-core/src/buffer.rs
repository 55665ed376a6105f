//! The storage buffer: a flat, contiguous, mutable store of elements.
//!
//! A [`Buffer`] is reference-counted: cloning it yields another handle to
//! the *same* storage, which is how views alias one another. The engine is
//! single-threaded by contract, so the handle is `Rc`-based and not
//! `Send`/`Sync`; cross-thread sharing does not compile.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use log::trace;

use crate::element::Element;
use crate::error::{Error, Result};

/// A fixed-capacity, mutable, reference-counted store of elements.
///
/// All access is bounds-checked against the capacity fixed at allocation;
/// there is no implicit resizing. Storage is released when the last handle
/// (and therefore the last view) referencing it is dropped.
#[derive(Debug, Clone)]
pub struct Buffer<T> {
    cells: Rc<RefCell<Vec<T>>>,
}

impl<T: Element> Buffer<T> {
    /// Allocate a zero-initialized buffer of `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        trace!("allocating buffer of {capacity} elements");
        Self {
            cells: Rc::new(RefCell::new(vec![T::zero(); capacity])),
        }
    }

    /// Take ownership of existing data as a buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            cells: Rc::new(RefCell::new(data)),
        }
    }

    /// The fixed capacity of the buffer, in elements.
    pub fn capacity(&self) -> usize {
        self.cells.borrow().len()
    }

    /// Read the element at `offset`.
    pub fn read(&self, offset: usize) -> Result<T> {
        let cells = self.cells.borrow();
        cells
            .get(offset)
            .copied()
            .ok_or_else(|| Error::OutOfBounds {
                index: offset as isize,
                len: cells.len(),
            })
    }

    /// Write `value` to the element at `offset`.
    pub fn write(&self, offset: usize, value: T) -> Result<()> {
        let mut cells = self.cells.borrow_mut();
        let len = cells.len();
        match cells.get_mut(offset) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::OutOfBounds {
                index: offset as isize,
                len,
            }),
        }
    }

    /// Copy `count` elements starting at `src_offset` into `dst` starting at
    /// `dst_offset`.
    ///
    /// Both ranges are bounds-checked before any element moves. Copying
    /// within a single buffer goes through a temporary, so overlapping
    /// ranges are well defined.
    pub fn copy_range(
        &self,
        src_offset: usize,
        dst: &Buffer<T>,
        dst_offset: usize,
        count: usize,
    ) -> Result<()> {
        check_span(src_offset, count, self.capacity())?;
        check_span(dst_offset, count, dst.capacity())?;
        if Self::ptr_eq(self, dst) {
            let tmp: Vec<T> = self.cells.borrow()[src_offset..src_offset + count].to_vec();
            self.cells.borrow_mut()[dst_offset..dst_offset + count].copy_from_slice(&tmp);
        } else {
            let src = self.cells.borrow();
            dst.cells.borrow_mut()[dst_offset..dst_offset + count]
                .copy_from_slice(&src[src_offset..src_offset + count]);
        }
        Ok(())
    }

    /// Whether two handles reference the same storage.
    pub fn ptr_eq(a: &Buffer<T>, b: &Buffer<T>) -> bool {
        Rc::ptr_eq(&a.cells, &b.cells)
    }

    /// A copy of the entire storage in offset order.
    pub fn snapshot(&self) -> Vec<T> {
        self.cells.borrow().clone()
    }

    /// Shared access to the storage for bulk reads.
    pub(crate) fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.cells.borrow()
    }

    /// Exclusive access to the storage for bulk writes.
    pub(crate) fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.cells.borrow_mut()
    }
}

fn check_span(offset: usize, count: usize, capacity: usize) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    let end = offset.checked_add(count).unwrap_or(usize::MAX);
    if end > capacity {
        return Err(Error::OutOfBounds {
            index: (end - 1) as isize,
            len: capacity,
        });
    }
    Ok(())
}
