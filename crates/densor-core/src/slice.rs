//! Index-expression resolution.
//!
//! A [`Slice`] describes which elements to take along one axis. Resolution
//! turns it into a new axis descriptor (length and stride) plus an offset
//! shift, without touching any storage; every affine slice is a view.
//! Boolean-mask selection is the one non-affine form and is resolved by the
//! view types themselves, because it has to copy.
//!
//! Negative indices count from the end of the axis. The single exception is
//! the *end* bound of a negative-step range, which is taken literally so
//! that `StepRange(len - 1, -1, -1)` can reverse an axis down to and
//! including index 0.

use crate::error::{Error, Result};

/// A range specification for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    /// Half-open contiguous range `start..end`.
    Range(isize, isize),
    /// Stepped range `start..end` advancing by `step` (negative reverses).
    StepRange(isize, isize, isize),
    /// The entire extent of the axis.
    Full,
}

/// One logical axis of a view: its extent and its stride through storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Axis {
    pub len: usize,
    pub stride: isize,
}

/// Resolve a scalar index against an axis length, counting negative indices
/// from the end.
pub(crate) fn resolve_index(len: usize, index: isize) -> Result<usize> {
    let resolved = if index < 0 {
        len as isize + index
    } else {
        index
    };
    if resolved < 0 || resolved >= len as isize {
        return Err(Error::OutOfBounds { index, len });
    }
    Ok(resolved as usize)
}

/// Resolve a slice specification against an axis.
///
/// Returns the derived axis and the offset shift in elements (relative to
/// the axis origin, already scaled by the stride).
pub(crate) fn resolve_slice(axis: Axis, spec: Slice) -> Result<(Axis, isize)> {
    match spec {
        Slice::Full => Ok((axis, 0)),
        Slice::Range(start, end) => {
            let a = normalize(start, axis.len);
            let b = normalize(end, axis.len);
            if a < 0 || a > b || b > axis.len as isize {
                return Err(Error::InvalidRange {
                    start,
                    end,
                    len: axis.len,
                });
            }
            Ok((
                Axis {
                    len: (b - a) as usize,
                    stride: axis.stride,
                },
                a * axis.stride,
            ))
        }
        Slice::StepRange(start, end, step) => {
            if step == 0 {
                return Err(Error::InvalidStep { start, end, step });
            }
            if step > 0 {
                let a = normalize(start, axis.len);
                let b = normalize(end, axis.len);
                if a < 0 || a > b || b > axis.len as isize {
                    return Err(Error::InvalidRange {
                        start,
                        end,
                        len: axis.len,
                    });
                }
                let count = (b - a + step - 1) / step;
                Ok((
                    Axis {
                        len: count as usize,
                        stride: axis.stride * step,
                    },
                    a * axis.stride,
                ))
            } else {
                // Reversed: start counts from the end, end is literal and
                // exclusive (so -1 means "down to and including index 0").
                let a = normalize(start, axis.len);
                let b = end;
                if a < 0 || a >= axis.len as isize || b < -1 || b >= a {
                    return Err(Error::InvalidRange {
                        start,
                        end,
                        len: axis.len,
                    });
                }
                let count = (a - b - step - 1) / -step;
                Ok((
                    Axis {
                        len: count as usize,
                        stride: axis.stride * step,
                    },
                    a * axis.stride,
                ))
            }
        }
    }
}

fn normalize(bound: isize, len: usize) -> isize {
    if bound < 0 {
        len as isize + bound
    } else {
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXIS5: Axis = Axis { len: 5, stride: 1 };

    #[test]
    fn test_resolve_index_positive() {
        assert_eq!(resolve_index(5, 0).unwrap(), 0);
        assert_eq!(resolve_index(5, 4).unwrap(), 4);
    }

    #[test]
    fn test_resolve_index_negative() {
        assert_eq!(resolve_index(5, -1).unwrap(), 4);
        assert_eq!(resolve_index(5, -5).unwrap(), 0);
    }

    #[test]
    fn test_resolve_index_out_of_range() {
        assert!(resolve_index(5, 5).is_err());
        assert!(resolve_index(5, -6).is_err());
        assert_eq!(
            resolve_index(3, 7),
            Err(Error::OutOfBounds { index: 7, len: 3 })
        );
    }

    #[test]
    fn test_range_basic() {
        let (axis, delta) = resolve_slice(AXIS5, Slice::Range(1, 4)).unwrap();
        assert_eq!(axis, Axis { len: 3, stride: 1 });
        assert_eq!(delta, 1);
    }

    #[test]
    fn test_range_negative_bounds() {
        // [-4, -1) on len 5 == [1, 4)
        let (axis, delta) = resolve_slice(AXIS5, Slice::Range(-4, -1)).unwrap();
        assert_eq!(axis.len, 3);
        assert_eq!(delta, 1);
    }

    #[test]
    fn test_range_empty() {
        let (axis, _) = resolve_slice(AXIS5, Slice::Range(2, 2)).unwrap();
        assert_eq!(axis.len, 0);
    }

    #[test]
    fn test_range_invalid() {
        assert!(resolve_slice(AXIS5, Slice::Range(3, 2)).is_err());
        assert!(resolve_slice(AXIS5, Slice::Range(0, 6)).is_err());
        assert!(resolve_slice(AXIS5, Slice::Range(-6, 2)).is_err());
    }

    #[test]
    fn test_step_range_length_is_ceil() {
        // [0, 5) step 2 -> indices 0, 2, 4
        let (axis, delta) = resolve_slice(AXIS5, Slice::StepRange(0, 5, 2)).unwrap();
        assert_eq!(axis, Axis { len: 3, stride: 2 });
        assert_eq!(delta, 0);

        // [1, 5) step 3 -> indices 1, 4
        let (axis, delta) = resolve_slice(AXIS5, Slice::StepRange(1, 5, 3)).unwrap();
        assert_eq!(axis, Axis { len: 2, stride: 3 });
        assert_eq!(delta, 1);
    }

    #[test]
    fn test_step_range_zero_step() {
        assert_eq!(
            resolve_slice(AXIS5, Slice::StepRange(0, 5, 0)),
            Err(Error::InvalidStep {
                start: 0,
                end: 5,
                step: 0
            })
        );
    }

    #[test]
    fn test_step_range_reversed_full() {
        // [4, -1) step -1 -> indices 4, 3, 2, 1, 0
        let (axis, delta) = resolve_slice(AXIS5, Slice::StepRange(4, -1, -1)).unwrap();
        assert_eq!(axis, Axis { len: 5, stride: -1 });
        assert_eq!(delta, 4);
    }

    #[test]
    fn test_step_range_reversed_start_from_end() {
        // start -1 counts from the end: same as start 4
        let (axis, delta) = resolve_slice(AXIS5, Slice::StepRange(-1, 1, -2)).unwrap();
        // indices 4, 2
        assert_eq!(axis, Axis { len: 2, stride: -2 });
        assert_eq!(delta, 4);
    }

    #[test]
    fn test_step_range_reversed_requires_descending_bounds() {
        assert!(resolve_slice(AXIS5, Slice::StepRange(1, 3, -1)).is_err());
        assert!(resolve_slice(AXIS5, Slice::StepRange(2, 2, -1)).is_err());
    }

    #[test]
    fn test_stride_composition() {
        // Slicing an already-stepped axis multiplies strides.
        let stepped = Axis { len: 5, stride: 3 };
        let (axis, delta) = resolve_slice(stepped, Slice::StepRange(1, 5, 2)).unwrap();
        assert_eq!(axis, Axis { len: 2, stride: 6 });
        assert_eq!(delta, 3);
    }

    #[test]
    fn test_full_preserves_axis() {
        let stepped = Axis { len: 4, stride: -2 };
        let (axis, delta) = resolve_slice(stepped, Slice::Full).unwrap();
        assert_eq!(axis, stepped);
        assert_eq!(delta, 0);
    }
}
