//! # Densor
//!
//! Dense vectors and matrices with explicit view/aliasing semantics:
//! slicing, stepped and reversed views, boolean masking, broadcasting, and
//! matrix products over reference-counted, mutable storage buffers.
//!
//! One `use densor::prelude::*;` gives you the whole engine.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `serde` | `Serialize`/`Deserialize` for vectors and matrices |

pub use densor_core as core;

/// Glob-import convenience: `use densor::prelude::*;`
pub mod prelude {
    pub use densor_core::prelude::*;
}
