//! Optional `serde` support (cargo feature `serde`).
//!
//! Views serialize their *logical* content: a reversed or transposed view
//! round-trips as the values it presents, not its storage layout.
//! Deserialized values always own a fresh, contiguous buffer.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::element::Element;
use crate::matrix::Matrix;
use crate::vector::Vector;

#[derive(Serialize, Deserialize)]
struct RawVector<T> {
    data: Vec<T>,
}

#[derive(Serialize, Deserialize)]
struct RawMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element + Serialize> Serialize for Vector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawVector { data: self.to_vec() }.serialize(serializer)
    }
}

impl<'de, T: Element + Deserialize<'de>> Deserialize<'de> for Vector<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawVector::<T>::deserialize(deserializer)?;
        Ok(Vector::from_vec(raw.data))
    }
}

impl<T: Element + Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (rows, cols) = self.shape();
        RawMatrix {
            rows,
            cols,
            data: self.to_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Element + Deserialize<'de>> Deserialize<'de> for Matrix<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMatrix::<T>::deserialize(deserializer)?;
        Matrix::from_vec(raw.data, raw.rows, raw.cols).map_err(D::Error::custom)
    }
}
