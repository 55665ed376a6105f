//! A tour of the engine: views that alias, masks that copy, and products.
//!
//! Run with `RUST_LOG=trace cargo run --example tour` to see the
//! allocation and matmul traces.

use densor::prelude::*;

fn main() {
    env_logger::init();

    // Views alias their parent: writing through the slice edits `v`.
    let v = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let middle = v.slice(1, 4).unwrap();
    middle.fill(0.0);
    println!("after zeroing the middle slice: {v}");

    // A stepped view walks every other element of the same storage.
    let evens = v.view(Slice::StepRange(0, 5, 2)).unwrap();
    println!("every other element:           {evens}");

    // Masks copy: the selection is independent of `v`.
    let picked = v.select(&v.eq_scalar(0.0)).unwrap();
    picked.fill(9.0);
    println!("selection mutated, source not: {v}");

    // Matrices: transpose is a view, products are fresh.
    let m = Matrix::from_vec(vec![2.0, 3.0, 5.0, 6.0, 8.0, 9.0], 3, 2).unwrap();
    let x = Vector::from_vec(vec![1.0, 2.0]);
    println!("m x [1, 2] = {}", m.matvec(&x).unwrap());

    let gram = matmul(&m.transpose(), &m).unwrap();
    println!("m^T x m =\n{gram}");
}
