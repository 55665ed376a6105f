//! End-to-end tests of the engine's aliasing and operator contracts,
//! exercising the public API the way an embedding caller would.

use densor_core::prelude::*;

#[test]
fn slice_views_alias_all_the_way_down() {
    // parent -> stepped view -> contiguous sub-view: one write at the
    // bottom is visible at every level.
    let v = Vector::from_vec(vec![0_i64, 1, 2, 3, 4, 5, 6, 7]);
    let evens = v.view(Slice::StepRange(0, 8, 2)).unwrap();
    let inner = evens.slice(1, 3).unwrap();

    inner.set(0, -1).unwrap();
    assert_eq!(inner.get(0).unwrap(), -1);
    assert_eq!(evens.get(1).unwrap(), -1);
    assert_eq!(v.get(2).unwrap(), -1);
}

#[test]
fn mask_selection_never_aliases() {
    let v = Vector::from_vec(vec![0, 1, 2, 3, 4]);
    let mask = Mask::from_slice(&[true, false, false, true, true]);
    let picked = v.select(&mask).unwrap();
    assert_eq!(picked.to_vec(), vec![0, 3, 4]);

    picked.fill(99);
    assert_eq!(v.to_vec(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn assign_through_a_slice_round_trips() {
    let v = Vector::<f64>::zeros(6);
    let target = v.slice(2, 5).unwrap();
    target.assign(&Vector::from_vec(vec![1.0, 2.0, 3.0])).unwrap();
    assert_eq!(v.slice(2, 5).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
    assert_eq!(v.to_vec(), vec![0.0, 0.0, 1.0, 2.0, 3.0, 0.0]);
}

#[test]
fn overlapping_assignment_reads_before_writing() {
    let v = Vector::from_vec(vec![1, 2, 3, 4, 5]);
    v.assign(&v.reversed()).unwrap();
    assert_eq!(v.to_vec(), vec![5, 4, 3, 2, 1]);
}

#[test]
fn transpose_is_an_involution_and_a_view() {
    let m = Matrix::<i32>::tabulate(3, 4, |r, c| (r * 4 + c) as i32);
    let t = m.transpose();
    assert_eq!(t.shape(), (4, 3));
    assert_eq!(m.transpose().transpose(), m);

    // one storage, two orientations
    t.set(3, 0, -7).unwrap();
    assert_eq!(m.get(0, 3).unwrap(), -7);
}

#[test]
fn matrix_vector_product_known_values() {
    // [[2,3],[5,6],[8,9]] x [1,2] = [8,17,26]
    let m1 = Matrix::from_vec(vec![2.0, 3.0, 5.0, 6.0, 8.0, 9.0], 3, 2).unwrap();
    let v = Vector::from_vec(vec![1.0, 2.0]);
    assert_eq!(m1.matvec(&v).unwrap().to_vec(), vec![8.0, 17.0, 26.0]);

    // nonconforming inner dimensions fail loudly
    let m2 = Matrix::<f64>::zeros(3, 3);
    assert!(matches!(
        m1.matmul(&m2),
        Err(Error::DimensionMismatch { .. })
    ));
}

#[test]
fn matmul_associativity_within_tolerance() {
    let a = Matrix::<f64>::random_seeded(4, 3, 11);
    let b = Matrix::<f64>::random_seeded(3, 5, 12);
    let c = Matrix::<f64>::random_seeded(5, 2, 13);

    let left = matmul(&matmul(&a, &b).unwrap(), &c).unwrap();
    let right = matmul(&a, &matmul(&b, &c).unwrap()).unwrap();
    assert_eq!(left.shape(), right.shape());
    for (l, r) in left.iter().zip(right.iter()) {
        assert!((l - r).abs() < 1e-12, "{l} vs {r}");
    }
}

#[test]
fn elementwise_known_values() {
    let v = Vector::from_vec(vec![1, 2, 3]);
    assert_eq!((&v * 2).to_vec(), vec![2, 4, 6]);
    assert_eq!(
        (&v + &Vector::from_vec(vec![4, 5, 6])).to_vec(),
        vec![5, 7, 9]
    );
}

#[test]
fn comparison_masks_chain_into_selection() {
    let v = Vector::<f64>::linspace(0.0, 10.0, 10).unwrap();
    let upper = v.select(&v.gt_scalar(5.0)).unwrap();
    assert_eq!(upper.len(), 5);
    assert!(upper.iter().all(|x| x > 5.0));

    // mutating the selection leaves the source untouched
    upper.fill(0.0);
    assert!((v.get(-1).unwrap() - 10.0).abs() < 1e-12);
}

#[test]
fn block_update_through_matrix_views() {
    let m = Matrix::<i64>::zeros(4, 4);
    let block = m.view(Slice::Range(1, 3), Slice::Range(1, 3)).unwrap();
    block.fill(5);
    m.row(0).unwrap().fill(1);

    assert_eq!(
        m.to_vec(),
        vec![1, 1, 1, 1, 0, 5, 5, 0, 0, 5, 5, 0, 0, 0, 0, 0]
    );

    // column view of the mutated matrix reads through the same storage
    assert_eq!(m.col(1).unwrap().to_vec(), vec![1, 5, 5, 0]);
}

#[test]
fn row_mask_filters_matrix_rows_without_aliasing() {
    let m = Matrix::<i32>::tabulate(4, 2, |r, c| (r * 2 + c) as i32);
    let kept = m
        .select_rows(&Mask::from_slice(&[false, true, false, true]))
        .unwrap();
    assert_eq!(kept.shape(), (2, 2));
    assert_eq!(kept.to_vec(), vec![2, 3, 6, 7]);

    kept.fill(0);
    assert_eq!(m.get(1, 0).unwrap(), 2);
}
