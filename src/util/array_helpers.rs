//! Dimension-checked vector and matrix arithmetic.
//!
//! ndarray panics on shape disagreement, these wrappers report a
//! `NetError::DimensionMismatch` instead. Every function borrows its operands
//! and allocates a fresh result, so a failed call leaves all inputs untouched.

use ndarray::{Array, Array2, ArrayView1, ArrayView2, Zip};

use crate::err::{check_dim, NetResult};
use crate::util::{DataVec, Float, WsMat};

pub fn add(a: ArrayView1<Float>, b: ArrayView1<Float>) -> NetResult<DataVec> {
    check_dim("add", a.len(), b.len())?;
    Ok(&a + &b)
}

pub fn sub(a: ArrayView1<Float>, b: ArrayView1<Float>) -> NetResult<DataVec> {
    check_dim("sub", a.len(), b.len())?;
    Ok(&a - &b)
}

/// Element-wise product
pub fn hadamard(a: ArrayView1<Float>, b: ArrayView1<Float>) -> NetResult<DataVec> {
    check_dim("hadamard", a.len(), b.len())?;
    Ok(&a * &b)
}

pub fn dot(a: ArrayView1<Float>, b: ArrayView1<Float>) -> NetResult<Float> {
    check_dim("dot", a.len(), b.len())?;
    Ok(a.dot(&b))
}

/// `m · v`, requires `m.ncols() == v.len()`
pub fn mat_vec(m: ArrayView2<Float>, v: ArrayView1<Float>) -> NetResult<DataVec> {
    check_dim("mat_vec", m.ncols(), v.len())?;
    Ok(m.dot(&v))
}

/// `a · b`, requires `a.ncols() == b.nrows()`
pub fn mat_mul(a: ArrayView2<Float>, b: ArrayView2<Float>) -> NetResult<WsMat> {
    check_dim("mat_mul", a.ncols(), b.nrows())?;
    Ok(a.dot(&b))
}

pub fn transpose(m: ArrayView2<Float>) -> WsMat {
    m.t().to_owned()
}

/// Outer product, `out[i, j] = a[i] * b[j]`
pub fn outer(a: ArrayView1<Float>, b: ArrayView1<Float>) -> WsMat {
    let mut out = Array2::zeros((a.len(), b.len()));

    Zip::indexed(&mut out).for_each(|(i, j), el| {
        *el = a[i] * b[j];
    });

    out
}

pub fn max<D>(arr: &Array<Float, D>) -> Float
where
    D: ndarray::Dimension,
{
    arr.fold(Float::MIN, |out, val| if *val > out { *val } else { out })
}

pub fn min<D>(arr: &Array<Float, D>) -> Float
where
    D: ndarray::Dimension,
{
    arr.fold(Float::MAX, |out, val| if *val < out { *val } else { out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::NetError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_vector_ops() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![4.0, 5.0, 6.0];

        assert_eq!(add(a.view(), b.view()).unwrap(), array![5.0, 7.0, 9.0]);
        assert_eq!(sub(b.view(), a.view()).unwrap(), array![3.0, 3.0, 3.0]);
        assert_eq!(hadamard(a.view(), b.view()).unwrap(), array![4.0, 10.0, 18.0]);
        assert_abs_diff_eq!(dot(a.view(), b.view()).unwrap(), 32.0);
    }

    #[test]
    fn test_matrix_ops() {
        // 3 x 2
        let m = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let v = array![1.0, -1.0];

        assert_eq!(mat_vec(m.view(), v.view()).unwrap(), array![-1.0, -1.0, -1.0]);

        let t = transpose(m.view());
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t[[1, 2]], 6.0);

        let sq = mat_mul(t.view(), m.view()).unwrap();
        assert_eq!(sq, array![[35.0, 44.0], [44.0, 56.0]]);

        let o = outer(array![1.0, 2.0].view(), array![3.0, 4.0, 5.0].view());
        assert_eq!(o, array![[3.0, 4.0, 5.0], [6.0, 8.0, 10.0]]);

        assert_eq!(max(&o), 10.0);
        assert_eq!(min(&o), 3.0);
    }

    #[test]
    fn test_mismatch_fails() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![1.0, 2.0];
        let m = array![[1.0, 2.0], [3.0, 4.0]];

        assert!(matches!(
            add(a.view(), b.view()),
            Err(NetError::DimensionMismatch { op: "add", expected: 3, actual: 2 })
        ));
        assert!(sub(a.view(), b.view()).is_err());
        assert!(hadamard(a.view(), b.view()).is_err());
        assert!(dot(a.view(), b.view()).is_err());
        assert!(mat_vec(m.view(), a.view()).is_err());
        assert!(mat_mul(m.view(), a.view().insert_axis(ndarray::Axis(0))).is_err());

        // operands are untouched
        assert_eq!(a, array![1.0, 2.0, 3.0]);
        assert_eq!(b, array![1.0, 2.0]);
    }
}
