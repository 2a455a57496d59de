use ndarray::{ArrayView1, Zip};

use crate::err::{check_dim, NetResult};
use crate::util::{DataVec, Float};

/// Loss between the network output and the expected output.
///
/// Implementors provide the scalar forms, vector forms apply them
/// element-wise and fail on unequal dimensions.
pub trait ErrorFunction {
    fn error(&self, result: Float, expected: Float) -> Float;

    /// Change in error with respect to `result`
    fn derivative_error(&self, result: Float, expected: Float) -> Float;

    fn name(&self) -> &str;

    fn error_vec(&self, result: ArrayView1<Float>, expected: ArrayView1<Float>) -> NetResult<DataVec> {
        check_dim("error_vec", result.len(), expected.len())?;

        Ok(Zip::from(&result)
            .and(&expected)
            .map_collect(|r, e| self.error(*r, *e)))
    }

    fn derivative_error_vec(
        &self,
        result: ArrayView1<Float>,
        expected: ArrayView1<Float>,
    ) -> NetResult<DataVec> {
        check_dim("derivative_error_vec", result.len(), expected.len())?;

        Ok(Zip::from(&result)
            .and(&expected)
            .map_collect(|r, e| self.derivative_error(*r, *e)))
    }

    fn total_error(&self, result: ArrayView1<Float>, expected: ArrayView1<Float>) -> NetResult<Float> {
        Ok(self.error_vec(result, expected)?.sum())
    }
}

/// `(expected - result)^2 / 2` per element
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredError;

impl ErrorFunction for SquaredError {
    fn error(&self, result: Float, expected: Float) -> Float {
        (expected - result).powi(2) / 2.0
    }

    fn derivative_error(&self, result: Float, expected: Float) -> Float {
        result - expected
    }

    fn name(&self) -> &str {
        "squared_error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_scalar() {
        let se = SquaredError;

        assert_abs_diff_eq!(se.error(0.25, 1.0), 0.28125);
        assert_abs_diff_eq!(se.error(1.0, 0.25), 0.28125);
        assert_eq!(se.derivative_error(0.25, 1.0), -0.75);
        assert_eq!(se.derivative_error(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_vector_and_total() {
        let se = SquaredError;
        let out = array![0.5, 0.0, 1.0];
        let exp = array![1.0, 0.0, 0.0];

        let errs = se.error_vec(out.view(), exp.view()).unwrap();
        assert_eq!(errs, array![0.125, 0.0, 0.5]);

        let derivs = se.derivative_error_vec(out.view(), exp.view()).unwrap();
        assert_eq!(derivs, array![-0.5, 0.0, 1.0]);

        assert_abs_diff_eq!(se.total_error(out.view(), exp.view()).unwrap(), 0.625);
    }

    #[test]
    fn test_vector_mismatch() {
        let se = SquaredError;
        let out = array![0.5, 0.0];
        let exp = array![1.0];

        assert!(se.error_vec(out.view(), exp.view()).is_err());
        assert!(se.derivative_error_vec(out.view(), exp.view()).is_err());
        assert!(se.total_error(out.view(), exp.view()).is_err());
    }
}
