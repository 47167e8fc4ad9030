//! Small dense least-squares solver
//!
//! Enough linear algebra for the regression models: ridge-regularised
//! normal equations solved by Gaussian elimination with partial pivoting.

use algorithm_spi::{Result, TsError};

/// Solve `min ||X b - y||² + Σ penalty[j] * b[j]²`.
///
/// `x` is row-major with `n_cols` columns. `penalty` may be shorter than
/// `n_cols`; missing entries are zero.
pub fn ridge_least_squares(x: &[Vec<f64>], y: &[f64], penalty: &[f64]) -> Result<Vec<f64>> {
    let n_cols = x.first().map(Vec::len).unwrap_or(0);
    if n_cols == 0 || x.len() != y.len() {
        return Err(TsError::NumericalError(
            "design matrix is empty or misaligned".to_string(),
        ));
    }

    let mut xtx = vec![vec![0.0; n_cols]; n_cols];
    let mut xty = vec![0.0; n_cols];
    for (row, &target) in x.iter().zip(y) {
        for i in 0..n_cols {
            xty[i] += row[i] * target;
            for j in i..n_cols {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..n_cols {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
        xtx[i][i] += penalty.get(i).copied().unwrap_or(0.0) + 1e-9;
    }

    solve(xtx, xty)
}

/// Solve the square system `a x = b`.
pub fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return Err(TsError::NumericalError("singular system".to_string()));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_two_by_two() {
        let x = solve(vec![vec![2.0, 1.0], vec![1.0, 3.0]], vec![3.0, 5.0]).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-10);
        assert!((x[1] - 1.4).abs() < 1e-10);
    }

    #[test]
    fn test_singular_system() {
        let err = solve(vec![vec![1.0, 2.0], vec![2.0, 4.0]], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, TsError::NumericalError(_)));
    }

    #[test]
    fn test_least_squares_recovers_line() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![1.0, i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 3.0 + 0.5 * i as f64).collect();
        let b = ridge_least_squares(&x, &y, &[]).unwrap();
        assert!((b[0] - 3.0).abs() < 1e-6);
        assert!((b[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ridge_shrinks() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 2.0 * i as f64).collect();
        let free = ridge_least_squares(&x, &y, &[0.0]).unwrap();
        let shrunk = ridge_least_squares(&x, &y, &[100.0]).unwrap();
        assert!(shrunk[0].abs() < free[0].abs());
    }
}
