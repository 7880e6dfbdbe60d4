//! Gauss-Jordan inversion of the polynomial fit's coefficient matrix

use nalgebra::DMatrix;

/// Pivots below this fraction of the largest (equilibrated) entry mean the
/// matrix is treated as singular.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Gauss-Jordan inversion of a square matrix.
///
/// Rows and columns are first scaled to a unit diagonal, then the matrix
/// is reduced to upper triangular form with partial pivoting, then to
/// diagonal form, then normalized. Returns `None` for non-square, singular or
/// ill-conditioned input.
pub fn gauss_jordan_inverse(matrix: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let n = matrix.nrows();
    if n == 0 || matrix.ncols() != n || matrix.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let scale: Vec<f64> = (0..n)
        .map(|i| {
            let d = matrix[(i, i)];
            if d > 0.0 { 1.0 / d.sqrt() } else { 1.0 }
        })
        .collect();

    let mut b = DMatrix::from_fn(n, n, |r, c| matrix[(r, c)] * scale[r] * scale[c]);

    let largest = b.amax();
    if largest == 0.0 {
        return None;
    }
    let tolerance = largest * PIVOT_EPSILON;

    let mut a = DMatrix::<f64>::identity(n, n);

    // Upper triangle.
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| b[(i, col)].abs().total_cmp(&b[(j, col)].abs()))
            .unwrap_or(col);
        if b[(pivot, col)].abs() <= tolerance {
            return None;
        }
        if pivot != col {
            b.swap_rows(pivot, col);
            a.swap_rows(pivot, col);
        }

        for row in col + 1..n {
            let factor = b[(row, col)] / b[(col, col)];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                b[(row, k)] -= factor * b[(col, k)];
                a[(row, k)] -= factor * a[(col, k)];
            }
        }
    }

    // Diagonal. Only `a` needs updating: columns left of `col` in `b` are untouched.
    for col in (1..n).rev() {
        for row in 0..col {
            let factor = b[(row, col)] / b[(col, col)];
            for k in 0..n {
                a[(row, k)] -= factor * a[(col, k)];
            }
        }
    }

    for row in 0..n {
        let d = b[(row, row)];
        for k in 0..n {
            a[(row, k)] /= d;
        }
    }

    let inverse = DMatrix::from_fn(n, n, |r, c| a[(r, c)] * scale[r] * scale[c]);
    inverse.iter().all(|v| v.is_finite()).then_some(inverse)
}

/// One term of the polynomial basis: `x^(k / (order + 1)) * y^(k % (order + 1))`.
///
/// In the one-dimensional case `k <= order`, so only `y` contributes.
pub fn poly_term(coefficient: usize, x: i32, y: i32, order: u32) -> f64 {
    let stride = order as usize + 1;
    let x_power = (coefficient / stride) as i32;
    let y_power = (coefficient % stride) as i32;
    (x as f64).powi(x_power) * (y as f64).powi(y_power)
}
