use nalgebra::DMatrix;
use tracing::debug;

use crate::hot_pixels::common::error::{HotPixelError, Result};
use crate::hot_pixels::weights::matrix::{gauss_jordan_inverse, poly_term};

/// Per-position weights reconstructing every pixel of a `width x height`
/// defect from the samples around it.
///
/// Weights are stored as one contiguous `positions x height x width` array.
#[derive(Debug, Clone, PartialEq)]
pub struct HotPixelsWeights {
    width: usize,
    height: usize,
    polynome_order: u32,
    two_dim: bool,
    positions: Vec<(i32, i32)>,
    weights: Vec<f64>,
}

/// Offsets, relative to the top-left pixel of the rectangle, of the samples
/// used for the fit.
///
/// Two-dimensional: every offset within `order` of the rectangle that lies
/// beside one of its edges, plus corner offsets whose Manhattan distance from
/// the nearest corner pixel is below `order + 2`. One-dimensional: `order`
/// offsets before and after the span along `y`, with `x = 0`.
pub fn sample_positions(width: usize, height: usize, order: u32, two_dim: bool) -> Vec<(i32, i32)> {
    let o = order as i32;
    let w = width as i32;
    let h = height as i32;

    if !two_dim {
        return (-o..0).chain(h..h + o).map(|y| (0, y)).collect();
    }

    let outside = |v: i32, size: i32| {
        if v < 0 {
            -v
        } else if v >= size {
            v - size + 1
        } else {
            0
        }
    };

    let mut positions = Vec::new();
    for y in -o..h + o {
        for x in -o..w + o {
            let dx = outside(x, w);
            let dy = outside(y, h);
            let keep = match (dx > 0, dy > 0) {
                (false, false) => false,
                (true, true) => dx + dy < o + 2,
                _ => true,
            };
            if keep {
                positions.push((x, y));
            }
        }
    }
    positions
}

/// Coefficient matrix `M[i][k] = sum over positions of term_i * term_k`.
pub fn coefficient_matrix(positions: &[(i32, i32)], polynome_order: u32, two_dim: bool) -> DMatrix<f64> {
    let coefficient_number = HotPixelsWeights::coefficients_for(polynome_order, two_dim);
    let terms = basis_terms(positions, coefficient_number, polynome_order);
    normal_matrix(&terms, coefficient_number, positions.len())
}

/// `terms[i * n + j]`: basis term `i` at sample position `j`.
fn basis_terms(positions: &[(i32, i32)], coefficient_number: usize, polynome_order: u32) -> Vec<f64> {
    let n = positions.len();
    let mut terms = vec![0.0; coefficient_number * n];
    for i in 0..coefficient_number {
        for (j, &(x, y)) in positions.iter().enumerate() {
            terms[i * n + j] = poly_term(i, x, y, polynome_order);
        }
    }
    terms
}

fn normal_matrix(terms: &[f64], coefficient_number: usize, n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(coefficient_number, coefficient_number, |i, k| {
        (0..n).map(|j| terms[i * n + j] * terms[k * n + j]).sum()
    })
}

impl HotPixelsWeights {
    /// Computes the weights for one rectangle shape.
    ///
    /// In the one-dimensional case `width` is 1 and `height` is the length of
    /// the defect along the interpolation axis.
    pub fn calculate(width: usize, height: usize, polynome_order: u32, two_dim: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HotPixelError::InvalidDimensions(width, height));
        }

        let coefficient_number = Self::coefficients_for(polynome_order, two_dim);
        let positions = sample_positions(width, height, polynome_order, two_dim);
        let n = positions.len();

        debug!(
            "Calculating weights: {}x{}, order {}, two_dim {}, {} positions",
            width, height, polynome_order, two_dim, n
        );

        let singular = || HotPixelError::SingularWeightMatrix {
            width: width as u32,
            height: height as u32,
            order: polynome_order,
        };
        if n == 0 {
            return Err(singular());
        }

        let terms = basis_terms(&positions, coefficient_number, polynome_order);
        let inverse = gauss_jordan_inverse(&normal_matrix(&terms, coefficient_number, n)).ok_or_else(singular)?;

        let scale = n as f64;
        let mut projected = vec![0.0; coefficient_number * n];
        for i in 0..coefficient_number {
            for j in 0..n {
                projected[i * n + j] = (0..coefficient_number)
                    .map(|k| inverse[(i, k)] * terms[k * n + j] * scale)
                    .sum();
            }
        }

        let mut weights = vec![0.0; n * height * width];
        for y in 0..height {
            for x in 0..width {
                for j in 0..n {
                    let value: f64 = (0..coefficient_number)
                        .map(|i| projected[i * n + j] * poly_term(i, x as i32, y as i32, polynome_order))
                        .sum();
                    weights[(j * height + y) * width + x] = value * scale;
                }
            }
        }

        Ok(Self {
            width,
            height,
            polynome_order,
            two_dim,
            positions,
            weights,
        })
    }

    fn coefficients_for(order: u32, two_dim: bool) -> usize {
        let per_axis = order as usize + 1;
        if two_dim { per_axis * per_axis } else { per_axis }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn polynome_order(&self) -> u32 {
        self.polynome_order
    }

    pub fn two_dim(&self) -> bool {
        self.two_dim
    }

    pub fn coefficient_number(&self) -> usize {
        Self::coefficients_for(self.polynome_order, self.two_dim)
    }

    pub fn positions(&self) -> &[(i32, i32)] {
        &self.positions
    }

    /// Weight of sample `position` for the pixel at `(x, y)` inside the rectangle.
    pub fn weight(&self, position: usize, y: usize, x: usize) -> f64 {
        self.weights[(position * self.height + y) * self.width + x]
    }
}
