//! Missing values and mask-border filling.
//!
//! Missing cells are NaN (any non-finite value counts as missing). Filling
//! grows valid data outwards into the mask one ring of cells at a time, which
//! is used to soften land/sea edges of coarse datasets before regridding or
//! plotting.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use tracing::debug;

/// Value used for missing cells
pub const MISSING: f32 = f32::NAN;

/// Whether a value counts as missing
pub fn is_missing(value: f32) -> bool {
    !value.is_finite()
}

/// Number of missing cells in an array
pub fn count_missing<S>(array: &ArrayBase<S, Ix2>) -> usize
where
    S: Data<Elem = f32>,
{
    array.iter().filter(|v| is_missing(**v)).count()
}

/// Fill `layers` rings of missing cells that border valid data.
///
/// Each pass replaces every missing cell that has at least one valid cell in
/// its 8-neighborhood with the mean of those valid neighbors, using the state
/// left by the previous pass. Valid cells are never modified and cells with no
/// valid neighbor stay missing.
pub fn fill_mask_borders<S>(array: &ArrayBase<S, Ix2>, layers: usize) -> Array2<f32>
where
    S: Data<Elem = f32>,
{
    let mut current = array.to_owned();
    let (num_y, num_x) = current.dim();

    for layer in 0..layers {
        let mut next = current.clone();
        let mut filled = 0usize;

        for ((i, j), &value) in current.indexed_iter() {
            if !is_missing(value) {
                continue;
            }

            let mut sum = 0.0f64;
            let mut count = 0usize;
            for di in -1isize..=1 {
                for dj in -1isize..=1 {
                    if di == 0 && dj == 0 {
                        continue;
                    }
                    let ni = i as isize + di;
                    let nj = j as isize + dj;
                    if ni < 0 || nj < 0 || ni >= num_y as isize || nj >= num_x as isize {
                        continue;
                    }
                    let neighbor = current[[ni as usize, nj as usize]];
                    if !is_missing(neighbor) {
                        sum += neighbor as f64;
                        count += 1;
                    }
                }
            }

            if count > 0 {
                next[[i, j]] = (sum / count as f64) as f32;
                filled += 1;
            }
        }

        debug!(
            operation = "fill_mask_borders",
            layer = layer + 1,
            filled = filled,
            "Filled mask border layer"
        );

        current = next;
        if filled == 0 {
            break;
        }
    }

    current
}

/// [`fill_mask_borders`] with a single layer
pub fn fill_mask_borders_default<S>(array: &ArrayBase<S, Ix2>) -> Array2<f32>
where
    S: Data<Elem = f32>,
{
    fill_mask_borders(array, 1)
}
