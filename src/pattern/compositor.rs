//! Cell-wise OR overlay of same-shaped layers

use crate::io::error::{DotSpaceError, Result, invalid_parameter};
use ndarray::{Array2, Zip};
use num_traits::{One, Zero};

/// Check whether a layer has as many rows as columns
pub fn is_square<T>(layer: &Array2<T>) -> bool {
    let (rows, cols) = layer.dim();
    rows == cols
}

/// Overlay layers: a cell is a dot if it is a dot (non-zero) in any layer
///
/// # Errors
///
/// Returns an error if:
/// - No layers are supplied
/// - Layers do not all share the first layer's square shape
pub fn overlay<T>(layers: &[Array2<T>]) -> Result<Array2<T>>
where
    T: Copy + Zero + One,
{
    let first = layers.first().ok_or_else(|| {
        invalid_parameter("layers", &0, &"overlay needs at least one layer")
    })?;
    let shape = first.dim();
    if !is_square(first) {
        return Err(invalid_parameter(
            "layers",
            &format!("{}x{}", shape.0, shape.1),
            &"overlay requires square layers",
        ));
    }

    for layer in layers {
        if layer.dim() != shape {
            return Err(DotSpaceError::ShapeMismatch {
                expected: shape,
                found: layer.dim(),
            });
        }
    }

    let mut composite = Array2::<T>::zeros(shape);
    for layer in layers {
        Zip::from(&mut composite).and(layer).for_each(|out, &cell| {
            if !cell.is_zero() {
                *out = T::one();
            }
        });
    }

    Ok(composite)
}
