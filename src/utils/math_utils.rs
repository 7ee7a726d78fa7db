//! Small numeric helpers shared by the kernels and the tracer.

/// Convert a `usize` into a `f64` (ignoring precision loss for very large values).
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let newval = value as f64;
    newval
}

/// Map a relative intensity onto an 8 bit alpha channel value.
///
/// The intensity is clamped to `0.0..=1.0` before scaling. `NaN` is mapped to 0.
#[must_use]
pub fn intensity_to_alpha(intensity: f64) -> u8 {
    if intensity.is_nan() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let alpha = (intensity.clamp(0.0, 1.0) * 255.0).round() as u8;
    alpha
}

/// Return `count` evenly spaced values covering `start..=end`.
///
/// A count of 1 yields the midpoint, a count of 0 an empty vector.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.5 * (start + end)],
        _ => {
            let step = (end - start) / usize_to_f64(count - 1);
            (0..count)
                .map(|i| usize_to_f64(i).mul_add(step, start))
                .collect()
        }
    }
}
