//! Utility functions and helpers

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    // Running mean, finite whenever every input is finite
    Some(
        values
            .iter()
            .enumerate()
            .fold(0.0, |acc, (i, x)| acc + (x - acc) / (i + 1) as f64),
    )
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
