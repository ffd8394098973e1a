/// Roulette-wheel selection over non-negative weights
///
/// `draw` is a uniform sample in `[0, 1)`. Zero weights occupy no width on the
/// wheel, so they are never returned. Returns `None` when the weights sum to
/// zero or less.
pub fn roulette_index(weights: &[f64], draw: f64) -> Option<usize> {
    let total = weight_total(weights);
    if total <= 0.0 {
        return None;
    }

    let mut remaining = draw * total;
    let mut last_positive = None;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        last_positive = Some(i);
        if remaining < weight {
            return Some(i);
        }
        remaining -= weight;
    }

    // Rounding can leave a sliver past the final slot
    last_positive
}

/// Sum of the positive weights
pub fn weight_total(weights: &[f64]) -> f64 {
    weights.iter().filter(|&&weight| weight > 0.0).sum()
}
