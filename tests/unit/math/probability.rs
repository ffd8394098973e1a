//! Tests for roulette-wheel selection and weight normalization

#[cfg(test)]
mod tests {
    use socketwfc::math::probability::{roulette_index, weight_total};

    // Tests the draw lands in the slot covering its share of the total
    // Verified by comparing the draw against unscaled weights
    #[test]
    fn test_roulette_slots() {
        let weights = [1.0, 3.0];
        assert_eq!(roulette_index(&weights, 0.0), Some(0));
        assert_eq!(roulette_index(&weights, 0.24), Some(0));
        assert_eq!(roulette_index(&weights, 0.26), Some(1));
        assert_eq!(roulette_index(&weights, 0.999), Some(1));
    }

    // Tests zero and negative weights occupy no width
    // Verified by treating zero weights as width one
    #[test]
    fn test_roulette_skips_non_positive() {
        let weights = [0.0, 2.0, -1.0, 2.0, 0.0];
        assert_eq!(roulette_index(&weights, 0.0), Some(1));
        assert_eq!(roulette_index(&weights, 0.6), Some(3));
        assert_eq!(roulette_index(&weights, 0.999_999), Some(3));
    }

    // Tests nothing is chosen when no weight is positive
    // Verified by falling back to index zero
    #[test]
    fn test_roulette_without_weight() {
        assert_eq!(roulette_index(&[], 0.5), None);
        assert_eq!(roulette_index(&[0.0, 0.0], 0.5), None);
        assert_eq!(roulette_index(&[-2.0], 0.1), None);
    }

    // Tests totals ignore non-positive weights
    // Verified by summing every weight
    #[test]
    fn test_weight_total() {
        assert!((weight_total(&[1.0, -1.0, 3.0]) - 4.0).abs() < 1e-12);
        assert!(weight_total(&[0.0, -2.0]).abs() < f64::EPSILON);
        assert!(weight_total(&[]).abs() < f64::EPSILON);
    }
}
