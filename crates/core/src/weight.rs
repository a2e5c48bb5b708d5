//! Weight reconciliation between declared and constituent weights.

/// Signed deviation of `new` from `original`, in percent. Zero when
/// `original` is zero.
pub fn percent_difference(original: f32, new: f32) -> f32 {
    if original == 0.0 {
        0.0
    } else {
        (new - original) / original * 100.0
    }
}

/// Derived weight fields of a composite record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightReconciliation {
    pub content_weight: f32,
    pub weight_difference: f32,
}

impl WeightReconciliation {
    /// Sums constituent weights in one pass and compares the declared total
    /// against the sum.
    pub fn compute<I>(constituent_weights: I, total_weight: f32) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let content_weight: f32 = constituent_weights.into_iter().sum();
        Self {
            content_weight,
            weight_difference: percent_difference(content_weight, total_weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn zero_original_yields_zero() {
        assert_eq!(percent_difference(0.0, 37.5), 0.0);
    }

    #[test]
    fn increase_and_decrease() {
        assert!(approx(percent_difference(100.0, 110.0), 10.0));
        assert!(approx(percent_difference(100.0, 90.0), -10.0));
    }

    #[test]
    fn operand_order_matters() {
        assert!(approx(percent_difference(50.0, 48.0), -4.0));
        assert!(approx(percent_difference(48.0, 50.0), 4.166_667));
    }

    #[test]
    fn reconciliation_sums_constituents() {
        let r = WeightReconciliation::compute([20.0, 30.0], 48.0);
        assert!(approx(r.content_weight, 50.0));
        assert!(approx(r.weight_difference, -4.0));
    }

    #[test]
    fn empty_constituents_reconcile_to_zero() {
        let r = WeightReconciliation::compute(std::iter::empty(), 12.0);
        assert_eq!(r.content_weight, 0.0);
        assert_eq!(r.weight_difference, 0.0);
    }
}
