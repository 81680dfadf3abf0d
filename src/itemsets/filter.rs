use crate::types::{ItemsetCounts, SupportCount};

/// Keep the candidates whose count is strictly greater than `support`.
///
/// Takes the candidate table by value: C_k is never read again once L_k is
/// known.
pub fn filter_candidates(mut candidate_counts: ItemsetCounts, support: SupportCount) -> ItemsetCounts {
    candidate_counts.retain(|_, &mut count| count > support);
    candidate_counts.shrink_to_fit();
    candidate_counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    #[test]
    fn count_equal_to_support_is_dropped() {
        let candidate_counts = hashmap! {
            vec![0] => 3,
            vec![1] => 2,
            vec![2] => 1,
        };

        assert_eq!(
            filter_candidates(candidate_counts, 2),
            hashmap! { vec![0] => 3 }
        );
    }

    #[test]
    fn zero_support_keeps_everything_counted() {
        let candidate_counts = hashmap! {
            vec![0, 1] => 1,
            vec![0, 2] => 4,
        };

        assert_eq!(filter_candidates(candidate_counts.clone(), 0), candidate_counts);
    }

    #[test]
    fn empty_table() {
        assert!(filter_candidates(ItemsetCounts::new(), 0).is_empty());
    }
}
