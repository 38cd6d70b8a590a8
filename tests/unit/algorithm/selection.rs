//! Tests for seeded uniform and weighted random choices

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use voxelwave::algorithm::selection::RandomSelector;

    // Tests that the same seed yields the same sequence
    // Verified by seeding from entropy
    #[test]
    fn test_seed_reproducibility() {
        let mut a = RandomSelector::new(42);
        let mut b = RandomSelector::new(42);
        let first: Vec<Option<usize>> = (0..20).map(|_| a.pick_index(10)).collect();
        let second: Vec<Option<usize>> = (0..20).map(|_| b.pick_index(10)).collect();
        assert_eq!(first, second);

        let mut wrapped = RandomSelector::from_rng(StdRng::seed_from_u64(42));
        let third: Vec<Option<usize>> = (0..20).map(|_| wrapped.pick_index(10)).collect();
        assert_eq!(first, third);
    }

    // Tests index bounds of uniform picks
    // Verified by using an inclusive range
    #[test]
    fn test_pick_index_bounds() {
        let mut selector = RandomSelector::new(1);
        assert_eq!(selector.pick_index(0), None);
        assert_eq!(selector.pick_index(1), Some(0));
        for _ in 0..100 {
            assert!(selector.pick_index(3).is_some_and(|i| i < 3));
        }
    }

    // Tests weighted selection with zero and non-positive totals
    // Verified by removing the zero weight skip
    #[test]
    fn test_weighted_choice_edge_cases() {
        let mut selector = RandomSelector::new(5);
        assert_eq!(selector.weighted_choice(&[]), 0);
        assert_eq!(selector.weighted_choice(&[0.0, 0.0]), 0);
        for _ in 0..50 {
            assert_eq!(selector.weighted_choice(&[0.0, 1.0, 0.0]), 1);
        }
    }

    // Tests that weights shape the distribution
    // Verified by selecting uniformly
    #[test]
    fn test_weighted_choice_distribution() {
        let mut selector = RandomSelector::new(11);
        let mut counts = [0usize; 2];
        for _ in 0..2_000 {
            let index = selector.weighted_choice(&[1.0, 9.0]);
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }
        assert!(counts[1] > counts[0] * 4, "heavier weight should dominate: {counts:?}");
    }
}
