//! Tests for the radial spin correlation histogram

#[cfg(test)]
mod tests {
    use crate::analysis::correlation::{
        check_correlation_budget, correlate, correlate_with_progress, offset_limits, pair_count,
        spin_field,
    };
    use ndarray::{Array2, array};

    // Reference histogram visiting every ordered pair and keeping one of each unordered pair
    fn brute_force(layer: &Array2<u8>, cutoff: Option<usize>) -> (Vec<i64>, Vec<u64>) {
        let (rows, cols) = layer.dim();
        let (max_dx, max_dy) = offset_limits(rows, cols, cutoff);
        let bins = max_dx * max_dx + max_dy * max_dy + 1;
        let mut total = vec![0i64; bins];
        let mut count = vec![0u64; bins];
        let spin = |cell: u8| if cell == 0 { -1i64 } else { 1 };

        for ((x1, y1), &a) in layer.indexed_iter() {
            for ((x2, y2), &b) in layer.indexed_iter() {
                let first = x1 * cols + y1;
                let second = x2 * cols + y2;
                let dx = x1.abs_diff(x2);
                let dy = y1.abs_diff(y2);
                if second < first || dx > max_dx || dy > max_dy {
                    continue;
                }
                let r2 = dx * dx + dy * dy;
                total[r2] += spin(a) * spin(b);
                count[r2] += 1;
            }
        }
        (total, count)
    }

    fn sample_layer() -> Array2<u8> {
        array![
            [1, 0, 0, 1, 0],
            [0, 1, 1, 0, 0],
            [1, 1, 0, 0, 1],
            [0, 0, 1, 0, 1],
        ]
    }

    #[test]
    fn test_spin_field_is_pure() {
        let layer = array![[1u8, 0], [0, 1]];
        let spins = spin_field(&layer);
        assert_eq!(spins, array![[1i8, -1], [-1, 1]]);
        assert_eq!(layer, array![[1u8, 0], [0, 1]]);
    }

    // Tests each unordered pair is counted once and self pairs once per cell
    // Verified by visiting offsets in both directions
    #[test]
    fn test_all_dots_two_by_two() {
        let layer = array![[1u8, 1], [1, 1]];
        let histogram = correlate(&layer, None).unwrap();

        assert_eq!(histogram.bins(), 3);
        assert_eq!(histogram.count.to_vec(), vec![4, 4, 2]);
        assert_eq!(histogram.total.to_vec(), vec![4, 4, 2]);
        assert_eq!(histogram.rho(1), Some(1.0));
    }

    #[test]
    fn test_checkerboard_anticorrelates_neighbours() {
        let layer = array![[1u8, 0], [0, 1]];
        let histogram = correlate(&layer, None).unwrap();

        assert_eq!(histogram.total.to_vec(), vec![4, -4, 2]);
        assert_eq!(histogram.rho(0), Some(1.0));
        assert_eq!(histogram.rho(1), Some(-1.0));
        assert_eq!(histogram.rho(2), Some(1.0));
    }

    #[test]
    fn test_empty_bins_have_no_rho() {
        let layer = array![[1u8, 0, 1]];
        let histogram = correlate(&layer, None).unwrap();

        assert_eq!(histogram.bins(), 5);
        assert_eq!(histogram.count.to_vec(), vec![3, 2, 0, 0, 1]);
        assert_eq!(histogram.rho(1), Some(-1.0));
        assert_eq!(histogram.rho(2), None);
        assert_eq!(histogram.rho(3), None);
        assert_eq!(histogram.rho(4), Some(1.0));
        assert_eq!(histogram.rho(99), None);

        let table = histogram.table();
        assert_eq!(table.len(), 5);
        assert_eq!(table[2].count, 0);
        assert!(table[2].rho.is_none());
        assert!((table[4].distance - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_matches_brute_force_pairs() {
        let layer = sample_layer();
        for cutoff in [None, Some(1), Some(2), Some(3), Some(10)] {
            let histogram = correlate(&layer, cutoff).unwrap();
            let (total, count) = brute_force(&layer, cutoff);
            assert_eq!(histogram.total.to_vec(), total, "cutoff {cutoff:?}");
            assert_eq!(histogram.count.to_vec(), count, "cutoff {cutoff:?}");
        }
    }

    // Tests a cutoff trims bins without changing rho inside the cutoff radius
    // Verified by limiting origins to the cutoff window
    #[test]
    fn test_cutoff_preserves_rho_within_radius() {
        let layer = sample_layer();
        let full = correlate(&layer, None).unwrap();

        for cutoff in 1..=3usize {
            let limited = correlate(&layer, Some(cutoff)).unwrap();
            assert_eq!(limited.bins(), 2 * cutoff * cutoff + 1);
            assert!(limited.bins() <= full.bins());
            for r2 in 0..=cutoff * cutoff {
                assert_eq!(limited.rho(r2), full.rho(r2), "r2 {r2} cutoff {cutoff}");
            }
        }
    }

    #[test]
    fn test_pair_count_matches_histogram() {
        let layer = sample_layer();
        for cutoff in [None, Some(1), Some(2)] {
            let histogram = correlate(&layer, cutoff).unwrap();
            assert_eq!(histogram.count.sum(), pair_count(4, 5, cutoff));
        }
        assert_eq!(pair_count(2, 2, None), 10);
    }

    #[test]
    fn test_budget_rejects_huge_uncut_grids() {
        assert!(check_correlation_budget(10_000, 10_000, None).is_err());
        assert!(check_correlation_budget(10_000, 10_000, Some(5)).is_ok());
        assert!(check_correlation_budget(50, 50, None).is_ok());
    }

    #[test]
    fn test_progress_reports_every_row() {
        let layer = sample_layer();
        let mut seen = Vec::new();
        let histogram = correlate_with_progress(&layer, None, |rows| seen.push(rows)).unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert_eq!(histogram, correlate(&layer, None).unwrap());
    }

    #[test]
    fn test_rejects_empty_layer_and_zero_cutoff() {
        assert!(correlate(&Array2::<u8>::zeros((0, 3)), None).is_err());
        assert!(correlate(&array![[1u8]], Some(0)).is_err());
    }
}
