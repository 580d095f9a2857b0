//! Tests for basis tiling, defect restarts and orientation handling

#[cfg(test)]
mod tests {
    use crate::pattern::basis::Basis;
    use crate::pattern::defects::DefectMask;
    use crate::pattern::orientation::{Orientation, rotate_quarter_turns};
    use crate::pattern::synthesis::{RestartRule, synthesize, tile_basis};
    use ndarray::{Array2, array};

    fn flat(layer: &Array2<u8>) -> Vec<u8> {
        layer.iter().copied().collect()
    }

    fn mask_from_array(cells: &Array2<bool>) -> DefectMask {
        let (rows, cols) = cells.dim();
        let positions: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter_map(|(index, &cell)| cell.then_some(index))
            .collect();
        DefectMask::from_positions(cols, rows, &positions).unwrap()
    }

    #[test]
    fn test_no_defects_tiles_basis_periodically() {
        let basis = Basis::from_bits(&[1, 0]).unwrap();
        let mask = DefectMask::empty(6, 1);

        for rule in [RestartRule::BasisHead, RestartRule::Dot] {
            let layer = synthesize(&basis, &mask, Orientation::Deg0, rule);
            assert_eq!(layer.dim(), (1, 6));
            assert_eq!(flat(&layer), vec![1, 0, 1, 0, 1, 0]);
        }
    }

    // Tests the dot rule restarts the basis on the cell after the defect
    // Verified by resetting the phase to 1 instead of 0
    #[test]
    fn test_dot_rule_restarts_after_defect() {
        let basis = Basis::from_bits(&[1, 0, 0]).unwrap();
        let mask = DefectMask::from_positions(5, 1, &[2]).unwrap();

        let layer = synthesize(&basis, &mask, Orientation::Deg0, RestartRule::Dot);
        assert_eq!(flat(&layer), vec![1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_basis_head_rule_treats_defect_as_phase_zero() {
        let basis = Basis::from_bits(&[1, 0, 0]).unwrap();
        let mask = DefectMask::from_positions(5, 1, &[2]).unwrap();

        let layer = synthesize(&basis, &mask, Orientation::Deg0, RestartRule::BasisHead);
        assert_eq!(flat(&layer), vec![1, 0, 1, 0, 0]);
    }

    #[test]
    fn test_rules_differ_when_basis_starts_with_space() {
        let basis = Basis::from_bits(&[0, 1]).unwrap();
        let defects = [false, true, false, false];

        assert_eq!(
            tile_basis(defects, &basis, RestartRule::BasisHead),
            vec![0, 0, 1, 0]
        );
        assert_eq!(tile_basis(defects, &basis, RestartRule::Dot), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_single_value_basis_survives_restart() {
        let basis = Basis::from_bits(&[1]).unwrap();
        assert_eq!(
            tile_basis([false, true, false], &basis, RestartRule::BasisHead),
            vec![1, 1, 1]
        );
    }

    #[test]
    fn test_quarter_turn_tiles_along_columns() {
        let basis = Basis::from_bits(&[1, 0]).unwrap();
        let mask = DefectMask::empty(2, 2);

        let layer = synthesize(&basis, &mask, Orientation::Deg90, RestartRule::BasisHead);
        assert_eq!(layer, array![[1, 1], [0, 0]]);
    }

    // Tests every orientation equals tiling the rotated mask at 0° and rotating back
    // Verified by reshaping to (height, width) instead of the rotated shape
    #[test]
    fn test_orientation_matches_rotated_mask_round_trip() {
        let basis = Basis::from_bits(&[1, 0, 0, 1, 0]).unwrap();
        let mask = DefectMask::from_positions(4, 3, &[1, 6, 10]).unwrap();

        for rule in [RestartRule::BasisHead, RestartRule::Dot] {
            for orientation in Orientation::ALL {
                let layer = synthesize(&basis, &mask, orientation, rule);
                assert_eq!(layer.dim(), (3, 4));

                let rotated = rotate_quarter_turns(&mask.to_array(), orientation.quarter_turns());
                let rotated_mask = mask_from_array(&rotated);
                let upright = synthesize(&basis, &rotated_mask, Orientation::Deg0, rule);
                let expected = rotate_quarter_turns(&upright, orientation.inverse_turns());

                assert_eq!(layer, expected, "orientation {orientation}");
            }
        }
    }

    // Tests every cell of a non-square layer is written for each orientation
    // Verified by leaving the last rotated row unfilled
    #[test]
    fn test_every_cell_is_emitted_on_non_square_grid() {
        let basis = Basis::from_bits(&[1]).unwrap();
        let mask = DefectMask::empty(5, 3);

        for orientation in Orientation::ALL {
            let layer = synthesize(&basis, &mask, orientation, RestartRule::BasisHead);
            assert_eq!(layer.dim(), (3, 5));
            assert!(layer.iter().all(|&cell| cell == 1), "orientation {orientation}");
        }
    }

    #[test]
    fn test_restart_rule_parsing() {
        assert_eq!("dot".parse::<RestartRule>(), Ok(RestartRule::Dot));
        assert_eq!("Basis-Head".parse::<RestartRule>(), Ok(RestartRule::BasisHead));
        assert!("sometimes".parse::<RestartRule>().is_err());
        assert_eq!(RestartRule::default(), RestartRule::BasisHead);
        assert_eq!(RestartRule::Dot.to_string(), "dot");
    }
}
