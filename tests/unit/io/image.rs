//! Tests for layer rendering and PNG export

#[cfg(test)]
mod tests {
    use crate::analysis::correlation::CorrelationRow;
    use crate::io::configuration::{MAX_IMAGE_PIXELS, PLOT_HEIGHT, PLOT_WIDTH};
    use crate::io::error::DotSpaceError;
    use crate::io::image::{
        check_image_budget, export_correlation_plot, export_layer_png, export_mask_png,
        render_correlation_plot, render_layer, render_mask,
    };
    use ndarray::{Array2, array};

    // Tests each cell becomes a scale x scale block, dots black and spaces white
    // Verified by swapping the row and column lookup
    #[test]
    fn test_render_layer_scales_cells() {
        let layer = array![[1u8, 0, 0], [0, 0, 1]];
        let img = render_layer(&layer, 2);

        assert_eq!(img.dimensions(), (6, 4));
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(1, 1)[0], 0);
        assert_eq!(img.get_pixel(2, 0)[0], 255);
        assert_eq!(img.get_pixel(5, 3)[0], 0);
        assert_eq!(img.get_pixel(0, 3)[0], 255);
    }

    #[test]
    fn test_render_mask_matches_layer() {
        let mask = array![[true, false], [false, true]];
        assert_eq!(
            render_mask(&mask, 3),
            render_layer(&array![[1u8, 0], [0, 1]], 3)
        );
    }

    #[test]
    fn test_plot_has_fixed_size() {
        let rows = [
            CorrelationRow {
                r2: 0,
                distance: 0.0,
                rho: Some(1.0),
                count: 4,
            },
            CorrelationRow {
                r2: 1,
                distance: 1.0,
                rho: Some(-1.0),
                count: 4,
            },
            CorrelationRow {
                r2: 2,
                distance: 2f64.sqrt(),
                rho: None,
                count: 0,
            },
        ];
        let img = render_correlation_plot(&rows);
        assert_eq!(img.dimensions(), (PLOT_WIDTH, PLOT_HEIGHT));
        assert_eq!(render_correlation_plot(&[]).dimensions(), (PLOT_WIDTH, PLOT_HEIGHT));
    }

    #[test]
    fn test_exports_write_png_files() {
        let dir = tempfile::tempdir().unwrap();
        let layer_path = dir.path().join("nested/layer.png");
        let mask_path = dir.path().join("mask.png");
        let plot_path = dir.path().join("plot.png");

        export_layer_png(&array![[1u8, 0], [0, 1]], 4, &layer_path).unwrap();
        export_mask_png(&array![[false, true]], 4, &mask_path).unwrap();
        export_correlation_plot(&[], &plot_path).unwrap();

        let reloaded = image::open(&layer_path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (8, 8));
        assert!(mask_path.exists());
        assert!(plot_path.exists());
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            export_layer_png(&Array2::<u8>::zeros((0, 0)), 1, &dir.path().join("a.png")),
            Err(DotSpaceError::InvalidParameter { .. })
        ));
        assert!(matches!(
            export_mask_png(&Array2::<bool>::default((0, 2)), 1, &dir.path().join("b.png")),
            Err(DotSpaceError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_image_budget_limits_pixels() {
        assert!(check_image_budget(10_000, 10_000, 1).is_ok());
        assert!(check_image_budget(10_000, 10_000, 64).is_err());
        assert!(check_image_budget(2048, 2048, 8).is_ok());
        assert!(check_image_budget(2048, 2049, 8).is_err());
        assert_eq!(MAX_IMAGE_PIXELS, 2048 * 8 * 2048 * 8);
    }
}
