//! Tests for grid coordinates, bounded extents and their parsing

#[cfg(test)]
mod tests {
    use voxelwave::AlgorithmError;
    use voxelwave::io::configuration::MAX_GRID_DIMENSION;
    use voxelwave::spatial::{Dimensions, Direction, Position};

    // Tests that zero and oversized extents are rejected
    // Verified by removing the zero check in Dimensions::new
    #[test]
    fn test_dimensions_reject_zero_and_oversized_extents() {
        assert!(Dimensions::new(0, 1, 1).is_err());
        assert!(Dimensions::new(1, 0, 1).is_err());
        assert!(Dimensions::new(1, 1, MAX_GRID_DIMENSION + 1).is_err());
        assert!(Dimensions::new(1, 1, MAX_GRID_DIMENSION).is_ok());

        assert!(matches!(
            Dimensions::new(0, 1, 1),
            Err(AlgorithmError::InvalidParameter { parameter: "x", .. })
        ));
    }

    // Tests bounds checks for single coordinates and module footprints
    // Verified by using <= in contains
    #[test]
    fn test_contains_and_fits() {
        let grid = Dimensions::new(3, 2, 4).expect("valid extent");
        assert!(grid.contains(Position::new(2, 1, 3)));
        assert!(!grid.contains(Position::new(3, 0, 0)));
        assert!(!grid.contains(Position::new(0, -1, 0)));

        let footprint = Dimensions::new(2, 1, 1).expect("valid extent");
        assert!(grid.fits(Position::new(1, 0, 0), footprint));
        assert!(!grid.fits(Position::new(2, 0, 0), footprint));
        assert!(!grid.fits(Position::new(-1, 0, 0), footprint));
    }

    // Tests ndarray indexing of in-bounds coordinates only
    // Verified by dropping the bounds check in index_of
    #[test]
    fn test_index_of() {
        let grid = Dimensions::new(2, 2, 2).expect("valid extent");
        assert_eq!(grid.index_of(Position::new(1, 0, 1)), Some([1, 0, 1]));
        assert_eq!(grid.index_of(Position::new(2, 0, 0)), None);
    }

    // Tests that positions visit every coordinate once in x, y, z order
    // Verified by swapping the x and z loops
    #[test]
    fn test_positions_scan_order() {
        let grid = Dimensions::new(2, 1, 2).expect("valid extent");
        let positions: Vec<Position> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0, 0),
                Position::new(0, 0, 1),
                Position::new(1, 0, 0),
                Position::new(1, 0, 1),
            ]
        );
        assert_eq!(positions.len(), grid.cell_count());
    }

    // Tests XxYxZ parsing used by the --size flag
    // Verified by splitting on ',' instead of 'x'
    #[test]
    fn test_parse_dimensions() {
        let dimensions: Dimensions = "4x2x5".parse().expect("4x2x5 should parse");
        assert_eq!((dimensions.x(), dimensions.y(), dimensions.z()), (4, 2, 5));
        assert_eq!(dimensions.to_string(), "4x2x5");

        assert!("4x2".parse::<Dimensions>().is_err());
        assert!("4x0x5".parse::<Dimensions>().is_err());
        assert!("axbxc".parse::<Dimensions>().is_err());
    }

    // Tests the quarter-turn extent swap
    // Verified by swapping x and y instead
    #[test]
    fn test_swapped_xz() {
        let dimensions = Dimensions::new(3, 2, 1).expect("valid extent");
        let swapped = dimensions.swapped_xz();
        assert_eq!((swapped.x(), swapped.y(), swapped.z()), (1, 2, 3));
    }

    // Tests coordinate arithmetic used for subcell offsets and neighbor steps
    // Verified by negating the offset in step
    #[test]
    fn test_position_arithmetic() {
        let origin = Position::new(2, 1, 3);
        let offset = Position::new(1, 0, -1);

        assert_eq!(origin.offset_by(offset), Position::new(3, 1, 2));
        assert_eq!(origin.offset_by(offset).relative_to(origin), offset);
        assert_eq!(origin.step(Direction::NegY), Position::new(2, 0, 3));
        assert_eq!(origin.step(Direction::PosZ), Position::new(2, 1, 4));
    }

    // Tests the array form used in JSON documents
    // Verified by serializing Position as a map
    #[test]
    fn test_serialized_as_arrays() {
        let json = serde_json::to_string(&Position::new(1, -2, 3)).expect("serializable");
        assert_eq!(json, "[1,-2,3]");

        let parsed: Result<Dimensions, _> = serde_json::from_str("[2,1,2]");
        assert!(parsed.is_ok());
        let rejected: Result<Dimensions, _> = serde_json::from_str("[2,0,2]");
        assert!(rejected.is_err());
    }
}
