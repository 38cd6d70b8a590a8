//! Tests for manual placement parsing, validation and application

#[cfg(test)]
mod tests {
    use voxelwave::AlgorithmError;
    use voxelwave::algorithm::executor::Solver;
    use voxelwave::connector::Connector;
    use voxelwave::io::prefill::{ManualPlacement, PrefillData};
    use voxelwave::module::{ModuleDefinition, ModuleLibrary, uniform_faces};
    use voxelwave::spatial::{Dimensions, Position};

    fn library() -> ModuleLibrary {
        let block = ModuleDefinition::builder("block", Dimensions::UNIT)
            .cell(
                Position::ORIGIN,
                uniform_faces(Connector::FULL_HORIZONTAL, Connector::FULL_VERTICAL),
            )
            .build()
            .expect("valid module");
        ModuleLibrary::from_definitions([ModuleDefinition::empty_space("air"), block])
            .expect("valid library")
    }

    fn placement(module: &str, x: i32, rotation: u8) -> ManualPlacement {
        ManualPlacement {
            position: Position::new(x, 0, 0),
            module: module.to_string(),
            rotation,
            flipped: false,
        }
    }

    // Tests the JSON form with optional rotation and flip
    // Verified by making rotation a required field
    #[test]
    fn test_parse_manual_placement() {
        let parsed: ManualPlacement =
            serde_json::from_str(r#"{ "position": [1, 0, 2], "module": "block" }"#)
                .expect("valid placement");
        assert_eq!(parsed.position, Position::new(1, 0, 2));
        assert_eq!(parsed.rotation, 0);
        assert!(!parsed.flipped);
    }

    // Tests queue order and draining
    // Verified by popping from the back of the queue
    #[test]
    fn test_queue_order() {
        let mut prefill = PrefillData::new([placement("air", 0, 0), placement("block", 1, 0)]);
        assert_eq!(prefill.len(), 2);

        assert_eq!(prefill.next_placement().map(|p| p.module), Some("air".to_string()));
        assert_eq!(prefill.next_placement().map(|p| p.module), Some("block".to_string()));
        assert!(prefill.next_placement().is_none());
        assert!(prefill.is_empty());
        assert!(PrefillData::default().is_empty());
    }

    // Tests validation against a library
    // Verified by accepting rotations above 3
    #[test]
    fn test_validate() {
        let library = library();
        assert!(PrefillData::new([placement("block", 0, 3)]).validate(&library).is_ok());

        let unknown = PrefillData::new([placement("tower", 0, 0)]).validate(&library);
        assert!(matches!(unknown, Err(AlgorithmError::UnknownModule { .. })));

        let rotation = PrefillData::new([placement("block", 0, 4)]).validate(&library);
        assert!(matches!(
            rotation,
            Err(AlgorithmError::InvalidParameter { parameter: "rotation", .. })
        ));
    }

    // Tests that every queued placement reaches the solver
    // Verified by applying only the first placement
    #[test]
    fn test_apply_to_solver() {
        let library = library();
        let mut solver = Solver::new(&library, Dimensions::new(3, 1, 1).expect("valid"), 0)
            .expect("populates");
        let mut prefill = PrefillData::new([placement("block", 0, 0), placement("block", 2, 1)]);

        assert!(prefill.apply_to(&mut solver).is_ok());
        assert!(prefill.is_empty());
        assert_eq!(solver.explored_count(), 2);
        assert_eq!(solver.grid().candidate_count(Position::ORIGIN), 1);
        assert_eq!(solver.grid().candidate_count(Position::new(2, 0, 0)), 1);
    }
}
