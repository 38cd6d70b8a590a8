//! Tests for reading placements out of a solved grid

#[cfg(test)]
mod tests {
    use voxelwave::AlgorithmError;
    use voxelwave::algorithm::executor::Solver;
    use voxelwave::algorithm::extraction::SolvedGrid;
    use voxelwave::algorithm::propagation::SolverGrid;
    use voxelwave::algorithm::selection::RandomSelector;
    use voxelwave::connector::Connector;
    use voxelwave::module::{ModuleDefinition, ModuleLibrary, OrientedModule, uniform_faces};
    use voxelwave::spatial::{Dimensions, Direction, Position};

    fn block(name: &str) -> ModuleDefinition {
        ModuleDefinition::builder(name, Dimensions::UNIT)
            .cell(
                Position::ORIGIN,
                uniform_faces(Connector::FULL_HORIZONTAL, Connector::FULL_VERTICAL),
            )
            .spawnable(format!("{name}_asset"), 1.0)
            .build()
            .expect("valid module")
    }

    fn bar() -> ModuleDefinition {
        let size = Dimensions::new(2, 1, 1).expect("valid extent");
        let mut builder = ModuleDefinition::builder("bar", size);
        for offset in [Position::ORIGIN, Position::new(1, 0, 0)] {
            for direction in Direction::ALL {
                if size.contains(offset.step(direction)) {
                    continue;
                }
                let connector = if direction.is_vertical() {
                    Connector::FULL_VERTICAL
                } else {
                    Connector::FULL_HORIZONTAL
                };
                builder = builder.face(offset, direction, connector);
            }
        }
        builder.build().expect("valid module")
    }

    fn solve(library: &ModuleLibrary, dimensions: Dimensions, seed: u64) -> SolvedGrid {
        let mut solver = Solver::new(library, dimensions, seed).expect("populates");
        assert!(solver.solve().is_ok());
        solver.extract().expect("solved")
    }

    // Tests one placement per cell for single-cell modules
    // Verified by emitting placements only for the first cell
    #[test]
    fn test_one_placement_per_unit_module() {
        let library = ModuleLibrary::from_definitions([block("cube")]).expect("valid library");
        let dimensions = Dimensions::new(2, 1, 2).expect("valid extent");
        let solved = solve(&library, dimensions, 1);

        assert_eq!(solved.dimensions(), dimensions);
        assert_eq!(solved.placements().len(), 4);
        for position in dimensions.positions() {
            let placement = solved.placement_at(position).expect("every cell is covered");
            assert_eq!(placement.position, position);
            assert_eq!(placement.name, "cube");
            assert_eq!(placement.size, Dimensions::UNIT);
            assert_eq!(placement.spawnable.as_deref(), Some("cube_asset"));
        }
        assert!(solved.placement_at(Position::new(2, 0, 0)).is_none());
    }

    // Tests that the empty module never appears in the output
    // Verified by dropping the is_empty check
    #[test]
    fn test_empty_module_skipped() {
        let library = ModuleLibrary::from_definitions([ModuleDefinition::empty_space("air")])
            .expect("valid library");
        let solved = solve(&library, Dimensions::UNIT, 1);

        assert!(solved.placements().is_empty());
        assert!(solved.placement_at(Position::ORIGIN).is_none());
    }

    // Tests that a multi-cell module is reported once for all its cells
    // Verified by keying placements by cell instead of candidate
    #[test]
    fn test_multi_cell_module_reported_once() {
        let library = ModuleLibrary::from_definitions([bar()]).expect("valid library");
        let solved = solve(&library, Dimensions::new(2, 1, 1).expect("valid extent"), 5);

        assert_eq!(solved.placements().len(), 1);
        let placement = solved.placement_at(Position::new(1, 0, 0)).expect("covered");
        assert_eq!(placement.position, Position::ORIGIN);
        assert_eq!(placement.size, Dimensions::new(2, 1, 1).expect("valid extent"));
        assert!(placement.rotation == 0 || placement.rotation == 2);
        assert_eq!(solved.placement_at(Position::ORIGIN), Some(placement));
    }

    // Tests refusal to extract undecided cells
    // Verified by picking the first candidate of undecided cells
    #[test]
    fn test_unresolved_cells_rejected() {
        let library = ModuleLibrary::from_definitions([block("cube")]).expect("valid library");
        let mut solver = Solver::new(&library, Dimensions::UNIT, 1).expect("populates");

        let result = solver.extract();
        assert!(matches!(
            result,
            Err(AlgorithmError::Unresolved { remaining: 4, .. })
        ));
    }

    // Tests that a contradicted grid cannot be extracted
    // Verified by skipping the contradiction check
    #[test]
    fn test_contradiction_rejected() {
        let library = ModuleLibrary::from_definitions([block("cube")]).expect("valid library");
        let (id, definition) = library.iter().next().expect("one module");
        let mut grid = SolverGrid::new(Dimensions::UNIT);
        let candidate = grid
            .add_candidate(OrientedModule::new(id, definition, Position::ORIGIN, 0, false))
            .expect("fits");
        assert!(grid.remove_candidate(candidate).is_err());

        let result = SolvedGrid::from_grid(&grid, &library, &mut RandomSelector::new(0));
        assert!(matches!(result, Err(AlgorithmError::Contradiction { .. })));
    }

    // Tests the JSON shape of the solved grid
    // Verified by serializing the occupancy lookup
    #[test]
    fn test_serialized_shape() {
        let library = ModuleLibrary::from_definitions([ModuleDefinition::empty_space("air"), bar()])
            .expect("valid library");
        let mut solver = Solver::new(&library, Dimensions::new(2, 1, 1).expect("valid extent"), 3)
            .expect("populates");
        assert!(solver.set_module(Position::ORIGIN, "bar", 0).is_ok());
        assert!(solver.solve().is_ok());
        let solved = solver.extract().expect("solved");

        let json = serde_json::to_value(&solved).expect("serializable");
        assert_eq!(json["dimensions"], serde_json::json!([2, 1, 1]));
        assert!(json.get("occupancy").is_none());
        let placement = &json["placements"][0];
        assert_eq!(placement["name"], "bar");
        assert_eq!(placement["module"], 1);
        assert_eq!(placement["position"], serde_json::json!([0, 0, 0]));
        assert!(placement.get("spawnable").is_none());
    }
}
