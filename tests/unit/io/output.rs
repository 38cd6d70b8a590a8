//! Tests for writing the solved grid as JSON

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;
    use voxelwave::algorithm::executor::Solver;
    use voxelwave::algorithm::extraction::SolvedGrid;
    use voxelwave::connector::Connector;
    use voxelwave::io::output::write_solved_grid;
    use voxelwave::module::{ModuleDefinition, ModuleLibrary, uniform_faces};
    use voxelwave::spatial::{Dimensions, Position};

    fn solved() -> SolvedGrid {
        let block = ModuleDefinition::builder("block", Dimensions::UNIT)
            .cell(
                Position::ORIGIN,
                uniform_faces(Connector::FULL_HORIZONTAL, Connector::FULL_VERTICAL),
            )
            .build()
            .expect("valid module");
        let library = ModuleLibrary::from_definitions([block]).expect("valid library");
        let mut solver = Solver::new(&library, Dimensions::new(2, 1, 1).expect("valid"), 0)
            .expect("populates");
        assert!(solver.solve().is_ok());
        solver.extract().expect("solved")
    }

    // Tests that nested output directories are created
    // Verified by removing the create_dir_all call
    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("deeper").join("grid.json");

        assert!(write_solved_grid(&solved(), &path).is_ok());
        assert!(path.exists());
    }

    // Tests the document written to disk
    // Verified by writing the placements only
    #[test]
    fn test_written_document() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("grid.json");
        assert!(write_solved_grid(&solved(), &path).is_ok());

        let text = fs::read_to_string(&path).expect("readable output");
        let json: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(json["dimensions"], serde_json::json!([2, 1, 1]));

        let placements = json["placements"].as_array().expect("placement list");
        assert_eq!(placements.len(), 2);
        assert!(placements.iter().all(|p| p["name"] == "block"));
        assert_eq!(placements[1]["position"], serde_json::json!([1, 0, 0]));
    }
}
