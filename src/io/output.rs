//! Solved grid serialization

use crate::algorithm::extraction::SolvedGrid;
use crate::io::error::{AlgorithmError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the solved grid as pretty-printed JSON, creating parent directories
///
/// # Errors
///
/// Returns `FileSystem` if the file or its directory cannot be created or
/// written, `Json` if serialization fails
pub fn write_solved_grid(grid: &SolvedGrid, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create output file",
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, grid).map_err(|e| AlgorithmError::Json {
        path: output_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| AlgorithmError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write output file",
        source: e,
    })
}
