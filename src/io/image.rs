//! PNG layer preview of a solved grid with transparent empty space

use crate::algorithm::extraction::SolvedGrid;
use crate::io::configuration::{PREVIEW_LAYER_GAP, PREVIEW_PALETTE};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::Position;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

/// Color per module name, assigned in order of first appearance
fn module_colors(grid: &SolvedGrid) -> HashMap<&str, [u8; 4]> {
    let mut colors = HashMap::new();
    for placement in grid.placements() {
        let next = colors.len();
        colors.entry(placement.name.as_str()).or_insert_with(|| {
            PREVIEW_PALETTE
                .get(next % PREVIEW_PALETTE.len())
                .copied()
                .unwrap_or([0, 0, 0, 255])
        });
    }
    colors
}

/// Render every `y` layer as an `x × z` tile, side by side from the bottom layer
pub fn render_layers(grid: &SolvedGrid) -> RgbaImage {
    let dimensions = grid.dimensions();
    let layer_width = dimensions.x() as u32;
    let height = dimensions.z() as u32;
    let layers = dimensions.y() as u32;
    let width = layers * layer_width + layers.saturating_sub(1) * PREVIEW_LAYER_GAP;
    let colors = module_colors(grid);

    let mut img = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    for position in dimensions.positions() {
        let Some(placement) = grid.placement_at(position) else {
            continue;
        };
        let rgba = colors
            .get(placement.name.as_str())
            .copied()
            .unwrap_or([0, 0, 0, 255]);
        if let Some((pixel_x, pixel_y)) = preview_pixel(grid, position) {
            img.put_pixel(pixel_x, pixel_y, Rgba(rgba));
        }
    }
    img
}

/// Export the layer preview as a PNG image with transparent background
///
/// # Errors
///
/// Returns an error if:
/// - No module other than the empty one was placed
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layers_as_png(grid: &SolvedGrid, output_path: &Path) -> Result<()> {
    if grid.placements().is_empty() {
        return Err(AlgorithmError::InvalidParameter {
            parameter: "preview",
            value: output_path.display().to_string(),
            reason: "the solved grid holds only empty space".to_string(),
        });
    }
    let img = render_layers(grid);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Pixel coordinate of a grid coordinate in the preview image
pub fn preview_pixel(grid: &SolvedGrid, position: Position) -> Option<(u32, u32)> {
    grid.dimensions().contains(position).then(|| {
        let layer_width = grid.dimensions().x() as u32;
        (
            position.y as u32 * (layer_width + PREVIEW_LAYER_GAP) + position.x as u32,
            position.z as u32,
        )
    })
}
