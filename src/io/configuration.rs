//! Solver constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Grid extent used when no size is given, in `(x, y, z)` order
pub const DEFAULT_GRID_SIZE: [usize; 3] = [10, 3, 10];

/// Number of seeds tried before a contradiction is reported
pub const DEFAULT_ATTEMPTS: u32 = 5;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Connector geometry
/// Scale applied before rounding cross-section coordinates (two decimals)
pub const COORDINATE_PRECISION: f64 = 100.0;

/// Water surface height above the bottom of a unit face
pub const WATER_LEVEL: f64 = 0.47;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Number of collapse steps between progress bar refreshes
pub const PROGRESS_REFRESH_INTERVAL: usize = 16;

// Output settings
/// Suffix added to the module file stem for the solved grid
pub const OUTPUT_SUFFIX: &str = "_solved";

/// Pixel gap between layers in the preview image
pub const PREVIEW_LAYER_GAP: u32 = 1;

/// Palette cycled through module names in order of first appearance
pub const PREVIEW_PALETTE: [[u8; 4]; 8] = [
    [231, 76, 60, 255],
    [46, 204, 113, 255],
    [52, 152, 219, 255],
    [241, 196, 15, 255],
    [155, 89, 182, 255],
    [26, 188, 156, 255],
    [230, 126, 34, 255],
    [127, 140, 141, 255],
];
