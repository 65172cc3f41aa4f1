/// Bytes per pixel in the interleaved RGBA8 raster buffers.
pub const RGBA_CHANNELS: usize = 4;

/// Maximum 8-bit channel value; scalars are normalized by this.
pub const MAX_CHANNEL_VALUE: f32 = 255.0;

/// Alpha written to every output pixel.
pub const OPAQUE_ALPHA: u8 = 255;

/// Per-cell factor of the "infinite" boundary edge cost.
/// The sentinel is `INFINITE_COST_SCALE * grid_width * grid_height`.
pub const INFINITE_COST_SCALE: f64 = 1_000_000.0;

/// Residual capacities at or below this are treated as saturated.
pub const FLOW_EPSILON: f64 = 1e-9;

/// Default first input image.
pub const DEFAULT_SOURCE_1: &str = "goat2.png";

/// Default second input image.
pub const DEFAULT_SOURCE_2: &str = "cat.png";

/// Default output path.
pub const DEFAULT_OUTPUT: &str = "result.png";

/// Default overlap width in pixels.
pub const DEFAULT_MARGIN: usize = 100;

/// Seam mask value for source-side (image 1) cells.
pub const MASK_SOURCE_VALUE: u8 = 255;

/// Seam mask value for sink-side (image 2) cells.
pub const MASK_SINK_VALUE: u8 = 0;
