//! # raster-paint
//!
//! Pixel-exact shape painting, alpha compositing and image-to-polygon
//! extraction for 32-bit RGBA images.
//!
//! - Fixed-point (16.16) scan conversion of lines, thick lines, polylines,
//!   circles, triangles and convex quads
//! - Even-odd filling of polygons with holes through an active edge table
//! - `paint`, `stamp` and `overwrite` compositing, with SSE3 and SSE4.1
//!   image kernels selected once per process
//! - Closed-form painters for circles, circular frames, ellipses and
//!   antialiased triangles
//! - Rectangle and triangle frames, arrows and rounded rectangles
//! - Polygon extraction from image alpha or gray levels, with holes
//!
//! ## Architecture
//!
//! Shapes are rasterized in three stages:
//!
//! 1. **Rasterizer**: the scan converter or the edge filler emits the
//!    covered pixels as flat offsets into a [`PaintBuffer`]
//! 2. **Finish**: offsets are sorted and de-duplicated
//! 3. **Composite**: every offset is blended once with the shape color
//!
//! Circles and ellipses skip the first two stages and are evaluated per
//! pixel over their bounding box.
//!
//! Extraction runs the other way: [`Image`] → [`BinaryMask`] at twice the
//! resolution → traced [`Contour`]s → [`Polygon::correct`] → polygons
//! scaled back by one half.
//!
//! ## Logging
//!
//! The crate emits records through the `log` facade (kernel selection and
//! extraction summaries at `debug`, discarded rings at `trace`) and never
//! installs a logger itself.

// Foundation
pub mod basics;
pub mod color;
pub mod cpu_info;
pub mod error;
pub mod rendering_buffer;

// Compositing
pub mod blend;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod blend_sse;
pub mod paint_buffer;

// Rasterizers
pub mod analytic_paint;
pub mod clip_line;
pub mod dda_line;
pub mod edge_fill;
pub mod scan_converter;

// Shapes
pub mod circle;
pub mod ellipse;
pub mod line;
pub mod line_string;
pub mod multi_polygon;
pub mod polygon;
pub mod quad;
pub mod rect;
pub mod round_rect;
pub mod triangle;

// Images and extraction
pub mod contours;
pub mod image;
pub mod image_to_polygon;
pub mod mask;
pub mod polygon_correct;

pub use basics::{Point, RectD, RectI, Vec2};
pub use blend::{BlendMode, PaintKernel};
pub use circle::Circle;
pub use color::Color;
pub use contours::{find_contours, Contour, RetrievalMode};
pub use ellipse::Ellipse;
pub use error::{ImageError, Result};
pub use image::Image;
pub use image_to_polygon::ExtractOptions;
pub use line::Line;
pub use line_string::LineString;
pub use mask::{BinaryMask, MaskChannel};
pub use multi_polygon::MultiPolygon;
pub use paint_buffer::PaintBuffer;
pub use polygon::Polygon;
pub use quad::Quad;
pub use rect::Rectangle;
pub use round_rect::RoundRect;
pub use rendering_buffer::{PaintTarget, RenderingBuffer};
pub use triangle::Triangle;
