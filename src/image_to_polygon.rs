//! Image to polygon extraction.
//!
//! The image is thresholded into a [`BinaryMask`] at twice its resolution,
//! the mask's borders are traced, each outer border and its holes are
//! repaired with [`Polygon::correct`], and the result is scaled back by
//! one half. Optionally the polygons are centered on the image.

use crate::basics::{Point, Vec2};
use crate::contours::{find_contours, RetrievalMode};
use crate::image::Image;
use crate::mask::{BinaryMask, MaskChannel};
use crate::multi_polygon::MultiPolygon;
use crate::polygon::Polygon;

/// Extraction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Pixels whose channel value is greater than this are solid.
    pub threshold: u8,
    /// Trace holes as well as outer borders.
    pub allow_holes: bool,
    /// Move the result by half the image size so the image center is the
    /// origin.
    pub centered: bool,
    pub channel: MaskChannel,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            threshold: 160,
            allow_holes: true,
            centered: false,
            channel: MaskChannel::Alpha,
        }
    }
}

impl ExtractOptions {
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_holes(mut self, allow_holes: bool) -> Self {
        self.allow_holes = allow_holes;
        self
    }

    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn with_channel(mut self, channel: MaskChannel) -> Self {
        self.channel = channel;
        self
    }
}

fn to_ring(points: &[Point]) -> Vec<Vec2> {
    points.iter().map(|p| p.to_vec2()).collect()
}

impl Image {
    /// Extract every solid region as a polygon.
    pub fn to_polygons(&self, options: &ExtractOptions) -> MultiPolygon {
        if self.is_empty() {
            return MultiPolygon::default();
        }
        let mask = BinaryMask::from_image(self, options.channel, options.threshold);
        let mode = if options.allow_holes {
            RetrievalMode::TwoLevel
        } else {
            RetrievalMode::External
        };
        let contours = find_contours(&mask, mode);

        let mut holes: Vec<Vec<Vec<Vec2>>> = vec![Vec::new(); contours.len()];
        for c in contours.iter().filter(|c| c.is_hole) {
            if let Some(parent) = c.parent {
                holes[parent].push(to_ring(&c.points));
            }
        }

        let offset = Vec2::new(-(self.width() as f64) / 2.0, -(self.height() as f64) / 2.0);
        let mut polygons = Vec::new();
        for (i, c) in contours.iter().enumerate() {
            if c.is_hole {
                continue;
            }
            for mut p in Polygon::correct(&to_ring(&c.points), &holes[i]) {
                p.scale(0.5);
                if options.centered {
                    p.move_by(offset);
                }
                polygons.push(p);
            }
        }

        log::debug!(
            "extracted {} polygons from {} contours ({}x{}, threshold {})",
            polygons.len(),
            contours.len(),
            self.width(),
            self.height(),
            options.threshold
        );
        MultiPolygon::new(polygons)
    }

    /// The largest polygon [`Image::to_polygons`] finds, or an empty one.
    pub fn to_polygon(&self, options: &ExtractOptions) -> Polygon {
        self.to_polygons(options)
            .largest()
            .cloned()
            .unwrap_or_default()
    }

    pub fn alpha_to_polygons(&self, threshold: u8, allow_holes: bool) -> MultiPolygon {
        self.to_polygons(&alpha_options(threshold, allow_holes))
    }

    pub fn alpha_to_polygons_centered(&self, threshold: u8, allow_holes: bool) -> MultiPolygon {
        self.to_polygons(&alpha_options(threshold, allow_holes).with_centered(true))
    }

    pub fn alpha_to_polygon(&self, threshold: u8, allow_holes: bool) -> Polygon {
        self.to_polygon(&alpha_options(threshold, allow_holes))
    }

    pub fn alpha_to_polygon_centered(&self, threshold: u8, allow_holes: bool) -> Polygon {
        self.to_polygon(&alpha_options(threshold, allow_holes).with_centered(true))
    }

    /// Extraction on the red channel of a grayscale image.
    pub fn grayscale_to_polygons(&self, threshold: u8, allow_holes: bool) -> MultiPolygon {
        self.to_polygons(&gray_options(threshold, allow_holes))
    }

    pub fn grayscale_to_polygons_centered(&self, threshold: u8, allow_holes: bool) -> MultiPolygon {
        self.to_polygons(&gray_options(threshold, allow_holes).with_centered(true))
    }

    pub fn grayscale_to_polygon(&self, threshold: u8, allow_holes: bool) -> Polygon {
        self.to_polygon(&gray_options(threshold, allow_holes))
    }

    pub fn grayscale_to_polygon_centered(&self, threshold: u8, allow_holes: bool) -> Polygon {
        self.to_polygon(&gray_options(threshold, allow_holes).with_centered(true))
    }
}

fn alpha_options(threshold: u8, allow_holes: bool) -> ExtractOptions {
    ExtractOptions::default()
        .with_threshold(threshold)
        .with_holes(allow_holes)
}

fn gray_options(threshold: u8, allow_holes: bool) -> ExtractOptions {
    alpha_options(threshold, allow_holes).with_channel(MaskChannel::Red)
}

// ============================================================================
// Tests
// ============================================================================
