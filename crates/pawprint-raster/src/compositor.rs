//! Layer composition
//!
//! Composites stacked layers into a final image with source-over alpha
//! blending, lowest z-order first.

use pawprint_core::ImageFrame;
use tracing::trace;

/// A render layer
#[derive(Debug, Clone)]
pub struct RenderLayer {
    /// Layer name
    pub name: String,
    /// Layer frame, drawn at the origin
    pub frame: ImageFrame,
    /// Z-order (higher = on top)
    pub z_order: i32,
}

impl RenderLayer {
    /// Create a layer showing an existing frame
    pub fn from_frame(name: impl Into<String>, frame: ImageFrame) -> Self {
        Self {
            name: name.into(),
            frame,
            z_order: 0,
        }
    }

    /// Set z-order
    pub fn with_z_order(mut self, z: i32) -> Self {
        self.z_order = z;
        self
    }
}

/// Layer compositor
pub struct LayerCompositor {
    layers: Vec<RenderLayer>,
    output_width: u32,
    output_height: u32,
}

impl LayerCompositor {
    /// Create a new compositor
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            layers: Vec::new(),
            output_width: width,
            output_height: height,
        }
    }

    /// Add a layer
    pub fn add_layer(&mut self, layer: RenderLayer) {
        self.layers.push(layer);
    }

    /// Composite all layers onto a transparent frame. Lower z first; equal
    /// z keeps insertion order.
    pub fn composite(&self) -> ImageFrame {
        let mut output = ImageFrame::new(self.output_width, self.output_height);

        let mut layers: Vec<&RenderLayer> = self.layers.iter().collect();
        layers.sort_by_key(|l| l.z_order);
        for layer in layers {
            trace!(layer = %layer.name, z = layer.z_order, "Blending layer");
            Self::blend_layer(&mut output, layer);
        }

        output
    }

    /// Blend a single layer onto the output; pixels past the output edge
    /// are dropped
    fn blend_layer(output: &mut ImageFrame, layer: &RenderLayer) {
        let width = layer.frame.width.min(output.width);
        let height = layer.frame.height.min(output.height);

        for y in 0..height {
            for x in 0..width {
                let (Some(src), Some(dst)) = (layer.frame.get_pixel(x, y), output.get_pixel(x, y)) else {
                    continue;
                };
                output.set_pixel(x, y, blend_over(src, dst));
            }
        }
    }
}

/// Source-over blend of `src` onto `dst`
pub fn blend_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let src_a = src[3] as f32 / 255.0;
    if src_a <= 0.0 {
        return dst;
    }

    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let blend = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let out = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        (out * 255.0).round().clamp(0.0, 255.0) as u8
    };

    [
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}
