//! # draw2d-rust
//!
//! A 2D vector graphics core: it turns path-construction commands (moves,
//! lines, cubic curves, elliptical arcs) plus paint state (colors, line
//! width, caps, joins, dash pattern, fill rule) into pixels in a
//! caller-owned RGBA8 buffer.
//!
//! ## Architecture
//!
//! Rendering runs through a one-way pipeline:
//!
//! 1. **Path**: subpaths of line and cubic segments ([`path_storage`])
//! 2. **Flattener**: curves to polylines within a tolerance ([`conv_curve`])
//! 3. **Stroker**: dashes and pen outlines with caps and joins ([`conv_stroke`])
//! 4. **Rasterizer**: aliased scanline fill under a fill rule ([`rasterizer_scanline`])
//! 5. **Renderer**: clipped span blending into the pixel buffer ([`renderer_base`])
//!
//! [`GraphicContext`] drives the whole pipeline behind a stateful command
//! surface.
//!
//! ```
//! use draw2d_rust::{GraphicContext, PixfmtRgba32, RenderingBuffer, Rgba8};
//!
//! let mut buf = vec![0u8; 64 * 64 * 4];
//! let rbuf = RenderingBuffer::new_packed(&mut buf, 64, 64).unwrap();
//! let mut gc = GraphicContext::new(PixfmtRgba32::new(rbuf));
//! gc.set_fill_color(Rgba8::WHITE);
//! gc.rect(8.0, 8.0, 48.0, 48.0);
//! gc.fill_stroke(&[]);
//! ```

// Foundation types & math
pub mod array;
pub mod basics;
pub mod error;
pub mod math;
pub mod trans_affine;

// Paths and curves
pub mod bezier_arc;
pub mod curves;
pub mod path_storage;

// Converters & generators
pub mod conv_curve;
pub mod conv_stroke;
pub mod math_stroke;
pub mod vcgen_dash;
pub mod vcgen_stroke;

// Rasterization & rendering
pub mod color;
pub mod pixfmt_rgba;
pub mod rasterizer_scanline;
pub mod renderer_base;
pub mod renderer_scanline;
pub mod rendering_buffer;
pub mod scanline_bin;

// Context
pub mod config;
pub mod drawing_state;
pub mod graphic_context;

pub use basics::{FillRule, PointD};
pub use color::Rgba8;
pub use config::{RenderConfig, ZeroWidthPolicy};
pub use error::{Draw2dError, Draw2dResult};
pub use graphic_context::GraphicContext;
pub use math_stroke::{LineCap, LineJoin};
pub use path_storage::Path;
pub use pixfmt_rgba::{PixelFormat, PixfmtRgba32};
pub use rendering_buffer::RenderingBuffer;
pub use trans_affine::TransAffine;
