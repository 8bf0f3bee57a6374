//! captioner overlays an outlined text caption onto an image.
//!
//! A caption is drawn from the vector outlines of its glyphs in three layers: a plate filled
//! with the background color, a round-joined halo stroked in the background color, and the
//! glyphs filled with the foreground color on top.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode the source file into straight RGBA8 plus its horizontal DPI
//! 2. **Layout**: shape the text with Parley inside the padded image box
//! 3. **Place**: measure the glyph outlines and anchor them to the top or bottom band
//! 4. **Composite**: rasterize the three layers with `vello_cpu` and blend them over the image
//! 5. **Save**: write PNG, or JPEG at quality 100 when the file name ends in `.jpg`/`.jpeg`
//!
//! ```no_run
//! use captioner::{Caption, CaptionStyle, Position};
//!
//! # fn main() -> captioner::CaptionResult<()> {
//! let style = CaptionStyle::builder()
//!     .text("Hello")
//!     .position(Position::Bottom)
//!     .build()?;
//!
//! Caption::new()
//!     .load("input.jpg")?
//!     .render(&style)?
//!     .save("output.png")?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod assets;
mod caption;
mod encode;
mod foundation;
mod render;
mod style;
mod text;

pub use assets::decode::{SourceImage, decode_image, load_image};
pub use assets::resolution::probe_dpi;
pub use caption::{Caption, RenderedCaption};
pub use encode::save::{JPEG_QUALITY, OutputFormat, encode_image, save_image};
pub use foundation::core::{Affine, BezPath, Dpi, Point, Position, Rect, Rgba8, Vec2};
pub use foundation::error::{CaptionError, CaptionResult};
pub use render::cpu::{CaptionPaint, composite_caption, rasterize_caption};
pub use render::placement::{caption_origin, layout_rect, padding_px};
pub use style::caption::{
    CaptionStyle, CaptionStyleBuilder, DEFAULT_TEXT, DISCLAIMER_TEXT, StyleFile,
};
pub use style::color::parse_color;
pub use text::escape::unescape;
pub use text::layout::{CaptionLayout, CaptionLayoutEngine, LayoutRequest};
pub use text::outline::{GlyphPath, glyph_transform};
