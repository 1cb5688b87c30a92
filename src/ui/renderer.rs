//! Column preview rendering
//!
//! Rasterizes the generated column row to a bitmap using tiny-skia, with
//! optional pixel-width labels drawn through ab_glyph. Layout calculation
//! is kept separate from painting so it can be tested without pixels.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use tiny_skia::{Color, Paint, Pixmap, PremultipliedColorU8, Rect as SkiaRect, Transform};

use crate::domain::grid::{GridConfig, GridResult};
use crate::ui::markup::column_label;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid preview dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Too many columns to preview: {0}")]
    TooManyColumns(u32),

    #[error("Failed to load font: {0}")]
    FontLoad(String),

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A single column rectangle on the preview canvas
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRect {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// Pre-calculated layout for a preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    pub columns: Vec<ColumnRect>,
    /// Label drawn in every column
    pub label: String,
    pub font_size: f32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl PreviewLayout {
    /// Tallest canvas the preview will allocate
    pub const MAX_HEIGHT: u32 = 4096;
    /// Widest canvas the preview will allocate
    pub const MAX_WIDTH: u32 = 8192;

    /// Lays out the columns of a computed grid
    ///
    /// Columns are placed at `i * (column% + gutter%)` of the container
    /// width, matching the first-child-without-margin rule of the stylesheet.
    pub fn from_grid(config: &GridConfig, result: &GridResult) -> Result<Self, RendererError> {
        let width = config.container_width_px.ceil();
        let height = result.row_height_px.ceil().max(1.0);
        if !width.is_finite() || width < 1.0 || width > f64::from(Self::MAX_WIDTH) {
            return Err(RendererError::InvalidDimensions {
                width: config.container_width_px,
                height: result.row_height_px,
            });
        }
        // A column narrower than one canvas pixel cannot be told apart
        if config.columns > Self::MAX_WIDTH {
            return Err(RendererError::TooManyColumns(config.columns));
        }
        let canvas_width = width as u32;
        let canvas_height = (height.min(f64::from(Self::MAX_HEIGHT))) as u32;

        let step = (result.column_width_percent + config.gutter_percent) / 100.0
            * config.container_width_px;
        let column_width = result.column_width_percent / 100.0 * config.container_width_px;

        let columns = (0..config.columns)
            .map(|i| ColumnRect {
                x: (f64::from(i) * step) as f32,
                width: column_width as f32,
                height: canvas_height as f32,
            })
            .collect();

        Ok(Self {
            columns,
            label: column_label(result),
            font_size: 12.0,
            canvas_width,
            canvas_height,
        })
    }

    /// Columns with a positive on-canvas area
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnRect> {
        self.columns
            .iter()
            .filter(|c| c.width > 0.0 && c.x < self.canvas_width as f32)
    }
}

/// Preview renderer using tiny-skia
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    font: Option<FontArc>,
}

impl PreviewRenderer {
    /// Renderer that draws columns without labels
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Renderer that labels columns with the given TrueType/OpenType font
    pub fn with_font_file(path: &Path) -> Result<Self, RendererError> {
        let data = std::fs::read(path)?;
        let font = FontArc::try_from_vec(data).map_err(|e| RendererError::FontLoad(e.to_string()))?;
        Ok(Self { font: Some(font) })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render a layout to a pixmap
    pub fn render_layout(&self, layout: &PreviewLayout) -> Result<Pixmap, RendererError> {
        let mut pixmap = Pixmap::new(layout.canvas_width, layout.canvas_height)
            .ok_or(RendererError::PixmapCreationFailed)?;

        pixmap.fill(Color::WHITE);

        let mut paint = Paint::default();
        paint.set_color(Color::from_rgba8(214, 226, 240, 255));

        for column in layout.visible_columns() {
            if let Some(rect) = SkiaRect::from_xywh(column.x, 0.0, column.width, column.height) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }

        if let Some(font) = &self.font {
            for column in layout.visible_columns() {
                draw_label(&mut pixmap, font, layout, column);
            }
        }

        Ok(pixmap)
    }

    /// Render a layout and write it as PNG
    pub fn write_png(&self, layout: &PreviewLayout, path: &Path) -> Result<(), RendererError> {
        let pixmap = self.render_layout(layout)?;
        let bytes = pixmap
            .encode_png()
            .map_err(|e| RendererError::Encode(e.to_string()))?;
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), "wrote preview");
        Ok(())
    }
}

/// Draws the column label centered near the top of a column
fn draw_label(pixmap: &mut Pixmap, font: &FontArc, layout: &PreviewLayout, column: &ColumnRect) {
    let scaled = font.as_scaled(PxScale::from(layout.font_size));
    let text_width: f32 = layout
        .label
        .chars()
        .map(|c| scaled.h_advance(scaled.glyph_id(c)))
        .sum();

    let mut caret = column.x + (column.width - text_width) / 2.0;
    let baseline = 4.0 + scaled.ascent();

    for c in layout.label.chars() {
        let mut glyph = scaled.scaled_glyph(c);
        glyph.position = point(caret, baseline);
        caret += scaled.h_advance(glyph.id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                blend_pixel(pixmap, x, y, coverage);
            });
        }
    }
}

/// Blends dark text coverage over an opaque pixel
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, coverage: f32) {
    if x < 0 || y < 0 || x >= pixmap.width() as i32 || y >= pixmap.height() as i32 {
        return;
    }
    let index = y as usize * pixmap.width() as usize + x as usize;
    let Some(dst) = pixmap.pixels_mut().get_mut(index) else {
        return;
    };

    let alpha = coverage.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let text = 51.0;
        (f32::from(channel) * (1.0 - alpha) + text * alpha).round() as u8
    };
    if let Some(blended) = PremultipliedColorU8::from_rgba(mix(dst.red()), mix(dst.green()), mix(dst.blue()), 255) {
        *dst = blended;
    }
}
