use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::debug;
use skrifa::{
    FontRef, MetadataProvider,
    instance::{LocationRef, Size},
    raw::FileRef,
};
use vello::{
    Glyph, Scene,
    kurbo::{Affine, Point},
    peniko::{Blob, BrushRef, Color, Fill, FontData},
};

use crate::error::DisplayError;

/// Fonts tried, in order, when none is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Where a run of text sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Centred horizontally, baseline at the anchor.
    BaselineCenter,
    /// Centred horizontally, top at the anchor.
    TopCenter,
    /// Right edge at the anchor, centred vertically.
    MiddleRight,
}

/// Size, placement and colour of one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TextStyle {
    pub(crate) size: f32,
    pub(crate) anchor: Anchor,
    /// Rotation in radians about the anchor point.
    pub(crate) angle: f64,
    pub(crate) color: Color,
}

impl TextStyle {
    /// Unrotated black text.
    pub(crate) const fn new(size: f32, anchor: Anchor) -> Self {
        Self {
            size,
            anchor,
            angle: 0.0,
            color: Color::BLACK,
        }
    }

    pub(crate) fn rotated(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// A loaded font that can lay out and draw single-line labels.
#[derive(Clone)]
pub struct Typeface {
    font: FontData,
    path: PathBuf,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface").field("path", &self.path).finish()
    }
}

impl Typeface {
    /// Loads a TrueType/OpenType font (or the first face of a collection).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DisplayError> {
        let path = path.as_ref();
        let font_err = |reason: String| DisplayError::Font {
            path: path.display().to_string(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| font_err(e.to_string()))?;
        let font = FontData::new(Blob::new(Arc::new(bytes)), 0);
        if to_font_ref(&font).is_none() {
            return Err(font_err("not a font file".to_string()));
        }
        debug!(path = %path.display(), "loaded label font");
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// First readable font from the usual system locations.
    pub fn find_system() -> Option<Self> {
        SYSTEM_FONTS
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .find_map(|p| Self::load(p).ok())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Advance width of `text` at `size` logical pixels.
    pub fn measure(&self, text: &str, size: f32) -> f64 {
        let Some(font_ref) = to_font_ref(&self.font) else {
            return 0.0;
        };
        let charmap = font_ref.charmap();
        let metrics = font_ref.glyph_metrics(Size::new(size), LocationRef::default());
        text.chars()
            .map(|ch| {
                let gid = charmap.map(ch).unwrap_or_default();
                metrics.advance_width(gid).unwrap_or_default() as f64
            })
            .sum()
    }

    /// Draws `text` at `anchor_point`, rotated by `style.angle` radians
    /// about it.
    pub(crate) fn draw(
        &self,
        scene: &mut Scene,
        transform: Affine,
        text: &str,
        anchor_point: Point,
        style: &TextStyle,
    ) {
        let TextStyle {
            size,
            anchor,
            angle,
            color,
        } = *style;
        let Some(font_ref) = to_font_ref(&self.font) else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let font_size = Size::new(size);
        let charmap = font_ref.charmap();
        let glyph_metrics = font_ref.glyph_metrics(font_size, LocationRef::default());
        let metrics = font_ref.metrics(font_size, LocationRef::default());

        let width = self.measure(text, size);
        let (dx, dy) = match anchor {
            Anchor::BaselineCenter => (-width / 2.0, 0.0),
            Anchor::TopCenter => (-width / 2.0, metrics.ascent as f64),
            Anchor::MiddleRight => (-width, (metrics.ascent + metrics.descent) as f64 / 2.0),
        };

        let mut pen_x = 0f32;
        let glyphs = text.chars().map(|ch| {
            let gid = charmap.map(ch).unwrap_or_default();
            let x = pen_x;
            pen_x += glyph_metrics.advance_width(gid).unwrap_or_default();
            Glyph {
                id: gid.to_u32(),
                x,
                y: 0.0,
            }
        });

        let placement = transform
            * Affine::translate(anchor_point.to_vec2())
            * Affine::rotate(angle)
            * Affine::translate((dx, dy));

        scene
            .draw_glyphs(&self.font)
            .font_size(size)
            .transform(placement)
            .brush(BrushRef::Solid(color))
            .hint(false)
            .draw(Fill::NonZero, glyphs);
    }
}

fn to_font_ref(font: &FontData) -> Option<FontRef<'_>> {
    match FileRef::new(font.data.as_ref()).ok()? {
        FileRef::Font(font_ref) => Some(font_ref),
        FileRef::Collection(collection) => collection.get(font.index).ok(),
    }
}
