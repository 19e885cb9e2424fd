//! Raster composition of a planned sheet.
//!
//! Takes the placements produced by [`crate::placement::place`] and paints
//! them onto a white RGB canvas at a chosen DPI, ready for
//! [`crate::encode::encode_sheet`]. Each cell gets a solid background, then
//! the front or back artwork scaled to cover the footprint.
//!
//! Corner cut marks are drawn outside each item's trimmed edge. When items
//! carry bleed, set [`ComposeOptions::bleed`] so the marks line up with the
//! trim rather than the outer footprint.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::PaperSpec;
use crate::encode::EncodeError;
use crate::error::LayoutError;
use crate::placement::{Placement, Role};
use crate::units::{mm_to_px, mm_to_px_signed, DEFAULT_DPI};

const SHEET_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MARK_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GUIDE_GRAY: Rgba<u8> = Rgba([200, 200, 200, 255]);

/// Largest canvas `compose_sheet` will allocate, 1 GiB of RGBA.
pub const MAX_SHEET_PIXELS: u64 = 1 << 28;

/// Dash pattern for margin guides, mm.
const GUIDE_DASH_MM: f64 = 3.0;
const GUIDE_GAP_MM: f64 = 2.0;

/// Errors that can occur while composing a sheet.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The sheet rounds to zero pixels at the requested DPI
    #[error("Sheet is empty at this resolution: {width} x {height} px")]
    EmptySheet { width: u32, height: u32 },

    /// The sheet exceeds [`MAX_SHEET_PIXELS`] at the requested DPI
    #[error("Sheet is too large to render: {width} x {height} px")]
    SheetTooLarge { width: u32, height: u32 },

    /// Artwork bytes could not be decoded
    #[error("Failed to decode artwork: {0}")]
    Decode(String),

    /// Background is neither a preset name nor `#RRGGBB`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The sheet could not be planned
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The composed sheet could not be encoded
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Named item background colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundColor {
    #[default]
    White,
    LightGray,
    Blue,
    Red,
    LightBlue,
    Cream,
}

impl BackgroundColor {
    pub const ALL: [BackgroundColor; 6] = [
        BackgroundColor::White,
        BackgroundColor::LightGray,
        BackgroundColor::Blue,
        BackgroundColor::Red,
        BackgroundColor::LightBlue,
        BackgroundColor::Cream,
    ];

    /// Look up a preset by its kebab-case name, e.g. `light-gray`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            BackgroundColor::White => "white",
            BackgroundColor::LightGray => "light-gray",
            BackgroundColor::Blue => "blue",
            BackgroundColor::Red => "red",
            BackgroundColor::LightBlue => "light-blue",
            BackgroundColor::Cream => "cream",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            BackgroundColor::White => "#FFFFFF",
            BackgroundColor::LightGray => "#F5F5F5",
            BackgroundColor::Blue => "#E3F2FD",
            BackgroundColor::Red => "#FFEBEE",
            BackgroundColor::LightBlue => "#F0F8FF",
            BackgroundColor::Cream => "#FFFDD0",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            BackgroundColor::White => [0xFF, 0xFF, 0xFF],
            BackgroundColor::LightGray => [0xF5, 0xF5, 0xF5],
            BackgroundColor::Blue => [0xE3, 0xF2, 0xFD],
            BackgroundColor::Red => [0xFF, 0xEB, 0xEE],
            BackgroundColor::LightBlue => [0xF0, 0xF8, 0xFF],
            BackgroundColor::Cream => [0xFF, 0xFD, 0xD0],
        }
    }
}

/// Parse `#RRGGBB` (the `#` is optional). Returns `None` for anything else.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Resolve a preset name or a hex string to RGB.
///
/// Anything that is neither is an [`ComposeError::InvalidColor`]; there is no
/// silent fallback to a default colour.
pub fn parse_color(value: &str) -> Result<[u8; 3], ComposeError> {
    BackgroundColor::from_name(value.trim())
        .map(BackgroundColor::rgb)
        .or_else(|| parse_hex_color(value))
        .ok_or_else(|| ComposeError::InvalidColor(value.to_string()))
}

/// Corner cutting marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutMarks {
    pub enabled: bool,
    /// Length of each mark, mm.
    pub length_mm: f64,
    /// Gap between the trimmed edge and the start of the mark, mm.
    pub offset_mm: f64,
}

impl Default for CutMarks {
    fn default() -> Self {
        Self {
            enabled: true,
            length_mm: 4.0,
            offset_mm: 2.0,
        }
    }
}

impl CutMarks {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Rendering options for [`compose_sheet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposeOptions {
    pub dpi: u32,
    /// Fill painted under each item's artwork.
    pub item_background: [u8; 3],
    /// Bleed included in each placement's footprint, mm.
    pub bleed: f64,
    /// Frame of `item_background` left around the artwork, mm.
    pub border_width: f64,
    /// Radius of the footprint's rounded corners, mm. 0 keeps them square.
    pub corner_radius_mm: f64,
    pub cut_marks: CutMarks,
    /// Dashed lines along the paper margins.
    pub margin_guides: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            item_background: BackgroundColor::White.rgb(),
            bleed: 0.0,
            border_width: 0.0,
            corner_radius_mm: 0.0,
            cut_marks: CutMarks::default(),
            margin_guides: false,
        }
    }
}

/// Front artwork plus an optional back. Back cells fall back to the front
/// when no back is given.
#[derive(Debug, Clone)]
pub struct SheetArtwork {
    pub front: RgbaImage,
    pub back: Option<RgbaImage>,
}

impl SheetArtwork {
    pub fn front_only(front: RgbaImage) -> Self {
        Self { front, back: None }
    }

    pub fn with_back(front: RgbaImage, back: RgbaImage) -> Self {
        Self {
            front,
            back: Some(back),
        }
    }

    fn for_role(&self, role: Role) -> &RgbaImage {
        match role {
            Role::Front => &self.front,
            Role::Back => self.back.as_ref().unwrap_or(&self.front),
        }
    }
}

/// Decode uploaded artwork (any format the `image` crate was built with).
pub fn decode_artwork(bytes: &[u8]) -> Result<RgbaImage, ComposeError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| ComposeError::Decode(e.to_string()))
}

/// Paint `placements` onto a sheet the size of `paper`.
pub fn compose_sheet(
    paper: &PaperSpec,
    placements: &[Placement],
    artwork: &SheetArtwork,
    options: &ComposeOptions,
) -> Result<RgbImage, ComposeError> {
    let dpi = options.dpi;
    let width = mm_to_px(paper.width, dpi);
    let height = mm_to_px(paper.height, dpi);
    if width == 0 || height == 0 {
        return Err(ComposeError::EmptySheet { width, height });
    }
    if width as u64 * height as u64 > MAX_SHEET_PIXELS {
        return Err(ComposeError::SheetTooLarge { width, height });
    }

    let mut canvas = RgbaImage::from_pixel(width, height, SHEET_WHITE);
    let [r, g, b] = options.item_background;
    let background = Rgba([r, g, b, 255]);
    let border = mm_to_px(options.border_width.max(0.0), dpi);
    let radius = mm_to_px(options.corner_radius_mm.max(0.0), dpi);

    // Cells can differ by a pixel after rounding, so key tiles by size.
    let mut tiles: HashMap<(Role, u32, u32), RgbaImage> = HashMap::new();

    for placement in placements {
        let x0 = mm_to_px(placement.x, dpi);
        let y0 = mm_to_px(placement.y, dpi);
        let cell_w = mm_to_px(placement.right(), dpi).saturating_sub(x0);
        let cell_h = mm_to_px(placement.bottom(), dpi).saturating_sub(y0);
        if cell_w == 0 || cell_h == 0 {
            continue;
        }
        if cell_w > width || cell_h > height {
            log::warn!(
                "skipping cell {} of {}x{} px, larger than the {}x{} px sheet",
                placement.number,
                cell_w,
                cell_h,
                width,
                height
            );
            continue;
        }

        let (x, y) = (x0 as i64, y0 as i64);
        fill_rect(&mut canvas, x, y, cell_w as i64, cell_h as i64, background);

        let art_w = cell_w.saturating_sub(border.saturating_mul(2));
        let art_h = cell_h.saturating_sub(border.saturating_mul(2));
        if art_w > 0 && art_h > 0 {
            let tile = tiles
                .entry((placement.role, art_w, art_h))
                .or_insert_with(|| cover(artwork.for_role(placement.role), art_w, art_h));
            imageops::overlay(&mut canvas, &*tile, x + border as i64, y + border as i64);
        }

        if radius > 0 {
            round_corners(&mut canvas, x, y, cell_w, cell_h, radius);
        }
    }

    if options.cut_marks.enabled {
        for placement in placements {
            draw_cut_marks(&mut canvas, placement, options);
        }
    }

    if options.margin_guides {
        draw_margin_guides(&mut canvas, paper, dpi);
    }

    log::info!(
        "composed {}x{} px sheet with {} items at {} dpi",
        width,
        height,
        placements.len(),
        dpi
    );

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

/// Scale to cover `width` x `height`, cropping the overflow around the centre.
fn cover(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    DynamicImage::ImageRgba8(source.clone())
        .resize_to_fill(width, height, FilterType::Triangle)
        .to_rgba8()
}

fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, color: Rgba<u8>) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    let (x0, x1) = (x.clamp(0, cw), (x + w).clamp(0, cw));
    let (y0, y1) = (y.clamp(0, ch), (y + h).clamp(0, ch));
    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}

/// Paint the sheet colour back over everything outside quarter circles of
/// `radius` at the four corners of the cell.
fn round_corners(canvas: &mut RgbaImage, x: i64, y: i64, w: u32, h: u32, radius: u32) {
    let r = radius.min(w / 2).min(h / 2) as i64;
    if r == 0 {
        return;
    }
    let (w, h) = (w as i64, h as i64);
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    let rf = r as f64;

    for dy in 0..r {
        for dx in 0..r {
            // Distance from the arc centre to this pixel's centre.
            let ox = rf - dx as f64 - 0.5;
            let oy = rf - dy as f64 - 0.5;
            if ox * ox + oy * oy <= rf * rf {
                continue;
            }
            for (px, py) in [
                (x + dx, y + dy),
                (x + w - 1 - dx, y + dy),
                (x + dx, y + h - 1 - dy),
                (x + w - 1 - dx, y + h - 1 - dy),
            ] {
                if (0..cw).contains(&px) && (0..ch).contains(&py) {
                    canvas.put_pixel(px as u32, py as u32, SHEET_WHITE);
                }
            }
        }
    }
}

/// Stroke width: one pixel at 300 DPI, scaled with resolution.
fn stroke_px(dpi: u32) -> i64 {
    ((dpi as f64 / DEFAULT_DPI as f64).round() as i64).max(1)
}

fn draw_cut_marks(canvas: &mut RgbaImage, placement: &Placement, options: &ComposeOptions) {
    let dpi = options.dpi;
    let marks = options.cut_marks;
    let stroke = stroke_px(dpi);
    let bleed = options.bleed.max(0.0);

    let left = mm_to_px_signed(placement.x + bleed, dpi);
    let right = mm_to_px_signed(placement.right() - bleed, dpi);
    let top = mm_to_px_signed(placement.y + bleed, dpi);
    let bottom = mm_to_px_signed(placement.bottom() - bleed, dpi);
    // Marks start outside the footprint, not inside the bleed. `max` also
    // maps NaN to 0.
    let offset = mm_to_px_signed(bleed + marks.offset_mm.max(0.0), dpi);
    let length = mm_to_px_signed(marks.length_mm.max(0.0), dpi);

    for (cx, cy, dx, dy) in [
        (left, top, -1, -1),
        (right - stroke, top, 1, -1),
        (left, bottom - stroke, -1, 1),
        (right - stroke, bottom - stroke, 1, 1),
    ] {
        // Horizontal mark, extending away from the item along x.
        let hx = if dx < 0 {
            cx - offset - length
        } else {
            cx + stroke + offset
        };
        fill_rect(canvas, hx, cy, length, stroke, MARK_BLACK);

        // Vertical mark, extending away from the item along y.
        let vy = if dy < 0 {
            cy - offset - length
        } else {
            cy + stroke + offset
        };
        fill_rect(canvas, cx, vy, stroke, length, MARK_BLACK);
    }
}

fn draw_margin_guides(canvas: &mut RgbaImage, paper: &PaperSpec, dpi: u32) {
    let stroke = stroke_px(dpi);
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let dash = mm_to_px_signed(GUIDE_DASH_MM, dpi).max(1);
    let period = dash + mm_to_px_signed(GUIDE_GAP_MM, dpi).max(1);

    let mut columns = Vec::new();
    if paper.margin_left > 0.0 {
        columns.push(mm_to_px_signed(paper.margin_left, dpi));
    }
    if paper.margin_right > 0.0 {
        columns.push(mm_to_px_signed(paper.width - paper.margin_right, dpi) - stroke);
    }
    let mut rows = Vec::new();
    if paper.margin_top > 0.0 {
        rows.push(mm_to_px_signed(paper.margin_top, dpi));
    }
    if paper.margin_bottom > 0.0 {
        rows.push(mm_to_px_signed(paper.height - paper.margin_bottom, dpi) - stroke);
    }

    for x in columns {
        for start in (0..height).step_by(period as usize) {
            fill_rect(canvas, x, start, stroke, dash, GUIDE_GRAY);
        }
    }
    for y in rows {
        for start in (0..width).step_by(period as usize) {
            fill_rect(canvas, start, y, dash, stroke, GUIDE_GRAY);
        }
    }
}
