//! PNG rendering of a puzzle layout
//!
//! Each piece shows the region of the source picture under its home
//! footprint, drawn at its live footprint in draw order. Without a source
//! picture every piece gets a flat palette colour. Loose pieces carry a thin
//! outline so overlapping rods stay distinguishable.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::io::configuration::{LOOSE_OUTLINE_RGBA, MAX_CELL_PIXELS};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::puzzle::piece::PieceId;
use crate::puzzle::session::Session;
use crate::render::layout::{MediaKind, MediaSource, layout, pixel_rect};

/// Load the still picture behind a media source
///
/// # Errors
///
/// Returns an error if:
/// - The source is a video (`UnsupportedMedia`)
/// - The file cannot be opened or decoded (`ImageLoad`)
pub fn load_source_image(source: &MediaSource) -> Result<RgbaImage> {
    if source.kind() == MediaKind::Video {
        return Err(PuzzleError::UnsupportedMedia {
            kind: source.kind().name(),
        });
    }
    let picture = image::open(source.location()).map_err(|e| PuzzleError::ImageLoad {
        path: source.location().to_path_buf(),
        source: e,
    })?;
    Ok(picture.to_rgba8())
}

// Spread hues by the golden ratio so neighbouring ids differ clearly
fn palette_colour(id: PieceId) -> Rgba<u8> {
    let hue = (id.get() as f64 * 0.618_033_988_749_895).fract() * 6.0;
    let (saturation, value) = (0.55, 0.9);
    let chroma = value * saturation;
    let secondary = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
    let (r, g, b) = match hue as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };
    let base = value - chroma;
    let channel = |c: f64| ((c + base) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba([channel(r), channel(g), channel(b), 255])
}

fn draw_outline(canvas: &mut RgbaImage, [x, y, width, height]: [u32; 4]) {
    let outline = Rgba(LOOSE_OUTLINE_RGBA);
    let (right, bottom) = (x + width.saturating_sub(1), y + height.saturating_sub(1));
    for column in x..x + width {
        for row in [y, bottom] {
            if let Some(pixel) = canvas.get_pixel_mut_checked(column, row) {
                *pixel = outline;
            }
        }
    }
    for row in y..y + height {
        for column in [x, right] {
            if let Some(pixel) = canvas.get_pixel_mut_checked(column, row) {
                *pixel = outline;
            }
        }
    }
}

/// Compose the current layout of a session into an image
///
/// The source picture, when given, is scaled to cover the whole board.
///
/// # Errors
///
/// Returns an error if `cell_pixels` is zero or above `MAX_CELL_PIXELS`
pub fn render_layout(
    session: &Session,
    source: Option<&RgbaImage>,
    cell_pixels: u32,
) -> Result<RgbaImage> {
    if cell_pixels == 0 || cell_pixels > MAX_CELL_PIXELS {
        return Err(invalid_parameter(
            "cell_pixels",
            &cell_pixels,
            &format!("must be between 1 and {MAX_CELL_PIXELS}"),
        ));
    }

    let side = session.grid_size() * cell_pixels;
    let artwork = source.map(|picture| imageops::resize(picture, side, side, FilterType::Triangle));
    let mut canvas = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));

    for piece in layout(session) {
        let target = pixel_rect(&piece.rect, cell_pixels);
        let [crop_x, crop_y, width, height] = pixel_rect(&piece.crop, cell_pixels);

        let tile = match &artwork {
            Some(art) => imageops::crop_imm(art, crop_x, crop_y, width, height).to_image(),
            None => RgbaImage::from_pixel(width, height, palette_colour(piece.id)),
        };
        imageops::overlay(&mut canvas, &tile, i64::from(target[0]), i64::from(target[1]));

        if !piece.locked {
            draw_outline(&mut canvas, target);
        }
    }

    Ok(canvas)
}

/// Render the current layout and save it as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - `cell_pixels` is out of range
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_as_png(
    session: &Session,
    source: Option<&RgbaImage>,
    cell_pixels: u32,
    output_path: &Path,
) -> Result<()> {
    let canvas = render_layout(session, source, cell_pixels)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|e| PuzzleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
