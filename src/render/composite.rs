//! Flattening a composition into a single PNG
//!
//! Signatures are pasted in insertion order, each resized to its placement
//! size and pasted with its own alpha channel as the mask. The mask blends
//! all four channels, alpha included, so a half-transparent signature pixel
//! also lowers the alpha of an opaque base.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, Rgba32FImage, RgbaImage};

use crate::domain::{Composition, ImageRef, Size};

/// Resampling used when fitting a signature into its box
const SIGNATURE_FILTER: FilterType = FilterType::CatmullRom;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no base image selected")]
    MissingBaseImage,
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to save image {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Decode an image from disk as RGBA8
pub fn load_rgba(image: &ImageRef) -> Result<RgbaImage, RenderError> {
    image::open(image.path())
        .map(|img| img.to_rgba8())
        .map_err(|source| RenderError::ImageLoad {
            path: image.path().to_path_buf(),
            source,
        })
}

/// Resize a signature to exactly `size`, ignoring the source aspect ratio.
///
/// Resampling runs on premultiplied alpha so the colour of fully
/// transparent pixels never reaches the visible edge.
pub fn fit_signature(signature: &RgbaImage, size: Size) -> RgbaImage {
    if signature.dimensions() == (size.width, size.height) {
        return signature.clone();
    }

    let premultiplied = Rgba32FImage::from_fn(signature.width(), signature.height(), |x, y| {
        let [r, g, b, a] = signature.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });
    let resized = imageops::resize(&premultiplied, size.width, size.height, SIGNATURE_FILTER);

    RgbaImage::from_fn(size.width, size.height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0.map(|c| c.clamp(0.0, 1.0));
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let unpremultiply = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([
            unpremultiply(r),
            unpremultiply(g),
            unpremultiply(b),
            (a * 255.0).round() as u8,
        ])
    })
}

/// `dst + (src - dst) * mask / 255`, rounded the way PIL's paste rounds
fn blend_channel(src: u8, dst: u8, mask: u8) -> u8 {
    let t = (i32::from(src) - i32::from(dst)) * i32::from(mask) + 128;
    (i32::from(dst) + ((t + (t >> 8)) >> 8)).clamp(0, 255) as u8
}

/// Paste `overlay` at (`x`, `y`) using its own alpha as the mask.
///
/// Every channel of the canvas, alpha included, moves toward the overlay
/// by the mask. Parts outside the canvas are clipped.
pub fn paste_masked(canvas: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (ow, oh) = (i64::from(overlay.width()), i64::from(overlay.height()));

    for oy in y.max(0)..(y + oh).min(ch) {
        for ox in x.max(0)..(x + ow).min(cw) {
            let src = overlay.get_pixel((ox - x) as u32, (oy - y) as u32);
            let mask = src[3];
            if mask == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(ox as u32, oy as u32);
            for c in 0..4 {
                dst[c] = blend_channel(src[c], dst[c], mask);
            }
        }
    }
}

/// Build the flattened image in memory
pub fn composite(composition: &Composition) -> Result<RgbaImage, RenderError> {
    let base = composition
        .base_image()
        .ok_or(RenderError::MissingBaseImage)?;
    let mut canvas = load_rgba(base)?;
    log::debug!(
        "Compositing {} signature(s) onto {}x{} base {}",
        composition.placements().len(),
        canvas.width(),
        canvas.height(),
        base
    );

    for placement in composition.placements() {
        let signature = load_rgba(&placement.image)?;
        let fitted = fit_signature(&signature, placement.size);
        paste_masked(
            &mut canvas,
            &fitted,
            i64::from(placement.position.x),
            i64::from(placement.position.y),
        );
    }

    Ok(canvas)
}

/// Render the composition and write it to `output`.
///
/// The PNG is written to a temporary file next to `output` and renamed over
/// it, so an existing file is either fully replaced or left untouched.
pub fn render(composition: &Composition, output: &Path) -> Result<PathBuf, RenderError> {
    let image = composite(composition)?;
    save_png(&image, output)?;
    log::info!("Final image saved: {}", output.display());
    Ok(output.to_path_buf())
}

/// Atomically write `image` as an RGBA PNG
pub fn save_png(image: &RgbaImage, output: &Path) -> Result<(), RenderError> {
    let to_save_error = |source: io::Error| RenderError::ImageSave {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.is_dir() {
        fs::create_dir_all(&dir).map_err(to_save_error)?;
    }

    let mut builder = tempfile::Builder::new();
    builder.prefix(".sigstamp-").suffix(".png");
    // Same mode as a regular file create; the umask still applies
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut file = builder.tempfile_in(&dir).map_err(to_save_error)?;
    write_png(&mut file, image).map_err(|e| to_save_error(io::Error::other(e)))?;
    file.as_file().sync_all().map_err(to_save_error)?;
    file.persist(output).map_err(|e| to_save_error(e.error))?;
    Ok(())
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()
}
