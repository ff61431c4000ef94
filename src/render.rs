//! Heatmap rendering.
//!
//! The CAM is resized to the source image dimensions, mapped through a jet
//! colormap and blended over the original pixels. The reference blend is
//! `heatmap * 0.4 + image * 0.5`; the weights intentionally do not sum to
//! one and are kept as-is for output compatibility.

use std::path::Path;

use tch::vision::image;
use tch::{Kind, Tensor};

use crate::CamError;

const HEATMAP_WEIGHT: f64 = 0.4;
const IMAGE_WEIGHT: f64 = 0.5;

fn jet_channel(v: f64, center: f64) -> u8 {
    let intensity = (1.5 - 4. * (v - center).abs()).clamp(0., 1.);
    (255. * intensity).round() as u8
}

/// 256-entry jet lookup table, shape [256, 3], u8 RGB.
fn jet_lut() -> Tensor {
    let mut entries = Vec::with_capacity(256 * 3);
    for i in 0..256 {
        let v = f64::from(i) / 255.;
        entries.push(jet_channel(v, 0.75));
        entries.push(jet_channel(v, 0.5));
        entries.push(jet_channel(v, 0.25));
    }
    Tensor::from_slice(&entries).view([256, 3])
}

/// Maps a single-channel u8 intensity map of shape [h, w] to a [3, h, w]
/// u8 jet-colored image.
pub fn apply_colormap(gray: &Tensor) -> Result<Tensor, CamError> {
    let (h, w) = gray.size2()?;
    let indexes = gray.reshape([h * w]).to_kind(Kind::Int64);
    let colored = jet_lut().index_select(0, &indexes).view([h, w, 3]).permute([2, 0, 1]);
    Ok(colored.contiguous())
}

/// Blends a 256x256 u8 CAM over an image tensor of shape [3, h, w].
///
/// On success returns a u8 tensor of the image's shape.
pub fn overlay(image: &Tensor, cam: &Tensor) -> Result<Tensor, CamError> {
    let (_channels, height, width) = image.size3()?;
    let resized = image::resize(&cam.unsqueeze(0), width, height)?.squeeze_dim(0);
    let heatmap = apply_colormap(&resized)?;
    let blended =
        heatmap.to_kind(Kind::Float) * HEATMAP_WEIGHT + image.to_kind(Kind::Float) * IMAGE_WEIGHT;
    Ok(blended.clamp(0., 255.).to_kind(Kind::Uint8))
}

/// Renders `cam` over the image at `input` and writes the result to
/// `output` (format chosen from the file extension).
pub fn write_overlay(input: &Path, cam: &Tensor, output: &Path) -> Result<(), CamError> {
    let original = image::load(input)?;
    let blended = overlay(&original, cam)?;
    image::save(&blended, output)?;
    Ok(())
}
