//! Input image preprocessing.
//!
//! The network is fed 224x224 float images scaled to [0, 1] and normalized
//! per channel with the usual imagenet mean and standard deviation.

use std::path::Path;

use tch::vision::image;
use tch::{Kind, TchError, Tensor};

pub const SIDE: i64 = 224;
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

fn normalize(tensor: &Tensor) -> Result<Tensor, TchError> {
    let mean = Tensor::f_from_slice(&MEAN)?.f_view([3, 1, 1])?;
    let std = Tensor::f_from_slice(&STD)?.f_view([3, 1, 1])?;
    Ok((tensor.to_kind(Kind::Float) / 255. - mean) / std)
}

/// Loads an image file, resizes it to 224x224 and normalizes it.
///
/// On success returns a float tensor of shape [3, 224, 224].
pub fn load_and_preprocess<P: AsRef<Path>>(path: P) -> Result<Tensor, TchError> {
    let tensor = image::load_and_resize(path, SIDE, SIDE)?;
    normalize(&tensor)
}
