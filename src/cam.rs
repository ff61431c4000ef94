//! Class activation map computation.
//!
//! A CAM scores how strongly each spatial location of the last feature map
//! contributed to a given class: the feature map is flattened spatially,
//! weighted by the class row of the final linear layer and normalized to an
//! 8-bit intensity map.

use tch::{Kind, Tensor};

use crate::CamError;

/// Side of the fixed canvas the maps are upsampled to.
pub const CAM_SIZE: i64 = 256;

/// Computes the normalized activation map for one class, before upsampling.
///
/// `features` has shape [channels, h, w], `class_weights` has shape
/// [classes, channels] with non-negative entries. The returned float map of
/// shape [h, w] spans [0, 255] with max exactly 255, except for a constant
/// input map which yields an all-zero map instead of dividing by zero.
pub fn normalized_map(
    features: &Tensor,
    class_weights: &Tensor,
    class_index: i64,
) -> Result<Tensor, CamError> {
    let (channels, h, w) = features.size3()?;
    let flat = features.reshape([channels, h * w]);
    let raw = class_weights.select(0, class_index).unsqueeze(0).matmul(&flat).reshape([h, w]);
    let shifted = &raw - raw.min();
    let max = shifted.max().double_value(&[]);
    if max > 0. {
        Ok(shifted / max * 255.)
    } else {
        Ok(Tensor::zeros([h, w], (Kind::Float, features.device())))
    }
}

/// Generates one class activation map per requested class index, in request
/// order.
///
/// Each map is normalized as in [`normalized_map`], bilinearly upsampled to
/// a fixed 256x256 canvas without corner alignment, and truncated to u8.
pub fn class_activation_maps(
    features: &Tensor,
    class_weights: &Tensor,
    class_indexes: &[i64],
) -> Result<Vec<Tensor>, CamError> {
    class_indexes
        .iter()
        .map(|&class_index| {
            let map = normalized_map(features, class_weights, class_index)?;
            let (h, w) = map.size2()?;
            let upsampled = map
                .view([1, 1, h, w])
                .upsample_bilinear2d([CAM_SIZE, CAM_SIZE], false, None, None)
                .view([CAM_SIZE, CAM_SIZE]);
            Ok(upsampled.to_kind(Kind::Uint8))
        })
        .collect()
}
