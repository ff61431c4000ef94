//! Class activation map (CAM) visualization for the Moments in Time
//! ResNet-50 classifier.
//!
//! See "Learning Deep Features for Discriminative Localization",
//! Zhou et al. 2016, https://arxiv.org/abs/1512.04150

pub mod cam;
pub mod categories;
pub mod download;
mod error;
pub mod render;
pub mod resnet;
pub mod transform;
pub mod weights;

pub use error::CamError;
