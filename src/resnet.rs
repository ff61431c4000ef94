//! ResNet-50 implementation with explicit feature taps.
//!
//! See "Deep Residual Learning for Image Recognition" He et al. 2015
//! https://arxiv.org/abs/1512.03385
//!
//! The CAM computation needs the activations of the last convolutional
//! stage. Instead of registering side-effecting forward hooks, the model
//! exposes [`ResNet50::forward_features`] which returns the logits together
//! with the last feature map and the globally pooled feature vector.

use tch::nn::{self, ConvConfig, FuncT, Linear, ModuleT, SequentialT};
use tch::Tensor;

/// Per-channel width of the last convolutional stage, and therefore the
/// channel count of the feature map used for CAM computation.
pub const FEATURE_CHANNELS: i64 = 2048;

fn conv2d(p: nn::Path, c_in: i64, c_out: i64, ksize: i64, padding: i64, stride: i64) -> nn::Conv2D {
    let conv2d_cfg = ConvConfig { stride, padding, bias: false, ..Default::default() };
    nn::conv2d(&p, c_in, c_out, ksize, conv2d_cfg)
}

fn downsample(p: nn::Path, c_in: i64, c_out: i64, stride: i64) -> SequentialT {
    if stride != 1 || c_in != c_out {
        nn::seq_t()
            .add(conv2d(&p / "0", c_in, c_out, 1, 0, stride))
            .add(nn::batch_norm2d(&p / "1", c_out, Default::default()))
    } else {
        nn::seq_t()
    }
}

fn bottleneck_block(p: nn::Path, c_in: i64, c_mid: i64, stride: i64) -> FuncT<'static> {
    let c_out = 4 * c_mid;
    let conv1 = conv2d(&p / "conv1", c_in, c_mid, 1, 0, 1);
    let bn1 = nn::batch_norm2d(&p / "bn1", c_mid, Default::default());
    let conv2 = conv2d(&p / "conv2", c_mid, c_mid, 3, 1, stride);
    let bn2 = nn::batch_norm2d(&p / "bn2", c_mid, Default::default());
    let conv3 = conv2d(&p / "conv3", c_mid, c_out, 1, 0, 1);
    let bn3 = nn::batch_norm2d(&p / "bn3", c_out, Default::default());
    let downsample = downsample(&p / "downsample", c_in, c_out, stride);
    nn::func_t(move |xs, train| {
        let ys = xs
            .apply(&conv1)
            .apply_t(&bn1, train)
            .relu()
            .apply(&conv2)
            .apply_t(&bn2, train)
            .relu()
            .apply(&conv3)
            .apply_t(&bn3, train);
        (xs.apply_t(&downsample, train) + ys).relu()
    })
}

fn make_layer(p: nn::Path, c_in: i64, c_mid: i64, stride: i64, cnt: i64) -> SequentialT {
    let mut layer = nn::seq_t().add(bottleneck_block(&p / "0", c_in, c_mid, stride));
    for block_index in 1..cnt {
        layer = layer.add(bottleneck_block(&p / &block_index.to_string(), 4 * c_mid, c_mid, 1))
    }
    layer
}

/// Activations captured during a forward pass.
#[derive(Debug)]
pub struct Activations {
    /// Raw class scores, shape [batch, classes].
    pub logits: Tensor,
    /// Output of the last convolutional stage, shape [batch, 2048, h, w].
    pub features: Tensor,
    /// Globally pooled feature vector, shape [batch, 2048].
    pub pooled: Tensor,
}

/// ResNet-50 with the parameter naming of the torchvision reference model,
/// so that converted torchvision checkpoints load without key remapping.
#[derive(Debug)]
pub struct ResNet50 {
    stem: SequentialT,
    layer1: SequentialT,
    layer2: SequentialT,
    layer3: SequentialT,
    layer4: SequentialT,
    fc: Linear,
}

impl ResNet50 {
    pub fn new(p: &nn::Path, num_classes: i64) -> ResNet50 {
        let stem = nn::seq_t()
            .add(conv2d(p / "conv1", 3, 64, 7, 3, 2))
            .add(nn::batch_norm2d(p / "bn1", 64, Default::default()))
            .add_fn(|xs| xs.relu().max_pool2d([3, 3], [2, 2], [1, 1], [1, 1], false));
        ResNet50 {
            stem,
            layer1: make_layer(p / "layer1", 64, 64, 1, 3),
            layer2: make_layer(p / "layer2", 256, 128, 2, 4),
            layer3: make_layer(p / "layer3", 512, 256, 2, 6),
            layer4: make_layer(p / "layer4", 1024, 512, 2, 3),
            fc: nn::linear(p / "fc", FEATURE_CHANNELS, num_classes, Default::default()),
        }
    }

    /// Runs the forward pass and captures the intermediate activations the
    /// CAM computation needs.
    pub fn forward_features(&self, xs: &Tensor, train: bool) -> Activations {
        let features = xs
            .apply_t(&self.stem, train)
            .apply_t(&self.layer1, train)
            .apply_t(&self.layer2, train)
            .apply_t(&self.layer3, train)
            .apply_t(&self.layer4, train);
        let pooled = features.adaptive_avg_pool2d([1, 1]).flat_view();
        let logits = pooled.apply(&self.fc);
        Activations { logits, features, pooled }
    }

    /// Final linear layer weights with negative entries clamped to zero.
    ///
    /// CAM visualization only considers positively contributing channels;
    /// the clamped copy leaves the model weights untouched.
    pub fn class_weights(&self) -> Tensor {
        self.fc.ws.clamp_min(0.)
    }
}

impl ModuleT for ResNet50 {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Tensor {
        self.forward_features(xs, train).logits
    }
}
