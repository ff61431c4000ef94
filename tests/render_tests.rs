use tch::{Device, Kind, Tensor};

use moments_cam::render;

#[test]
fn colormap_endpoints() {
    let cold = Tensor::zeros([2, 2], (Kind::Uint8, Device::Cpu));
    let colored = render::apply_colormap(&cold).unwrap();
    assert_eq!(colored.size(), [3, 2, 2]);
    // Jet maps the low end to blue..
    assert_eq!(colored.int64_value(&[0, 0, 0]), 0);
    assert_eq!(colored.int64_value(&[1, 0, 0]), 0);
    assert_eq!(colored.int64_value(&[2, 0, 0]), 128);

    // ..and the high end to red.
    let hot = Tensor::full([2, 2], 255, (Kind::Uint8, Device::Cpu));
    let colored = render::apply_colormap(&hot).unwrap();
    assert_eq!(colored.int64_value(&[0, 0, 0]), 128);
    assert_eq!(colored.int64_value(&[1, 0, 0]), 0);
    assert_eq!(colored.int64_value(&[2, 0, 0]), 0);
}

#[test]
fn overlay_blend_weights() {
    let image = Tensor::full([3, 8, 8], 100, (Kind::Uint8, Device::Cpu));
    let cam = Tensor::zeros([256, 256], (Kind::Uint8, Device::Cpu));
    let blended = render::overlay(&image, &cam).unwrap();
    assert_eq!(blended.size(), [3, 8, 8]);
    assert_eq!(blended.kind(), Kind::Uint8);
    // jet(0) = (0, 0, 128); blend is 0.4 * heatmap + 0.5 * image.
    assert_eq!(blended.int64_value(&[0, 4, 4]), 50);
    assert_eq!(blended.int64_value(&[1, 4, 4]), 50);
    assert_eq!(blended.int64_value(&[2, 4, 4]), 101);
}

#[test]
fn overlay_keeps_image_dimensions() {
    let image = Tensor::zeros([3, 37, 53], (Kind::Uint8, Device::Cpu));
    let cam = Tensor::full([256, 256], 255, (Kind::Uint8, Device::Cpu));
    let blended = render::overlay(&image, &cam).unwrap();
    assert_eq!(blended.size(), [3, 37, 53]);
}
