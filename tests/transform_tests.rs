use tch::vision::image;
use tch::{Device, Kind, Tensor};

use moments_cam::transform;

mod test_utils;
use test_utils::TmpFile;

#[test]
fn preprocess_resizes_and_normalizes() {
    let tmp_file = TmpFile::create("black-image", "png");
    let black = Tensor::zeros([3, 64, 64], (Kind::Uint8, Device::Cpu));
    image::save(&black, &tmp_file).unwrap();

    let tensor = transform::load_and_preprocess(&tmp_file).unwrap();
    assert_eq!(tensor.size(), [3, transform::SIDE, transform::SIDE]);
    assert_eq!(tensor.kind(), Kind::Float);
    // A black pixel normalizes to -mean/std per channel.
    for channel in 0..3 {
        let value = tensor.double_value(&[channel, 112, 112]);
        let expected = -f64::from(transform::MEAN[channel as usize])
            / f64::from(transform::STD[channel as usize]);
        assert!((value - expected).abs() < 1e-4, "channel {channel}: {value} vs {expected}");
    }
}
