// Runs the Moments in Time ResNet-50 on a single image, prints the top-5
// predicted categories and writes a class activation map overlay.
//
// The converted checkpoint is downloaded on first use; without --image the
// reference demo picture is fetched.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use moments_cam::categories::Categories;
use moments_cam::resnet::ResNet50;
use moments_cam::{cam, download, render, transform, weights};

const SAMPLE_IMAGE_URL: &str = "http://places2.csail.mit.edu/imgs/demo/IMG_5970.JPG";
const WEIGHTS_URL: &str =
    "http://moments.csail.mit.edu/moments_models/moments_v2_RGB_resnet50_imagenetpretrained.ot";

#[derive(Debug, Parser)]
#[clap(about = "test the Moments in Time classifier on a single image")]
struct Args {
    /// Category file, one class name per line
    #[clap(long, default_value = "category_momentsv2.txt")]
    categories: PathBuf,
    /// Converted model checkpoint (.ot or .safetensors)
    #[clap(long, default_value = "moments_v2_RGB_resnet50_imagenetpretrained.ot")]
    weights: PathBuf,
    /// Where to download the checkpoint from when it is missing
    #[clap(long, default_value = WEIGHTS_URL)]
    weights_url: String,
    /// Image to classify; the demo image is downloaded when omitted
    #[clap(long)]
    image: Option<PathBuf>,
    /// Output file for the heatmap overlay
    #[clap(long, default_value = "cam.jpg")]
    output: PathBuf,
}

fn main() -> Result<()> {
    init_logger()?;
    let args = Args::parse();

    let categories =
        Categories::load(&args.categories).context("Loading the category list")?;

    download::fetch_if_missing(&args.weights_url, &args.weights)
        .context("Fetching the model checkpoint")?;
    let mut vs = tch::nn::VarStore::new(tch::Device::Cpu);
    let net = ResNet50::new(&vs.root(), categories.len() as i64);
    weights::load_checkpoint(&mut vs, &args.weights).context("Loading the model checkpoint")?;

    let image_path = match &args.image {
        Some(path) => path.clone(),
        None => {
            let path = PathBuf::from("test.jpg");
            download::fetch(SAMPLE_IMAGE_URL, &path).context("Fetching the demo image")?;
            path
        }
    };
    let input = transform::load_and_preprocess(&image_path).context("Preprocessing the image")?;

    // Forward pass, capturing the last feature map for the CAM.
    let activations = net.forward_features(&input.unsqueeze(0), /* train= */ false);
    let probabilities = activations.logits.softmax(-1, tch::Kind::Float).squeeze();

    println!("RESULT ON {}", image_path.display());
    println!("--Top Actions:");
    for (probability, category) in categories.top(&probabilities, 5)? {
        println!("{probability:.3} -> {category}");
    }

    let top_class = probabilities.argmax(None, false).int64_value(&[]);
    let features = activations.features.squeeze_dim(0);
    let maps = cam::class_activation_maps(&features, &net.class_weights(), &[top_class])?;
    render::write_overlay(&image_path, &maps[0], &args.output)
        .context("Rendering the heatmap overlay")?;
    println!("Class activation map is saved as {}", args.output.display());
    Ok(())
}

fn init_logger() -> Result<()> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
