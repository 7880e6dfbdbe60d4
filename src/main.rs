use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use hotpixels_rs::hot_pixels::{
    BlackFrameParser, FilterMethod, HotPixelContainer, HotPixelPipeline, OutputConfig, RawLoaderReader,
};
use hotpixels_rs::logger;

use tracing::info;

const USAGE: &str = "usage: hotpixels <black-frame|defects.json> <input.tiff> <output.tiff> [average|linear|quadratic|cubic]";

fn parse_method(name: &str) -> anyhow::Result<FilterMethod> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "average" => FilterMethod::Average,
        "linear" => FilterMethod::Linear,
        "quadratic" => FilterMethod::Quadratic,
        "cubic" => FilterMethod::Cubic,
        other => bail!("unknown filter method '{}'\n{}", other, USAGE),
    })
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 || args.len() > 4 {
        bail!(USAGE);
    }
    let black_frame = PathBuf::from(&args[0]);
    let input = PathBuf::from(&args[1]);
    let output = PathBuf::from(&args[2]);
    let method = args.get(3).map(|m| parse_method(m)).transpose()?;

    info!("Starting hotpixels...");

    let pipeline = HotPixelPipeline::new(OutputConfig::default());

    let container = if has_extension(&black_frame, &["json"]) {
        let mut container = HotPixelContainer::load(&black_frame)
            .with_context(|| format!("loading defect list {}", black_frame.display()))?;
        if let Some(method) = method {
            container.filter_method = method;
        }
        container
    } else {
        let method = method.unwrap_or_default();
        let container = if has_extension(&black_frame, &["tif", "tiff"]) {
            pipeline.load_black_frame(&black_frame, method)?
        } else {
            let hot_pixels = BlackFrameParser::default().parse_file(&black_frame, &RawLoaderReader)?;
            HotPixelContainer::new(&black_frame, hot_pixels, method)
        };

        let defects_path = output.with_extension("hotpixels.json");
        container
            .save(&defects_path)
            .with_context(|| format!("saving defect list {}", defects_path.display()))?;
        info!("Defect list written to {}", defects_path.display());
        container
    };

    info!(
        "{} hot pixel regions, method {:?}",
        container.hot_pixels.len(),
        container.filter_method
    );

    let timings = pipeline
        .fix_file_with_timings(&input, &output, &container)
        .with_context(|| format!("correcting {}", input.display()))?;
    timings.log_summary();

    info!("Correction successful!");
    Ok(())
}
