use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::hot_pixels::{
    black_frame::{BlackFrameConfig, BlackFrameParser},
    common::error::{HotPixelError, Result},
    defect::{FilterMethod, HotPixelContainer},
    fixer::HotPixelFixer,
    io::{ImageReader, ImageWriter, OutputConfig, StandardTiffWriter, TiffImageReader},
    pipeline::timing::PipelineTimings,
};

pub struct HotPixelPipeline<R: ImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    parser: BlackFrameParser,
    fixer: HotPixelFixer,
    config: OutputConfig,
}

impl HotPixelPipeline<TiffImageReader, StandardTiffWriter> {
    pub fn new(config: OutputConfig) -> Self {
        Self::with_custom(TiffImageReader, StandardTiffWriter, config)
    }
}

impl<R: ImageReader, W: ImageWriter> HotPixelPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: OutputConfig) -> Self {
        Self {
            reader,
            writer,
            parser: BlackFrameParser::default(),
            fixer: HotPixelFixer::new(),
            config,
        }
    }

    pub fn with_black_frame_config(mut self, config: BlackFrameConfig) -> Self {
        self.parser = BlackFrameParser::new(config);
        self
    }

    pub fn with_fixer(mut self, fixer: HotPixelFixer) -> Self {
        self.fixer = fixer;
        self
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(HotPixelError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Parses a black frame read with this pipeline's reader.
    ///
    /// An unreadable frame gives an empty container; a frame with too many
    /// candidates fails with [`HotPixelError::DefectScanAborted`].
    #[instrument(skip(self, path), fields(black_frame = %path.as_ref().display()))]
    pub fn load_black_frame<P: AsRef<Path>>(&self, path: P, method: FilterMethod) -> Result<HotPixelContainer> {
        let path = path.as_ref();
        let hot_pixels = self.parser.parse_file(path, &self.reader)?;
        if hot_pixels.is_empty() {
            warn!("No hot pixels found in {}", path.display());
        }
        Ok(HotPixelContainer::new(path, hot_pixels, method))
    }

    pub fn fix(&self, input_data: &[u8], output: &mut dyn Write, container: &HotPixelContainer) -> Result<()> {
        self.fix_with_timings(input_data, output, container).map(|_| ())
    }

    #[instrument(skip_all, fields(input_size = input_data.len(), regions = container.hot_pixels.len()))]
    pub fn fix_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        container: &HotPixelContainer,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting hot pixel correction");

        let image = timings.time("decode_image", || self.reader.read_image(input_data))?;

        timings.time("validate_dimensions", || {
            self.validate_dimensions(image.width, image.height)
        })?;

        let fixed = timings.time("fix_hot_pixels", || self.fixer.fix(&image, container));

        timings.time("encode_image", || self.writer.write_image(&fixed, output, &self.config))?;

        info!(
            "Correction complete: {}x{} in {:.3}ms",
            image.width,
            image.height,
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    pub fn fix_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        container: &HotPixelContainer,
    ) -> Result<()> {
        self.fix_file_with_timings(input_path, output_path, container).map(|_| ())
    }

    pub fn fix_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        container: &HotPixelContainer,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            "Correcting file: {} -> {}",
            input_path.display(),
            output_path.display()
        );

        let mut timings = PipelineTimings::new();

        let input_data = timings.time("read_input_file", || std::fs::read(input_path)).map_err(|e| {
            HotPixelError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        let mut encoded = Vec::new();
        let correction = self.fix_with_timings(&input_data, &mut encoded, container)?;
        for step in correction.steps() {
            timings.add_step(step.name.clone(), step.duration);
        }

        // Only touch the output once the corrected image is fully encoded.
        timings
            .time("write_output_file", || std::fs::write(output_path, &encoded))
            .map_err(|e| HotPixelError::OutputWriteError(format!("{}: {}", output_path.display(), e)))?;

        Ok(timings)
    }

    pub fn parser(&self) -> &BlackFrameParser {
        &self.parser
    }

    pub fn fixer(&self) -> &HotPixelFixer {
        &self.fixer
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: OutputConfig) {
        self.config = config;
    }
}
