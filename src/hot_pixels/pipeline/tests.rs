use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::hot_pixels::black_frame::BlackFrameConfig;
use crate::hot_pixels::common::error::{HotPixelError, Result};
use crate::hot_pixels::defect::{FilterMethod, HotPixelContainer, HotPixelProps, Rect};
use crate::hot_pixels::image::{ImageBuffer, Rgba, RgbaImage};
use crate::hot_pixels::io::{
    ImageReader, ImageWriter, OutputConfig, StandardTiffWriter, TiffImageReader,
};
use crate::hot_pixels::pipeline::HotPixelPipeline;

struct MockReader {
    should_fail: bool,
    mock_data: Option<RgbaImage>,
}

impl ImageReader for MockReader {
    fn read_image(&self, _data: &[u8]) -> Result<RgbaImage> {
        if self.should_fail {
            return Err(HotPixelError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self
            .mock_data
            .clone()
            .unwrap_or_else(|| RgbaImage::filled(10, 10, false, Rgba::gray(50, false))))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<RgbaImage>>>,
}

impl ImageWriter for MockWriter {
    fn write_image(&self, image: &RgbaImage, _output: &mut dyn Write, _config: &OutputConfig) -> Result<()> {
        if self.should_fail {
            return Err(HotPixelError::EncodeError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

fn pipeline(
    reader: MockReader,
    writer_fails: bool,
    config: OutputConfig,
) -> (HotPixelPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<RgbaImage>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter {
        should_fail: writer_fails,
        written_data: written.clone(),
    };
    (HotPixelPipeline::with_custom(reader, writer, config), written)
}

fn single_defect(method: FilterMethod) -> HotPixelContainer {
    HotPixelContainer::new(
        "black.tiff",
        vec![HotPixelProps::with_rect(Rect::new(4, 4, 2, 1), 1).unwrap()],
        method,
    )
}

#[test]
fn test_successful_correction() {
    let mut image = RgbaImage::filled(10, 10, false, Rgba::gray(50, false));
    image.set_pixel(4, 4, Rgba::gray(255, false));
    image.set_pixel(5, 4, Rgba::gray(250, false));

    let reader = MockReader { should_fail: false, mock_data: Some(image) };
    let (pipeline, written) = pipeline(reader, false, OutputConfig::default());

    let mut output = Cursor::new(Vec::new());
    let timings = pipeline
        .fix_with_timings(b"fake image", &mut output, &single_defect(FilterMethod::Average))
        .unwrap();

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0], RgbaImage::filled(10, 10, false, Rgba::gray(50, false)));

    for step in ["decode_image", "validate_dimensions", "fix_hot_pixels", "encode_image"] {
        assert!(timings.get_step(step).is_some(), "missing step {}", step);
    }
    assert_eq!(timings.steps().len(), 4);
}

#[test]
fn test_reader_failure() {
    let reader = MockReader { should_fail: true, mock_data: None };
    let (pipeline, written) = pipeline(reader, false, OutputConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.fix(b"fake image", &mut output, &single_defect(FilterMethod::Linear));

    assert!(matches!(result, Err(HotPixelError::DecodeError(_))));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = pipeline(reader, true, OutputConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.fix(b"fake image", &mut output, &single_defect(FilterMethod::Linear));

    assert!(matches!(result, Err(HotPixelError::EncodeError(_))));
}

#[test]
fn test_dimension_validation_failure() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(RgbaImage::new(0, 10, false)),
    };
    let (pipeline, written) = pipeline(reader, false, OutputConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.fix(b"fake image", &mut output, &single_defect(FilterMethod::Average));

    assert!(matches!(result, Err(HotPixelError::InvalidDimensions(0, 10))));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_dimension_validation_disabled() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(RgbaImage::new(0, 10, false)),
    };
    let config = OutputConfig::builder().validate_dimensions(false).build();
    let (pipeline, written) = pipeline(reader, false, config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.fix(b"fake image", &mut output, &single_defect(FilterMethod::Cubic));

    assert!(result.is_ok());
    assert_eq!(written.lock().unwrap().len(), 1);
}

fn write_tiff(path: &std::path::Path, image: &RgbaImage) {
    let mut file = std::fs::File::create(path).unwrap();
    StandardTiffWriter
        .write_image(image, &mut file, &OutputConfig::default())
        .unwrap();
}

#[test]
fn test_black_frame_to_corrected_file() {
    let dir = tempfile::tempdir().unwrap();
    let black_path = dir.path().join("black.tiff");
    let input_path = dir.path().join("input.tiff");
    let output_path = dir.path().join("output.tiff");

    let mut black = RgbaImage::new(24, 24, true);
    for &(x, y) in &[(5, 5), (5, 6), (15, 10), (20, 3)] {
        black.set_pixel(x, y, Rgba::gray(60000, true));
    }
    write_tiff(&black_path, &black);

    let truth = RgbaImage::from_fn(24, 24, true, |x, y| Rgba::gray((100 * x + 50 * y + 7) as u16, true));
    let mut input = truth.clone();
    for &(x, y) in &[(5, 5), (5, 6), (15, 10), (20, 3)] {
        input.set_pixel(x, y, Rgba::gray(65535, true));
    }
    write_tiff(&input_path, &input);

    let pipeline = HotPixelPipeline::new(OutputConfig::default());
    let container = pipeline
        .load_black_frame(&black_path, FilterMethod::Linear)
        .unwrap();
    assert_eq!(container.hot_pixels.len(), 3);
    assert_eq!(container.black_frame_reference, black_path);

    let timings = pipeline
        .fix_file_with_timings(&input_path, &output_path, &container)
        .unwrap();
    assert!(timings.get_step("read_input_file").is_some());
    assert!(timings.get_step("write_output_file").is_some());
    assert!(timings.get_step("fix_hot_pixels").is_some());

    let fixed = TiffImageReader
        .read_image(&std::fs::read(&output_path).unwrap())
        .unwrap();
    assert_eq!(fixed, truth);
}

#[test]
fn test_load_black_frame_rejects_noisy_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_black.tiff");
    write_tiff(&path, &RgbaImage::filled(8, 8, false, Rgba::gray(200, false)));

    let pipeline = HotPixelPipeline::new(OutputConfig::default())
        .with_black_frame_config(BlackFrameConfig::builder().max_hot_pixels(10).build());
    let result = pipeline.load_black_frame(&path, FilterMethod::Average);

    assert!(matches!(result, Err(HotPixelError::DefectScanAborted { limit: 10 })));
}

#[test]
fn test_load_missing_black_frame_gives_empty_container() {
    let pipeline = HotPixelPipeline::new(OutputConfig::default());
    let container = pipeline
        .load_black_frame("/nonexistent/black.tiff", FilterMethod::Quadratic)
        .unwrap();
    assert!(container.hot_pixels.is_empty());
    assert_eq!(container.filter_method, FilterMethod::Quadratic);
}

#[test]
fn test_fix_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = HotPixelPipeline::new(OutputConfig::default());
    let result = pipeline.fix_file(
        dir.path().join("missing.tiff"),
        dir.path().join("out.tiff"),
        &single_defect(FilterMethod::Average),
    );
    assert!(matches!(result, Err(HotPixelError::InputReadError(_))));
}

#[test]
fn test_failed_correction_leaves_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("corrupt.tiff");
    let output_path = dir.path().join("output.tiff");
    std::fs::write(&input_path, b"not a tiff").unwrap();
    std::fs::write(&output_path, b"previous result").unwrap();

    let pipeline = HotPixelPipeline::new(OutputConfig::default());
    let result = pipeline.fix_file(&input_path, &output_path, &single_defect(FilterMethod::Linear));

    assert!(matches!(result, Err(HotPixelError::DecodeError(_))));
    assert_eq!(std::fs::read(&output_path).unwrap(), b"previous result");
}

#[test]
fn test_failed_correction_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("corrupt.tiff");
    let output_path = dir.path().join("output.tiff");
    std::fs::write(&input_path, b"not a tiff").unwrap();

    let pipeline = HotPixelPipeline::new(OutputConfig::default());
    assert!(pipeline
        .fix_file(&input_path, &output_path, &single_defect(FilterMethod::Average))
        .is_err());
    assert!(!output_path.exists());
}
