use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotPixelError {
    #[error("Malformed hot pixel entry: {0}")]
    Parse(String),

    #[error("Black frame scan aborted after more than {limit} candidates, probably not a black frame")]
    DefectScanAborted { limit: usize },

    #[error("Singular weight matrix for {width}x{height} region at polynomial order {order}")]
    SingularWeightMatrix { width: u32, height: u32, order: u32 },

    #[error("Invalid filter method: {0}")]
    InvalidFilterMethod(u8),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HotPixelError>;
