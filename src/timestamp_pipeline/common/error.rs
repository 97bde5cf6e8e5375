use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write report: {0}")]
    OutputWriteError(String),

    #[error("Not a binary PPM (P6) image: {0}")]
    BadSignature(String),

    #[error("Malformed PPM header: {0}")]
    MalformedHeader(String),

    #[error("Unsupported color depth: maxval {0} exceeds 255")]
    UnsupportedColorDepth(u32),

    #[error("Truncated pixel data: expected {expected} bytes, got {actual}")]
    TruncatedPixelData { expected: usize, actual: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Insufficient frame size: {width}x{height} cannot hold the {required_width}x{required_height} clock region")]
    InsufficientFrameSize {
        width: usize,
        height: usize,
        required_width: usize,
        required_height: usize,
    },

    #[error("Sample offset {offset} out of bounds for {len}-byte frame buffer")]
    SampleOutOfBounds { offset: usize, len: usize },

    #[error("Invalid overlay geometry: {0}")]
    InvalidGeometry(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
