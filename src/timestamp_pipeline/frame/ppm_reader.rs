//! Binary PPM (P6) frame reader.
//!
//! The capture side of the latency tooling hands frames over as binary PPM
//! files: an ASCII header (`P6`, optional `#`-comment lines, `<width>
//! <height>`, `<maxval>`) followed immediately by raw row-major RGB
//! triplets. This module parses that format into an [`RgbFrame`] and
//! serializes frames back out for fixtures.

use tracing::debug;

use crate::timestamp_pipeline::common::error::{DecodeError, Result};
use crate::timestamp_pipeline::frame::reader::FrameReader;
use crate::timestamp_pipeline::frame::types::{RGB_BYTES_PER_PIXEL, RgbFrame};

/// Magic bytes opening a binary-RGB PPM header.
const PPM_MAGIC: &[u8] = b"P6";

/// Largest channel maxval the one-byte-per-channel layout can carry.
const MAX_COLOR_DEPTH: u32 = 255;

/// Frame reader for binary PPM ("P6") captures.
///
/// The header is parsed line by line: a line starting `P6`, then a
/// `<width> <height>` line, then a `<maxval>` line, with `#`-comment lines
/// allowed between them. The byte after the maxval line's LF begins the
/// pixel payload; trailing bytes beyond `width * height * 3` are ignored.
pub struct PpmReader;

impl FrameReader for PpmReader {
    /// Parse a binary PPM image into an RGB frame.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw bytes of the PPM file
    ///
    /// # Returns
    ///
    /// * `Ok(RgbFrame)` - Successfully parsed frame
    /// * `Err(DecodeError)` - Missing signature, malformed header, maxval
    ///   above 255, or a pixel payload shorter than the header calls for
    ///
    /// # Examples
    ///
    /// ```
    /// use latency_clock_rs::timestamp_pipeline::{FrameReader, PpmReader};
    ///
    /// let ppm = b"P6\n2 2\n255\n\x00\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b";
    /// let frame = PpmReader.read_frame(ppm).unwrap();
    /// assert_eq!((frame.width, frame.height), (2, 2));
    /// ```
    fn read_frame(&self, data: &[u8]) -> Result<RgbFrame> {
        let mut lines = HeaderLines::new(data);

        let signature = lines
            .next_line()
            .ok_or_else(|| DecodeError::BadSignature("empty input".to_string()))?;
        if !signature.starts_with(PPM_MAGIC) {
            return Err(DecodeError::BadSignature(format!(
                "header starts with '{}'",
                String::from_utf8_lossy(&signature[..signature.len().min(16)])
            )));
        }

        let dims_line = lines
            .next_content_line()
            .ok_or_else(|| DecodeError::MalformedHeader("missing dimension line".to_string()))?;
        let (width, height) = parse_dimensions(dims_line)?;
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }

        let maxval_line = lines
            .next_content_line()
            .ok_or_else(|| DecodeError::MalformedHeader("missing maxval line".to_string()))?;
        let maxval = parse_maxval(maxval_line)?;
        if maxval > MAX_COLOR_DEPTH {
            return Err(DecodeError::UnsupportedColorDepth(maxval));
        }

        let payload = &data[lines.pos..];
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(RGB_BYTES_PER_PIXEL))
            .ok_or_else(|| {
                DecodeError::MalformedHeader(format!(
                    "dimensions {width}x{height} overflow the payload size"
                ))
            })?;
        if payload.len() < expected {
            return Err(DecodeError::TruncatedPixelData {
                expected,
                actual: payload.len(),
            });
        }

        debug!(width, height, maxval, "Parsed PPM header");

        RgbFrame::new(width, height, payload[..expected].to_vec())
    }
}

/// Serialize a frame as binary PPM with maxval 255.
///
/// Counterpart of [`PpmReader`]: the output re-parses to an identical
/// frame. Only 3-byte RGB frames can be represented.
pub fn to_ppm_bytes(frame: &RgbFrame) -> Result<Vec<u8>> {
    if frame.bytes_per_pixel != RGB_BYTES_PER_PIXEL {
        return Err(DecodeError::InvalidGeometry(format!(
            "PPM output requires {} bytes per pixel, frame has {}",
            RGB_BYTES_PER_PIXEL, frame.bytes_per_pixel
        )));
    }
    let payload = frame
        .data
        .get(..frame.expected_len())
        .ok_or_else(|| DecodeError::TruncatedPixelData {
            expected: frame.expected_len(),
            actual: frame.data.len(),
        })?;

    let header = format!("P6\n{} {}\n{}\n", frame.width, frame.height, MAX_COLOR_DEPTH);
    let mut out = Vec::with_capacity(header.len() + payload.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// LF-separated view over the header bytes, tracking where the pixel
/// payload begins.
struct HeaderLines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderLines<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Next line without its LF terminator; the final line may be
    /// unterminated.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.data.len() {
            return None;
        }
        let start = self.pos;
        match self.data[start..].iter().position(|&b| b == b'\n') {
            Some(i) => {
                self.pos = start + i + 1;
                Some(&self.data[start..start + i])
            }
            None => {
                self.pos = self.data.len();
                Some(&self.data[start..])
            }
        }
    }

    /// Next line that is not a `#` comment.
    fn next_content_line(&mut self) -> Option<&'a [u8]> {
        loop {
            let line = self.next_line()?;
            if line.trim_ascii().first() != Some(&b'#') {
                return Some(line);
            }
        }
    }
}

fn parse_dimensions(line: &[u8]) -> Result<(usize, usize)> {
    let text = header_text(line)?;
    let mut fields = text.split_ascii_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(w), Some(h), None) => Ok((parse_field(w, "width")?, parse_field(h, "height")?)),
        _ => Err(DecodeError::MalformedHeader(format!(
            "expected '<width> <height>', got '{text}'"
        ))),
    }
}

fn parse_maxval(line: &[u8]) -> Result<u32> {
    let text = header_text(line)?;
    text.trim()
        .parse()
        .map_err(|_| DecodeError::MalformedHeader(format!("expected '<maxval>', got '{text}'")))
}

fn parse_field(field: &str, name: &str) -> Result<usize> {
    field
        .parse()
        .map_err(|_| DecodeError::MalformedHeader(format!("cannot parse {name} from '{field}'")))
}

fn header_text(line: &[u8]) -> Result<&str> {
    std::str::from_utf8(line.trim_ascii())
        .map_err(|_| DecodeError::MalformedHeader("non-ASCII bytes in header".to_string()))
}
