use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::classification::domain::attention_state::AttentionSnapshot;
use crate::delivery::domain::frame_sink::FrameSink;
use crate::shared::constants::{DEFAULT_JPEG_QUALITY, STREAM_BOUNDARY};
use crate::shared::frame::Frame;

/// Encodes one frame as a single multipart/x-mixed-replace part:
/// boundary marker, part headers, blank line, JPEG bytes, trailing CRLF.
///
/// This is the wire format browsers expect from an MJPEG endpoint; the
/// server broadcasts these parts verbatim.
pub fn encode_part(
    frame: &Frame,
    boundary: &str,
    quality: u8,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality).encode(
        frame.data(),
        frame.width(),
        frame.height(),
        ExtendedColorType::Rgb8,
    )?;

    let mut part = Vec::with_capacity(jpeg.len() + 64);
    part.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    part.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    part.extend_from_slice(&jpeg);
    part.extend_from_slice(b"\r\n");
    Ok(part)
}

/// Writes the annotated frame stream as an MJPEG multipart sequence to any
/// byte sink (a TCP stream, a file for debugging, a buffer in tests).
pub struct MjpegWriter<W: Write + Send> {
    writer: W,
    boundary: String,
    quality: u8,
}

impl<W: Write + Send> MjpegWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            boundary: STREAM_BOUNDARY.to_string(),
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Consumes the writer and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> FrameSink for MjpegWriter<W> {
    fn write(
        &mut self,
        frame: &Frame,
        _snapshot: &AttentionSnapshot,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let part = encode_part(frame, &self.boundary, self.quality)?;
        self.writer.write_all(&part)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(())
    }
}
