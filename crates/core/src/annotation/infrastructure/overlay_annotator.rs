use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::classification::domain::attention_state::AttentionSnapshot;
use crate::shared::frame::Frame;

const GREEN: [u8; 3] = [0, 255, 0];
const RED: [u8; 3] = [255, 0, 0];

const MARKER_RADIUS: i64 = 5;
const LABEL_ORIGIN: (i64, i64) = (20, 20);

/// Draws the reference-point marker and the status label directly into the
/// frame's pixel buffer.
///
/// The marker is a filled disc at the reference point, green when the
/// subject is focused and red otherwise; the label is the state's text
/// rendered with a small built-in glyph font. Geometry scales with frame
/// width so overlays stay legible at higher capture resolutions.
pub struct OverlayAnnotator;

impl OverlayAnnotator {
    pub fn new() -> Self {
        Self
    }

    fn scale(frame: &Frame) -> i64 {
        (frame.width() as i64 / 320).max(1)
    }

    fn draw_disc(frame: &mut Frame, cx: i64, cy: i64, radius: i64, color: [u8; 3]) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    frame.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_text(frame: &mut Frame, text: &str, x0: i64, y0: i64, scale: i64, color: [u8; 3]) {
        let mut x = x0;
        for ch in text.chars() {
            let glyph = glyph(ch);
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                frame.set_pixel(
                                    x + col as i64 * scale + sx,
                                    y0 + row as i64 * scale + sy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            x += (GLYPH_WIDTH as i64 + 1) * scale;
        }
    }
}

impl Default for OverlayAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAnnotator for OverlayAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        snapshot: &AttentionSnapshot,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let color = if snapshot.is_focused { GREEN } else { RED };
        let scale = Self::scale(frame);

        if let Some(point) = snapshot.reference_point {
            let (px, py) = point.to_pixel(frame.width(), frame.height());
            Self::draw_disc(frame, px, py, MARKER_RADIUS * scale, color);
        }

        let label = snapshot.state.label().to_uppercase();
        Self::draw_text(
            frame,
            &label,
            LABEL_ORIGIN.0 * scale,
            LABEL_ORIGIN.1 * scale,
            scale,
            color,
        );
        Ok(())
    }
}

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;

/// 5x7 glyphs covering the characters used by the status labels.
/// Unknown characters render as blanks.
fn glyph(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        _ => [0; GLYPH_HEIGHT],
    }
}
