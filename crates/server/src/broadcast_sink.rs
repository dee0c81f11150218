use axum::body::Bytes;
use tokio::sync::broadcast;

use focustrack_core::classification::domain::attention_state::AttentionSnapshot;
use focustrack_core::delivery::domain::frame_sink::FrameSink;
use focustrack_core::delivery::infrastructure::mjpeg_writer::encode_part;
use focustrack_core::shared::constants::STREAM_BOUNDARY;
use focustrack_core::shared::frame::Frame;

/// Sink that encodes each annotated frame as an MJPEG part and fans it out
/// to stream subscribers.
///
/// A send with no subscribers is not a failure: the pipeline keeps running
/// (and the status endpoint keeps updating) while nobody is watching the
/// video feed. Encoding errors are stream-level and stop the pipeline.
pub struct BroadcastSink {
    tx: broadcast::Sender<Bytes>,
    quality: u8,
}

impl BroadcastSink {
    pub fn new(tx: broadcast::Sender<Bytes>, quality: u8) -> Self {
        Self { tx, quality }
    }
}

impl FrameSink for BroadcastSink {
    fn write(
        &mut self,
        frame: &Frame,
        _snapshot: &AttentionSnapshot,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let part = encode_part(frame, STREAM_BOUNDARY, self.quality)?;
        let _ = self.tx.send(Bytes::from(part));
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focustrack_core::classification::domain::attention_state::AttentionState;
    use focustrack_core::shared::constants::DEFAULT_JPEG_QUALITY;

    fn snapshot() -> AttentionSnapshot {
        AttentionSnapshot::new(AttentionState::NoSubject, None)
    }

    #[test]
    fn test_write_broadcasts_encoded_part() {
        let (tx, mut rx) = broadcast::channel(1);
        let mut sink = BroadcastSink::new(tx, DEFAULT_JPEG_QUALITY);

        let frame = Frame::filled(32, 32, 0, [120, 120, 120]);
        sink.write(&frame, &snapshot()).unwrap();

        let part = rx.try_recv().unwrap();
        assert!(part.starts_with(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n"));
        assert!(part.ends_with(b"\r\n"));
    }

    #[test]
    fn test_write_without_subscribers_is_ok() {
        let (tx, _) = broadcast::channel(1);
        let mut sink = BroadcastSink::new(tx, DEFAULT_JPEG_QUALITY);

        let frame = Frame::filled(32, 32, 0, [120, 120, 120]);
        sink.write(&frame, &snapshot()).unwrap();
        sink.close().unwrap();
    }

    #[test]
    fn test_slow_subscriber_keeps_only_latest() {
        let (tx, mut rx) = broadcast::channel(1);
        let mut sink = BroadcastSink::new(tx, DEFAULT_JPEG_QUALITY);

        sink.write(&Frame::filled(32, 32, 0, [10, 10, 10]), &snapshot())
            .unwrap();
        sink.write(&Frame::filled(32, 32, 1, [250, 250, 250]), &snapshot())
            .unwrap();

        // The one-slot buffer dropped the older frame.
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert!(rx.try_recv().is_ok());
    }
}
