pub mod mjpeg_writer;
