//! Attention tracking core: classifies whether a single subject's face is
//! oriented toward the camera and drives the per-frame processing pipeline
//! that keeps an annotated video stream and a focus status up to date.
//!
//! Each bounded context is split into `domain` (traits and pure logic) and
//! `infrastructure` (concrete adapters); the pipeline module wires them
//! together.

pub mod annotation;
pub mod capture;
pub mod classification;
pub mod delivery;
pub mod detection;
pub mod pipeline;
pub mod shared;
