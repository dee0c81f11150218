pub mod overlay_annotator;
