pub mod attention_classifier;
pub mod attention_state;
pub mod focus_band;
pub mod state_debouncer;
