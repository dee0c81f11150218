pub mod infrastructure;
pub mod pipeline_executor;
pub mod pipeline_logger;
pub mod snapshot_cell;
pub mod track_attention_use_case;
