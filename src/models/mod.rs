pub mod config;
pub mod output_spec;

pub use config::AppConfig;
pub use output_spec::{OutputLimits, OutputSpec, PRINT_DPI};
