pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{parse_url_arg, render_saved_report, resolve_output_path, settings_from_matches};
