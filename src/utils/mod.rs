pub mod environment;
pub mod logging;
pub mod terminal;

pub use environment::{default_log_dir, default_storage_path, get_data_dir, normalize_backend_url};
pub use logging::{init_file_logging, init_stderr_logging};
pub use terminal::sanitize_for_display;
