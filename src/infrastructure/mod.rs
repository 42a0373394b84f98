//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{data_dir, default_store_path, expand_tilde, CONFIG_FILE_NAME, DATA_DIR_ENV, STORE_FILE_NAME};
