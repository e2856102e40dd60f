// Utility Module
// Configuration and the text artifact layer around the RSA core

pub mod config;
pub mod file_ops;

pub use config::FileConfig;
pub use file_ops::{
    read_file, read_integer, read_text, render_block, write_lines, BlockKind, FileError,
    FileResult, KeyFile,
};
