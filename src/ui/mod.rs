// User-facing front end

pub mod app;

pub use app::{run, Cli};
