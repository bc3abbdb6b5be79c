pub mod scanner;

pub use scanner::{ArtifactScanner, DEFAULT_EXTENSION, ScanStats};
