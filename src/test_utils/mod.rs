use std::path::PathBuf;

/// A fresh path under the system temp dir; nothing is created.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("quote_formatter-{}-{}", rand::random::<u64>(), name))
}
