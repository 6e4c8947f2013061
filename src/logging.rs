use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config;

/// Load `.env`, then install the fmt subscriber, so a `RUST_LOG` set in the
/// file takes effect.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(filter_after_dotenv(None))
        .init();
}

/// Filter built from `RUST_LOG` after loading the given dotenv file (or the
/// default `.env` lookup). Defaults to `info`.
pub fn filter_after_dotenv(dotenv: Option<&Path>) -> EnvFilter {
    match dotenv {
        Some(path) => {
            let _ = dotenvy::from_path(path);
        }
        None => {
            config::load_dotenv();
        }
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_from_dotenv_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "RUST_LOG=warn\n").unwrap();

        std::env::remove_var("RUST_LOG");
        let filter = filter_after_dotenv(Some(&path));
        std::env::remove_var("RUST_LOG");

        assert_eq!(filter.to_string(), "warn");
    }
}
