use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Careview";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port the review API binds to (matches the original service).
pub const DEFAULT_PORT: u16 = 5000;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,careview=debug"
}

/// Get the application data directory
/// ~/Careview/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Careview")
}

/// Flat-file review store location.
pub fn reviews_file() -> PathBuf {
    app_data_dir().join("reviews.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Careview"));
    }

    #[test]
    fn reviews_file_under_app_data() {
        let file = reviews_file();
        assert!(file.starts_with(app_data_dir()));
        assert!(file.ends_with("reviews.json"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
