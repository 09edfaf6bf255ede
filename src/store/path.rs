use std::path::PathBuf;

/// Store file used when nothing else is configured
pub const DEFAULT_STORE_FILE: &str = "db.txt";

/// Environment variable naming the store file
pub const STORE_ENV_VAR: &str = "LOGWORK_DB";

/// Get the default store path (relative to the working directory)
pub fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

/// Resolve the store path: explicit flag, then `LOGWORK_DB`, then `db.txt`
pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
    resolve_from(explicit, std::env::var_os(STORE_ENV_VAR).map(PathBuf::from))
}

fn resolve_from(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| from_env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(default_path)
}
