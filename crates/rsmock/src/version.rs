//! Build identity. Commit and date are injected at build time via
//! `RSMOCK_COMMIT` / `RSMOCK_BUILD_DATE` and immutable afterwards.

pub const NAME: &str = "rsmock";

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: Option<&str> = option_env!("RSMOCK_COMMIT");
const DATE: Option<&str> = option_env!("RSMOCK_BUILD_DATE");

/// `--version` string: the bare semantic version, or
/// `v<version>, build <commit>, date <date>` when build metadata is
/// present.
pub fn long_version() -> String {
    match (COMMIT, DATE) {
        (Some(commit), Some(date)) => format!("v{VERSION}, build {commit}, date {date}"),
        _ => VERSION.to_string(),
    }
}
