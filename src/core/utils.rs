use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;

const DEFAULT_DIR_NAME: &str = ".budget_planner";
const HOME_ENV: &str = "BUDGET_PLANNER_HOME";
const DATA_DIR: &str = "data";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Resolves the on-disk layout under the application home directory.
pub struct PathResolver;

impl PathResolver {
    /// `BUDGET_PLANNER_HOME` when set, otherwise `~/.budget_planner`.
    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        if let Some(path) = custom {
            return path;
        }
        if let Some(from_env) = env::var_os(HOME_ENV) {
            return PathBuf::from(from_env);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), LedgerError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_wins() {
        let base = PathResolver::resolve_base(Some(PathBuf::from("/tmp/bp-test")));
        assert_eq!(base, PathBuf::from("/tmp/bp-test"));
        assert_eq!(
            PathResolver::config_file_in(&base),
            PathBuf::from("/tmp/bp-test/config/config.json")
        );
        assert_eq!(
            PathResolver::data_dir_in(&base),
            PathBuf::from("/tmp/bp-test/data")
        );
    }
}
