use std::env;

/// Environment variable names for the fixed identifier parts
pub const ENV_VIRIN_BRANCH: &str = "VIRIN_BRANCH";
pub const ENV_VIRIN_UNIT_ID: &str = "VIRIN_UNIT_ID";

pub const DEFAULT_BRANCH: &str = "F";
pub const DEFAULT_UNIT_ID: &str = "F3965";

/// Fixed branch/unit pair stamped into every identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirinConfig {
    pub branch: String,
    pub unit_id: String,
}

impl Default for VirinConfig {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            unit_id: DEFAULT_UNIT_ID.to_string(),
        }
    }
}

/// Load identifier configuration from environment variables
///
/// - `VIRIN_BRANCH`: service branch letter (default `F`)
/// - `VIRIN_UNIT_ID`: unit identifier (default `F3965`)
///
/// These can be set in a `.env` file in the working directory.
pub fn config_from_env() -> VirinConfig {
    let branch = non_empty_var(ENV_VIRIN_BRANCH).unwrap_or_else(|| DEFAULT_BRANCH.to_string());
    let unit_id = non_empty_var(ENV_VIRIN_UNIT_ID).unwrap_or_else(|| DEFAULT_UNIT_ID.to_string());

    VirinConfig { branch, unit_id }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_from_env_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::remove_var(ENV_VIRIN_BRANCH);
        env::remove_var(ENV_VIRIN_UNIT_ID);

        assert_eq!(config_from_env(), VirinConfig::default());
    }

    #[test]
    fn test_config_from_env_with_values() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::set_var(ENV_VIRIN_BRANCH, "N");
        env::set_var(ENV_VIRIN_UNIT_ID, "XY123");

        let config = config_from_env();

        assert_eq!(config.branch, "N");
        assert_eq!(config.unit_id, "XY123");

        env::remove_var(ENV_VIRIN_BRANCH);
        env::remove_var(ENV_VIRIN_UNIT_ID);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::set_var(ENV_VIRIN_BRANCH, "  ");
        env::remove_var(ENV_VIRIN_UNIT_ID);

        assert_eq!(config_from_env().branch, DEFAULT_BRANCH);

        env::remove_var(ENV_VIRIN_BRANCH);
    }
}
