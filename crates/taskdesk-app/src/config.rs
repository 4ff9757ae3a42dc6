//! Application configuration: latency simulation and seed dataset locations.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use taskdesk_store::{
    ContactDirectory, LatencyPolicy, NoLatency, SimulatedLatency, TaskStore, seed,
};

const CONFIG_DIR: &str = "taskdesk";
const CONFIG_FILE: &str = "config.toml";
/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "TASKDESK_CONFIG";

/// Top-level application configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Simulated store latency.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Seed dataset locations.
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from `explicit`, `TASKDESK_CONFIG` or the user config directory.
    ///
    /// A missing file at the resolved location yields the defaults, unless the
    /// path was given explicitly.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let Some(path) = resolve_path(explicit, env.as_deref(), dirs::config_dir().as_deref())
        else {
            return Ok(Self::default());
        };
        if explicit.is_none() && !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load configuration from a known file. Relative seed paths are resolved
    /// against the file's directory.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.seed.anchor_to(base);
        }
        Ok(config)
    }

    /// Latency policy described by the `[latency]` block.
    #[must_use]
    pub fn latency_policy(&self) -> Arc<dyn LatencyPolicy> {
        self.latency.policy()
    }

    /// Build the task store and contact directory described by this configuration.
    ///
    /// # Errors
    /// Returns an error when a seed dataset cannot be read or decoded.
    pub fn open_stores(&self) -> Result<(TaskStore, ContactDirectory)> {
        let latency = self.latency_policy();
        let tasks = match &self.seed.tasks {
            Some(path) => seed::load_tasks(path)
                .with_context(|| format!("failed to load task seed {}", path.display()))?,
            None => seed::bundled_tasks().context("failed to load bundled task seed")?,
        };
        let contacts = match &self.seed.contacts {
            Some(path) => seed::load_contacts(path)
                .with_context(|| format!("failed to load contact seed {}", path.display()))?,
            None => seed::bundled_contacts().context("failed to load bundled contact seed")?,
        };
        Ok((
            TaskStore::new(tasks, Arc::clone(&latency)),
            ContactDirectory::new(contacts, latency),
        ))
    }
}

/// Pick the configuration file: explicit path, then environment, then user config directory.
#[must_use]
pub fn resolve_path(
    explicit: Option<&Path>,
    env: Option<&Path>,
    config_dir: Option<&Path>,
) -> Option<PathBuf> {
    explicit
        .or(env)
        .map(Path::to_path_buf)
        .or_else(|| config_dir.map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE)))
}

/// `[latency]` block. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatencyConfig {
    /// When false every operation completes without delay.
    pub simulate: bool,
    /// Listing every task.
    pub get_all_ms: u64,
    /// Single-task lookup.
    pub get_by_id_ms: u64,
    /// Task creation.
    pub create_ms: u64,
    /// Task update.
    pub update_ms: u64,
    /// Task deletion.
    pub delete_ms: u64,
    /// Listing tasks of one contact.
    pub get_by_contact_id_ms: u64,
    /// Listing contacts.
    pub contacts_get_all_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        let defaults = SimulatedLatency::default();
        Self {
            simulate: true,
            get_all_ms: millis(defaults.get_all),
            get_by_id_ms: millis(defaults.get_by_id),
            create_ms: millis(defaults.create),
            update_ms: millis(defaults.update),
            delete_ms: millis(defaults.delete),
            get_by_contact_id_ms: millis(defaults.get_by_contact_id),
            contacts_get_all_ms: millis(defaults.contacts_get_all),
        }
    }
}

impl LatencyConfig {
    fn policy(&self) -> Arc<dyn LatencyPolicy> {
        if !self.simulate {
            return Arc::new(NoLatency);
        }
        Arc::new(SimulatedLatency {
            get_all: Duration::from_millis(self.get_all_ms),
            get_by_id: Duration::from_millis(self.get_by_id_ms),
            create: Duration::from_millis(self.create_ms),
            update: Duration::from_millis(self.update_ms),
            delete: Duration::from_millis(self.delete_ms),
            get_by_contact_id: Duration::from_millis(self.get_by_contact_id_ms),
            contacts_get_all: Duration::from_millis(self.contacts_get_all_ms),
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// `[seed]` block; absent entries fall back to the bundled datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Task seed JSON file.
    #[serde(default)]
    pub tasks: Option<PathBuf>,
    /// Contact seed JSON file.
    #[serde(default)]
    pub contacts: Option<PathBuf>,
}

impl SeedConfig {
    fn anchor_to(&mut self, base: &Path) {
        for path in [&mut self.tasks, &mut self.contacts].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use taskdesk_store::StoreOp;
    use tempfile::tempdir;

    fn ok<T>(result: Result<T>, context: &str) -> T {
        result.unwrap_or_else(|err| panic!("{context}: {err:#}"))
    }

    #[test]
    fn resolve_prefers_explicit_then_env_then_config_dir() {
        let explicit = Path::new("/tmp/explicit.toml");
        let env = Path::new("/tmp/env.toml");
        let dir = Path::new("/home/u/.config");

        assert_eq!(
            resolve_path(Some(explicit), Some(env), Some(dir)),
            Some(explicit.to_path_buf())
        );
        assert_eq!(resolve_path(None, Some(env), Some(dir)), Some(env.to_path_buf()));
        assert_eq!(
            resolve_path(None, None, Some(dir)),
            Some(dir.join("taskdesk").join("config.toml"))
        );
        assert_eq!(resolve_path(None, None, None), None);
    }

    #[test]
    fn defaults_mirror_simulated_latency() {
        let policy = AppConfig::default().latency_policy();
        assert_eq!(policy.delay(StoreOp::Create), Duration::from_millis(500));
        assert_eq!(policy.delay(StoreOp::GetById), Duration::from_millis(300));
        assert_eq!(policy.delay(StoreOp::ContactsGetAll), Duration::from_millis(300));
    }

    #[test]
    fn parses_latency_overrides_and_anchors_seed_paths() {
        let dir = ok(tempdir().map_err(Into::into), "tempdir");
        let path = dir.path().join("config.toml");
        ok(
            fs::write(
                &path,
                "[latency]\nsimulate = true\ncreate_ms = 10\n\n[seed]\ntasks = \"tasks.json\"\n",
            )
            .map_err(Into::into),
            "write config",
        );

        let config = ok(AppConfig::from_file(&path), "load config");
        assert_eq!(config.latency.create_ms, 10);
        assert_eq!(config.latency.get_all_ms, 400);
        assert_eq!(config.seed.tasks, Some(dir.path().join("tasks.json")));
        assert_eq!(config.seed.contacts, None);
        assert_eq!(
            config.latency_policy().delay(StoreOp::Create),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn simulate_false_disables_latency() {
        let config: AppConfig = ok(
            toml::from_str("[latency]\nsimulate = false\n").map_err(Into::into),
            "parse",
        );
        assert_eq!(config.latency_policy().delay(StoreOp::GetAll), Duration::ZERO);
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = ok(tempdir().map_err(Into::into), "tempdir");
        let path = dir.path().join("config.toml");
        ok(fs::write(&path, "[latency]\nfast = true\n").map_err(Into::into), "write");

        let err = AppConfig::from_file(&path).expect_err("unknown key must fail");
        assert!(format!("{err:#}").contains("failed to parse"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = ok(tempdir().map_err(Into::into), "tempdir");
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[tokio::test]
    async fn open_stores_uses_seed_files() {
        let dir = ok(tempdir().map_err(Into::into), "tempdir");
        ok(
            fs::write(
                dir.path().join("tasks.json"),
                r#"[{"Id":7,"title":"Seeded","createdAt":"2025-01-01T00:00:00Z","updatedAt":"2025-01-01T00:00:00Z"}]"#,
            )
            .map_err(Into::into),
            "write tasks",
        );
        let path = dir.path().join("config.toml");
        ok(
            fs::write(&path, "[latency]\nsimulate = false\n\n[seed]\ntasks = \"tasks.json\"\n")
                .map_err(Into::into),
            "write config",
        );

        let config = ok(AppConfig::from_file(&path), "load config");
        let (store, contacts) = ok(config.open_stores(), "open stores");
        let tasks = ok(store.get_all().await.map_err(Into::into), "get_all");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Seeded");
        assert!(!ok(contacts.get_all().await.map_err(Into::into), "contacts").is_empty());
    }
}
