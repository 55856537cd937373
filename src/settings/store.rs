use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Settings;
use crate::config::{app_config_dir, config_env_dirs, load_json_or_default, ConfigPathError};
use crate::error::ViewerResult;

pub const DEFAULT_PROFILE: &str = "Default";

const PROFILES_FILE: &str = "profiles.json";
const CURRENT_PROFILE_FILE: &str = "current_profile.json";

pub type Profiles = BTreeMap<String, Settings>;

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("profile name is empty")]
    EmptyProfileName,
    #[error("unknown profile: {name}")]
    UnknownProfile { name: String },
    #[error("profile {name} cannot be removed or renamed")]
    ProtectedProfile { name: String },
    #[error("failed to write settings file: {path}")]
    WriteProfiles {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize settings")]
    Serialize(#[from] serde_json::Error),
}

/// Backing store for the profile map and the current profile name.
///
/// Loads return `None` when nothing has been persisted yet.
pub trait ProfileStorage {
    fn load_profiles(&self) -> Option<Profiles>;
    fn load_current_profile(&self) -> Option<String>;
    fn save_profiles(&mut self, profiles: &Profiles) -> SettingsResult<()>;
    fn save_current_profile(&mut self, name: &str) -> SettingsResult<()>;
}

/// JSON files under the user's config directory.
#[derive(Debug, Clone)]
pub struct FileProfileStorage {
    dir: PathBuf,
}

impl FileProfileStorage {
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn with_default_paths() -> SettingsResult<Self> {
        let (xdg_config_home, home) = config_env_dirs();
        Self::with_config_dirs(xdg_config_home.as_deref(), home.as_deref())
    }

    pub fn with_config_dirs(
        xdg_config_home: Option<&Path>,
        home: Option<&Path>,
    ) -> SettingsResult<Self> {
        let dir = app_config_dir(xdg_config_home, home).map_err(|error| match error {
            ConfigPathError::MissingHomeDirectory => SettingsError::MissingHomeDirectory,
        })?;
        Ok(Self::with_dir(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_json<T: serde::Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> SettingsResult<()> {
        let path = self.dir.join(file_name);
        fs::create_dir_all(&self.dir).map_err(|source| SettingsError::WriteProfiles {
            path: path.clone(),
            source,
        })?;
        let serialized = serde_json::to_string_pretty(value)?;
        fs::write(&path, serialized).map_err(|source| SettingsError::WriteProfiles {
            path: path.clone(),
            source,
        })
    }
}

impl ProfileStorage for FileProfileStorage {
    fn load_profiles(&self) -> Option<Profiles> {
        load_json_or_default(&self.dir.join(PROFILES_FILE))
    }

    fn load_current_profile(&self) -> Option<String> {
        load_json_or_default(&self.dir.join(CURRENT_PROFILE_FILE))
    }

    fn save_profiles(&mut self, profiles: &Profiles) -> SettingsResult<()> {
        self.write_json(PROFILES_FILE, profiles)
    }

    fn save_current_profile(&mut self, name: &str) -> SettingsResult<()> {
        self.write_json(CURRENT_PROFILE_FILE, name)
    }
}

/// In-process storage with nothing written to disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStorage {
    profiles: Option<Profiles>,
    current_profile: Option<String>,
}

impl ProfileStorage for MemoryProfileStorage {
    fn load_profiles(&self) -> Option<Profiles> {
        self.profiles.clone()
    }

    fn load_current_profile(&self) -> Option<String> {
        self.current_profile.clone()
    }

    fn save_profiles(&mut self, profiles: &Profiles) -> SettingsResult<()> {
        self.profiles = Some(profiles.clone());
        Ok(())
    }

    fn save_current_profile(&mut self, name: &str) -> SettingsResult<()> {
        self.current_profile = Some(name.to_string());
        Ok(())
    }
}

/// Store backed by the user's config directory.
pub fn open_user_profiles() -> ViewerResult<SettingsStore<FileProfileStorage>> {
    let (xdg_config_home, home) = config_env_dirs();
    open_profiles_in(xdg_config_home.as_deref(), home.as_deref())
}

pub fn open_profiles_in(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ViewerResult<SettingsStore<FileProfileStorage>> {
    let storage = FileProfileStorage::with_config_dirs(xdg_config_home, home)?;
    Ok(SettingsStore::open(storage))
}

/// Named settings profiles with one active profile. Every mutation is written
/// through to the backing storage.
#[derive(Debug)]
pub struct SettingsStore<S: ProfileStorage> {
    storage: S,
    profiles: Profiles,
    current: String,
}

impl<S: ProfileStorage> SettingsStore<S> {
    pub fn open(storage: S) -> Self {
        let mut profiles = storage.load_profiles().unwrap_or_default();
        profiles
            .entry(DEFAULT_PROFILE.to_string())
            .or_insert_with(Settings::default);
        let current = storage
            .load_current_profile()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        tracing::debug!(profiles = profiles.len(), current = %current, "opened settings store");

        Self {
            storage,
            profiles,
            current,
        }
    }

    /// Settings of the current profile; defaults if that profile is missing.
    pub fn settings(&self) -> Settings {
        self.profiles
            .get(&self.current)
            .cloned()
            .unwrap_or_default()
    }

    pub fn current_profile(&self) -> &str {
        &self.current
    }

    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn update_settings<F: FnOnce(&mut Settings)>(&mut self, update: F) -> SettingsResult<()> {
        let settings = self.profiles.entry(self.current.clone()).or_default();
        update(settings);
        self.persist_profiles()
    }

    pub fn reset_settings(&mut self) -> SettingsResult<()> {
        tracing::info!(profile = %self.current, "reset settings to defaults");
        self.profiles.insert(self.current.clone(), Settings::default());
        self.persist_profiles()
    }

    /// Inserts a profile with default settings, replacing any profile of the same name.
    pub fn create_profile(&mut self, name: &str) -> SettingsResult<()> {
        validate_profile_name(name)?;
        tracing::info!(profile = name, "create profile");
        self.profiles.insert(name.to_string(), Settings::default());
        self.persist_profiles()
    }

    pub fn delete_profile(&mut self, name: &str) -> SettingsResult<()> {
        if name == DEFAULT_PROFILE {
            return Err(SettingsError::ProtectedProfile {
                name: name.to_string(),
            });
        }
        if self.current == name {
            self.set_current(DEFAULT_PROFILE)?;
        }
        tracing::info!(profile = name, "delete profile");
        self.profiles.remove(name);
        self.persist_profiles()
    }

    pub fn rename_profile(&mut self, old_name: &str, new_name: &str) -> SettingsResult<()> {
        if old_name == DEFAULT_PROFILE {
            return Err(SettingsError::ProtectedProfile {
                name: old_name.to_string(),
            });
        }
        validate_profile_name(new_name)?;
        if !self.profiles.contains_key(old_name) {
            return Err(unknown_profile(old_name));
        }
        if self.current == old_name {
            self.set_current(DEFAULT_PROFILE)?;
        }
        tracing::info!(from = old_name, to = new_name, "rename profile");
        if let Some(settings) = self.profiles.remove(old_name) {
            self.profiles.insert(new_name.to_string(), settings);
        }
        self.persist_profiles()
    }

    pub fn copy_profile(&mut self, source: &str, new_name: &str) -> SettingsResult<()> {
        validate_profile_name(new_name)?;
        let settings = self
            .profiles
            .get(source)
            .cloned()
            .ok_or_else(|| unknown_profile(source))?;
        tracing::info!(from = source, to = new_name, "copy profile");
        self.profiles.insert(new_name.to_string(), settings);
        self.persist_profiles()
    }

    pub fn change_profile(&mut self, name: &str) -> SettingsResult<()> {
        if !self.profiles.contains_key(name) {
            return Err(unknown_profile(name));
        }
        tracing::info!(profile = name, "change profile");
        self.set_current(name)
    }

    fn set_current(&mut self, name: &str) -> SettingsResult<()> {
        self.current = name.to_string();
        self.storage.save_current_profile(&self.current)
    }

    fn persist_profiles(&mut self) -> SettingsResult<()> {
        self.storage.save_profiles(&self.profiles)
    }
}

fn validate_profile_name(name: &str) -> SettingsResult<()> {
    if name.trim().is_empty() {
        return Err(SettingsError::EmptyProfileName);
    }
    Ok(())
}

fn unknown_profile(name: &str) -> SettingsError {
    SettingsError::UnknownProfile {
        name: name.to_string(),
    }
}
