use std::fs;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption, Properties, WriteOption};

use crate::domain::branch::BranchPattern;
use crate::error::{AppError, AppResult};

const CONFIG_DIR: &str = ".config/tkt";
const CONFIG_FILE_NAME: &str = "tkt.conf";
const SECTION: &str = "main";

pub const KEY_PARENT_DIR: &str = "local_repository_parent_dir";
pub const KEY_BRANCH_REGEX: &str = "branch_name_regex";
pub const KEY_TICKET_FILE: &str = "ticket_file_path";
pub const KEY_TICKET_URL: &str = "ticket_url";
pub const KEY_REMOTE_URL: &str = "remote_repository_url";
pub const KEY_MAIN_BRANCH: &str = "main_branch_name";

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR))
        .ok_or_else(|| AppError::Configuration("unable to locate home directory".to_string()))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// Settings as written in the `[main]` section of the config file, or as
/// supplied on the command line. Empty values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredConfig {
    pub local_repository_parent_dir: Option<String>,
    pub branch_name_regex: Option<String>,
    pub ticket_file_path: Option<String>,
    pub ticket_url: Option<String>,
    pub remote_repository_url: Option<String>,
    pub main_branch_name: Option<String>,
}

impl StoredConfig {
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::Configuration(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::from_ini(&read_ini(path)?, path)
    }

    /// Like [`StoredConfig::load_from`], but a missing file or a missing
    /// `[main]` section yields an empty configuration. Used by the
    /// interactive editor so it can always repair the file.
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = read_ini(path)?;
        if ini.section(Some(SECTION)).is_none() {
            return Ok(Self::default());
        }
        Self::from_ini(&ini, path)
    }

    pub fn parse(contents: &str, origin: &Path) -> AppResult<Self> {
        let ini = Ini::load_from_str_opt(contents, parse_option()).map_err(|err| {
            AppError::Configuration(format!("config file {}: {err}", origin.display()))
        })?;
        Self::from_ini(&ini, origin)
    }

    fn from_ini(ini: &Ini, origin: &Path) -> AppResult<Self> {
        let section = ini.section(Some(SECTION)).ok_or_else(|| {
            AppError::Configuration(format!(
                "config file {} is missing section [{SECTION}]",
                origin.display()
            ))
        })?;

        Ok(Self {
            local_repository_parent_dir: read_value(section, KEY_PARENT_DIR),
            branch_name_regex: read_value(section, KEY_BRANCH_REGEX),
            ticket_file_path: read_value(section, KEY_TICKET_FILE),
            ticket_url: read_value(section, KEY_TICKET_URL),
            remote_repository_url: read_value(section, KEY_REMOTE_URL),
            main_branch_name: read_value(section, KEY_MAIN_BRANCH),
        })
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        // The header is written even with no values so the file stays loadable.
        ini.with_section(Some(SECTION));
        for (key, value) in self.entries() {
            if let Some(value) = value {
                ini.with_section(Some(SECTION)).set(key, value);
            }
        }
        let options = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            ..WriteOption::default()
        };
        ini.write_to_file_opt(path, options)?;
        Ok(())
    }

    pub fn entries(&self) -> [(&'static str, Option<&str>); 6] {
        [
            (KEY_PARENT_DIR, self.local_repository_parent_dir.as_deref()),
            (KEY_BRANCH_REGEX, self.branch_name_regex.as_deref()),
            (KEY_TICKET_FILE, self.ticket_file_path.as_deref()),
            (KEY_TICKET_URL, self.ticket_url.as_deref()),
            (KEY_REMOTE_URL, self.remote_repository_url.as_deref()),
            (KEY_MAIN_BRANCH, self.main_branch_name.as_deref()),
        ]
    }

    /// Fields set in `overrides` replace the ones read from the file.
    pub fn merge(self, overrides: StoredConfig) -> Self {
        Self {
            local_repository_parent_dir: non_empty(overrides.local_repository_parent_dir)
                .or(self.local_repository_parent_dir),
            branch_name_regex: non_empty(overrides.branch_name_regex).or(self.branch_name_regex),
            ticket_file_path: non_empty(overrides.ticket_file_path).or(self.ticket_file_path),
            ticket_url: non_empty(overrides.ticket_url).or(self.ticket_url),
            remote_repository_url: non_empty(overrides.remote_repository_url)
                .or(self.remote_repository_url),
            main_branch_name: non_empty(overrides.main_branch_name).or(self.main_branch_name),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct TicketConfig {
    pub local_repository_parent_dir: PathBuf,
    pub branch_pattern: BranchPattern,
    pub ticket_file_path: PathBuf,
    pub ticket_url: String,
    pub remote_repository_url: String,
    pub main_branch_name: Option<String>,
}

impl TicketConfig {
    pub fn resolve(stored: StoredConfig, origin: &Path, home: Option<&Path>) -> AppResult<Self> {
        let missing = |key: &str| {
            AppError::Configuration(format!(
                "config file: {} is missing entry: {key}",
                origin.display()
            ))
        };

        let parent_dir = stored
            .local_repository_parent_dir
            .ok_or_else(|| missing(KEY_PARENT_DIR))?;
        let regex = stored
            .branch_name_regex
            .ok_or_else(|| missing(KEY_BRANCH_REGEX))?;
        let ticket_file = stored
            .ticket_file_path
            .ok_or_else(|| missing(KEY_TICKET_FILE))?;
        let ticket_url = stored.ticket_url.ok_or_else(|| {
            AppError::Configuration("ticket_url was not configured".to_string())
        })?;
        let remote_repository_url = stored.remote_repository_url.ok_or_else(|| {
            AppError::Configuration("remote_repository_url was not configured".to_string())
        })?;

        let config = Self {
            local_repository_parent_dir: expand_home(&parent_dir, home),
            branch_pattern: BranchPattern::new(&regex)?,
            ticket_file_path: expand_home(&ticket_file, home),
            ticket_url,
            remote_repository_url,
            main_branch_name: stored.main_branch_name,
        };
        config.validate()
    }

    fn validate(self) -> AppResult<Self> {
        if !self.local_repository_parent_dir.is_dir() {
            return Err(AppError::Configuration(format!(
                "directory not found: {}",
                self.local_repository_parent_dir.display()
            )));
        }
        if !self.ticket_file_path.is_file() {
            return Err(AppError::Configuration(format!(
                "file not found: {}",
                self.ticket_file_path.display()
            )));
        }
        Ok(self)
    }
}

/// Replaces a leading `~` with `home`. Paths like `~user/x` are left alone.
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    }
}

fn read_ini(path: &Path) -> AppResult<Ini> {
    Ini::load_from_file_opt(path, parse_option())
        .map_err(|err| AppError::Configuration(format!("config file {}: {err}", path.display())))
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn read_value(section: &Properties, key: &str) -> Option<String> {
    non_empty(section.get(key).map(|value| value.trim().to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
