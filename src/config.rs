use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://www.transifex.com/api/2/project/syncthing/resource/gui";
pub const DEFAULT_VALID_LANGS_FILE: &str = "valid-langs.js";
pub const DEFAULT_BASE_LANGUAGE: &str = "en";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Need environment variables TRANSIFEX_USER and TRANSIFEX_PASS")]
    MissingCredentials,
}

/// Basic auth credentials for the Transifex API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,

    // Transifex resource, e.g. .../project/<project>/resource/<resource>
    pub api_url: String,

    // Local files
    pub valid_langs_file: PathBuf,
    pub output_dir: PathBuf,

    pub base_language: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let user = non_empty_var("TRANSIFEX_USER");
        let pass = non_empty_var("TRANSIFEX_PASS");
        let (user, pass) = match (user, pass) {
            (Some(user), Some(pass)) => (user, pass),
            _ => return Err(ConfigError::MissingCredentials),
        };

        Ok(Self {
            credentials: Credentials { user, pass },

            api_url: non_empty_var("TRANSIFEX_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),

            valid_langs_file: non_empty_var("TRANSIFEX_VALID_LANGS_FILE")
                .unwrap_or_else(|| DEFAULT_VALID_LANGS_FILE.to_string())
                .into(),
            output_dir: non_empty_var("TRANSIFEX_OUTPUT_DIR")
                .unwrap_or_else(|| ".".to_string())
                .into(),

            base_language: non_empty_var("TRANSIFEX_BASE_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_BASE_LANGUAGE.to_string()),
        })
    }

    /// Path of the downloaded translation for a language code
    pub fn lang_file(&self, code: &str) -> PathBuf {
        self.output_dir.join(format!("lang-{}.json", code))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
