// ============================================================================
// Configuration
// ============================================================================
// Sources, de la plus faible à la plus forte :
// 1. valeurs par défaut (Default)
// 2. fichier TOML (--config, sinon <config dir>/stockter/config.toml)
// 3. variables d'environnement STOCKTER_API__BASE_URL, STOCKTER_LOGGING__FILTER...
// 4. options de ligne de commande (appliquées par main)
//
// Exemple de fichier :
//   [api]
//   base_url = "http://localhost:8000"
//   timeout_secs = 10
//
//   [logging]
//   filter = "stockter=trace,info"
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serveur utilisé quand rien n'est configuré
pub const DEFAULT_BASE_URL: &str = "https://port-0-stockter-back-m5or7nt39f4a0f5c.sel4.cloudtype.app";

/// Filtre de logs par défaut : debug pour stockter, info pour les dépendances
pub const DEFAULT_LOG_FILTER: &str = "stockter=debug,info";

/// Erreur de chargement de la configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lecture de la configuration impossible : {0}")]
    Load(#[from] config::ConfigError),

    #[error("URL de l'API invalide : {0:?} (http:// ou https:// attendu)")]
    InvalidBaseUrl(String),
}

/// Configuration complète
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Paramètres du client HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// URL de base du serveur Stockter
    pub base_url: String,

    /// Délai maximum d'une requête ; aucun par défaut
    pub timeout_secs: Option<u64>,

    /// User-Agent envoyé avec chaque requête
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: concat!("stockter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    /// URL de base sans "/" final
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Paramètres du logging vers fichier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Répertoire des logs ; sinon <data dir>/stockter/logs
    pub directory: Option<PathBuf>,

    /// Filtre EnvFilter utilisé quand RUST_LOG n'est pas défini
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Répertoire effectif des logs
    ///
    /// - Linux : ~/.local/share/stockter/logs
    /// - macOS : ~/Library/Application Support/stockter/logs
    /// - Windows : C:\Users\<user>\AppData\Local\stockter\logs
    pub fn resolve_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("stockter").join("logs"))
                .unwrap_or_else(|| PathBuf::from("./logs"))
        })
    }
}

impl Config {
    /// Charge la configuration
    ///
    /// Un fichier passé explicitement doit exister ; le fichier par défaut
    /// est optionnel.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => match default_config_path() {
                Some(default) => builder.add_source(config::File::from(default).required(false)),
                None => builder,
            },
        };

        let loaded: Config = builder
            .add_source(
                config::Environment::with_prefix("STOCKTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()
    }

    /// Remplace l'URL de l'API (option --api-url)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api.base_url = base_url.into();
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api.base_url));
        }
        Ok(self)
    }
}

/// <config dir>/stockter/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stockter").join("config.toml"))
}

// ============================================================================
// Tests unitaires
// ============================================================================
