use std::path::{Path, PathBuf};

use crate::adapters::key_sources::dir_key_source::DirKeySource;
use crate::adapters::key_sources::github_key_source::GithubKeySource;
use crate::adapters::providers::file_provider::FileProvider;
use crate::adapters::publishers::file_publisher::FilePublisher;
use crate::config::app_config::AppConfig;
use crate::core::errors::{KeywardenError, Result};
use crate::core::services::sync_service::SyncService;
use crate::core::traits::key_source::KeySource;

/// The fully wired service every command drives.
pub type WiredService = SyncService<Box<dyn KeySource>, FileProvider, FileProvider, FilePublisher>;

/// Load the config file given on the command line.
pub fn load_config(path: &str) -> Result<AppConfig> {
    AppConfig::load(Path::new(path))
}

/// Pick the key source the config asks for.
pub fn build_source(config: &AppConfig) -> Result<Box<dyn KeySource>> {
    if let Some(ref dir) = config.source.dir {
        return Ok(Box::new(DirKeySource::new(
            PathBuf::from(dir),
            &config.provider.managed_suffix,
        )));
    }

    let Some(url) = config.source.contents_url.as_deref() else {
        return Err(KeywardenError::InvalidConfig {
            detail: "[source] needs either contents_url (GitHub) or dir (local)".into(),
        });
    };

    let token = std::env::var(&config.source.token_env).map_err(|_| {
        KeywardenError::SourceUnavailable {
            reason: format!("env var {} is not set", config.source.token_env),
        }
    })?;

    Ok(Box::new(GithubKeySource::new(
        url,
        &token,
        &config.provider.managed_suffix,
    )))
}

/// Wire source, registry, and publisher into a sync service.
pub fn build_service(config: &AppConfig) -> Result<WiredService> {
    let registry = FileProvider::new(PathBuf::from(&config.provider.registry_file));
    Ok(SyncService {
        source: build_source(config)?,
        inventory: registry.clone(),
        applier: registry,
        publisher: FilePublisher,
        managed_suffix: config.provider.managed_suffix.clone(),
    })
}
