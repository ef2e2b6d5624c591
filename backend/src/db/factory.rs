//! Repository factory for dependency injection.
//!
//! The server never reaches for a process-wide repository; it asks the factory
//! for an `Arc<dyn FullRepository>` once at startup and hands it to the
//! admission controller and the HTTP state.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::{RepositoryConfig, REPOSITORY_CONFIG_ENV};
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::PostgresConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Accepts "postgres", "pg" or "local", case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, defaults to Postgres if a database
    /// URL is present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

#[cfg(not(feature = "postgres-repo"))]
fn postgres_disabled() -> RepositoryError {
    RepositoryError::configuration("Postgres repository feature not enabled")
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use venue_events::db::{RepositoryFactory, RepositoryType};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let repo = rt
///     .block_on(RepositoryFactory::create(RepositoryType::Local, None))
///     .unwrap();
/// assert!(rt.block_on(repo.health_check()).unwrap());
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `postgres_config` is required for [`RepositoryType::Postgres`].
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = postgres_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires PostgresConfig",
                        )
                    })?;
                    let pg = Self::create_postgres(config).await?;
                    Ok(pg as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    let _ = postgres_config;
                    Err(postgres_disabled())
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a Postgres repository, running migrations.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// If `REPOSITORY_CONFIG` names a TOML file, that file decides. Otherwise
    /// `REPOSITORY_TYPE` and the database URL variables are used.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        if let Ok(path) = std::env::var(REPOSITORY_CONFIG_ENV) {
            return Self::from_config_file(path).await;
        }

        match RepositoryType::from_env() {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config =
                        PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                    let pg = Self::create_postgres(&config).await?;
                    Ok(pg as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(postgres_disabled())
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from a parsed [`RepositoryConfig`].
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type()?;
        let pg_config = config.to_postgres_config()?;
        Self::create(repo_type, pg_config.as_ref()).await
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use venue_events::db::{PostgresConfig, RepositoryBuilder, RepositoryType};
///
/// // Requires the `postgres-repo` feature.
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Postgres)
///     .postgres_config(PostgresConfig::from_env()?)
///     .build()
///     .await?;
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    #[cfg(feature = "postgres-repo")]
    postgres_config: Option<PostgresConfig>,
}

impl RepositoryBuilder {
    /// Create a new builder. The type defaults to [`RepositoryType::from_env`].
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            #[cfg(feature = "postgres-repo")]
            postgres_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the Postgres configuration.
    #[cfg(feature = "postgres-repo")]
    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();

        if self.repo_type == RepositoryType::Postgres {
            #[cfg(feature = "postgres-repo")]
            {
                let config = PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                self.postgres_config = Some(config);
            }
            #[cfg(not(feature = "postgres-repo"))]
            {
                return Err(postgres_disabled());
            }
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.apply_config(&repo_config)
    }

    fn apply_config(mut self, repo_config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        self.repo_type = repo_config.repository_type()?;

        #[cfg(feature = "postgres-repo")]
        {
            self.postgres_config = repo_config.to_postgres_config()?;
        }
        #[cfg(not(feature = "postgres-repo"))]
        {
            repo_config.to_postgres_config()?;
        }

        Ok(self)
    }

    /// Build the repository instance.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        #[cfg(feature = "postgres-repo")]
        let pg_config = self.postgres_config.as_ref();
        #[cfg(not(feature = "postgres-repo"))]
        let pg_config = None;

        RepositoryFactory::create(self.repo_type, pg_config).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
