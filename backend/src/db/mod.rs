//! Storage layer for events and participants.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / admission controller                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - list/get/delete events                               │
//! │  - participant enrollment and removal                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         │                       │
//! ┌───────▼────────┐     ┌────────▼───────┐
//! │     Local      │     │    Postgres    │
//! │  (in-memory)   │     │ (Diesel + r2d2)│
//! └────────────────┘     └────────────────┘
//! ```
//!
//! Repositories are created once through [`RepositoryFactory`] and passed
//! around as `Arc<dyn FullRepository>`. There is no global instance.
//!
//! # Usage
//! ```ignore
//! use venue_events::db::{services, RepositoryFactory};
//!
//! let repo = RepositoryFactory::from_env().await?;
//! let page = services::list_events(repo.as_ref(), Default::default()).await?;
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use services::{
    add_participant, delete_event, get_event, health_check, list_events, list_participants,
    remove_participant,
};

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, EventRepository, FullRepository, ParticipantRepository, RepositoryError,
    RepositoryResult,
};
