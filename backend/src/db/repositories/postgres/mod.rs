//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Schema
//!
//! `events` is indexed on `(location, date)` so the admission lookup is an
//! index scan. `participants.email` is unique across the table, and
//! `participants.event_id` references `events` with `ON DELETE CASCADE`.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;
use std::time::Duration;
use tokio::task;

use crate::api::{Event, EventId, EventPage, PageRequest, Participant, ParticipantId};
use crate::db::repository::{
    ErrorContext, EventRepository, ParticipantRepository, RepositoryError, RepositoryResult,
};
use crate::models::EventDraft;

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables (see module docs).
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
                RepositoryError::internal_with_context(
                    format!("Migration failed: {}", e),
                    ErrorContext::new("run_migrations"),
                )
            })?;
        }

        Ok(Self {
            pool,
            config,
        })
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Diesel is blocking, so the closure runs on the blocking thread pool.
    /// Retries use exponential backoff starting at `retry_delay_ms`.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

/// Attach operation/entity context to a Diesel error, turning Diesel's
/// `NotFound` into an entity-level not-found.
fn map_diesel_error(
    err: diesel::result::Error,
    operation: &str,
    entity: &str,
    id: i64,
) -> RepositoryError {
    match err {
        diesel::result::Error::NotFound => RepositoryError::entity_not_found(operation, entity, id),
        other => RepositoryError::from(other).with_operation(operation),
    }
}

#[async_trait]
impl EventRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn insert_event(&self, draft: &EventDraft) -> RepositoryResult<Event> {
        let values = EventValues::from(draft);
        self.with_conn(move |conn| {
            let row: EventRow = diesel::insert_into(events::table)
                .values(&values)
                .returning(EventRow::as_returning())
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert_event"))?;
            Ok(row.into())
        })
        .await
    }

    async fn get_event(&self, event_id: EventId) -> RepositoryResult<Event> {
        self.with_conn(move |conn| {
            let row = events::table
                .find(event_id.value())
                .select(EventRow::as_select())
                .first::<EventRow>(conn)
                .map_err(|e| map_diesel_error(e, "get_event", "Event", event_id.value()))?;
            Ok(row.into())
        })
        .await
    }

    async fn update_event(&self, event_id: EventId, draft: &EventDraft) -> RepositoryResult<Event> {
        let values = EventValues::from(draft);
        let now = Utc::now();
        self.with_conn(move |conn| {
            let row: EventRow = diesel::update(events::table.find(event_id.value()))
                .set((&values, events::updated_at.eq(now)))
                .returning(EventRow::as_returning())
                .get_result(conn)
                .map_err(|e| map_diesel_error(e, "update_event", "Event", event_id.value()))?;
            Ok(row.into())
        })
        .await
    }

    async fn delete_event(&self, event_id: EventId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(events::table.find(event_id.value()))
                .execute(conn)
                .map_err(|e| map_diesel_error(e, "delete_event", "Event", event_id.value()))?;
            if deleted == 0 {
                return Err(RepositoryError::entity_not_found(
                    "delete_event",
                    "Event",
                    event_id,
                ));
            }
            Ok(())
        })
        .await
    }

    async fn list_events(&self, page: PageRequest) -> RepositoryResult<EventPage> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let count: i64 = events::table.count().get_result(tx)?;
                let rows = events::table
                    .select(EventRow::as_select())
                    .order(events::id.asc())
                    .limit(i64::from(page.limit))
                    .offset(i64::from(page.offset))
                    .load::<EventRow>(tx)?;

                Ok(EventPage {
                    count: count as u64,
                    rows: rows.into_iter().map(Event::from).collect(),
                })
            })
        })
        .await
    }

    async fn events_at(&self, location: &str, date: NaiveDate) -> RepositoryResult<Vec<Event>> {
        let location = location.to_string();
        debug!("events_at: location='{}' date={}", location, date);
        self.with_conn(move |conn| {
            let rows = events::table
                .filter(events::location.eq(&location))
                .filter(events::date.eq(date))
                .select(EventRow::as_select())
                .order(events::start_time.asc())
                .load::<EventRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("events_at"))?;
            Ok(rows.into_iter().map(Event::from).collect())
        })
        .await
    }
}

#[async_trait]
impl ParticipantRepository for PostgresRepository {
    async fn insert_participant(
        &self,
        event_id: EventId,
        email: &str,
    ) -> RepositoryResult<Participant> {
        let new_row = NewParticipantRow {
            email: email.to_string(),
            event_id: event_id.value(),
        };
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                events::table
                    .find(new_row.event_id)
                    .select(events::id)
                    .first::<i64>(tx)
                    .map_err(|e| {
                        map_diesel_error(e, "insert_participant", "Event", new_row.event_id)
                    })?;

                let row: ParticipantRow = diesel::insert_into(participants::table)
                    .values(&new_row)
                    .returning(ParticipantRow::as_returning())
                    .get_result(tx)
                    .map_err(|e| RepositoryError::from(e).with_operation("insert_participant"))?;
                Ok(row.into())
            })
        })
        .await
    }

    async fn get_participant(
        &self,
        participant_id: ParticipantId,
    ) -> RepositoryResult<Participant> {
        self.with_conn(move |conn| {
            let row = participants::table
                .find(participant_id.value())
                .select(ParticipantRow::as_select())
                .first::<ParticipantRow>(conn)
                .map_err(|e| {
                    map_diesel_error(e, "get_participant", "Participant", participant_id.value())
                })?;
            Ok(row.into())
        })
        .await
    }

    async fn find_participant_by_email(
        &self,
        email: &str,
    ) -> RepositoryResult<Option<Participant>> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let row = participants::table
                .filter(participants::email.eq(&email))
                .select(ParticipantRow::as_select())
                .first::<ParticipantRow>(conn)
                .optional()
                .map_err(|e| RepositoryError::from(e).with_operation("find_participant_by_email"))?;
            Ok(row.map(Participant::from))
        })
        .await
    }

    async fn delete_participant(&self, participant_id: ParticipantId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(participants::table.find(participant_id.value()))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("delete_participant"))?;
            if deleted == 0 {
                return Err(RepositoryError::entity_not_found(
                    "delete_participant",
                    "Participant",
                    participant_id,
                ));
            }
            Ok(())
        })
        .await
    }

    async fn participants_for_event(
        &self,
        event_id: EventId,
    ) -> RepositoryResult<Vec<Participant>> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                events::table
                    .find(event_id.value())
                    .select(events::id)
                    .first::<i64>(tx)
                    .map_err(|e| {
                        map_diesel_error(e, "participants_for_event", "Event", event_id.value())
                    })?;

                let rows = participants::table
                    .filter(participants::event_id.eq(event_id.value()))
                    .select(ParticipantRow::as_select())
                    .order(participants::id.asc())
                    .load::<ParticipantRow>(tx)?;
                Ok(rows.into_iter().map(Participant::from).collect())
            })
        })
        .await
    }
}
