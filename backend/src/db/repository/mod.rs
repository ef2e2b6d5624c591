//! Repository trait definitions for database operations.
//!
//! Storage is split into two focused traits:
//!
//! - [`event`]: event CRUD plus the `(location, date)` lookup used by admission
//! - [`participant`]: participant enrollment and removal
//!
//! # Convenience Trait Bound
//!
//! Services and HTTP state hold an `Arc<dyn FullRepository>`:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let event = repo.get_event(EventId::new(1)).await?;
//!     repo.participants_for_event(event.id).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event;
pub mod participant;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use event::EventRepository;
pub use participant::ParticipantRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: EventRepository + ParticipantRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: EventRepository + ParticipantRepository {}
