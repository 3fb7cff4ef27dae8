//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-row invariants
//! (offer acceptance) run inside a single transaction.

pub mod chat_repo;
pub mod lead_repo;
pub mod notification_repo;
pub mod notification_state_repo;
pub mod offer_repo;
pub mod profile_repo;
pub mod request_repo;
pub mod review_repo;
pub mod service_repo;
pub mod user_repo;

pub use chat_repo::ChatRepo;
pub use lead_repo::LeadRepo;
pub use notification_repo::NotificationRepo;
pub use notification_state_repo::NotificationStateRepo;
pub use offer_repo::OfferRepo;
pub use profile_repo::ProfileRepo;
pub use request_repo::RequestRepo;
pub use review_repo::ReviewRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
