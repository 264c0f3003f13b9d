//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod course_repo;
pub mod favorite_repo;
pub mod lookup_repo;
pub mod payment_repo;
pub mod support_repo;

pub use account_repo::AccountRepo;
pub use course_repo::CourseRepo;
pub use favorite_repo::FavoriteRepo;
pub use lookup_repo::LookupRepo;
pub use payment_repo::PaymentRepo;
pub use support_repo::SupportRepo;
