//! Entity models and DTOs, one module per table.

pub mod account;
pub mod course;
pub mod favorite;
pub mod lookup;
pub mod page;
pub mod payment;
pub mod support_ticket;
