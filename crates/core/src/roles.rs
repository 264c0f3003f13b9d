//! Role constants matching the seeded `roles` table.

use crate::types::DbId;

/// Platform administrator.
pub const ROLE_ADMIN: DbId = 1;

/// Default role assigned at registration.
pub const ROLE_MEMBER: DbId = 2;
