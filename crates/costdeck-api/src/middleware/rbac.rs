//! Role-based route guarding.

use costdeck_core::error::AppError;
use costdeck_entity::user::UserRole;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if auth.user.role != UserRole::Admin {
        return Err(AppError::admin_required("Admin access required"));
    }
    Ok(())
}
