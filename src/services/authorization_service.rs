use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Permission, Role};
use crate::utils::errors::{forbidden_error, AppResult};

/// Rejects the call unless the caller's role grants `permission`.
///
/// Controllers call this before touching storage.
pub fn require_permission(
    user: &AuthenticatedUser,
    permission: Permission,
    operation: &str,
) -> AppResult<()> {
    if user.role.can(permission) {
        Ok(())
    } else {
        tracing::warn!(
            "🚫 {} ({}) denied: {}",
            user.email,
            user.role,
            operation
        );
        Err(forbidden_error(
            operation,
            &format!("role {} is not allowed", user.role),
        ))
    }
}

/// Checks whether the caller has one of the listed roles
pub fn has_any_role(user: &AuthenticatedUser, roles: &[Role]) -> bool {
    roles.contains(&user.role)
}
