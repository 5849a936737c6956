/// Access gate evaluated before mutating operations. Two levels only:
/// any authenticated principal, or admin.
use sqlx::PgPool;

use crate::db::member_repo;
use crate::error::{AppError, Result};
use crate::models::{Member, MemberRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    Authenticated,
    Admin,
}

pub fn authorize(caller: MemberRole, required: RequiredRole) -> Result<()> {
    match required {
        RequiredRole::Authenticated => Ok(()),
        RequiredRole::Admin => {
            if caller == MemberRole::Admin {
                Ok(())
            } else {
                Err(AppError::Forbidden("Admin only".to_string()))
            }
        }
    }
}

/// Load the caller's membership record and apply the admin gate. A
/// principal with no record cannot pass: authenticating with the identity
/// provider is not the same as being a registered member.
pub async fn require_admin(pool: &PgPool, identity: &str) -> Result<Member> {
    let member = member_repo::find_by_identity(pool, identity)
        .await?
        .ok_or_else(|| AppError::Forbidden("Admin only".to_string()))?;

    authorize(member.role, RequiredRole::Admin)?;
    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_passes_admin_gate() {
        assert!(authorize(MemberRole::Admin, RequiredRole::Admin).is_ok());
    }

    #[test]
    fn test_member_fails_admin_gate() {
        let err = authorize(MemberRole::Member, RequiredRole::Admin).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_any_role_passes_authenticated_gate() {
        assert!(authorize(MemberRole::Member, RequiredRole::Authenticated).is_ok());
        assert!(authorize(MemberRole::Admin, RequiredRole::Authenticated).is_ok());
    }
}
