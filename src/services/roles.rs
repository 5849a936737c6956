/// Identity resolver: maps a verified email to the role it should receive
/// at registration. The allow-list is injected at construction so tests
/// and deployments choose their own set.
use std::collections::HashSet;

use crate::models::MemberRole;

#[derive(Debug, Clone)]
pub struct RoleResolver {
    admin_emails: HashSet<String>,
}

impl RoleResolver {
    pub fn new<I, S>(admin_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            admin_emails: admin_emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive allow-list lookup
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.contains(&email.to_lowercase())
    }

    /// Role for a verified email: admin if allow-listed, member otherwise.
    /// Any role the caller asked for is irrelevant here.
    pub fn role_for_email(&self, email: &str) -> MemberRole {
        if self.is_admin_email(email) {
            MemberRole::Admin
        } else {
            MemberRole::Member
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_listed_email_is_admin() {
        let resolver = RoleResolver::new(["president@wayne.edu"]);
        assert_eq!(
            resolver.role_for_email("president@wayne.edu"),
            MemberRole::Admin
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let resolver = RoleResolver::new(["President@Wayne.edu"]);
        assert!(resolver.is_admin_email("president@wayne.edu"));
        assert!(resolver.is_admin_email("PRESIDENT@WAYNE.EDU"));
    }

    #[test]
    fn test_unlisted_email_is_member() {
        let resolver = RoleResolver::new(["president@wayne.edu"]);
        assert_eq!(
            resolver.role_for_email("freshman@wayne.edu"),
            MemberRole::Member
        );
    }

    #[test]
    fn test_empty_allow_list() {
        let resolver = RoleResolver::new(Vec::<String>::new());
        assert_eq!(
            resolver.role_for_email("anyone@wayne.edu"),
            MemberRole::Member
        );
    }
}
