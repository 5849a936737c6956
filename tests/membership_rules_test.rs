/// Rule-set tests for registration, role assignment and payment
/// bookkeeping, run against an in-memory store double wired to the real
/// resolver, validators and access gate.
use std::collections::HashMap;
use std::str::FromStr;

use membership_service::models::{MemberRole, PaymentStatus};
use membership_service::security::access::{authorize, RequiredRole};
use membership_service::services::RoleResolver;
use membership_service::validators;

#[derive(Debug, Clone, PartialEq)]
enum StoreError {
    AlreadyRegistered,
    InvalidEmailDomain,
    NotFound,
    Forbidden,
}

#[derive(Debug, Clone)]
struct StoredMember {
    identity: String,
    email: String,
    role: MemberRole,
    payment_status: PaymentStatus,
}

/// In-memory membership store keyed by identity
struct MockMemberStore {
    domain: String,
    resolver: RoleResolver,
    members: HashMap<String, StoredMember>,
}

impl MockMemberStore {
    fn new(domain: &str, admin_emails: &[&str]) -> Self {
        Self {
            domain: domain.to_string(),
            resolver: RoleResolver::new(admin_emails.iter().copied()),
            members: HashMap::new(),
        }
    }

    /// `requested_role` mirrors a role value sent by the client; it is
    /// accepted and ignored, the resolver always decides.
    fn register(
        &mut self,
        identity: &str,
        email: &str,
        requested_role: Option<MemberRole>,
    ) -> Result<StoredMember, StoreError> {
        let _ = requested_role;

        if !validators::is_org_email(email, &self.domain) {
            return Err(StoreError::InvalidEmailDomain);
        }
        if self.members.contains_key(identity) {
            return Err(StoreError::AlreadyRegistered);
        }

        let member = StoredMember {
            identity: identity.to_string(),
            email: email.to_string(),
            role: self.resolver.role_for_email(email),
            payment_status: PaymentStatus::NotPaid,
        };
        self.members.insert(identity.to_string(), member.clone());
        Ok(member)
    }

    fn role_of(&self, identity: &str) -> Option<MemberRole> {
        self.members.get(identity).map(|m| m.role)
    }

    /// Admin-gated payment update, same shape as the service path:
    /// gate first, then mutate.
    fn set_payment_status(
        &mut self,
        caller_identity: &str,
        target_identity: &str,
        status: PaymentStatus,
    ) -> Result<(), StoreError> {
        let caller_role = self.role_of(caller_identity).ok_or(StoreError::Forbidden)?;
        authorize(caller_role, RequiredRole::Admin).map_err(|_| StoreError::Forbidden)?;

        let target = self
            .members
            .get_mut(target_identity)
            .ok_or(StoreError::NotFound)?;
        target.payment_status = status;
        Ok(())
    }
}

#[test]
fn test_register_rejects_foreign_domain() {
    let mut store = MockMemberStore::new("wayne.edu", &[]);

    let result = store.register("u1", "someone@gmail.com", None);

    assert_eq!(result.unwrap_err(), StoreError::InvalidEmailDomain);
    assert!(store.members.is_empty());
}

#[test]
fn test_allow_listed_email_gets_admin_role() {
    let mut store = MockMemberStore::new("wayne.edu", &["president@wayne.edu"]);

    let admin = store.register("u1", "president@wayne.edu", None).unwrap();
    let member = store.register("u2", "freshman@wayne.edu", None).unwrap();

    assert_eq!(admin.role, MemberRole::Admin);
    assert_eq!(member.role, MemberRole::Member);
}

#[test]
fn test_allow_list_is_case_insensitive() {
    let mut store = MockMemberStore::new("wayne.edu", &["President@Wayne.edu"]);

    let admin = store.register("u1", "president@wayne.edu", None).unwrap();

    assert_eq!(admin.role, MemberRole::Admin);
}

#[test]
fn test_requested_role_is_ignored() {
    let mut store = MockMemberStore::new("wayne.edu", &[]);

    let member = store
        .register("u1", "freshman@wayne.edu", Some(MemberRole::Admin))
        .unwrap();

    assert_eq!(member.role, MemberRole::Member);
}

#[test]
fn test_duplicate_identity_rejected() {
    let mut store = MockMemberStore::new("wayne.edu", &[]);

    store.register("u1", "a@wayne.edu", None).unwrap();
    let second = store.register("u1", "a@wayne.edu", None);

    assert_eq!(second.unwrap_err(), StoreError::AlreadyRegistered);
    assert_eq!(store.members.len(), 1);
}

#[test]
fn test_payment_status_is_a_closed_set() {
    // Out-of-set values never make it past parsing, so the store cannot
    // be touched by them
    assert!(PaymentStatus::from_str("refunded").is_err());
    assert!(serde_json::from_str::<PaymentStatus>("\"overdue\"").is_err());

    let mut store = MockMemberStore::new("wayne.edu", &["admin@wayne.edu"]);
    store.register("u1", "admin@wayne.edu", None).unwrap();
    store.register("u2", "b@wayne.edu", None).unwrap();

    if let Ok(status) = PaymentStatus::from_str("refunded") {
        store.set_payment_status("u1", "u2", status).unwrap();
    }

    assert_eq!(
        store.members["u2"].payment_status,
        PaymentStatus::NotPaid
    );
}

#[test]
fn test_non_admin_cannot_set_payment_status() {
    let mut store = MockMemberStore::new("wayne.edu", &[]);
    store.register("u1", "a@wayne.edu", None).unwrap();
    store.register("u2", "b@wayne.edu", None).unwrap();

    let result = store.set_payment_status("u1", "u2", PaymentStatus::Paid);

    assert_eq!(result.unwrap_err(), StoreError::Forbidden);
    assert_eq!(store.members["u2"].payment_status, PaymentStatus::NotPaid);
}

#[test]
fn test_unregistered_caller_cannot_pass_the_gate() {
    let mut store = MockMemberStore::new("wayne.edu", &[]);
    store.register("u2", "b@wayne.edu", None).unwrap();

    let result = store.set_payment_status("ghost", "u2", PaymentStatus::Paid);

    assert_eq!(result.unwrap_err(), StoreError::Forbidden);
}

#[test]
fn test_admin_sets_payment_status() {
    let mut store = MockMemberStore::new("wayne.edu", &["admin@wayne.edu"]);
    store.register("u1", "admin@wayne.edu", None).unwrap();
    store.register("u2", "b@wayne.edu", None).unwrap();

    store
        .set_payment_status("u1", "u2", PaymentStatus::Paid)
        .unwrap();

    assert_eq!(store.members["u2"].payment_status, PaymentStatus::Paid);
}

#[test]
fn test_set_payment_status_missing_target_is_not_found() {
    let mut store = MockMemberStore::new("wayne.edu", &["admin@wayne.edu"]);
    store.register("u1", "admin@wayne.edu", None).unwrap();

    let result = store.set_payment_status("u1", "nobody", PaymentStatus::Paid);

    assert_eq!(result.unwrap_err(), StoreError::NotFound);
}
