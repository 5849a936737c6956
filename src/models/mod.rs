use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Member role. Closed set; anything else is unrepresentable past
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Admin,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    NotPaid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
            Self::NotPaid => write!(f, "not_paid"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "not_paid" => Ok(Self::NotPaid),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

/// Membership record. `identity` is the opaque subject id from the
/// external identity provider and is excluded from list projections.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: Uuid,
    pub identity: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub major: String,
    pub graduation_year: i32,
    pub phone_number: String,
    pub role: MemberRole,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// One RSVP. Append-only; there is no removal path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventAttendee {
    pub event_id: Uuid,
    pub member_identity: String,
    pub display_name: String,
    pub rsvp_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(MemberRole::from_str("admin"), Ok(MemberRole::Admin));
        assert_eq!(MemberRole::from_str("member"), Ok(MemberRole::Member));
        assert_eq!(MemberRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(MemberRole::from_str("owner").is_err());
        assert!(MemberRole::from_str("Admin").is_err());
        assert!(MemberRole::from_str("").is_err());
    }

    #[test]
    fn test_payment_status_round_trip() {
        assert_eq!(PaymentStatus::from_str("paid"), Ok(PaymentStatus::Paid));
        assert_eq!(
            PaymentStatus::from_str("not_paid"),
            Ok(PaymentStatus::NotPaid)
        );
        assert_eq!(PaymentStatus::NotPaid.to_string(), "not_paid");
    }

    #[test]
    fn test_payment_status_rejects_unknown() {
        assert!(PaymentStatus::from_str("unpaid").is_err());
        assert!(PaymentStatus::from_str("PAID").is_err());
    }

    #[test]
    fn test_enum_serde_shape() {
        assert_eq!(serde_json::to_string(&MemberRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&PaymentStatus::NotPaid).unwrap(),
            "\"not_paid\""
        );
        assert!(serde_json::from_str::<PaymentStatus>("\"overdue\"").is_err());
    }
}
