/// Input validation utilities for registration and profile updates
/// Checks whether an email belongs to the organization's domain.
/// Comparison is case-insensitive; the domain is configured, not baked in.
pub fn is_org_email(email: &str, domain: &str) -> bool {
    let email = email.to_lowercase();
    let suffix = format!("@{}", domain.to_lowercase());
    email.ends_with(&suffix) && email.len() > suffix.len()
}

/// Sanity bounds for a graduation year. Generous on purpose: alumni and
/// long programs both happen.
pub fn is_plausible_graduation_year(year: i32) -> bool {
    (1900..=2100).contains(&year)
}
