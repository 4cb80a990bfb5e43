//! Initial reservation status assignment.

use crate::model::ReservationStatus;

/// Field names a subject's classification may live under, highest priority
/// first. A migration shim for legacy records; collapses to one canonical
/// field once upstream data is consolidated.
pub const CLASSIFICATION_ALIASES: [&str; 4] = ["classify", "classification", "segment", "tier"];

/// Field access over whatever shape the subject record takes.
pub trait SubjectView {
    /// The raw value stored under `field`, if present and non-null.
    fn field(&self, field: &str) -> Option<&str>;
}

/// A subject with no readable fields (unknown or anonymous).
pub struct NoSubject;

impl SubjectView for NoSubject {
    fn field(&self, _field: &str) -> Option<&str> {
        None
    }
}

impl SubjectView for serde_json::Value {
    fn field(&self, field: &str) -> Option<&str> {
        self.get(field)?.as_str()
    }
}

/// Normalized classification tier: the first alias present wins, trimmed and
/// uppercased. Empty when no alias carries a value.
pub fn classification_of(subject: &dyn SubjectView) -> String {
    for alias in CLASSIFICATION_ALIASES {
        if let Some(raw) = subject.field(alias) {
            return raw.trim().to_uppercase();
        }
    }
    String::new()
}

/// Initial status for a reservation created by `actor_role` on behalf of
/// `subject`. Total: every input maps to ACTIVE or PENDING.
///
/// Admin actors are auto-approved regardless of subject. Unclassified and
/// REGULAR subjects queue for review; any other non-empty tier is trusted.
pub fn resolve_status(actor_role: &str, subject: &dyn SubjectView) -> ReservationStatus {
    if actor_role.trim().to_uppercase() == "ADMIN" {
        return ReservationStatus::Active;
    }
    let tier = classification_of(subject);
    if tier.is_empty() || tier == "REGULAR" {
        ReservationStatus::Pending
    } else {
        ReservationStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_is_always_active() {
        assert_eq!(resolve_status("ADMIN", &NoSubject), ReservationStatus::Active);
        assert_eq!(
            resolve_status("admin", &json!({"classify": "regular"})),
            ReservationStatus::Active
        );
        assert_eq!(resolve_status("  Admin ", &NoSubject), ReservationStatus::Active);
    }

    #[test]
    fn missing_classification_is_pending() {
        assert_eq!(resolve_status("MEMBER", &NoSubject), ReservationStatus::Pending);
        assert_eq!(resolve_status("MEMBER", &json!({})), ReservationStatus::Pending);
    }

    #[test]
    fn regular_tier_is_pending_case_insensitively() {
        for raw in ["REGULAR", "regular", " Regular "] {
            assert_eq!(
                resolve_status("MEMBER", &json!({ "classification": raw })),
                ReservationStatus::Pending
            );
        }
    }

    #[test]
    fn other_tiers_are_active() {
        for raw in ["PREMIUM", "premium", "verified", "GOLD"] {
            assert_eq!(
                resolve_status("MEMBER", &json!({ "tier": raw })),
                ReservationStatus::Active
            );
        }
    }

    #[test]
    fn alias_priority_first_present_wins() {
        let subject = json!({"tier": "premium", "classify": "regular"});
        assert_eq!(classification_of(&subject), "REGULAR");
        assert_eq!(resolve_status("MEMBER", &subject), ReservationStatus::Pending);
    }

    #[test]
    fn null_alias_is_skipped() {
        let subject = json!({"classify": null, "segment": "premium"});
        assert_eq!(classification_of(&subject), "PREMIUM");
    }

    #[test]
    fn present_but_empty_is_pending() {
        let subject = json!({"classify": "  ", "tier": "premium"});
        // First present alias wins even when it normalizes to empty.
        assert_eq!(classification_of(&subject), "");
        assert_eq!(resolve_status("MEMBER", &subject), ReservationStatus::Pending);
    }

    #[test]
    fn unrecognized_role_falls_through_to_tier() {
        assert_eq!(
            resolve_status("JANITOR", &json!({"tier": "premium"})),
            ReservationStatus::Active
        );
        assert_eq!(resolve_status("JANITOR", &NoSubject), ReservationStatus::Pending);
    }
}
