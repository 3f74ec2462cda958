//! Own profile page. Read-only, built from the session's user snapshot.

use crate::model::UserSnapshot;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCard {
    pub full_name: String,
    pub business_card_number: String,
    pub trusted: bool,
    pub likes_count: u32,
    pub email: String,
    pub phone: String,
    /// "City, Country"
    pub location: String,
    pub date_of_birth: String,
    pub member_since: String,
}

impl ProfileCard {
    pub fn from_user(user: &UserSnapshot) -> Self {
        Self {
            full_name: user.full_name(),
            business_card_number: user.business_card_number.clone(),
            trusted: user.is_trusted,
            likes_count: user.likes_count,
            email: user.email.clone(),
            phone: user.phone.clone(),
            location: format!("{}, {}", user.city, user.country),
            date_of_birth: user.date_of_birth.date_label(),
            member_since: user.created_at.date_label(),
        }
    }

    /// `None` when signed out
    pub fn from_session(session: Option<&Session>) -> Option<Self> {
        session.map(|s| Self::from_user(s.user()))
    }

    pub fn trust_label(&self) -> &'static str {
        if self.trusted {
            "Trusted"
        } else {
            "New Member"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_session;

    #[test]
    fn test_card_reflects_session_user() {
        let session = sample_session();
        let card = ProfileCard::from_session(Some(&session)).unwrap();
        assert_eq!(card.full_name, "Ada Lovelace");
        assert_eq!(card.business_card_number, "UK-0123-4567");
        assert_eq!(card.location, "London, UK");
        assert_eq!(card.date_of_birth, "1990-12-10");
        assert_eq!(card.trust_label(), "New Member");
    }

    #[test]
    fn test_no_card_without_session() {
        assert_eq!(ProfileCard::from_session(None), None);
    }
}
