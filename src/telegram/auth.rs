//! Access control for bot commands.

use teloxide::types::User;

/// Refusal shown to users outside the access list.
pub const MSG_UNAUTHORIZED: &str = "抱歉，您无权使用此机器人。";

/// Telegram user ids allowed to use the bot.
///
/// An empty list permits everyone; startup refuses to run with one, so in
/// practice access is always restricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessList {
    users: Vec<i64>,
}

impl AccessList {
    pub fn new(mut users: Vec<i64>) -> Self {
        users.sort_unstable();
        users.dedup();
        Self { users }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Checks a raw Telegram user id.
    pub fn permits(&self, user_id: i64) -> bool {
        self.users.is_empty() || self.users.binary_search(&user_id).is_ok()
    }

    /// Checks the sender of a message. Messages without a sender (channel
    /// posts) are only allowed when the list is empty.
    pub fn permits_user(&self, user: Option<&User>) -> bool {
        match user.and_then(|u| i64::try_from(u.id.0).ok()) {
            Some(id) => self.permits(id),
            None => self.users.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "is_bot": false,
            "first_name": "Test"
        }))
        .unwrap()
    }

    #[test]
    fn test_permits_listed_users_only() {
        let access = AccessList::new(vec![7, 42, 7]);
        assert_eq!(access.len(), 2);
        assert!(access.permits(7));
        assert!(access.permits(42));
        assert!(!access.permits(8));
        assert!(access.permits_user(Some(&user(42))));
        assert!(!access.permits_user(Some(&user(43))));
        assert!(!access.permits_user(None));
    }

    #[test]
    fn test_empty_list_permits_everyone() {
        let access = AccessList::default();
        assert!(access.is_empty());
        assert!(access.permits(1));
        assert!(access.permits_user(Some(&user(1))));
        assert!(access.permits_user(None));
    }

    #[test]
    fn test_ids_beyond_i64_are_rejected() {
        let access = AccessList::new(vec![1]);
        assert!(!access.permits_user(Some(&user(u64::MAX))));
    }
}
