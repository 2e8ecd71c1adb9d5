//! Authenticated caller context.

/// The signed-in user, passed explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
}

impl Session {
    pub fn new(user_id: i32, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    pub fn owns(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}
