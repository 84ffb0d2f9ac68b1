use serde::{Deserialize, Serialize};

/// Credit balance of one user
///
/// Authentication is not handled here; the caller passes an already
/// verified user id into every service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub is_admin: bool,
    pub credits_remaining: u32,
}

impl Account {
    pub fn new(id: &str, name: &str, is_admin: bool, credits: u32) -> Self {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            is_admin,
            credits_remaining: credits,
        }
    }

    #[inline]
    pub fn has_credits(&self) -> bool {
        self.credits_remaining > 0
    }

    /// Spend one credit; stays at 0
    #[inline]
    pub fn reduce_credits(&mut self) {
        self.credits_remaining = self.credits_remaining.saturating_sub(1);
    }

    #[inline]
    pub fn add_credits(&mut self, credits: u32) {
        self.credits_remaining = self.credits_remaining.saturating_add(credits);
    }

    /// Raise the balance to `allowance` if below it
    #[inline]
    pub fn top_up_to(&mut self, allowance: u32) {
        self.credits_remaining = self.credits_remaining.max(allowance);
    }
}
