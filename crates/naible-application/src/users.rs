//! Anonymous user lifecycle.

use naible_core::storage::PreferenceStore;
use naible_core::{AnonymousUser, Result};

#[derive(Clone)]
pub struct UserService {
    store: PreferenceStore,
}

impl UserService {
    pub fn new(store: PreferenceStore) -> Self {
        Self { store }
    }

    pub fn current_user(&self) -> Result<Option<AnonymousUser>> {
        self.store.load_user()
    }

    /// Returns the stored user, creating an anonymous one on first run.
    pub fn ensure_user(&self) -> Result<AnonymousUser> {
        if let Some(user) = self.store.load_user()? {
            return Ok(user);
        }

        let user = AnonymousUser::new();
        self.store.save_user(&user)?;
        tracing::info!(user_id = %user.id, "[User] Created anonymous user");
        Ok(user)
    }

    /// Forgets the current user. Preferences and content are kept.
    pub fn logout(&self) -> Result<()> {
        self.store.remove_user()?;
        tracing::info!("[User] Logged out");
        Ok(())
    }
}
