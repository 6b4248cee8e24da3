//! Session service: holds the currently signed-in user.
//!
//! Real credential checking belongs to the hosted auth provider; this
//! service only caches the identity the provider handed back, so every
//! record service can require a user before touching storage.

use std::sync::{Arc, RwLock};

use log::info;

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::user::AuthUser;

#[derive(Clone, Default)]
pub struct SessionService {
    current: Arc<RwLock<Option<AuthUser>>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user: AuthUser) {
        info!("Session opened for user {}", user.id);
        *self.current.write().unwrap() = Some(user);
    }

    pub fn sign_out(&self) {
        if let Some(user) = self.current.write().unwrap().take() {
            info!("Session closed for user {}", user.id);
        }
    }

    /// The signed-in user, or `NotAuthenticated` when no session is
    /// cached. This check runs before any storage call.
    pub fn current_user(&self) -> ServiceResult<AuthUser> {
        self.current
            .read()
            .unwrap()
            .clone()
            .ok_or(ServiceError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_session_is_not_authenticated() {
        let service = SessionService::new();
        assert!(matches!(
            service.current_user(),
            Err(ServiceError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_sign_in_and_out() {
        let service = SessionService::new();
        service.sign_in(AuthUser {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
        });
        assert_eq!(service.current_user().unwrap().id, "u1");

        service.sign_out();
        assert!(service.current_user().is_err());
    }
}
