//! Per-user UI preferences as plain string key/values.
//!
//! These are read once when a screen mounts and written on change, so
//! they go straight to storage with no cache in front.

use std::sync::Arc;

use crate::domain::errors::ServiceResult;
use crate::domain::session_service::SessionService;
use crate::storage::traits::PreferenceStore;

/// Known preference keys. Unknown keys are stored as-is; the constants
/// just keep call sites in agreement.
pub const PREF_TASK_VIEW_PERIOD: &str = "task_view_period";
pub const PREF_SELECTED_DATE_RANGE: &str = "selected_date_range";
pub const PREF_CALENDAR_VIEW_MODE: &str = "calendar_view_mode";

#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
    session: SessionService,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>, session: SessionService) -> Self {
        Self { store, session }
    }

    pub async fn get(&self, key: &str) -> ServiceResult<Option<String>> {
        let user = self.session.current_user()?;
        Ok(self.store.get_preference(&user.id, key).await?)
    }

    pub async fn set(&self, key: &str, value: &str) -> ServiceResult<()> {
        let user = self.session.current_user()?;
        Ok(self.store.set_preference(&user.id, key, value).await?)
    }

    /// Returns whether a value existed.
    pub async fn delete(&self, key: &str) -> ServiceResult<bool> {
        let user = self.session.current_user()?;
        Ok(self.store.delete_preference(&user.id, key).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::AuthUser;
    use crate::storage::sqlite::{DbConnection, PreferenceRepository};

    async fn create_test_service() -> PreferenceService {
        let connection = DbConnection::init_test().await.unwrap();
        let repository = PreferenceRepository::new(connection);
        let session = SessionService::new();
        session.sign_in(AuthUser {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
        });
        PreferenceService::new(Arc::new(repository), session)
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let service = create_test_service().await;
        assert_eq!(service.get(PREF_CALENDAR_VIEW_MODE).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_then_overwrite() {
        let service = create_test_service().await;
        service.set(PREF_TASK_VIEW_PERIOD, "week").await.unwrap();
        assert_eq!(
            service.get(PREF_TASK_VIEW_PERIOD).await.unwrap(),
            Some("week".to_string())
        );

        service.set(PREF_TASK_VIEW_PERIOD, "month").await.unwrap();
        assert_eq!(
            service.get(PREF_TASK_VIEW_PERIOD).await.unwrap(),
            Some("month".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_test_service().await;
        service.set(PREF_CALENDAR_VIEW_MODE, "grid").await.unwrap();
        assert!(service.delete(PREF_CALENDAR_VIEW_MODE).await.unwrap());
        assert!(!service.delete(PREF_CALENDAR_VIEW_MODE).await.unwrap());
        assert_eq!(service.get(PREF_CALENDAR_VIEW_MODE).await.unwrap(), None);
    }
}
