//! Wallet and category lookups.
//!
//! Read-mostly data behind the pickers: listed through the cache,
//! invalidated on create. Deleting a wallet does not touch reminders
//! that reference it — referential integrity lives server-side.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use uuid::Uuid;

use crate::cache::Cache;
use crate::domain::commands::lookups::{CreateCategoryCommand, CreateWalletCommand};
use crate::domain::dates;
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::lookup::{Category, Wallet};
use crate::domain::session_service::SessionService;
use crate::storage::traits::LookupStore;

/// Lookup tables change rarely; they tolerate a longer window than
/// record lists.
const LIST_TTL: Duration = Duration::from_secs(300);

const DEFAULT_CURRENCY: &str = "VND";

#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn LookupStore>,
    session: SessionService,
    cache: Cache,
}

impl LookupService {
    pub fn new(store: Arc<dyn LookupStore>, session: SessionService, cache: Cache) -> Self {
        Self {
            store,
            session,
            cache,
        }
    }

    pub async fn list_wallets(&self) -> ServiceResult<Vec<Wallet>> {
        let user = self.session.current_user()?;
        let key = format!("wallets:{}:list", user.id);
        let store = self.store.clone();
        let user_id = user.id.clone();
        self.cache
            .fetch(&key, LIST_TTL, || async move {
                Ok(store.list_wallets(&user_id).await?)
            })
            .await
    }

    pub async fn get_wallet(&self, wallet_id: &str) -> ServiceResult<Option<Wallet>> {
        let user = self.session.current_user()?;
        Ok(self.store.get_wallet(&user.id, wallet_id).await?)
    }

    pub async fn create_wallet(&self, cmd: CreateWalletCommand) -> ServiceResult<Wallet> {
        let user = self.session.current_user()?;
        validate_name(&cmd.name)?;

        let wallet = Wallet {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            name: cmd.name,
            currency: cmd.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            icon: cmd.icon,
            color: cmd.color,
            created_at: dates::now(),
        };
        self.store.insert_wallet(&wallet).await?;

        self.cache.invalidate_prefix(&format!("wallets:{}:", user.id));
        info!("Created wallet {} for user {}", wallet.id, user.id);
        Ok(wallet)
    }

    pub async fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        let user = self.session.current_user()?;
        let key = format!("categories:{}:list", user.id);
        let store = self.store.clone();
        let user_id = user.id.clone();
        self.cache
            .fetch(&key, LIST_TTL, || async move {
                Ok(store.list_categories(&user_id).await?)
            })
            .await
    }

    pub async fn get_category(&self, category_id: &str) -> ServiceResult<Option<Category>> {
        let user = self.session.current_user()?;
        Ok(self.store.get_category(&user.id, category_id).await?)
    }

    pub async fn create_category(&self, cmd: CreateCategoryCommand) -> ServiceResult<Category> {
        let user = self.session.current_user()?;
        validate_name(&cmd.name)?;

        let category = Category {
            id: Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            name: cmd.name,
            kind: cmd.kind,
            icon: cmd.icon,
            color: cmd.color,
            created_at: dates::now(),
        };
        self.store.insert_category(&category).await?;

        self.cache
            .invalidate_prefix(&format!("categories:{}:", user.id));
        info!("Created category {} for user {}", category.id, user.id);
        Ok(category)
    }
}

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.is_empty() || name.len() > 128 {
        return Err(ServiceError::Validation(
            "Name must be between 1 and 128 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::reminder::ReminderKind;
    use crate::domain::models::user::AuthUser;
    use crate::storage::sqlite::{DbConnection, LookupRepository};

    async fn create_test_service() -> LookupService {
        let connection = DbConnection::init_test().await.unwrap();
        let repository = LookupRepository::new(connection);
        let session = SessionService::new();
        session.sign_in(AuthUser {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
        });
        LookupService::new(Arc::new(repository), session, Cache::new())
    }

    #[tokio::test]
    async fn test_wallet_defaults_to_vnd() {
        let service = create_test_service().await;
        let wallet = service
            .create_wallet(CreateWalletCommand {
                name: "Ví tiền mặt".to_string(),
                currency: None,
                icon: None,
                color: None,
            })
            .await
            .unwrap();
        assert_eq!(wallet.currency, "VND");
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_list() {
        let service = create_test_service().await;
        assert!(service.list_wallets().await.unwrap().is_empty());

        service
            .create_wallet(CreateWalletCommand {
                name: "Ngân hàng".to_string(),
                currency: Some("VND".to_string()),
                icon: None,
                color: None,
            })
            .await
            .unwrap();

        // The cached empty list must not survive the write.
        assert_eq!(service.list_wallets().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_categories_carry_kind() {
        let service = create_test_service().await;
        let category = service
            .create_category(CreateCategoryCommand {
                name: "Ăn uống".to_string(),
                kind: ReminderKind::Chi,
                icon: Some("🍜".to_string()),
                color: None,
            })
            .await
            .unwrap();
        assert_eq!(category.kind, ReminderKind::Chi);

        let fetched = service.get_category(&category.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ăn uống");
    }

    #[tokio::test]
    async fn test_unknown_wallet_is_none() {
        let service = create_test_service().await;
        assert!(service.get_wallet("missing").await.unwrap().is_none());
    }
}
