//! DTO ↔ domain mapping for wallets and categories.

use crate::domain::commands::lookups::{CreateCategoryCommand, CreateWalletCommand};
use crate::domain::models::lookup::{Category as DomainCategory, Wallet as DomainWallet};
use shared::{Category as SharedCategory, Wallet as SharedWallet};

use super::reminder_mapper::ReminderMapper;

pub struct LookupMapper;

impl LookupMapper {
    pub fn wallet_to_dto(domain: DomainWallet) -> SharedWallet {
        SharedWallet {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            currency: domain.currency,
            icon: domain.icon,
            color: domain.color,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn category_to_dto(domain: DomainCategory) -> SharedCategory {
        SharedCategory {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            kind: ReminderMapper::to_dto_kind(domain.kind),
            icon: domain.icon,
            color: domain.color,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_wallet_command(dto: shared::CreateWalletRequest) -> CreateWalletCommand {
        CreateWalletCommand {
            name: dto.name,
            currency: dto.currency,
            icon: dto.icon,
            color: dto.color,
        }
    }

    pub fn to_create_category_command(dto: shared::CreateCategoryRequest) -> CreateCategoryCommand {
        CreateCategoryCommand {
            name: dto.name,
            kind: ReminderMapper::to_domain_kind(dto.kind),
            icon: dto.icon,
            color: dto.color,
        }
    }
}
