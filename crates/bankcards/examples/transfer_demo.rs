//! End-to-end wiring of the service stack against a live Postgres and
//! redis, driving one transfer between two cards of the same user.
//!
//! Required env: DATABASE_URL, CARD_ENCRYPTION_SECRET, REDIS_HOST,
//! REDIS_PORT, plus DEMO_USER_ID, DEMO_FROM_CARD, DEMO_TO_CARD and
//! DEMO_AMOUNT (minor units) for the transfer itself.

use anyhow::{Context, Result};
use bankcards::{
    abstract_trait::{
        card::service::query::CardQueryServiceTrait,
        security::AuthContext,
        transfer::service::{
            command::TransferCommandServiceTrait, query::TransferQueryServiceTrait,
        },
    },
    cache::CacheStore,
    config::{Config, ConnectionManager, RedisPool},
    domain::requests::{
        card::FindCardsByUser,
        transfer::{CreateTransferRequest, FindTransfersByUser},
    },
    model::role::RoleName,
    repository::{
        card::CardQueryRepository,
        transfer::{TransferCommandRepository, TransferQueryRepository},
        user::UserQueryRepository,
    },
    service::{
        SecurityService,
        card::CardQueryService,
        transfer::{TransferCommandService, TransferQueryService},
    },
    utils::{CardCipher, Logger},
};
use std::sync::Arc;
use tracing::info;

fn env_i32(key: &str) -> Result<i32> {
    std::env::var(key)
        .with_context(|| format!("Missing env: {key}"))?
        .parse::<i32>()
        .with_context(|| format!("{key} must be an integer"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _logger = Logger::new("demo", true);

    let config = Config::init()?;
    let cipher = Arc::new(CardCipher::new(&config.card_encryption_secret)?);

    let db = ConnectionManager::new_pool(&config.database_url).await?;
    let redis = RedisPool::new(&config.redis)?;
    if redis.ping().await.is_err() {
        info!("redis unreachable; continuing without cache acceleration");
    }
    let cache = Arc::new(CacheStore::new(redis));

    let card_query = Arc::new(CardQueryRepository::new(db.clone()));
    let user_query = Arc::new(UserQueryRepository::new(db.clone()));
    let transfer_query_repo = Arc::new(TransferQueryRepository::new(db.clone()));
    let transfer_command_repo = Arc::new(TransferCommandRepository::new(db));

    let security = Arc::new(SecurityService::new(user_query));
    let cards = CardQueryService::new(
        card_query.clone(),
        security.clone(),
        cipher,
        cache.clone(),
    );
    let transfers = TransferCommandService::new(
        transfer_command_repo,
        card_query.clone(),
        security,
        cache.clone(),
    );
    let history = TransferQueryService::new(transfer_query_repo, card_query, cache);

    let user_id = env_i32("DEMO_USER_ID")?;
    let auth = AuthContext::new(user_id, vec![RoleName::User]);

    let wallet = cards
        .find_by_user(
            &FindCardsByUser {
                user_id,
                status: None,
                page: 1,
                page_size: 10,
            },
            &auth,
        )
        .await?;
    for card in &wallet.data {
        info!(
            "  card #{} {} [{}] balance {}",
            card.id, card.card_number, card.status, card.balance
        );
    }

    let request = CreateTransferRequest {
        from_card_id: env_i32("DEMO_FROM_CARD")?,
        to_card_id: env_i32("DEMO_TO_CARD")?,
        amount: i64::from(env_i32("DEMO_AMOUNT")?),
        description: Some("demo transfer".to_string()),
    };

    match transfers.create(&request, &auth).await {
        Ok(receipt) => info!(
            "transfer {} committed with status {}",
            receipt.data.transfer_no, receipt.data.status
        ),
        Err(e) => info!("transfer rejected: {e}"),
    }

    let page = history
        .find_by_user(
            &FindTransfersByUser {
                user_id,
                page: 1,
                page_size: 10,
            },
            &auth,
        )
        .await?;

    info!(
        "user {user_id} has {} transfers on record",
        page.pagination.total_items
    );
    for transfer in &page.data {
        info!(
            "  #{} card {} -> card {} amount {} ({})",
            transfer.id, transfer.from_card_id, transfer.to_card_id, transfer.amount,
            transfer.status
        );
    }

    Ok(())
}
