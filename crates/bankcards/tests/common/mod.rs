#![allow(dead_code)]

use async_trait::async_trait;
use bankcards::{
    abstract_trait::{
        card::{
            repository::{
                command::CardCommandRepositoryTrait, query::CardQueryRepositoryTrait,
            },
            service::{command::DynCardCommandService, query::DynCardQueryService},
        },
        security::AuthContext,
        transfer::{
            repository::{
                command::TransferCommandRepositoryTrait, query::TransferQueryRepositoryTrait,
            },
            service::{command::DynTransferCommandService, query::DynTransferQueryService},
        },
        user::{
            repository::{
                command::UserCommandRepositoryTrait, query::UserQueryRepositoryTrait,
            },
            service::{command::DynUserCommandService, query::DynUserQueryService},
        },
    },
    cache::CacheStore,
    config::{RedisConfig, RedisPool},
    domain::requests::{
        card::{CreateCardRequest, FindCardsByUser},
        transfer::{CreateTransferRequest, FindTransfersByCard},
        user::{CreateUserRequest, FindAllUsers, UpdateUserRequest},
    },
    errors::{CARD_NUMBER_EXISTS, EMAIL_EXISTS, RepositoryError, USERNAME_EXISTS},
    model::{
        card::{CardModel, CardStatus},
        role::{RoleModel, RoleName},
        transfer::{TransferModel, TransferStatus},
        user::UserModel,
    },
    service::{
        SecurityService,
        card::{CardCommandService, CardQueryService},
        transfer::{TransferCommandService, TransferQueryService},
        user::{UserCommandService, UserQueryService},
    },
    utils::CardCipher,
};
use chrono::{NaiveDate, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key";

/// Backing store shared by all in-memory repositories. One lock guards
/// everything, which is what makes the mock transfer commit atomic.
#[derive(Default)]
pub struct State {
    pub users: Vec<UserModel>,
    pub user_roles: HashMap<i32, Vec<String>>,
    pub cards: Vec<CardModel>,
    pub transfers: Vec<TransferModel>,
    pub next_user_id: i32,
    pub next_card_id: i32,
    pub next_transfer_id: i32,
    /// Counts paged ledger reads, so tests can assert the empty-wallet
    /// short-circuit never touches the ledger.
    pub transfer_list_queries: usize,
}

type Shared = Arc<Mutex<State>>;

fn paged<T: Clone>(items: &[T], page: i32, page_size: i32) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let limit = page_size.clamp(1, 100) as usize;
    let offset = ((page - 1).max(0) as usize).saturating_mul(limit);
    let slice = items.iter().skip(offset).take(limit).cloned().collect();
    (slice, total)
}

pub struct InMemoryCardQueryRepo {
    state: Shared,
}

#[async_trait]
impl CardQueryRepositoryTrait for InMemoryCardQueryRepo {
    async fn find_by_id(&self, card_id: i32) -> Result<CardModel, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .cards
            .iter()
            .find(|c| c.card_id == card_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_user(
        &self,
        req: &FindCardsByUser,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut cards: Vec<CardModel> = state
            .cards
            .iter()
            .filter(|c| c.user_id == req.user_id)
            .filter(|c| req.status.as_deref().is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        cards.sort_by_key(|c| c.card_id);
        Ok(paged(&cards, req.page, req.page_size))
    }

    async fn find_ids_by_user(&self, user_id: i32) -> Result<Vec<i32>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut ids: Vec<i32> = state
            .cards
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.card_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn exists_by_card_number(
        &self,
        encrypted_number: &str,
    ) -> Result<bool, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.cards.iter().any(|c| c.card_number == encrypted_number))
    }
}

pub struct InMemoryCardCommandRepo {
    state: Shared,
}

#[async_trait]
impl CardCommandRepositoryTrait for InMemoryCardCommandRepo {
    async fn create(
        &self,
        req: &CreateCardRequest,
        encrypted_number: &str,
    ) -> Result<CardModel, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.cards.iter().any(|c| c.card_number == encrypted_number) {
            return Err(RepositoryError::AlreadyExists(CARD_NUMBER_EXISTS.to_string()));
        }
        state.next_card_id += 1;
        let card = CardModel {
            card_id: state.next_card_id,
            user_id: req.user_id,
            card_number: encrypted_number.to_string(),
            status: CardStatus::Active.as_str().to_string(),
            balance: 0,
            expiry_date: req.expiry_date,
            created_at: Some(Utc::now().naive_utc()),
            updated_at: Some(Utc::now().naive_utc()),
        };
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn update_status(
        &self,
        card_id: i32,
        status: &str,
    ) -> Result<CardModel, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.card_id == card_id)
            .ok_or(RepositoryError::NotFound)?;
        card.status = status.to_string();
        card.updated_at = Some(Utc::now().naive_utc());
        Ok(card.clone())
    }

    async fn delete(&self, card_id: i32) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.cards.len();
        state.cards.retain(|c| c.card_id != card_id);
        if state.cards.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(true)
    }
}

pub struct InMemoryTransferCommandRepo {
    state: Shared,
}

#[async_trait]
impl TransferCommandRepositoryTrait for InMemoryTransferCommandRepo {
    async fn create(&self, req: &CreateTransferRequest) -> Result<TransferModel, RepositoryError> {
        // Everything under one lock: the balance re-check and the
        // debit/credit/insert happen as a unit, like the real transaction.
        let mut state = self.state.lock().unwrap();

        let available = state
            .cards
            .iter()
            .find(|c| c.card_id == req.from_card_id)
            .map(|c| c.balance)
            .ok_or(RepositoryError::NotFound)?;
        if !state.cards.iter().any(|c| c.card_id == req.to_card_id) {
            return Err(RepositoryError::NotFound);
        }

        if available < req.amount {
            return Err(RepositoryError::InsufficientBalance {
                available,
                requested: req.amount,
            });
        }

        for card in state.cards.iter_mut() {
            if card.card_id == req.from_card_id {
                card.balance -= req.amount;
            } else if card.card_id == req.to_card_id {
                card.balance += req.amount;
            }
        }

        state.next_transfer_id += 1;
        let transfer = TransferModel {
            transfer_id: state.next_transfer_id,
            transfer_no: Uuid::new_v4(),
            from_card_id: req.from_card_id,
            to_card_id: req.to_card_id,
            amount: req.amount,
            status: TransferStatus::Success.as_str().to_string(),
            description: req.description.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        state.transfers.push(transfer.clone());
        Ok(transfer)
    }
}

pub struct InMemoryTransferQueryRepo {
    state: Shared,
}

#[async_trait]
impl TransferQueryRepositoryTrait for InMemoryTransferQueryRepo {
    async fn find_by_id(&self, transfer_id: i32) -> Result<TransferModel, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .transfers
            .iter()
            .find(|t| t.transfer_id == transfer_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_card(
        &self,
        req: &FindTransfersByCard,
    ) -> Result<(Vec<TransferModel>, i64), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.transfer_list_queries += 1;
        let mut transfers: Vec<TransferModel> = state
            .transfers
            .iter()
            .filter(|t| t.from_card_id == req.card_id || t.to_card_id == req.card_id)
            .cloned()
            .collect();
        transfers.sort_by_key(|t| std::cmp::Reverse(t.transfer_id));
        Ok(paged(&transfers, req.page, req.page_size))
    }

    async fn find_by_cards(
        &self,
        card_ids: &[i32],
        page: i32,
        page_size: i32,
    ) -> Result<(Vec<TransferModel>, i64), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.transfer_list_queries += 1;
        let mut transfers: Vec<TransferModel> = state
            .transfers
            .iter()
            .filter(|t| card_ids.contains(&t.from_card_id) || card_ids.contains(&t.to_card_id))
            .cloned()
            .collect();
        transfers.sort_by_key(|t| std::cmp::Reverse(t.transfer_id));
        Ok(paged(&transfers, page, page_size))
    }
}

pub struct InMemoryUserQueryRepo {
    state: Shared,
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryUserQueryRepo {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        let state = self.state.lock().unwrap();
        let needle = req.search.to_lowercase();
        let mut users: Vec<UserModel> = state
            .users
            .iter()
            .filter(|u| {
                needle.is_empty()
                    || u.username.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.full_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        users.sort_by_key(|u| u.user_id);
        Ok(paged(&users, req.page, req.page_size))
    }

    async fn find_by_id(&self, user_id: i32) -> Result<UserModel, RepositoryError> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_roles(&self, user_id: i32) -> Result<Vec<RoleModel>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let roles = state
            .user_roles
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, role_name)| RoleModel {
                role_id: i as i32 + 1,
                role_name,
            })
            .collect();
        Ok(roles)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().any(|u| u.email == email))
    }
}

pub struct InMemoryUserCommandRepo {
    state: Shared,
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemoryUserCommandRepo {
    async fn create(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == req.username) {
            return Err(RepositoryError::AlreadyExists(USERNAME_EXISTS.to_string()));
        }
        if state.users.iter().any(|u| u.email == req.email) {
            return Err(RepositoryError::AlreadyExists(EMAIL_EXISTS.to_string()));
        }
        state.next_user_id += 1;
        let user = UserModel {
            user_id: state.next_user_id,
            username: req.username.clone(),
            email: req.email.clone(),
            password_hash: req.password_hash.clone(),
            full_name: req.full_name.clone(),
            created_at: Some(Utc::now().naive_utc()),
            updated_at: Some(Utc::now().naive_utc()),
        };
        state.users.push(user.clone());
        let id = user.user_id;
        state
            .user_roles
            .insert(id, vec![RoleName::User.as_str().to_string()]);
        Ok(user)
    }

    async fn update(&self, req: &UpdateUserRequest) -> Result<UserModel, RepositoryError> {
        let user_id = req
            .user_id
            .ok_or_else(|| RepositoryError::Custom("user_id is required".into()))?;
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or(RepositoryError::NotFound)?;
        if let Some(email) = &req.email {
            user.email = email.clone();
        }
        if let Some(full_name) = &req.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(hash) = &req.password_hash {
            user.password_hash = hash.clone();
        }
        user.updated_at = Some(Utc::now().naive_utc());
        Ok(user.clone())
    }

    async fn delete(&self, user_id: i32) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|u| u.user_id != user_id);
        if state.users.len() == before {
            return Err(RepositoryError::NotFound);
        }
        state.user_roles.remove(&user_id);
        Ok(true)
    }
}

/// Fully wired service stack over the in-memory repositories. The cache
/// points at a closed port, so every cache call degrades to a miss.
pub struct TestEnv {
    pub state: Shared,
    pub cipher: Arc<CardCipher>,
    pub card_query: DynCardQueryService,
    pub card_command: DynCardCommandService,
    pub transfer_query: DynTransferQueryService,
    pub transfer_command: DynTransferCommandService,
    pub user_query: DynUserQueryService,
    pub user_command: DynUserCommandService,
}

pub fn test_env() -> TestEnv {
    let state: Shared = Arc::new(Mutex::new(State::default()));
    let cipher = Arc::new(CardCipher::new(TEST_SECRET).unwrap());

    let redis = RedisPool::new(&RedisConfig::new("127.0.0.1".to_string(), 1, 0, None)).unwrap();
    let cache = Arc::new(CacheStore::new(redis));

    let card_query_repo = Arc::new(InMemoryCardQueryRepo {
        state: state.clone(),
    });
    let card_command_repo = Arc::new(InMemoryCardCommandRepo {
        state: state.clone(),
    });
    let transfer_query_repo = Arc::new(InMemoryTransferQueryRepo {
        state: state.clone(),
    });
    let transfer_command_repo = Arc::new(InMemoryTransferCommandRepo {
        state: state.clone(),
    });
    let user_query_repo = Arc::new(InMemoryUserQueryRepo {
        state: state.clone(),
    });
    let user_command_repo = Arc::new(InMemoryUserCommandRepo {
        state: state.clone(),
    });

    let security = Arc::new(SecurityService::new(user_query_repo.clone()));

    let card_query = Arc::new(CardQueryService::new(
        card_query_repo.clone(),
        security.clone(),
        cipher.clone(),
        cache.clone(),
    ));
    let card_command = Arc::new(CardCommandService::new(
        card_command_repo,
        card_query_repo.clone(),
        user_query_repo.clone(),
        security.clone(),
        cipher.clone(),
        cache.clone(),
    ));
    let transfer_query = Arc::new(TransferQueryService::new(
        transfer_query_repo,
        card_query_repo.clone(),
        cache.clone(),
    ));
    let transfer_command = Arc::new(TransferCommandService::new(
        transfer_command_repo,
        card_query_repo,
        security.clone(),
        cache.clone(),
    ));
    let user_query = Arc::new(UserQueryService::new(
        user_query_repo.clone(),
        security.clone(),
        cache.clone(),
    ));
    let user_command = Arc::new(UserCommandService::new(
        user_command_repo,
        user_query_repo,
        security,
        cache,
    ));

    TestEnv {
        state,
        cipher,
        card_query,
        card_command,
        transfer_query,
        transfer_command,
        user_query,
        user_command,
    }
}

impl TestEnv {
    pub fn seed_user(&self, username: &str, roles: &[RoleName]) -> i32 {
        let mut state = self.state.lock().unwrap();
        state.next_user_id += 1;
        let user_id = state.next_user_id;
        state.users.push(UserModel {
            user_id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_string(),
            full_name: username.to_string(),
            created_at: Some(Utc::now().naive_utc()),
            updated_at: Some(Utc::now().naive_utc()),
        });
        state.user_roles.insert(
            user_id,
            roles.iter().map(|r| r.as_str().to_string()).collect(),
        );
        user_id
    }

    pub fn seed_card(&self, user_id: i32, pan: &str, status: CardStatus, balance: i64) -> i32 {
        let encrypted = self.cipher.encrypt(pan).unwrap();
        let mut state = self.state.lock().unwrap();
        state.next_card_id += 1;
        let card_id = state.next_card_id;
        state.cards.push(CardModel {
            card_id,
            user_id,
            card_number: encrypted,
            status: status.as_str().to_string(),
            balance,
            expiry_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            created_at: Some(Utc::now().naive_utc()),
            updated_at: Some(Utc::now().naive_utc()),
        });
        card_id
    }

    pub fn card_balance(&self, card_id: i32) -> i64 {
        let state = self.state.lock().unwrap();
        state
            .cards
            .iter()
            .find(|c| c.card_id == card_id)
            .map(|c| c.balance)
            .unwrap()
    }

    pub fn transfer_count(&self) -> usize {
        self.state.lock().unwrap().transfers.len()
    }

    pub fn ledger_reads(&self) -> usize {
        self.state.lock().unwrap().transfer_list_queries
    }
}

pub fn user_auth(user_id: i32) -> AuthContext {
    AuthContext::new(user_id, vec![RoleName::User])
}

pub fn admin_auth(user_id: i32) -> AuthContext {
    AuthContext::new(user_id, vec![RoleName::User, RoleName::Admin])
}
