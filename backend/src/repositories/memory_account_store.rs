//! In-memory `AccountStore` used by the service and handler tests.
//!
//! Enforces the same username/email uniqueness as the database constraints.

use crate::database::models::{Account, NewAccount};
use crate::repositories::account_repository::{AccountStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct StoreData {
    accounts: BTreeMap<i32, Account>,
    next_id: i32,
}

pub struct MemoryAccountStore {
    data: RwLock<StoreData>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData {
                accounts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.accounts.len()
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create_account(&self, account: NewAccount) -> StoreResult<i32> {
        let mut data = self.data.write().await;

        if let Some(existing) = data
            .accounts
            .values()
            .find(|a| a.username == account.username || a.email == account.email)
        {
            let field = if existing.username == account.username {
                "username"
            } else {
                "email"
            };
            return Err(StoreError::Duplicate(format!("{field} already taken")));
        }

        let id = data.next_id;
        data.next_id += 1;
        data.accounts.insert(
            id,
            Account {
                id,
                username: account.username,
                password_hash: account.password_hash,
                email: account.email,
                created_at: account.created_at,
            },
        );

        Ok(id)
    }

    async fn get_account_by_id(&self, id: i32) -> StoreResult<Account> {
        self.data
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("id {id}")))
    }

    async fn get_account_by_username(&self, username: &str) -> StoreResult<Account> {
        self.data
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("username {username}")))
    }

    async fn delete_account_by_id(&self, id: i32) -> StoreResult<()> {
        self.data
            .write()
            .await
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("id {id}")))
    }

    async fn delete_accounts(&self) -> StoreResult<()> {
        self.data.write().await.accounts.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = MemoryAccountStore::new();

        let first = store
            .create_account(new_account("alice", "a@x.com"))
            .await
            .unwrap();
        let second = store
            .create_account(new_account("bob", "b@x.com"))
            .await
            .unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let alice = store.get_account_by_username("alice").await.unwrap();
        assert_eq!(alice.id, first);
        assert_eq!(alice.email, "a@x.com");

        let bob = store.get_account_by_id(second).await.unwrap();
        assert_eq!(bob.username, "bob");
    }

    #[tokio::test]
    async fn test_uniqueness_enforced() {
        let store = MemoryAccountStore::new();
        store
            .create_account(new_account("alice", "a@x.com"))
            .await
            .unwrap();

        let same_name = store.create_account(new_account("alice", "other@x.com")).await;
        assert!(matches!(same_name, Err(StoreError::Duplicate(_))));

        let same_email = store.create_account(new_account("carol", "a@x.com")).await;
        assert!(matches!(same_email, Err(StoreError::Duplicate(_))));

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_not_found_and_deletion() {
        let store = MemoryAccountStore::new();
        assert!(matches!(
            store.get_account_by_username("ghost").await,
            Err(StoreError::NotFound(_))
        ));

        let id = store
            .create_account(new_account("alice", "a@x.com"))
            .await
            .unwrap();
        store.delete_account_by_id(id).await.unwrap();
        assert!(matches!(
            store.get_account_by_id(id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_account_by_id(id).await,
            Err(StoreError::NotFound(_))
        ));

        store
            .create_account(new_account("bob", "b@x.com"))
            .await
            .unwrap();
        store
            .create_account(new_account("carol", "c@x.com"))
            .await
            .unwrap();
        store.delete_accounts().await.unwrap();
        assert_eq!(store.len().await, 0);
    }
}
