//! User, session and delivery-address storage.
//!
//! Everything lives in memory behind one `RwLock` and is snapshotted to a JSON
//! file after each mutation. Every address query is scoped to its owner.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::{
    DeliveryAddress, DeliveryAddressInput, DeliveryAddressPatch, SessionUser, SignInRequest,
    SignInResponse, UpdateManyResult, UserId,
};
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAddress {
    user_id: UserId,
    #[serde(flatten)]
    address: DeliveryAddress,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    users: Vec<SessionUser>,
    /// token → user id
    sessions: HashMap<String, UserId>,
    addresses: Vec<StoredAddress>,
}

pub struct Store {
    data: RwLock<Snapshot>,
    path: Option<PathBuf>,
}

impl Store {
    /// Store without a backing file (used by tests)
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(Snapshot::default()),
            path: None,
        }
    }

    /// Open a file-backed store. A missing file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            data: RwLock::new(data),
            path: Some(path),
        })
    }

    async fn persist(&self, data: &Snapshot) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_snapshot(path, data).await
    }

    // ── Sessions ──────────────────────────────────────────────

    /// Find or create the user by name and open a new session
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, StorageError> {
        let mut data = self.data.write().await;

        let name = request.name.trim();
        let existing = data.users.iter().position(|u| u.name == name);
        let user = match existing {
            Some(index) => {
                let user = &mut data.users[index];
                if request.image.is_some() {
                    user.image = request.image.clone();
                }
                user.clone()
            }
            None => {
                let user = SessionUser {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    image: request.image.clone(),
                };
                data.users.push(user.clone());
                user
            }
        };

        let token = uuid::Uuid::new_v4().simple().to_string();
        data.sessions.insert(token.clone(), user.id.clone());
        self.persist(&data).await?;

        Ok(SignInResponse { token, user })
    }

    /// Drop a session token. Returns false if it was unknown.
    pub async fn sign_out(&self, token: &str) -> Result<bool, StorageError> {
        let mut data = self.data.write().await;
        let removed = data.sessions.remove(token).is_some();
        if removed {
            self.persist(&data).await?;
        }
        Ok(removed)
    }

    pub async fn user_for_token(&self, token: &str) -> Option<SessionUser> {
        let data = self.data.read().await;
        let user_id = data.sessions.get(token)?;
        data.users.iter().find(|u| &u.id == user_id).cloned()
    }

    // ── Delivery addresses ────────────────────────────────────

    pub async fn list_addresses(&self, user_id: &str) -> Vec<DeliveryAddress> {
        let data = self.data.read().await;
        data.addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.address.clone())
            .collect()
    }

    pub async fn create_address(
        &self,
        user_id: &str,
        input: DeliveryAddressInput,
    ) -> Result<DeliveryAddress, StorageError> {
        let mut data = self.data.write().await;
        let address = DeliveryAddress {
            id: uuid::Uuid::new_v4().to_string(),
            street: input.street,
            city: input.city,
            state: input.state,
            zip: input.zip,
        };
        data.addresses.push(StoredAddress {
            user_id: user_id.to_string(),
            address: address.clone(),
        });
        self.persist(&data).await?;
        Ok(address)
    }

    /// Update one address owned by `user_id`. `None` when no such address exists.
    pub async fn update_address(
        &self,
        user_id: &str,
        patch: &DeliveryAddressPatch,
    ) -> Result<Option<DeliveryAddress>, StorageError> {
        let mut data = self.data.write().await;
        let updated = owned_mut(&mut data, user_id, &patch.id).map(|address| {
            address.apply(patch);
            address.clone()
        });
        if updated.is_some() {
            self.persist(&data).await?;
        }
        Ok(updated)
    }

    /// Apply every patch under one write lock; each reports how many rows it touched.
    pub async fn update_addresses(
        &self,
        user_id: &str,
        patches: &[DeliveryAddressPatch],
    ) -> Result<Vec<UpdateManyResult>, StorageError> {
        let mut data = self.data.write().await;
        let results: Vec<UpdateManyResult> = patches
            .iter()
            .map(|patch| {
                let count = match owned_mut(&mut data, user_id, &patch.id) {
                    Some(address) => {
                        address.apply(patch);
                        1
                    }
                    None => 0,
                };
                UpdateManyResult { count }
            })
            .collect();
        if results.iter().any(|r| r.count > 0) {
            self.persist(&data).await?;
        }
        Ok(results)
    }
}

fn owned_mut<'a>(
    data: &'a mut Snapshot,
    user_id: &str,
    address_id: &str,
) -> Option<&'a mut DeliveryAddress> {
    data.addresses
        .iter_mut()
        .find(|a| a.user_id == user_id && a.address.id == address_id)
        .map(|a| &mut a.address)
}

async fn write_snapshot(path: &Path, data: &Snapshot) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json = serde_json::to_string_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(street: &str) -> DeliveryAddressInput {
        DeliveryAddressInput {
            street: street.into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62701".into(),
        }
    }

    fn sign_in_request(name: &str) -> SignInRequest {
        SignInRequest {
            name: name.into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_sign_in_reuses_user_by_name() {
        let store = Store::in_memory();
        let first = store.sign_in(&sign_in_request("ada")).await.unwrap();
        let second = store.sign_in(&sign_in_request("ada")).await.unwrap();
        assert_eq!(first.user.id, second.user.id);
        assert_ne!(first.token, second.token);

        let user = store.user_for_token(&first.token).await.unwrap();
        assert_eq!(user.name, "ada");
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_token() {
        let store = Store::in_memory();
        let session = store.sign_in(&sign_in_request("bob")).await.unwrap();
        assert!(store.sign_out(&session.token).await.unwrap());
        assert!(store.user_for_token(&session.token).await.is_none());
        assert!(!store.sign_out(&session.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_addresses_are_scoped_to_owner() {
        let store = Store::in_memory();
        let created = store.create_address("u1", input("1 Elm St")).await.unwrap();
        store.create_address("u2", input("2 Oak St")).await.unwrap();

        let mine = store.list_addresses("u1").await;
        assert_eq!(mine, vec![created.clone()]);

        let patch = DeliveryAddressPatch {
            id: created.id.clone(),
            street: Some("9 Hijack Rd".into()),
            ..Default::default()
        };
        assert!(store.update_address("u2", &patch).await.unwrap().is_none());
        assert_eq!(store.list_addresses("u1").await[0].street, "1 Elm St");
    }

    #[tokio::test]
    async fn test_update_one_applies_partial_patch() {
        let store = Store::in_memory();
        let created = store.create_address("u1", input("1 Elm St")).await.unwrap();
        let patch = DeliveryAddressPatch {
            id: created.id.clone(),
            zip: Some("60601".into()),
            ..Default::default()
        };
        let updated = store.update_address("u1", &patch).await.unwrap().unwrap();
        assert_eq!(updated.zip, "60601");
        assert_eq!(updated.street, "1 Elm St");
    }

    #[tokio::test]
    async fn test_update_many_reports_counts() {
        let store = Store::in_memory();
        let a = store.create_address("u1", input("1 Elm St")).await.unwrap();
        let b = store.create_address("u2", input("2 Oak St")).await.unwrap();

        let patches = vec![
            DeliveryAddressPatch::full(a.id.clone(), input("3 Pine St")),
            DeliveryAddressPatch::full(b.id.clone(), input("4 Stolen St")),
            DeliveryAddressPatch::full("missing".into(), input("5 Nowhere")),
        ];
        let results = store.update_addresses("u1", &patches).await.unwrap();
        let counts: Vec<u64> = results.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![1, 0, 0]);
        assert_eq!(store.list_addresses("u1").await[0].street, "3 Pine St");
        assert_eq!(store.list_addresses("u2").await[0].street, "2 Oak St");
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("stylecrop-store-{}", uuid::Uuid::new_v4()));
        let path = dir.join("shop.json");

        let store = Store::open(&path).await.unwrap();
        let session = store.sign_in(&sign_in_request("carol")).await.unwrap();
        store
            .create_address(&session.user.id, input("7 Birch St"))
            .await
            .unwrap();
        drop(store);

        let reopened = Store::open(&path).await.unwrap();
        let user = reopened.user_for_token(&session.token).await.unwrap();
        assert_eq!(reopened.list_addresses(&user.id).await.len(), 1);

        let _ = std::fs::remove_dir_all(dir);
    }
}
