use std::collections::HashMap;
use std::sync::Arc;

use motocare_domain::AccountId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One write lock per account. Whoever holds it owns the
/// load/reduce/save/publish sequence for that account, so revisions reach
/// storage and subscribers in order.
#[derive(Default)]
pub struct AccountLocks {
    locks: Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub async fn acquire(&self, account_id: &AccountId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(account_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
