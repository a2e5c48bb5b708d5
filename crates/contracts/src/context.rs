//! Operation context and the submission engine.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use threadline_core::asset_kind::Channel;
use threadline_core::authorization::{AccessPolicy, Operation};
use threadline_core::error::CoreError;
use threadline_core::identity::IdentityProvider;
use threadline_core::types::{OrgId, Timestamp};
use threadline_ledger::containment::{ContainmentIndex, ContainmentMode};
use threadline_ledger::keys::HEALTH_KEY;
use threadline_ledger::{LedgerStore, Transaction};

/// Everything an operation may consult: its transaction, the resolved
/// invoker, the submission time, and the deployment's policy.
pub struct TxContext<'a> {
    pub tx: Transaction<'a>,
    pub invoker: OrgId,
    pub now: Timestamp,
    pub policy: &'a AccessPolicy,
    pub containment: ContainmentMode,
    pub channel: Channel,
}

impl TxContext<'_> {
    pub fn authorize(&self, op: Operation) -> Result<(), CoreError> {
        self.policy.authorize(&self.invoker, op)
    }
}

/// Source of submission timestamps.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// One channel's ledger together with the policy it is governed by.
pub struct Contract {
    channel: Channel,
    store: Arc<dyn LedgerStore>,
    policy: Arc<AccessPolicy>,
    containment: ContainmentMode,
    clock: Clock,
    commit_lock: Mutex<()>,
}

impl Contract {
    pub fn new(
        channel: Channel,
        store: Arc<dyn LedgerStore>,
        policy: Arc<AccessPolicy>,
        containment: ContainmentMode,
    ) -> Self {
        Self {
            channel,
            store,
            policy,
            containment,
            clock: Arc::new(Utc::now),
            commit_lock: Mutex::new(()),
        }
    }

    /// Replace the wall clock used to stamp submissions.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn containment_mode(&self) -> ContainmentMode {
        self.containment
    }

    /// Run a mutating operation as one atomic unit.
    ///
    /// The invoker is resolved once, before the operation starts. The
    /// submission time is read from the clock while the commit lock is held,
    /// so committed timestamps follow commit order. Writes reach the ledger
    /// only if `op` succeeds; on error the transaction is dropped and the
    /// ledger is untouched.
    pub fn submit<T, F>(
        &self,
        identity: &dyn IdentityProvider,
        operation: &'static str,
        asset_id: &str,
        op: F,
    ) -> Result<T, CoreError>
    where
        F: FnOnce(&mut TxContext<'_>) -> Result<T, CoreError>,
    {
        let invoker = identity.current_invoker().inspect_err(|e| {
            tracing::warn!(operation, asset_id, error = %e, "Submission rejected");
        })?;

        let _guard = self
            .commit_lock
            .lock()
            .map_err(|_| CoreError::LedgerAccess("commit lock poisoned".to_string()))?;
        let now = (self.clock)();

        let mut ctx = TxContext {
            tx: Transaction::begin(self.store.as_ref()),
            invoker,
            now,
            policy: &self.policy,
            containment: self.containment,
            channel: self.channel,
        };

        match op(&mut ctx) {
            Ok(value) => {
                let TxContext { tx, invoker, .. } = ctx;
                let writes = tx.commit()?;
                tracing::info!(
                    channel = %self.channel,
                    operation,
                    asset_id,
                    invoker = %invoker,
                    writes,
                    "Operation committed"
                );
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(
                    channel = %self.channel,
                    operation,
                    asset_id,
                    invoker = %ctx.invoker,
                    error = %e,
                    "Operation rejected"
                );
                Err(e)
            }
        }
    }

    /// Run a read-only query. Queries are not gated by the policy.
    pub fn query<T, F>(&self, query: F) -> Result<T, CoreError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, CoreError>,
    {
        let tx = Transaction::begin(self.store.as_ref());
        query(&tx)
    }

    /// Whether the store answers a single point read.
    pub fn ping(&self) -> Result<(), CoreError> {
        self.store.get(HEALTH_KEY).map(drop)
    }

    /// Re-derive the containment index from stored composites.
    pub fn rebuild_containment_index(&self) -> Result<usize, CoreError> {
        let _guard = self
            .commit_lock
            .lock()
            .map_err(|_| CoreError::LedgerAccess("commit lock poisoned".to_string()))?;
        let mut tx = Transaction::begin(self.store.as_ref());
        let written = ContainmentIndex::rebuild(&mut tx)?;
        tx.commit()?;
        Ok(written)
    }
}
