use std::sync::Arc;

use threadline_contracts::{Contract, TxContext};
use threadline_core::asset_kind::Channel;
use threadline_core::authorization::AccessPolicy;
use threadline_core::error::CoreError;
use threadline_ledger::MemoryLedger;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::identity::HeaderIdentity;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Ledger for orders, plans, and factories.
    pub admin: Arc<Contract>,
    /// Ledger for production assets, lots, and shipping documents.
    pub production: Arc<Contract>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn contract(&self, channel: Channel) -> &Arc<Contract> {
        match channel {
            Channel::Admin => &self.admin,
            Channel::Production => &self.production,
        }
    }

    /// Run `op` as one transaction on `channel` for the caller in `identity`.
    ///
    /// The contract serializes commits behind a blocking lock, so the
    /// submission runs on the blocking pool rather than a runtime worker.
    /// `op` receives the asset id the submission is tagged with.
    pub async fn submit<T, F>(
        &self,
        channel: Channel,
        identity: HeaderIdentity,
        operation: &'static str,
        asset_id: String,
        op: F,
    ) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut TxContext<'_>, &str) -> Result<T, CoreError> + Send + 'static,
    {
        let contract = Arc::clone(self.contract(channel));
        let outcome = tokio::task::spawn_blocking(move || {
            contract.submit(&identity, operation, &asset_id, |ctx| op(ctx, &asset_id))
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Submission task failed: {e}")))?;
        Ok(outcome?)
    }
}

impl AppState {
    /// Build state backed by one fresh in-memory ledger per channel, both
    /// governed by `policy`.
    pub fn in_memory(config: ServerConfig, policy: AccessPolicy) -> Self {
        let policy = Arc::new(policy);
        let mode = config.containment_mode;
        let contract = |channel| {
            Arc::new(Contract::new(
                channel,
                Arc::new(MemoryLedger::new()),
                Arc::clone(&policy),
                mode,
            ))
        };

        Self {
            admin: contract(Channel::Admin),
            production: contract(Channel::Production),
            config: Arc::new(config),
        }
    }
}
