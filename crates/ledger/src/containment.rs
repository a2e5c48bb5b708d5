//! Which composite, if any, already holds an asset.
//!
//! Two strategies answer the same question. `Scan` walks every composite in
//! the scope and costs O(L·C) per write. `Indexed` keeps one
//! `~contains/<scope>/<asset-id>` entry per contained asset, written in the
//! same transaction as the composite.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use threadline_core::asset_kind::AssetKind;
use threadline_core::composition::ContainmentScope;
use threadline_core::error::CoreError;

use crate::keys::{containment_key, containment_range, is_index_key, prefix_end};
use crate::models::Asset;
use crate::transaction::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainmentMode {
    #[default]
    Scan,
    Indexed,
}

impl FromStr for ContainmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scan" => Ok(Self::Scan),
            "indexed" => Ok(Self::Indexed),
            other => Err(format!(
                "Invalid containment mode '{other}'. Must be one of: scan, indexed"
            )),
        }
    }
}

/// A listed asset that some other composite already holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub asset_id: String,
    pub container_id: String,
}

impl From<Conflict> for CoreError {
    fn from(conflict: Conflict) -> Self {
        CoreError::AssetAlreadyContained {
            id: conflict.asset_id,
            container: conflict.container_id,
        }
    }
}

/// Provides containment lookups and index maintenance.
pub struct ContainmentIndex;

impl ContainmentIndex {
    /// First listed asset already held by a composite other than
    /// `composite_id` within `scope`.
    pub fn find_conflict(
        tx: &Transaction<'_>,
        mode: ContainmentMode,
        scope: ContainmentScope,
        composite_id: &str,
        ids: &[String],
    ) -> Result<Option<Conflict>, CoreError> {
        match mode {
            ContainmentMode::Scan => Self::scan_conflict(tx, scope, composite_id, ids),
            ContainmentMode::Indexed => Self::indexed_conflict(tx, scope, composite_id, ids),
        }
    }

    /// Record that `composite_id` now holds `ids`. A no-op in scan mode.
    pub fn record(
        tx: &mut Transaction<'_>,
        mode: ContainmentMode,
        scope: ContainmentScope,
        composite_id: &str,
        ids: &[String],
    ) {
        if mode == ContainmentMode::Scan {
            return;
        }
        for id in ids {
            tx.put(containment_key(scope, id), composite_id.as_bytes().to_vec());
        }
    }

    /// Re-derive every index entry from the stored composites. Returns the
    /// number of entries written.
    pub fn rebuild(tx: &mut Transaction<'_>) -> Result<usize, CoreError> {
        let mut entries = Vec::new();
        for kind in composite_kinds() {
            let prefix = kind.prefix();
            for entry in tx.range_scan(prefix, &prefix_end(prefix))? {
                let (key, bytes) = entry?;
                let asset = Asset::decode(&key, &bytes)?;
                if let Some((scope, ids)) = asset.constituents() {
                    for id in ids {
                        entries.push((containment_key(scope, id), key.clone()));
                    }
                }
            }
        }
        let written = entries.len();
        for (index_key, composite_id) in entries {
            tx.put(index_key, composite_id.into_bytes());
        }
        tracing::info!(entries = written, "Containment index rebuilt");
        Ok(written)
    }

    /// Index entries currently present for a scope, as (asset, composite).
    pub fn entries(
        tx: &Transaction<'_>,
        scope: ContainmentScope,
    ) -> Result<Vec<(String, String)>, CoreError> {
        let (start, end) = containment_range(scope);
        tx.range_scan(&start, &end)?
            .map(|entry| {
                let (key, bytes) = entry?;
                let asset_id = key[start.len()..].to_string();
                let composite_id = String::from_utf8(bytes)
                    .map_err(|e| CoreError::Serialization(e.to_string()))?;
                Ok((asset_id, composite_id))
            })
            .collect()
    }

    /// One pass over the scope's composites. The conflict reported is the
    /// first in `ids` order, matching the indexed lookup.
    fn scan_conflict(
        tx: &Transaction<'_>,
        scope: ContainmentScope,
        composite_id: &str,
        ids: &[String],
    ) -> Result<Option<Conflict>, CoreError> {
        let candidates: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut holders: HashMap<String, String> = HashMap::new();
        let mut scanned = 0usize;
        for entry in tx.range_scan("", "")? {
            let (key, bytes) = entry?;
            if is_index_key(&key) || key == composite_id {
                continue;
            }
            let in_scope = AssetKind::of_id(&key)
                .and_then(AssetKind::containment_scope)
                .is_some_and(|s| s == scope);
            if !in_scope {
                continue;
            }
            scanned += 1;
            let asset = Asset::decode(&key, &bytes)?;
            if let Some((_, held)) = asset.constituents() {
                for id in held.into_iter().filter(|id| candidates.contains(id)) {
                    holders
                        .entry(id.to_string())
                        .or_insert_with(|| key.clone());
                }
            }
        }
        tracing::debug!(
            scope = scope.as_str(),
            composites_scanned = scanned,
            candidates = ids.len(),
            conflicts = holders.len(),
            "Containment scan finished"
        );
        Ok(ids.iter().find_map(|id| {
            holders.remove(id).map(|container_id| Conflict {
                asset_id: id.clone(),
                container_id,
            })
        }))
    }

    fn indexed_conflict(
        tx: &Transaction<'_>,
        scope: ContainmentScope,
        composite_id: &str,
        ids: &[String],
    ) -> Result<Option<Conflict>, CoreError> {
        for id in ids {
            if let Some(bytes) = tx.get(&containment_key(scope, id))? {
                let holder = String::from_utf8(bytes)
                    .map_err(|e| CoreError::Serialization(e.to_string()))?;
                if holder != composite_id {
                    return Ok(Some(Conflict {
                        asset_id: id.clone(),
                        container_id: holder,
                    }));
                }
            }
        }
        Ok(None)
    }
}

fn composite_kinds() -> impl Iterator<Item = AssetKind> {
    AssetKind::ALL
        .into_iter()
        .filter(|kind| kind.containment_scope().is_some())
}
