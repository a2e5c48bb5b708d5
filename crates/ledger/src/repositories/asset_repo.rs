//! Reads and writes of asset records.

use threadline_core::asset_kind::AssetKind;
use threadline_core::error::CoreError;

use crate::keys::{is_index_key, prefix_end};
use crate::models::{Asset, Record};
use crate::transaction::Transaction;

/// Provides lookup, listing, and persistence of asset records.
pub struct AssetRepo;

impl AssetRepo {
    /// Find any asset by ID.
    pub fn find(tx: &Transaction<'_>, id: &str) -> Result<Option<Asset>, CoreError> {
        match Self::record_bytes(tx, id)? {
            Some(bytes) => Asset::decode(id, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Find an asset by ID, failing with `NotFound` when absent.
    pub fn get(tx: &Transaction<'_>, id: &str) -> Result<Asset, CoreError> {
        Self::find(tx, id)?.ok_or_else(|| CoreError::NotFound {
            entity: AssetKind::of_id(id).map_or("Asset", AssetKind::label),
            id: id.to_string(),
        })
    }

    /// Find a record of a known type.
    pub fn find_as<R: Record>(tx: &Transaction<'_>, id: &str) -> Result<Option<R>, CoreError> {
        match Self::record_bytes(tx, id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn get_as<R: Record>(tx: &Transaction<'_>, id: &str) -> Result<R, CoreError> {
        Self::find_as(tx, id)?.ok_or_else(|| CoreError::NotFound {
            entity: R::KIND.label(),
            id: id.to_string(),
        })
    }

    pub fn exists(tx: &Transaction<'_>, id: &str) -> Result<bool, CoreError> {
        Ok(Self::record_bytes(tx, id)?.is_some())
    }

    /// Stored bytes under `id`; index entries are never records.
    fn record_bytes(tx: &Transaction<'_>, id: &str) -> Result<Option<Vec<u8>>, CoreError> {
        if is_index_key(id) {
            return Ok(None);
        }
        tx.get(id)
    }

    /// Stage a record write under its ID.
    pub fn save<R: Record>(tx: &mut Transaction<'_>, record: &R) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec(record)?;
        tx.put(record.id(), bytes);
        Ok(())
    }

    pub fn save_asset(tx: &mut Transaction<'_>, asset: &Asset) -> Result<(), CoreError> {
        let bytes = asset.encode()?;
        tx.put(asset.id(), bytes);
        Ok(())
    }

    /// Every asset in key order. Index entries are skipped.
    pub fn list(tx: &Transaction<'_>) -> Result<Vec<Asset>, CoreError> {
        let mut assets = Vec::new();
        for entry in tx.range_scan("", "")? {
            let (key, bytes) = entry?;
            if is_index_key(&key) {
                continue;
            }
            assets.push(Asset::decode(&key, &bytes)?);
        }
        Ok(assets)
    }

    /// Every asset of one kind, using the kind's key range.
    pub fn list_of_kind(tx: &Transaction<'_>, kind: AssetKind) -> Result<Vec<Asset>, CoreError> {
        let prefix = kind.prefix();
        tx.range_scan(prefix, &prefix_end(prefix))?
            .map(|entry| {
                let (key, bytes) = entry?;
                Asset::decode(&key, &bytes)
            })
            .collect()
    }

    pub fn count(tx: &Transaction<'_>) -> Result<usize, CoreError> {
        let mut count = 0;
        for entry in tx.range_scan("", "")? {
            let (key, _) = entry?;
            if !is_index_key(&key) {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn count_of_kind(tx: &Transaction<'_>, kind: AssetKind) -> Result<usize, CoreError> {
        let prefix = kind.prefix();
        let mut count = 0;
        for entry in tx.range_scan(prefix, &prefix_end(prefix))? {
            entry?;
            count += 1;
        }
        Ok(count)
    }

    /// Number of lots wrapping assets of `kind`.
    pub fn count_lots_of_kind(tx: &Transaction<'_>, kind: AssetKind) -> Result<usize, CoreError> {
        let mut count = 0;
        for asset in Self::list_of_kind(tx, AssetKind::Lot)? {
            if let Asset::Lot(lot) = asset {
                if lot.asset_id_prefix == kind.prefix() {
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}
