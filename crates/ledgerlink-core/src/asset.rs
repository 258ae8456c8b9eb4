//! Ledger asset record as the contract serializes it.

use serde::{Deserialize, Serialize};

/// One asset as returned by `QueryAllAssets` / `ChangeAssetOwner`.
///
/// Field casing follows the contract's wire form: `Id` and `Holder` are
/// capitalized, `owner` and `station` are not. No `deny_unknown_fields` here
/// so contract-side additions do not break older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Holder")]
    pub holder: String,
    pub owner: String,
    pub station: String,
}
