use async_trait::async_trait;

use crate::errors::Result;
use crate::recycle_bin::recycle_bin_model::RecycleBinItem;

/// Trait for recycle bin operations.
///
/// Deletion elsewhere moves records here; restoring hands the original data
/// back to the records store unchanged.
#[async_trait]
pub trait RecycleBinServiceTrait: Send + Sync {
    async fn list_items(&self) -> Result<Vec<RecycleBinItem>>;
    async fn restore_item(&self, item_id: &str) -> Result<()>;
    async fn delete_item_permanently(&self, item_id: &str) -> Result<()>;
    async fn empty_bin(&self) -> Result<()>;
}
