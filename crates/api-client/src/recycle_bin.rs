//! Recycle bin endpoints.

use async_trait::async_trait;
use log::info;
use masjid_core::errors::Result;
use masjid_core::recycle_bin::{RecycleBinItem, RecycleBinServiceTrait};

use crate::client::MasjidApiClient;

fn item_path(item_id: &str) -> String {
    format!("/recycle-bin/{}", urlencoding::encode(item_id))
}

#[async_trait]
impl RecycleBinServiceTrait for MasjidApiClient {
    async fn list_items(&self) -> Result<Vec<RecycleBinItem>> {
        self.get("/recycle-bin").await
    }

    async fn restore_item(&self, item_id: &str) -> Result<()> {
        self.post_empty(&format!("{}/restore", item_path(item_id)))
            .await?;
        info!("Restored recycle bin item {}", item_id);
        Ok(())
    }

    async fn delete_item_permanently(&self, item_id: &str) -> Result<()> {
        self.delete(&item_path(item_id)).await?;
        info!("Permanently deleted recycle bin item {}", item_id);
        Ok(())
    }

    async fn empty_bin(&self) -> Result<()> {
        self.delete("/recycle-bin").await?;
        info!("Emptied recycle bin");
        Ok(())
    }
}
