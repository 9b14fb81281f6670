// Zone and account endpoints
//
// Both are account-wide listings rather than zone-scoped collections.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AccountResponse, CreateZoneBody, DeletedResponse, Page, ZoneResponse};

/// Largest page size the zones and accounts endpoints accept.
pub const ZONES_PER_PAGE: u32 = 50;

impl ApiClient {
    /// List zones, optionally filtered by exact name.
    ///
    /// `GET /zones?name=<name>&page=<n>&per_page=<m>`
    pub async fn list_zones(
        &self,
        name: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Page<ZoneResponse>, Error> {
        let params: Vec<(&'static str, String)> =
            name.map(|n| ("name", n.to_owned())).into_iter().collect();
        self.get_page("zones", &params, page, per_page).await
    }

    /// `GET /zones/{zone_id}`
    pub async fn get_zone(&self, zone_id: &str) -> Result<ZoneResponse, Error> {
        self.get(&format!("zones/{zone_id}")).await
    }

    /// `POST /zones`
    pub async fn create_zone(&self, body: &CreateZoneBody) -> Result<ZoneResponse, Error> {
        self.post("zones", body).await
    }

    /// `DELETE /zones/{zone_id}`; returns the id of the deleted zone.
    pub async fn delete_zone(&self, zone_id: &str) -> Result<String, Error> {
        let deleted: DeletedResponse = self.delete(&format!("zones/{zone_id}")).await?;
        Ok(deleted.id)
    }

    /// List the accounts the credentials can see.
    ///
    /// `GET /accounts?page=<n>&per_page=<m>`
    pub async fn list_accounts(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Page<AccountResponse>, Error> {
        debug!(page, "listing accounts");
        self.get_page("accounts", &[], page, per_page).await
    }
}
