// Page rule endpoints
//
// `/zones/{zone_id}/pagerules` returns every rule in one response.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::PageRuleResponse;

impl ApiClient {
    /// `GET /zones/{zone_id}/pagerules`
    pub async fn list_page_rules(&self, zone_id: &str) -> Result<Vec<PageRuleResponse>, Error> {
        self.get(&format!("zones/{zone_id}/pagerules")).await
    }
}
