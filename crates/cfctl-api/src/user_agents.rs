// User-Agent blocking rule endpoints
//
// Zone-scoped: `/zones/{zone_id}/firewall/ua_rules`. Updates replace the
// whole rule with `PUT`.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{DeletedResponse, Page, UaRuleBody, UaRuleResponse};

/// Page size used when listing User-Agent rules.
pub const UA_RULES_PER_PAGE: u32 = 100;

fn ua_rules_path(zone_id: &str) -> String {
    format!("zones/{zone_id}/firewall/ua_rules")
}

impl ApiClient {
    pub async fn list_ua_rules(
        &self,
        zone_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<UaRuleResponse>, Error> {
        self.get_page(&ua_rules_path(zone_id), &[], page, per_page)
            .await
    }

    pub async fn create_ua_rule(
        &self,
        zone_id: &str,
        body: &UaRuleBody,
    ) -> Result<UaRuleResponse, Error> {
        self.post(&ua_rules_path(zone_id), body).await
    }

    /// `PUT /zones/{zone_id}/firewall/ua_rules/{rule_id}`
    pub async fn update_ua_rule(
        &self,
        zone_id: &str,
        rule_id: &str,
        body: &UaRuleBody,
    ) -> Result<UaRuleResponse, Error> {
        self.put(&format!("{}/{rule_id}", ua_rules_path(zone_id)), body)
            .await
    }

    /// Returns the id of the deleted rule.
    pub async fn delete_ua_rule(&self, zone_id: &str, rule_id: &str) -> Result<String, Error> {
        let deleted: DeletedResponse = self
            .delete(&format!("{}/{rule_id}", ua_rules_path(zone_id)))
            .await?;
        Ok(deleted.id)
    }
}
