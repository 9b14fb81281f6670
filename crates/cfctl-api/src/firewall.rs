// IP access rule endpoints
//
// Rules live under either a zone or an account:
// `/{zones|accounts}/{id}/firewall/access_rules/rules`.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    AccessRuleQuery, AccessRuleResponse, CreateAccessRuleBody, DeletedResponse,
    EditAccessRuleBody, Page, ScopePath,
};

/// Page size used when listing access rules.
pub const ACCESS_RULES_PER_PAGE: u32 = 100;

fn rules_path(scope: ScopePath<'_>) -> String {
    format!("{}/firewall/access_rules/rules", scope.prefix())
}

impl ApiClient {
    pub async fn list_access_rules(
        &self,
        scope: ScopePath<'_>,
        query: &AccessRuleQuery,
        page: u32,
        per_page: u32,
    ) -> Result<Page<AccessRuleResponse>, Error> {
        self.get_page(&rules_path(scope), &query.params(), page, per_page)
            .await
    }

    pub async fn create_access_rule(
        &self,
        scope: ScopePath<'_>,
        body: &CreateAccessRuleBody,
    ) -> Result<AccessRuleResponse, Error> {
        self.post(&rules_path(scope), body).await
    }

    pub async fn edit_access_rule(
        &self,
        scope: ScopePath<'_>,
        rule_id: &str,
        body: &EditAccessRuleBody,
    ) -> Result<AccessRuleResponse, Error> {
        self.patch(&format!("{}/{rule_id}", rules_path(scope)), body)
            .await
    }

    /// Returns the id of the deleted rule.
    pub async fn delete_access_rule(
        &self,
        scope: ScopePath<'_>,
        rule_id: &str,
    ) -> Result<String, Error> {
        let deleted: DeletedResponse = self
            .delete(&format!("{}/{rule_id}", rules_path(scope)))
            .await?;
        Ok(deleted.id)
    }
}
