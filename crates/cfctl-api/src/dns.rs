// DNS record endpoints
//
// All record operations are zone-scoped: `/zones/{zone_id}/dns_records`.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    CreateDnsRecordBody, DeletedResponse, DnsRecordQuery, DnsRecordResponse, EditDnsRecordBody,
    Page,
};

/// Page size used when listing records.
pub const DNS_RECORDS_PER_PAGE: u32 = 100;

impl ApiClient {
    pub async fn list_dns_records(
        &self,
        zone_id: &str,
        query: &DnsRecordQuery,
        page: u32,
        per_page: u32,
    ) -> Result<Page<DnsRecordResponse>, Error> {
        self.get_page(
            &format!("zones/{zone_id}/dns_records"),
            &query.params(),
            page,
            per_page,
        )
        .await
    }

    pub async fn get_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> Result<DnsRecordResponse, Error> {
        self.get(&format!("zones/{zone_id}/dns_records/{record_id}"))
            .await
    }

    pub async fn create_dns_record(
        &self,
        zone_id: &str,
        body: &CreateDnsRecordBody,
    ) -> Result<DnsRecordResponse, Error> {
        self.post(&format!("zones/{zone_id}/dns_records"), body)
            .await
    }

    /// `PATCH` semantics: fields left `None` keep their remote value.
    pub async fn edit_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        body: &EditDnsRecordBody,
    ) -> Result<DnsRecordResponse, Error> {
        self.patch(&format!("zones/{zone_id}/dns_records/{record_id}"), body)
            .await
    }

    /// Returns the id of the deleted record.
    pub async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<String, Error> {
        let deleted: DeletedResponse = self
            .delete(&format!("zones/{zone_id}/dns_records/{record_id}"))
            .await?;
        Ok(deleted.id)
    }
}
