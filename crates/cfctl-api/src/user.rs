// User, edge-network and certificate endpoints
//
// `/ips` is public; `/user` reports on whoever owns the credentials.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{EditUserBody, IpRangesResponse, OriginCaRootResponse, UserResponse};

impl ApiClient {
    /// `GET /user`
    pub async fn get_user(&self) -> Result<UserResponse, Error> {
        self.get("user").await
    }

    /// `PATCH /user`
    pub async fn edit_user(&self, body: &EditUserBody) -> Result<UserResponse, Error> {
        self.patch("user", body).await
    }

    /// `GET /ips`
    pub async fn list_ip_ranges(&self) -> Result<IpRangesResponse, Error> {
        self.get("ips").await
    }

    /// `GET /cert_req?certificate_chain_type=<chain_type>`, where
    /// `chain_type` is `ecc` or `rsa`.
    pub async fn get_origin_ca_root(&self, chain_type: &str) -> Result<OriginCaRootResponse, Error> {
        self.get(&format!("cert_req?certificate_chain_type={chain_type}"))
            .await
    }
}
