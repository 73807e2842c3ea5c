use crate::{Client, Response, Result};
use http::Method;
use serde::{Deserialize, Serialize};

/// Category of a domain addresses can be created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum DomainType {
    /// Shared domain available to everyone.
    Public,
    /// Domain provided by the account owner.
    Custom,
    /// Domain reserved for premium plans.
    Premium,
    /// A category this client does not know yet. Never send it.
    #[serde(other)]
    Unknown,
}

/// A domain available for address creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Domain {
    /// Domain name, e.g. `example.com`.
    pub name: String,

    /// Domain category.
    #[serde(rename = "type")]
    pub domain_type: DomainType,
}

#[derive(Deserialize)]
struct ListDomainsBody {
    #[serde(default)]
    domains: Vec<Domain>,
}

impl Client {
    /// Lists the domains available for creating addresses.
    pub async fn list_domains(&self) -> Result<Response<Vec<Domain>>> {
        let request = self.request(Method::GET, "/v1/domains")?;
        let response = self.send_json::<ListDomainsBody>(request).await?;
        Ok(response.map(|body| body.domains))
    }
}
