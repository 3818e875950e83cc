//! Caller identity lookup.

use aws_sdk_sts as sts;

use super::query_fault;
use crate::topology::fault::ProviderFault;

pub struct StsService {
    client: sts::Client,
}

impl StsService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: sts::Client::new(config),
        }
    }

    pub async fn account_id(&self) -> Result<Option<String>, ProviderFault> {
        let response = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| query_fault("GetCallerIdentity", e))?;
        Ok(response.account)
    }
}
