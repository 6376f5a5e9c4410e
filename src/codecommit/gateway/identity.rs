//! Caller identity resolution through STS.

use async_trait::async_trait;
use aws_sdk_sts::Client;

use crate::codecommit::error::AdapterError;
use crate::codecommit::models::CallerIdentity;

use super::IdentityGateway;
use super::error_mapping::map_sdk_error;

/// Gateway backed by the STS SDK client.
#[derive(Debug, Clone)]
pub struct StsIdentityGateway {
    client: Client,
}

impl StsIdentityGateway {
    /// Creates a new gateway from an SDK client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityGateway for StsIdentityGateway {
    async fn caller_identity(&self) -> Result<CallerIdentity, AdapterError> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|error| map_sdk_error("get caller identity", "current session", &error))?;

        let arn = output.arn().ok_or_else(|| AdapterError::Resolution {
            subject: "caller identity".to_owned(),
            message: "the service reported no ARN".to_owned(),
        })?;

        Ok(CallerIdentity {
            arn: arn.to_owned(),
            account: output.account().map(str::to_owned),
        })
    }
}
