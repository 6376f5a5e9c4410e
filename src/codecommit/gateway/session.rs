//! Session construction shared by the SDK gateways.

use aws_config::{BehaviorVersion, SdkConfig};
use aws_config::retry::RetryConfig;
use aws_sdk_codecommit::config::Region;

use crate::codecommit::locator::RepositoryLocator;

use super::identity::StsIdentityGateway;
use super::repository::SdkCodeCommitGateway;

/// Authenticated session for one repository.
///
/// The session is created once per process and handed to the gateways that
/// need it. Retries are disabled: a failed call surfaces immediately.
#[derive(Debug, Clone)]
pub struct Session {
    config: SdkConfig,
    locator: RepositoryLocator,
}

impl Session {
    /// Loads credentials from the default provider chain for the locator's
    /// region.
    ///
    /// `endpoint_url` overrides the service endpoint for both the repository
    /// and the identity clients.
    pub async fn connect(locator: RepositoryLocator, endpoint_url: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(locator.region().as_str().to_owned()))
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = endpoint_url {
            tracing::debug!("using endpoint override {endpoint}");
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        Self::from_sdk_config(config, locator)
    }

    /// Wraps an already loaded SDK configuration.
    #[must_use]
    pub const fn from_sdk_config(config: SdkConfig, locator: RepositoryLocator) -> Self {
        Self { config, locator }
    }

    /// Repository this session targets.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    /// Builds the repository gateway.
    #[must_use]
    pub fn codecommit(&self) -> SdkCodeCommitGateway {
        SdkCodeCommitGateway::new(aws_sdk_codecommit::Client::new(&self.config))
    }

    /// Builds the identity gateway.
    #[must_use]
    pub fn identity(&self) -> StsIdentityGateway {
        StsIdentityGateway::new(aws_sdk_sts::Client::new(&self.config))
    }
}
