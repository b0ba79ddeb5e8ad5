//! Shared fixtures for unit tests.

use crate::classifier::group;
use crate::config::TrustConfig;
use crate::handlers::ResourceGroup;
use crate::hub::ApiClients;
use crate::transport::InMemoryTransport;
use std::sync::Arc;

pub const HUB: &str = "http://hub.test";
pub const CODE: &str = "http://code.test";

pub fn test_config() -> TrustConfig {
    let mut config = TrustConfig::default();
    config.hub.base_url = HUB.into();
    config.code_host.api_base_url = CODE.into();
    config
}

/// A resource group over `urls`, backed by an empty in-memory transport.
pub fn fixture(urls: &[&str]) -> (Arc<InMemoryTransport>, ResourceGroup) {
    let transport = Arc::new(InMemoryTransport::new());
    let clients = ApiClients::new(transport.clone(), &test_config());
    let resources = ResourceGroup::build(&group(urls.iter().copied()), &clients);
    (transport, resources)
}
