/// Network adapters for registry lookups
mod caching_descriptor_repository;
mod maven_central_client;

pub use caching_descriptor_repository::CachingDescriptorRepository;
pub use maven_central_client::{
    MavenCentralRepository, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAVEN_CENTRAL_URL,
};
