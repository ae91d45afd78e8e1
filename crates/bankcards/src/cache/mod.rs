mod invalidation;
mod store;

pub use self::invalidation::CacheInvalidationPolicy;
pub use self::store::CacheStore;
