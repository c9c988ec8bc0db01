//! Tracing setup for the binary.
//!
//! The subscriber is installed before the definition file is read, using
//! [`DEFAULT_LEVEL`]; once the file is loaded its `[logging] level` is applied
//! through the returned [`FilterHandle`]. `RUST_LOG` takes precedence over
//! both.

use tracing::Subscriber;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Level used until the definition file has been read.
pub const DEFAULT_LEVEL: &str = "info";

/// Handle for swapping the active filter.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Filter directives: a non-empty environment value wins over `level`.
pub fn directives(env: Option<&str>, level: &str) -> String {
    match env.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_owned(),
        _ => level.to_owned(),
    }
}

/// Build a filter from `RUST_LOG`, falling back to `level`.
pub fn filter_for(level: &str) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::new(directives(env.as_deref(), level))
}

/// A stderr subscriber whose filter can be replaced later.
pub fn reloadable_subscriber(
    filter: EnvFilter,
) -> (impl Subscriber + Send + Sync + 'static, FilterHandle) {
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));
    (subscriber, handle)
}

/// Install the global subscriber at [`DEFAULT_LEVEL`].
pub fn init() -> FilterHandle {
    let (subscriber, handle) = reloadable_subscriber(filter_for(DEFAULT_LEVEL));
    subscriber.init();
    handle
}
