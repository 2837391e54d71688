pub mod http_resolver;
pub mod traits;

pub use http_resolver::{HttpShortLinkResolver, ResolverOptions};
pub use traits::ResolveError;
