pub mod gemini;
pub mod http_client;
pub mod scrub;
pub mod traits;

pub use gemini::GeminiTransformer;
pub use http_client::build_transform_client;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{TransformFuture, Transformer};
