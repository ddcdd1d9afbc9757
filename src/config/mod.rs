pub mod schema;

pub use schema::{Config, DefaultsConfig, ExportConfig, SUPPORTED_LOCALES};
