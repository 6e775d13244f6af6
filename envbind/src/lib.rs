//! Bind environment variables onto strongly typed structs.
//!
//! Each bound field lists the keys to try in order, whether it is required,
//! whether blank values count, and an optional fallback literal. Loading
//! resolves every field, reports all failures at once, and then builds the
//! value through a constructor or by assigning fields of a default instance.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use envbind::EnvBind;
//!
//! #[derive(EnvBind, Debug)]
//! pub struct Config {
//!     #[env(from = "DATABASE_URL", from = "DB_URL")]
//!     database_url: String,
//!     #[env(from = "PORT", fallback = "8080")]
//!     port: u16,
//!     #[env(from = "LOG_LEVEL", required = false)]
//!     log_level: Option<String>,
//! }
//!
//! let env = HashMap::from([("DB_URL".to_owned(), "postgres://localhost".to_owned())]);
//! let config = Config::from_lookup(&env).unwrap();
//!
//! assert_eq!(config.database_url, "postgres://localhost");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.log_level, None);
//! ```
mod aggregate;
mod build;
mod coerce;
mod describe;
mod error;
mod loader;
mod lookup;
mod resolve;
mod value;

#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

pub use aggregate::{BindingReport, aggregate};
pub use build::{Strategy, build, select_strategy};
pub use coerce::coerce;
pub use describe::{BindingRule, EnvBind, FieldDescription, Shape, TypeDescription};
pub use envbind_derive::EnvBind;
pub use error::{
    CandidateError, CoercionError, InvalidEnvironmentError, LoadError, TypeConfigurationError,
    ValidationError,
};
pub use loader::{Loader, get_int, get_long, get_string, load, load_from, requirements};
pub use lookup::{Lookup, ProcessEnv};
pub use resolve::{CandidateOutcome, FALLBACK_KEY, FieldResolution, FieldSpec, resolve};
pub use value::{Arguments, BindValue, Kind, TypeTag, Value};
