//! Paths used by the code `#[derive(EnvBind)]` generates.
//!
//! Not meant to be used directly.
pub use crate::describe::{BindingRule, EnvBind, FieldDescription, Shape, TypeDescription};
pub use crate::error::{LoadError, TypeConfigurationError};
pub use crate::loader::{load, load_from, requirements};
pub use crate::lookup::Lookup;
pub use crate::value::{Arguments, BindValue, Kind, TypeTag, Value};
