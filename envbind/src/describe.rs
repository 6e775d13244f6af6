//! The contract between a bindable type and the loader.
//!
//! A type describes its fields once through [`EnvBind::description`] and
//! exposes the hooks the builder needs to create it. `#[derive(EnvBind)]`
//! writes all of this; implementing it by hand is supported but every hook
//! has to agree with the description.

use crate::{
    error::TypeConfigurationError,
    resolve::FieldSpec,
    value::{Arguments, TypeTag, Value},
};

/// How a type is bound to the environment, as declared on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRule {
    pub keys: Vec<String>,
    pub required: bool,
    pub allow_blank: bool,
    pub fallback: Option<String>,
}

impl BindingRule {
    /// A required, non-blank binding to `keys`.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            required: true,
            allow_blank: false,
            fallback: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn allow_blank(mut self, allow_blank: bool) -> Self {
        self.allow_blank = allow_blank;
        self
    }

    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// One structural field of a type, bound or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    pub name: &'static str,
    pub tag: TypeTag,
    /// Fixed at construction: only a positional constructor may set it.
    pub immutable: bool,
    pub binding: Option<BindingRule>,
}

/// How instances of a type can be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Created only through its canonical all-fields constructor. Every field
    /// must be bound.
    Record,
    /// Created through a constructor taking the bound fields, or through a
    /// no-argument constructor followed by field assignment.
    Class {
        /// Parameter types of the positional constructor, if there is one.
        constructor: Option<Vec<TypeTag>>,
        default_constructible: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescription {
    pub type_name: &'static str,
    pub shape: Shape,
    pub fields: Vec<FieldDescription>,
}

impl TypeDescription {
    /// Field specs for every bound field, in declaration order.
    pub fn field_specs(&self) -> Result<Vec<FieldSpec>, TypeConfigurationError> {
        self.fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| field.binding.as_ref().map(|rule| (index, field, rule)))
            .map(|(index, field, rule)| {
                FieldSpec::new(index, field.name, field.tag, rule).ok_or(
                    TypeConfigurationError::EmptyCandidateKeys {
                        type_name: self.type_name,
                        field: field.name,
                    },
                )
            })
            .collect()
    }
}

/// A type that can be loaded from the environment.
pub trait EnvBind: Sized {
    fn description() -> &'static TypeDescription;

    /// Builds the value through its positional constructor. `args` holds one
    /// value per bound field, in declaration order.
    fn construct(args: Arguments) -> Result<Self, TypeConfigurationError>;

    /// The no-argument constructor, if the type has one.
    fn instantiate() -> Option<Self>;

    /// Writes `value` into the field at `index` without going through the
    /// constructor.
    fn assign(&mut self, index: usize, value: Value) -> Result<(), TypeConfigurationError>;
}
