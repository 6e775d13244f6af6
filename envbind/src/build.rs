use tracing::debug;

use crate::{
    describe::{EnvBind, Shape, TypeDescription},
    error::TypeConfigurationError,
    resolve::FieldSpec,
    value::{Arguments, TypeTag, Value},
};

/// How an instance will be created once its values are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Pass every resolved value, in order, to a constructor with these
    /// parameter types.
    PositionalConstructor(Vec<TypeTag>),
    /// Create a default instance and write each value into its field.
    DefaultThenAssign,
}

/// Picks the construction strategy for `description`.
///
/// Runs before any lookup, so a type that cannot be built fails the same way
/// whatever the environment contains.
pub fn select_strategy(
    description: &TypeDescription,
    specs: &[FieldSpec],
) -> Result<Strategy, TypeConfigurationError> {
    let params: Vec<TypeTag> = specs.iter().map(|spec| spec.tag).collect();

    match &description.shape {
        Shape::Record => {
            if specs.len() != description.fields.len() {
                return Err(TypeConfigurationError::UnboundFields {
                    type_name: description.type_name,
                    bound: specs.len(),
                    total: description.fields.len(),
                });
            }
            Ok(Strategy::PositionalConstructor(params))
        }
        Shape::Class {
            constructor,
            default_constructible,
        } => match constructor {
            Some(signature) if *signature == params => Ok(Strategy::PositionalConstructor(params)),
            _ if *default_constructible => Ok(Strategy::DefaultThenAssign),
            _ => Err(TypeConfigurationError::NoSuitableConstructor {
                type_name: description.type_name,
            }),
        },
    }
}

/// Creates a `T` from values resolved for `specs`, in the same order.
pub fn build<T: EnvBind>(
    strategy: &Strategy,
    specs: &[FieldSpec],
    values: Vec<Value>,
) -> Result<T, TypeConfigurationError> {
    let description = T::description();

    match strategy {
        Strategy::PositionalConstructor(_) => {
            debug!(type_name = description.type_name, "building through constructor");
            T::construct(Arguments::new(values))
        }
        Strategy::DefaultThenAssign => {
            debug!(type_name = description.type_name, "building through field assignment");

            // Refuse before creating anything so no half-assigned instance exists.
            if let Some(spec) = specs
                .iter()
                .find(|spec| {
                    description
                        .fields
                        .get(spec.index)
                        .is_some_and(|field| field.immutable)
                })
            {
                return Err(TypeConfigurationError::ImmutableField {
                    type_name: description.type_name,
                    field: spec.name,
                });
            }

            let mut instance = T::instantiate().ok_or(
                TypeConfigurationError::NoSuitableConstructor {
                    type_name: description.type_name,
                },
            )?;

            for (spec, value) in specs.iter().zip(values) {
                instance.assign(spec.index, value)?;
            }

            Ok(instance)
        }
    }
}
