use tracing::trace;

use crate::{
    coerce::coerce,
    describe::BindingRule,
    error::{CandidateError, ValidationError},
    lookup::Lookup,
    value::{TypeTag, Value},
};

/// Pseudo-key under which the fallback literal is reported.
pub const FALLBACK_KEY: &str = "@fallback";

/// Binding rules for one field, derived from its type description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Position of the field among all of the type's fields.
    pub index: usize,
    pub name: &'static str,
    pub tag: TypeTag,
    keys: Vec<String>,
    pub required: bool,
    pub allow_blank: bool,
    pub fallback: Option<String>,
}

impl FieldSpec {
    /// A spec for the field at `index` bound by `rule`, or `None` when the rule
    /// has no keys.
    pub fn new(index: usize, name: &'static str, tag: TypeTag, rule: &BindingRule) -> Option<Self> {
        if rule.keys.is_empty() {
            return None;
        }

        Some(Self {
            index,
            name,
            tag,
            keys: rule.keys.clone(),
            required: rule.required,
            allow_blank: rule.allow_blank,
            fallback: rule.fallback.clone(),
        })
    }

    /// Keys to try, in order. Never empty.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// The result of trying a single key.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateOutcome {
    pub key: String,
    /// Whether the lookup returned anything for `key`.
    pub present: bool,
    pub result: Result<Value, CandidateError>,
}

impl CandidateOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&CandidateError> {
        self.result.as_ref().err()
    }
}

/// Every candidate tried for one field, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResolution {
    required: bool,
    outcomes: Vec<CandidateOutcome>,
}

impl FieldResolution {
    pub fn outcomes(&self) -> &[CandidateOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &CandidateError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.error().map(|err| (outcome.key.as_str(), err)))
    }

    pub fn has_success(&self) -> bool {
        self.outcomes.iter().any(CandidateOutcome::is_ok)
    }

    pub fn is_satisfied(&self) -> bool {
        !self.required || self.has_success()
    }

    pub fn used_fallback(&self) -> bool {
        self.outcomes
            .last()
            .is_some_and(|outcome| outcome.key == FALLBACK_KEY)
    }

    /// The first successful value, or [`Value::Null`] when nothing resolved.
    pub fn into_value(self) -> Value {
        self.outcomes
            .into_iter()
            .find_map(|outcome| outcome.result.ok())
            .unwrap_or(Value::Null)
    }
}

/// Tries every key of `spec` against `lookup`, then the fallback literal if
/// nothing succeeded. Never fails: an unsatisfied field is reported through
/// [`FieldResolution::is_satisfied`].
pub fn resolve<L: Lookup + ?Sized>(spec: &FieldSpec, lookup: &L) -> FieldResolution {
    let mut outcomes = Vec::with_capacity(spec.keys.len() + 1);

    for key in &spec.keys {
        let raw = lookup.lookup(key);
        outcomes.push(attempt(spec, key, raw.as_deref()));
    }

    if !outcomes.iter().any(CandidateOutcome::is_ok) {
        if let Some(fallback) = &spec.fallback {
            outcomes.push(attempt(spec, FALLBACK_KEY, Some(fallback)));
        }
    }

    FieldResolution {
        required: spec.required,
        outcomes,
    }
}

fn attempt(spec: &FieldSpec, key: &str, raw: Option<&str>) -> CandidateOutcome {
    let result = validate(raw, spec.allow_blank)
        .map_err(CandidateError::from)
        .and_then(|raw| coerce(Some(raw), spec.tag).map_err(CandidateError::from));

    match &result {
        Ok(_) => trace!(field = spec.name, key, "candidate resolved"),
        Err(err) => trace!(
            field = spec.name,
            key,
            validation = err.is_validation(),
            "candidate rejected: {err}"
        ),
    }

    CandidateOutcome {
        key: key.to_owned(),
        present: raw.is_some(),
        result,
    }
}

fn validate(raw: Option<&str>, allow_blank: bool) -> Result<&str, ValidationError> {
    let raw = raw.ok_or(ValidationError::Missing)?;

    if !allow_blank && raw.chars().all(char::is_whitespace) {
        return Err(ValidationError::Blank);
    }

    Ok(raw)
}
