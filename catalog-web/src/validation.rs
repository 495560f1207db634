//! Form validation pipeline
//!
//! A [`Validator`] holds one rule chain per field, declared in display order.
//! Each chain mixes sanitizers (`trim`, `escape`) and checks (`not_empty`,
//! `positive_int`, ...) and runs them in the order they were added:
//!
//! ```
//! use catalog_web::validation::{FormInput, Validator};
//!
//! let validator = Validator::new()
//!     .field("title", |f| f.trim().not_empty("Title must not be empty.").escape())
//!     .field("price", |f| f.trim().positive_int("Price must be a positive whole number.").escape());
//!
//! let input = FormInput::from_pairs(vec![
//!     ("title".to_string(), "  ".to_string()),
//!     ("price".to_string(), " 15 ".to_string()),
//! ]);
//!
//! let checked = validator.validate(&input);
//! assert!(!checked.is_valid());
//! assert_eq!(checked.errors()[0].message, "Title must not be empty.");
//! assert_eq!(checked.value("price"), "15");
//! ```
//!
//! Checks on a field stop at the first failure, so each field reports at most
//! one message. Sanitizers keep running after a failure: the values handed
//! back for redisplay are always sanitized.

use catalog_common::sanitize;
use serde::Serialize;
use uuid::Uuid;

/// Submitted name/value pairs; a name may repeat (checkbox groups)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    fields: Vec<(String, String)>,
}

impl FormInput {
    pub fn from_pairs(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `name`, in submission order
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// One violation, reported against the field that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
enum Rule {
    Trim,
    Escape,
    NotEmpty(String),
    MaxLength(usize, String),
    PositiveInt(String),
    Identity(String),
}

impl Rule {
    /// Apply a sanitizer in place; checks leave the value alone
    fn sanitize(&self, value: &mut String) {
        match self {
            Rule::Trim => *value = sanitize::trim(value),
            Rule::Escape => *value = sanitize::escape(value),
            _ => {}
        }
    }

    /// Run a check; `Some(message)` on failure, `None` for sanitizers and passes
    fn check(&self, value: &str) -> Option<&str> {
        let ok = match self {
            Rule::Trim | Rule::Escape => return None,
            Rule::NotEmpty(_) => !value.is_empty(),
            Rule::MaxLength(max, _) => value.chars().count() <= *max,
            Rule::PositiveInt(_) => value.parse::<i64>().map(|n| n > 0).unwrap_or(false),
            Rule::Identity(_) => Uuid::parse_str(value).is_ok(),
        };

        if ok {
            None
        } else {
            match self {
                Rule::NotEmpty(msg)
                | Rule::MaxLength(_, msg)
                | Rule::PositiveInt(msg)
                | Rule::Identity(msg) => Some(msg.as_str()),
                Rule::Trim | Rule::Escape => None,
            }
        }
    }
}

/// Ordered rules for one field
#[derive(Debug, Clone)]
pub struct FieldChain {
    field: String,
    rules: Vec<Rule>,
    optional: bool,
}

impl FieldChain {
    fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            rules: Vec::new(),
            optional: false,
        }
    }

    pub fn trim(mut self) -> Self {
        self.rules.push(Rule::Trim);
        self
    }

    pub fn escape(mut self) -> Self {
        self.rules.push(Rule::Escape);
        self
    }

    /// Reject an empty value; a field that was not submitted counts as empty
    pub fn not_empty(mut self, message: &str) -> Self {
        self.rules.push(Rule::NotEmpty(message.to_string()));
        self
    }

    pub fn max_length(mut self, max: usize, message: &str) -> Self {
        self.rules.push(Rule::MaxLength(max, message.to_string()));
        self
    }

    /// Integer >= 1
    pub fn positive_int(mut self, message: &str) -> Self {
        self.rules.push(Rule::PositiveInt(message.to_string()));
        self
    }

    /// Record identity (UUID)
    pub fn identity(mut self, message: &str) -> Self {
        self.rules.push(Rule::Identity(message.to_string()));
        self
    }

    /// Skip checks when the field is absent or every value is empty after sanitizing
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sanitize one value and report the first failing check
    fn run(&self, raw: &str) -> (String, Option<String>) {
        let mut value = raw.to_string();
        let mut failure = None;

        for rule in &self.rules {
            rule.sanitize(&mut value);
            if failure.is_none() {
                failure = rule.check(&value).map(str::to_string);
            }
        }

        (value, failure)
    }
}

/// Outcome of running a [`Validator`]
#[derive(Debug, Clone, Default)]
pub struct Validated {
    values: FormInput,
    errors: Vec<FieldError>,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Record a violation found outside the pipeline (reference checks, uploads)
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Sanitized value of a field, empty when it was not submitted
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).unwrap_or("")
    }

    /// Sanitized values of a repeated field
    pub fn values(&self, field: &str) -> Vec<&str> {
        self.values.get_all(field)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.value(field).parse().ok()
    }

    pub fn identity(&self, field: &str) -> Option<Uuid> {
        Uuid::parse_str(self.value(field)).ok()
    }

    /// Parseable identities of a repeated field, duplicates removed
    pub fn identities(&self, field: &str) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = Vec::new();
        for id in self.values(field).into_iter().filter_map(|v| Uuid::parse_str(v).ok()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

/// Ordered collection of field chains
#[derive(Debug, Clone, Default)]
pub struct Validator {
    chains: Vec<FieldChain>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the rule chain for `name`
    pub fn field(mut self, name: &str, build: impl FnOnce(FieldChain) -> FieldChain) -> Self {
        self.chains.push(build(FieldChain::new(name)));
        self
    }

    /// Run every chain against `input`
    ///
    /// Only declared fields are carried into the result.
    pub fn validate(&self, input: &FormInput) -> Validated {
        let mut result = Validated::default();

        for chain in &self.chains {
            let submitted = input.get_all(&chain.field);
            let mut sanitized = Vec::with_capacity(submitted.len());
            let mut failure = None;

            if submitted.is_empty() {
                // Nothing to echo back, but required checks still apply
                if !chain.optional {
                    failure = chain.run("").1;
                }
            } else {
                for raw in &submitted {
                    let (value, err) = chain.run(raw);
                    if failure.is_none() {
                        failure = err;
                    }
                    sanitized.push(value);
                }
                if chain.optional && sanitized.iter().all(|v| v.is_empty()) {
                    failure = None;
                }
            }

            for value in sanitized {
                result.values.push(chain.field.clone(), value);
            }
            if let Some(message) = failure {
                result.add_error(&chain.field, &message);
            }
        }

        result
    }
}
