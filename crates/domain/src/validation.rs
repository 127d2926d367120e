//! Field validation for student attributes.
//!
//! Every field carries an ordered rule list. Rules are evaluated in order and
//! the first failure is the one reported for that field; later rules are not
//! consulted. Fields are always reported in [`Field::ALL`] order.
//!
//! Uniqueness of the email needs the store, so [`Rule::Unique`] is never
//! evaluated here. The application service appends it to a [`Report`] once
//! the syntactic rules have passed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::student::StudentChanges;

/// Minimum number of characters in a student name.
pub const NAME_MIN_CHARS: usize = 5;

// Dot-atom local part: dots only between non-empty atoms.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("Invalid email regex")
});

/// A validated student attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Address,
    Email,
}

impl Field {
    /// Every field, in reporting order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Address, Self::Email];

    /// Attribute key used on the wire.
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Name => "nombre",
            Self::Address => "direccion",
            Self::Email => "email",
        }
    }

    /// Rules checked for this field, in evaluation order.
    #[must_use]
    pub fn rules(self) -> &'static [Rule] {
        match self {
            Self::Name => &[Rule::Required, Rule::String, Rule::MinChars(NAME_MIN_CHARS)],
            Self::Address => &[Rule::Required, Rule::String],
            Self::Email => &[Rule::Required, Rule::String, Rule::Email, Rule::Unique],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// A single constraint on an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present, not null and not blank.
    Required,
    /// A JSON string rather than a number, bool, array or object.
    String,
    /// At least this many characters (Unicode scalar values).
    MinChars(usize),
    /// Syntactically valid email address.
    Email,
    /// No other student holds this value.
    Unique,
}

impl Rule {
    /// Human readable failure message for `field`.
    #[must_use]
    pub fn message(self, field: Field) -> String {
        match self {
            Self::Required => format!("The {field} field is required."),
            Self::String => format!("The {field} field must be a string."),
            Self::MinChars(min) => format!("The {field} field must be at least {min} characters."),
            Self::Email => format!("The {field} field must be a valid email address."),
            Self::Unique => format!("The {field} has already been taken."),
        }
    }

    fn passes(self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Self::Required, AttributeValue::Text(text)) => !text.trim().is_empty(),
            (Self::Required, AttributeValue::Other) => true,
            (Self::Required, AttributeValue::Absent | AttributeValue::Null) => false,
            (Self::String, value) => !matches!(value, AttributeValue::Other),
            (Self::MinChars(min), AttributeValue::Text(text)) => text.chars().count() >= min,
            (Self::Email, AttributeValue::Text(text)) => EMAIL.is_match(text),
            // Uniqueness is checked against the store by the caller.
            (Self::Unique | Self::MinChars(_) | Self::Email, _) => true,
        }
    }
}

/// Raw attribute value as it arrived in the request document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttributeValue {
    /// The key was not in the document.
    #[default]
    Absent,
    /// The key was present with a `null` value.
    Null,
    /// A string value.
    Text(String),
    /// Any other JSON value (number, bool, array, object).
    Other,
}

impl AttributeValue {
    fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// How absent attributes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every field must be supplied (create and full replace).
    Full,
    /// Only supplied fields are checked (partial merge).
    Partial,
}

/// One failing attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub rule: Rule,
}

impl FieldError {
    #[must_use]
    pub fn message(&self) -> String {
        self.rule.message(self.field)
    }
}

/// Every failing attribute of a request, at most one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} attribute(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether `field` already has a reported failure.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|err| err.field == field)
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        if self.contains(error.field) {
            return;
        }
        self.0.push(error);
        self.0.sort_by_key(|err| err.field);
    }
}

/// Attribute values of an incoming document, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: AttributeValue,
    pub address: AttributeValue,
    pub email: AttributeValue,
}

impl StudentDraft {
    fn value(&self, field: Field) -> &AttributeValue {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::Email => &self.email,
        }
    }

    /// Run the syntactic rules of every relevant field.
    #[must_use]
    pub fn check(&self, mode: Mode) -> Report {
        let mut report = Report::default();
        for field in Field::ALL {
            let value = self.value(field);
            if mode == Mode::Partial && value.is_absent() {
                continue;
            }
            match field.rules().iter().find(|rule| !rule.passes(value)) {
                Some(rule) => report.reject(field, *rule),
                None => {
                    if let AttributeValue::Text(text) = value {
                        report.accept(field, text.clone());
                    }
                }
            }
        }
        report
    }
}

/// Outcome of checking a [`StudentDraft`].
#[derive(Debug, Clone, Default)]
pub struct Report {
    changes: StudentChanges,
    errors: ValidationErrors,
}

impl Report {
    /// The accepted email, if it passed every syntactic rule.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.changes.email.as_deref()
    }

    /// Record a failure for `field`, dropping any value accepted for it.
    pub fn reject(&mut self, field: Field, rule: Rule) {
        match field {
            Field::Name => self.changes.name = None,
            Field::Address => self.changes.address = None,
            Field::Email => self.changes.email = None,
        }
        self.errors.push(FieldError { field, rule });
    }

    fn accept(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.changes.name = Some(value),
            Field::Address => self.changes.address = Some(value),
            Field::Email => self.changes.email = Some(value),
        }
    }

    /// Accepted changes, or every failure when at least one rule failed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when any field was rejected.
    pub fn into_result(self) -> Result<StudentChanges, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.changes)
        } else {
            Err(self.errors)
        }
    }
}
