//! Student: the single resource managed by alumnos.

use crate::id::StudentId;
use crate::time::{self, Timestamp};
use crate::validation::{Field, FieldError, Rule, ValidationErrors};

/// A stored student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub address: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Student {
    /// Merge `changes` into this record. Fields left as `None` keep their
    /// current value. `updated_at` always moves forward.
    pub fn apply(&mut self, changes: StudentChanges) {
        let StudentChanges {
            name,
            address,
            email,
        } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(email) = email {
            self.email = email;
        }
        self.updated_at = time::now();
    }
}

/// A validated student that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub address: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl NewStudent {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            email: email.into(),
            created_at: time::now(),
        }
    }

    /// Attach the store-assigned id.
    #[must_use]
    pub fn with_id(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            address: self.address,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Validated attribute values for a create, replace or merge.
///
/// A `None` field was not supplied (partial merge) or failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

impl StudentChanges {
    /// Turn a complete set of changes into a [`NewStudent`].
    ///
    /// # Errors
    ///
    /// Reports every missing field as [`Rule::Required`].
    pub fn into_new_student(self) -> Result<NewStudent, ValidationErrors> {
        match (self.name, self.address, self.email) {
            (Some(name), Some(address), Some(email)) => Ok(NewStudent::new(name, address, email)),
            (name, address, email) => {
                let mut errors = ValidationErrors::default();
                let missing = [
                    (Field::Name, name.is_none()),
                    (Field::Address, address.is_none()),
                    (Field::Email, email.is_none()),
                ];
                for (field, _) in missing.into_iter().filter(|(_, missing)| *missing) {
                    errors.push(FieldError {
                        field,
                        rule: Rule::Required,
                    });
                }
                Err(errors)
            }
        }
    }
}
