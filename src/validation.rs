use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::contact::{ContactDraft, ContactPatch, Field};
use crate::errors::AppError;

pub const MAX_ADDITIONAL_INFO: usize = 5000;
const MAX_EMAIL_LEN: usize = 254;
const MAX_EMAIL_LOCAL_LEN: usize = 64;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum RuleKind {
    Required,
    Format,
    Length,
    Unique,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Violation {
    pub field: Field,
    pub kind: RuleKind,
    pub message: String,
}

impl Violation {
    pub fn taken(field: Field) -> Self {
        Violation {
            field,
            kind: RuleKind::Unique,
            message: field.taken_message(),
        }
    }
}

/// Every violation found on one submission, in rule order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = Vec::new();
        for violation in &self.0 {
            if !fields.contains(&violation.field) {
                fields.push(violation.field);
            }
        }
        fields
    }

    pub fn has(&self, field: Field, kind: RuleKind) -> bool {
        self.0.iter().any(|v| v.field == field && v.kind == kind)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        f.write_str(&messages.join(", "))
    }
}

/// Input that went through [`Validator`]. The store only accepts this wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Complete,
    Partial,
}

struct FieldRule {
    field: Field,
    kind: RuleKind,
    message: &'static str,
    check: fn(&Validator, &str) -> bool,
}

// Format checks pass on a blank value so a blank field only reports `Required`.
const RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::FirstName,
        kind: RuleKind::Required,
        message: "First name cannot be empty",
        check: |_, v| is_present(v),
    },
    FieldRule {
        field: Field::FirstName,
        kind: RuleKind::Format,
        message: "First name can only contain letters and spaces",
        check: |validator, v| validator.name.is_match(v),
    },
    FieldRule {
        field: Field::LastName,
        kind: RuleKind::Required,
        message: "Last name cannot be empty",
        check: |_, v| is_present(v),
    },
    FieldRule {
        field: Field::LastName,
        kind: RuleKind::Format,
        message: "Last name can only contain letters and spaces",
        check: |validator, v| validator.name.is_match(v),
    },
    FieldRule {
        field: Field::Email,
        kind: RuleKind::Required,
        message: "Email cannot be empty",
        check: |_, v| is_present(v),
    },
    FieldRule {
        field: Field::Email,
        kind: RuleKind::Format,
        message: "Please enter a valid email address",
        check: |validator, v| !is_present(v) || validator.is_email(v),
    },
    FieldRule {
        field: Field::Phone,
        kind: RuleKind::Required,
        message: "Phone number cannot be empty",
        check: |_, v| is_present(v),
    },
    FieldRule {
        field: Field::Phone,
        kind: RuleKind::Format,
        message: "Phone number format is invalid. It should be between 9 and 15 digits and may include '-' or '+'",
        check: |validator, v| !is_present(v) || validator.phone.is_match(v),
    },
    FieldRule {
        field: Field::AdditionalInfo,
        kind: RuleKind::Length,
        message: "Additional information must not exceed 5000 characters",
        check: |_, v| v.chars().count() <= MAX_ADDITIONAL_INFO,
    },
];

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Field rule engine. Holds the compiled patterns; checking is pure.
#[derive(Debug, Clone)]
pub struct Validator {
    name: Regex,
    phone: Regex,
    email_local: Regex,
    domain_label: Regex,
}

impl Validator {
    pub fn new() -> Result<Self, AppError> {
        Ok(Validator {
            name: Regex::new(r"^[a-zA-Z\s]*$")?,
            phone: Regex::new(r"^[0-9\-+]{9,15}$")?,
            email_local: Regex::new(
                r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$",
            )?,
            domain_label: Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$")?,
        })
    }

    /// Checks a full record for create. Missing required fields are violations.
    pub fn validate_draft(
        &self,
        draft: ContactDraft,
    ) -> Result<Validated<ContactDraft>, ValidationErrors> {
        self.run(Mode::Complete, |field| draft.value_of(field))?;
        Ok(Validated(draft))
    }

    /// Checks only the fields the patch supplies.
    pub fn validate_patch(
        &self,
        patch: ContactPatch,
    ) -> Result<Validated<ContactPatch>, ValidationErrors> {
        self.run(Mode::Partial, |field| patch.value_of(field))?;
        Ok(Validated(patch))
    }

    fn run<'a, F>(&self, mode: Mode, value_of: F) -> Result<(), ValidationErrors>
    where
        F: Fn(Field) -> Option<&'a str>,
    {
        let mut violations = Vec::new();

        for rule in RULES {
            match value_of(rule.field) {
                Some(value) => {
                    if !(rule.check)(self, value) {
                        violations.push(Violation {
                            field: rule.field,
                            kind: rule.kind,
                            message: rule.message.to_string(),
                        });
                    }
                }
                None if mode == Mode::Complete && rule.kind == RuleKind::Required => {
                    violations.push(Violation {
                        field: rule.field,
                        kind: RuleKind::Required,
                        message: format!("{} is required", rule.field.label()),
                    });
                }
                None => {}
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }

    pub fn is_email(&self, email: &str) -> bool {
        if email.len() > MAX_EMAIL_LEN {
            return false;
        }

        let Some((local, domain)) = email.rsplit_once('@') else {
            return false;
        };

        if local.is_empty()
            || local.len() > MAX_EMAIL_LOCAL_LEN
            || !self.email_local.is_match(local)
        {
            return false;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        let labels_ok = labels
            .iter()
            .all(|label| label.len() <= 63 && self.domain_label.is_match(label));
        if labels.len() < 2 || !labels_ok {
            return false;
        }

        // Top level domain: at least two characters and not purely numeric
        let tld = labels[labels.len() - 1];
        tld.len() >= 2 && !tld.chars().all(|c| c.is_ascii_digit())
    }
}
