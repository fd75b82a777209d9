//! Field-level validators.
//!
//! Every raw field value coming from the command parser passes through a
//! [`FieldValidator`] before a typed value is built from it. The default rules
//! live here; [`Validators`] lets callers swap the rule for a single field type
//! without touching the others.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::fields::{Amount, Category, Description, Name, RecordDate};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const AMOUNT_CONSTRAINTS: &str =
    "Amount should only contain digits with at most two decimal places, and it should not be blank";
pub const DATE_CONSTRAINTS: &str =
    "Date should be in the format dd/mm/yyyy and must be a valid calendar date";
pub const DESCRIPTION_CONSTRAINTS: &str = "Descriptions can take any value";
pub const CATEGORY_CONSTRAINTS: &str = "Category names should be a single alphanumeric word";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+( [A-Za-z0-9]+)*$").expect("name pattern compiles"));
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("amount pattern compiles"));
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date pattern compiles"));
static CATEGORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("category pattern compiles"));

/// Raised when a raw field value does not satisfy its validator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks a raw, trimmed field value.
pub trait FieldValidator: Send + Sync {
    fn field(&self) -> &'static str;

    fn constraints(&self) -> &str;

    fn is_valid(&self, raw: &str) -> bool;

    fn validate(&self, raw: &str) -> Result<(), ValidationError> {
        if self.is_valid(raw) {
            Ok(())
        } else {
            Err(ValidationError::new(self.field(), self.constraints()))
        }
    }
}

/// Validator driven by an arbitrary regular expression.
pub struct PatternValidator {
    field: &'static str,
    constraints: String,
    pattern: Regex,
}

impl PatternValidator {
    pub fn new(
        field: &'static str,
        constraints: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            field,
            constraints: constraints.into(),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl FieldValidator for PatternValidator {
    fn field(&self) -> &'static str {
        self.field
    }

    fn constraints(&self) -> &str {
        &self.constraints
    }

    fn is_valid(&self, raw: &str) -> bool {
        self.pattern.is_match(raw)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NameValidator;

impl FieldValidator for NameValidator {
    fn field(&self) -> &'static str {
        "name"
    }

    fn constraints(&self) -> &str {
        NAME_CONSTRAINTS
    }

    fn is_valid(&self, raw: &str) -> bool {
        NAME_PATTERN.is_match(raw)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AmountValidator;

impl FieldValidator for AmountValidator {
    fn field(&self) -> &'static str {
        "amount"
    }

    fn constraints(&self) -> &str {
        AMOUNT_CONSTRAINTS
    }

    fn is_valid(&self, raw: &str) -> bool {
        AMOUNT_PATTERN.is_match(raw)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DateValidator;

impl FieldValidator for DateValidator {
    fn field(&self) -> &'static str {
        "date"
    }

    fn constraints(&self) -> &str {
        DATE_CONSTRAINTS
    }

    fn is_valid(&self, raw: &str) -> bool {
        DATE_PATTERN.is_match(raw) && NaiveDate::parse_from_str(raw, DATE_FORMAT).is_ok()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptionValidator;

impl FieldValidator for DescriptionValidator {
    fn field(&self) -> &'static str {
        "description"
    }

    fn constraints(&self) -> &str {
        DESCRIPTION_CONSTRAINTS
    }

    fn is_valid(&self, _raw: &str) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CategoryValidator;

impl FieldValidator for CategoryValidator {
    fn field(&self) -> &'static str {
        "category"
    }

    fn constraints(&self) -> &str {
        CATEGORY_CONSTRAINTS
    }

    fn is_valid(&self, raw: &str) -> bool {
        CATEGORY_PATTERN.is_match(raw)
    }
}

/// One validator per field type, consulted before typed values are built.
pub struct Validators {
    name: Box<dyn FieldValidator>,
    amount: Box<dyn FieldValidator>,
    date: Box<dyn FieldValidator>,
    description: Box<dyn FieldValidator>,
    category: Box<dyn FieldValidator>,
}

impl Default for Validators {
    fn default() -> Self {
        Self {
            name: Box::new(NameValidator),
            amount: Box::new(AmountValidator),
            date: Box::new(DateValidator),
            description: Box::new(DescriptionValidator),
            category: Box::new(CategoryValidator),
        }
    }
}

impl Validators {
    pub fn with_name(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.name = Box::new(validator);
        self
    }

    pub fn with_amount(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.amount = Box::new(validator);
        self
    }

    pub fn with_date(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.date = Box::new(validator);
        self
    }

    pub fn with_description(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.description = Box::new(validator);
        self
    }

    pub fn with_category(mut self, validator: impl FieldValidator + 'static) -> Self {
        self.category = Box::new(validator);
        self
    }

    pub fn name(&self, raw: &str) -> Result<Name, ValidationError> {
        let raw = raw.trim();
        self.name.validate(raw)?;
        Ok(Name::from_validated(raw))
    }

    pub fn amount(&self, raw: &str) -> Result<Amount, ValidationError> {
        let raw = raw.trim();
        self.amount.validate(raw)?;
        Amount::from_validated(raw)
    }

    pub fn date(&self, raw: &str) -> Result<RecordDate, ValidationError> {
        let raw = raw.trim();
        self.date.validate(raw)?;
        RecordDate::from_validated(raw)
    }

    pub fn description(&self, raw: &str) -> Result<Description, ValidationError> {
        let raw = raw.trim();
        self.description.validate(raw)?;
        Ok(Description::new(raw))
    }

    pub fn category(&self, raw: &str) -> Result<Category, ValidationError> {
        let raw = raw.trim();
        self.category.validate(raw)?;
        Ok(Category::from_validated(raw))
    }

    pub fn categories<'a, I>(&self, raw: I) -> Result<BTreeSet<Category>, ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        raw.into_iter().map(|value| self.category(value)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_rules_follow_decimal_format() {
        let validator = AmountValidator;
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid(" "));
        assert!(!validator.is_valid("$1"));
        assert!(!validator.is_valid("1.234"));
        assert!(validator.is_valid("1"));
        assert!(validator.is_valid("123"));
        assert!(validator.is_valid("2147483648.50"));
    }

    #[test]
    fn date_rules_reject_impossible_days() {
        let validator = DateValidator;
        assert!(validator.is_valid("29/02/2024"));
        assert!(!validator.is_valid("29/02/2023"));
        assert!(!validator.is_valid("2024-02-01"));
        assert!(!validator.is_valid("1/2/2024"));
    }

    #[test]
    fn name_and_category_rules() {
        assert!(NameValidator.is_valid("chicken rice"));
        assert!(!NameValidator.is_valid(" leading space"));
        assert!(!NameValidator.is_valid("trailing space "));
        assert!(!NameValidator.is_valid("Chicken  rice"));
        assert!(!NameValidator.is_valid("caf*"));
        assert!(CategoryValidator.is_valid("food"));
        assert!(!CategoryValidator.is_valid("fast food"));
    }

    #[test]
    fn custom_validator_replaces_only_its_field() {
        let strict = PatternValidator::new("name", "Names must be upper case", r"^[A-Z ]+$")
            .expect("pattern compiles");
        let validators = Validators::default().with_name(strict);

        let err = validators.name("lunch").expect_err("lower case rejected");
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Names must be upper case");
        assert!(validators.name("LUNCH").is_ok());
        assert!(validators.amount("4.5").is_ok());
    }

    #[test]
    fn categories_stop_at_first_invalid_value() {
        let validators = Validators::default();
        let parsed = validators
            .categories(["food", "daily", "food"])
            .expect("valid categories");
        assert_eq!(parsed.len(), 2);

        let err = validators
            .categories(["food", "fast food"])
            .expect_err("space rejected");
        assert_eq!(err.message, CATEGORY_CONSTRAINTS);
    }
}
