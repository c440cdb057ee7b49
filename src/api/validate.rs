//! Request body validation.
//!
//! Each entry point takes the raw JSON body and returns either a typed record or
//! a single `ApiError::ValidationError` carrying every field problem found.
//! Unknown keys and read-only keys (`id`, `created_at`, `updated_at`) are ignored.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::database::models::{ProductChanges, ProductDraft};
use crate::error::{ApiError, FieldErrors};

pub const NAME_MAX_LENGTH: usize = 255;
pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PRICE_DECIMAL_PLACES: u32 = 2;
pub const PRICE_MAX_DIGITS: usize = 10;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_NUMBER: &str = "A valid number is required.";

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of POST /products/
pub fn validate_product_create(body: &Value) -> Result<ProductDraft, ApiError> {
    let mut v = Validator::new(body)?;
    let name = v.required("name", parse_name);
    let description = v.nullable("description", parse_text);
    let price = v.required("price", parse_price);
    v.finish()?;

    match (name, price) {
        (Some(name), Some(price)) => Ok(ProductDraft {
            name,
            description: description.flatten(),
            price,
        }),
        _ => Err(ApiError::internal_server_error("validation produced no value")),
    }
}

/// Body of PUT /products/{id}/: name and price must be supplied
pub fn validate_product_replace(body: &Value) -> Result<ProductChanges, ApiError> {
    let mut v = Validator::new(body)?;
    let changes = ProductChanges {
        name: v.required("name", parse_name),
        description: v.nullable("description", parse_text),
        price: v.required("price", parse_price),
    };
    v.finish()?;
    Ok(changes)
}

/// Body of PATCH /products/{id}/: any subset of fields
pub fn validate_product_patch(body: &Value) -> Result<ProductChanges, ApiError> {
    let mut v = Validator::new(body)?;
    let changes = ProductChanges {
        name: v.optional("name", parse_name),
        description: v.nullable("description", parse_text),
        price: v.optional("price", parse_price),
    };
    v.finish()?;
    Ok(changes)
}

pub fn validate_signup(body: &Value) -> Result<SignupInput, ApiError> {
    let mut v = Validator::new(body)?;
    let username = v.required("username", parse_username);
    let password = v.required("password", parse_secret);
    v.finish()?;

    match (username, password) {
        (Some(username), Some(password)) => Ok(SignupInput { username, password }),
        _ => Err(ApiError::internal_server_error("validation produced no value")),
    }
}

pub fn validate_credentials(body: &Value) -> Result<Credentials, ApiError> {
    let mut v = Validator::new(body)?;
    let username = v.required("username", parse_login_name);
    let password = v.required("password", parse_secret);
    v.finish()?;

    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        _ => Err(ApiError::internal_server_error("validation produced no value")),
    }
}

/// Body of POST /auth/token/refresh/
pub fn validate_refresh(body: &Value) -> Result<String, ApiError> {
    let mut v = Validator::new(body)?;
    let refresh = v.required("refresh", parse_secret);
    v.finish()?;
    refresh.ok_or_else(|| ApiError::internal_server_error("validation produced no value"))
}

/// Walks one JSON object, collecting per-field errors
struct Validator<'a> {
    object: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> Validator<'a> {
    fn new(body: &'a Value) -> Result<Self, ApiError> {
        let object = body
            .as_object()
            .ok_or_else(|| ApiError::invalid_json("Expected a JSON object"))?;
        Ok(Self {
            object,
            errors: FieldErrors::new(),
        })
    }

    fn required<T>(&mut self, key: &str, parse: fn(&Value) -> Result<T, String>) -> Option<T> {
        match self.object.get(key) {
            None => self.reject(key, REQUIRED),
            Some(Value::Null) => self.reject(key, NOT_NULL),
            Some(value) => self.parse(key, value, parse),
        }
    }

    fn optional<T>(&mut self, key: &str, parse: fn(&Value) -> Result<T, String>) -> Option<T> {
        match self.object.get(key) {
            None => None,
            Some(Value::Null) => self.reject(key, NOT_NULL),
            Some(value) => self.parse(key, value, parse),
        }
    }

    /// Absent -> `None`, explicit null -> `Some(None)`
    fn nullable<T>(&mut self, key: &str, parse: fn(&Value) -> Result<T, String>) -> Option<Option<T>> {
        match self.object.get(key) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => self.parse(key, value, parse).map(Some),
        }
    }

    fn parse<T>(&mut self, key: &str, value: &Value, parse: fn(&Value) -> Result<T, String>) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(problem) => self.reject(key, problem),
        }
    }

    fn reject<T>(&mut self, key: &str, problem: impl Into<String>) -> Option<T> {
        self.errors.insert(key.to_string(), problem.into());
        None
    }

    fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid input", Some(self.errors)))
        }
    }
}

fn parse_text(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| NOT_STRING.to_string())
}

fn parse_bounded(value: &Value, max_length: usize) -> Result<String, String> {
    let text = parse_text(value)?;
    if text.is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    if text.chars().count() > max_length {
        return Err(format!("Ensure this field has no more than {} characters.", max_length));
    }
    Ok(text)
}

fn parse_name(value: &Value) -> Result<String, String> {
    parse_bounded(value, NAME_MAX_LENGTH)
}

fn parse_username(value: &Value) -> Result<String, String> {
    let username = parse_bounded(value, USERNAME_MAX_LENGTH)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !username.chars().all(allowed) {
        return Err(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .to_string(),
        );
    }
    Ok(username)
}

/// Trimmed like signup so the stored name matches; no format rules on lookup
fn parse_login_name(value: &Value) -> Result<String, String> {
    parse_secret(value).map(|name| name.trim().to_string())
}

/// Passwords and tokens are taken verbatim, only checked for blankness
fn parse_secret(value: &Value) -> Result<String, String> {
    let text = value.as_str().ok_or_else(|| NOT_STRING.to_string())?;
    if text.trim().is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    Ok(text.to_string())
}

fn parse_price(value: &Value) -> Result<Decimal, String> {
    let raw = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(NOT_NUMBER.to_string()),
    };

    let price = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| NOT_NUMBER.to_string())?;

    if price.scale() > PRICE_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        ));
    }

    let whole_digits_allowed = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES as usize;
    let whole = price.abs().trunc();
    let whole_digits = if whole.is_zero() { 0 } else { whole.to_string().len() };
    if whole_digits > whole_digits_allowed {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            whole_digits_allowed
        ));
    }

    let mut price = price;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}
