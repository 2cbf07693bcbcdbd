//! Input validation for order forms.
//!
//! Every rule runs on every submission; the caller gets either a validated
//! [`OrderInput`] or the full set of field errors, never a mix.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::i18n::{message, Language, Message};
use crate::types::{OrderForm, OrderInput, TransportMode};

pub const PHONE_DIGITS: usize = 10;
pub const ORDER_ID_LEN: usize = 13;

lazy_static! {
    /// Six digits, first digit non-zero.
    static ref PINCODE: Regex = Regex::new(r"^[1-9][0-9]{5}$").unwrap();
}

/// Form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    TransportMode,
    PhoneNumber,
    UserOrderId,
    OriginState,
    OriginCity,
    OriginPincode,
    DestState,
    DestCity,
    DestPincode,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransportMode => "transportMode",
            Self::PhoneNumber => "phoneNumber",
            Self::UserOrderId => "userOrderId",
            Self::OriginState => "originState",
            Self::OriginCity => "originCity",
            Self::OriginPincode => "originPincode",
            Self::DestState => "destState",
            Self::DestCity => "destCity",
            Self::DestPincode => "destPincode",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    InvalidFormat,
    InvalidLength,
    Required,
}

/// One failed rule, with its message already localized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

/// Field name to error. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(f, e)| (*f, e))
    }

    fn insert(&mut self, field: Field, kind: ValidationErrorKind, key: Message, lang: Language) {
        self.0.insert(
            field,
            FieldError {
                kind,
                message: message(key, lang).to_string(),
            },
        );
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(Field::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

/// Whether `pincode` is six digits with a non-zero first digit.
pub fn is_valid_pincode(pincode: &str) -> bool {
    PINCODE.is_match(pincode)
}

/// Strip spaces and dashes from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != '-')
        .collect()
}

/// Trim and upper-case an order id.
pub fn normalize_order_id(order_id: &str) -> String {
    order_id.trim().to_uppercase()
}

/// Validate a raw form.
pub fn validate(form: &OrderForm, lang: Language) -> Result<OrderInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    let mode = match form.transport_mode.parse::<TransportMode>() {
        Ok(mode) => Some(mode),
        Err(_) => {
            errors.insert(
                Field::TransportMode,
                ValidationErrorKind::InvalidFormat,
                Message::InvalidTransportMode,
                lang,
            );
            None
        }
    };

    let phone = normalize_phone(&form.phone_number);
    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert(
            Field::PhoneNumber,
            ValidationErrorKind::InvalidLength,
            Message::InvalidPhone,
            lang,
        );
    }

    let order_id = normalize_order_id(&form.user_order_id);
    if order_id.chars().count() != ORDER_ID_LEN {
        errors.insert(
            Field::UserOrderId,
            ValidationErrorKind::InvalidLength,
            Message::InvalidOrderId,
            lang,
        );
    }

    let origin_pincode = form.origin_pincode.trim();
    if !is_valid_pincode(origin_pincode) {
        errors.insert(
            Field::OriginPincode,
            ValidationErrorKind::InvalidFormat,
            Message::InvalidPincode,
            lang,
        );
    }

    let dest_pincode = form.dest_pincode.trim();
    if !is_valid_pincode(dest_pincode) {
        errors.insert(
            Field::DestPincode,
            ValidationErrorKind::InvalidFormat,
            Message::InvalidPincode,
            lang,
        );
    }

    for (field, value) in [
        (Field::OriginState, &form.origin_state),
        (Field::OriginCity, &form.origin_city),
        (Field::DestState, &form.dest_state),
        (Field::DestCity, &form.dest_city),
    ] {
        if value.trim().is_empty() {
            errors.insert(field, ValidationErrorKind::Required, Message::Required, lang);
        }
    }

    match mode {
        Some(mode) if errors.is_empty() => Ok(OrderInput::new(
            mode,
            phone,
            order_id,
            form.origin_state.trim().to_string(),
            form.origin_city.trim().to_string(),
            origin_pincode.to_string(),
            form.dest_state.trim().to_string(),
            form.dest_city.trim().to_string(),
            dest_pincode.to_string(),
            form.tracking_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from),
        )),
        _ => Err(errors),
    }
}
