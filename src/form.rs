//! Add-box form state and validation.

use crate::notifications::{NotificationCenter, Severity};
use crate::shipping::{
    parse_hex_color, BoxDraft, Country, Rgb, ShippingBox, MAX_WEIGHT_KG, RECEIVER_NAME_MAX_LENGTH,
};
use crate::storage::{BoxStore, StorageError};

pub const MSG_NAME_REQUIRED: &str = "Receiver name is required";
pub const MSG_WEIGHT_REQUIRED: &str = "Weight is required";
pub const MSG_WEIGHT_NOT_NUMBER: &str = "Weight must be a number";
pub const MSG_WEIGHT_NEGATIVE: &str = "Weight cannot be negative. Defaulting to 0.";
pub const MSG_COUNTRY_REQUIRED: &str = "Destination country is required";
pub const MSG_FIX_FIELDS: &str = "Please fill all required fields correctly.";
pub const MSG_BOX_ADDED: &str = "Box added successfully!";
pub const MSG_ZERO_WEIGHT: &str = "Weight is 0 kg, this box ships at no cost.";

pub fn name_too_long_message() -> String {
    format!("Receiver name cannot exceed {} characters.", RECEIVER_NAME_MAX_LENGTH)
}

pub fn weight_too_heavy_message() -> String {
    format!("Weight cannot exceed {} kg.", MAX_WEIGHT_KG)
}

pub fn name_at_limit_message() -> String {
    format!("Maximum {} characters reached.", RECEIVER_NAME_MAX_LENGTH)
}

/// One message per field, `None` when the field is fine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub receiver_name: Option<String>,
    pub weight: Option<String>,
    pub country: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.receiver_name.is_none() && self.weight.is_none() && self.country.is_none()
    }

    pub fn count(&self) -> usize {
        [&self.receiver_name, &self.weight, &self.country]
            .iter()
            .filter(|e| e.is_some())
            .count()
    }
}

/// How close the receiver name is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCountLevel {
    Normal,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxForm {
    pub receiver_name: String,
    pub weight: String,
    pub color: Rgb,
    pub country: Option<Country>,
    pub errors: FieldErrors,
}

impl Default for BoxForm {
    fn default() -> Self {
        Self {
            receiver_name: String::new(),
            weight: String::new(),
            color: Rgb::WHITE,
            country: None,
            errors: FieldErrors::default(),
        }
    }
}

impl BoxForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_receiver_name(&mut self, value: &str, notifications: &mut NotificationCenter) {
        let len = value.chars().count();

        if len > RECEIVER_NAME_MAX_LENGTH {
            let message = name_too_long_message();
            notifications.show(message.clone(), Severity::Error);
            self.errors.receiver_name = Some(message);
            self.receiver_name = value.chars().take(RECEIVER_NAME_MAX_LENGTH).collect();
            return;
        }

        self.receiver_name = value.to_string();
        if len == RECEIVER_NAME_MAX_LENGTH {
            let message = name_at_limit_message();
            notifications.show(message.clone(), Severity::Info);
            self.errors.receiver_name = Some(message);
        } else {
            self.errors.receiver_name = None;
        }
    }

    pub fn set_weight(&mut self, value: &str, notifications: &mut NotificationCenter) {
        if matches!(value.trim().parse::<f64>(), Ok(w) if w < 0.0) {
            self.clamp_negative_weight(notifications);
            return;
        }

        self.weight = value.to_string();
        self.errors.weight = None;
    }

    fn clamp_negative_weight(&mut self, notifications: &mut NotificationCenter) {
        notifications.show(MSG_WEIGHT_NEGATIVE, Severity::Error);
        self.errors.weight = Some(MSG_WEIGHT_NEGATIVE.to_string());
        self.weight = "0".to_string();
    }

    /// Accept a new color only if it is a valid hex value
    pub fn set_color(&mut self, hex: &str) -> bool {
        match parse_hex_color(hex) {
            Some(rgb) => {
                self.color = rgb;
                true
            }
            None => false,
        }
    }

    pub fn set_country(&mut self, country: Option<Country>) {
        self.country = country;
        if country.is_some() {
            self.errors.country = None;
        }
    }

    /// Cycle forward: none -> first country -> ... -> last -> none
    pub fn next_country(&mut self) {
        let all = Country::all();
        let next = match self.country.and_then(|c| all.iter().position(|x| *x == c)) {
            None => all.first().copied(),
            Some(i) => all.get(i + 1).copied(),
        };
        self.set_country(next);
    }

    pub fn previous_country(&mut self) {
        let all = Country::all();
        let previous = match self.country.and_then(|c| all.iter().position(|x| *x == c)) {
            None => all.last().copied(),
            Some(0) => None,
            Some(i) => all.get(i - 1).copied(),
        };
        self.set_country(previous);
    }

    pub fn char_count(&self) -> usize {
        self.receiver_name.chars().count()
    }

    pub fn char_count_level(&self) -> CharCountLevel {
        let count = self.char_count();
        if count > RECEIVER_NAME_MAX_LENGTH {
            CharCountLevel::Exceeded
        } else if count * 10 >= RECEIVER_NAME_MAX_LENGTH * 9 {
            CharCountLevel::Warning
        } else {
            CharCountLevel::Normal
        }
    }

    /// Check every field, recording field errors and notifications
    pub fn validate(&mut self, notifications: &mut NotificationCenter) -> bool {
        let mut errors = FieldErrors::default();

        if self.receiver_name.trim().is_empty() {
            errors.receiver_name = Some(MSG_NAME_REQUIRED.to_string());
        } else if self.char_count() > RECEIVER_NAME_MAX_LENGTH {
            let message = name_too_long_message();
            notifications.show(message.clone(), Severity::Error);
            errors.receiver_name = Some(message);
        }

        let weight = self.weight.trim();
        if weight.is_empty() {
            errors.weight = Some(MSG_WEIGHT_REQUIRED.to_string());
        } else {
            match weight.parse::<f64>() {
                Ok(w) if w.is_finite() && w < 0.0 => {
                    self.clamp_negative_weight(notifications);
                    errors.weight = Some(MSG_WEIGHT_NEGATIVE.to_string());
                }
                Ok(w) if w > MAX_WEIGHT_KG => {
                    let message = weight_too_heavy_message();
                    notifications.show(message.clone(), Severity::Error);
                    errors.weight = Some(message);
                }
                Ok(w) if w.is_finite() => {}
                _ => errors.weight = Some(MSG_WEIGHT_NOT_NUMBER.to_string()),
            }
        }

        if self.country.is_none() {
            errors.country = Some(MSG_COUNTRY_REQUIRED.to_string());
        }

        let valid = errors.is_empty();
        self.errors = errors;

        if !valid {
            tracing::debug!("Form rejected with {} field errors", self.errors.count());
            notifications.show(MSG_FIX_FIELDS, Severity::Error);
        }

        valid
    }

    /// Validate and, if the form is good, append a record to `store`.
    ///
    /// Returns `Ok(None)` when validation fails; the store is untouched.
    /// A storage error means the record was appended but not flushed; the
    /// form is reset in that case too.
    pub fn submit(
        &mut self,
        store: &mut BoxStore,
        notifications: &mut NotificationCenter,
    ) -> Result<Option<ShippingBox>, StorageError> {
        if !self.validate(notifications) {
            return Ok(None);
        }

        // validate() guarantees a finite, non-negative weight and a country
        let (Ok(weight), Some(country)) = (self.weight.trim().parse::<f64>(), self.country) else {
            return Ok(None);
        };

        let draft = BoxDraft {
            receiver_name: self.receiver_name.trim().to_string(),
            weight,
            color: self.color,
            country,
        };

        // The record is in the store whether or not the flush worked, so the
        // form resets either way
        let added = store.add(draft);
        *self = BoxForm::default();
        let record = added?;

        if record.weight == 0.0 {
            notifications.show(MSG_ZERO_WEIGHT, Severity::Info);
        }
        notifications.show(MSG_BOX_ADDED, Severity::Success);

        Ok(Some(record))
    }
}
