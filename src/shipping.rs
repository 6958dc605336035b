//! Shipping domain: country rates, cost calculation, color conversion and
//! currency display, plus the persisted box record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum receiver name length, in characters
pub const RECEIVER_NAME_MAX_LENGTH: usize = 50;

/// Heaviest box accepted, in kilograms
pub const MAX_WEIGHT_KG: f64 = 10_000.0;

/// Destination countries with a fixed shipping rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Australia,
    Brazil,
    China,
    Sweden,
}

impl Country {
    /// All countries, sorted by name
    pub fn all() -> &'static [Country] {
        &[Country::Australia, Country::Brazil, Country::China, Country::Sweden]
    }

    pub fn name(self) -> &'static str {
        match self {
            Country::Australia => "Australia",
            Country::Brazil => "Brazil",
            Country::China => "China",
            Country::Sweden => "Sweden",
        }
    }

    /// Cost per kilogram
    pub fn multiplier(self) -> f64 {
        match self {
            Country::Sweden => 7.35,
            Country::China => 11.53,
            Country::Brazil => 15.63,
            Country::Australia => 50.09,
        }
    }

    pub fn from_name(name: &str) -> Option<Country> {
        Country::all().iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rate for a country name; unknown names ship at 0
pub fn country_multiplier(name: &str) -> f64 {
    Country::from_name(name).map(Country::multiplier).unwrap_or(0.0)
}

/// Shipping cost for `weight` kg to `country`, rounded to two decimals
pub fn shipping_cost(weight: f64, country: &str) -> f64 {
    if !weight.is_finite() || weight <= 0.0 || country.is_empty() {
        return 0.0;
    }
    round_cents(weight * country_multiplier(country))
}

/// Round to two decimals. Values too large to scale are already whole.
pub(crate) fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// 8-bit-per-channel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// "r, g, b" in base 10 (the stored form)
    pub fn to_decimal_triplet(self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

/// Parse `#rrggbb` (leading `#` optional, any case)
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse a stored "r, g, b" triplet back into a color
pub fn parse_decimal_triplet(triplet: &str) -> Option<Rgb> {
    let mut channels = triplet.split(',').map(|part| part.trim().parse::<u8>());
    let rgb = Rgb::new(
        channels.next()?.ok()?,
        channels.next()?.ok()?,
        channels.next()?.ok()?,
    );
    match channels.next() {
        None => Some(rgb),
        Some(_) => None,
    }
}

/// Hex color to its decimal triplet, e.g. "#1A2B3C" -> "26, 43, 60"
pub fn convert_hex_to_rgb(hex: &str) -> Option<String> {
    parse_hex_color(hex).map(Rgb::to_decimal_triplet)
}

/// Display symbol for a currency code; unknown codes display as-is
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

pub fn format_currency(amount: f64, code: &str) -> String {
    format!("{}{:.2}", currency_symbol(code), amount)
}

/// Validated form input, ready to become a record
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDraft {
    pub receiver_name: String,
    pub weight: f64,
    pub color: Rgb,
    pub country: Country,
}

/// One submitted shipping box. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingBox {
    pub id: String,
    pub receiver_name: String,
    pub weight: f64,
    /// Decimal triplet, "r, g, b"
    pub color: String,
    pub country: Country,
    pub shipping_cost: f64,
    pub created_at: DateTime<Utc>,
}

impl ShippingBox {
    pub fn from_draft(draft: BoxDraft) -> Self {
        let weight = if draft.weight.is_finite() && draft.weight > 0.0 {
            draft.weight.min(MAX_WEIGHT_KG)
        } else {
            0.0
        };
        let receiver_name: String = draft
            .receiver_name
            .chars()
            .take(RECEIVER_NAME_MAX_LENGTH)
            .collect();

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            receiver_name,
            weight,
            color: draft.color.to_decimal_triplet(),
            country: draft.country,
            shipping_cost: shipping_cost(weight, draft.country.name()),
            created_at: Utc::now(),
        }
    }

    /// Color for drawing; falls back to white for a malformed stored value
    pub fn rgb(&self) -> Rgb {
        parse_decimal_triplet(&self.color).unwrap_or_default()
    }
}
