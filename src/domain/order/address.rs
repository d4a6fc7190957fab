//! Shipping address value object and structural validation.
//!
//! Validates Israeli delivery addresses: recognized city, 7-digit postal
//! code, and (when present) a well-formed local or international phone
//! number. Both Hebrew and English city names are accepted.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Structured delivery address carried on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A single field that failed address validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressFieldError {
    pub field: &'static str,
    pub message: String,
}

/// Result of validating a complete address.
#[derive(Debug, Clone, Default)]
pub struct AddressValidation {
    pub errors: Vec<AddressFieldError>,
}

impl AddressValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Cities the carrier network delivers to (English and Hebrew spellings).
const DELIVERABLE_CITIES: &[&str] = &[
    "Tel Aviv",
    "Jerusalem",
    "Haifa",
    "Rishon LeZion",
    "Petah Tikva",
    "Ashdod",
    "Netanya",
    "Beer Sheva",
    "Holon",
    "Bnei Brak",
    "Ramat Gan",
    "Bat Yam",
    "Rehovot",
    "Ashkelon",
    "Herzliya",
    "Kfar Saba",
    "Hadera",
    "Modiin",
    "Nazareth",
    "Lod",
    "Ramla",
    "Raanana",
    "Givatayim",
    "Eilat",
    "תל אביב",
    "ירושלים",
    "חיפה",
    "ראשון לציון",
    "פתח תקווה",
    "אשדוד",
    "נתניה",
    "באר שבע",
    "חולון",
    "בני ברק",
    "רמת גן",
    "בת ים",
    "רחובות",
    "אשקלון",
    "הרצליה",
    "כפר סבא",
    "חדרה",
    "מודיעין",
    "נצרת",
    "לוד",
    "רמלה",
    "רעננה",
    "גבעתיים",
    "אילת",
];

static NORMALIZED_CITIES: Lazy<HashSet<String>> = Lazy::new(|| {
    DELIVERABLE_CITIES
        .iter()
        .map(|c| normalize_city(c))
        .collect()
});

fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Checks if a city is in the deliverable set.
pub fn is_recognized_city(city: &str) -> bool {
    if city.trim().is_empty() {
        return false;
    }
    NORMALIZED_CITIES.contains(&normalize_city(city))
}

/// Validates an Israeli postal code: exactly 7 digits, spaces ignored.
pub fn is_valid_postal_code(postal_code: &str) -> bool {
    let cleaned: String = postal_code.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.len() == 7 && cleaned.chars().all(|c| c.is_ascii_digit())
}

/// Validates an Israeli phone number.
///
/// Accepts mobile (05X-XXXXXXX), landline (0X-XXXXXXX, area codes 02-09),
/// and international (+972 / 972 prefixed) forms, with optional separators.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let has_plus = phone.trim_start().starts_with('+');

    if has_plus || digits.starts_with("972") {
        // International: 972 followed by 8-9 digits (leading zero dropped)
        return digits.starts_with("972") && (digits.len() == 11 || digits.len() == 12);
    }

    if !digits.starts_with('0') || digits.len() < 2 {
        return false;
    }

    let second = digits.as_bytes()[1];
    match digits.len() {
        // Mobile: 05X + 7 digits
        10 => second == b'5',
        // Landline: area codes 02-09 + 7 digits
        9 => (b'2'..=b'9').contains(&second),
        _ => false,
    }
}

/// Normalizes a phone number to the standard local `0XX-XXXXXXX` form.
///
/// International prefixes are folded back to the leading zero. Numbers
/// that cannot be normalized are returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let mut digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("972") {
        digits = format!("0{}", rest);
    }

    if digits.len() == 10 && digits.starts_with('0') {
        format!("{}-{}", &digits[..3], &digits[3..])
    } else {
        phone.to_string()
    }
}

impl ShippingAddress {
    /// Validates the address structurally, collecting every field error.
    pub fn validate(&self) -> AddressValidation {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(AddressFieldError {
                field: "name",
                message: "Name is required".to_string(),
            });
        }

        if self.street.trim().is_empty() {
            errors.push(AddressFieldError {
                field: "street",
                message: "Street address is required".to_string(),
            });
        }

        if self.city.trim().is_empty() {
            errors.push(AddressFieldError {
                field: "city",
                message: "City is required".to_string(),
            });
        } else if !is_recognized_city(&self.city) {
            errors.push(AddressFieldError {
                field: "city",
                message: format!("City '{}' is not recognized", self.city),
            });
        }

        if !is_valid_postal_code(&self.postal_code) {
            errors.push(AddressFieldError {
                field: "postal_code",
                message: "Postal code must be 7 digits".to_string(),
            });
        }

        if let Some(phone) = &self.phone {
            if !is_valid_phone(phone) {
                errors.push(AddressFieldError {
                    field: "phone",
                    message: "Invalid Israeli phone number".to_string(),
                });
            }
        }

        AddressValidation { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_address() -> ShippingAddress {
        ShippingAddress {
            name: "Noa Levi".to_string(),
            street: "Dizengoff 100".to_string(),
            street2: None,
            city: "Tel Aviv".to_string(),
            postal_code: "6433222".to_string(),
            country: "Israel".to_string(),
            phone: Some("052-1234567".to_string()),
        }
    }

    #[test]
    fn valid_address_passes() {
        assert!(valid_address().validate().is_valid());
    }

    #[test]
    fn hebrew_city_is_recognized() {
        let mut addr = valid_address();
        addr.city = "תל אביב".to_string();
        assert!(addr.validate().is_valid());
    }

    #[test]
    fn city_matching_ignores_case_and_whitespace() {
        assert!(is_recognized_city("  tel aviv "));
        assert!(is_recognized_city("HAIFA"));
        assert!(!is_recognized_city("Atlantis"));
        assert!(!is_recognized_city("  "));
    }

    #[test]
    fn postal_code_must_be_seven_digits() {
        assert!(is_valid_postal_code("6433222"));
        assert!(is_valid_postal_code("64 33 222"));
        assert!(!is_valid_postal_code("12345"));
        assert!(!is_valid_postal_code("12345678"));
        assert!(!is_valid_postal_code("64332a2"));
    }

    #[test]
    fn malformed_postal_code_reports_field_error() {
        let mut addr = valid_address();
        addr.postal_code = "123".to_string();

        let result = addr.validate();

        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "postal_code");
        assert!(result.errors[0].message.contains("7 digits"));
    }

    #[test]
    fn phone_is_optional_but_format_checked() {
        let mut addr = valid_address();
        addr.phone = None;
        assert!(addr.validate().is_valid());

        addr.phone = Some("12345".to_string());
        let result = addr.validate();
        assert_eq!(result.errors[0].field, "phone");
    }

    #[test]
    fn phone_accepts_mobile_landline_and_international() {
        assert!(is_valid_phone("052-1234567"));
        assert!(is_valid_phone("0521234567"));
        assert!(is_valid_phone("03-1234567"));
        assert!(is_valid_phone("+972-52-1234567"));
        assert!(is_valid_phone("972521234567"));
        assert!(!is_valid_phone("1234567"));
        assert!(!is_valid_phone("00-1234567"));
    }

    #[test]
    fn format_phone_folds_international_prefix() {
        assert_eq!(format_phone("+972521234567"), "052-1234567");
        assert_eq!(format_phone("0521234567"), "052-1234567");
        assert_eq!(format_phone("garbage"), "garbage");
    }

    #[test]
    fn multiple_failures_collect_all_field_errors() {
        let addr = ShippingAddress {
            name: "".to_string(),
            street: " ".to_string(),
            street2: None,
            city: "Nowhere".to_string(),
            postal_code: "1".to_string(),
            country: "Israel".to_string(),
            phone: None,
        };

        let result = addr.validate();
        let fields: Vec<_> = result.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "street", "city", "postal_code"]);
    }
}
