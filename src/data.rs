//! Randomized test-data generation.
//!
//! Every generator draws fresh randomness per call so concurrent test runs
//! against a shared demo instance don't collide on usernames, employee ids
//! or record names. There is no seeding contract; tests assert structure,
//! never specific values.

use chrono::{Duration, Local};
use rand::seq::IndexedRandom;
use rand::Rng;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const PASSWORD_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa", "Matthew", "Betty", "Anthony",
    "Margaret", "Mark", "Sandra",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis",
];

const CITIES: &[&str] = &["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"];
const STATES: &[&str] = &["NY", "CA", "IL", "TX", "AZ"];

fn random_chars(len: usize, alphabet: &[u8]) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
        .collect()
}

/// Random lowercase string of exactly `len` characters
#[must_use]
pub fn random_string(len: usize) -> String {
    random_chars(len, LOWERCASE)
}

/// Random lowercase string with a fixed prefix
#[must_use]
pub fn random_string_with_prefix(len: usize, prefix: &str) -> String {
    format!("{prefix}{}", random_string(len))
}

/// Random integer in `min..=max`
#[must_use]
pub fn random_number(min: u32, max: u32) -> u32 {
    rand::rng().random_range(min..=max)
}

/// Random email with an 8-character local part at the given domain
#[must_use]
pub fn random_email(domain: &str) -> String {
    format!("{}@{domain}", random_string(8))
}

/// Random phone number: country code prefix plus 10 digits
#[must_use]
pub fn random_phone(country_code: &str) -> String {
    let mut rng = rand::rng();
    let digits: String = (0..10)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    format!("{country_code}{digits}")
}

/// Random first name from a fixed pool
#[must_use]
pub fn random_first_name() -> &'static str {
    choice(FIRST_NAMES)
}

/// Random last name from a fixed pool
#[must_use]
pub fn random_last_name() -> &'static str {
    choice(LAST_NAMES)
}

/// Random (first, last) name pair
#[must_use]
pub fn random_full_name() -> (&'static str, &'static str) {
    (random_first_name(), random_last_name())
}

/// Random employee id: `EMP` plus five digits
#[must_use]
pub fn random_employee_id() -> String {
    format!("EMP{}", random_number(10_000, 99_999))
}

/// Random username: `prefix_` plus six random characters
#[must_use]
pub fn random_username(prefix: &str) -> String {
    format!("{prefix}_{}", random_string(6))
}

/// Random password of exactly `len` characters (letters, digits, `!@#$%^&*`)
#[must_use]
pub fn random_password(len: usize) -> String {
    random_chars(len, PASSWORD_CHARS)
}

/// Date `days_from_now` days from today, formatted `YYYY-MM-DD`
#[must_use]
pub fn random_date(days_from_now: i64) -> String {
    let target = Local::now() + Duration::days(days_from_now);
    target.format("%Y-%m-%d").to_string()
}

/// A (from, to) date pair; `start_days < end_days` gives a chronological range
#[must_use]
pub fn random_date_range(start_days: i64, end_days: i64) -> (String, String) {
    (random_date(start_days), random_date(end_days))
}

/// A postal address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Street line
    pub street: String,
    /// City
    pub city: String,
    /// Two-letter state code
    pub state: String,
    /// Zip code
    pub zip: String,
    /// Country
    pub country: String,
}

/// Random US postal address
#[must_use]
pub fn random_address() -> Address {
    Address {
        street: format!("{} {} St", random_number(1, 999), capitalize(&random_string(8))),
        city: choice(CITIES).to_string(),
        state: choice(STATES).to_string(),
        zip: random_number(10_000, 99_999).to_string(),
        country: "United States".to_string(),
    }
}

/// Random element from a non-empty slice
///
/// # Panics
/// Panics if the slice is empty; every pool in this module is fixed and
/// non-empty.
#[must_use]
pub fn choice<T: Copy>(pool: &[T]) -> T {
    *pool
        .choose(&mut rand::rng())
        .unwrap_or_else(|| panic!("choice called with an empty pool"))
}

/// Timestamp-based uniqueness suffix, `YYYYmmdd_HHMMSS_micros`
#[must_use]
pub fn unique_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S_%6f").to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod string_tests {
        use super::*;

        #[test]
        fn test_random_string_exact_length() {
            for len in [1, 8, 32] {
                assert_eq!(random_string(len).len(), len);
            }
        }

        #[test]
        fn test_random_string_is_lowercase_alpha() {
            let s = random_string(64);
            assert!(s.chars().all(|c| c.is_ascii_lowercase()));
        }

        #[test]
        fn test_prefix_is_preserved() {
            let s = random_string_with_prefix(6, "emp_");
            assert!(s.starts_with("emp_"));
            assert_eq!(s.len(), "emp_".len() + 6);
        }
    }

    mod identity_tests {
        use super::*;

        #[test]
        fn test_email_shape() {
            let email = random_email("example.com");
            assert!(email.ends_with("@example.com"));
            assert_eq!(email.split('@').next().unwrap().len(), 8);
        }

        #[test]
        fn test_phone_shape() {
            let phone = random_phone("+1");
            assert!(phone.starts_with("+1"));
            assert_eq!(phone.len(), 12);
            assert!(phone[2..].chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn test_names_come_from_pools() {
            assert!(FIRST_NAMES.contains(&random_first_name()));
            assert!(LAST_NAMES.contains(&random_last_name()));
            let (first, last) = random_full_name();
            assert!(!first.is_empty());
            assert!(!last.is_empty());
        }

        #[test]
        fn test_employee_id_shape() {
            let id = random_employee_id();
            assert!(id.starts_with("EMP"));
            assert_eq!(id.len(), 8);
            assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn test_username_shape() {
            let name = random_username("qa");
            assert!(name.starts_with("qa_"));
            assert_eq!(name.len(), 9);
        }

        #[test]
        fn test_password_length_holds_over_many_draws() {
            for _ in 0..1000 {
                assert_eq!(random_password(12).len(), 12);
            }
        }

        #[test]
        fn test_password_uses_only_allowed_characters() {
            let allowed: Vec<char> = PASSWORD_CHARS.iter().map(|&b| b as char).collect();
            let password = random_password(64);
            assert!(password.chars().all(|c| allowed.contains(&c)));
        }
    }

    mod date_tests {
        use super::*;

        #[test]
        fn test_date_format() {
            let date = random_date(0);
            assert_eq!(date.len(), 10);
            let parts: Vec<&str> = date.split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0].len(), 4);
        }

        #[test]
        fn test_range_is_ordered_when_start_before_end() {
            let (from, to) = random_date_range(1, 5);
            // ISO dates compare chronologically as strings
            assert!(from < to);
        }

        #[test]
        fn test_unique_timestamps_differ() {
            let a = unique_timestamp();
            std::thread::sleep(std::time::Duration::from_millis(2));
            let b = unique_timestamp();
            assert_ne!(a, b);
        }
    }

    mod address_tests {
        use super::*;

        #[test]
        fn test_address_fields_populated() {
            let addr = random_address();
            assert!(addr.street.ends_with(" St"));
            assert!(CITIES.contains(&addr.city.as_str()));
            assert!(STATES.contains(&addr.state.as_str()));
            assert_eq!(addr.zip.len(), 5);
            assert_eq!(addr.country, "United States");
        }
    }

    mod property_tests {
        use super::*;

        proptest! {
            #[test]
            fn prop_random_string_length(len in 1usize..128) {
                prop_assert_eq!(random_string(len).len(), len);
            }

            #[test]
            fn prop_random_password_length(len in 1usize..128) {
                prop_assert_eq!(random_password(len).len(), len);
            }

            #[test]
            fn prop_random_number_in_bounds(min in 0u32..1000, span in 0u32..1000) {
                let max = min + span;
                let n = random_number(min, max);
                prop_assert!(n >= min && n <= max);
            }

            #[test]
            fn prop_date_range_ordering(start in -30i64..30, extra in 1i64..30) {
                let (from, to) = random_date_range(start, start + extra);
                prop_assert!(from < to);
            }
        }
    }
}
