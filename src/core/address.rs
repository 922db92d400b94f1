use crate::domain::model::ApiAddress;
use regex::Regex;
use std::sync::LazyLock;

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid postal pattern"));
static REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("valid region pattern"));
static STREET_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[A-Za-z]?\s").expect("valid street number pattern"));

/// A delivery address typed by the user, e.g. `"4306 Old College Rd, Bryan, TX 77801"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeTextAddress {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    raw: String,
}

impl FreeTextAddress {
    pub fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        // a leading segment is the street when it has a house number, or when the
        // segments after it still leave a city ("Main St, Bryan, TX")
        let (street, (city, region, postal_code)) = match parts.split_first() {
            Some((first, rest)) if STREET_NUMBER.is_match(first) => {
                (first.to_string(), split_city_line(rest))
            }
            Some((first, rest)) if !rest.is_empty() => {
                let tail = split_city_line(rest);
                if tail.0.is_empty() {
                    (String::new(), split_city_line(&parts))
                } else {
                    (first.to_string(), tail)
                }
            }
            _ => (String::new(), split_city_line(&parts)),
        };

        Self {
            street,
            city,
            region,
            postal_code,
            raw: input.trim().to_string(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Street line sent as the store-locator `s` parameter.
    pub fn line1(&self) -> &str {
        &self.street
    }

    /// City line sent as the store-locator `c` parameter.
    pub fn line2(&self) -> String {
        let tail = [self.region.as_str(), self.postal_code.as_str()]
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        [self.city.as_str(), tail.as_str()]
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Splits city-line segments into `(city, region, postal_code)`; trailing
/// "TX 77801" style tokens come off the end.
fn split_city_line(segments: &[&str]) -> (String, String, String) {
    let mut tokens: Vec<&str> = segments.iter().flat_map(|p| p.split_whitespace()).collect();
    let mut postal_code = String::new();
    let mut region = String::new();
    if tokens.last().is_some_and(|t| POSTAL_CODE.is_match(t)) {
        postal_code = tokens.pop().unwrap_or_default().to_string();
    }
    if tokens.len() > 1 && tokens.last().is_some_and(|t| REGION.is_match(t)) {
        region = tokens.pop().unwrap_or_default().to_uppercase();
    }

    let keep = tokens.len();
    let mut seen = 0;
    let mut city_parts = Vec::new();
    for part in segments {
        let words: Vec<&str> = part.split_whitespace().take(keep - seen).collect();
        seen += words.len();
        if !words.is_empty() {
            city_parts.push(words.join(" "));
        }
    }
    (city_parts.join(", "), region, postal_code)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Prefers the ready-made `Street` field, else rebuilds it from its parts.
pub fn street_line(address: &ApiAddress) -> String {
    if let Some(street) = non_empty(&address.street) {
        return street.to_string();
    }
    [
        &address.street_number,
        &address.street_name,
        &address.unit_type,
        &address.unit_number,
    ]
    .into_iter()
    .filter_map(non_empty)
    .collect::<Vec<_>>()
    .join(" ")
}

/// `street, city, region, postal` with empty parts skipped; `fallback` when nothing is left.
pub fn canonical_address(address: Option<&ApiAddress>, fallback: &str) -> String {
    let Some(address) = address else {
        return fallback.to_string();
    };
    let street = street_line(address);
    let joined = [
        Some(street.as_str()),
        non_empty(&address.city),
        non_empty(&address.region),
        non_empty(&address.postal_code),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}
