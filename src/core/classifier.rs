use crate::domain::model::{MenuEntry, MenuGroups, VariantRecord};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static PIZZA_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pizza|hand tossed|brooklyn|pan|screen|thin").expect("valid pizza pattern")
});
static PIZZA_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SCREEN|HAND|BROOKLYN|PAN").expect("valid code pattern"));
static DRINK_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)drink|coke|pepsi|sprite|soda|beverage").expect("valid drink pattern")
});
static DESSERT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)dessert|cookie|brownie|lava|marble").expect("valid dessert pattern")
});
static SIDE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)bread|wing|pasta|sandwich|salad").expect("valid side pattern")
});
static SIZE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"10|12|14|16|18").expect("valid size pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Pizzas,
    Sides,
    Drinks,
    Desserts,
    Other,
}

/// First size token found in an item code, or an empty string.
pub fn size_hint(code: &str) -> String {
    SIZE_TOKEN
        .find(code)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Rules are checked in a fixed order and the first hit wins, so a name that
/// mentions both pizza and soda is a pizza.
pub fn categorize(code: &str, name: &str) -> Category {
    if PIZZA_NAME.is_match(name) || PIZZA_CODE.is_match(code) {
        Category::Pizzas
    } else if DRINK_NAME.is_match(name) {
        Category::Drinks
    } else if DESSERT_NAME.is_match(name) {
        Category::Desserts
    } else if SIDE_NAME.is_match(name) {
        Category::Sides
    } else {
        Category::Other
    }
}

pub fn classify(variants: &BTreeMap<String, VariantRecord>) -> MenuGroups {
    let mut groups = MenuGroups::default();

    for (code, variant) in variants {
        let name = variant.display_name().to_string();
        let entry = MenuEntry {
            code: code.clone(),
            size_hint: size_hint(code),
            name,
        };
        let bucket = match categorize(&entry.code, &entry.name) {
            Category::Pizzas => &mut groups.pizzas,
            Category::Sides => &mut groups.sides,
            Category::Drinks => &mut groups.drinks,
            Category::Desserts => &mut groups.desserts,
            Category::Other => &mut groups.other,
        };
        bucket.push(entry);
    }

    for bucket in groups.buckets_mut() {
        bucket.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    }

    tracing::debug!(
        "Classified {} variants: {} pizzas, {} sides, {} drinks, {} desserts, {} other",
        variants.len(),
        groups.pizzas.len(),
        groups.sides.len(),
        groups.drinks.len(),
        groups.desserts.len(),
        groups.other.len()
    );

    groups
}

/// Case-insensitive first, then lowercase ahead of uppercase, then raw bytes.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            for (ca, cb) in a.chars().zip(b.chars()) {
                if ca != cb {
                    return match (ca.is_lowercase(), cb.is_lowercase()) {
                        (true, false) => Ordering::Less,
                        (false, true) => Ordering::Greater,
                        _ => ca.cmp(&cb),
                    };
                }
            }
            Ordering::Equal
        })
        .then_with(|| a.cmp(b))
}
