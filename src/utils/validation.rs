use crate::utils::error::{CommandError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CommandError::config(format!("{}: URL cannot be empty", field_name)));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CommandError::config(format!(
                "{}: Unsupported URL scheme: {}",
                field_name, scheme
            ))),
        },
        Err(e) => Err(CommandError::config(format!(
            "{}: Invalid URL format: {}",
            field_name, e
        ))),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CommandError::config(format!(
            "{}: Value cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CommandError::config(format!(
            "{}: Value must be between {} and {}",
            field_name, min, max
        )));
    }
    Ok(())
}
