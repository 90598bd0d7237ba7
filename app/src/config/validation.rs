//! Setting value validation.

use std::path::Path;

use super::color::Color;

pub const MODULE_SIZE_RANGE: (i64, i64) = (1, 64);
pub const BORDER_RANGE: (i64, i64) = (0, 16);

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "VERICODE_FOREGROUND" | "VERICODE_BACKGROUND" => {
            value.parse::<Color>()?;
        }
        "VERICODE_MODULE_SIZE" => validate_int_range(value, MODULE_SIZE_RANGE.0, MODULE_SIZE_RANGE.1)?,
        "VERICODE_BORDER" => validate_int_range(value, BORDER_RANGE.0, BORDER_RANGE.1)?,
        "VERICODE_LOGO" => {
            if !value.is_empty() && !has_image_extension(value) {
                return Err("logo must be a .png, .jpg or .jpeg file".into());
            }
        }
        "VERICODE_OUTPUT_DIR" => {
            if value.trim().is_empty() {
                return Err("output directory must not be empty".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn has_image_extension(value: &str) -> bool {
    Path::new(value)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| ["png", "jpg", "jpeg"].contains(&e.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors() {
        assert!(validate_setting("VERICODE_FOREGROUND", "#102030").is_ok());
        assert!(validate_setting("VERICODE_BACKGROUND", "white").is_ok());
        assert!(validate_setting("VERICODE_FOREGROUND", "#10203").is_err());
    }

    #[test]
    fn integer_ranges() {
        assert!(validate_setting("VERICODE_MODULE_SIZE", "10").is_ok());
        assert!(validate_setting("VERICODE_MODULE_SIZE", "0").is_err());
        assert!(validate_setting("VERICODE_MODULE_SIZE", "ten").is_err());
        assert!(validate_setting("VERICODE_BORDER", "0").is_ok());
        assert!(validate_setting("VERICODE_BORDER", "17").is_err());
    }

    #[test]
    fn logo_extension() {
        assert!(validate_setting("VERICODE_LOGO", "brand/logo.PNG").is_ok());
        assert!(validate_setting("VERICODE_LOGO", "").is_ok());
        assert!(validate_setting("VERICODE_LOGO", "logo.gif").is_err());
    }

    #[test]
    fn unknown_keys_pass() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }
}
