use serde_json::Number;

use crate::AppError;

/// Collects every missing or malformed field of a write request before
/// failing. Empty strings and zero points count as missing.
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
    fractional: Vec<&'static str>,
}

impl RequiredFields {
    pub(crate) fn text(&mut self, value: Option<String>, field: &'static str) -> String {
        match value.filter(|raw| !raw.is_empty()) {
            Some(value) => value,
            None => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    pub(crate) fn points(&mut self, value: Option<Number>, field: &'static str) -> i64 {
        let Some(number) = value else {
            self.missing.push(field);
            return 0;
        };
        match whole_points(&number) {
            Some(0) => {
                self.missing.push(field);
                0
            }
            Some(points) => points,
            None => {
                self.fractional.push(field);
                0
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if !self.missing.is_empty() {
            problems.push(format!("missing required fields: {}", self.missing.join(", ")));
        }
        if !self.fractional.is_empty() {
            problems.push(format!(
                "not a whole number: {}",
                self.fractional.join(", ")
            ));
        }
        if problems.is_empty() {
            return Ok(());
        }
        Err(AppError::Validation(problems.join("; ")))
    }
}

fn whole_points(number: &Number) -> Option<i64> {
    if let Some(points) = number.as_i64() {
        return Some(points);
    }
    if number.is_u64() {
        return None;
    }
    let value = number.as_f64()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    if value.fract() == 0.0 && in_range {
        Some(value as i64)
    } else {
        None
    }
}
