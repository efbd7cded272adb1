use crate::domain::NormalizedNumber;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Regional mobile-number insertion rule: some numbering plans inserted an
/// extra digit into mobile numbers, so the same line can appear with or
/// without it depending on when the contact was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertedDigit {
    /// Length of the area-code prefix the digit is inserted after.
    pub area_code_digits: usize,
    /// The inserted digit itself.
    pub digit: char,
}

/// Configurable numbering-plan rule table driving normalization and
/// matching. Defaults target Brazilian numbering (country code 55, ninth
/// digit after a two-digit area code, eight-digit subscriber suffix).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialPlan {
    /// Country calling codes stripped during normalization.
    pub country_codes: Vec<String>,
    pub inserted_digit: Option<InsertedDigit>,
    /// Trailing-suffix length for the area-code-ambiguity fallback.
    pub suffix_len: usize,
    /// ISO region hint handed to the pluggable comparer.
    pub region: String,
}

impl Default for DialPlan {
    fn default() -> Self {
        Self {
            country_codes: vec!["55".to_string()],
            inserted_digit: Some(InsertedDigit {
                area_code_digits: 2,
                digit: '9',
            }),
            suffix_len: 8,
            region: "BR".to_string(),
        }
    }
}

impl DialPlan {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.country_codes.is_empty() {
            return Err(CoreError::EmptyCountryCodes);
        }
        for code in &self.country_codes {
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(CoreError::InvalidCountryCode(code.clone()));
            }
        }
        if let Some(rule) = self.inserted_digit {
            if !rule.digit.is_ascii_digit() {
                return Err(CoreError::InvalidInsertedDigit(rule.digit));
            }
        }
        if self.suffix_len == 0 {
            return Err(CoreError::InvalidSuffixLen(self.suffix_len));
        }
        if self.region.trim().is_empty() {
            return Err(CoreError::InvalidRegion(self.region.clone()));
        }
        Ok(())
    }

    /// Canonicalizes a raw number for matching: drop formatting characters,
    /// strip a recognized `+<country code>` prefix (or a bare `+`), then
    /// strip leading zeros. Idempotent; the empty string is a valid output
    /// for inputs carrying no digits.
    pub fn normalize(&self, raw: &str) -> NormalizedNumber {
        let trimmed = raw.trim();

        let mut digits = String::new();
        for ch in trimmed.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            }
        }

        // Country codes are only recognized in international (+) form; the
        // same digits without a plus could be a valid area code.
        if trimmed.starts_with('+') {
            if let Some(code) = self.matching_country_code(&digits) {
                let len = code.len();
                digits.replace_range(..len, "");
            }
        }

        let canonical = digits.trim_start_matches('0').to_string();
        NormalizedNumber::from_canonical(canonical)
    }

    /// Longest configured country code prefixing `digits`, if any.
    fn matching_country_code(&self, digits: &str) -> Option<&str> {
        self.country_codes
            .iter()
            .filter(|code| digits.starts_with(code.as_str()))
            .max_by_key(|code| code.len())
            .map(|code| code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{DialPlan, InsertedDigit};
    use crate::error::CoreError;

    #[test]
    fn normalize_strips_formatting() {
        let plan = DialPlan::default();
        assert_eq!(plan.normalize("(11) 91234-5678").as_str(), "11912345678");
    }

    #[test]
    fn normalize_strips_country_code_after_plus() {
        let plan = DialPlan::default();
        assert_eq!(plan.normalize("+55 11 91234-5678").as_str(), "11912345678");
    }

    #[test]
    fn normalize_strips_bare_plus_for_foreign_codes() {
        let plan = DialPlan::default();
        assert_eq!(plan.normalize("+44 20 7946 0958").as_str(), "442079460958");
    }

    #[test]
    fn normalize_keeps_bare_country_code_digits() {
        // Without a leading plus the digits could be a valid area code.
        let plan = DialPlan::default();
        assert_eq!(plan.normalize("5591234567").as_str(), "5591234567");
    }

    #[test]
    fn normalize_strips_leading_zeros() {
        let plan = DialPlan::default();
        assert_eq!(plan.normalize("011 91234-5678").as_str(), "11912345678");
    }

    #[test]
    fn normalize_empty_input_is_empty() {
        let plan = DialPlan::default();
        assert!(plan.normalize("").is_empty());
        assert!(plan.normalize("   ").is_empty());
        assert!(plan.normalize("abc").is_empty());
    }

    #[test]
    fn normalize_is_idempotent() {
        let plan = DialPlan::default();
        for raw in ["+55 (11) 91234-5678", "0 800 123", "+1 415 555 1212", ""] {
            let once = plan.normalize(raw);
            let twice = plan.normalize(once.as_str());
            assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_prefers_longest_country_code() {
        let plan = DialPlan {
            country_codes: vec!["1".to_string(), "124".to_string()],
            ..DialPlan::default()
        };
        assert_eq!(plan.normalize("+1245678901").as_str(), "5678901");
    }

    #[test]
    fn validate_rejects_bad_plans() {
        let mut plan = DialPlan::default();
        plan.country_codes = vec![];
        assert_eq!(plan.validate(), Err(CoreError::EmptyCountryCodes));

        let mut plan = DialPlan::default();
        plan.country_codes = vec!["+55".to_string()];
        assert!(matches!(
            plan.validate(),
            Err(CoreError::InvalidCountryCode(_))
        ));

        let mut plan = DialPlan::default();
        plan.inserted_digit = Some(InsertedDigit {
            area_code_digits: 2,
            digit: 'x',
        });
        assert_eq!(plan.validate(), Err(CoreError::InvalidInsertedDigit('x')));

        let mut plan = DialPlan::default();
        plan.suffix_len = 0;
        assert_eq!(plan.validate(), Err(CoreError::InvalidSuffixLen(0)));
    }
}
