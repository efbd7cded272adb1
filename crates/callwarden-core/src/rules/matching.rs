use crate::domain::NormalizedNumber;
use crate::platform::NumberComparer;
use crate::rules::dial_plan::DialPlan;
use tracing::debug;

/// Ordered short-circuit match between two normalized numbers.
///
/// Tiers, cheapest first: exact equality, the regional inserted-digit rule,
/// equal trailing suffixes, then the injected region-aware comparer as the
/// authoritative fallback. Empty values never match. Symmetric in `a`/`b`.
pub fn numbers_match(
    a: &NormalizedNumber,
    b: &NormalizedNumber,
    plan: &DialPlan,
    comparer: &dyn NumberComparer,
) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    if matches_without_inserted_digit(a, b, plan) {
        return true;
    }

    if a.len() >= plan.suffix_len
        && b.len() >= plan.suffix_len
        && a.suffix(plan.suffix_len) == b.suffix(plan.suffix_len)
    {
        return true;
    }

    match comparer.are_same(a.as_str(), b.as_str(), &plan.region) {
        Ok(same) => same,
        Err(err) => {
            debug!(error = %err, "number comparer failed, treating as no match");
            false
        }
    }
}

/// True when one side is the other with the plan's regional digit inserted
/// right after the area code (e.g. an 11-digit mobile number stored next to
/// its older 10-digit form).
fn matches_without_inserted_digit(
    a: &NormalizedNumber,
    b: &NormalizedNumber,
    plan: &DialPlan,
) -> bool {
    let Some(rule) = plan.inserted_digit else {
        return false;
    };

    let (longer, shorter) = if a.len() == b.len() + 1 {
        (a, b)
    } else if b.len() == a.len() + 1 {
        (b, a)
    } else {
        return false;
    };

    let pos = rule.area_code_digits;
    if longer.len() <= pos {
        return false;
    }

    let bytes = longer.as_str().as_bytes();
    if bytes[pos] != rule.digit as u8 {
        return false;
    }

    let stripped = format!("{}{}", &longer.as_str()[..pos], &longer.as_str()[pos + 1..]);
    stripped == shorter.as_str()
}
