use crate::platform::{NumberComparer, PlatformError};

/// Default [`NumberComparer`]: a loose trailing-digit comparison in the
/// style of telephony stacks' "same number" utilities. Two numbers are the
/// same when the shorter one is a suffix of the longer and carries at least
/// `min_match` digits. Region-agnostic; hosts with a real comparison
/// utility should supply their own adapter instead.
#[derive(Debug, Clone, Copy)]
pub struct LenientComparer {
    pub min_match: usize,
}

impl Default for LenientComparer {
    fn default() -> Self {
        // Seven significant digits, matching the common telephony default.
        Self { min_match: 7 }
    }
}

impl NumberComparer for LenientComparer {
    fn are_same(&self, a: &str, b: &str, _region: &str) -> Result<bool, PlatformError> {
        let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        Ok(short.len() >= self.min_match && long.ends_with(short))
    }
}

#[cfg(test)]
mod tests {
    use super::LenientComparer;
    use crate::platform::NumberComparer;

    #[test]
    fn suffix_agreement_matches() {
        let comparer = LenientComparer::default();
        assert!(comparer
            .are_same("11912345678", "912345678", "BR")
            .expect("compare"));
    }

    #[test]
    fn short_suffixes_do_not_match() {
        let comparer = LenientComparer::default();
        assert!(!comparer.are_same("345678", "12345678", "BR").expect("compare"));
    }

    #[test]
    fn disjoint_numbers_do_not_match() {
        let comparer = LenientComparer::default();
        assert!(!comparer
            .are_same("11912345678", "21987654321", "BR")
            .expect("compare"));
    }

    #[test]
    fn comparison_is_symmetric() {
        let comparer = LenientComparer::default();
        let a = "912345678";
        let b = "11912345678";
        assert_eq!(
            comparer.are_same(a, b, "BR").expect("compare"),
            comparer.are_same(b, a, "BR").expect("compare")
        );
    }
}
