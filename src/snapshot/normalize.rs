use std::num::NonZeroU64;

/// Fixed-point scale of the displayed base target: the genesis value shows as 100000.
pub const BASE_TARGET_SCALE: u128 = 100_000;

/// Displayed base target: `base_target * 100000 / initial`, floor division.
///
/// The product is formed in u128. `u64::MAX * 100000` needs 81 bits, so no
/// 64-bit base target can overflow it.
pub fn base_target_ratio(base_target: u64, initial: NonZeroU64) -> u128 {
    (base_target as u128 * BASE_TARGET_SCALE) / initial.get() as u128
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(v: u64) -> NonZeroU64 {
        NonZeroU64::new(v).unwrap()
    }

    #[test]
    fn genesis_target_is_unity() {
        assert_eq!(base_target_ratio(4_398_046_511_104, nz(4_398_046_511_104)), 100_000);
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(base_target_ratio(1, nz(3)), 33_333);
        assert_eq!(base_target_ratio(0, nz(7)), 0);
    }

    #[test]
    fn max_target_does_not_overflow() {
        assert_eq!(base_target_ratio(u64::MAX, nz(1)), u64::MAX as u128 * 100_000);
        assert_eq!(base_target_ratio(u64::MAX, nz(u64::MAX)), 100_000);
    }
}
