//! Multiplicative modifier folding.
//!
//! Every firepower, damage and reload modifier is an integer percentage.
//! They are folded into an exact reduced fraction, so the result does not
//! depend on the order contributors are visited in. The identity is 1/1.

use std::ops::Mul;

use salvo_core::components::Modifiers;

/// Scale applied when a value is reduced to keep the fraction in range.
const FALLBACK_SCALE: i128 = 1_000_000_000;

/// An exact non-negative rational multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multiplier {
    num: i128,
    den: i128,
}

impl Multiplier {
    pub const IDENTITY: Multiplier = Multiplier { num: 1, den: 1 };

    /// `num / den`. A non-positive denominator yields zero.
    pub fn ratio(num: i64, den: i64) -> Self {
        if den <= 0 {
            return Self { num: 0, den: 1 };
        }
        Self::reduced(num as i128, den as i128)
    }

    pub fn percent(percent: i64) -> Self {
        Self::ratio(percent, 100)
    }

    /// Fold a list of percentages into one multiplier.
    pub fn from_percentages<I>(percentages: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        percentages
            .into_iter()
            .fold(Self::IDENTITY, |acc, p| acc * Self::percent(p as i64))
    }

    pub fn numerator(self) -> i128 {
        self.num
    }

    pub fn denominator(self) -> i128 {
        self.den
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Scale `value`, truncating toward zero.
    pub fn apply(self, value: i64) -> i64 {
        let scaled = value as i128 * self.num / self.den;
        scaled.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    /// [`apply`](Self::apply) for 32-bit quantities.
    pub fn apply_i32(self, value: i32) -> i32 {
        self.apply(value as i64)
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    fn reduced(num: i128, den: i128) -> Self {
        let g = gcd(num.abs(), den);
        if g > 1 {
            Self {
                num: num / g,
                den: den / g,
            }
        } else {
            Self { num, den }
        }
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Multiplier {
    type Output = Multiplier;

    fn mul(self, rhs: Multiplier) -> Multiplier {
        // Cross-reduce first so the products stay small.
        let a = Self::reduced(self.num, rhs.den);
        let b = Self::reduced(rhs.num, self.den);
        match (a.num.checked_mul(b.num), b.den.checked_mul(a.den)) {
            (Some(num), Some(den)) => Self::reduced(num, den),
            _ => {
                // Pathologically deep stacks lose exactness rather than overflow.
                let lhs = self.num.saturating_mul(FALLBACK_SCALE) / self.den;
                let rhs = rhs.num.saturating_mul(FALLBACK_SCALE) / rhs.den;
                Self::reduced(lhs.saturating_mul(rhs) / FALLBACK_SCALE, FALLBACK_SCALE)
            }
        }
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Outgoing damage multiplier of an actor.
pub fn firepower(modifiers: Option<&Modifiers>) -> Multiplier {
    modifiers.map_or(Multiplier::IDENTITY, |m| {
        Multiplier::from_percentages(m.firepower.iter().copied())
    })
}

/// Incoming damage multiplier of an actor.
pub fn damage_taken(modifiers: Option<&Modifiers>) -> Multiplier {
    modifiers.map_or(Multiplier::IDENTITY, |m| {
        Multiplier::from_percentages(m.damage.iter().copied())
    })
}

/// Reload time multiplier of an actor.
pub fn reload(modifiers: Option<&Modifiers>) -> Multiplier {
    modifiers.map_or(Multiplier::IDENTITY, |m| {
        Multiplier::from_percentages(m.reload.iter().copied())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(Multiplier::from_percentages(Vec::new()), Multiplier::IDENTITY);
        assert_eq!(Multiplier::default().apply(123), 123);
        assert!(Multiplier::from_percentages([100, 100]).is_identity());
    }

    #[test]
    fn test_fold_is_exact() {
        let m = Multiplier::from_percentages([150, 50]);
        assert_eq!((m.numerator(), m.denominator()), (3, 4));
        assert_eq!(m.apply(100), 75);
        // 3 * 1/3 is exactly one.
        let third = Multiplier::ratio(1, 3);
        assert!((third * Multiplier::ratio(3, 1)).is_identity());
    }

    #[test]
    fn test_apply_truncates_toward_zero() {
        let m = Multiplier::ratio(1, 3);
        assert_eq!(m.apply(10), 3);
        assert_eq!(m.apply(-10), -3);
        assert_eq!(Multiplier::ratio(5, 0).apply(10), 0);
    }

    #[test]
    fn test_component_helpers() {
        let mods = Modifiers {
            firepower: vec![200],
            damage: vec![50, 50],
            reload: vec![],
        };
        assert_eq!(firepower(Some(&mods)).apply(10), 20);
        assert_eq!(damage_taken(Some(&mods)).apply(100), 25);
        assert!(reload(Some(&mods)).is_identity());
        assert!(firepower(None).is_identity());
    }
}
