use std::fmt;

use serde::Serialize;

/// Required number of subjects in one arm. `Infinite` means no finite
/// sample can tell the effect apart from no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SampleSize {
    Finite(u64),
    Infinite,
}

impl SampleSize {
    /// Rounds a continuous solution up; values that do not fit in a u64 are
    /// reported as `Infinite`
    pub fn from_continuous(n: f64) -> Self {
        let n = n.ceil();
        if n.is_nan() || n >= u64::MAX as f64 {
            SampleSize::Infinite
        } else {
            SampleSize::Finite(n.max(0.0) as u64)
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, SampleSize::Finite(_))
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            SampleSize::Finite(n) => Some(*n),
            SampleSize::Infinite => None,
        }
    }

    /// Size of both arms together
    pub fn doubled(&self) -> Self {
        match self {
            SampleSize::Finite(n) => n
                .checked_mul(2)
                .map_or(SampleSize::Infinite, SampleSize::Finite),
            SampleSize::Infinite => SampleSize::Infinite,
        }
    }
}

impl From<u64> for SampleSize {
    fn from(n: u64) -> Self {
        SampleSize::Finite(n)
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSize::Finite(n) => write!(f, "{n}"),
            SampleSize::Infinite => write!(f, "inf"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleSizeResult {
    pub per_group_n: SampleSize,
    pub total_n: SampleSize,
}

impl From<SampleSize> for SampleSizeResult {
    fn from(per_group_n: SampleSize) -> Self {
        SampleSizeResult {
            per_group_n,
            total_n: per_group_n.doubled(),
        }
    }
}

impl From<u64> for SampleSizeResult {
    fn from(per_group_n: u64) -> Self {
        SampleSize::Finite(per_group_n).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up() {
        assert_eq!(SampleSize::from_continuous(142.246), SampleSize::Finite(143));
        assert_eq!(SampleSize::from_continuous(143.0), SampleSize::Finite(143));
        assert_eq!(SampleSize::from_continuous(0.2), SampleSize::Finite(1));
    }

    #[test]
    fn unrepresentable_is_infinite() {
        assert_eq!(SampleSize::from_continuous(f64::INFINITY), SampleSize::Infinite);
        assert_eq!(SampleSize::from_continuous(1e30), SampleSize::Infinite);
        assert_eq!(SampleSize::from_continuous(f64::NAN), SampleSize::Infinite);
    }

    #[test]
    fn total_is_twice_per_group() {
        let result = SampleSizeResult::from(14_745);
        assert_eq!(result.per_group_n, SampleSize::Finite(14_745));
        assert_eq!(result.total_n, SampleSize::Finite(29_490));
    }

    #[test]
    fn total_saturates_to_infinite() {
        let result = SampleSizeResult::from(SampleSize::Finite(u64::MAX));
        assert_eq!(result.total_n, SampleSize::Infinite);
        let result = SampleSizeResult::from(SampleSize::Infinite);
        assert_eq!(result.total_n, SampleSize::Infinite);
    }

    #[test]
    fn serializes_infinite_as_null() {
        let json = serde_json::to_string(&SampleSizeResult::from(SampleSize::Infinite)).unwrap();
        assert_eq!(json, r#"{"per_group_n":null,"total_n":null}"#);
        let json = serde_json::to_string(&SampleSizeResult::from(143)).unwrap();
        assert_eq!(json, r#"{"per_group_n":143,"total_n":286}"#);
    }

    #[test]
    fn display() {
        assert_eq!(SampleSize::Finite(12).to_string(), "12");
        assert_eq!(SampleSize::Infinite.to_string(), "inf");
    }
}
