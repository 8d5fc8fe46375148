use crate::error::{ParseError, ParseResult};
use std::ops::RangeInclusive;

/// Largest number of states a single range may expand to (2^20, the
/// builder's default register size).
pub const MAX_RANGE_EXPANSION: u64 = 1 << 20;

/// One comma-separated item of a marked-set expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkedItem {
    /// `a`
    Single(u64),
    /// `a..b`, end excluded
    HalfOpen(u64, u64),
    /// `a-b`, end included
    Inclusive(u64, u64),
}

impl MarkedItem {
    /// The states this item denotes, as an inclusive range.
    ///
    /// An empty half-open range comes back as an empty `1..=0`.
    pub fn expand(&self) -> ParseResult<RangeInclusive<u64>> {
        let (start, last) = match *self {
            MarkedItem::Single(v) => (v, v),
            MarkedItem::HalfOpen(start, end) if end < start => {
                return Err(ParseError::InvalidRange { start, end })
            }
            MarkedItem::HalfOpen(start, end) if end == start => return Ok(1..=0),
            MarkedItem::HalfOpen(start, end) => (start, end - 1),
            MarkedItem::Inclusive(start, end) if end < start => {
                return Err(ParseError::InvalidRange { start, end })
            }
            MarkedItem::Inclusive(start, end) => (start, end),
        };
        if last - start >= MAX_RANGE_EXPANSION {
            return Err(ParseError::RangeTooLarge {
                start,
                last,
                limit: MAX_RANGE_EXPANSION,
            });
        }
        Ok(start..=last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        assert_eq!(MarkedItem::Single(7).expand(), Ok(7..=7));
    }

    #[test]
    fn test_half_open_and_inclusive() {
        assert_eq!(MarkedItem::HalfOpen(0, 50).expand(), Ok(0..=49));
        assert_eq!(MarkedItem::Inclusive(100, 103).expand(), Ok(100..=103));
        assert_eq!(MarkedItem::HalfOpen(4, 4).expand().unwrap().count(), 0);
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(
            MarkedItem::Inclusive(9, 3).expand(),
            Err(ParseError::InvalidRange { start: 9, end: 3 })
        );
    }

    #[test]
    fn test_range_too_large() {
        let err = MarkedItem::HalfOpen(0, u64::MAX).expand().unwrap_err();
        assert!(matches!(err, ParseError::RangeTooLarge { .. }));
    }

    #[test]
    fn test_top_of_u64_kept() {
        assert_eq!(
            MarkedItem::Single(u64::MAX).expand().unwrap().collect::<Vec<_>>(),
            vec![u64::MAX]
        );
        assert_eq!(
            MarkedItem::Inclusive(u64::MAX - 1, u64::MAX)
                .expand()
                .unwrap()
                .collect::<Vec<_>>(),
            vec![u64::MAX - 1, u64::MAX]
        );
        assert_eq!(
            MarkedItem::HalfOpen(u64::MAX - 1, u64::MAX)
                .expand()
                .unwrap()
                .collect::<Vec<_>>(),
            vec![u64::MAX - 1]
        );
    }

    #[test]
    fn test_expansion_limit_is_inclusive() {
        assert_eq!(
            MarkedItem::HalfOpen(0, MAX_RANGE_EXPANSION).expand().unwrap().count() as u64,
            MAX_RANGE_EXPANSION
        );
        assert!(MarkedItem::Inclusive(0, MAX_RANGE_EXPANSION).expand().is_err());
    }
}
