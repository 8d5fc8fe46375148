//! Marked-set expressions.
//!
//! A marked set is written as comma-separated items: `a` for a single
//! state, `a..b` for a half-open range and `a-b` for an inclusive one, e.g.
//! `"0..50, 64, 100-103"`.

pub mod ast;
pub mod rules;

use self::rules::item_list;
use crate::error::{ParseError, ParseResult};
use nom::character::complete::multispace0;
use std::collections::BTreeSet;

fn skip_whitespace(input: &str) -> ParseResult<&str> {
    multispace0::<&str, nom::error::Error<&str>>(input)
        .map(|(rem, _)| rem)
        .map_err(|e| ParseError::Syntax(e.to_string()))
}

/// Parses a marked-set expression into an ascending set of states.
///
/// Blank input is the empty set.
///
/// ```
/// use zeta_grover::parser::parse_marked_set;
/// let set = parse_marked_set("5, 0..3, 9-10").unwrap();
/// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 5, 9, 10]);
/// ```
pub fn parse_marked_set(input: &str) -> ParseResult<BTreeSet<u64>> {
    let current_input = skip_whitespace(input)?;
    if current_input.is_empty() {
        return Ok(BTreeSet::new());
    }

    let (rem, items) =
        item_list(current_input).map_err(|_e| ParseError::Syntax(current_input.to_string()))?;

    let rem = skip_whitespace(rem)?;
    if !rem.is_empty() {
        return Err(ParseError::Syntax(rem.to_string()));
    }

    let mut marked = BTreeSet::new();
    for item in items {
        marked.extend(item.expand()?);
    }
    Ok(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_items() {
        let set = parse_marked_set("  0..3, 64 , 100-101 ").unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![0, 1, 2, 64, 100, 101]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = parse_marked_set("3, 3, 1-3").unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_blank_is_empty() {
        assert!(parse_marked_set("").unwrap().is_empty());
        assert!(parse_marked_set(" \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_trailing_garbage() {
        assert_eq!(
            parse_marked_set("1, 2 x"),
            Err(ParseError::Syntax("x".to_string()))
        );
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(
            parse_marked_set("1, 2,"),
            Err(ParseError::Syntax(",".to_string()))
        );
    }

    #[test]
    fn test_not_a_number() {
        assert!(matches!(
            parse_marked_set("abc"),
            Err(ParseError::Syntax(_))
        ));
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(
            parse_marked_set("10..2"),
            Err(ParseError::InvalidRange { start: 10, end: 2 })
        );
    }
}
