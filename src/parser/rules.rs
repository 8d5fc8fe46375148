use super::ast::MarkedItem;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0},
    combinator::{map, map_res},
    multi::separated_list1,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};

// --- Helpers ---

fn u64_parser(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>())(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

// --- Marked-set items ---

pub fn half_open(input: &str) -> IResult<&str, MarkedItem> {
    map(
        separated_pair(u64_parser, tuple((space0, tag(".."), space0)), u64_parser),
        |(start, end)| MarkedItem::HalfOpen(start, end),
    )(input)
}

pub fn inclusive(input: &str) -> IResult<&str, MarkedItem> {
    map(
        separated_pair(u64_parser, tuple((space0, char('-'), space0)), u64_parser),
        |(start, end)| MarkedItem::Inclusive(start, end),
    )(input)
}

pub fn single(input: &str) -> IResult<&str, MarkedItem> {
    map(u64_parser, MarkedItem::Single)(input)
}

pub fn item(input: &str) -> IResult<&str, MarkedItem> {
    alt((half_open, inclusive, single))(input)
}

pub fn item_list(input: &str) -> IResult<&str, Vec<MarkedItem>> {
    separated_list1(comma, item)(input)
}
