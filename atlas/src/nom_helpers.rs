use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{digit1, space0},
    combinator::{all_consuming, map, map_res, opt, recognize, rest},
    multi::separated_list1,
    sequence::{preceded, separated_pair, terminated},
    IResult as _IResult,
};

use crate::Insets;

pub type IResult<'a, T> = _IResult<&'a str, T>;

pub fn _number(i: &str) -> IResult<i64> {
    map_res(recognize(preceded(opt(tag("-")), digit1)), |s: &str| {
        s.parse::<i64>()
    })(i)
}

pub fn number(i: &str) -> IResult<i64> {
    preceded(space0, _number)(i)
}

/// `1, 2, 3` or `1,2,3`. Must consume the whole input.
pub fn number_list(i: &str) -> IResult<Vec<i64>> {
    all_consuming(terminated(
        separated_list1(preceded(space0, tag(",")), number),
        space0,
    ))(i)
}

/// Splits `key: value` at the first colon. Both sides are trimmed.
pub fn key_value(i: &str) -> IResult<(&str, &str)> {
    separated_pair(
        map(take_till(|c| c == ':'), str::trim),
        tag(":"),
        map(rest, str::trim),
    )(i)
}

fn numbers<const N: usize>(value: &str) -> Option<[i64; N]> {
    let (_, res) = number_list(value).ok()?;

    res.try_into().ok()
}

/// `x, y` where both are non-negative.
pub fn point(value: &str) -> Option<(u32, u32)> {
    let [x, y] = numbers::<2>(value)?;

    Some((u32::try_from(x).ok()?, u32::try_from(y).ok()?))
}

/// `width, height` where both are positive.
pub fn dimensions(value: &str) -> Option<(u32, u32)> {
    let (width, height) = point(value)?;

    (width > 0 && height > 0).then_some((width, height))
}

pub fn insets(value: &str) -> Option<Insets> {
    let values = numbers::<4>(value)?;
    let mut res = [0i32; 4];

    for (dst, src) in res.iter_mut().zip(values) {
        *dst = i32::try_from(src).ok()?;
    }

    Some(res)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn number_list_spacing() {
        assert_eq!(number_list("1, 2").unwrap().1, vec![1, 2]);
        assert_eq!(number_list("2048,2048").unwrap().1, vec![2048, 2048]);
        assert_eq!(number_list(" -1 , 3 ").unwrap().1, vec![-1, 3]);
        assert!(number_list("1, two").is_err());
        assert!(number_list("").is_err());
    }

    #[test]
    fn key_value_split() {
        assert_eq!(key_value("xy: 1, 2").unwrap().1, ("xy", "1, 2"));
        assert_eq!(key_value("  filter: Nearest,Nearest").unwrap().1, ("filter", "Nearest,Nearest"));
    }

    #[test]
    fn geometry_values() {
        assert_eq!(point("0, 7"), Some((0, 7)));
        assert_eq!(point("-1, 7"), None);
        assert_eq!(point("1, 2, 3"), None);
        assert_eq!(dimensions("0, 7"), None);
        assert_eq!(dimensions("3, 7"), Some((3, 7)));
        assert_eq!(insets("5, 5, 5, 4"), Some([5, 5, 5, 4]));
        assert_eq!(insets("5, 5, 5"), None);
    }
}
