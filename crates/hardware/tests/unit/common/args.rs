//! # Runtime Argument Tests

use rstest::rstest;
use tbsim_core::common::args::{PlusArg, find};

#[rstest]
#[case("+trace", Some(("trace", "")))]
#[case("+seed=9", Some(("seed", "9")))]
#[case("+a=b=c", Some(("a", "b=c")))]
#[case("+verilator+seed+3", Some(("verilator+seed+3", "")))]
#[case("+", None)]
#[case("trace", None)]
#[case("--trace", None)]
#[case("", None)]
fn parse_cases(#[case] raw: &str, #[case] expected: Option<(&str, &str)>) {
    let parsed = PlusArg::parse(raw).map(|arg| (arg.name, arg.value));
    assert_eq!(parsed, expected);
}

#[test]
fn find_skips_non_plus_arguments() {
    let args = vec!["seed=1".to_string(), "+seed=2".to_string()];
    assert_eq!(find(&args, "seed"), Some("2"));
}

#[test]
fn find_on_empty_list() {
    assert_eq!(find(&[], "seed"), None);
}
