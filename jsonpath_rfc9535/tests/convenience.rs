use serde_json::json;
use jsonpath_rfc9535::{find, find_one};
#[cfg(feature = "trace")]
use test_log::test;

#[test]
fn find_returns_all_matches() {
    let value = json!({"foo": [1, 2, 3]});
    let nodes = find("$.foo[*]", &value).unwrap();
    assert_eq!(nodes.all(), vec![1, 2, 3]);
}

#[test]
fn find_one_returns_first_match() {
    let value = json!({"foo": [1, 2, 3]});
    let node = find_one("$.foo[*]", &value).unwrap();
    assert_eq!(node, Some(&json!(1)));
}

#[test]
fn find_one_returns_none_when_empty() {
    let value = json!({"foo": []});
    let node = find_one("$.foo[*]", &value).unwrap();
    assert_eq!(node, None);
}

#[test]
fn find_propagates_parse_errors() {
    let value = json!({});
    assert!(find("not a query", &value).is_err());
    assert!(find_one("not a query", &value).is_err());
}
