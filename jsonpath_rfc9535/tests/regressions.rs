use serde_json::json;
use jsonpath_rfc9535::JsonPath;
#[cfg(feature = "trace")]
use test_log::test;

// A parenthesized comparison inside a filter must not be misparsed as a bare
// existence test on the left-hand singular path.
#[test]
fn parenthesized_filter_comparison() {
    let value = json!({"a": 1, "b": 2});
    let path = JsonPath::parse("$[?(@.a == 2)]").expect("parses JSONPath");
    assert!(path.query(&value).is_empty());
}
