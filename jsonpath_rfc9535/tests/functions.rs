use serde_json::json;
use jsonpath_rfc9535::JsonPath;
#[cfg(feature = "trace")]
use test_log::test;

#[test]
fn length_function() {
    let value = json!([
        "a short string",
        "a longer string",
        "an unnecessarily long string",
    ]);
    let path = JsonPath::parse("$[? length(@) < 20 ]").unwrap();
    let nodes = path.query(&value).all();
    assert_eq!(nodes, vec!["a short string", "a longer string"]);
}

#[test]
fn count_function() {
    let value = json!({
        "authors": [
            { "books": ["a", "b"] },
            { "books": ["c"] },
            { "books": [] },
        ]
    });
    let path = JsonPath::parse("$.authors[? count(@.books.*) > 1]").unwrap();
    let nodes = path.query(&value).all();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].pointer("/books"), Some(&json!(["a", "b"])));
}

#[test]
fn match_function() {
    let value = json!([
        { "name": "foo123" },
        { "name": "bar" },
        { "name": "123baz" },
    ]);
    let path = JsonPath::parse(r"$[? match(@.name, '[a-z]+[0-9]+')]").unwrap();
    let nodes = path.query(&value).all();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].pointer("/name"), Some(&json!("foo123")));
}

#[test]
fn search_function() {
    let value = json!([
        { "name": "foo123" },
        { "name": "bar" },
        { "name": "123baz" },
    ]);
    let path = JsonPath::parse(r"$[? search(@.name, '[0-9]+')]").unwrap();
    let nodes = path.query(&value).all();
    assert_eq!(nodes.len(), 2);
}

#[test]
fn value_function() {
    let value = json!({
        "a": [{ "b": 1 }],
        "c": [{ "b": 2 }, { "b": 3 }],
    });
    let path = JsonPath::parse("$.*[? value(@.b) == 1]").unwrap();
    let nodes = path.query(&value).all();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0], &json!({"b": 1}));
}

#[test]
fn undefined_function_is_a_parse_error() {
    assert!(JsonPath::parse("$[? first(@.a) == 1]").is_err());
}

#[test]
fn wrong_argument_count_is_a_parse_error() {
    assert!(JsonPath::parse("$[? length(@.a, @.b) == 1]").is_err());
}

#[test]
fn wrong_argument_type_is_a_parse_error() {
    // `count` expects a nodelist, not a value literal
    assert!(JsonPath::parse("$[? count(1) == 1]").is_err());
}
