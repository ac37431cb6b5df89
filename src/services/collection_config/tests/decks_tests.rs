use super::*;

#[test]
fn test_parse_decks_valid() {
    let json = r#"{
        "1": {"id": 1, "name": "Default", "desc": "", "collapsed": false},
        "1342697561420": {"id": 1342697561420, "name": "Countries of the World", "desc": "All of them"}
    }"#;

    let decks = parse_decks(json).unwrap();
    assert_eq!(decks.len(), 2);
    assert_eq!(decks[&1].name, "Default");
    assert_eq!(decks[&1_342_697_561_420].name, "Countries of the World");
    assert_eq!(decks[&1_342_697_561_420].desc, "All of them");
}

#[test]
fn test_parse_decks_description_defaults_to_empty() {
    let decks = parse_decks(r#"{"1": {"name": "Default"}}"#).unwrap();
    assert_eq!(decks[&1].desc, "");
}

#[test]
fn test_parse_decks_missing_name() {
    let err = parse_decks(r#"{"1": {"desc": "nameless"}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json { blob: "decks", .. }));
}

#[test]
fn test_parse_decks_non_integer_key() {
    let err = parse_decks(r#"{"1.5": {"name": "x"}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidKey { blob: "decks", .. }));
}

#[test]
fn test_parse_decks_not_an_object() {
    assert!(parse_decks("[]").is_err());
}
