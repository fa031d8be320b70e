use chrono::NaiveDate;
use stash_core::{Bind, BoxError, Error, Fields, InputError, Kind, Value, bind, bind_line, parse};

/// Upper-cases whatever it is given.
#[derive(Debug, Default, PartialEq)]
struct Shouty(String);

impl Value for Shouty {
    const KIND: Kind = Kind::Custom("shouty");

    fn parse(input: &str) -> Result<Self, BoxError> {
        Ok(Shouty(input.to_uppercase()))
    }
}

#[derive(Debug, Default, PartialEq)]
struct Everything {
    foo: String,
    bar: String,
    qux: i64,
    quux: NaiveDate,
    corge: Option<bool>,
    grault: bool,
    garply: String,
    waldo: Vec<String>,
    fred: String,
    plugh: Shouty,
    remaining: Vec<String>,
}

impl Bind for Everything {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .field("Foo", "", |d| &mut d.foo)
            .field("Bar", "baz", |d| &mut d.bar)
            .field("Qux", "", |d| &mut d.qux)
            .field("Quux", "", |d| &mut d.quux)
            .optional("Corge", "", |d| &mut d.corge)
            .field("Grault", "", |d| &mut d.grault)
            .field("Garply", ",positional", |d| &mut d.garply)
            .list("Waldo", "", |d| &mut d.waldo)
            .field("Fred", ",positional", |d| &mut d.fred)
            .field("Plugh", "", |d| &mut d.plugh)
            .list("Remaining", ",positional", |d| &mut d.remaining);
    }
}

#[test]
fn binds_named_positional_and_shorthand_arguments() {
    let line = r#"foo=bar baz=foo qux=99 quux=2025-09-12 corge grault=false "garply value" waldo=foo waldo=bar fred plugh=custom remaining1 remaining2"#;

    let bound: Everything = bind_line(line).unwrap();

    assert_eq!(
        bound,
        Everything {
            foo: "bar".into(),
            bar: "foo".into(),
            qux: 99,
            quux: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
            corge: Some(true),
            grault: false,
            garply: "garply value".into(),
            waldo: vec!["foo".into(), "bar".into()],
            fred: "fred".into(),
            plugh: Shouty("CUSTOM".into()),
            remaining: vec!["remaining1".into(), "remaining2".into()],
        }
    );
}

#[test]
fn explicit_value_overrides_shorthand() {
    let bound: Everything = bind_line("corge=false grault").unwrap();
    assert_eq!(bound.corge, Some(false));
    assert!(bound.grault);
}

#[test]
fn field_identifier_is_not_a_binding_name_when_tagged() {
    let err = bind_line::<Everything>("bar=1").unwrap_err();
    assert_eq!(err.to_string(), "unrecognised argument: 'bar=1'");
}

#[derive(Debug, Default)]
struct Pair {
    first: String,
    second: String,
}

impl Bind for Pair {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .field("First", ",positional", |d| &mut d.first)
            .field("Second", ",positional", |d| &mut d.second);
    }
}

#[test]
fn surplus_positional_argument_is_unrecognised() {
    let mut pair = Pair::default();
    let err = bind(parse("a b 'c d'"), &mut pair).unwrap_err();

    assert!(matches!(&err, Error::Input(InputError::Unrecognised(raw)) if raw == "'c d'"));
    assert_eq!(err.to_string(), "unrecognised argument: ''c d''");
    assert_eq!((pair.first.as_str(), pair.second.as_str()), ("a", "b"));
}

#[test]
fn coercion_failures_report_value_and_kind() {
    let cases = [
        ("qux=ninety", "invalid value: failed to parse 'ninety' as int: invalid digit found in string"),
        (
            "quux=2025-09-12T10:00",
            "invalid value: failed to parse '2025-09-12T10:00' as date: expected a date in YYYY-MM-DD form",
        ),
        (
            "grault=yes",
            "invalid value: failed to parse 'yes' as bool: expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False",
        ),
    ];

    for (line, expected) in cases {
        let err = bind_line::<Everything>(line).unwrap_err();
        assert!(err.is_user_facing());
        assert_eq!(err.to_string(), expected, "{line}");
    }
}

/// Accepts only a fixed set of words.
#[derive(Debug, Default, PartialEq)]
enum Level {
    #[default]
    Low,
    High,
}

impl Value for Level {
    const KIND: Kind = Kind::Custom("level");

    fn parse(input: &str) -> Result<Self, BoxError> {
        match input {
            "low" => Ok(Level::Low),
            "high" => Ok(Level::High),
            other => Err(format!("unknown level {other:?}").into()),
        }
    }
}

#[derive(Debug, Default)]
struct Levels {
    level: Level,
    history: Vec<Level>,
}

impl Bind for Levels {
    fn fields(fields: &mut Fields<Self>) {
        fields
            .field("Level", "", |d| &mut d.level)
            .list("History", ",positional", |d| &mut d.history);
    }
}

#[test]
fn custom_values_own_their_parsing() {
    let levels: Levels = bind_line("level=high low high").unwrap();
    assert_eq!(levels.level, Level::High);
    assert_eq!(levels.history, [Level::Low, Level::High]);

    let err = bind_line::<Levels>("level=max").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"invalid value: failed to parse 'max' as level: unknown level "max""#
    );
}

#[test]
fn field_table_is_introspectable() {
    let fields = stash_core::describe::<Everything>().unwrap();
    let positional: Vec<&str> = fields.positional().iter().map(|f| f.name()).collect();

    assert_eq!(fields.len(), 11);
    assert_eq!(positional, ["garply", "fred", "remaining"]);
    assert!(fields.get("corge").unwrap().is_flag());
    assert!(!fields.get("waldo").unwrap().is_flag());
    assert_eq!(fields.get("baz").unwrap().ident(), "Bar");
}
