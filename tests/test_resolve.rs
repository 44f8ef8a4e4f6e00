use bintag_parse::{
    Anchor,
    Error,
    ErrorKind,
    FieldAccessor,
    FieldOffset,
    FieldValue,
    Fields,
    IgnorePolicy,
    ReadPlan,
    ResolveOptions,
    impl_field_accessor,
    parse_read_plan,
    parse_tag,
    resolve_read_plan,
    resolve_read_plan_with,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn plan<A: FieldAccessor + ?Sized>(instance: &A, source: &str) -> ReadPlan {
    init_logger();
    match parse_read_plan(instance, source) {
        Ok(plan) => plan,
        Err(e) => panic!("{}", e.full_message(source)),
    }
}

fn plan_error<A: FieldAccessor + ?Sized>(instance: &A, source: &str) -> Error {
    init_logger();
    parse_read_plan(instance, source).unwrap_err()
}

struct Header {
    magic: [u8; 4],
    count: u32,
    skip: i8,
    table_offset: u64,
    tail: i64,
    width: usize,
    name: String,
}

impl_field_accessor!(Header { magic, count, skip, table_offset, tail, width, name });

fn header() -> Header {
    Header {
        magic: *b"BINT",
        count: 42,
        skip: -3,
        table_offset: 128,
        tail: -16,
        width: 7,
        name: "header".to_string(),
    }
}

#[test]
fn test_literal_values() {
    let fields = Fields::new();
    let p = plan(&fields, "len:10");
    assert_eq!(p.length, Some(10));
    assert!(p.offsets.is_empty());
    assert_eq!(p.func_name, None);
    assert_eq!(p.element, None);
    assert!(!p.is_ignored());

    assert_eq!(plan(&fields, "len:+7").length, Some(7));
    assert_eq!(plan(&fields, "offsetEnd:-8").offsets, vec![FieldOffset::new(-8, Anchor::End)]);
}

#[test]
fn test_field_references() {
    let fields = Fields::new().with("Count", 42u32);
    assert_eq!(plan(&fields, "len:Count").length, Some(42));

    let h = header();
    let p = plan(&h, "len:count,offsetStart:table_offset,offset:skip,offsetEnd:tail");
    assert_eq!(p.length, Some(42));
    assert_eq!(
        p.offsets,
        vec![
            FieldOffset::new(128, Anchor::Start),
            FieldOffset::new(-3, Anchor::Current),
            FieldOffset::new(-16, Anchor::End),
        ]
    );
    assert_eq!(plan(&h, "len:width").length, Some(7));
}

#[test]
fn test_literal_takes_precedence() {
    let fields = Fields::new().with("10", 99u8);
    assert_eq!(plan(&fields, "len:10").length, Some(10));
}

#[test]
fn test_unresolvable_references() {
    let fields = Fields::new()
        .with("Name", FieldValue::Other)
        .with("Huge", u64::MAX)
        .with("Max", i64::MAX as u64);

    let err = plan_error(&fields, "len:abc");
    assert_eq!(err, Error::UnresolvableReference("abc".into()));
    assert_eq!(err.kind(), ErrorKind::UnresolvableReference);
    assert_eq!(err.full_message("len:abc"), "Unresolvable reference 'abc': no such field");

    let err = plan_error(&fields, "offset:Name");
    assert_eq!(err, Error::NonIntegerField("Name".into()));
    assert_eq!(err.kind(), ErrorKind::UnresolvableReference);

    let err = plan_error(&fields, "offsetStart:Huge");
    assert_eq!(err, Error::ReferenceOutOfRange("Huge".into(), u64::MAX));
    assert_eq!(err.kind(), ErrorKind::UnresolvableReference);

    assert_eq!(plan(&fields, "len:Max").length, Some(i64::MAX));

    let h = header();
    assert_eq!(plan_error(&h, "len:name"), Error::NonIntegerField("name".into()));
    assert_eq!(plan_error(&h, "len:magic"), Error::NonIntegerField("magic".into()));
}

#[test]
fn test_errors_abort_plan() {
    let fields = Fields::new().with("Count", 1u8);
    let err = plan_error(&fields, "len:Count,offset:Missing,Decode");
    assert_eq!(err, Error::UnresolvableReference("Missing".into()));

    let err = plan_error(&fields, "len:Count,[len:Missing]");
    assert_eq!(err, Error::UnresolvableReference("Missing".into()));

    // Tokenizer errors surface unchanged.
    let err = plan_error(&fields, "len:Count,[len:2");
    assert_eq!(err.kind(), ErrorKind::MalformedTag);
}

#[test]
fn test_ignore_dominates() {
    let fields = Fields::new();
    let p = plan(&fields, "-,len:10");
    assert!(p.ignore);
    assert_eq!(p.length, None);
    assert_eq!(p, ReadPlan::ignored());

    // Directives before the marker are discarded too.
    assert_eq!(plan(&fields, "len:10,offset:4,Decode,-"), ReadPlan::ignored());

    // Nothing after the marker is resolved.
    assert_eq!(plan(&fields, "-,len:Missing"), ReadPlan::ignored());

    let p = plan(&fields, "len:3,[-]");
    assert_eq!(p.length, Some(3));
    assert_eq!(p.element(), Some(&ReadPlan::ignored()));
}

#[test]
fn test_leading_ignore_policy() {
    let fields = Fields::new();
    let options = ResolveOptions::new().with_ignore_policy(IgnorePolicy::Leading);
    let resolve = |source: &str| {
        let tags = parse_tag(source).unwrap();
        resolve_read_plan_with(&fields, &tags, &options)
    };

    assert_eq!(resolve("-,len:1").unwrap(), ReadPlan::ignored());
    assert_eq!(resolve("len:1,-").unwrap_err(), Error::MisplacedIgnore(1));
    assert_eq!(resolve("[len:1,-]").unwrap_err(), Error::MisplacedIgnore(1));
    assert_eq!(resolve("len:1,[-]").unwrap().element(), Some(&ReadPlan::ignored()));
    assert_eq!(resolve("len:1,-").unwrap_err().kind(), ErrorKind::MalformedTag);

    assert_eq!(ResolveOptions::default().ignore_policy, IgnorePolicy::Anywhere);
}

#[test]
fn test_last_wins_and_additive() {
    let fields = Fields::new();
    let p = plan(&fields, "len:1,len:2,func:A,B");
    assert_eq!(p.length, Some(2));
    assert_eq!(p.func_name.as_deref(), Some("B"));

    let p = plan(&fields, "offset:5,offset:3");
    assert_eq!(
        p.offsets,
        vec![FieldOffset::new(5, Anchor::Current), FieldOffset::new(3, Anchor::Current)]
    );
}

#[test]
fn test_element_uses_enclosing_instance() {
    let h = header();
    let p = plan(&h, "len:count,[len:width,func:DecodeItem,[offset:skip]]");
    assert_eq!(p.length, Some(42));

    let element = p.element().unwrap();
    assert_eq!(element.length, Some(7));
    assert_eq!(element.func_name.as_deref(), Some("DecodeItem"));

    let nested = element.element().unwrap();
    assert_eq!(nested.offsets, vec![FieldOffset::new(-3, Anchor::Current)]);
    assert_eq!(nested.element, None);
}

#[test]
fn test_resolution_is_repeatable() {
    let h = header();
    let tags = parse_tag("len:count,offsetStart:4,[len:2,func:Decode]").unwrap();
    let first = resolve_read_plan(&h, &tags).unwrap();
    let second = resolve_read_plan(&h, &tags).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_resolution_follows_instance_state() {
    let mut fields = Fields::new().with("Count", 2u16);
    let tags = parse_tag("len:Count").unwrap();
    assert_eq!(resolve_read_plan(&fields, &tags).unwrap().length, Some(2));

    fields.insert("Count", 9u16);
    assert_eq!(resolve_read_plan(&fields, &tags).unwrap().length, Some(9));

    fields.remove("Count");
    assert_eq!(
        resolve_read_plan(&fields, &tags).unwrap_err(),
        Error::UnresolvableReference("Count".into())
    );
}

#[test]
fn test_trait_objects_and_custom_accessors() {
    struct Counter(i32);

    impl FieldAccessor for Counter {
        fn field_value(&self, name: &str) -> Option<FieldValue> {
            (name == "N").then(|| FieldValue::from(self.0))
        }
    }

    let counter = Counter(-5);
    assert_eq!(counter.integer_field("N"), Some(-5));
    assert_eq!(counter.integer_field("M"), None);

    let dynamic: Box<dyn FieldAccessor> = Box::new(Counter(11));
    assert_eq!(plan(&dynamic, "len:N").length, Some(11));
    assert_eq!(plan(dynamic.as_ref(), "offset:N").offsets, vec![FieldOffset::new(11, Anchor::Current)]);
}

#[test]
fn test_fields_registry() {
    let fields: Fields = [("A", 1u8), ("B", 2u8)].into_iter().collect();
    assert_eq!(fields.len(), 2);
    assert!(!fields.is_empty());
    assert_eq!(
        fields.iter().collect::<Vec<_>>(),
        vec![("A", FieldValue::Unsigned(1)), ("B", FieldValue::Unsigned(2))]
    );
    assert_eq!(fields.field_value("C"), None);
    assert!(FieldValue::Signed(-1).is_integer());
    assert!(!FieldValue::Other.is_integer());
    assert_eq!(FieldValue::Unsigned(u64::MAX).as_i64(), None);
}
