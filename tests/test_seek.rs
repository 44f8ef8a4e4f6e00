use std::io::{ Cursor, ErrorKind, Seek, SeekFrom };

use bintag_parse::{ Anchor, FieldOffset, Fields, ReadPlan, parse_read_plan };

fn stream() -> Cursor<Vec<u8>> {
    Cursor::new((0u8..32).collect())
}

#[test]
fn test_offset_conversion() {
    assert_eq!(
        SeekFrom::try_from(FieldOffset::new(8, Anchor::Start)).unwrap(),
        SeekFrom::Start(8)
    );
    assert_eq!(
        SeekFrom::try_from(FieldOffset::new(-2, Anchor::Current)).unwrap(),
        SeekFrom::Current(-2)
    );
    assert_eq!(
        SeekFrom::try_from(FieldOffset::new(-4, Anchor::End)).unwrap(),
        SeekFrom::End(-4)
    );

    let err = SeekFrom::try_from(FieldOffset::new(-1, Anchor::Start)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_apply_offsets_in_order() {
    let fields = Fields::new().with("Header", 8u8);
    let plan = parse_read_plan(&fields, "offsetStart:Header,offset:4").unwrap();
    let mut s = stream();
    assert_eq!(plan.apply_offsets(&mut s).unwrap(), 12);
    assert_eq!(s.position(), 12);

    let plan = parse_read_plan(&fields, "offset:4,offsetEnd:-4,offset:-2").unwrap();
    let mut s = stream();
    assert_eq!(plan.apply_offsets(&mut s).unwrap(), 26);
}

#[test]
fn test_apply_without_offsets() {
    let mut s = stream();
    s.seek(SeekFrom::Start(5)).unwrap();
    assert_eq!(ReadPlan::default().apply_offsets(&mut s).unwrap(), 5);
}

#[test]
fn test_apply_stops_at_first_failure() {
    let plan = parse_read_plan(&Fields::new(), "offset:3,offsetStart:-1,offset:10").unwrap();
    let mut s = stream();
    let err = plan.apply_offsets(&mut s).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(s.position(), 3);

    let seeks: Vec<_> = plan.seek_positions().collect();
    assert_eq!(seeks.len(), 3);
    assert!(seeks[1].is_err());
}
