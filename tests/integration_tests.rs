//! End-to-end coverage of the static (non-polymorphic) dispatch paths.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use polyarc::{
    as_binary, as_binary_mut, InputArchive, Load, OutputArchive, OwnedInputArchive, PolyarcError,
    Result, Save,
};

fn roundtrip<T>(value: &T) -> T
where
    T: Save + Load + Default,
{
    let mut data = Vec::new();
    OutputArchive::new(&mut data)
        .save(value)
        .expect("save failed");
    let mut loaded = T::default();
    InputArchive::new(&data)
        .load(&mut loaded)
        .expect("load failed");
    loaded
}

// --- Scalars and user hooks ---

#[derive(Save, Load, Default, Debug, PartialEq, Clone)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn scalar_pair_exact_bytes() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&Point { x: 1337, y: 1338 })?;

    let mut expected = Vec::new();
    expected.extend_from_slice(&1337i32.to_ne_bytes());
    expected.extend_from_slice(&1338i32.to_ne_bytes());
    assert_eq!(data, expected);
    assert_eq!(data.len(), 8);

    #[cfg(target_endian = "little")]
    assert_eq!(data, [0x39, 0x05, 0x00, 0x00, 0x3A, 0x05, 0x00, 0x00]);

    let mut point = Point::default();
    InputArchive::new(&data).load(&mut point)?;
    assert_eq!(point, Point { x: 1337, y: 1338 });
    Ok(())
}

#[test]
fn all_scalar_widths_roundtrip() {
    assert_eq!(roundtrip(&0xABu8), 0xAB);
    assert_eq!(roundtrip(&0xABCDu16), 0xABCD);
    assert_eq!(roundtrip(&0xABCD_EF01u32), 0xABCD_EF01);
    assert_eq!(roundtrip(&0xABCD_EF01_2345_6789u64), 0xABCD_EF01_2345_6789);
    assert_eq!(roundtrip(&-7i8), -7);
    assert_eq!(roundtrip(&-7000i16), -7000);
    assert_eq!(roundtrip(&-70_000i32), -70_000);
    assert_eq!(roundtrip(&-7_000_000_000i64), -7_000_000_000);
    assert_eq!(roundtrip(&1.5f32), 1.5);
    assert_eq!(roundtrip(&-2.25f64), -2.25);
    assert!(roundtrip(&true));
    assert!(!roundtrip(&false));
}

#[test]
fn bool_is_one_byte() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&(true, false))?;
    assert_eq!(data, [1, 0]);
    Ok(())
}

#[test]
fn tuples_are_batches() -> Result<()> {
    // A tuple at top level encodes its components back to back, so a
    // multi-value save and component-wise saves produce identical bytes.
    let mut batched = Vec::new();
    OutputArchive::new(&mut batched).save(&(7u16, 9u32, true))?;

    let mut sequential = Vec::new();
    let mut out = OutputArchive::new(&mut sequential);
    out.save(&7u16)?;
    out.save(&9u32)?;
    out.save(&true)?;
    drop(out);

    assert_eq!(batched, sequential);
    Ok(())
}

// --- Strings and sequences ---

#[test]
fn string_exact_bytes() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&String::from("1337"))?;

    let mut expected = Vec::new();
    expected.extend_from_slice(&4u32.to_ne_bytes());
    expected.extend_from_slice(b"1337");
    assert_eq!(data, expected);

    assert_eq!(roundtrip(&String::from("1337")), "1337");
    Ok(())
}

#[test]
fn malformed_utf8_is_rejected() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&2u32)?; // length prefix
    data.extend_from_slice(&[0xFF, 0xFE]);

    let mut loaded = String::new();
    let err = InputArchive::new(&data)
        .load(&mut loaded)
        .expect_err("invalid UTF-8 must not load");
    assert!(matches!(err, PolyarcError::InvalidValue(_)));
    Ok(())
}

#[test]
fn vec_length_prefix_and_fast_path() -> Result<()> {
    let values = vec![10u32, 20, 30];
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&values)?;

    let mut expected = Vec::new();
    expected.extend_from_slice(&3u32.to_ne_bytes());
    for v in &values {
        expected.extend_from_slice(&v.to_ne_bytes());
    }
    assert_eq!(data, expected);

    assert_eq!(roundtrip(&values), values);
    assert_eq!(roundtrip(&Vec::<u32>::new()), Vec::<u32>::new());
    Ok(())
}

#[test]
fn vec_of_composites_roundtrip() {
    let points = vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }];
    assert_eq!(roundtrip(&points), points);

    let nested = vec![vec![1u8, 2], vec![], vec![3]];
    assert_eq!(roundtrip(&nested), nested);
}

#[test]
fn vec_load_replaces_existing_contents() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&vec![5u16, 6])?;

    let mut target = vec![1u16, 2, 3, 4];
    InputArchive::new(&data).load(&mut target)?;
    assert_eq!(target, [5, 6]);
    Ok(())
}

#[test]
fn deque_roundtrip() {
    let deque: VecDeque<i16> = [-1, 0, 1, 2].into_iter().collect();
    assert_eq!(roundtrip(&deque), deque);
}

// --- Associative containers ---

#[test]
fn map_and_set_roundtrip() {
    let mut map = HashMap::new();
    map.insert(String::from("alpha"), 1u32);
    map.insert(String::from("beta"), 2);
    assert_eq!(roundtrip(&map), map);

    let tree: BTreeMap<u8, String> = [(1, "one".into()), (2, "two".into())].into();
    assert_eq!(roundtrip(&tree), tree);

    let set: HashSet<u64> = [3, 5, 8].into_iter().collect();
    assert_eq!(roundtrip(&set), set);

    let tree_set: BTreeSet<String> = ["x".into(), "y".into()].into_iter().collect();
    assert_eq!(roundtrip(&tree_set), tree_set);
}

#[test]
fn map_header_matches_sequence_header() -> Result<()> {
    let tree: BTreeMap<u8, u8> = [(1, 10), (2, 20), (3, 30)].into();
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&tree)?;

    assert_eq!(data[..4], 3u32.to_ne_bytes());
    // BTreeMap iterates in key order: entries are (key, value) pairs.
    assert_eq!(data[4..], [1, 10, 2, 20, 3, 30]);
    Ok(())
}

// --- Fixed arrays, enums, raw binary ---

#[test]
fn arrays_have_no_header() -> Result<()> {
    let array = [7u8, 8, 9];
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&array)?;
    assert_eq!(data, [7, 8, 9]);

    assert_eq!(roundtrip(&array), array);

    let strings = [String::from("a"), String::from("bc")];
    assert_eq!(roundtrip(&strings), strings);
    Ok(())
}

#[derive(Save, Load, Default, Debug, PartialEq, Clone, Copy)]
#[repr(u8)]
enum Mode {
    #[default]
    Idle,
    Active = 5,
    Halted,
}

#[test]
fn enums_use_their_underlying_integer() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&Mode::Active)?;
    assert_eq!(data, [5]);

    assert_eq!(roundtrip(&Mode::Halted), Mode::Halted);
    assert_eq!(roundtrip(&vec![Mode::Idle, Mode::Active]), vec![Mode::Idle, Mode::Active]);
    Ok(())
}

#[test]
fn unknown_discriminant_is_rejected() {
    let data = [9u8];
    let mut mode = Mode::default();
    let err = InputArchive::new(&data)
        .load(&mut mode)
        .expect_err("9 is not a Mode");
    assert!(matches!(err, PolyarcError::InvalidValue(_)));
}

#[test]
fn raw_binary_has_no_framing() -> Result<()> {
    let samples = [0x0102u16, 0x0304, 0x0506];
    let wrapped = as_binary(&samples);
    assert_eq!(wrapped.len(), 3);
    assert!(!wrapped.is_empty());
    assert_eq!(wrapped.size_in_bytes(), 6);

    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&wrapped)?;
    assert_eq!(data.len(), wrapped.size_in_bytes()); // count * size, no prefix

    let mut restored = [0u16; 3];
    let mut target = as_binary_mut(&mut restored);
    assert_eq!(target.len(), 3);
    assert!(!target.is_empty());
    InputArchive::new(&data).load(&mut target)?;
    assert_eq!(restored, samples);

    let nothing: [u16; 0] = [];
    let empty = as_binary(&nothing);
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
    assert_eq!(empty.size_in_bytes(), 0);
    Ok(())
}

// --- Owning handles ---

#[test]
fn boxed_values_encode_as_their_payload() -> Result<()> {
    let boxed = Box::new(Point { x: 8, y: 9 });
    let mut with_box = Vec::new();
    OutputArchive::new(&mut with_box).save(&boxed)?;

    let mut without_box = Vec::new();
    OutputArchive::new(&mut without_box).save(&Point { x: 8, y: 9 })?;
    assert_eq!(with_box, without_box);

    assert_eq!(*roundtrip(&boxed), Point { x: 8, y: 9 });
    Ok(())
}

#[test]
fn optional_handle_roundtrip() -> Result<()> {
    let handle = Some(Box::new(Point { x: 1, y: -1 }));
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&handle)?;

    let mut loaded: Option<Box<Point>> = None;
    InputArchive::new(&data).load(&mut loaded)?;
    assert_eq!(loaded.as_deref(), Some(&Point { x: 1, y: -1 }));
    Ok(())
}

#[test]
fn empty_handle_is_rejected_and_sink_is_unchanged() -> Result<()> {
    let mut data = Vec::new();
    let mut out = OutputArchive::new(&mut data);
    out.save(&7u32)?;

    let handle: Option<Box<u32>> = None;
    let err = out.save(&handle).expect_err("null handles must not save");
    assert!(matches!(err, PolyarcError::NullHandle(_)));
    drop(out);

    // Only the first operation's bytes remain.
    assert_eq!(data, 7u32.to_ne_bytes());
    Ok(())
}

// --- Archive mechanics ---

#[test]
fn operations_concatenate_in_submission_order() -> Result<()> {
    let mut data = Vec::new();
    let mut out = OutputArchive::new(&mut data);
    out.save(&1u8)?;
    out.save(&String::from("ab"))?;
    out.save(&2u8)?;
    drop(out);

    let mut expected = vec![1u8];
    expected.extend_from_slice(&2u32.to_ne_bytes());
    expected.extend_from_slice(b"ab");
    expected.push(2);
    assert_eq!(data, expected);
    Ok(())
}

#[test]
fn sink_appends_after_existing_content() -> Result<()> {
    let mut data = vec![0xEE, 0xFF];
    OutputArchive::new(&mut data).save(&7u8)?;
    assert_eq!(data, [0xEE, 0xFF, 7]);
    Ok(())
}

#[test]
fn view_cursor_advances_by_value_size() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&(1u64, 2u32))?;

    let mut input = InputArchive::new(&data);
    let mut first = 0u64;
    input.load(&mut first)?;
    assert_eq!(input.offset(), 8);
    assert_eq!(input.remaining(), 4);

    let mut second = 0u32;
    input.load(&mut second)?;
    assert_eq!(input.offset(), 12);
    assert_eq!((first, second), (1, 2));
    Ok(())
}

#[test]
fn short_read_fails_without_consuming() {
    let data = [1u8, 2];
    let mut input = InputArchive::new(&data);
    let mut value = 0u32;
    let err = input.load(&mut value).expect_err("two bytes cannot load a u32");
    assert!(matches!(err, PolyarcError::OutOfRange(_)));
    assert_eq!(input.offset(), 0);
}

#[test]
fn owned_input_erases_consumed_prefix() -> Result<()> {
    let mut data = Vec::new();
    let mut out = OutputArchive::new(&mut data);
    out.save(&11u16)?;
    out.save(&22u16)?;
    drop(out);

    let mut input = OwnedInputArchive::new(&mut data);
    let mut first = 0u16;
    input.load(&mut first)?;
    assert_eq!(first, 11);
    assert_eq!(input.remaining(), 2);

    let mut second = 0u16;
    input.load(&mut second)?;
    assert_eq!(second, 22);
    drop(input);
    assert!(data.is_empty());
    Ok(())
}

#[test]
fn owned_input_erases_prefix_on_failure_too() -> Result<()> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&7u32)?;
    data.extend_from_slice(&[0xAA, 0xBB]);

    let mut pair = (0u32, 0u32);
    let mut input = OwnedInputArchive::new(&mut data);
    assert!(input.load(&mut pair).is_err());
    drop(input);

    // The first component was consumed before the failure; the caller may
    // retry against the residue.
    assert_eq!(data, [0xAA, 0xBB]);
    Ok(())
}

// --- Derive coverage beyond named structs ---

#[derive(Save, Load, Default, Debug, PartialEq)]
struct Wrapped(u32, String);

#[derive(Save, Load, Default, Debug, PartialEq)]
struct Marker;

#[derive(Save, Load, Default, Debug, PartialEq)]
struct Generic<T> {
    first: T,
    second: T,
}

#[test]
fn derive_handles_tuple_unit_and_generic_structs() -> Result<()> {
    let wrapped = Wrapped(9, "nine".into());
    assert_eq!(roundtrip(&wrapped), wrapped);

    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&Marker)?;
    assert!(data.is_empty());

    let generic = Generic { first: 3u64, second: 4u64 };
    assert_eq!(roundtrip(&generic), generic);
    Ok(())
}

#[test]
fn one_shot_helpers_match_archive_sessions() -> Result<()> {
    let values = vec![3u32, 5, 8];
    let bytes = polyarc::to_bytes(&values)?;

    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(&values)?;
    assert_eq!(bytes, data);

    let decoded: Vec<u32> = polyarc::from_bytes(&bytes)?;
    assert_eq!(decoded, values);

    let mut reused = vec![0u32; 16];
    polyarc::from_bytes_into(&bytes, &mut reused)?;
    assert_eq!(reused, values);
    Ok(())
}

#[derive(Save, Load, Default, Debug, PartialEq, Clone)]
struct Inventory {
    owner: String,
    slots: Vec<(String, u32)>,
    tags: BTreeSet<String>,
    stats: [u16; 4],
}

#[test]
fn nested_composite_roundtrip() {
    let inventory = Inventory {
        owner: "player-one".into(),
        slots: vec![("sword".into(), 1), ("arrow".into(), 30)],
        tags: ["hero".into(), "ranged".into()].into_iter().collect(),
        stats: [10, 20, 30, 40],
    };
    assert_eq!(roundtrip(&inventory), inventory);
}
