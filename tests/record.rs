#![cfg(feature = "derive")]

use std::net::Ipv4Addr;

use bytewise::{ByteOrder, Encoder, Error, Record, decode::Cursor};

#[derive(Debug, Default, PartialEq, Record)]
struct Player {
    id: u32,
    address: Ipv4Addr,
    #[text(prefix = 1, encoding = Utf8)]
    name: String,
    #[text(terminated)]
    motto: String,
    grade: char,
    is_admin: bool,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Roster {
    #[text(prefix = 2, encoding = Latin1)]
    team: String,
    captain: Player,
    #[text(terminated, include_nul, encoding = Ascii)]
    notes: String,
    checksum: u16,
}

#[derive(Debug, Record)]
struct Legacy {
    #[text(prefix = 1, encoding = Utf32)]
    label: String,
}

fn player() -> Player {
    Player {
        id: 0x0102_0304,
        address: Ipv4Addr::new(10, 0, 0, 7),
        name: "Ana".into(),
        motto: "go".into(),
        grade: 'B',
        is_admin: true,
    }
}

fn encode<R: Record>(record: &R, order: ByteOrder) -> Vec<u8> {
    let mut e = Encoder::new(order);
    e.put_record(record).unwrap();
    e.into_bytes()
}

#[test]
fn fields_in_declaration_order() {
    let bytes = encode(&player(), ByteOrder::BigEndian);

    #[rustfmt::skip]
    let expected = [
        0x01, 0x02, 0x03, 0x04,
        10, 0, 0, 7,
        3, b'A', b'n', b'a',
        b'g', 0, b'o', 0, 0, 0,
        b'B', 0,
        1,
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn round_trip() {
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let bytes = encode(&player(), order);

        let mut c = Cursor::new(&bytes, order);
        assert_eq!(c.read_record::<Player>().unwrap(), player());
        assert!(c.is_exhausted());
    }
}

#[test]
fn nested_records() {
    let roster = Roster {
        team: "Bleus".into(),
        captain: player(),
        notes: "ok".into(),
        checksum: 0xABCD,
    };
    let bytes = encode(&roster, ByteOrder::LittleEndian);

    let mut c = Cursor::new(&bytes, ByteOrder::LittleEndian);
    let decoded = c.read_record::<Roster>().unwrap();

    // The terminator is kept on decoding only.
    assert_eq!(decoded.notes, "ok\0");
    assert_eq!(
        decoded,
        Roster {
            notes: "ok\0".into(),
            ..roster
        }
    );
}

#[test]
fn truncated_data_defaults_missing_fields() {
    let bytes = encode(&player(), ByteOrder::BigEndian);

    // Cut inside the length-prefixed name.
    let mut c = Cursor::new(&bytes[..10], ByteOrder::BigEndian);
    let decoded = c.read_record::<Player>().unwrap();

    assert_eq!(
        decoded,
        Player {
            id: 0x0102_0304,
            address: Ipv4Addr::new(10, 0, 0, 7),
            ..Player::default()
        }
    );
}

#[test]
fn empty_data_decodes_default() {
    let mut c = Cursor::new(&[], ByteOrder::BigEndian);

    assert_eq!(c.read_record::<Player>().unwrap(), Player::default());
}

#[test]
fn unsupported_encoding_fails_both_ways() {
    let legacy = Legacy {
        label: "x".into(),
    };

    let mut e = Encoder::new(ByteOrder::BigEndian);
    assert!(matches!(
        e.put_record(&legacy),
        Err(Error::UnsupportedEncoding(bytewise::TextEncoding::Utf32))
    ));

    let mut c = Cursor::new(&[1, b'x'], ByteOrder::BigEndian);
    assert!(matches!(
        c.read_record::<Legacy>(),
        Err(Error::UnsupportedEncoding(_))
    ));
}

#[test]
fn wide_character_is_refused() {
    let wide = Player {
        grade: '😀',
        ..player()
    };

    let mut e = Encoder::new(ByteOrder::BigEndian);
    assert!(matches!(
        e.put_record(&wide),
        Err(Error::WideCharacter('😀'))
    ));
}
