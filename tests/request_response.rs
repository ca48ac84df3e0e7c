//! Request/response exchange over one buffer, the way a client and server
//! pair would drive the codec around a transport.

use avp_protocol::{
    get, init_header, lookup, put, read_header, read_pdu, write_pdu, Cursor, ProtocolError,
    TagType, TagValue,
};

const SIG: &[u8] = b"Z0magic";

const CMD_LOGIN: u32 = 0;
const STS_SUCCESS: u32 = 1;

const TAG_RESULT: u16 = 1;
const TAG_COMP_ID: u16 = 2;
const TAG_UNAME: u16 = 5;
const TAG_PASS: u16 = 6;
const TAG_MSG: u16 = 7;
const TAG_RETRIES: u16 = 8;
const TAG_SESSION: u16 = 9;
const TAG_NONCE: u16 = 10;

#[test]
fn login_exchange() {
    let mut buf = [0u8; 8192];

    // Client side: build the request.
    init_header(&mut buf, SIG, CMD_LOGIN, 17).unwrap();
    put(&mut buf, TAG_UNAME, TagValue::Block(b"operator")).unwrap();
    put(&mut buf, TAG_PASS, TagValue::Block(b"secret phrase")).unwrap();
    put(&mut buf, TAG_RETRIES, TagValue::Word(0x1234)).unwrap();
    put(&mut buf, TAG_SESSION, TagValue::Longword(0x1234_abcd)).unwrap();
    put(&mut buf, TAG_NONCE, TagValue::Qword(0x1234_abcd_dead_beef)).unwrap();
    put(
        &mut buf,
        TAG_COMP_ID,
        TagValue::uuid_from_slice(&[0x1d, 0x75, 0xbd, 0x4a]),
    )
    .unwrap();

    // Over the "wire".
    let mut wire = Vec::new();
    write_pdu(&mut wire, &buf, SIG).unwrap();

    // Server side: receive and unpack with a single cursor pass in encode
    // order.
    let mut rx = [0u8; 8192];
    let mut stream: &[u8] = &wire;
    read_pdu(&mut stream, &mut rx, SIG).unwrap();

    let request = read_header(&rx, SIG).unwrap();
    assert_eq!(request.command_status, CMD_LOGIN);
    assert_eq!(request.sequence, 17);

    let mut cursor = Cursor::start();
    let mut uname = [0u8; 128];
    assert_eq!(
        get(&rx, &mut cursor, TAG_UNAME, &mut uname).unwrap(),
        TagValue::Block(b"operator")
    );
    let mut pass = [0u8; 128];
    assert_eq!(
        get(&rx, &mut cursor, TAG_PASS, &mut pass).unwrap(),
        TagValue::Block(b"secret phrase")
    );
    assert_eq!(
        get(&rx, &mut cursor, TAG_RETRIES, &mut []).unwrap(),
        TagValue::Word(0x1234)
    );
    assert_eq!(
        get(&rx, &mut cursor, TAG_SESSION, &mut []).unwrap(),
        TagValue::Longword(0x1234_abcd)
    );
    assert_eq!(
        get(&rx, &mut cursor, TAG_NONCE, &mut []).unwrap(),
        TagValue::Qword(0x1234_abcd_dead_beef)
    );
    let mut expected_uuid = [0u8; 16];
    expected_uuid[..4].copy_from_slice(&[0x1d, 0x75, 0xbd, 0x4a]);
    assert_eq!(
        get(&rx, &mut cursor, TAG_COMP_ID, &mut []).unwrap(),
        TagValue::Uuid(expected_uuid)
    );

    // Server side: reset the same buffer for the response; the request's
    // records are gone once the header is re-initialized.
    init_header(&mut rx, SIG, STS_SUCCESS, request.sequence).unwrap();
    assert_eq!(read_header(&rx, SIG).unwrap().payload_size, 0);

    put(&mut rx, TAG_RESULT, TagValue::Word(1)).unwrap();
    put(&mut rx, TAG_MSG, TagValue::Block(b"login accepted")).unwrap();

    let mut wire = Vec::new();
    write_pdu(&mut wire, &rx, SIG).unwrap();

    // Client side: check the answer. Out-of-order probing works too, at the
    // cost of a fresh cursor per probe.
    let mut answer = [0u8; 8192];
    let mut stream: &[u8] = &wire;
    read_pdu(&mut stream, &mut answer, SIG).unwrap();

    let response = read_header(&answer, SIG).unwrap();
    assert_eq!(response.command_status, STS_SUCCESS);
    assert_eq!(response.sequence, 17);

    let mut cursor = Cursor::start();
    let mut msg = [0u8; 128];
    assert_eq!(
        get(&answer, &mut cursor, TAG_MSG, &mut msg).unwrap(),
        TagValue::Block(b"login accepted")
    );
    assert!(matches!(
        get(&answer, &mut cursor, TAG_RESULT, &mut []),
        Err(ProtocolError::NotFound { .. })
    ));

    let mut cursor = Cursor::start();
    assert_eq!(
        get(&answer, &mut cursor, TAG_RESULT, &mut []).unwrap(),
        TagValue::Word(1)
    );
}

#[test]
fn key_request_with_repeated_uuid_tags() {
    const TAG_DISK_ID: u16 = 3;

    let disks: [[u8; 16]; 3] = [[0xc2; 16], [0x36; 16], [0xad; 16]];

    let mut buf = [0u8; 4096];
    init_header(&mut buf, SIG, CMD_LOGIN, 1).unwrap();
    for disk in &disks {
        put(&mut buf, TAG_DISK_ID, TagValue::Uuid(*disk)).unwrap();
    }

    // The server walks every disk id with one cursor; lookup keeps the scan
    // zero-copy.
    let mut cursor = Cursor::start();
    let mut seen = Vec::new();
    loop {
        match lookup(&buf, &mut cursor, TAG_DISK_ID) {
            Ok(raw) => {
                assert_eq!(raw.type_code, TagType::Uuid as u8);
                seen.push(raw.bytes.to_vec());
            }
            Err(ProtocolError::NotFound { .. }) => break,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(seen.len(), disks.len());
    for (got, want) in seen.iter().zip(disks.iter()) {
        assert_eq!(got.as_slice(), want.as_slice());
    }
}
