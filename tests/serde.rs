//! Tests for serialization via serde.
#![cfg(feature = "serde")]

mod common;

use common::name;
use domain_rr::base::iana::{Class, DigestAlg, Rtype, SecAlg};
use domain_rr::base::{Record, RecordSet, UnknownRecordData};
use domain_rr::rdata::{
    Dnskey, Ds, Mx, Nsec3Salt, OwnerHash, RecordData, Txt, A,
};
use serde_json::json;
use serde_test::{assert_de_tokens_error, assert_tokens, Configure, Token};

#[test]
fn iana_types() {
    assert_tokens(&Rtype::A.readable(), &[Token::Str("A")]);
    assert_tokens(&Rtype::A.compact(), &[Token::U16(1)]);
    assert_tokens(
        &Rtype::from_int(65400).readable(),
        &[Token::Str("TYPE65400")],
    );
    assert_tokens(&Class::CH.readable(), &[Token::Str("CH")]);
    assert_tokens(&Class::CH.compact(), &[Token::U16(3)]);
    assert_tokens(&SecAlg::RSASHA256, &[Token::U8(8)]);
    assert_tokens(&DigestAlg::SHA256, &[Token::U8(2)]);
}

#[test]
fn names() {
    assert_tokens(&name("www.example.com"), &[Token::Str("www.example.com.")]);
    assert_tokens(&name("."), &[Token::Str(".")]);
}

#[test]
fn binary_data() {
    let dnskey = Dnskey::new(257, SecAlg::RSASHA256, vec![3, 1, 0, 1, 0xa8]);
    let value = serde_json::to_value(&dnskey).unwrap();
    assert_eq!(
        value,
        json!({
            "flags": 257,
            "protocol": 3,
            "algorithm": 8,
            "public_key": "AwEAAag=",
        })
    );
    assert_eq!(serde_json::from_value::<Dnskey>(value).unwrap(), dnskey);

    let ds = Ds::new(1, SecAlg::RSASHA1, DigestAlg::SHA1, vec![0xab; 20]);
    let value = serde_json::to_value(&ds).unwrap();
    assert_eq!(value["digest"], json!("AB".repeat(20)));
    assert_eq!(serde_json::from_value::<Ds>(value).unwrap(), ds);

    let unknown =
        UnknownRecordData::from_octets(Rtype::from_int(65400), vec![10, 0])
            .unwrap();
    let value = serde_json::to_value(&unknown).unwrap();
    assert_eq!(value, json!({ "rtype": "TYPE65400", "data": "0A00" }));
    assert_eq!(
        serde_json::from_value::<UnknownRecordData>(value).unwrap(),
        unknown
    );
}

/// Tokens for a sequence of `len` zero octets.
fn octets(len: usize) -> Vec<Token> {
    let mut tokens = vec![Token::Seq { len: Some(len) }];
    tokens.extend(std::iter::repeat(Token::U8(0)).take(len));
    tokens.push(Token::SeqEnd);
    tokens
}

#[test]
fn length_limits() {
    assert_tokens(
        &Nsec3Salt::from_octets(vec![0xaa]).unwrap(),
        &[Token::Seq { len: Some(1) }, Token::U8(0xaa), Token::SeqEnd],
    );
    assert_tokens(&Txt::from_slice(b"").unwrap(), &octets(0));

    assert_de_tokens_error::<Nsec3Salt>(&octets(256), "illegal NSEC3 salt");
    assert_de_tokens_error::<OwnerHash>(
        &octets(256),
        "illegal owner name hash",
    );
    // 65,280 octets need 256 character strings and so 65,536 octets.
    assert_de_tokens_error::<Txt>(&octets(65_280), "record data too long");
}

#[test]
fn records() {
    let set: RecordSet = vec![
        Record::new(
            name("www.example.com"),
            Class::IN,
            3600,
            A::from_octets(192, 0, 2, 1),
        ),
        Record::new(
            name("example.com"),
            Class::IN,
            300,
            Mx::new(10, name("mail.example.com")),
        ),
    ]
    .into();

    let text = serde_json::to_string(&set).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["records"][0]["owner"], json!("www.example.com."));
    assert_eq!(value["records"][0]["class"], json!("IN"));
    assert_eq!(value["records"][1]["ttl"], json!(300));

    let parsed: RecordSet = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, set);
    match parsed.as_slice()[1].data() {
        RecordData::Mx(mx) => assert_eq!(mx.preference(), 10),
        other => panic!("unexpected record data {:?}", other),
    }
}

#[cfg(feature = "zonefile")]
#[test]
fn reader_options() {
    use domain_rr::zonefile::ReaderOptions;

    let options: ReaderOptions = serde_json::from_value(json!({
        "origin": "example.com.",
        "default-ttl": 120,
        "default-class": "CH",
    }))
    .unwrap();
    assert_eq!(options.origin, name("example.com"));
    assert_eq!(options.default_ttl, Some(120));
    assert_eq!(options.default_class, Class::CH);
    assert_eq!(
        options.max_include_depth,
        ReaderOptions::default().max_include_depth
    );

    let value = serde_json::to_value(&options).unwrap();
    assert_eq!(value["max-include-depth"], json!(16));

    let options: ReaderOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, ReaderOptions::default());
}
