//! Tests for the zone file lexer.
#![cfg(feature = "zonefile")]

mod common;

use bytes::Bytes;
use common::init_logging;
use domain_rr::base::iana::{Class, Rtype};
use domain_rr::zonefile::{
    ErrorKind, Lexer, StartCondition, Token, TokenValue,
};
use rstest::rstest;
use std::cell::RefCell;
use std::io::Cursor;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::rc::Rc;

//----------- Helpers --------------------------------------------------------

fn text(s: &str) -> TokenValue {
    TokenValue::Text(Bytes::copy_from_slice(s.as_bytes()))
}

fn blob(data: &[u8]) -> TokenValue {
    TokenValue::Blob(Bytes::copy_from_slice(data))
}

fn next(lexer: &mut Lexer) -> (Token, TokenValue) {
    lexer.next_token().unwrap()
}

//----------- Tests ----------------------------------------------------------

#[test]
fn address_record() {
    init_logging();

    let mut lexer =
        Lexer::from_str("test", "www.example.com. 3600 IN A 192.0.2.1\n");
    let mut tokens = Vec::new();
    loop {
        match next(&mut lexer) {
            (Token::Eof, _) => break,
            (Token::Type, value) => {
                tokens.push((Token::Type, value));
                lexer.set_mode(StartCondition::Ipv4);
            }
            token => tokens.push(token),
        }
    }
    assert_eq!(
        tokens,
        [
            (Token::Name, text("www.example.com.")),
            (Token::Number, TokenValue::Number(3600)),
            (Token::Class, TokenValue::Class(Class::IN)),
            (Token::Type, TokenValue::Type(Rtype::A)),
            (Token::Ipv4, TokenValue::Ipv4(Ipv4Addr::new(192, 0, 2, 1))),
            (Token::Eor, TokenValue::None),
        ]
    );
}

#[test]
fn parenthesized_continuation() {
    init_logging();

    let mut lexer = Lexer::from_str("test", "foo ( 10\n 20 )\n");
    assert_eq!(next(&mut lexer), (Token::Name, text("foo")));
    assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(10)));
    assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(20)));
    assert_eq!(lexer.pos().line(), 2);
    assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
    assert_eq!(next(&mut lexer), (Token::Eof, TokenValue::None));
}

#[rstest]
#[case::name(StartCondition::Domain, "ex\\.ample", Token::Name, text("ex\\.ample"))]
#[case::number(StartCondition::Num, "4294967296", Token::Number, TokenValue::Number(1 << 32))]
#[case::class_mnemonic(StartCondition::RrHead, "ch", Token::Class, TokenValue::Class(Class::CH))]
#[case::class_generic(StartCondition::RrHead, "CLASS42", Token::Class, TokenValue::Class(Class::from_int(42)))]
#[case::type_mnemonic(StartCondition::RrHead, "nsec3param", Token::Type, TokenValue::Type(Rtype::NSEC3PARAM))]
#[case::type_generic(StartCondition::Type, "TYPE65280", Token::Type, TokenValue::Type(Rtype::NODATA))]
#[case::ipv4(StartCondition::Ipv4, "10.0.0.1", Token::Ipv4, TokenValue::Ipv4(Ipv4Addr::new(10, 0, 0, 1)))]
#[case::ipv6(StartCondition::Ipv6, "::1", Token::Ipv6, TokenValue::Ipv6(Ipv6Addr::LOCALHOST))]
#[case::ipv6_mapped(StartCondition::Ipv6, "::ffff:192.0.2.1", Token::Ipv6, TokenValue::Ipv6("::ffff:192.0.2.1".parse().unwrap()))]
#[case::hex(StartCondition::Hex, "DEADbeef", Token::Hex, blob(b"\xde\xad\xbe\xef"))]
#[case::hex_absent(StartCondition::Hex, "-", Token::Hex, blob(b""))]
#[case::base32(StartCondition::Base32Ext, "cpnmuoj1", Token::Base32, blob(b"fooba"))]
#[case::base64(StartCondition::Base64, "Zm9v YmFy", Token::Base64, blob(b"foobar"))]
#[case::quoted(StartCondition::Qstr, "\"a \\\"b\\\" \\065\"", Token::String, text("a \"b\" A"))]
#[case::unquoted(StartCondition::Qstr, "word", Token::String, text("word"))]
#[case::unmatched(StartCondition::Num, "x1", Token::Char(b'x'), TokenValue::None)]
fn modes(
    #[case] mode: StartCondition,
    #[case] input: &str,
    #[case] token: Token,
    #[case] value: TokenValue,
) {
    init_logging();

    // Start with a name so the line doesn't start with white space.
    let mut lexer = Lexer::from_str("test", &format!("x {}\n", input));
    assert_eq!(next(&mut lexer).0, Token::Name);
    lexer.set_mode(mode);
    assert_eq!(next(&mut lexer), (token, value));
}

#[rstest]
#[case::number(StartCondition::Num, "18446744073709551616")]
#[case::ipv4(StartCondition::Ipv4, "192.0.2.256")]
#[case::ipv6(StartCondition::Ipv6, "1::2::3")]
#[case::hex(StartCondition::Hex, "abc")]
#[case::base64(StartCondition::Base64, "Zm9=v")]
fn malformed_literals(#[case] mode: StartCondition, #[case] input: &str) {
    let mut lexer = Lexer::from_str("test", &format!("x {}\n", input));
    assert_eq!(next(&mut lexer).0, Token::Name);
    lexer.set_mode(mode);
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLiteral);
    assert_eq!(err.pos().line(), 1);
    assert_eq!(err.pos().column(), 3);
}

#[rstest]
#[case::unclosed("foo ( 10\n")]
#[case::nested("foo ( ( 10 )\n")]
#[case::unopened("foo 10 )\n")]
fn unbalanced_parentheses(#[case] input: &str) {
    let mut lexer = Lexer::from_str("test", input);
    let err = loop {
        match lexer.next_token() {
            Ok((Token::Eof, _)) => panic!("missing error"),
            Ok(_) => {}
            Err(err) => break err,
        }
    };
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn error_handler() {
    init_logging();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut lexer = Lexer::from_str("zone", "foo 10 )\nbar\n");
    lexer.set_error_handler({
        let seen = seen.clone();
        move |err| {
            seen.borrow_mut().push(err.to_string());
            true
        }
    });
    let mut tokens = Vec::new();
    loop {
        let (token, _) = next(&mut lexer);
        tokens.push(token);
        if token == Token::Eof {
            break;
        }
    }
    assert_eq!(seen.borrow().len(), 1);
    assert!(seen.borrow()[0].starts_with("zone:1:"));
    assert!(tokens.contains(&Token::Name));
    assert_eq!(tokens.last(), Some(&Token::Eof));
}

#[test]
fn source_stack() {
    init_logging();

    let mut lexer = Lexer::from_str("outer", "a\n");
    lexer.push_source("inner", Cursor::new(b"b\nc\n".to_vec()));
    assert_eq!(lexer.depth(), 2);

    assert_eq!(next(&mut lexer), (Token::Name, text("b")));
    assert_eq!(lexer.pos().source(), "inner");
    assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
    assert_eq!(next(&mut lexer), (Token::Name, text("c")));
    assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));

    // The inner source is done, so we continue with the outer one.
    assert_eq!(next(&mut lexer), (Token::Name, text("a")));
    assert_eq!(lexer.depth(), 1);
    assert_eq!(lexer.pos().source(), "outer");
    assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
    assert_eq!(next(&mut lexer), (Token::Eof, TokenValue::None));
}
