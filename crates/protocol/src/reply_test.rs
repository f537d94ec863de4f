use crate::{ProtocolError, parse_reply};

#[test]
fn test_success_reply() {
    let reply = parse_reply("0 Success\n").unwrap();
    assert_eq!(reply.status, 0);
    assert_eq!(reply.message, "Success");
    assert!(reply.is_ok());
    assert!(!reply.is_error());
}

#[test]
fn test_negative_status_is_error() {
    let reply = parse_reply("-1 Failure\n").unwrap();
    assert_eq!(reply.status, -1);
    assert_eq!(reply.message, "Failure");
    assert!(reply.is_error());
}

#[test]
fn test_positive_status_is_neither() {
    let reply = parse_reply("2 values have been dispatched\n").unwrap();
    assert_eq!(reply.status, 2);
    assert!(!reply.is_ok());
    assert!(!reply.is_error());
}

#[test]
fn test_crlf_terminator() {
    let reply = parse_reply("0 ok\r\n").unwrap();
    assert_eq!(reply.message, "ok");
}

#[test]
fn test_message_keeps_internal_spaces() {
    let reply = parse_reply("0 value queued for dispatch\n").unwrap();
    assert_eq!(reply.message, "value queued for dispatch");
}

#[test]
fn test_missing_space_is_malformed() {
    let err = parse_reply("0Success\n").unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedReply(_)));
}

#[test]
fn test_non_integer_status_is_malformed() {
    let err = parse_reply("ok done\n").unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedReply(_)));
}

#[test]
fn test_empty_reply() {
    let err = parse_reply("\n").unwrap_err();
    assert!(matches!(err, ProtocolError::EmptyReply));
}
