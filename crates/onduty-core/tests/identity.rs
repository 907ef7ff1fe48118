#![allow(clippy::unwrap_used)]

use onduty_core::UserId;

#[test]
fn user_id_is_a_plain_json_string() {
    let id = UserId::from(1234u64);
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"1234\"");

    let back: UserId = serde_json::from_str("\"1234\"").unwrap();
    assert_eq!(back, id);
    assert_eq!(back.to_string(), "1234");
}
