use super::*;

#[test]
fn escape_and_enter_dismiss() {
    assert!(is_dismiss_key("Escape"));
    assert!(is_dismiss_key("Enter"));
}

#[test]
fn other_keys_leave_the_notice_open() {
    assert!(!is_dismiss_key("a"));
    assert!(!is_dismiss_key("ArrowLeft"));
    assert!(!is_dismiss_key("escape"));
}
