use super::*;

#[test]
fn missing_fields_are_reported() {
    assert!(missing_field_message("", "secret").is_some());
    assert!(missing_field_message("   ", "secret").is_some());
    assert!(missing_field_message("sneha", "").is_some());
}

#[test]
fn complete_form_has_no_message() {
    assert_eq!(missing_field_message("sneha", "sneha"), None);
}
