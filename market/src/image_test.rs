use super::*;

#[test]
fn data_url_embeds_mime_and_base64() {
    assert_eq!(to_data_url(b"hi", "image/png"), "data:image/png;base64,aGk=");
}

#[test]
fn upload_prefers_reported_mime() {
    let upload = ImageUpload::new("photo.bin", "image/jpeg", b"abc".to_vec());
    assert!(upload.to_data_url().starts_with("data:image/jpeg;base64,"));
}

#[test]
fn upload_sniffs_when_mime_missing() {
    let png = ImageUpload::new("x", "", vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A]);
    assert!(png.to_data_url().starts_with("data:image/png;base64,"));

    let by_name = ImageUpload::new("Holiday.JPG", " ", b"not magic".to_vec());
    assert!(by_name.to_data_url().starts_with("data:image/jpeg;base64,"));
}

#[test]
fn sniff_recognises_common_formats() {
    assert_eq!(sniff_mime("a", b"GIF89a..."), "image/gif");
    assert_eq!(sniff_mime("a", b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
    assert_eq!(sniff_mime("logo.svg", b"<svg"), "image/svg+xml");
    assert_eq!(sniff_mime("notes.txt", b"hello"), "application/octet-stream");
}

#[test]
fn image_url_field_is_split_and_trimmed() {
    assert_eq!(split_image_urls(" a.jpg, ,b.png ,"), ["a.jpg", "b.png"]);
    assert!(split_image_urls("").is_empty());
}
