//! Reading picked image files into memory for the sell form.
//!
//! The browser only hands out file contents asynchronously; the form awaits
//! every read before validating, so the listing is built from complete data
//! in one step.

#[cfg(feature = "csr")]
use market::image::ImageUpload;

/// Read every file selected in `input`, in selection order.
///
/// A file that cannot be read is logged and skipped.
#[cfg(feature = "csr")]
pub async fn read_uploads(input: &web_sys::HtmlInputElement) -> Vec<ImageUpload> {
    let Some(files) = input.files() else {
        return Vec::new();
    };
    let mut uploads = Vec::with_capacity(files.length() as usize);
    for index in 0..files.length() {
        let Some(file) = files.get(index) else {
            continue;
        };
        match read_file(&file).await {
            Ok(bytes) => uploads.push(ImageUpload::new(&file.name(), &file.type_(), bytes)),
            Err(err) => tracing::error!(file = %file.name(), error = ?err, "failed to read image file"),
        }
    }
    uploads
}

#[cfg(feature = "csr")]
async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, wasm_bindgen::JsValue> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
