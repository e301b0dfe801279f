//! Test fixtures: attachment parts.

use axum_test::multipart::Part;
use bytes::Bytes;

/// Minimal PDF document.
pub fn create_test_pdf() -> Vec<u8> {
    b"%PDF-1.4
1 0 obj
<< /Type /Catalog /Pages 2 0 R >>
endobj
trailer
<< /Root 1 0 R >>
%%EOF
"
    .to_vec()
}

pub fn pdf_part(file_name: &str) -> Part {
    Part::bytes(Bytes::from(create_test_pdf()))
        .file_name(file_name.to_string())
        .mime_type("application/pdf")
}

pub fn exe_part(file_name: &str) -> Part {
    Part::bytes(Bytes::from_static(b"MZ\x90\x00\x03\x00\x00\x00"))
        .file_name(file_name.to_string())
        .mime_type("application/x-msdownload")
}

pub fn text_part(file_name: &str, size: usize) -> Part {
    Part::bytes(Bytes::from(vec![b'a'; size]))
        .file_name(file_name.to_string())
        .mime_type("text/plain")
}
