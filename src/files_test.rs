use super::*;

fn draft(mime: &str, name: &str, size: u64) -> FileDraft {
    FileDraft {
        filename: "stored-name".to_owned(),
        original_name: name.to_owned(),
        mime_type: mime.to_owned(),
        size,
        path: "uploads/stored-name".to_owned(),
    }
}

// =============================================================
// Validation
// =============================================================

#[test]
fn allow_list_accepts_each_listed_type() {
    for mime in ALLOWED_MIME_TYPES {
        assert!(is_allowed(mime, "file.bin"), "{mime} should be allowed");
    }
}

#[test]
fn md_extension_overrides_unknown_mime() {
    assert!(is_allowed("application/octet-stream", "notes.md"));
    assert!(!is_allowed("application/octet-stream", "notes.bin"));
}

#[test]
fn store_rejects_disallowed_type() {
    let mut store = FileStore::new();
    let err = store.create(draft("application/zip", "a.zip", 100)).unwrap_err();
    assert_eq!(
        err,
        UploadError::TypeNotAllowed { mime_type: "application/zip".to_owned() }
    );
    assert!(store.is_empty());
}

#[test]
fn store_rejects_oversized_upload() {
    let mut store = FileStore::new();
    let err = store
        .create(draft("image/png", "big.png", MAX_UPLOAD_BYTES + 1))
        .unwrap_err();
    assert_eq!(err, UploadError::TooLarge { size: MAX_UPLOAD_BYTES + 1 });
}

#[test]
fn store_accepts_upload_at_exact_ceiling() {
    let mut store = FileStore::new();
    assert!(store.create(draft("image/png", "big.png", MAX_UPLOAD_BYTES)).is_ok());
}

// =============================================================
// Store lifecycle
// =============================================================

#[test]
fn ids_are_sequential_from_one() {
    let mut store = FileStore::new();
    let a = store.create(draft("image/png", "a.png", 10)).unwrap().id;
    let b = store.create(draft("image/png", "b.png", 10)).unwrap().id;
    assert_eq!(a, 1);
    assert_eq!(b, 2);
}

#[test]
fn rejected_uploads_do_not_consume_ids() {
    let mut store = FileStore::new();
    let _ = store.create(draft("application/zip", "a.zip", 10));
    let id = store.create(draft("image/png", "a.png", 10)).unwrap().id;
    assert_eq!(id, 1);
}

#[test]
fn get_and_delete_round_trip() {
    let mut store = FileStore::new();
    let id = store.create(draft("text/plain", "a.txt", 10)).unwrap().id;
    assert_eq!(store.get(id).unwrap().original_name, "a.txt");
    assert!(store.delete(id));
    assert!(store.get(id).is_none());
    assert!(!store.delete(id));
}

#[test]
fn list_is_ascending_by_id() {
    let mut store = FileStore::new();
    store.create(draft("text/plain", "a.txt", 1)).unwrap();
    store.create(draft("text/plain", "b.txt", 1)).unwrap();
    let names: Vec<_> = store.list().map(|f| f.original_name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

// =============================================================
// Node mapping
// =============================================================

#[test]
fn image_mime_maps_to_image_node() {
    let (kind, size) = node_spec_for("image/jpeg", "photo.jpg");
    assert_eq!(kind, NodeKind::Image);
    assert_eq!(size, Size::new(320.0, 240.0));
}

#[test]
fn pdf_maps_to_tall_document_node() {
    let (kind, size) = node_spec_for("application/pdf", "paper.pdf");
    assert_eq!(kind, NodeKind::Document);
    assert_eq!(size, Size::new(400.0, 500.0));
}

#[test]
fn html_maps_to_square_document_node() {
    let (kind, size) = node_spec_for("text/html", "page.htm");
    assert_eq!(kind, NodeKind::Document);
    assert_eq!(size, Size::new(400.0, 400.0));
    let (kind, _) = node_spec_for("text/plain", "page.html");
    assert_eq!(kind, NodeKind::Document);
}

#[test]
fn everything_else_maps_to_text_node() {
    let (kind, size) = node_spec_for("text/markdown", "notes.md");
    assert_eq!(kind, NodeKind::Text);
    assert_eq!(size, Size::new(300.0, 200.0));
}

// =============================================================
// Formatting and URLs
// =============================================================

#[test]
fn content_url_embeds_id() {
    assert_eq!(content_url(42), "/api/files/42/content");
}

#[test]
fn format_file_size_zero() {
    assert_eq!(format_file_size(0), "0 Bytes");
}

#[test]
fn format_file_size_bytes() {
    assert_eq!(format_file_size(512), "512 Bytes");
}

#[test]
fn format_file_size_trims_trailing_zeros() {
    assert_eq!(format_file_size(1024), "1 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(2 * 1024 * 1024), "2 MB");
}

#[test]
fn format_file_size_keeps_two_decimals() {
    // 1234 / 1024 = 1.205...
    assert_eq!(format_file_size(1234), "1.21 KB");
}

#[test]
fn format_file_size_gb_and_beyond_clamps_to_gb() {
    assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
    assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
}

#[test]
fn upload_errors_display_useful_messages() {
    let err = UploadError::TypeNotAllowed { mime_type: "application/zip".to_owned() };
    assert!(err.to_string().contains("application/zip"));
    let err = UploadError::TooLarge { size: 11 * 1024 * 1024 };
    assert!(err.to_string().contains("limit"));
}
