//! Tests for file attachments.

use std::io::Write;

use super::{Attachment, AttachmentError, FileSource, OCTET_STREAM, PDF};

mod from_bytes {
    use super::*;

    #[test]
    fn defaults_to_octet_stream() {
        let attachment = Attachment::from_bytes(b"abc".to_vec(), None, None).unwrap();

        assert_eq!(attachment.content_type, OCTET_STREAM);
        assert_eq!(attachment.bytes, b"abc");
        assert!(attachment.filename.is_none());
    }

    #[test]
    fn blank_content_type_uses_default() {
        let attachment = Attachment::from_bytes(b"abc".to_vec(), Some("  "), Some("a.bin")).unwrap();

        assert_eq!(attachment.content_type, OCTET_STREAM);
        assert_eq!(attachment.filename.as_deref(), Some("a.bin"));
    }

    #[test]
    fn keeps_explicit_content_type() {
        let attachment = Attachment::from_bytes(b"<a/>".to_vec(), Some("text/xml"), None).unwrap();

        assert_eq!(attachment.content_type, "text/xml");
    }

    #[test]
    fn rejects_malformed_content_type() {
        let result = Attachment::from_bytes(b"x".to_vec(), Some("pdf"), None);

        assert!(matches!(result, Err(AttachmentError::InvalidContentType(ct)) if ct == "pdf"));
    }

    #[test]
    fn debug_shows_length_not_contents() {
        let attachment = Attachment::from_bytes(b"secret-bytes".to_vec(), None, None).unwrap();
        let debug = format!("{attachment:?}");

        assert!(debug.contains("len: 12"));
        assert!(!debug.contains("secret"));
    }
}

mod pdf {
    use super::*;

    #[test]
    fn bytes_are_used_verbatim() {
        let attachment = Attachment::pdf(FileSource::Bytes(b"%PDF-1.4".to_vec()), None).unwrap();

        assert_eq!(attachment.content_type, PDF);
        assert_eq!(attachment.bytes, b"%PDF-1.4");
    }

    #[test]
    fn path_is_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-from-disk").unwrap();

        let attachment = Attachment::pdf(file.path(), Some("doc.pdf")).unwrap();

        assert_eq!(attachment.bytes, b"%PDF-from-disk");
        assert_eq!(attachment.filename.as_deref(), Some("doc.pdf"));
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.pdf");

        let result = Attachment::pdf(missing.clone(), None);

        assert!(matches!(result, Err(AttachmentError::Read { path, .. }) if path == missing));
    }

    #[test]
    fn text_naming_existing_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-text-path").unwrap();
        let text = file.path().to_str().unwrap().to_string();

        let attachment = Attachment::pdf(text, None).unwrap();

        assert_eq!(attachment.bytes, b"%PDF-text-path");
    }

    #[test]
    fn base64_text_is_decoded_ignoring_newlines() {
        let attachment = Attachment::pdf("JVBERi0x\nLjQ=", None).unwrap();

        assert_eq!(attachment.bytes, b"%PDF-1.4");
    }

    #[test]
    fn undecodable_text_is_taken_as_binary() {
        let attachment = Attachment::pdf("not base64 at all!", None).unwrap();

        assert_eq!(attachment.bytes, b"not base64 at all!");
    }

    #[test]
    fn text_with_nul_is_never_treated_as_path() {
        let attachment = Attachment::pdf("raw\0data", None).unwrap();

        assert_eq!(attachment.bytes, b"raw\0data");
    }
}
