//! Archived file retrieval and content sniffing.
//!
//! The storage node does not always send a `Content-Type`. When it is
//! missing (or generic), the type is derived from the filename, then from
//! magic bytes, then from whether the body parses as JSON, and finally
//! defaults to HTML since most archived files are web pages.

use crate::error::Result;
use std::path::Path;
use tracing::debug;

const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";
const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Compound suffixes the archiver produces for re-encoded captures.
const COMPOUND_SUFFIXES: &[(&str, &str)] = &[
    (".html.txt", "text/html"),
    (".jpg.json", "image/jpeg"),
    (".jpg.html", "image/jpeg"),
];

/// Extension table, longer extensions before their prefixes.
const EXTENSIONS: &[(&str, &str)] = &[
    (".jpeg", "image/jpeg"),
    (".jpg", "image/jpeg"),
    (".png", "image/png"),
    (".gif", "image/gif"),
    (".webp", "image/webp"),
    (".svg", "image/svg+xml"),
    (".pdf", "application/pdf"),
    (".docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    (".doc", "application/msword"),
    (".xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    (".xls", "application/vnd.ms-excel"),
    (".txt", "text/plain"),
    (".css", "text/css"),
    (".json", "application/json"),
    (".js", "application/javascript"),
    (".xml", "application/xml"),
    (".mp4", "video/mp4"),
    (".mp3", "audio/mpeg"),
    (".webm", "video/webm"),
    (".zip", "application/zip"),
    (".rar", "application/x-rar-compressed"),
    (".html", "text/html"),
];

/// Raw response of `GET /storage/retrieveFile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedFile {
    pub file_name: String,
    /// `Content-Type` header, if the storage node sent one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// How the explorer can present a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Pdf,
    Html,
    Image,
    Json,
    Text,
    Unsupported,
}

impl DisplayKind {
    /// Classifies a content type.
    pub fn from_content_type(content_type: &str) -> Self {
        let ct = content_type.to_ascii_lowercase();
        if ct.contains("pdf") {
            DisplayKind::Pdf
        } else if ct.contains("html") {
            DisplayKind::Html
        } else if ct.contains("image")
            && (ct.contains("jpeg") || ct.contains("png") || ct.contains("gif"))
        {
            DisplayKind::Image
        } else if ct.contains("json") {
            DisplayKind::Json
        } else if ct.contains("plain") {
            DisplayKind::Text
        } else {
            DisplayKind::Unsupported
        }
    }
}

/// Derives a content type from a filename and, failing that, the body.
pub fn sniff_content_type(file_name: &str, body: &[u8]) -> &'static str {
    let name = file_name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return DEFAULT_CONTENT_TYPE;
    }

    let by_name = COMPOUND_SUFFIXES
        .iter()
        .chain(EXTENSIONS)
        .find(|(suffix, _)| name.contains(suffix))
        .map(|&(_, ct)| ct);
    if let Some(ct) = by_name {
        return ct;
    }

    if body.starts_with(b"GIF89a") || body.starts_with(b"GIF87a") {
        return "image/gif";
    }
    if serde_json::from_slice::<serde_json::Value>(body).is_ok() {
        return "application/json";
    }
    DEFAULT_CONTENT_TYPE
}

/// A retrieved file ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileView {
    pub file_name: String,
    pub content_type: String,
    pub kind: DisplayKind,
    pub bytes: Vec<u8>,
}

impl FileView {
    /// Resolves the content type and display kind of a retrieved file.
    pub fn from_retrieved(file: RetrievedFile) -> Self {
        let content_type = match file.content_type.as_deref() {
            Some(ct) if !ct.trim().is_empty() && !ct.starts_with(GENERIC_CONTENT_TYPE) => {
                ct.to_string()
            }
            _ => sniff_content_type(&file.file_name, &file.bytes).to_string(),
        };
        let kind = DisplayKind::from_content_type(&content_type);
        debug!(file = %file.file_name, content_type = %content_type, kind = ?kind, "Resolved file type");

        Self {
            file_name: file.file_name,
            content_type,
            kind,
            bytes: file.bytes,
        }
    }

    /// Short type label: the content-type subtype, or the file extension.
    pub fn type_label(&self) -> String {
        self.content_type
            .split('/')
            .nth(1)
            .map(|s| s.split(';').next().unwrap_or(s).trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                self.file_name
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            })
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Pretty-printed JSON, or `None` when the body is not valid JSON.
    pub fn pretty_json(&self) -> Option<String> {
        serde_json::from_slice::<serde_json::Value>(&self.bytes)
            .ok()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
    }

    /// HTML with archive links pointed at `base_url` and a `<base>` element
    /// inserted so relative assets resolve against the storage node.
    pub fn rebased_html(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');
        let mut html = self.text().replace("https://arquivo.pt", base_url);

        if !html.to_ascii_lowercase().contains("<base") {
            let base_tag = format!("<base href=\"{base_url}/\">");
            match html.find("<head>") {
                Some(idx) => html.insert_str(idx + "<head>".len(), &base_tag),
                None => html.insert_str(0, &base_tag),
            }
        }
        html
    }

    /// Writes the file body to `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path.as_ref(), &self.bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retrieved(name: &str, ct: Option<&str>, body: &[u8]) -> RetrievedFile {
        RetrievedFile {
            file_name: name.to_string(),
            content_type: ct.map(str::to_string),
            bytes: body.to_vec(),
        }
    }

    #[test]
    fn test_sniff_by_extension() {
        assert_eq!(sniff_content_type("20240101000000_photo.JPG", b""), "image/jpeg");
        assert_eq!(sniff_content_type("data.json", b""), "application/json");
        assert_eq!(sniff_content_type("app.js", b""), "application/javascript");
        assert_eq!(
            sniff_content_type("report.docx", b""),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(sniff_content_type("page.html.txt", b""), "text/html");
    }

    #[test]
    fn test_sniff_by_body() {
        assert_eq!(sniff_content_type("capture", b"GIF89a...."), "image/gif");
        assert_eq!(sniff_content_type("capture", br#"{"a": 1}"#), "application/json");
        assert_eq!(sniff_content_type("capture", b"<p>hi</p>"), "text/html");
        assert_eq!(sniff_content_type("", b"GIF89a"), "text/html");
    }

    #[test]
    fn test_display_kind() {
        assert_eq!(DisplayKind::from_content_type("application/pdf"), DisplayKind::Pdf);
        assert_eq!(DisplayKind::from_content_type("image/webp"), DisplayKind::Unsupported);
        assert_eq!(DisplayKind::from_content_type("image/png"), DisplayKind::Image);
        assert_eq!(DisplayKind::from_content_type("text/plain; charset=utf-8"), DisplayKind::Text);
        assert_eq!(DisplayKind::from_content_type("text/css"), DisplayKind::Unsupported);
    }

    #[test]
    fn test_header_wins_over_sniffing() {
        let view = FileView::from_retrieved(retrieved("x.png", Some("application/pdf"), b""));
        assert_eq!(view.kind, DisplayKind::Pdf);

        let view = FileView::from_retrieved(retrieved(
            "x.png",
            Some("application/octet-stream"),
            b"",
        ));
        assert_eq!(view.kind, DisplayKind::Image);
        assert_eq!(view.type_label(), "png");
    }

    #[test]
    fn test_pretty_json() {
        let view = FileView::from_retrieved(retrieved("d.json", None, br#"{"a":[1,2]}"#));
        assert_eq!(view.kind, DisplayKind::Json);
        assert!(view.pretty_json().unwrap().contains("\n"));

        let broken = FileView::from_retrieved(retrieved("d.json", None, b"{"));
        assert_eq!(broken.pretty_json(), None);
    }

    #[test]
    fn test_rebased_html() {
        let view = FileView::from_retrieved(retrieved(
            "p.html",
            None,
            br#"<html><head><title>t</title></head><img src="https://arquivo.pt/a.png"></html>"#,
        ));
        let html = view.rebased_html("https://archivechain.pt/");

        assert!(html.starts_with("<html><head><base href=\"https://archivechain.pt/\">"));
        assert!(html.contains("https://archivechain.pt/a.png"));
    }

    #[tokio::test]
    async fn test_save_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let view = FileView::from_retrieved(retrieved("out.bin", None, b"payload"));

        view.save_to(&path).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
    }
}
