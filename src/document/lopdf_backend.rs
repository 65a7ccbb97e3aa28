//! PDF backend built on lopdf.

use async_trait::async_trait;
use lopdf::{Dictionary, Object, ObjectId};

use super::{Annotation, DocumentParser, ParseError, ParsedDocument};

/// URL schemes accepted as a validated, directly clickable `url`.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "mailto", "tel"];

/// Parses PDFs with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfParser;

/// An opened PDF with its page object IDs cached in page order.
pub struct LopdfDocument {
    inner: lopdf::Document,
    page_ids: Vec<ObjectId>,
}

/// A page handle: its 1-based number and object ID.
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    pub number: u32,
    id: ObjectId,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish()
    }
}

#[async_trait(?Send)]
impl DocumentParser for LopdfParser {
    type Document = LopdfDocument;

    async fn open(&self, bytes: &[u8]) -> Result<LopdfDocument, ParseError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        // get_pages is keyed by 1-based page number, so values come out in page order
        let page_ids: Vec<ObjectId> = inner.get_pages().into_values().collect();
        tracing::debug!("Opened PDF with {} pages", page_ids.len());

        Ok(LopdfDocument { inner, page_ids })
    }
}

#[async_trait(?Send)]
impl ParsedDocument for LopdfDocument {
    type Page = LopdfPage;

    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    async fn page(&self, number: u32) -> Result<LopdfPage, ParseError> {
        let index = number
            .checked_sub(1)
            .and_then(|i| self.page_ids.get(i as usize))
            .ok_or(ParseError::PageOutOfRange {
                page: number,
                page_count: self.page_count(),
            })?;
        Ok(LopdfPage {
            number,
            id: *index,
        })
    }

    async fn annotations(&self, page: &LopdfPage) -> Result<Vec<Annotation>, ParseError> {
        page_annotations(&self.inner, page)
    }
}

fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Read the `/Annots` array of a page.
///
/// Entries that are not dictionaries or lack a `/Subtype` name are skipped. A
/// page whose `/Annots` exists but is not an array is an error.
fn page_annotations(
    doc: &lopdf::Document,
    page: &LopdfPage,
) -> Result<Vec<Annotation>, ParseError> {
    let page_error = |reason: String| ParseError::Page {
        page: page.number,
        reason,
    };

    let page_dict = doc
        .get_object(page.id)
        .and_then(|o| o.as_dict())
        .map_err(|e| page_error(format!("page dictionary unavailable: {e}")))?;

    let annots_obj = match page_dict.get(b"Annots") {
        Ok(obj) => obj,
        Err(_) => return Ok(Vec::new()),
    };
    let annots_obj = resolve(doc, annots_obj)
        .ok_or_else(|| page_error("failed to resolve /Annots reference".to_string()))?;
    let annots = annots_obj
        .as_array()
        .map_err(|e| page_error(format!("/Annots is not an array: {e}")))?;

    let mut annotations = Vec::with_capacity(annots.len());
    for entry in annots {
        let Some(dict) = resolve(doc, entry).and_then(|o| o.as_dict().ok()) else {
            continue;
        };
        let subtype = match dict.get(b"Subtype") {
            Ok(Object::Name(name)) => String::from_utf8_lossy(name).into_owned(),
            _ => continue,
        };

        let unsafe_url = if subtype == super::LINK_SUBTYPE {
            action_target(doc, dict)
        } else {
            None
        };
        let url = unsafe_url.as_deref().and_then(validated_url);

        annotations.push(Annotation {
            subtype,
            url,
            unsafe_url,
        });
    }

    tracing::debug!(
        "Page {}: {} annotations",
        page.number,
        annotations.len()
    );
    Ok(annotations)
}

/// The raw target of a link's `/A` action.
///
/// `URI` actions give their `/URI`; a name there is taken as a path and gets
/// a leading `/`. `GoToR` and `Launch` give the file named by `/F`, with a
/// named remote destination appended as a fragment.
fn action_target(doc: &lopdf::Document, annot: &Dictionary) -> Option<String> {
    let action = resolve(doc, annot.get(b"A").ok()?)?.as_dict().ok()?;
    let kind = match action.get(b"S") {
        Ok(Object::Name(kind)) => kind.as_slice(),
        _ => return None,
    };

    match kind {
        b"URI" => match resolve(doc, action.get(b"URI").ok()?)? {
            Object::Name(name) => Some(format!("/{}", String::from_utf8_lossy(name))),
            other => decode_text(other),
        },
        b"GoToR" | b"Launch" => {
            let file = file_spec_name(doc, resolve(doc, action.get(b"F").ok()?)?)?;
            let dest = action
                .get(b"D")
                .ok()
                .and_then(|d| resolve(doc, d))
                .and_then(decode_text);
            match dest {
                Some(dest) => {
                    let base = file.split('#').next().unwrap_or_default();
                    Some(format!("{base}#{dest}"))
                }
                None => Some(file),
            }
        }
        _ => None,
    }
}

/// File name of a file specification: a plain string, or the first of
/// `/UF`, `/F`, `/Unix`, `/Mac`, `/DOS` in a file specification dictionary.
fn file_spec_name(doc: &lopdf::Document, spec: &Object) -> Option<String> {
    match spec {
        Object::String(..) => decode_text(spec),
        Object::Dictionary(dict) => [b"UF".as_slice(), b"F", b"Unix", b"Mac", b"DOS"]
            .iter()
            .find_map(|key| match resolve(doc, dict.get(key).ok()?)? {
                obj @ Object::String(..) => decode_text(obj),
                _ => None,
            }),
        _ => None,
    }
}

/// Decode a PDF string or name object.
///
/// Strings with a UTF-16BE byte order mark are decoded as UTF-16; others as
/// UTF-8, falling back to Latin-1.
fn decode_text(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => {
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let units: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            } else {
                match std::str::from_utf8(bytes) {
                    Ok(s) => Some(s.to_string()),
                    Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
                }
            }
        }
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Validate a raw link target as an absolute URL with an allowed scheme.
///
/// Bare `www.` hosts get an `http://` prefix. The result is the parsed
/// URL's serialization, so `https://Example.com` becomes `https://example.com/`.
fn validated_url(raw: &str) -> Option<String> {
    let candidate = if raw.starts_with("www.") {
        format!("http://{raw}")
    } else {
        raw.to_string()
    };
    let parsed = url::Url::parse(&candidate).ok()?;
    ALLOWED_SCHEMES
        .contains(&parsed.scheme())
        .then(|| parsed.to_string())
}
