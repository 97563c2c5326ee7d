//! PDF document information dictionary

use lopdf::{Dictionary, Document, Object};

use super::{split_keywords, RawMetadata};

/// Read `Title`, `Subject`, `Keywords` and `Author` from the trailer's Info dictionary
pub(super) fn read_pdf_info(data: &[u8]) -> Option<RawMetadata> {
    let doc = match Document::load_mem(data) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "PDF metadata extraction failed");
            return None;
        }
    };

    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    Some(RawMetadata {
        title: text_entry(&doc, info, b"Title"),
        description: text_entry(&doc, info, b"Subject"),
        keywords: text_entry(&doc, info, b"Keywords")
            .map(|k| split_keywords(&k))
            .unwrap_or_default(),
        alt_text: None,
        author: text_entry(&doc, info, b"Author"),
    })
}

fn text_entry(doc: &Document, info: &Dictionary, key: &[u8]) -> Option<String> {
    let object = match info.get(key).ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };

    let text = match object {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => return None,
    };

    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Text strings are UTF-16BE with a BOM, UTF-8 with a BOM, or PDFDocEncoding
/// (treated as Latin-1).
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xfe, 0xff]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&[0xef, 0xbb, 0xbf]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::{dictionary, Document, Object, ObjectId};

    /// Single empty page PDF whose Info dictionary holds `entries`
    pub fn pdf_with_info(entries: Vec<(&str, Object)>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = lopdf::Dictionary::new();
        for (key, value) in entries {
            info.set(key, value);
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).expect("serialize test pdf");
        out
    }
}
