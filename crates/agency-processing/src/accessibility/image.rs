//! EXIF-based metadata for images

use exif::{Context, Exif, In, Reader, Tag, Value};
use std::io::Cursor;

use super::{split_keywords, RawMetadata};

// Windows "XP" tags, UTF-16LE in a BYTE array
const XP_TITLE: Tag = Tag(Context::Tiff, 0x9c9b);
const XP_KEYWORDS: Tag = Tag(Context::Tiff, 0x9c9e);
const XP_SUBJECT: Tag = Tag(Context::Tiff, 0x9c9f);

/// Read descriptive EXIF fields. `None` when the container has no EXIF block or it
/// fails to parse.
pub(super) fn read_exif(data: &[u8]) -> Option<RawMetadata> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => exif,
        Err(e) => {
            tracing::debug!(error = %e, "EXIF extraction failed");
            return None;
        }
    };

    Some(RawMetadata {
        title: text_field(&exif, XP_TITLE),
        description: text_field(&exif, XP_SUBJECT),
        keywords: text_field(&exif, XP_KEYWORDS)
            .map(|k| split_keywords(&k))
            .unwrap_or_default(),
        alt_text: text_field(&exif, Tag::ImageDescription),
        author: text_field(&exif, Tag::Artist),
    })
}

fn text_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = match &field.value {
        Value::Ascii(parts) => parts
            .iter()
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Byte(bytes) | Value::Undefined(bytes, _) => decode_utf16le(bytes),
        _ => return None,
    };

    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
pub(crate) mod fixtures {
    const TYPE_BYTE: u16 = 1;
    const TYPE_ASCII: u16 = 2;

    pub fn ascii(s: &str) -> (u16, Vec<u8>) {
        let mut bytes = s.as_bytes().to_vec();
        bytes.push(0);
        (TYPE_ASCII, bytes)
    }

    pub fn utf16(s: &str) -> (u16, Vec<u8>) {
        let mut bytes: Vec<u8> = s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        bytes.extend([0, 0]);
        (TYPE_BYTE, bytes)
    }

    /// Little-endian TIFF with a single IFD holding `entries`
    pub fn tiff(entries: &[(u16, (u16, Vec<u8>))]) -> Vec<u8> {
        let mut entries = entries.to_vec();
        entries.sort_by_key(|(tag, _)| *tag);

        let data_start = 8 + 2 + entries.len() * 12 + 4;
        let mut ifd = Vec::new();
        let mut data = Vec::new();

        ifd.extend((entries.len() as u16).to_le_bytes());
        for (tag, (kind, bytes)) in &entries {
            ifd.extend(tag.to_le_bytes());
            ifd.extend(kind.to_le_bytes());
            ifd.extend((bytes.len() as u32).to_le_bytes());
            if bytes.len() <= 4 {
                let mut inline = bytes.clone();
                inline.resize(4, 0);
                ifd.extend(inline);
            } else {
                ifd.extend(((data_start + data.len()) as u32).to_le_bytes());
                data.extend(bytes);
                if data.len() % 2 == 1 {
                    data.push(0);
                }
            }
        }
        ifd.extend(0u32.to_le_bytes());

        let mut out = b"II\x2a\x00\x08\x00\x00\x00".to_vec();
        out.extend(ifd);
        out.extend(data);
        out
    }

    /// Minimal JPEG whose only segment is an APP1 EXIF block
    pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
        let segment_len = (2 + 6 + tiff.len()) as u16;
        let mut out = vec![0xff, 0xd8, 0xff, 0xe1];
        out.extend(segment_len.to_be_bytes());
        out.extend(b"Exif\0\0");
        out.extend(tiff);
        out.extend([0xff, 0xd9]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_read_exif_descriptive_fields() {
        let jpeg = jpeg_with_exif(&tiff(&[
            (0x010e, ascii("Two people shaking hands")),
            (0x013b, ascii("Jane Doe")),
            (0x9c9b, utf16("Partnership")),
            (0x9c9e, utf16("team;handshake;office")),
            (0x9c9f, utf16("Client kickoff meeting")),
        ]));

        let raw = read_exif(&jpeg).unwrap();
        assert_eq!(raw.title.as_deref(), Some("Partnership"));
        assert_eq!(raw.description.as_deref(), Some("Client kickoff meeting"));
        assert_eq!(raw.alt_text.as_deref(), Some("Two people shaking hands"));
        assert_eq!(raw.author.as_deref(), Some("Jane Doe"));
        assert_eq!(raw.keywords, vec!["team", "handshake", "office"]);
    }

    #[test]
    fn test_read_exif_partial_fields() {
        let jpeg = jpeg_with_exif(&tiff(&[(0x010e, ascii("Sunset over the bay"))]));

        let raw = read_exif(&jpeg).unwrap();
        assert_eq!(raw.alt_text.as_deref(), Some("Sunset over the bay"));
        assert!(raw.title.is_none());
        assert!(raw.keywords.is_empty());
    }

    #[test]
    fn test_read_exif_without_exif() {
        assert!(read_exif(b"\xff\xd8\xff\xd9").is_none());
        assert!(read_exif(b"not an image at all").is_none());
        assert!(read_exif(&[]).is_none());
    }

    #[test]
    fn test_decode_utf16le_stops_at_nul() {
        let mut bytes: Vec<u8> = "Logo".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        bytes.extend([0, 0, b'x', 0]);
        assert_eq!(decode_utf16le(&bytes), "Logo");
    }
}
