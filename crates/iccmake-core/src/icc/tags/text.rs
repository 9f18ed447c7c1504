//! Text Tag Types
//!
//! - text: Simple ASCII text (v2 copyright)
//! - desc: textDescriptionType with ASCII, Unicode and ScriptCode parts (v2)
//! - mluc: Multi-localized Unicode (v4)
//!
//! See ICC.1:2001-04 Section 6.5.17 (desc) and ICC.1:2022 Section 10.15 (mluc)

use crate::icc::error::IccError;
use crate::icc::header::ProfileVersion;
use crate::icc::types::{TagSignature, TypeSignature};

/// Size of the fixed ScriptCode string in a textDescriptionType
const SCRIPT_CODE_LEN: usize = 67;

/// Text tag data
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    /// Primary text content (English or default)
    pub text: String,
    /// Localized versions (language code -> text)
    pub localized: Vec<(String, String)>,
}

impl TextData {
    pub fn new(text: String) -> Self {
        Self {
            text,
            localized: Vec::new(),
        }
    }

    /// Parse 'text' type (simple ASCII)
    pub fn parse_text(data: &[u8]) -> Result<Self, IccError> {
        let text = data
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>();

        Ok(Self::new(text))
    }

    /// Parse 'desc' type (v2 profile description); only the ASCII part is read
    pub fn parse_desc(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::CorruptedData(
                "Description tag too small".to_string(),
            ));
        }

        let ascii_count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if data.len() < 4 + ascii_count {
            return Err(IccError::CorruptedData(
                "Description ASCII data truncated".to_string(),
            ));
        }

        let text = data[4..4 + ascii_count]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>();

        Ok(Self::new(text))
    }

    /// Parse 'mluc' type (multi-localized Unicode)
    ///
    /// `data` starts after the 8-byte type prefix; record offsets in the
    /// tag are relative to the prefix, so they are shifted back by 8.
    pub fn parse_mluc(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 8 {
            return Err(IccError::CorruptedData("mluc tag too small".to_string()));
        }

        let record_count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let record_size = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;

        if record_size < 12 {
            return Err(IccError::CorruptedData(
                "mluc record size too small".to_string(),
            ));
        }

        let mut localized = Vec::with_capacity(record_count.min(64));

        for i in 0..record_count {
            let record_offset = 8 + i * record_size;
            if data.len() < record_offset + 12 {
                break;
            }

            let record = &data[record_offset..];
            let locale = format!(
                "{}{}-{}{}",
                record[0] as char, record[1] as char, record[2] as char, record[3] as char
            );

            let str_len = u32::from_be_bytes([record[4], record[5], record[6], record[7]]) as usize;
            let Some(str_offset) =
                (u32::from_be_bytes([record[8], record[9], record[10], record[11]]) as usize)
                    .checked_sub(8)
            else {
                continue;
            };

            if str_offset + str_len <= data.len() {
                if let Some(text) = decode_utf16be(&data[str_offset..str_offset + str_len]) {
                    localized.push((locale, text));
                }
            }
        }

        let text = localized
            .first()
            .map(|(_, text)| text.clone())
            .unwrap_or_default();

        Ok(Self { text, localized })
    }
}

/// Encode a text tag in the type the profile version expects
///
/// v4 profiles get `mluc` with an en-US record. v2 profiles get `text` for
/// the copyright tag and `desc` for everything else.
pub fn encode_text_tag(tag: TagSignature, text: &str, version: ProfileVersion) -> Vec<u8> {
    if version.is_v4() {
        encode_mluc(text)
    } else if tag == TagSignature::COPYRIGHT {
        encode_text(text)
    } else {
        encode_desc(text)
    }
}

/// `mluc` with a single en-US record
pub fn encode_mluc(text: &str) -> Vec<u8> {
    let utf16: Vec<u16> = text.encode_utf16().collect();
    // prefix + count + record size + one record
    let string_offset = 8 + 8 + 12;

    let mut out = TypeSignature::MLUC.tag_prefix().to_vec();
    out.reserve(20 + utf16.len() * 2);
    out.extend_from_slice(&1u32.to_be_bytes());
    out.extend_from_slice(&12u32.to_be_bytes());
    out.extend_from_slice(b"enUS");
    out.extend_from_slice(&((utf16.len() * 2) as u32).to_be_bytes());
    out.extend_from_slice(&(string_offset as u32).to_be_bytes());
    for unit in utf16 {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Null-terminated 7-bit ASCII `text` type
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = TypeSignature::TEXT.tag_prefix().to_vec();
    out.extend(ascii_lossy(text));
    out.push(0);
    out
}

/// v2 `desc` with matching ASCII and Unicode descriptions and an empty ScriptCode
pub fn encode_desc(text: &str) -> Vec<u8> {
    let ascii: Vec<u8> = ascii_lossy(text).collect();
    let utf16: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();

    let mut out = TypeSignature::DESC.tag_prefix().to_vec();
    out.extend_from_slice(&((ascii.len() + 1) as u32).to_be_bytes());
    out.extend_from_slice(&ascii);
    out.push(0);

    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&(utf16.len() as u32).to_be_bytes());
    for unit in utf16 {
        out.extend_from_slice(&unit.to_be_bytes());
    }

    out.extend_from_slice(&0u16.to_be_bytes());
    out.push(0);
    out.extend_from_slice(&[0u8; SCRIPT_CODE_LEN]);
    out
}

fn ascii_lossy(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars()
        .map(|c| if c.is_ascii() && c != '\0' { c as u8 } else { b'?' })
}

/// Decode UTF-16BE bytes to String
fn decode_utf16be(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }

    let utf16: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();

    String::from_utf16(&utf16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let data = b"Hello, World!\0";
        let text = TextData::parse_text(data).unwrap();
        assert_eq!(text.text, "Hello, World!");
    }

    #[test]
    fn test_parse_desc() {
        let mut data = vec![0, 0, 0, 6];
        data.extend_from_slice(b"sRGB\0\0");

        let text = TextData::parse_desc(&data).unwrap();
        assert_eq!(text.text, "sRGB");
    }

    #[test]
    fn test_encode_mluc() {
        let encoded = encode_mluc("Test");
        assert_eq!(&encoded[0..4], b"mluc");
        assert_eq!(&encoded[16..20], b"enUS");
        assert_eq!(encoded.len(), 28 + 8);

        let text = TextData::parse_mluc(&encoded[8..]).unwrap();
        assert_eq!(text.text, "Test");
        assert_eq!(text.localized, [("en-US".to_string(), "Test".to_string())]);
    }

    #[test]
    fn test_encode_desc_layout() {
        let encoded = encode_desc("Gray-elle-trueV2-g22.icc");
        let ascii_len = "Gray-elle-trueV2-g22.icc".len() + 1;
        assert_eq!(&encoded[0..4], b"desc");
        assert_eq!(&encoded[8..12], &(ascii_len as u32).to_be_bytes());

        // ascii + language + unicode count + utf16 + scriptcode
        let expected = 12 + ascii_len + 8 + ascii_len * 2 + 3 + SCRIPT_CODE_LEN;
        assert_eq!(encoded.len(), expected);

        let text = TextData::parse_desc(&encoded[8..]).unwrap();
        assert_eq!(text.text, "Gray-elle-trueV2-g22.icc");
    }

    #[test]
    fn test_encode_text_replaces_non_ascii() {
        let encoded = encode_text("Café");
        assert_eq!(&encoded[8..], b"Caf?\0");
    }

    #[test]
    fn test_encode_text_tag_by_version() {
        let v4 = encode_text_tag(TagSignature::COPYRIGHT, "c", ProfileVersion::V4_3);
        let v2_cprt = encode_text_tag(TagSignature::COPYRIGHT, "c", ProfileVersion::V2_2);
        let v2_desc = encode_text_tag(TagSignature::PROFILE_DESC, "c", ProfileVersion::V2_2);
        assert_eq!(&v4[0..4], b"mluc");
        assert_eq!(&v2_cprt[0..4], b"text");
        assert_eq!(&v2_desc[0..4], b"desc");
    }

    #[test]
    fn test_decode_utf16be() {
        let data = [0x00, 0x48, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F];
        let result = decode_utf16be(&data).unwrap();
        assert_eq!(result, "Hello");
    }
}
