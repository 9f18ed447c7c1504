//! In-memory ICC profile: header plus an ordered tag table
//!
//! Tag payloads are kept as encoded bytes. That lets a tag read from one
//! profile be written into another without any loss, and lets a template's
//! own tags pass through untouched.
//!
//! # Layout on encode
//!
//! 1. The 128-byte header, with the size field filled in
//! 2. The tag count and one 12-byte entry per tag, in insertion order
//! 3. Tag payloads, each starting on a 4-byte boundary; identical payloads
//!    are written once and shared by every entry that uses them

use super::error::IccError;
use super::header::{HEADER_SIZE, IccHeader};
use super::tags::TagData;
use super::types::{TagSignature, TypeSignature};
use crate::color::Xyz;

/// Size of one tag table entry: signature, offset, size
const TAG_ENTRY_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq)]
struct Tag {
    signature: TagSignature,
    payload: Vec<u8>,
}

/// Tag table entry as stored in the file
#[derive(Debug, Clone, Copy)]
struct TagTableEntry {
    signature: TagSignature,
    offset: u32,
    size: u32,
}

/// An ICC profile that can be built up tag by tag, parsed and encoded
#[derive(Debug, Clone, PartialEq)]
pub struct IccProfile {
    pub header: IccHeader,
    tags: Vec<Tag>,
}

impl IccProfile {
    /// Empty profile with the given header
    pub fn new(header: IccHeader) -> Self {
        Self {
            header,
            tags: Vec::new(),
        }
    }

    /// Parse an ICC profile from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let header = IccHeader::parse(data)?;
        header.validate(data.len())?;

        let entries = Self::parse_tag_table(data)?;
        let mut tags = Vec::with_capacity(entries.len());

        for entry in entries {
            let start = entry.offset as usize;
            let end = start + entry.size as usize;
            if end > data.len() || start < HEADER_SIZE {
                return Err(IccError::TagOutOfBounds {
                    tag: entry.signature,
                    offset: entry.offset,
                    size: entry.size,
                    profile_size: data.len(),
                });
            }
            tags.push(Tag {
                signature: entry.signature,
                payload: data[start..end].to_vec(),
            });
        }

        Ok(Self { header, tags })
    }

    fn parse_tag_table(data: &[u8]) -> Result<Vec<TagTableEntry>, IccError> {
        let table_start = HEADER_SIZE + 4;
        if data.len() < table_start {
            return Err(IccError::TooSmall {
                expected: table_start,
                actual: data.len(),
            });
        }

        let be32 = |at: usize| u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);

        let count = be32(HEADER_SIZE) as usize;
        let required_size = count
            .checked_mul(TAG_ENTRY_SIZE)
            .and_then(|n| n.checked_add(table_start))
            .ok_or_else(|| IccError::CorruptedData(format!("Tag count {} overflows", count)))?;

        if data.len() < required_size {
            return Err(IccError::TooSmall {
                expected: required_size,
                actual: data.len(),
            });
        }

        Ok((0..count)
            .map(|i| {
                let at = table_start + i * TAG_ENTRY_SIZE;
                TagTableEntry {
                    signature: TagSignature(be32(at)),
                    offset: be32(at + 4),
                    size: be32(at + 8),
                }
            })
            .collect())
    }

    /// Encode the profile into ICC bytes
    pub fn encode(&self) -> Vec<u8> {
        let data_start = HEADER_SIZE + 4 + self.tags.len() * TAG_ENTRY_SIZE;

        let mut data_area: Vec<u8> = Vec::new();
        let mut entries: Vec<TagTableEntry> = Vec::with_capacity(self.tags.len());

        for (i, tag) in self.tags.iter().enumerate() {
            let shared = self.tags[..i]
                .iter()
                .zip(&entries)
                .find(|(earlier, _)| earlier.payload == tag.payload)
                .map(|(_, entry)| entry.offset);

            let offset = match shared {
                Some(offset) => offset,
                None => {
                    let offset = (data_start + data_area.len()) as u32;
                    data_area.extend_from_slice(&tag.payload);
                    pad_to_4_byte_boundary(&mut data_area);
                    offset
                }
            };

            entries.push(TagTableEntry {
                signature: tag.signature,
                offset,
                size: tag.payload.len() as u32,
            });
        }

        let total = data_start + data_area.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&self.header.encode(total as u32));
        out.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for entry in &entries {
            out.extend_from_slice(&entry.signature.to_bytes());
            out.extend_from_slice(&entry.offset.to_be_bytes());
            out.extend_from_slice(&entry.size.to_be_bytes());
        }
        out.extend_from_slice(&data_area);
        out
    }

    /// Insert a tag payload, replacing any payload already stored under `signature`
    pub fn set_tag(&mut self, signature: TagSignature, payload: Vec<u8>) {
        match self.tags.iter_mut().find(|t| t.signature == signature) {
            Some(tag) => tag.payload = payload,
            None => self.tags.push(Tag { signature, payload }),
        }
    }

    pub fn remove_tag(&mut self, signature: TagSignature) -> Option<Vec<u8>> {
        let index = self.tags.iter().position(|t| t.signature == signature)?;
        Some(self.tags.remove(index).payload)
    }

    /// Encoded payload of a tag
    pub fn tag_bytes(&self, signature: TagSignature) -> Option<&[u8]> {
        self.tags
            .iter()
            .find(|t| t.signature == signature)
            .map(|t| t.payload.as_slice())
    }

    pub fn has_tag(&self, signature: TagSignature) -> bool {
        self.tag_bytes(signature).is_some()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Tag signatures in table order
    pub fn tag_signatures(&self) -> impl Iterator<Item = TagSignature> + '_ {
        self.tags.iter().map(|t| t.signature)
    }

    /// Decode a tag
    pub fn tag(&self, signature: TagSignature) -> Result<Option<TagData>, IccError> {
        self.tag_bytes(signature).map(TagData::parse).transpose()
    }

    /// Read an `XYZ ` tag
    pub fn read_xyz(&self, signature: TagSignature) -> Result<Option<Xyz>, IccError> {
        match self.tag(signature)? {
            None => Ok(None),
            Some(TagData::Xyz(xyz)) => Ok(xyz.to_xyz()),
            Some(_) => Err(self.unexpected_type(signature)),
        }
    }

    fn unexpected_type(&self, tag: TagSignature) -> IccError {
        let found = self
            .tag_bytes(tag)
            .and_then(TypeSignature::of_payload)
            .unwrap_or(TypeSignature(0));
        IccError::UnexpectedTagType { tag, found }
    }

    fn text(&self, signature: TagSignature) -> Option<String> {
        self.tag(signature)
            .ok()
            .flatten()
            .and_then(|t| t.as_text().map(|t| t.text.clone()))
    }

    /// Profile description
    pub fn description(&self) -> Option<String> {
        self.text(TagSignature::PROFILE_DESC)
    }

    pub fn copyright(&self) -> Option<String> {
        self.text(TagSignature::COPYRIGHT)
    }

    pub fn manufacturer(&self) -> Option<String> {
        self.text(TagSignature::DEVICE_MFG_DESC)
    }
}

fn pad_to_4_byte_boundary(bytes: &mut Vec<u8>) {
    let padded = bytes.len().next_multiple_of(4);
    bytes.resize(padded, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::header::{ColorSpace, ProfileVersion};
    use crate::icc::tags::{CurveData, encode_text, encode_xyz};

    fn sample_profile() -> IccProfile {
        let mut profile = IccProfile::new(IccHeader::display(ProfileVersion::V4_3, ColorSpace::Rgb));
        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(Xyz::new(0.9642, 1.0, 0.8249)));
        let trc = CurveData::Gamma(2.19921875).encode();
        for sig in TagSignature::RGB_TRCS {
            profile.set_tag(sig, trc.clone());
        }
        profile.set_tag(TagSignature::COPYRIGHT, encode_text("odd"));
        profile
    }

    #[test]
    fn test_encode_parse_roundtrip() {
        let profile = sample_profile();
        let bytes = profile.encode();

        assert_eq!(bytes.len() % 4, 0);
        assert_eq!(&bytes[0..4], &(bytes.len() as u32).to_be_bytes());

        let parsed = IccProfile::parse(&bytes).unwrap();
        assert_eq!(parsed.tag_count(), 5);
        for sig in profile.tag_signatures() {
            assert_eq!(parsed.tag_bytes(sig), profile.tag_bytes(sig), "tag {}", sig);
        }
        assert_eq!(parsed.copyright().as_deref(), Some("odd"));
        let white = parsed.read_xyz(TagSignature::MEDIA_WHITE).unwrap().unwrap();
        assert!((white.z - 0.8249).abs() < 1e-4);
    }

    #[test]
    fn test_shared_payload_written_once() {
        let bytes = sample_profile().encode();
        let entry = |i: usize| {
            let at = HEADER_SIZE + 4 + i * TAG_ENTRY_SIZE;
            let offset = u32::from_be_bytes([bytes[at + 4], bytes[at + 5], bytes[at + 6], bytes[at + 7]]);
            let size = u32::from_be_bytes([bytes[at + 8], bytes[at + 9], bytes[at + 10], bytes[at + 11]]);
            (offset, size)
        };

        // wtpt, then three TRCs sharing one offset
        assert_eq!(entry(1), entry(2));
        assert_eq!(entry(2), entry(3));
        assert_ne!(entry(0).0, entry(1).0);

        // Every payload starts 4-byte aligned
        for i in 0..5 {
            assert_eq!(entry(i).0 % 4, 0);
        }
    }

    #[test]
    fn test_set_tag_replaces_in_place() {
        let mut profile = sample_profile();
        profile.set_tag(TagSignature::COPYRIGHT, encode_text("new"));
        assert_eq!(profile.tag_count(), 5);
        assert_eq!(profile.tag_signatures().last(), Some(TagSignature::COPYRIGHT));
        assert_eq!(profile.copyright().as_deref(), Some("new"));

        assert!(profile.remove_tag(TagSignature::COPYRIGHT).is_some());
        assert!(!profile.has_tag(TagSignature::COPYRIGHT));
    }

    #[test]
    fn test_read_xyz_wrong_type() {
        let profile = sample_profile();
        let err = profile.read_xyz(TagSignature::RED_TRC).unwrap_err();
        assert_eq!(
            err,
            IccError::UnexpectedTagType {
                tag: TagSignature::RED_TRC,
                found: TypeSignature::CURVE
            }
        );
        assert_eq!(profile.read_xyz(TagSignature::MEDIA_BLACK), Ok(None));
    }

    #[test]
    fn test_parse_tag_out_of_bounds() {
        let mut bytes = sample_profile().encode();
        let at = HEADER_SIZE + 4 + 8;
        bytes[at..at + 4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        assert!(matches!(
            IccProfile::parse(&bytes),
            Err(IccError::TagOutOfBounds { .. })
        ));
    }
}
