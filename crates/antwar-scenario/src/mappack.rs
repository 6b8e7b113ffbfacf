//! `[MapPack]` / `[OverlayPack]` decoding.
//!
//! The payload is Base64 split over numbered INI rows. Once decoded it is a
//! run of chunks, each a little-endian `u32` length (high flag bits masked off)
//! followed by an LCW-compressed block that expands to at most 8 KiB.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use antwar_core::constants::MAP_CELL_COUNT;

use crate::data::MapLayers;
use crate::error::MapPackError;
use crate::ini::IniSection;

/// Largest block a single chunk may expand to.
pub const CHUNK_LIMIT: usize = 8192;

/// Flag bits stored in the chunk length word.
const CHUNK_LENGTH_MASK: u32 = 0xDFFF_FFFF;

/// Concatenate the Base64 rows of a pack section in numeric key order.
pub fn join_pack_rows(section: &IniSection) -> String {
    let mut rows: Vec<(u32, &str)> = section
        .entries
        .iter()
        .filter_map(|(k, v)| k.parse::<u32>().ok().map(|n| (n, v.as_str())))
        .collect();
    rows.sort_by_key(|(n, _)| *n);
    rows.into_iter().map(|(_, v)| v).collect()
}

/// Base64-decode and decompress every chunk.
pub fn unpack(base64_text: &str) -> Result<Vec<u8>, MapPackError> {
    let packed = STANDARD.decode(base64_text.trim().as_bytes())?;
    let mut out = Vec::new();
    let mut offset = 0;

    while offset < packed.len() {
        let header = packed
            .get(offset..offset + 4)
            .ok_or(MapPackError::TruncatedChunk { offset })?;
        let raw = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let len = (raw & CHUNK_LENGTH_MASK) as usize;
        let body = packed
            .get(offset + 4..offset + 4 + len)
            .ok_or(MapPackError::TruncatedChunk { offset })?;
        out.extend(lcw_decompress(body, CHUNK_LIMIT)?);
        offset += 4 + len;
    }
    Ok(out)
}

/// Decode template layers from an unpacked MapPack.
///
/// 3 × 16384 bytes: `u16` template types then `u8` icons.
/// 2 × 16384 bytes: `u8` template types then `u8` icons.
pub fn decode_map_pack(base64_text: &str) -> Result<MapLayers, MapPackError> {
    let bytes = unpack(base64_text)?;
    let n = MAP_CELL_COUNT;

    if bytes.len() == 3 * n {
        let templates = bytes[..2 * n]
            .chunks_exact(2)
            .map(|p| u16::from_le_bytes([p[0], p[1]]))
            .collect();
        let icons = bytes[2 * n..].to_vec();
        Ok(MapLayers { templates, icons })
    } else if bytes.len() == 2 * n {
        let templates = bytes[..n]
            .iter()
            .map(|&t| if t == 0xFF { 0xFFFF } else { t as u16 })
            .collect();
        let icons = bytes[n..].to_vec();
        Ok(MapLayers { templates, icons })
    } else {
        Err(MapPackError::SizeMismatch {
            expected: vec![3 * n, 2 * n],
            actual: bytes.len(),
        })
    }
}

/// Decode the overlay layer, one byte per cell.
pub fn decode_overlay_pack(base64_text: &str) -> Result<Vec<u8>, MapPackError> {
    let bytes = unpack(base64_text)?;
    if bytes.len() != MAP_CELL_COUNT {
        return Err(MapPackError::SizeMismatch {
            expected: vec![MAP_CELL_COUNT],
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Expand one LCW block.
///
/// Opcodes:
/// - `0cccpppp pppppppp`: copy `ccc + 3` bytes from `p` bytes back.
/// - `10cccccc`: copy `c` literal bytes; `0x80` ends the block.
/// - `11cccccc pppp`: copy `c + 3` bytes from absolute output offset `p`.
/// - `0xFE cccc vv`: fill `c` bytes with `v`.
/// - `0xFF cccc pppp`: copy `c` bytes from absolute output offset `p`.
pub fn lcw_decompress(src: &[u8], limit: usize) -> Result<Vec<u8>, MapPackError> {
    let mut dst: Vec<u8> = Vec::with_capacity(limit.min(CHUNK_LIMIT));
    let mut i = 0;

    let byte = |i: usize| src.get(i).copied().ok_or(MapPackError::TruncatedStream { offset: i });
    let word = |i: usize| -> Result<usize, MapPackError> {
        Ok(u16::from_le_bytes([byte(i)?, byte(i + 1)?]) as usize)
    };

    while i < src.len() {
        let op = src[i];
        i += 1;

        if op & 0x80 == 0 {
            let count = (((op & 0x70) >> 4) + 3) as usize;
            let back = (((op & 0x0F) as usize) << 8) | byte(i)? as usize;
            i += 1;
            if back == 0 || back > dst.len() {
                return Err(MapPackError::InvalidBackReference {
                    position: back,
                    len: dst.len(),
                });
            }
            let start = dst.len() - back;
            copy_within(&mut dst, start, count, limit)?;
        } else if op & 0x40 == 0 {
            let count = (op & 0x3F) as usize;
            if count == 0 {
                break;
            }
            let run = src
                .get(i..i + count)
                .ok_or(MapPackError::TruncatedStream { offset: i })?;
            check_limit(dst.len() + count, limit)?;
            dst.extend_from_slice(run);
            i += count;
        } else if op == 0xFE {
            let count = word(i)?;
            let value = byte(i + 2)?;
            i += 3;
            check_limit(dst.len() + count, limit)?;
            dst.resize(dst.len() + count, value);
        } else if op == 0xFF {
            let count = word(i)?;
            let pos = word(i + 2)?;
            i += 4;
            copy_within(&mut dst, pos, count, limit)?;
        } else {
            let count = ((op & 0x3F) + 3) as usize;
            let pos = word(i)?;
            i += 2;
            copy_within(&mut dst, pos, count, limit)?;
        }
    }

    Ok(dst)
}

fn check_limit(len: usize, limit: usize) -> Result<(), MapPackError> {
    if len > limit {
        Err(MapPackError::ChunkOverflow { limit })
    } else {
        Ok(())
    }
}

/// Byte-by-byte copy so overlapping ranges repeat the pattern.
fn copy_within(dst: &mut Vec<u8>, start: usize, count: usize, limit: usize) -> Result<(), MapPackError> {
    if start >= dst.len() {
        return Err(MapPackError::InvalidBackReference {
            position: start,
            len: dst.len(),
        });
    }
    check_limit(dst.len() + count, limit)?;
    for k in 0..count {
        let b = dst[start + k];
        dst.push(b);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_then_relative_copy() {
        // "ab" literal, then copy 4 bytes from 2 back: "ababab".
        let src = [0x82, b'a', b'b', 0x10, 0x02, 0x80];
        let out = lcw_decompress(&src, CHUNK_LIMIT).unwrap();
        assert_eq!(out, b"ababab".to_vec());
    }

    #[test]
    fn test_fill_and_absolute_copies() {
        // fill 5 × 0x07, medium copy 3 from 0, long copy 2 from 6
        let src = [0xFE, 5, 0, 7, 0xC0, 0, 0, 0xFF, 2, 0, 6, 0, 0x80];
        let out = lcw_decompress(&src, CHUNK_LIMIT).unwrap();
        assert_eq!(out, vec![7; 10]);
    }

    #[test]
    fn test_bad_back_reference() {
        let src = [0x00, 0x05];
        assert!(matches!(
            lcw_decompress(&src, CHUNK_LIMIT),
            Err(MapPackError::InvalidBackReference { .. })
        ));
    }

    #[test]
    fn test_truncated_literal() {
        let src = [0x85, 1, 2];
        assert!(matches!(
            lcw_decompress(&src, CHUNK_LIMIT),
            Err(MapPackError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_limit_enforced() {
        let src = [0xFE, 0xFF, 0xFF, 1];
        assert!(matches!(
            lcw_decompress(&src, CHUNK_LIMIT),
            Err(MapPackError::ChunkOverflow { .. })
        ));
    }

    #[test]
    fn test_chunk_flag_bits_masked() {
        let body = [0xFE, 4, 0, 9, 0x80];
        let mut packed = (body.len() as u32 | 0x2000_0000).to_le_bytes().to_vec();
        packed.extend_from_slice(&body);
        let text = STANDARD.encode(&packed);
        assert_eq!(unpack(&text).unwrap(), vec![9; 4]);
    }

    #[test]
    fn test_truncated_chunk_header() {
        let text = STANDARD.encode([10u8, 0, 0, 0, 0x80]);
        assert!(matches!(unpack(&text), Err(MapPackError::TruncatedChunk { offset: 0 })));
    }

    #[test]
    fn test_overlay_size_checked() {
        let body = [0xFE, 16, 0, 0xFF, 0x80];
        let mut packed = (body.len() as u32).to_le_bytes().to_vec();
        packed.extend_from_slice(&body);
        let text = STANDARD.encode(&packed);
        assert!(matches!(
            decode_overlay_pack(&text),
            Err(MapPackError::SizeMismatch { actual: 16, .. })
        ));
    }
}
