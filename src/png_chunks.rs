//! Minimal PNG container: 8-bit RGBA, no filtering, no interlacing.
//!
//! The stream is assembled by hand (signature, IHDR, one IDAT, IEND) with
//! zlib from `flate2` and CRC-32 from `crc32fast`. The reading half exists
//! to check what the writing half produced.

use anyhow::{bail, Context, Result};
use crc32fast::Hasher;
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use image::Rgba;
use std::io::{Read, Write};

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

pub const BIT_DEPTH: u8 = 8;
/// Truecolor with alpha
pub const COLOR_TYPE_RGBA: u8 = 6;

const IHDR_LEN: usize = 13;
const BYTES_PER_PIXEL: usize = 4;
const FILTER_NONE: u8 = 0;

/// Largest width or height a PNG header may carry
pub const MAX_DIMENSION: u32 = (1 << 31) - 1;

/// One chunk as read back from a stream, CRC already checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: [u8; 4],
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn kind_str(&self) -> &str {
        std::str::from_utf8(&self.kind).unwrap_or("????")
    }
}

/// Decoded IHDR payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl Header {
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: BIT_DEPTH,
            color_type: COLOR_TYPE_RGBA,
            compression: 0,
            filter: 0,
            interlace: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; IHDR_LEN] {
        let mut out = [0u8; IHDR_LEN];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type;
        out[10] = self.compression;
        out[11] = self.filter;
        out[12] = self.interlace;
        out
    }

    pub fn parse(chunk: &Chunk) -> Result<Self> {
        if chunk.kind != IHDR {
            bail!("Expected IHDR chunk, found {}", chunk.kind_str());
        }
        let d = &chunk.data;
        if d.len() != IHDR_LEN {
            bail!("IHDR payload must be {} bytes, got {}", IHDR_LEN, d.len());
        }

        Ok(Self {
            width: u32::from_be_bytes([d[0], d[1], d[2], d[3]]),
            height: u32::from_be_bytes([d[4], d[5], d[6], d[7]]),
            bit_depth: d[8],
            color_type: d[9],
            compression: d[10],
            filter: d[11],
            interlace: d[12],
        })
    }

    /// Size of the unfiltered scanline buffer for an 8-bit RGBA image
    pub fn raw_len(&self) -> usize {
        self.height as usize * (1 + self.width as usize * BYTES_PER_PIXEL)
    }
}

/// CRC-32 over chunk type followed by payload
pub fn crc(kind: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    hasher.finalize()
}

/// Appends one framed chunk: length, type, payload, CRC.
pub fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len())
        .ok()
        .filter(|len| *len <= MAX_DIMENSION)
        .with_context(|| {
            format!(
                "{} payload too large: {} bytes",
                String::from_utf8_lossy(kind),
                data.len()
            )
        })?;

    out.reserve(12 + data.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc(kind, data).to_be_bytes());
    Ok(())
}

/// Encodes a `width` x `height` RGBA image whose pixels come from `color`.
///
/// `color` receives `(x, y, width, height)`. Output is deterministic for a
/// deterministic `color`.
pub fn encode_png<F>(width: u32, height: u32, color: F) -> Result<Vec<u8>>
where
    F: Fn(u32, u32, u32, u32) -> Rgba<u8>,
{
    if width == 0 || height == 0 {
        bail!("Image dimensions must be non-zero, got {}x{}", width, height);
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        bail!("Image dimensions exceed the PNG limit: {}x{}", width, height);
    }

    let header = Header::rgba8(width, height);

    let mut raw = Vec::with_capacity(header.raw_len());
    for y in 0..height {
        raw.push(FILTER_NONE);
        for x in 0..width {
            raw.extend_from_slice(&color(x, y, width, height).0);
        }
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&raw).context("Failed to compress image data")?;
    let compressed = encoder.finish().context("Failed to finish zlib stream")?;

    let mut png = Vec::with_capacity(SIGNATURE.len() + 3 * 12 + IHDR_LEN + compressed.len());
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, &IHDR, &header.to_bytes())?;
    write_chunk(&mut png, &IDAT, &compressed)?;
    write_chunk(&mut png, &IEND, &[])?;
    Ok(png)
}

/// Splits a PNG stream into its chunks, verifying every CRC.
///
/// The stream must start with the signature and end with IEND; trailing
/// bytes after IEND are an error.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
        bail!("Missing PNG signature");
    }

    let mut chunks = Vec::new();
    let mut pos = SIGNATURE.len();

    loop {
        let Some(head) = bytes.get(pos..pos + 8) else {
            bail!("Truncated chunk header at offset {}", pos);
        };
        let len = u32::from_be_bytes([head[0], head[1], head[2], head[3]]) as usize;
        let kind = [head[4], head[5], head[6], head[7]];

        let data_start = pos + 8;
        let Some(data) = bytes.get(data_start..data_start + len) else {
            bail!(
                "Truncated {} chunk at offset {}",
                String::from_utf8_lossy(&kind),
                pos
            );
        };
        let Some(stored) = bytes.get(data_start + len..data_start + len + 4) else {
            bail!(
                "Missing CRC for {} chunk at offset {}",
                String::from_utf8_lossy(&kind),
                pos
            );
        };

        let stored = u32::from_be_bytes([stored[0], stored[1], stored[2], stored[3]]);
        let computed = crc(&kind, data);
        if stored != computed {
            bail!(
                "CRC mismatch in {} chunk: stored {:08x}, computed {:08x}",
                String::from_utf8_lossy(&kind),
                stored,
                computed
            );
        }

        chunks.push(Chunk {
            kind,
            data: data.to_vec(),
        });
        pos = data_start + len + 4;

        if kind == IEND {
            break;
        }
    }

    if pos != bytes.len() {
        bail!("{} trailing bytes after IEND", bytes.len() - pos);
    }
    if chunks.first().map(|c| c.kind) != Some(IHDR) {
        bail!("First chunk must be IHDR");
    }

    Ok(chunks)
}

/// Concatenates the IDAT payloads and inflates them.
pub fn inflate_image_data(chunks: &[Chunk]) -> Result<Vec<u8>> {
    let compressed: Vec<u8> = chunks
        .iter()
        .filter(|c| c.kind == IDAT)
        .flat_map(|c| c.data.iter().copied())
        .collect();
    if compressed.is_empty() {
        bail!("No IDAT data");
    }

    let mut raw = Vec::new();
    ZlibDecoder::new(&compressed[..])
        .read_to_end(&mut raw)
        .context("Failed to inflate IDAT data")?;
    Ok(raw)
}
