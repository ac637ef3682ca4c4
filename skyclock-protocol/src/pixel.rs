//! Pixel byte order
//!
//! The controller takes RGB565 most-significant byte first. Readback
//! (RAMRD) returns 18-bit colour as three bytes with the value in the top
//! six bits of each, preceded by one dummy byte.

/// Bytes per pixel on a write stream
pub const WRITE_BYTES_PER_PIXEL: usize = 2;

/// Bytes per pixel on a read stream
pub const READ_BYTES_PER_PIXEL: usize = 3;

/// Dummy bytes clocked out after RAMRD before pixel data
pub const READ_DUMMY_BYTES: usize = 1;

/// Encode an RGB565 value for the wire
#[inline]
pub const fn to_wire(raw: u16) -> [u8; 2] {
    raw.to_be_bytes()
}

/// Decode an RGB565 value from the wire
#[inline]
pub const fn from_wire(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Decode one RAMRD pixel (R, G, B bytes, 6 significant bits each)
#[inline]
pub const fn from_rgb666(bytes: [u8; 3]) -> u16 {
    let r = (bytes[0] >> 3) as u16;
    let g = (bytes[1] >> 2) as u16;
    let b = (bytes[2] >> 3) as u16;
    (r << 11) | (g << 5) | b
}

/// Encode an RGB565 value the way RAMRD reports it
///
/// Low bits are zero-filled, so `from_rgb666(to_rgb666(c)) == c`.
#[inline]
pub const fn to_rgb666(raw: u16) -> [u8; 3] {
    let r = ((raw >> 11) & 0x1F) as u8;
    let g = ((raw >> 5) & 0x3F) as u8;
    let b = (raw & 0x1F) as u8;
    [r << 3, g << 2, b << 3]
}

/// Encode a run of pixels into `out`, returning the bytes written
///
/// Stops at whichever of `pixels` or `out` runs out first.
pub fn encode_run(pixels: impl IntoIterator<Item = u16>, out: &mut [u8]) -> usize {
    let mut written = 0;
    for (raw, slot) in pixels.into_iter().zip(out.chunks_exact_mut(WRITE_BYTES_PER_PIXEL)) {
        slot.copy_from_slice(&to_wire(raw));
        written += WRITE_BYTES_PER_PIXEL;
    }
    written
}
