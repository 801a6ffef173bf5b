//! Content-signature checks against extension spoofing.
//!
//! The leading bytes of an accepted upload must match the format its
//! extension claims. Buffers shorter than 12 bytes can never satisfy a
//! check and are rejected outright.

const JPEG_MARKER: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MARKER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Offset of the `ftyp` box type in an ISO base-media (MP4/QuickTime) file.
const FTYP_OFFSET: usize = 4;

/// Does the payload carry the signature its verified content type demands?
pub fn matches_signature(buffer: &[u8], content_type: &str) -> bool {
    if buffer.len() < 12 {
        return false;
    }

    match content_type {
        "application/pdf" => buffer.starts_with(b"%PDF"),
        "image/jpeg" => buffer.starts_with(&JPEG_MARKER),
        "image/png" => buffer.starts_with(&PNG_MARKER),
        "video/mp4" | "video/quicktime" => {
            &buffer[FTYP_OFFSET..FTYP_OFFSET + 4] == b"ftyp"
        }
        // Unknown types have no signature on file; the extension gate
        // upstream has already rejected everything that lands here.
        _ => true,
    }
}
