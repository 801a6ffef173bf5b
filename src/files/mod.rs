//! Attachment policy: size, extensions, content types, storage names.
//!
//! # Design Decisions
//! - The extension decides the expected content type; the declared
//!   multipart type is never trusted
//! - Storage names are generated server-side, never derived from the
//!   client-supplied filename beyond its extension

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

pub mod sniff;

/// Maximum accepted attachment size: 20 MiB, boundary inclusive.
pub const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// Maximum attachments per submission.
pub const MAX_FILES_PER_SUBMISSION: u64 = 5;

pub const ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "jpg", "jpeg", "png", "mp4", "mov"];

pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "application/pdf",
    "image/jpeg",
    "image/png",
    "video/mp4",
    "video/quicktime",
];

/// Lower-cased extension of a client filename, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Expected content type for an allowed extension.
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    match extension {
        "pdf" => Some("application/pdf"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "mp4" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        _ => None,
    }
}

/// Collision-resistant storage name: unix-millis plus an 8-hex random
/// suffix, preserving the (already validated) extension.
pub fn storage_name(extension: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}.{}", millis, &suffix[..8], extension)
}
