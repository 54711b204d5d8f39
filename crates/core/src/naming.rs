//! Artifact filename and public path conventions.
//!
//! Generated videos land under a fixed web-servable prefix so the HTTP
//! layer can serve them with no extra routing. Filenames derive from a
//! fresh UUID v4, so concurrent writers never collide.

/// Directory for generated videos, relative to the public root.
pub const GENERATED_VIDEO_DIR: &str = "videos/generated";

/// Public URL prefix under which generated videos are served.
pub const PUBLIC_VIDEO_PREFIX: &str = "/videos/generated";

/// File extension for persisted video artifacts.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Fixed sample video served by the demo fallback backend.
pub const SAMPLE_VIDEO_PATH: &str = "/videos/samples/demo-reel.mp4";

/// Generate a collision-resistant filename for a new video artifact.
pub fn generated_video_filename() -> String {
    format!("{}.{VIDEO_EXTENSION}", uuid::Uuid::new_v4())
}

/// Public URL path for a generated video filename.
pub fn public_video_path(filename: &str) -> String {
    format!("{PUBLIC_VIDEO_PREFIX}/{filename}")
}
