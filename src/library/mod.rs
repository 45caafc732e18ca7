mod library;

pub use library::Library;

const ARTWORK_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Image stems, lowercase, recognized as a directory's cover art.
const FRONT_ARTWORK: [&str; 4] = ["cover", "folder", "front", "artwork"];
const SECONDARY_ARTWORK: [&str; 3] = ["back", "vinyl", "disc"];
