mod filetype;
mod track;

pub use filetype::FileType;
pub use track::Track;
