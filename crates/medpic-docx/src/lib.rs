mod images;
mod options;
mod render;
mod request;
mod stats;
mod types;

pub use images::{PreparedImage, apply_fit, decode_image, encode_png, load_image, load_images};
pub use options::*;
pub use render::{
    DOCX_MIME, DocumentArtifact, derive_filename, generate, generate_sync, save_artifact,
};
pub use request::{GenerationRequest, UploadedImage};
pub use stats::{DocumentStatistics, calculate_statistics};
pub use types::*;
