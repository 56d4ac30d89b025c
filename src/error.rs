use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilmotekaError {
    #[error("Unsupported upload content type: {0}")]
    UnsupportedImageType(String),
    #[error("Failed to decode image: {0}")]
    ImageDecode(image::ImageError),
    #[error("Failed to encode image: {0}")]
    ImageSave(image::ImageError),
    #[error("Failed to write image file: {0}")]
    ImageIo(#[from] std::io::Error),
    #[error("Image task was cancelled")]
    ImageTaskCancelled,
}
