//! Poster upload pipeline: decode, resize to the 1000x1500 poster frame
//! (cover + center crop) and save as JPEG under the upload directory. The
//! database only ever stores the resulting web path.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::ImageFormat;
use tracing::info;
use uuid::Uuid;

use crate::error::FilmotekaError;

pub const POSTER_WIDTH: u32 = 1000;
pub const POSTER_HEIGHT: u32 = 1500;

const MOVIES_SUBDIR: &str = "movies";

/// True for content types we even attempt to decode.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Web path for a poster filename, as stored in `movies.picture_address`.
pub fn poster_web_path(filename: &str) -> String {
    format!("/uploads/{}/{}", MOVIES_SUBDIR, filename)
}

fn poster_disk_path(upload_dir: &Path, filename: &str) -> PathBuf {
    upload_dir.join(MOVIES_SUBDIR).join(filename)
}

/// Resizes the uploaded bytes into a poster JPEG and saves it, returning
/// the web path to store. Decoding and resizing are CPU-bound, so they run
/// on a blocking task.
///
/// Only `UnsupportedImageType` and `ImageDecode` mean a bad upload; the
/// other error cases are server-side failures.
pub async fn save_resized_poster(
    upload_dir: &Path,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, FilmotekaError> {
    if !is_image_content_type(content_type) {
        return Err(FilmotekaError::UnsupportedImageType(content_type.to_string()));
    }

    let filename = format!("{}.jpg", Uuid::new_v4().simple());
    let disk_path = poster_disk_path(upload_dir, &filename);

    tokio::fs::create_dir_all(upload_dir.join(MOVIES_SUBDIR)).await?;

    let path = disk_path.clone();
    tokio::task::spawn_blocking(move || -> Result<(), FilmotekaError> {
        let decoded = image::load_from_memory(&bytes).map_err(FilmotekaError::ImageDecode)?;
        let poster = decoded.resize_to_fill(POSTER_WIDTH, POSTER_HEIGHT, FilterType::Lanczos3);
        poster
            .into_rgb8()
            .save_with_format(&path, ImageFormat::Jpeg)
            .map_err(save_error)?;
        Ok(())
    })
    .await
    .map_err(|_| FilmotekaError::ImageTaskCancelled)??;

    info!("saved poster {}", disk_path.display());
    Ok(poster_web_path(&filename))
}

/// The `image` crate wraps write failures in its own error type; unwrap
/// them back into the io variant so they cannot read as a bad upload.
fn save_error(err: image::ImageError) -> FilmotekaError {
    match err {
        image::ImageError::IoError(io) => FilmotekaError::ImageIo(io),
        other => FilmotekaError::ImageSave(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::io::Cursor;

    #[test]
    fn image_content_types_are_accepted() {
        assert!(is_image_content_type("image/jpeg"));
        assert!(is_image_content_type("IMAGE/PNG"));
        assert!(!is_image_content_type("video/mp4"));
        assert!(!is_image_content_type("application/octet-stream"));
    }

    #[test]
    fn web_path_points_into_the_movies_subdir() {
        assert_eq!(poster_web_path("x.jpg"), "/uploads/movies/x.jpg");
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn poster_is_resized_to_the_fixed_frame() {
        let dir = tempfile::tempdir().unwrap();
        // Keep the synthetic input small; resize_to_fill upscales to cover.
        let web_path = save_resized_poster(dir.path(), "image/png", png_bytes(200, 100))
            .await
            .unwrap();

        let filename = web_path.rsplit('/').next().unwrap();
        let saved = image::open(dir.path().join("movies").join(filename)).unwrap();
        assert_eq!(saved.width(), POSTER_WIDTH);
        assert_eq!(saved.height(), POSTER_HEIGHT);
    }

    #[tokio::test]
    async fn non_image_content_type_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_resized_poster(dir.path(), "video/mp4", png_bytes(10, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, FilmotekaError::UnsupportedImageType(_)));
    }

    #[tokio::test]
    async fn garbage_bytes_fail_as_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_resized_poster(dir.path(), "image/jpeg", b"not an image".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, FilmotekaError::ImageDecode(_)));
    }

    #[test]
    fn write_failures_stay_io_errors_rather_than_decode_errors() {
        let full = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = save_error(image::ImageError::IoError(full));
        assert!(matches!(err, FilmotekaError::ImageIo(_)));
    }
}
