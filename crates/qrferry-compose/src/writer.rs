//! Persists a deck of QR images: numbered parts plus one combined grid.

use std::path::{Path, PathBuf};

use image::{imageops, Rgb, RgbImage};
use tracing::{debug, info};

use qrferry_qr::QrImage;

use crate::error::{ComposeError, ComposeResult};
use crate::grid::{cell, grid_size};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Result of saving a deck.
#[derive(Clone, Debug)]
pub struct SavedSet {
    /// Individual part files, in chunk order.
    pub parts: Vec<PathBuf>,
    /// The combined grid image.
    pub combined: PathBuf,
    /// Columns (and rows) of the combined grid.
    pub grid_size: u32,
}

/// Save every image as `qr_code_part_{n}.png` (1-indexed) in `dir`, then
/// compose and save the combined grid as `combined_qr_codes.png`.
///
/// The first image's dimensions define the grid cell size; all QR images in
/// a deck share the forced version, so they are equal by construction.
/// An empty deck is rejected before anything touches the filesystem; any
/// filesystem failure aborts the whole save.
pub fn save_set(images: &[QrImage], dir: &Path) -> ComposeResult<SavedSet> {
    if images.is_empty() {
        return Err(ComposeError::EmptyInput);
    }

    std::fs::create_dir_all(dir).map_err(|source| ComposeError::Unwritable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut parts = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let path = dir.join(format!("qr_code_part_{}.png", i + 1));
        save_png(image.image(), &path)?;
        debug!(part = i + 1, path = %path.display(), "saved QR part");
        parts.push(path);
    }

    let grid = grid_size(images.len());
    let (cell_w, cell_h) = (images[0].width(), images[0].height());
    let mut canvas = RgbImage::from_pixel(grid * cell_w, grid * cell_h, WHITE);

    for (i, image) in images.iter().enumerate() {
        let (col, row) = cell(i, grid);
        imageops::replace(
            &mut canvas,
            image.image(),
            i64::from(col * cell_w),
            i64::from(row * cell_h),
        );
    }

    let combined = dir.join("combined_qr_codes.png");
    save_png(&canvas, &combined)?;
    info!(
        parts = parts.len(),
        grid,
        combined = %combined.display(),
        "combined image written"
    );

    Ok(SavedSet {
        parts,
        combined,
        grid_size: grid,
    })
}

fn save_png(image: &RgbImage, path: &Path) -> ComposeResult<()> {
    image.save(path).map_err(|e| match e {
        image::ImageError::IoError(source) => ComposeError::Unwritable {
            path: path.to_path_buf(),
            source,
        },
        other => ComposeError::Image {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(index: usize, size: u32) -> QrImage {
        // A gray square distinguishable from the white canvas.
        let shade = 40 + (index as u8) * 20;
        QrImage::new(index, RgbImage::from_pixel(size, size, Rgb([shade; 3])))
    }

    #[test]
    fn empty_deck_is_rejected_before_io() {
        let err = save_set(&[], Path::new("/nonexistent/never-created")).unwrap_err();
        assert!(matches!(err, ComposeError::EmptyInput));
        assert!(!Path::new("/nonexistent/never-created").exists());
    }

    #[test]
    fn three_images_make_a_two_by_two_grid() {
        let dir = tempfile::tempdir().unwrap();
        let images: Vec<QrImage> = (0..3).map(|i| test_image(i, 50)).collect();

        let saved = save_set(&images, dir.path()).unwrap();
        assert_eq!(saved.grid_size, 2);
        assert_eq!(saved.parts.len(), 3);
        for (i, part) in saved.parts.iter().enumerate() {
            assert!(part.ends_with(format!("qr_code_part_{}.png", i + 1)));
            assert!(part.exists());
        }

        let combined = image::open(&saved.combined).unwrap().to_rgb8();
        assert_eq!(combined.width(), 100);
        assert_eq!(combined.height(), 100);
        // The unused fourth cell stays white.
        assert_eq!(*combined.get_pixel(75, 75), Rgb([255, 255, 255]));
        // First cell carries the first image's shade.
        assert_eq!(*combined.get_pixel(25, 25), Rgb([40, 40, 40]));
    }

    #[test]
    fn single_image_still_gets_a_grid() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_set(&[test_image(0, 30)], dir.path()).unwrap();
        assert_eq!(saved.grid_size, 2);

        let combined = image::open(&saved.combined).unwrap().to_rgb8();
        assert_eq!(combined.width(), 60);
        assert_eq!(combined.height(), 60);
    }

    #[test]
    fn parts_are_readable_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_set(&[test_image(0, 30), test_image(1, 30)], dir.path()).unwrap();
        for part in &saved.parts {
            let reloaded = image::open(part).unwrap().to_rgb8();
            assert_eq!(reloaded.width(), 30);
        }
    }

    #[test]
    fn unwritable_directory_aborts_save() {
        let images = vec![test_image(0, 10)];
        let err = save_set(&images, Path::new("/proc/qrferry-denied")).unwrap_err();
        assert!(matches!(err, ComposeError::Unwritable { .. }));
    }
}
