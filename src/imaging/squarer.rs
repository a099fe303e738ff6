//! 画像を正方形にリサイズ・パディングする
//!
//! アスペクト比を保ったまま長辺を指定サイズに縮小（拡大）し、
//! 短辺側を黒で上下（左右）均等に埋めて size x size の画像にする。
//! 余りの1ピクセルは下側（右側）に付ける。

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use tracing::{debug, info};

use crate::error::{PrepError, Result};
use crate::scan::walk::matching_files;
use crate::scan::ImageFilter;

/// パディング幅
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    /// リサイズ後のサイズから正方形までのパディングを求める
    pub fn for_size(width: u32, height: u32, target_size: u32) -> Self {
        let delta_w = target_size.saturating_sub(width);
        let delta_h = target_size.saturating_sub(height);
        Self {
            top: delta_h / 2,
            bottom: delta_h - delta_h / 2,
            left: delta_w / 2,
            right: delta_w - delta_w / 2,
        }
    }
}

/// 長辺が target_size になるように縮尺したサイズ（各辺最低1ピクセル）
pub fn scaled_size(width: u32, height: u32, target_size: u32) -> (u32, u32) {
    let longest = width.max(height).max(1) as u64;
    let scale = |side: u32| ((side as u64 * target_size as u64) / longest).max(1) as u32;
    (scale(width), scale(height))
}

/// メモリ上の画像を正方形に変換
pub fn square_image(img: &DynamicImage, target_size: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(target_size, target_size, Rgb([0, 0, 0]));
    if img.width() == 0 || img.height() == 0 || target_size == 0 {
        return canvas;
    }

    let (new_w, new_h) = scaled_size(img.width(), img.height(), target_size);
    let resized = imageops::resize(&img.to_rgb8(), new_w, new_h, FilterType::Triangle);
    let padding = Padding::for_size(new_w, new_h, target_size);

    imageops::replace(&mut canvas, &resized, padding.left as i64, padding.top as i64);
    canvas
}

/// ディレクトリ内の画像をすべて正方形に変換して new_imgs_dir に同名で保存する
///
/// 戻り値は書き出した画像の枚数。
pub fn square_images(
    imgs_dir: &Path,
    new_imgs_dir: &Path,
    target_size: u32,
    filter: &ImageFilter,
) -> Result<usize> {
    if !imgs_dir.is_dir() {
        return Err(PrepError::NotFound {
            path: imgs_dir.to_path_buf(),
        });
    }
    if !new_imgs_dir.is_dir() {
        return Err(PrepError::NotFound {
            path: new_imgs_dir.to_path_buf(),
        });
    }
    if target_size < 1 {
        return Err(PrepError::InvalidSize(target_size));
    }

    let mut written = 0;
    for src in matching_files(imgs_dir, filter)? {
        let Some(file_name) = src.file_name() else {
            continue;
        };
        let dst = new_imgs_dir.join(file_name);

        let img = image::open(&src).map_err(|e| PrepError::image(&src, e))?;
        let squared = square_image(&img, target_size);
        squared.save(&dst).map_err(|e| PrepError::image(&dst, e))?;

        debug!(
            "{} ({}x{}) -> {} ({}x{})",
            src.display(),
            img.width(),
            img.height(),
            dst.display(),
            target_size,
            target_size
        );
        written += 1;
    }

    info!(
        "{} 枚の画像 ({}) を {}x{} に変換しました: {}",
        written,
        filter,
        target_size,
        target_size,
        new_imgs_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn white(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
    }

    fn is_black(px: &Rgb<u8>) -> bool {
        px.0 == [0, 0, 0]
    }

    fn is_bright(px: &Rgb<u8>) -> bool {
        px.0.iter().all(|&c| c > 200)
    }

    #[test]
    fn test_scaled_size() {
        assert_eq!(scaled_size(100, 50, 64), (64, 32));
        assert_eq!(scaled_size(50, 100, 64), (32, 64));
        assert_eq!(scaled_size(100, 49, 64), (64, 31));
        assert_eq!(scaled_size(20, 20, 64), (64, 64));
        assert_eq!(scaled_size(1000, 1, 64), (64, 1));
    }

    #[test]
    fn test_padding_odd_pixel_goes_bottom_right() {
        let pad = Padding::for_size(64, 31, 64);
        assert_eq!(pad, Padding { top: 16, bottom: 17, left: 0, right: 0 });

        let pad = Padding::for_size(31, 64, 64);
        assert_eq!(pad, Padding { top: 0, bottom: 0, left: 16, right: 17 });
    }

    #[test]
    fn test_wide_image_padded_top_and_bottom() {
        let out = square_image(&white(100, 50), 64);
        assert_eq!(out.dimensions(), (64, 64));

        for x in [0, 31, 63] {
            assert!(is_black(out.get_pixel(x, 0)));
            assert!(is_black(out.get_pixel(x, 15)));
            assert!(is_bright(out.get_pixel(x, 16)));
            assert!(is_bright(out.get_pixel(x, 47)));
            assert!(is_black(out.get_pixel(x, 48)));
            assert!(is_black(out.get_pixel(x, 63)));
        }
        // 左右は埋めない
        assert!(is_bright(out.get_pixel(0, 32)));
        assert!(is_bright(out.get_pixel(63, 32)));
    }

    #[test]
    fn test_tall_image_padded_left_and_right() {
        let out = square_image(&white(50, 100), 64);
        assert_eq!(out.dimensions(), (64, 64));
        assert!(is_black(out.get_pixel(15, 32)));
        assert!(is_bright(out.get_pixel(16, 32)));
        assert!(is_bright(out.get_pixel(47, 32)));
        assert!(is_black(out.get_pixel(48, 32)));
        assert!(is_bright(out.get_pixel(32, 0)));
    }

    #[test]
    fn test_square_images_writes_same_names() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        white(100, 50).save(src.path().join("a.png")).unwrap();
        white(30, 60).save(src.path().join("b.png")).unwrap();
        std::fs::write(src.path().join("readme.txt"), "skip").unwrap();

        let filter = ImageFilter::new("*.png").unwrap();
        let written = square_images(src.path(), dst.path(), 32, &filter).unwrap();
        assert_eq!(written, 2);

        for name in ["a.png", "b.png"] {
            let img = image::open(dst.path().join(name)).unwrap();
            assert_eq!((img.width(), img.height()), (32, 32));
        }
        assert!(!dst.path().join("readme.txt").exists());
    }

    #[test]
    fn test_square_images_errors() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let filter = ImageFilter::new("*.png").unwrap();

        let err = square_images(&src.path().join("missing"), dst.path(), 32, &filter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = square_images(src.path(), &dst.path().join("missing"), 32, &filter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = square_images(src.path(), dst.path(), 0, &filter).unwrap_err();
        assert!(matches!(err, PrepError::InvalidSize(0)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_undecodable_image_fails() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("broken.png"), b"not an image").unwrap();

        let filter = ImageFilter::new("*.png").unwrap();
        let err = square_images(src.path(), dst.path(), 32, &filter).unwrap_err();
        assert!(matches!(err, PrepError::Image { .. }));
    }
}
