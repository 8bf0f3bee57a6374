use std::path::PathBuf;

use super::*;

fn sample() -> image::RgbaImage {
    image::RgbaImage::from_fn(8, 6, |x, y| image::Rgba([(x * 30) as u8, (y * 40) as u8, 90, 255]))
}

#[test]
fn format_follows_extension_case_insensitively() {
    assert_eq!(OutputFormat::from_path(Path::new("a.jpg")), OutputFormat::Jpeg);
    assert_eq!(OutputFormat::from_path(Path::new("a.JPEG")), OutputFormat::Jpeg);
    assert_eq!(OutputFormat::from_path(Path::new("a.png")), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("a.bmp")), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("photo.jpg.png")), OutputFormat::Png);
}

#[test]
fn png_encoding_is_lossless() {
    let img = sample();
    let bytes = encode_image(&img, OutputFormat::Png).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    assert_eq!(image::load_from_memory(&bytes).unwrap().to_rgba8(), img);
}

#[test]
fn jpeg_encoding_decodes_as_jpeg_with_same_size() {
    let bytes = encode_image(&sample(), OutputFormat::Jpeg).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 6));
}

#[test]
fn save_writes_codec_matching_extension() {
    let dir = PathBuf::from("target").join("unit_save");
    std::fs::create_dir_all(&dir).unwrap();

    let jpg = dir.join("out.jpeg");
    assert_eq!(save_image(&sample(), &jpg).unwrap(), OutputFormat::Jpeg);
    let bytes = std::fs::read(&jpg).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);

    let other = dir.join("out.tiff");
    assert_eq!(save_image(&sample(), &other).unwrap(), OutputFormat::Png);
    let bytes = std::fs::read(&other).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
}

#[test]
fn unwritable_path_is_an_encode_error() {
    let err = save_image(&sample(), Path::new("target/no/such/dir/out.png")).unwrap_err();
    assert!(matches!(err, CaptionError::Encode(_)));
}
