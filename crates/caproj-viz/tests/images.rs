//! Integration tests for image loading and display.

use caproj_viz::plots::{decode_image, display_sample, load_img_to_array, plot_jpg, IMAGE_FIGSIZE};
use caproj_viz::VizError;
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};

#[test]
fn rgb_png_loads_as_height_width_channels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.png");
    let mut img = RgbImage::new(3, 2);
    img.put_pixel(2, 1, Rgb([10, 20, 30]));
    img.save(&path).unwrap();

    let arr = load_img_to_array(&path).unwrap();
    assert_eq!(arr.shape(), &[2, 3, 3]);
    assert_eq!(arr[[1, 2, 0]], 10);
    assert_eq!(arr[[1, 2, 2]], 30);
    assert_eq!(arr[[0, 0, 1]], 0);
}

#[test]
fn grayscale_and_alpha_keep_their_channel_count() {
    let dir = tempfile::tempdir().unwrap();
    let gray = dir.path().join("gray.png");
    GrayImage::from_pixel(2, 2, Luma([200])).save(&gray).unwrap();
    let arr = load_img_to_array(&gray).unwrap();
    assert_eq!(arr.shape(), &[2, 2, 1]);
    assert_eq!(arr[[1, 1, 0]], 200);

    let rgba = dir.path().join("rgba.png");
    RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 128])).save(&rgba).unwrap();
    let arr = load_img_to_array(&rgba).unwrap();
    assert_eq!(arr.shape(), &[1, 1, 4]);
    assert_eq!(arr[[0, 0, 3]], 128);
}

#[test]
fn plot_jpg_hides_axes_and_titles_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])).save(&path).unwrap();

    let plot = plot_jpg(&path, "Bridge site", IMAGE_FIGSIZE).unwrap();
    let v: serde_json::Value = serde_json::from_str(&plot.to_json()).unwrap();
    assert_eq!(v["data"][0]["type"], "image");
    assert_eq!(v["layout"]["width"], 1600);
    assert_eq!(v["layout"]["xaxis"]["visible"], false);
    assert_eq!(v["layout"]["yaxis"]["showticklabels"], false);
    assert!(plot.to_json().contains("Bridge site"));
}

#[test]
fn unreadable_image_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not an image").unwrap();
    assert!(matches!(load_img_to_array(&path), Err(VizError::Image(_))));
    assert!(plot_jpg(dir.path().join("missing.jpg"), "t", IMAGE_FIGSIZE).is_err());
}

#[test]
fn dark_sixteen_bit_image_scales_by_bit_depth() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dark16.png");
    ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(2, 2, Luma([200u16]))
        .save(&path)
        .unwrap();

    let (arr, bit_depth) = decode_image(&path).unwrap();
    assert_eq!(bit_depth, 16);
    assert_eq!(arr[[0, 0, 0]], 200);
    assert_eq!(display_sample(arr[[0, 0, 0]], bit_depth), 0);
    assert_eq!(display_sample(65535, 16), 255);
    assert_eq!(display_sample(200, 8), 200);

    let plot = plot_jpg(&path, "Dark", IMAGE_FIGSIZE).unwrap();
    assert!(!plot.to_json().contains("200, 200, 200"));
}

#[test]
fn eight_bit_images_report_eight_bits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray8.png");
    GrayImage::from_pixel(1, 1, Luma([7])).save(&path).unwrap();
    let (arr, bit_depth) = decode_image(&path).unwrap();
    assert_eq!(bit_depth, 8);
    assert_eq!(arr[[0, 0, 0]], 7);
}
