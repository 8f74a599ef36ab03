use std::path::Path;

use image::{ColorType, DynamicImage};
use ndarray::{Array3, ArrayView3};
use plotly::color::{Rgb, Rgba};
use plotly::{Image as ImageTrace, Plot};

use crate::error::{Result, VizError};
use crate::plots::figure::{hidden_axis, FigSize};

/// Default figure size for [`plot_jpg`].
pub const IMAGE_FIGSIZE: FigSize = FigSize::new(16.0, 12.0);

fn to_array(raw: Vec<i32>, width: u32, height: u32, channels: usize) -> Result<Array3<i32>> {
    Array3::from_shape_vec((height as usize, width as usize, channels), raw)
        .map_err(|e| VizError::shape((height, width, channels), e.to_string()))
}

fn widen<T: Copy + Into<i32>>(samples: Vec<T>) -> Vec<i32> {
    samples.into_iter().map(Into::into).collect()
}

/// Decode `path` into a (height, width, channels) array of raw sample values.
///
/// 16-bit images keep their full range; every other depth is read as 8-bit.
pub fn load_img_to_array(path: impl AsRef<Path>) -> Result<Array3<i32>> {
    decode_image(path).map(|(pixels, _)| pixels)
}

/// Like [`load_img_to_array`], also returning the bits per sample (8 or 16)
/// the samples were decoded at.
pub fn decode_image(path: impl AsRef<Path>) -> Result<(Array3<i32>, u8)> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let (w, h) = (img.width(), img.height());
    let color = img.color();
    log::debug!("{}: {}x{} {:?}", path.display(), w, h, color);

    let (raw, channels, bit_depth) = match color {
        ColorType::L16 => (widen(img.to_luma16().into_raw()), 1, 16),
        ColorType::La16 => (widen(img.to_luma_alpha16().into_raw()), 2, 16),
        ColorType::Rgb16 => (widen(img.to_rgb16().into_raw()), 3, 16),
        ColorType::Rgba16 => (widen(img.to_rgba16().into_raw()), 4, 16),
        other => {
            let (raw, channels) = eight_bit(&img, other.channel_count());
            (raw, channels, 8)
        }
    };
    Ok((to_array(raw, w, h, channels)?, bit_depth))
}

fn eight_bit(img: &DynamicImage, channels: u8) -> (Vec<i32>, usize) {
    match channels {
        1 => (widen(img.to_luma8().into_raw()), 1),
        2 => (widen(img.to_luma_alpha8().into_raw()), 2),
        3 => (widen(img.to_rgb8().into_raw()), 3),
        _ => (widen(img.to_rgba8().into_raw()), 4),
    }
}

/// Scale a raw sample decoded at `bit_depth` bits down to 8 bits for display.
pub fn display_sample(v: i32, bit_depth: u8) -> u8 {
    if bit_depth > 8 {
        (v.clamp(0, 65535) / 257) as u8
    } else {
        v.clamp(0, 255) as u8
    }
}

fn image_trace(pixels: ArrayView3<i32>, bit_depth: u8) -> Result<Box<ImageTrace>> {
    let sample = |v: i32| display_sample(v, bit_depth);
    let channels = pixels.shape()[2];
    let rows = pixels.outer_iter();
    let trace = match channels {
        1 => ImageTrace::new(
            rows.map(|row| {
                row.outer_iter()
                    .map(|p| {
                        let v = sample(p[0]);
                        Rgb::new(v, v, v)
                    })
                    .collect()
            })
            .collect::<Vec<Vec<Rgb>>>(),
        ),
        2 => ImageTrace::new(
            rows.map(|row| {
                row.outer_iter()
                    .map(|p| {
                        let v = sample(p[0]);
                        Rgba::new(v, v, v, f64::from(sample(p[1])) / 255.0)
                    })
                    .collect()
            })
            .collect::<Vec<Vec<Rgba>>>(),
        ),
        3 => ImageTrace::new(
            rows.map(|row| {
                row.outer_iter()
                    .map(|p| Rgb::new(sample(p[0]), sample(p[1]), sample(p[2])))
                    .collect()
            })
            .collect::<Vec<Vec<Rgb>>>(),
        ),
        4 => ImageTrace::new(
            rows.map(|row| {
                row.outer_iter()
                    .map(|p| {
                        Rgba::new(
                            sample(p[0]),
                            sample(p[1]),
                            sample(p[2]),
                            f64::from(sample(p[3])) / 255.0,
                        )
                    })
                    .collect()
            })
            .collect::<Vec<Vec<Rgba>>>(),
        ),
        n => {
            return Err(VizError::InvalidArgument(format!(
                "unsupported image channel count {}",
                n
            )))
        }
    };
    Ok(trace)
}

/// Show an image file without ticks, grid or axis lines.
pub fn plot_jpg(path: impl AsRef<Path>, title: &str, figsize: FigSize) -> Result<Plot> {
    let (pixels, bit_depth) = decode_image(path)?;

    let mut plot = Plot::new();
    plot.add_trace(image_trace(pixels.view(), bit_depth)?);
    plot.set_layout(
        figsize
            .layout()
            .title(title)
            .x_axis(hidden_axis())
            .y_axis(hidden_axis()),
    );
    Ok(plot)
}
