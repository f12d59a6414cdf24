//! Built-in image operations backed by `image::imageops`.

use image::DynamicImage;
use image::imageops::FilterType;

use crate::dispatch::registry::HandlerRegistry;
use crate::foundation::error::{ImagineError, ImagineResult};
use crate::ops::operation::Operation;

pub(crate) const PROVIDER_LABEL: &str = "processor";

/// Largest output, in pixels, a size-changing operation may produce (256 MiB as RGBA8).
pub(crate) const MAX_TARGET_PIXELS: u64 = 1 << 26;

pub(crate) fn registry(filter: FilterType) -> HandlerRegistry {
    HandlerRegistry::new(PROVIDER_LABEL)
        .with("thumbnail", move |img, op| thumbnail(img, op, filter))
        .with("resize", move |img, op| resize(img, op, filter))
        .with("crop", crop)
        .with("squareCenterCrop", move |img, op| {
            square_center_crop(img, op, filter)
        })
        .with("widen", move |img, op| widen(img, op, filter))
        .with("heighten", move |img, op| heighten(img, op, filter))
        .with("scale", move |img, op| scale(img, op, filter))
        .with("rotate", rotate)
        .with("flip", flip)
        .with("grayscale", grayscale)
}

fn non_zero(op: &Operation, param: &str) -> ImagineResult<u32> {
    let v = op.u32_param(param)?;
    if v == 0 {
        return Err(ImagineError::invalid_parameter(format!(
            "`{}.{param}` must be greater than 0",
            op.name()
        )));
    }
    Ok(v)
}

fn check_target(op: &Operation, width: u32, height: u32) -> ImagineResult<()> {
    if u64::from(width) * u64::from(height) > MAX_TARGET_PIXELS {
        return Err(ImagineError::invalid_parameter(format!(
            "`{}` would produce a {width}x{height} image, above {MAX_TARGET_PIXELS} pixels",
            op.name()
        )));
    }
    Ok(())
}

/// Inset thumbnails only shrink: a source already inside the box is left as is.
fn thumbnail(img: &mut DynamicImage, op: &Operation, filter: FilterType) -> ImagineResult<()> {
    let width = non_zero(op, "width")?;
    let height = non_zero(op, "height")?;
    *img = match op.opt_str_param("mode")?.unwrap_or("inset") {
        "inset" if img.width() <= width && img.height() <= height => return Ok(()),
        "inset" => img.resize(width, height, filter),
        "outbound" => {
            check_target(op, width, height)?;
            img.resize_to_fill(width, height, filter)
        }
        other => {
            return Err(ImagineError::invalid_parameter(format!(
                "`thumbnail.mode` must be `inset` or `outbound`, got `{other}`"
            )));
        }
    };
    Ok(())
}

fn resize(img: &mut DynamicImage, op: &Operation, filter: FilterType) -> ImagineResult<()> {
    let width = non_zero(op, "width")?;
    let height = non_zero(op, "height")?;
    check_target(op, width, height)?;
    *img = img.resize_exact(width, height, filter);
    Ok(())
}

fn crop(img: &mut DynamicImage, op: &Operation) -> ImagineResult<()> {
    let x = op.opt_u32_param("cropX")?.unwrap_or(0);
    let y = op.opt_u32_param("cropY")?.unwrap_or(0);
    let width = non_zero(op, "width")?;
    let height = non_zero(op, "height")?;
    let fits_x = x.checked_add(width).is_some_and(|r| r <= img.width());
    let fits_y = y.checked_add(height).is_some_and(|b| b <= img.height());
    if !fits_x || !fits_y {
        return Err(ImagineError::invalid_parameter(format!(
            "crop {width}x{height}+{x}+{y} exceeds image bounds {}x{}",
            img.width(),
            img.height()
        )));
    }
    *img = img.crop_imm(x, y, width, height);
    Ok(())
}

fn square_center_crop(
    img: &mut DynamicImage,
    op: &Operation,
    filter: FilterType,
) -> ImagineResult<()> {
    let size = non_zero(op, "size")?;
    check_target(op, size, size)?;
    let (w, h) = (img.width(), img.height());
    let side = w.min(h);
    let square = img.crop_imm((w - side) / 2, (h - side) / 2, side, side);
    *img = if side == size {
        square
    } else {
        square.resize_exact(size, size, filter)
    };
    Ok(())
}

fn widen(img: &mut DynamicImage, op: &Operation, filter: FilterType) -> ImagineResult<()> {
    let width = non_zero(op, "width")?;
    let height = scaled(op, img.height(), f64::from(width) / f64::from(img.width().max(1)))?;
    check_target(op, width, height)?;
    *img = img.resize_exact(width, height, filter);
    Ok(())
}

fn heighten(img: &mut DynamicImage, op: &Operation, filter: FilterType) -> ImagineResult<()> {
    let height = non_zero(op, "height")?;
    let width = scaled(op, img.width(), f64::from(height) / f64::from(img.height().max(1)))?;
    check_target(op, width, height)?;
    *img = img.resize_exact(width, height, filter);
    Ok(())
}

fn scale(img: &mut DynamicImage, op: &Operation, filter: FilterType) -> ImagineResult<()> {
    let factor = op.f64_param("factor")?;
    if factor <= 0.0 {
        return Err(ImagineError::invalid_parameter(format!(
            "`scale.factor` must be greater than 0, got {factor}"
        )));
    }
    let width = scaled(op, img.width(), factor)?;
    let height = scaled(op, img.height(), factor)?;
    check_target(op, width, height)?;
    *img = img.resize_exact(width, height, filter);
    Ok(())
}

fn rotate(img: &mut DynamicImage, op: &Operation) -> ImagineResult<()> {
    let degree = op.u32_param("degree")?;
    *img = match degree % 360 {
        0 => return Ok(()),
        90 => img.rotate90(),
        180 => img.rotate180(),
        270 => img.rotate270(),
        _ => {
            return Err(ImagineError::invalid_parameter(format!(
                "`rotate.degree` must be a multiple of 90, got {degree}"
            )));
        }
    };
    Ok(())
}

fn flip(img: &mut DynamicImage, op: &Operation) -> ImagineResult<()> {
    *img = match op.opt_str_param("direction")?.unwrap_or("horizontal") {
        "horizontal" => img.fliph(),
        "vertical" => img.flipv(),
        "both" => img.fliph().flipv(),
        other => {
            return Err(ImagineError::invalid_parameter(format!(
                "`flip.direction` must be `horizontal`, `vertical` or `both`, got `{other}`"
            )));
        }
    };
    Ok(())
}

fn grayscale(img: &mut DynamicImage, _op: &Operation) -> ImagineResult<()> {
    *img = img.grayscale();
    Ok(())
}

/// Scale a dimension, never collapsing to 0.
fn scaled(op: &Operation, v: u32, factor: f64) -> ImagineResult<u32> {
    let target = (f64::from(v) * factor).round();
    if !target.is_finite() || target > f64::from(u32::MAX) {
        return Err(ImagineError::invalid_parameter(format!(
            "`{}` would scale {v} px by {factor}, which overflows a 32-bit dimension",
            op.name()
        )));
    }
    Ok((target as u32).max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/processor/builtin.rs"]
mod tests;
