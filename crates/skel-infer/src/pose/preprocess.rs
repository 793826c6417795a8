use crate::InferError;
use skel_base::Tensor;

/// Prepare a camera image for a square-input pose model.
///
/// Takes an HWC tensor `[H, W, 3]` with values in [0, 255] and returns an
/// NHWC tensor `[1, size, size, 3]` with values in [0.0, 1.0]. The image is
/// stretched to the square with bilinear interpolation (no letterbox), so
/// normalized model output maps straight back onto the source frame.
pub fn preprocess(image: &Tensor<f32>, size: usize) -> Result<Tensor<f32>, InferError> {
    let (h, w, c) = image.hwc().ok_or_else(|| InferError::ShapeMismatch {
        expected: "[H, W, 3]".to_string(),
        got: format!("{:?}", image.shape),
    })?;
    if c != 3 {
        return Err(InferError::ShapeMismatch {
            expected: "3 channels".to_string(),
            got: format!("{c} channels"),
        });
    }
    if h == 0 || w == 0 || size == 0 {
        return Err(InferError::ShapeMismatch {
            expected: "non-empty image and model input".to_string(),
            got: format!("{h}x{w} image, {size}x{size} input"),
        });
    }

    // align-corners=false sampling, same as the usual resizeBilinear
    let scale_y = h as f32 / size as f32;
    let scale_x = w as f32 / size as f32;
    let mut data = Vec::with_capacity(size * size * 3);

    for out_y in 0..size {
        let (y0, y1, fy) = sample_axis(out_y, scale_y, h);
        for out_x in 0..size {
            let (x0, x1, fx) = sample_axis(out_x, scale_x, w);
            for ch in 0..3 {
                let px = |y: usize, x: usize| image.data[(y * w + x) * 3 + ch];
                let top = px(y0, x0) * (1.0 - fx) + px(y0, x1) * fx;
                let bottom = px(y1, x0) * (1.0 - fx) + px(y1, x1) * fx;
                data.push((top * (1.0 - fy) + bottom * fy) / 255.0);
            }
        }
    }

    Ok(Tensor::new(vec![1, size, size, 3], data)?)
}

/// Source indices and blend weight for one output coordinate
fn sample_axis(out: usize, scale: f32, len: usize) -> (usize, usize, f32) {
    let src = ((out as f32 + 0.5) * scale - 0.5).max(0.0);
    let i0 = (src.floor() as usize).min(len - 1);
    let i1 = (i0 + 1).min(len - 1);
    (i0, i1, (src - i0 as f32).min(1.0))
}
