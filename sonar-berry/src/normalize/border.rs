//! 标定边框.
//!
//! 在规范化后的 `[0, 1]` 图像中央画一个正方形轮廓, 颜色取图像主色调的反面:
//! 均值低于 0.5 时为亮端, 否则为暗端. 它只是显示辅助, 不进入类别矩阵.

use crate::consts::unit::{BRIGHT, DARK};
use log::debug;
use ndarray::{s, Array2};

/// 在 `image` 中央画出边长为 `border_size` 的正方形轮廓.
///
/// 轮廓左上角为 `((h - size) / 2, (w - size) / 2)` (整数除法), 右下角为左上角
/// 加 `size`, 四条边都包含两端. 正方形放不下时不修改图像并返回 `false`.
pub fn add_border(image: &mut Array2<f64>, border_size: usize) -> bool {
    let (h, w) = image.dim();
    if h <= border_size || w <= border_size {
        debug!("border of size {border_size} does not fit in {h}x{w}, skipped");
        return false;
    }
    let start_y = (h - border_size) / 2;
    let start_x = (w - border_size) / 2;
    let end_y = start_y + border_size;
    let end_x = start_x + border_size;

    let value = match image.mean() {
        Some(m) if m < 0.5 => BRIGHT,
        _ => DARK,
    };

    image.slice_mut(s![start_y..=end_y, start_x]).fill(value);
    image.slice_mut(s![start_y..=end_y, end_x]).fill(value);
    image.slice_mut(s![start_y, start_x..=end_x]).fill(value);
    image.slice_mut(s![end_y, start_x..=end_x]).fill(value);
    true
}
