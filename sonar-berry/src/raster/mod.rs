//! 笔画栅格化: 从 [`AnnotationSet`] 得到全分辨率类别矩阵, 再裁剪到感兴趣区域.
//!
//! 每一笔的相邻两点之间画一条单像素宽的 Bresenham 直线, 写入该笔颜色对应的类别编号.
//! 笔画粗细只影响屏幕绘制, 在这里被忽略. 后画的笔画覆盖先画的笔画.

use crate::class::{ClassColorMap, HexColor};
use crate::geometry::{CoordinateMapper, NormPoint, Size2d};
use crate::stroke::{AnnotationSet, Stroke};
use crate::Idx2d;
use itertools::Itertools;
use log::{debug, warn};
use ndarray::Array2;
use num::ToPrimitive;
use std::fmt::{Display, Formatter};

mod line;
mod roi;

pub use line::{line, Line, PixelI64};
pub use roi::RegionOfInterest;

/// 栅格化错误.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// 笔画颜色不在类别映射中. 整次栅格化作废.
    UnmappedColor {
        /// 出问题的颜色.
        color: HexColor,
        /// 笔画在集合中的下标.
        stroke: usize,
    },

    /// 全分辨率尺寸为 0.
    EmptyImage(Idx2d),
}

impl Display for RasterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmappedColor { color, stroke } => {
                write!(f, "stroke #{stroke} uses color {color}, which maps to no class")
            }
            Self::EmptyImage((h, w)) => write!(f, "cannot rasterize onto a {h}x{w} image"),
        }
    }
}

impl std::error::Error for RasterError {}

/// 栅格化运行时结果.
pub type RasterResult<T> = Result<T, RasterError>;

/// 归一化坐标 -> 全分辨率像素 `(行, 列)`, 向零截断.
///
/// 坐标非有限或超出 `i64` 范围时返回 `None`.
#[inline]
fn to_pixel(mapper: &CoordinateMapper, p: NormPoint) -> Option<PixelI64> {
    let abs = mapper.to_absolute(p);
    Some((abs.y.to_i64()?, abs.x.to_i64()?))
}

/// 在全分辨率 `(h, w)` 上栅格化所有笔画, 不裁剪.
pub fn rasterize_full(
    set: &AnnotationSet,
    (h, w): Idx2d,
    colors: &ClassColorMap,
) -> RasterResult<Array2<u8>> {
    let mapper = CoordinateMapper::full_resolution(Size2d::from_shape((h, w)))
        .ok_or(RasterError::EmptyImage((h, w)))?;

    // 先检查所有颜色, 出错时不做任何绘制.
    let ids = set
        .iter()
        .enumerate()
        .map(|(i, s)| {
            colors.get(&s.class_color).ok_or_else(|| RasterError::UnmappedColor {
                color: s.class_color.clone(),
                stroke: i,
            })
        })
        .collect::<RasterResult<Vec<u8>>>()?;

    let mut out = Array2::<u8>::zeros((h, w));
    let in_bounds = |(r, c): PixelI64| -> Option<Idx2d> {
        let (r, c) = (r.to_usize()?, c.to_usize()?);
        (r < h && c < w).then_some((r, c))
    };

    for (i, (stroke, &id)) in set.iter().zip(ids.iter()).enumerate() {
        for (a, b) in stroke.points.iter().tuple_windows() {
            let (Some(pa), Some(pb)) = (to_pixel(&mapper, *a), to_pixel(&mapper, *b)) else {
                warn!("stroke #{i}: segment {a:?} -> {b:?} has no pixel representation, skipped");
                continue;
            };
            for px in line(pa, pb).clip((h, w)).filter_map(in_bounds) {
                out[px] = id;
            }
        }
    }
    debug!(
        "rasterized {} strokes ({} points, {} segments) onto {h}x{w}",
        set.len(),
        set.point_count(),
        set.iter().map(Stroke::segment_count).sum::<usize>()
    );
    Ok(out)
}

/// 栅格化并裁剪到 `roi` 的包围盒.
///
/// 任一笔画颜色不在 `colors` 中时返回 [`RasterError::UnmappedColor`].
pub fn rasterize(
    set: &AnnotationSet,
    full_size: Idx2d,
    roi: &RegionOfInterest,
    colors: &ClassColorMap,
) -> RasterResult<Array2<u8>> {
    let full = rasterize_full(set, full_size, colors)?;
    Ok(roi.crop(full.view()).to_owned())
}
