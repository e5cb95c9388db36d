//! 绘制回调: 把标注快照换算成控件坐标下的折线.

use super::AnnotationSet;
use crate::geometry::{CoordinateMapper, ScreenPos};

/// 一条待绘制的折线. 线帽与拐角均为圆形.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    /// `[r, g, b, a]`, `a` 即视图的不透明度.
    pub rgba: [u8; 4],
    /// 线宽 (像素).
    pub thickness: u32,
    /// 控件坐标下的顶点.
    pub points: Vec<ScreenPos>,
}

/// 以映射 `mapper` 和不透明度 `opacity` 生成 `snapshot` 中所有笔画的折线, 顺序不变.
///
/// 没有点的笔画被跳过; 只有一个点的笔画生成只有一个顶点的折线.
pub fn polylines(snapshot: &AnnotationSet, mapper: &CoordinateMapper, opacity: u8) -> Vec<Polyline> {
    snapshot
        .iter()
        .filter(|s| !s.points.is_empty())
        .map(|s| {
            let [r, g, b] = s.class_color.rgb();
            Polyline {
                rgba: [r, g, b, opacity],
                thickness: s.thickness.get(),
                points: s.points.iter().map(|p| mapper.to_absolute(*p)).collect(),
            }
        })
        .collect()
}
