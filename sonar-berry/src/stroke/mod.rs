//! 笔画与标注集合.
//!
//! 一次完整的按下-移动-抬起手势产生一个 [`Stroke`]. 一个标注会话的所有笔画按时间顺序
//! 组成 [`AnnotationSet`]: 后画的笔画覆盖先画的笔画 (逐像素后写者胜).

use crate::class::HexColor;
use crate::geometry::NormPoint;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

pub mod capture;
pub mod paint;
pub mod store;

pub use capture::{pen_for_class, Pencil, PointerCapture, PointerEvent, StrokeView};
pub use paint::{polylines, Polyline};
pub use store::StrokeStore;

/// 一笔标注.
///
/// 序列化格式为 `{"color": "#rrggbb", "thickness": n, "points": [[x, y], ...]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// 类别颜色.
    #[serde(rename = "color")]
    pub class_color: HexColor,

    /// 线宽 (像素). 仅影响屏幕绘制, 不影响保存的类别矩阵.
    pub thickness: NonZeroU32,

    /// 归一化坐标点序列. 不做范围检查.
    pub points: Vec<NormPoint>,
}

impl Stroke {
    /// 以第一个点开始一笔.
    #[inline]
    pub fn new(class_color: HexColor, thickness: NonZeroU32, first: NormPoint) -> Self {
        Self {
            class_color,
            thickness,
            points: vec![first],
        }
    }

    /// 线段个数. 只有一个点的笔画没有线段, 栅格化后不产生任何像素.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// 一个标注会话的全部笔画, 有序.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet {
    strokes: Vec<Stroke>,
}

impl AnnotationSet {
    /// 空集合.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 笔画个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// 是否没有任何笔画?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// 按绘制顺序迭代.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    /// 按绘制顺序的笔画切片.
    #[inline]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// 所有笔画的点数之和.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }

    #[inline]
    pub(crate) fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    #[inline]
    pub(crate) fn last_mut(&mut self) -> Option<&mut Stroke> {
        self.strokes.last_mut()
    }
}

impl FromIterator<Stroke> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
