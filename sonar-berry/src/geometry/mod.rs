//! 二维几何: 屏幕坐标, 归一化坐标, 以及两者之间的映射.
//!
//! 屏幕坐标以控件左上角为原点, `x` 向右, `y` 向下增长.
//! 归一化坐标以全分辨率图像内容区域为 `[0, 1] x [0, 1]`, 方向与屏幕坐标相同.

use serde::{Deserialize, Serialize};

pub mod gate;
pub mod mapper;

pub use gate::{DrawingGate, GateRect};
pub use mapper::CoordinateMapper;

/// 宽高.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size2d {
    /// 宽.
    pub width: f64,
    /// 高.
    pub height: f64,
}

impl Size2d {
    /// 直接初始化.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 从 `(高, 宽)` 形式的数组形状构建.
    #[inline]
    pub fn from_shape((h, w): crate::Idx2d) -> Self {
        Self::new(w as f64, h as f64)
    }
}

/// 控件上的屏幕坐标 (像素, 可为小数).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenPos {
    /// 水平分量.
    pub x: f64,
    /// 垂直分量.
    pub y: f64,
}

impl ScreenPos {
    /// 直接初始化.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 归一化坐标. 序列化为 `[x, y]`.
///
/// 该结构不检查取值范围: `[0, 1]` 之外的值是合法的 (如在留白处落笔).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct NormPoint {
    /// 相对图像宽度的水平位置.
    pub x: f64,
    /// 相对图像高度的垂直位置.
    pub y: f64,
}

impl NormPoint {
    /// 直接初始化.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 两个分量是否都是有限值?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for NormPoint {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<NormPoint> for [f64; 2] {
    #[inline]
    fn from(p: NormPoint) -> Self {
        [p.x, p.y]
    }
}
