//! 可绘制区域.
//!
//! 标注只允许落在显示图像中央的一个正方形 (标定/目标区域) 内. 正方形边长为
//! `s * image_w * fraction`, 中心与控件中心重合. 按下与每一次移动都要重新判断.

use super::{CoordinateMapper, ScreenPos};
use crate::consts::DRAWING_AREA_FRACTION;

/// 控件坐标系中的轴对齐矩形, 边界闭合.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GateRect {
    /// 左上角水平位置.
    pub x: f64,
    /// 左上角垂直位置.
    pub y: f64,
    /// 边长.
    pub side: f64,
}

impl GateRect {
    /// 判断 `pos` 是否在矩形内 (含边界).
    #[inline]
    pub fn contains(&self, pos: ScreenPos) -> bool {
        (self.x..=self.x + self.side).contains(&pos.x)
            && (self.y..=self.y + self.side).contains(&pos.y)
    }
}

/// 可绘制区域判定.
///
/// 该结构只保存比例系数; 具体的正方形依赖当前映射 (即当前控件大小) 实时计算.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawingGate {
    fraction: f64,
}

impl DrawingGate {
    /// 以比例 `fraction` 初始化. `fraction` 必须在 `(0, 1]` 内, 否则返回 `None`.
    pub fn new(fraction: f64) -> Option<Self> {
        if fraction > 0.0 && fraction <= 1.0 {
            Some(Self { fraction })
        } else {
            None
        }
    }

    /// 边长比例.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// 在当前映射下的正方形区域.
    ///
    /// 注意边长以图像 **宽** 为基准, 位置以 **控件** 中心为基准.
    pub fn region(&self, mapper: &CoordinateMapper) -> GateRect {
        let side = mapper.displayed_width() * self.fraction;
        let widget = mapper.widget();
        GateRect {
            x: (widget.width - side) / 2.0,
            y: (widget.height - side) / 2.0,
            side,
        }
    }

    /// 判断 `pos` 在当前映射下是否可以绘制.
    #[inline]
    pub fn contains(&self, mapper: &CoordinateMapper, pos: ScreenPos) -> bool {
        self.region(mapper).contains(pos)
    }
}

impl Default for DrawingGate {
    #[inline]
    fn default() -> Self {
        Self {
            fraction: DRAWING_AREA_FRACTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size2d;

    fn mapper(ww: f64, wh: f64, iw: f64, ih: f64) -> CoordinateMapper {
        CoordinateMapper::new(Size2d::new(ww, wh), Size2d::new(iw, ih)).unwrap()
    }

    #[test]
    fn test_gate_invalid_fraction() {
        assert!(DrawingGate::new(0.0).is_none());
        assert!(DrawingGate::new(1.5).is_none());
        assert!(DrawingGate::new(f64::NAN).is_none());
        assert!(DrawingGate::new(1.0).is_some());
    }

    #[test]
    fn test_gate_region() {
        // s = 1, 边长 = 1000 * 0.25 = 250.
        let m = mapper(1000.0, 1000.0, 1000.0, 1000.0);
        let gate = DrawingGate::new(0.25).unwrap();
        let r = gate.region(&m);
        assert_eq!(r, GateRect { x: 375.0, y: 375.0, side: 250.0 });

        assert!(gate.contains(&m, ScreenPos::new(500.0, 500.0)));
        // 边界闭合.
        assert!(gate.contains(&m, ScreenPos::new(375.0, 375.0)));
        assert!(gate.contains(&m, ScreenPos::new(625.0, 625.0)));
        assert!(!gate.contains(&m, ScreenPos::new(374.9, 500.0)));
        assert!(!gate.contains(&m, ScreenPos::new(500.0, 625.1)));
    }

    #[test]
    fn test_gate_follows_widget_center() {
        // 宽控件: 图像左右留白, 正方形仍在控件中央.
        let m = mapper(800.0, 400.0, 1000.0, 1000.0);
        let gate = DrawingGate::new(0.5).unwrap();
        let r = gate.region(&m);
        assert!((r.side - 200.0).abs() < 1e-9);
        assert!((r.x - 300.0).abs() < 1e-9);
        assert!((r.y - 100.0).abs() < 1e-9);
        assert!(gate.contains(&m, ScreenPos::new(400.0, 200.0)));
        assert!(!gate.contains(&m, ScreenPos::new(250.0, 200.0)));
    }

    #[test]
    fn test_default_gate_fraction() {
        let gate = DrawingGate::default();
        assert_eq!(gate.fraction(), DRAWING_AREA_FRACTION);
        let m = mapper(512.0, 512.0, 1000.0, 1000.0);
        let r = gate.region(&m);
        assert!((r.side - 512.0 * DRAWING_AREA_FRACTION).abs() < 1e-9);
        assert!(gate.contains(&m, ScreenPos::new(256.0, 256.0)));
        assert!(!gate.contains(&m, ScreenPos::new(10.0, 10.0)));
    }
}
