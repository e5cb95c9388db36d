/// 截断窗口: 下限 `lo` 为第 0 百分位数, 上限 `hi` 为第 `quantile * 100` 百分位数.
///
/// 截断后的数组最小值恰为 `lo`, 最大值恰为 `hi`, 因此 "截断 + min-max 规范化"
/// 等价于 `(clamp(x, lo, hi) - lo) / (hi - lo)`.
///
/// 该窗口是只读的. 若要修改窗口参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipWindow {
    lo: f64,
    hi: f64,
}

impl ClipWindow {
    /// 构建窗口. `lo`, `hi` 必须是有限值且 `lo <= hi`, 否则返回 `None`.
    pub fn new(lo: f64, hi: f64) -> Option<ClipWindow> {
        if lo.is_finite() && hi.is_finite() && lo <= hi {
            Some(Self { lo, hi })
        } else {
            None
        }
    }

    /// 窗下限.
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.lo
    }

    /// 窗上限.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.hi
    }

    /// 窗宽.
    #[inline]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// 窗宽是否为 0? 此时规范化没有意义, 统一输出中灰.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0
    }

    /// 求在当前窗口下, `x` 对应的 `[0, 1]` 取值.
    ///
    /// 如果 `x` 无意义 (如 inf, NaN), 则返回 `None`.
    pub fn eval_unit(&self, x: f64) -> Option<f64> {
        use crate::consts::unit::*;

        if !x.is_finite() {
            return None;
        }
        if self.is_degenerate() {
            return Some(MID_GRAY);
        }
        if x <= self.lo {
            Some(DARK)
        } else if x >= self.hi {
            Some(BRIGHT)
        } else {
            Some((x - self.lo) / self.width())
        }
    }

    /// 求在当前窗口下, `x` 对应的灰度图像素整数值 (0 <= value <= 255).
    ///
    /// 如果 `x` 无意义 (如 inf, NaN), 则返回 `None`.
    #[inline]
    pub fn eval(&self, x: f64) -> Option<u8> {
        self.eval_unit(x).map(quantize)
    }
}

/// `[0, 1]` -> `[0, 255]`, 向零截断. 非有限值映射为 0.
#[inline]
pub fn quantize(unit: f64) -> u8 {
    if unit.is_finite() {
        // 255, not 256.
        (unit * 255.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_init(lo: f64, hi: f64) -> bool {
        ClipWindow::new(lo, hi).is_some()
    }

    fn float_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_clip_window_invalid_input() {
        assert!(!is_valid_init(1.0, 0.0));
        assert!(!is_valid_init(f64::NAN, 0.0));
        assert!(!is_valid_init(0.0, f64::INFINITY));
        assert!(is_valid_init(3.0, 3.0));
    }

    #[test]
    fn test_clip_window_generic() {
        // [60, 100]
        let w = ClipWindow::new(60.0, 100.0).unwrap();
        assert_eq!(w.eval(f64::NAN), None);
        assert_eq!(w.eval(f64::MIN), Some(0));
        assert_eq!(w.eval(f64::MAX), Some(255));

        assert_eq!(w.eval(50.0), Some(0));
        assert_eq!(w.eval(60.0), Some(0));
        assert!(float_eq(w.eval_unit(70.0).unwrap(), 0.25));
        assert_eq!(w.eval(70.0).unwrap(), (255.0 * 0.25) as u8);
        assert_eq!(w.eval(80.0).unwrap(), (255.0 * 0.5) as u8);

        // boundary
        assert_eq!(w.eval(99.999), Some(254));
        assert_eq!(w.eval(100.0), Some(255));
    }

    #[test]
    fn test_degenerate_window() {
        let w = ClipWindow::new(4.0, 4.0).unwrap();
        assert!(w.is_degenerate());
        assert_eq!(w.eval_unit(4.0), Some(0.5));
        assert_eq!(w.eval_unit(-100.0), Some(0.5));
        assert_eq!(w.eval(4.0), Some(127));
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.999), 254);
        assert_eq!(quantize(f64::NAN), 0);
    }
}
