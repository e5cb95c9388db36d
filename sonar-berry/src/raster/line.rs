//! 整数直线栅格化 (Bresenham).
//!
//! 与 scikit-image `draw.line` 产生完全相同的像素集合与顺序: 沿主轴逐步前进,
//! 误差项非负时副轴前进, 最后一个像素恰为终点.
//!
//! 第 `k` 步的副轴位移有闭式解 `floor((2k·d_minor + d_major) / (2·d_major))`,
//! 因此可以直接跳到任意一步, 裁剪时不必从图像外一步步走进来.

use crate::Idx2d;

/// 有符号的 `(行, 列)` 像素索引. 可以越界, 由调用方过滤.
pub type PixelI64 = (i64, i64);

/// 直线上像素的惰性迭代器, 见 [`line`].
#[derive(Clone, Debug)]
pub struct Line {
    minor0: i64,
    major0: i64,
    d_minor: u64,
    d_major: u64,
    s_minor: i64,
    s_major: i64,
    steep: bool,
    next: u128,
    end: u128,
}

/// 从 `(r0, c0)` 到 `(r1, c1)` 的直线经过的所有像素, 含两端.
///
/// 端点可以取 `i64` 的任意值, 计算不会溢出.
pub fn line((r0, c0): PixelI64, (r1, c1): PixelI64) -> Line {
    let (dr, dc) = (r0.abs_diff(r1), c0.abs_diff(c1));
    let sr = if r1 > r0 { 1 } else { -1 };
    let sc = if c1 > c0 { 1 } else { -1 };
    let steep = dr > dc;
    let (minor0, major0, d_minor, d_major, s_minor, s_major) = if steep {
        (c0, r0, dc, dr, sc, sr)
    } else {
        (r0, c0, dr, dc, sr, sc)
    };
    Line {
        minor0,
        major0,
        d_minor,
        d_major,
        s_minor,
        s_major,
        steep,
        next: 0,
        end: u128::from(d_major) + 1,
    }
}

impl Line {
    /// 只保留主轴坐标落在 `(h, w)` 图像内的那些步. 副轴仍可能越界, 由调用方过滤.
    ///
    /// 剩余步数不超过 `max(h, w)`.
    pub fn clip(mut self, (h, w): Idx2d) -> Self {
        let len = (if self.steep { h } else { w }) as i128;
        let x0 = i128::from(self.major0);
        // 主轴坐标 x0 + s·k ∈ [0, len).
        let (lo, hi) = if self.s_major > 0 {
            (-x0, len - 1 - x0)
        } else {
            (x0 - len + 1, x0)
        };
        let lo = lo.max(self.next as i128);
        let hi = hi.min(self.end as i128 - 1);
        if lo > hi {
            self.next = self.end;
        } else {
            self.next = lo as u128;
            self.end = hi as u128 + 1;
        }
        self
    }

    /// 第 `k` 步的像素.
    fn at(&self, k: u128) -> PixelI64 {
        let m = match u128::from(self.d_major) {
            0 => 0,
            d => {
                let p = k * u128::from(self.d_minor);
                p / d + u128::from(2 * (p % d) >= d)
            }
        };
        let minor = i128::from(self.minor0) + i128::from(self.s_minor) * m as i128;
        let major = i128::from(self.major0) + i128::from(self.s_major) * k as i128;
        // 两者都介于两端点之间.
        let (r, c) = if self.steep { (major, minor) } else { (minor, major) };
        (r as i64, c as i64)
    }
}

impl Iterator for Line {
    type Item = PixelI64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let px = self.at(self.next);
        self.next += 1;
        Some(px)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next);
        match usize::try_from(n) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(a: PixelI64, b: PixelI64) -> Vec<PixelI64> {
        line(a, b).collect()
    }

    #[test]
    fn test_single_point() {
        assert_eq!(pixels((3, 4), (3, 4)), vec![(3, 4)]);
    }

    #[test]
    fn test_horizontal_and_vertical() {
        assert_eq!(pixels((5, 0), (5, 3)), vec![(5, 0), (5, 1), (5, 2), (5, 3)]);
        assert_eq!(pixels((5, 3), (5, 0)), vec![(5, 3), (5, 2), (5, 1), (5, 0)]);
        assert_eq!(pixels((0, 2), (3, 2)), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(pixels((0, 0), (3, 3)), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(pixels((3, 0), (0, 3)), vec![(3, 0), (2, 1), (1, 2), (0, 3)]);
    }

    #[test]
    fn test_shallow_slope() {
        // skimage.draw.line(0, 0, 1, 4)
        assert_eq!(
            pixels((0, 0), (1, 4)),
            vec![(0, 0), (0, 1), (1, 2), (1, 3), (1, 4)]
        );
    }

    #[test]
    fn test_steep_slope() {
        // skimage.draw.line(0, 0, 4, 1)
        assert_eq!(
            pixels((0, 0), (4, 1)),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 1)]
        );
    }

    #[test]
    fn test_negative_coordinates() {
        let px = pixels((-2, -2), (1, 1));
        assert_eq!(px, vec![(-2, -2), (-1, -1), (0, 0), (1, 1)]);
    }

    #[test]
    fn test_connected_and_length() {
        for &(a, b) in &[((0, 0), (7, 19)), ((10, 3), (-4, 8)), ((2, 30), (9, 1))] {
            let px = pixels(a, b);
            let expected = (a.0 - b.0).abs().max((a.1 - b.1).abs()) as usize + 1;
            assert_eq!(line(a, b).size_hint(), (expected, Some(expected)));
            assert_eq!(px.len(), expected);
            assert_eq!(px[0], a);
            assert_eq!(*px.last().unwrap(), b);
            for w in px.windows(2) {
                assert!((w[0].0 - w[1].0).abs() <= 1 && (w[0].1 - w[1].1).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_clip_keeps_in_bounds_pixels() {
        let shape = (10, 12);
        let inside = |&(r, c): &PixelI64| (0..10).contains(&r) && (0..12).contains(&c);
        for &(a, b) in &[
            ((-7, -20), (15, 30)),
            ((15, 30), (-7, -20)),
            ((-30, 4), (25, 9)),
            ((3, 40), (8, -5)),
            ((4, 4), (4, 4)),
            ((20, 20), (30, 25)),
        ] {
            let clipped: Vec<_> = line(a, b).clip(shape).filter(inside).collect();
            let filtered: Vec<_> = line(a, b).filter(inside).collect();
            assert_eq!(clipped, filtered, "{a:?} -> {b:?}");
            assert!(line(a, b).clip(shape).count() <= 12);
        }
    }

    #[test]
    fn test_extreme_endpoints() {
        let (a, b) = ((500, i64::MIN), (500, i64::MAX));
        assert_eq!(line(a, b).next(), Some(a));
        let row: Vec<_> = line(a, b).clip((1000, 1000)).collect();
        assert_eq!(row.len(), 1000);
        assert_eq!(row[0], (500, 0));
        assert_eq!(row[999], (500, 999));

        let diag: Vec<_> = line((i64::MIN, i64::MIN), (i64::MAX, i64::MAX))
            .clip((4, 4))
            .collect();
        assert_eq!(diag, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }
}
