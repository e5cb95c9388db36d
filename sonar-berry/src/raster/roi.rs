use crate::consts::{ROI_COLS, ROI_ROWS};
use crate::Idx2d;
use ndarray::{s, ArrayView2};
use once_cell::sync::Lazy;

/// 本部署的固定感兴趣区域.
static FIXED_ROI: Lazy<RegionOfInterest> = Lazy::new(|| {
    RegionOfInterest::new(ROI_ROWS, ROI_COLS).unwrap_or_else(|| unreachable!("ROI 常量非空"))
});

/// 感兴趣区域: 一组行索引和一组列索引.
///
/// 实际裁剪使用的是两组索引张成的包围盒 `[min(rows), max(rows)] x [min(cols), max(cols)]`
/// (闭区间), 索引集合本身可以不连续.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionOfInterest {
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl RegionOfInterest {
    /// 以行、列索引集合初始化. 任一集合为空时返回 `None`.
    pub fn new<R, C>(rows: R, cols: C) -> Option<Self>
    where
        R: IntoIterator<Item = usize>,
        C: IntoIterator<Item = usize>,
    {
        let rows: Vec<usize> = rows.into_iter().collect();
        let cols: Vec<usize> = cols.into_iter().collect();
        if rows.is_empty() || cols.is_empty() {
            return None;
        }
        Some(Self { rows, cols })
    }

    /// 本部署的固定区域 (行 379..=479, 列 214..=314).
    #[inline]
    pub fn fixed() -> Self {
        FIXED_ROI.clone()
    }

    /// 行索引集合.
    #[inline]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// 列索引集合.
    #[inline]
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// 包围盒左上角 `(min(rows), min(cols))`.
    #[inline]
    pub fn top_left(&self) -> Idx2d {
        (min_of(&self.rows), min_of(&self.cols))
    }

    /// 包围盒右下角 `(max(rows), max(cols))`, 含.
    #[inline]
    pub fn bottom_right(&self) -> Idx2d {
        (max_of(&self.rows), max_of(&self.cols))
    }

    /// 包围盒的 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        let (r0, c0) = self.top_left();
        let (r1, c1) = self.bottom_right();
        (r1 - r0 + 1, c1 - c0 + 1)
    }

    /// 判断包围盒能否完整地落在 `(h, w)` 的图像内.
    #[inline]
    pub fn fits((h, w): Idx2d) -> impl Fn(&Self) -> bool {
        move |roi| {
            let (r1, c1) = roi.bottom_right();
            r1 < h && c1 < w
        }
    }

    /// 从 `full` 中裁剪出包围盒. 超出图像的部分被截掉 (与 numpy 切片一致).
    pub fn crop<'a, T>(&self, full: ArrayView2<'a, T>) -> ArrayView2<'a, T> {
        let (h, w) = full.dim();
        let (r0, c0) = self.top_left();
        let (r1, c1) = self.bottom_right();
        let (r0, r1) = (r0.min(h), (r1 + 1).min(h));
        let (c0, c1) = (c0.min(w), (c1 + 1).min(w));
        full.slice_move(s![r0..r1, c0..c1])
    }
}

impl Default for RegionOfInterest {
    #[inline]
    fn default() -> Self {
        Self::fixed()
    }
}

#[inline]
fn min_of(v: &[usize]) -> usize {
    v.iter().copied().min().unwrap_or_default()
}

#[inline]
fn max_of(v: &[usize]) -> usize {
    v.iter().copied().max().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_fixed_roi() {
        let roi = RegionOfInterest::fixed();
        assert_eq!(roi.rows().len(), 83);
        assert_eq!(roi.cols().len(), 83);
        assert_eq!(roi.top_left(), (379, 214));
        assert_eq!(roi.bottom_right(), (479, 314));
        assert_eq!(roi.shape(), (101, 101));
    }

    #[test]
    fn test_empty_sets_rejected() {
        assert!(RegionOfInterest::new([], [1usize]).is_none());
        assert!(RegionOfInterest::new([1usize], []).is_none());
    }

    #[test]
    fn test_crop_uses_bounding_box() {
        let full = Array2::from_shape_fn((10, 10), |(r, c)| (r * 10 + c) as u8);
        // 不连续、无序的索引集合.
        let roi = RegionOfInterest::new([6, 2, 4], [7, 3]).unwrap();
        let crop = roi.crop(full.view());
        assert_eq!(crop.dim(), (5, 5));
        assert_eq!(crop[(0, 0)], 23);
        assert_eq!(crop[(4, 4)], 67);
    }

    #[test]
    fn test_crop_truncated_at_image_edge() {
        let full = Array2::<u8>::zeros((5, 5));
        let roi = RegionOfInterest::new([3, 8], [0, 2]).unwrap();
        assert!(!RegionOfInterest::fits((5, 5))(&roi));
        assert_eq!(roi.crop(full.view()).dim(), (2, 3));
        let outside = RegionOfInterest::new([7, 9], [7, 9]).unwrap();
        assert_eq!(outside.crop(full.view()).dim(), (0, 0));
    }
}
