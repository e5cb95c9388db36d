//! 图层与图层视图.
//!
//! 一个标注会话同时打开同一片海域的三个图层: 声呐强度, 水深, 以及三角化衍生量.
//! 每个图层有自己的显示状态 (不透明度, 百分位截断, 对数变换), 但共享同一份标注.

use crate::consts::DEFAULT_OPACITY;
use crate::geometry::{CoordinateMapper, Size2d};
use crate::normalize::{ImageNormalizer, NormalizeResult};
use crate::stroke::{polylines, AnnotationSet, Polyline, StrokeView};
use ndarray::{Array2, ArrayView2};
use std::path::Path;

pub mod io;
pub mod save;

pub use io::{open_layer, LayerFormat, OpenLayerError};
pub use save::{ClassMatrix, DisplayImage, ImgWriteRaw, ImgWriteVis};

/// 图层种类.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    /// 声呐回波强度.
    Sonar,
    /// 水深.
    Bathymetry,
    /// 三角化衍生量.
    Triangulated,
}

impl LayerKind {
    /// 全部图层, 按显示顺序排列.
    pub const ALL: [LayerKind; 3] = [Self::Sonar, Self::Bathymetry, Self::Triangulated];

    /// 文件名中用于识别该图层的子串.
    #[inline]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Sonar => "sonar",
            Self::Bathymetry => "bathy",
            Self::Triangulated => "tri",
        }
    }

    /// 通过文件名识别图层. 依次检查 `sonar`, `bathy`, `tri`, 以先匹配者为准.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| name.contains(k.tag()))
    }
}

/// 一个视图的显示状态.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayState {
    /// 笔画的不透明度, `0` 为全透明.
    pub opacity: u8,
    /// 截断百分位, `[0, 1]`.
    pub quantile: f64,
    /// 是否先做对数变换.
    pub log_enabled: bool,
}

impl Default for DisplayState {
    /// 完全不透明, 不截断, 不做对数变换.
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            quantile: 1.0,
            log_enabled: false,
        }
    }
}

impl DisplayState {
    /// 以百分数 `0..=100` 设置截断百分位. 超出范围时返回 `false` 且不修改状态.
    pub fn set_quantile_percent(&mut self, percent: u8) -> bool {
        if percent > 100 {
            return false;
        }
        self.quantile = f64::from(percent) / 100.0;
        true
    }
}

/// 一个图层的视图: 原始数据, 显示状态, 以及最近收到的标注快照.
#[derive(Clone, Debug)]
pub struct LayerView {
    kind: LayerKind,
    raw: Array2<f64>,
    state: DisplayState,
    normalizer: ImageNormalizer,
    annotations: AnnotationSet,
}

impl LayerView {
    /// 以原始数据初始化.
    pub fn new(kind: LayerKind, raw: Array2<f64>) -> Self {
        Self {
            kind,
            raw,
            state: DisplayState::default(),
            normalizer: ImageNormalizer::default(),
            annotations: AnnotationSet::new(),
        }
    }

    /// 从 `.npy` 或 `.tif` 文件读取.
    pub fn open<P: AsRef<Path>>(kind: LayerKind, path: P) -> Result<Self, OpenLayerError> {
        Ok(Self::new(kind, open_layer(path)?))
    }

    /// 替换归一化参数.
    #[inline]
    pub fn with_normalizer(mut self, normalizer: ImageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// 图层种类.
    #[inline]
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// 原始数据.
    #[inline]
    pub fn raw(&self) -> ArrayView2<f64> {
        self.raw.view()
    }

    /// 原始数据的 `(高, 宽)`.
    #[inline]
    pub fn shape(&self) -> crate::Idx2d {
        self.raw.dim()
    }

    /// 源图像尺寸, 供构建 [`CoordinateMapper`].
    #[inline]
    pub fn image_size(&self) -> Size2d {
        Size2d::from_shape(self.shape())
    }

    /// 显示状态.
    #[inline]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// 可修改的显示状态.
    #[inline]
    pub fn state_mut(&mut self) -> &mut DisplayState {
        &mut self.state
    }

    /// 最近收到的标注快照.
    #[inline]
    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// 以当前显示状态归一化得到 8-bit 显示数组.
    pub fn display(&self) -> NormalizeResult<Array2<u8>> {
        self.normalizer
            .normalize(self.raw.view(), self.state.quantile, self.state.log_enabled)
    }

    /// 绘制回调: 以当前不透明度生成快照中所有笔画的折线.
    #[inline]
    pub fn paint(&self, mapper: &CoordinateMapper) -> Vec<Polyline> {
        polylines(&self.annotations, mapper, self.state.opacity)
    }
}

impl StrokeView for LayerView {
    #[inline]
    fn set_annotations(&mut self, snapshot: AnnotationSet) {
        self.annotations = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::SeabedClass;
    use crate::geometry::{DrawingGate, ScreenPos};
    use crate::stroke::{pen_for_class, PointerCapture, PointerEvent, StrokeStore};
    use std::num::NonZeroU32;

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(LayerKind::from_file_name("zone3_sonar.npy"), Some(LayerKind::Sonar));
        assert_eq!(LayerKind::from_file_name("zone3_bathy.tif"), Some(LayerKind::Bathymetry));
        assert_eq!(LayerKind::from_file_name("zone3_tri.npy"), Some(LayerKind::Triangulated));
        assert_eq!(LayerKind::from_file_name("zone3_rgb.npy"), None);
    }

    #[test]
    fn test_quantile_percent() {
        let mut s = DisplayState::default();
        assert_eq!(s.quantile, 1.0);
        assert!(s.set_quantile_percent(75));
        assert_eq!(s.quantile, 0.75);
        assert!(!s.set_quantile_percent(101));
        assert_eq!(s.quantile, 0.75);
    }

    #[test]
    fn test_display_follows_state() {
        let raw = ndarray::array![[0.0, 1.0, 2.0, 3.0, 100.0]];
        let mut view = LayerView::new(LayerKind::Sonar, raw);
        assert_eq!(view.display().unwrap(), ndarray::array![[0, 2, 5, 7, 255]]);
        view.state_mut().set_quantile_percent(75);
        assert_eq!(view.display().unwrap(), ndarray::array![[0, 85, 170, 255, 255]]);
    }

    #[test]
    fn test_views_share_annotations() {
        let raw = Array2::<f64>::zeros((100, 100));
        let mut sonar = LayerView::new(LayerKind::Sonar, raw.clone());
        let mut bathy = LayerView::new(LayerKind::Bathymetry, raw);
        bathy.state_mut().opacity = 64;

        let mapper = CoordinateMapper::new(Size2d::new(100.0, 100.0), sonar.image_size()).unwrap();
        let mut capture = PointerCapture::new(StrokeStore::new(), DrawingGate::new(1.0).unwrap());
        capture.set_pencil(pen_for_class(SeabedClass::Matte, NonZeroU32::new(4).unwrap()));
        {
            let mut views: [&mut dyn StrokeView; 2] = [&mut sonar, &mut bathy];
            let down = PointerEvent::new(ScreenPos::new(10.0, 10.0), true);
            let moved = PointerEvent::new(ScreenPos::new(20.0, 30.0), true);
            assert!(capture.pointer_down(&mapper, down, &mut views));
            assert!(capture.pointer_move(&mapper, moved, &mut views));
            assert!(capture.pointer_up());
        }
        assert_eq!(sonar.annotations(), bathy.annotations());
        assert_eq!(sonar.annotations().point_count(), 2);

        let a = sonar.paint(&mapper);
        let b = bathy.paint(&mapper);
        assert_eq!(a[0].rgba, [0xd5, 0x5e, 0x09, 255]);
        assert_eq!(b[0].rgba, [0xd5, 0x5e, 0x09, 64]);
        assert_eq!(a[0].points, b[0].points);
        assert!((a[0].points[1].x - 20.0).abs() < 1e-9);
        assert!((a[0].points[1].y - 30.0).abs() < 1e-9);
    }
}
