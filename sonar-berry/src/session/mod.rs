//! 标注会话.
//!
//! 一个会话对应一组图层文件和一个输出目录. 打开时若输出目录中已有同前缀的笔画记录,
//! 则在其基础上继续; 保存时先栅格化并序列化笔画, 两者都成功后才写出 `<prefix>_output.npy`
//! 与 `<prefix>_annot.json`. 使用了不属于任何类别的颜色, 或坐标无法用 JSON 表示时,
//! 不写任何文件.

use crate::class::ClassColorMap;
use crate::config::AnnotConfig;
use crate::consts::{ANNOT_SUFFIX, OUTPUT_SUFFIX};
use crate::geometry::{CoordinateMapper, DrawingGate};
use crate::layer::{LayerKind, LayerView};
use crate::persist;
use crate::raster::{rasterize, RegionOfInterest};
use crate::stroke::{AnnotationSet, Pencil, PointerCapture, PointerEvent, StrokeStore, StrokeView};
use log::{info, warn};
use ndarray::Array2;
use std::path::{Path, PathBuf};

mod error;
mod files;

pub use error::{SessionError, SessionResult};
pub use files::{file_prefix, LayerFiles};

/// 一次标注会话.
#[derive(Debug)]
pub struct Session {
    prefix: String,
    output_dir: PathBuf,
    views: Vec<LayerView>,
    capture: PointerCapture,
    roi: RegionOfInterest,
    colors: ClassColorMap,
}

impl Session {
    /// 读取 `files` 中的三个图层, 并载入 `output_dir` 中已有的笔画记录.
    pub fn open<P: Into<PathBuf>>(
        files: &LayerFiles,
        output_dir: P,
        config: &AnnotConfig,
    ) -> SessionResult<Self> {
        let views = files
            .iter()
            .map(|(kind, path)| {
                info!("opening {} layer {}", kind.tag(), path.display());
                LayerView::open(kind, path)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_views(files.prefix(), output_dir, views, config)
    }

    /// 以已经读入内存的图层创建会话. `views` 中第一个图层的尺寸即全分辨率尺寸.
    pub fn from_views<S: Into<String>, P: Into<PathBuf>>(
        prefix: S,
        output_dir: P,
        views: Vec<LayerView>,
        config: &AnnotConfig,
    ) -> SessionResult<Self> {
        let gate = config
            .gate()
            .ok_or(SessionError::InvalidConfig("drawing area fraction must be in (0, 1]"))?;
        let roi = config
            .roi()
            .ok_or(SessionError::InvalidConfig("ROI rows and columns must not be empty"))?;
        let Some(first) = views.first() else {
            return Err(SessionError::MissingLayer(LayerKind::Sonar));
        };
        if views.iter().any(|v| v.shape() != first.shape()) {
            warn!("layers differ in shape, rasterizing on {:?}", first.shape());
        }
        if !RegionOfInterest::fits(first.shape())(&roi) {
            warn!(
                "ROI {:?}..={:?} exceeds the {:?} image, the output will be cut short",
                roi.top_left(),
                roi.bottom_right(),
                first.shape()
            );
        }

        let mut session = Self {
            prefix: prefix.into(),
            output_dir: output_dir.into(),
            views: views
                .into_iter()
                .map(|v| v.with_normalizer(config.normalizer()))
                .collect(),
            capture: PointerCapture::default(),
            roi,
            colors: ClassColorMap::fixed(),
        };
        let set = persist::read_strokes_or_empty(session.annot_path())?;
        session.capture = PointerCapture::new(StrokeStore::from_set(set), gate);
        session.broadcast();
        Ok(session)
    }

    /// 替换类别映射.
    #[inline]
    pub fn with_colors(mut self, colors: ClassColorMap) -> Self {
        self.colors = colors;
        self
    }

    /// 文件前缀.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 输出目录.
    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 笔画记录的路径, `<output_dir>/<prefix>_annot.json`.
    pub fn annot_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}{ANNOT_SUFFIX}", self.prefix))
    }

    /// 类别矩阵的路径, `<output_dir>/<prefix>_output.npy`.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}{OUTPUT_SUFFIX}", self.prefix))
    }

    /// 全部视图.
    #[inline]
    pub fn views(&self) -> &[LayerView] {
        &self.views
    }

    /// 某种图层的视图.
    pub fn view(&self, kind: LayerKind) -> Option<&LayerView> {
        self.views.iter().find(|v| v.kind() == kind)
    }

    /// 某种图层的视图, 可修改显示状态.
    pub fn view_mut(&mut self, kind: LayerKind) -> Option<&mut LayerView> {
        self.views.iter_mut().find(|v| v.kind() == kind)
    }

    /// 全分辨率 `(高, 宽)`.
    pub fn full_size(&self) -> crate::Idx2d {
        self.views.first().map(LayerView::shape).unwrap_or_default()
    }

    /// 当前全部笔画.
    #[inline]
    pub fn annotations(&self) -> &AnnotationSet {
        self.capture.store().annotations()
    }

    /// 可绘制区域.
    #[inline]
    pub fn gate(&self) -> DrawingGate {
        self.capture.gate()
    }

    /// 更换画笔.
    #[inline]
    pub fn set_pencil(&mut self, pencil: Pencil) {
        self.capture.set_pencil(pencil);
    }

    /// 向所有视图推送当前快照.
    fn broadcast(&mut self) {
        let mut views: Vec<&mut dyn StrokeView> =
            self.views.iter_mut().map(|v| v as &mut dyn StrokeView).collect();
        self.capture.broadcast(&mut views);
    }

    /// 按下. 见 [`PointerCapture::pointer_down`].
    pub fn pointer_down(&mut self, mapper: &CoordinateMapper, ev: PointerEvent) -> bool {
        let mut views: Vec<&mut dyn StrokeView> =
            self.views.iter_mut().map(|v| v as &mut dyn StrokeView).collect();
        self.capture.pointer_down(mapper, ev, &mut views)
    }

    /// 移动. 见 [`PointerCapture::pointer_move`].
    pub fn pointer_move(&mut self, mapper: &CoordinateMapper, ev: PointerEvent) -> bool {
        let mut views: Vec<&mut dyn StrokeView> =
            self.views.iter_mut().map(|v| v as &mut dyn StrokeView).collect();
        self.capture.pointer_move(mapper, ev, &mut views)
    }

    /// 抬起.
    #[inline]
    pub fn pointer_up(&mut self) -> bool {
        self.capture.pointer_up()
    }

    /// 把当前笔画栅格化并裁剪到感兴趣区域, 不写文件.
    pub fn rasterize(&self) -> SessionResult<Array2<u8>> {
        Ok(rasterize(
            self.annotations(),
            self.full_size(),
            &self.roi,
            &self.colors,
        )?)
    }

    /// 保存: 先栅格化并序列化笔画, 再写出类别矩阵与笔画记录. 返回类别矩阵的路径.
    ///
    /// 栅格化失败时返回 [`SessionError::Raster`], 笔画无法序列化时返回
    /// [`SessionError::Persist`]. 两种情况都不写任何文件.
    pub fn save(&self) -> SessionResult<PathBuf> {
        let matrix = self.rasterize()?;
        let json = persist::save_strokes(self.annotations())?;
        std::fs::create_dir_all(&self.output_dir)?;
        let output = self.output_path();
        persist::save_matrix(&output, matrix.view())?;
        std::fs::write(self.annot_path(), json)?;
        info!(
            "saved {} strokes to {}",
            self.annotations().len(),
            output.display()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{HexColor, SeabedClass};
    use crate::persist::PersistError;
    use crate::geometry::{NormPoint, ScreenPos, Size2d};
    use crate::stroke::{pen_for_class, Stroke};
    use std::num::NonZeroU32;

    fn zero_views((h, w): (usize, usize)) -> Vec<LayerView> {
        LayerKind::ALL
            .into_iter()
            .map(|k| LayerView::new(k, Array2::zeros((h, w))))
            .collect()
    }

    fn whole_widget_config() -> AnnotConfig {
        AnnotConfig {
            drawing_area_fraction: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_draw_save_and_reload() {
        simple_logger::SimpleLogger::new().init().ok();
        let dir = tempfile::tempdir().unwrap();
        let cfg = whole_widget_config();
        let mut s = Session::from_views("zone3", dir.path(), zero_views((1024, 1024)), &cfg).unwrap();
        assert!(s.annotations().is_empty());

        let mapper = CoordinateMapper::new(Size2d::new(512.0, 512.0), Size2d::new(1024.0, 1024.0))
            .unwrap();
        s.set_pencil(pen_for_class(SeabedClass::Sediment, NonZeroU32::new(2).unwrap()));
        // 缩放 0.5: 全分辨率第 430 行, 250..=290 列.
        assert!(s.pointer_down(&mapper, PointerEvent::new(ScreenPos::new(125.0, 215.0), true)));
        assert!(s.pointer_move(&mapper, PointerEvent::new(ScreenPos::new(145.0, 215.0), true)));
        assert!(s.pointer_up());
        for v in s.views() {
            assert_eq!(v.annotations(), s.annotations());
        }

        let out = s.save().unwrap();
        assert_eq!(out, dir.path().join("zone3_output.npy"));
        let m = persist::load_matrix(&out).unwrap();
        assert_eq!(m.dim(), (101, 101));
        // ROI 左上角 (379, 214).
        assert_eq!(m[(430 - 379, 250 - 214)], 6);
        assert_eq!(m[(430 - 379, 290 - 214)], 6);
        assert_eq!(m.iter().filter(|v| **v == 6).count(), 41);

        let again = Session::from_views("zone3", dir.path(), zero_views((1024, 1024)), &cfg).unwrap();
        assert_eq!(again.annotations(), s.annotations());
        for v in again.views() {
            assert_eq!(v.annotations().len(), 1);
        }
    }

    #[test]
    fn test_unmapped_color_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let cfg = whole_widget_config();
        let mut s = Session::from_views("p", &out_dir, zero_views((100, 100)), &cfg).unwrap();
        let mapper = CoordinateMapper::full_resolution(Size2d::new(100.0, 100.0)).unwrap();

        // 默认画笔是黑色, 不属于任何类别.
        assert!(s.pointer_down(&mapper, PointerEvent::new(ScreenPos::new(10.0, 10.0), true)));
        assert!(s.pointer_move(&mapper, PointerEvent::new(ScreenPos::new(20.0, 10.0), true)));
        s.pointer_up();

        match s.save() {
            Err(SessionError::Raster(e)) => assert!(e.to_string().contains("#000000")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!s.output_path().exists());
        assert!(!s.annot_path().exists());
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_non_finite_point_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let cfg = whole_widget_config();
        let mut s = Session::from_views("p", &out_dir, zero_views((100, 100)), &cfg).unwrap();

        let mut store = StrokeStore::new();
        store.begin_stroke(
            SeabedClass::Sediment.color(),
            NonZeroU32::new(1).unwrap(),
            NormPoint::new(0.1, 0.1),
        );
        store.extend_current_stroke(NormPoint::new(f64::INFINITY, 0.2));
        s.capture = PointerCapture::new(store, s.gate());

        // 无穷远的线段被跳过, 栅格化本身成功.
        assert!(s.rasterize().is_ok());
        assert!(matches!(
            s.save(),
            Err(SessionError::Persist(PersistError::NonFinitePoint(0, 1)))
        ));
        assert!(!s.output_path().exists());
        assert!(!s.annot_path().exists());
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_malformed_record_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("p_annot.json"), "{oops").unwrap();
        let err = Session::from_views("p", dir.path(), zero_views((10, 10)), &AnnotConfig::default());
        assert!(matches!(err, Err(SessionError::Persist(_))));
    }

    #[test]
    fn test_open_from_files() {
        let dir = tempfile::tempdir().unwrap();
        for tag in ["sonar", "bathy", "tri"] {
            let data = Array2::<f32>::from_elem((20, 30), 1.0);
            ndarray_npy::write_npy(dir.path().join(format!("z_{tag}.npy")), &data).unwrap();
        }
        let existing: AnnotationSet = [Stroke::new(
            HexColor::parse("#0B9224").unwrap(),
            NonZeroU32::new(1).unwrap(),
            NormPoint::new(0.5, 0.5),
        )]
        .into_iter()
        .collect();
        persist::write_strokes(dir.path().join("z_annot.json"), &existing).unwrap();

        let files = LayerFiles::discover(dir.path().join("z_tri.npy")).unwrap();
        let s = Session::open(&files, dir.path(), &AnnotConfig::default()).unwrap();
        assert_eq!(s.prefix(), "z");
        assert_eq!(s.full_size(), (20, 30));
        assert_eq!(s.annotations(), &existing);
        let bathy = s.view(LayerKind::Bathymetry).unwrap();
        assert_eq!(bathy.annotations(), &existing);
        // 常量图层显示为中灰.
        assert!(bathy.display().unwrap().iter().all(|&v| v == 127));
    }

    #[test]
    fn test_invalid_config() {
        let cfg = AnnotConfig {
            roi_rows: vec![],
            ..Default::default()
        };
        let err = Session::from_views("p", "/nonexistent", zero_views((10, 10)), &cfg);
        assert!(matches!(err, Err(SessionError::InvalidConfig(_))));
    }
}
