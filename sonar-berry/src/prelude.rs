//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::Idx2d;

pub use crate::class::{ClassColorMap, HexColor, SeabedClass};
pub use crate::config::{load_config, AnnotConfig};
pub use crate::consts::gray::UNLABELED;

pub use crate::geometry::{CoordinateMapper, DrawingGate, NormPoint, ScreenPos, Size2d};
pub use crate::stroke::{
    pen_for_class, AnnotationSet, Pencil, PointerCapture, PointerEvent, Stroke, StrokeStore,
    StrokeView,
};

pub use crate::layer::{ImgWriteRaw, ImgWriteVis, LayerKind, LayerView};
pub use crate::normalize::{normalize, ImageNormalizer};
pub use crate::raster::{rasterize, RegionOfInterest};

pub use crate::persist::{load_strokes, save_strokes};
pub use crate::session::{LayerFiles, Session};
