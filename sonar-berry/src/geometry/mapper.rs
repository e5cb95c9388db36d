//! 屏幕坐标与归一化坐标的互相转换.
//!
//! 图像以保持宽高比的方式缩放进控件, 因此在控件中居中并留有上下或左右的空白
//! (letterbox). 归一化坐标以全分辨率源图像的内容区域为参照, 与控件大小无关,
//! 三个图层共享同一套归一化坐标.

use super::{NormPoint, ScreenPos, Size2d};

/// 控件尺寸与源图像原始尺寸所确定的映射.
///
/// 控件尺寸改变时应调用 [`CoordinateMapper::resize`] 重新计算;
/// 源图像尺寸不会改变.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    widget: Size2d,
    image: Size2d,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

#[inline]
fn is_valid(s: Size2d) -> bool {
    s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0
}

impl CoordinateMapper {
    /// 以控件尺寸 `widget` 和源图像尺寸 `image` 构建映射.
    ///
    /// 任一尺寸非正或不是有限值时返回 `None`.
    pub fn new(widget: Size2d, image: Size2d) -> Option<Self> {
        if !is_valid(widget) || !is_valid(image) {
            return None;
        }
        let scale = f64::min(widget.width / image.width, widget.height / image.height);
        Some(Self {
            widget,
            image,
            scale,
            offset_x: (widget.width - scale * image.width) / 2.0,
            offset_y: (widget.height - scale * image.height) / 2.0,
        })
    }

    /// 控件与源图像一样大时的映射: 缩放为 1, 没有留白.
    ///
    /// 栅格化时用它把归一化坐标换算为全分辨率像素坐标.
    #[inline]
    pub fn full_resolution(image: Size2d) -> Option<Self> {
        Self::new(image, image)
    }

    /// 控件尺寸改变后重新计算. 新尺寸不合法时返回 `None` 且不修改 `self`.
    pub fn resize(&mut self, widget: Size2d) -> Option<()> {
        *self = Self::new(widget, self.image)?;
        Some(())
    }

    /// 统一缩放系数 `s = min(widget_w / image_w, widget_h / image_h)`.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// 留白偏移 `(off_x, off_y)`.
    #[inline]
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// 控件尺寸.
    #[inline]
    pub fn widget(&self) -> Size2d {
        self.widget
    }

    /// 源图像尺寸.
    #[inline]
    pub fn image(&self) -> Size2d {
        self.image
    }

    /// 图像在控件上实际显示的宽.
    #[inline]
    pub fn displayed_width(&self) -> f64 {
        self.scale * self.image.width
    }

    /// 图像在控件上实际显示的高.
    #[inline]
    pub fn displayed_height(&self) -> f64 {
        self.scale * self.image.height
    }

    /// 屏幕坐标 -> 归一化坐标. 不做截断: 落在留白中的点会得到 `[0, 1]` 以外的值.
    #[inline]
    pub fn to_normalized(&self, pos: ScreenPos) -> NormPoint {
        NormPoint::new(
            (pos.x - self.offset_x) / self.displayed_width(),
            (pos.y - self.offset_y) / self.displayed_height(),
        )
    }

    /// 归一化坐标 -> 屏幕坐标. [`Self::to_normalized`] 的逆.
    #[inline]
    pub fn to_absolute(&self, p: NormPoint) -> ScreenPos {
        ScreenPos::new(
            p.x * self.displayed_width() + self.offset_x,
            p.y * self.displayed_height() + self.offset_y,
        )
    }
}
