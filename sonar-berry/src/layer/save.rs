//! 调试用的图像导出.

use crate::class::SeabedClass;
use crate::consts::gray::{is_unlabeled, BLACK};
use image::ImageResult;
use ndarray::ArrayView2;
use std::path::Path;

/// 类别矩阵, 像素值为类别编号 (`0` 为未标注).
#[derive(Copy, Clone, Debug)]
pub struct ClassMatrix<'a>(pub ArrayView2<'a, u8>);

/// 归一化后的 8-bit 显示数组.
#[derive(Copy, Clone, Debug)]
pub struct DisplayImage<'a>(pub ArrayView2<'a, u8>);

/// 表明一个可以通过 **可视化友好** 模式保存为图片的对象.
///
/// 对于 [`ClassMatrix`], 每个类别被画成它的标识颜色, 未标注像素为黑色;
/// 对于 [`DisplayImage`], 直接保存为灰度图.
pub trait ImgWriteVis {
    /// 按照可视化规则将图片保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 表明一个可以通过 **按原样** 模式保存为图片的对象.
pub trait ImgWriteRaw {
    /// 按原样将图片保存到 `path` 路径.
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 类别编号 -> 标识颜色. 未知编号画成白色, 便于发现.
#[inline]
pub(crate) fn pretty(id: u8) -> [u8; 3] {
    if is_unlabeled(id) {
        return [BLACK; 3];
    }
    match SeabedClass::from_id(id) {
        Some(class) => class.color().rgb(),
        None => [u8::MAX; 3],
    }
}

fn save_gray<P: AsRef<Path>>(view: ArrayView2<u8>, path: P) -> ImageResult<()> {
    let (height, width) = view.dim();
    let mut buf = image::GrayImage::new(width as u32, height as u32);
    for ((h, w), &pix) in view.indexed_iter() {
        buf.put_pixel(w as u32, h as u32, image::Luma([pix]));
    }
    buf.save(path)
}

impl ImgWriteVis for ClassMatrix<'_> {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let (height, width) = self.0.dim();
        let mut buf = image::RgbImage::new(width as u32, height as u32);
        for ((h, w), &id) in self.0.indexed_iter() {
            buf.put_pixel(w as u32, h as u32, image::Rgb(pretty(id)));
        }
        buf.save(path)
    }
}

impl ImgWriteRaw for ClassMatrix<'_> {
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        save_gray(self.0, path)
    }
}

impl ImgWriteVis for DisplayImage<'_> {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        save_gray(self.0, path)
    }
}
