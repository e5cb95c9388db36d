#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 提供海底底质笔画标注的数据结构与基础处理算法: 屏幕坐标与归一化坐标的映射,
//! 笔画采集与存储, 图层显示归一化, 笔画栅格化, 以及标注的持久化.
//!
//! 该 crate 不包含任何 GUI. 界面层只需把控件尺寸和指针事件交给 [`session::Session`],
//! 再把 [`layer::LayerView::display`] 与 [`layer::LayerView::paint`] 的结果画出来.
//!
//! # 注意
//!
//! 1. 类别集合是封闭的 (九类, 见 [`class::SeabedClass`]). 画笔默认的黑色不属于任何类别,
//!   用它画的笔画会导致保存失败.
//! 2. 单线程同步模型. 唯一的共享可变状态是笔画存储, 视图只拿到深拷贝的快照.
//!
//! # 开发计划
//!
//! ### 坐标映射与可绘制区域 ✅
//!
//! 保持宽高比的 letterbox 映射, 中央正方形可绘制区域.
//!
//! 实现位于 `sonar-berry/src/geometry`.
//!
//! ### 笔画采集 ✅
//!
//! 按下-移动-抬起状态机, 向所有视图广播快照.
//!
//! 实现位于 `sonar-berry/src/stroke`.
//!
//! ### 图层归一化 ✅
//!
//! 对数变换, 百分位截断, min-max 拉伸, 标定边框, 8-bit 量化.
//!
//! 实现位于 `sonar-berry/src/normalize`.
//!
//! ### 栅格化 ✅
//!
//! 与 scikit-image `draw.line` 逐像素一致的 Bresenham 直线, 按感兴趣区域裁剪.
//!
//! 实现位于 `sonar-berry/src/raster`.
//!
//! ### 持久化 ✅
//!
//! JSON 笔画记录, `.npy` 类别矩阵.
//!
//! 实现位于 `sonar-berry/src/persist`.
//!
//! ### 笔画粗细参与栅格化 ⌛️
//!
//! 目前粗细只影响屏幕绘制, 类别矩阵中的线条总是单像素宽.

/// 二维索引 `(行, 列)`, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

pub mod class;
pub mod config;
pub mod consts;
pub mod geometry;
pub mod layer;
pub mod normalize;
pub mod persist;
pub mod prelude;
pub mod raster;
pub mod session;
pub mod stroke;
