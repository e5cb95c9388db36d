//! 只追加的笔画存储.

use super::{AnnotationSet, Stroke};
use crate::class::HexColor;
use crate::geometry::NormPoint;
use std::num::NonZeroU32;

/// 会话中唯一的笔画存储. 三个视图共享同一份数据, 但都只拿到快照.
///
/// 只能开始新笔画或延长最后一笔; 没有删除或编辑操作.
#[derive(Clone, Debug, Default)]
pub struct StrokeStore {
    set: AnnotationSet,
    /// 最后一笔是否仍可延长 (尚未抬笔).
    open: bool,
}

impl StrokeStore {
    /// 空存储.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已加载的标注集合继续. 已有笔画均视为已完成.
    #[inline]
    pub fn from_set(set: AnnotationSet) -> Self {
        Self { set, open: false }
    }

    /// 开始新的一笔并追加到末尾. 之前的笔画 (若仍打开) 随之完成.
    ///
    /// 返回新笔画的下标.
    pub fn begin_stroke(&mut self, color: HexColor, thickness: NonZeroU32, point: NormPoint) -> usize {
        self.set.push(Stroke::new(color, thickness, point));
        self.open = true;
        self.set.len() - 1
    }

    /// 向最后一笔追加一个点. 没有打开的笔画时不做任何事并返回 `false`.
    pub fn extend_current_stroke(&mut self, point: NormPoint) -> bool {
        if !self.open {
            return false;
        }
        match self.set.last_mut() {
            Some(stroke) => {
                stroke.points.push(point);
                true
            }
            None => false,
        }
    }

    /// 结束最后一笔, 此后它不可再修改. 返回之前是否有打开的笔画.
    #[inline]
    pub fn finish_current_stroke(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// 最后一笔是否仍可延长?
    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.open
    }

    /// 获得当前全部笔画的深拷贝, 供各视图独立渲染.
    #[inline]
    pub fn snapshot(&self) -> AnnotationSet {
        self.set.clone()
    }

    /// 借用当前全部笔画 (不拷贝). 仅用于保存等一次性只读场景.
    #[inline]
    pub fn annotations(&self) -> &AnnotationSet {
        &self.set
    }

    /// 笔画个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// 是否没有任何笔画?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
