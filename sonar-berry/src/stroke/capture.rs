//! 指针事件到笔画的转换.
//!
//! [`PointerCapture`] 持有唯一的 [`StrokeStore`], 并在每次修改后把快照推送给调用方
//! 指定的视图. 不依赖任何全局窗口对象.

use super::{AnnotationSet, StrokeStore};
use crate::class::{HexColor, SeabedClass};
use crate::consts::{DEFAULT_PENCIL_COLOR, DEFAULT_PENCIL_THICKNESS};
use crate::geometry::{CoordinateMapper, DrawingGate, ScreenPos};
use log::debug;
use std::num::NonZeroU32;

/// 接收标注快照的视图.
pub trait StrokeView {
    /// 用新的快照替换视图持有的标注.
    fn set_annotations(&mut self, snapshot: AnnotationSet);
}

/// 指针事件: 屏幕位置 + 画笔工具是否处于激活状态.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// 控件坐标系中的位置.
    pub pos: ScreenPos,
    /// 画笔工具是否激活.
    pub tool_active: bool,
}

impl PointerEvent {
    /// 直接初始化.
    #[inline]
    pub const fn new(pos: ScreenPos, tool_active: bool) -> Self {
        Self { pos, tool_active }
    }
}

/// 当前画笔: 颜色与粗细.
#[derive(Clone, Debug, PartialEq)]
pub struct Pencil {
    /// 颜色.
    pub color: HexColor,
    /// 粗细.
    pub thickness: NonZeroU32,
}

impl Default for Pencil {
    /// 黑色, 粗细 1. 注意黑色不属于任何类别, 用它画的笔画无法栅格化.
    fn default() -> Self {
        Self {
            color: HexColor::parse(DEFAULT_PENCIL_COLOR).unwrap_or_else(|_| unreachable!()),
            thickness: NonZeroU32::new(DEFAULT_PENCIL_THICKNESS).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// 以类别 `class` 的颜色构建画笔, 保留粗细 `thickness`.
#[inline]
pub fn pen_for_class(class: SeabedClass, thickness: NonZeroU32) -> Pencil {
    Pencil {
        color: class.color(),
        thickness,
    }
}

/// 指针捕获状态机.
#[derive(Clone, Debug, Default)]
pub struct PointerCapture {
    store: StrokeStore,
    gate: DrawingGate,
    pencil: Pencil,
}

impl PointerCapture {
    /// 以已有的存储和可绘制区域初始化.
    #[inline]
    pub fn new(store: StrokeStore, gate: DrawingGate) -> Self {
        Self {
            store,
            gate,
            pencil: Pencil::default(),
        }
    }

    /// 更换画笔. 对之后开始的笔画生效.
    #[inline]
    pub fn set_pencil(&mut self, pencil: Pencil) {
        self.pencil = pencil;
    }

    /// 当前画笔.
    #[inline]
    pub fn pencil(&self) -> &Pencil {
        &self.pencil
    }

    /// 可绘制区域.
    #[inline]
    pub fn gate(&self) -> DrawingGate {
        self.gate
    }

    /// 底层存储.
    #[inline]
    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    /// 取出底层存储.
    #[inline]
    pub fn into_store(self) -> StrokeStore {
        self.store
    }

    /// 按下. 仅当工具激活且位置在可绘制区域内时开始新的一笔.
    ///
    /// 成功开始时通知 `views` 并返回 `true`.
    pub fn pointer_down(
        &mut self,
        mapper: &CoordinateMapper,
        ev: PointerEvent,
        views: &mut [&mut dyn StrokeView],
    ) -> bool {
        if !ev.tool_active || !self.gate.contains(mapper, ev.pos) {
            return false;
        }
        let p = mapper.to_normalized(ev.pos);
        let idx = self
            .store
            .begin_stroke(self.pencil.color.clone(), self.pencil.thickness, p);
        debug!("stroke #{idx} started at ({:.6}, {:.6})", p.x, p.y);
        self.broadcast(views);
        true
    }

    /// 移动. 正在绘制, 工具激活且位置在可绘制区域内时延长当前笔画.
    ///
    /// 离开可绘制区域时笔画只是不再延长, 并不结束; 回到区域内会继续同一笔.
    pub fn pointer_move(
        &mut self,
        mapper: &CoordinateMapper,
        ev: PointerEvent,
        views: &mut [&mut dyn StrokeView],
    ) -> bool {
        if !self.store.is_drawing() || !ev.tool_active || !self.gate.contains(mapper, ev.pos) {
            return false;
        }
        let extended = self
            .store
            .extend_current_stroke(mapper.to_normalized(ev.pos));
        if extended {
            self.broadcast(views);
        }
        extended
    }

    /// 抬起. 当前笔画完成. 返回之前是否在绘制.
    #[inline]
    pub fn pointer_up(&mut self) -> bool {
        self.store.finish_current_stroke()
    }

    /// 向 `views` 推送一份新的快照 (每个视图各一份).
    pub fn broadcast(&self, views: &mut [&mut dyn StrokeView]) {
        for v in views.iter_mut() {
            v.set_annotations(self.store.snapshot());
        }
    }
}
