//! 百分位数.
//!
//! 与 numpy `percentile` 默认的 "linear" 插值一致: 对排序后的 `n` 个样本,
//! 第 `q` 百分位数位于秩 `q / 100 * (n - 1)`, 在相邻两个样本之间线性插值.

use ordered_float::OrderedFloat;

/// 排好序的有限样本.
#[derive(Clone, Debug)]
pub struct SortedSamples {
    data: Vec<OrderedFloat<f64>>,
}

impl SortedSamples {
    /// 从任意样本构建. 非有限值 (NaN, ±inf) 被忽略.
    pub fn new<I: IntoIterator<Item = f64>>(it: I) -> Self {
        let mut data: Vec<_> = it
            .into_iter()
            .filter(|x| x.is_finite())
            .map(OrderedFloat)
            .collect();
        data.sort_unstable();
        Self { data }
    }

    /// 有限样本个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否没有有限样本?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 第 `q` 百分位数, `q` 在 `[0, 100]` 内 (越界时截断到该区间).
    ///
    /// 没有有限样本时返回 `None`.
    pub fn percentile(&self, q: f64) -> Option<f64> {
        let n = self.data.len();
        if n == 0 || q.is_nan() {
            return None;
        }
        let rank = q.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
        let below = rank.floor();
        let lo = below as usize;
        let hi = (lo + 1).min(n - 1);
        let t = rank - below;
        let a = self.data[lo].0;
        let b = self.data[hi].0;
        // numpy 的 `_lerp`: 在 t >= 0.5 时从上端反推, 以保证端点精确.
        Some(if t >= 0.5 {
            b - (b - a) * (1.0 - t)
        } else {
            a + (b - a) * t
        })
    }
}
