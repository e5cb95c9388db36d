//! 图层显示归一化.
//!
//! 原始图层 (声呐强度, 水深, 三角化衍生量) 的数值范围各不相同. 显示前依次经过:
//!
//! 1. 可选的对数变换 `ln(x + eps)`;
//! 2. 以第 0 和第 `quantile * 100` 百分位数截断;
//! 3. 线性拉伸到 `[0, 1]` (窗宽为 0 时输出常量中灰);
//! 4. 注入标定边框;
//! 5. 量化到 8-bit.
//!
//! `quantile = 1.0` 且不做对数变换时, 结果与普通的 min-max 规范化相同, 这也是默认显示状态.

use log::debug;
use ndarray::{Array2, ArrayView2};
use std::fmt::{Display, Formatter};

mod border;
mod percentile;
mod window;

pub use border::add_border;
pub use percentile::SortedSamples;
pub use window::{quantize, ClipWindow};

use crate::consts::{DEFAULT_BORDER_SIZE, LOG_EPSILON};

/// 归一化错误.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NormalizeError {
    /// `quantile` 不在 `[0, 1]` 内.
    QuantileOutOfRange(f64),

    /// 数组中没有任何有限值 (包括空数组).
    NoFiniteSample,
}

impl Display for NormalizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuantileOutOfRange(q) => write!(f, "quantile {q} is outside [0, 1]"),
            Self::NoFiniteSample => f.write_str("array has no finite sample"),
        }
    }
}

impl std::error::Error for NormalizeError {}

/// 归一化运行时结果.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        fn ln_inplace(data: &mut Array2<f64>, eps: f64) {
            data.par_mapv_inplace(|x| (x + eps).ln());
        }
    } else {
        fn ln_inplace(data: &mut Array2<f64>, eps: f64) {
            data.mapv_inplace(|x| (x + eps).ln());
        }
    }
}

/// 归一化流水线参数.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageNormalizer {
    /// 对数变换的偏移量.
    pub epsilon: f64,
    /// 标定边框边长.
    pub border_size: usize,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self {
            epsilon: LOG_EPSILON,
            border_size: DEFAULT_BORDER_SIZE,
        }
    }
}

impl ImageNormalizer {
    /// 可选的对数变换. 负值变换后为 NaN, 在后续步骤中被当作无效像素.
    pub fn transform(&self, raw: ArrayView2<f64>, log_enabled: bool) -> Array2<f64> {
        let mut data = raw.to_owned();
        if log_enabled {
            ln_inplace(&mut data, self.epsilon);
        }
        data
    }

    /// 计算截断窗口.
    pub fn window(&self, data: ArrayView2<f64>, quantile: f64) -> NormalizeResult<ClipWindow> {
        if !(0.0..=1.0).contains(&quantile) {
            return Err(NormalizeError::QuantileOutOfRange(quantile));
        }
        let samples = SortedSamples::new(data.iter().copied());
        let lo = samples.percentile(0.0).ok_or(NormalizeError::NoFiniteSample)?;
        let hi = samples
            .percentile(quantile * 100.0)
            .ok_or(NormalizeError::NoFiniteSample)?;
        debug!(
            "clip window [{lo}, {hi}] from {} finite samples (quantile {quantile})",
            samples.len()
        );
        // 百分位数单调, 因此 lo <= hi.
        ClipWindow::new(lo, hi).ok_or(NormalizeError::NoFiniteSample)
    }

    /// 步骤 1-3: 得到 `[0, 1]` 数组, 不含边框. 无效像素为 0.
    pub fn normalize_unit(
        &self,
        raw: ArrayView2<f64>,
        quantile: f64,
        log_enabled: bool,
    ) -> NormalizeResult<Array2<f64>> {
        let data = self.transform(raw, log_enabled);
        let window = self.window(data.view(), quantile)?;
        Ok(data.mapv(|x| window.eval_unit(x).unwrap_or(crate::consts::unit::DARK)))
    }

    /// 完整流水线, 得到显示用的 8-bit 灰度数组.
    pub fn normalize(
        &self,
        raw: ArrayView2<f64>,
        quantile: f64,
        log_enabled: bool,
    ) -> NormalizeResult<Array2<u8>> {
        let mut unit = self.normalize_unit(raw, quantile, log_enabled)?;
        add_border(&mut unit, self.border_size);
        Ok(unit.mapv(quantize))
    }
}

/// 以默认参数 (`eps = 1e-9`, 边框边长 100) 运行完整流水线.
#[inline]
pub fn normalize(raw: ArrayView2<f64>, quantile: f64, log_enabled: bool) -> NormalizeResult<Array2<u8>> {
    ImageNormalizer::default().normalize(raw, quantile, log_enabled)
}
