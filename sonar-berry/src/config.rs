//! 运行配置.
//!
//! 所有字段都有默认值, 等于本部署的固定常量; JSON 配置文件中只需写出要覆盖的字段.

use crate::consts::{DEFAULT_BORDER_SIZE, DRAWING_AREA_FRACTION, LOG_EPSILON, ROI_COLS, ROI_ROWS};
use crate::geometry::DrawingGate;
use crate::normalize::ImageNormalizer;
use crate::persist::PersistResult;
use crate::raster::RegionOfInterest;
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 指定输出目录的环境变量.
pub const OUTPUT_DIR_VAR: &str = "SONAR_BERRY_OUTPUT_DIR";

/// 标注工具的运行配置.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotConfig {
    /// 输出目录. 为空时见 [`output_dir_from_env_or_home`].
    pub output_dir: Option<PathBuf>,
    /// 标定边框边长.
    pub border_size: usize,
    /// 可绘制区域边长占图像宽度的比例.
    pub drawing_area_fraction: f64,
    /// 对数变换的偏移量.
    pub log_epsilon: f64,
    /// 感兴趣区域的行索引.
    pub roi_rows: Vec<usize>,
    /// 感兴趣区域的列索引.
    pub roi_cols: Vec<usize>,
}

impl Default for AnnotConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            border_size: DEFAULT_BORDER_SIZE,
            drawing_area_fraction: DRAWING_AREA_FRACTION,
            log_epsilon: LOG_EPSILON,
            roi_rows: ROI_ROWS.to_vec(),
            roi_cols: ROI_COLS.to_vec(),
        }
    }
}

impl AnnotConfig {
    /// 归一化参数.
    #[inline]
    pub fn normalizer(&self) -> ImageNormalizer {
        ImageNormalizer {
            epsilon: self.log_epsilon,
            border_size: self.border_size,
        }
    }

    /// 可绘制区域. 比例不在 `(0, 1]` 内时返回 `None`.
    #[inline]
    pub fn gate(&self) -> Option<DrawingGate> {
        DrawingGate::new(self.drawing_area_fraction)
    }

    /// 感兴趣区域. 行或列索引为空时返回 `None`.
    #[inline]
    pub fn roi(&self) -> Option<RegionOfInterest> {
        RegionOfInterest::new(self.roi_rows.iter().copied(), self.roi_cols.iter().copied())
    }

    /// 实际使用的输出目录: 配置值优先, 否则见 [`output_dir_from_env_or_home`].
    pub fn resolved_output_dir(&self) -> Option<PathBuf> {
        self.output_dir.clone().or_else(output_dir_from_env_or_home)
    }
}

/// 从 JSON 文件读取配置.
pub fn load_config(path: &Path) -> PersistResult<AnnotConfig> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn output_dir_from(var: Option<OsString>) -> Option<PathBuf> {
    match var {
        Some(d) if !d.is_empty() => Some(PathBuf::from(d)),
        _ => {
            let mut ans = dirs::home_dir()?;
            ans.push("annotations");
            Some(ans)
        }
    }
}

/// 获取默认输出目录.
///
/// 1. 若环境变量 `$SONAR_BERRY_OUTPUT_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/annotations`. 找不到主目录时返回 `None`.
#[inline]
pub fn output_dir_from_env_or_home() -> Option<PathBuf> {
    output_dir_from(env::var_os(OUTPUT_DIR_VAR))
}
