//! 持久化错误.

use std::fmt::{Display, Formatter};

/// 笔画记录或类别矩阵读写错误.
#[derive(Debug)]
pub enum PersistError {
    /// 底层 I/O 错误.
    Io(std::io::Error),

    /// JSON 格式错误: 非法 JSON, 缺少字段, 颜色不是 `#RRGGBB`, 粗细不是正整数,
    /// 点不是两个数组成的数组, 等等.
    Json(serde_json::Error),

    /// 读取 `.npy` 错误 (包括 dtype 或维数不符).
    ReadNpy(ndarray_npy::ReadNpyError),

    /// 写入 `.npy` 错误.
    WriteNpy(ndarray_npy::WriteNpyError),

    /// 笔画中有非有限坐标, JSON 无法表示.
    ///
    /// 第一个参数是笔画下标, 第二个参数是点下标.
    NonFinitePoint(usize, usize),

    /// 笔画没有任何点.
    EmptyStroke(usize),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Json(e) => write!(f, "malformed stroke record: {e}"),
            Self::ReadNpy(e) => write!(f, "cannot read npy: {e}"),
            Self::WriteNpy(e) => write!(f, "cannot write npy: {e}"),
            Self::NonFinitePoint(s, p) => {
                write!(f, "stroke #{s} point #{p} is not finite and cannot be stored")
            }
            Self::EmptyStroke(s) => write!(f, "stroke #{s} has no point"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::ReadNpy(e) => Some(e),
            Self::WriteNpy(e) => Some(e),
            Self::NonFinitePoint(..) | Self::EmptyStroke(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    #[inline]
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// 持久化运行时结果.
pub type PersistResult<T> = Result<T, PersistError>;
