//! 会话错误.

use crate::layer::{LayerKind, OpenLayerError};
use crate::persist::PersistError;
use crate::raster::RasterError;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// 打开或保存标注会话的错误.
#[derive(Debug)]
pub enum SessionError {
    /// 列目录等底层 I/O 错误.
    Io(std::io::Error),

    /// 所选文件名中没有 `_`, 无法得到前缀.
    NoPrefix(PathBuf),

    /// 同前缀的文件中缺少某个图层.
    MissingLayer(LayerKind),

    /// 同前缀的文件中某个图层出现了不止一次.
    DuplicateLayer(LayerKind, PathBuf, PathBuf),

    /// 读取图层错误.
    OpenLayer(OpenLayerError),

    /// 配置中的参数不合法.
    InvalidConfig(&'static str),

    /// 栅格化错误. 此时不会写出任何文件.
    Raster(RasterError),

    /// 读写笔画记录或类别矩阵错误.
    Persist(PersistError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::NoPrefix(p) => write!(f, "cannot derive a layer prefix from {}", p.display()),
            Self::MissingLayer(k) => write!(f, "no `{}` layer found", k.tag()),
            Self::DuplicateLayer(k, a, b) => write!(
                f,
                "both {} and {} look like the `{}` layer",
                a.display(),
                b.display(),
                k.tag()
            ),
            Self::OpenLayer(e) => e.fmt(f),
            Self::InvalidConfig(what) => write!(f, "invalid configuration: {what}"),
            Self::Raster(e) => e.fmt(f),
            Self::Persist(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<OpenLayerError> for SessionError {
    #[inline]
    fn from(e: OpenLayerError) -> Self {
        Self::OpenLayer(e)
    }
}

impl From<RasterError> for SessionError {
    #[inline]
    fn from(e: RasterError) -> Self {
        Self::Raster(e)
    }
}

impl From<PersistError> for SessionError {
    #[inline]
    fn from(e: PersistError) -> Self {
        Self::Persist(e)
    }
}

/// 会话运行时结果.
pub type SessionResult<T> = Result<T, SessionError>;
