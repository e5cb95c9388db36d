//! 标注的持久化: 笔画记录 (`*_annot.json`) 与类别矩阵 (`*_output.npy`).
//!
//! 笔画记录是一个 JSON 数组, 每个元素形如
//!
//! ```json
//! {"color": "#0b9224", "thickness": 3, "points": [[0.5, 0.5], [0.51, 0.5]]}
//! ```
//!
//! 浮点数以最短可往返形式写出, 因此有限坐标可以逐位精确地往返.
//! 类别矩阵以 `|u1` dtype 的二维 `.npy` 存储.

use crate::stroke::AnnotationSet;
use log::{debug, info};
use ndarray::{Array2, ArrayView2};
use std::io::ErrorKind;
use std::path::Path;

mod error;

pub use error::{PersistError, PersistResult};

/// 检查笔画集合能否无损地用 JSON 表示.
fn check_storable(set: &AnnotationSet) -> PersistResult<()> {
    for (i, s) in set.iter().enumerate() {
        if s.points.is_empty() {
            return Err(PersistError::EmptyStroke(i));
        }
        if let Some(j) = s.points.iter().position(|p| !p.is_finite()) {
            return Err(PersistError::NonFinitePoint(i, j));
        }
    }
    Ok(())
}

/// 序列化为 JSON 字符串.
///
/// 坐标中存在 NaN 或无穷时返回 [`PersistError::NonFinitePoint`].
pub fn save_strokes(set: &AnnotationSet) -> PersistResult<String> {
    check_storable(set)?;
    Ok(serde_json::to_string(set)?)
}

/// 从 JSON 字符串解析笔画集合.
///
/// 任何一条记录格式不合法时整体失败, 不返回部分结果.
pub fn load_strokes(json: &str) -> PersistResult<AnnotationSet> {
    let set: AnnotationSet = serde_json::from_str(json)?;
    check_storable(&set)?;
    Ok(set)
}

/// 把笔画集合写入 `path`.
pub fn write_strokes<P: AsRef<Path>>(path: P, set: &AnnotationSet) -> PersistResult<()> {
    let json = save_strokes(set)?;
    std::fs::write(path.as_ref(), json)?;
    info!("wrote {} strokes to {}", set.len(), path.as_ref().display());
    Ok(())
}

/// 读取 `path` 处的笔画记录. 文件不存在时返回空集合.
pub fn read_strokes_or_empty<P: AsRef<Path>>(path: P) -> PersistResult<AnnotationSet> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(json) => {
            let set = load_strokes(&json)?;
            info!("loaded {} strokes from {}", set.len(), path.as_ref().display());
            Ok(set)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no stroke record at {}, starting empty", path.as_ref().display());
            Ok(AnnotationSet::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// 把类别矩阵写为 `.npy`.
pub fn save_matrix<P: AsRef<Path>>(path: P, matrix: ArrayView2<u8>) -> PersistResult<()> {
    ndarray_npy::write_npy(path.as_ref(), &matrix).map_err(PersistError::WriteNpy)?;
    let (h, w) = matrix.dim();
    info!("wrote {h}x{w} class matrix to {}", path.as_ref().display());
    Ok(())
}

/// 读取 `.npy` 类别矩阵. dtype 必须为 `u8`, 维数必须为 2.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> PersistResult<Array2<u8>> {
    ndarray_npy::read_npy(path.as_ref()).map_err(PersistError::ReadNpy)
}
