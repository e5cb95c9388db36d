//! 从硬盘读取图层.
//!
//! 支持两种格式: 任意常见数值 dtype 的 `.npy` 数组, 以及 `.tif` 图像.
//! 两者都被转换为二维 `f64` 数组, 以便进入归一化流水线.
//!
//! `.npy` 可以是二维的标量场, 也可以是 `H×W×3` 或 `H×W×4` 的彩色图像.
//! 彩色图像的通道按 BGR(A) 顺序存放, 读入时按亮度权重合成为单通道, alpha 被忽略.

use ndarray::{Array, Array2, Array3, Axis, Ix2, Ix3};
use ndarray_npy::ReadNpyError;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// 读取图层错误.
#[derive(Debug)]
pub enum OpenLayerError {
    /// 读取 `.npy` 错误.
    ReadNpy(ReadNpyError),

    /// 解码 `.tif` 错误.
    Image(image::ImageError),

    /// `.npy` 的 dtype 不是受支持的数值类型.
    UnsupportedDtype(PathBuf),

    /// 三维 `.npy` 的通道数不是 3 或 4.
    UnsupportedChannels(PathBuf, usize),

    /// 扩展名既不是 `.npy` 也不是 `.tif`.
    UnsupportedExtension(PathBuf),
}

impl Display for OpenLayerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadNpy(e) => write!(f, "cannot read npy layer: {e}"),
            Self::Image(e) => write!(f, "cannot decode tif layer: {e}"),
            Self::UnsupportedDtype(p) => write!(f, "{} has an unsupported dtype", p.display()),
            Self::UnsupportedChannels(p, n) => {
                write!(f, "{} has {n} channels, expected 3 or 4", p.display())
            }
            Self::UnsupportedExtension(p) => {
                write!(f, "{} is neither `.npy` nor `.tif`", p.display())
            }
        }
    }
}

impl std::error::Error for OpenLayerError {}

/// 图层文件格式.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LayerFormat {
    /// numpy 数组.
    Npy,
    /// TIFF 图像.
    Tif,
}

impl LayerFormat {
    /// 通过扩展名 (大小写不敏感) 判断格式.
    pub fn of<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("npy") {
            Some(Self::Npy)
        } else if ext.eq_ignore_ascii_case("tif") {
            Some(Self::Tif)
        } else {
            None
        }
    }
}

/// 依次尝试各个 dtype, 直到 descriptor 匹配.
macro_rules! read_npy_as_f64 {
    ($path: expr, $dim: ty; $($t: ty),+) => {{
        let path = $path;
        'found: {
            $(
                match ndarray_npy::read_npy::<_, Array<$t, $dim>>(path) {
                    Ok(a) => break 'found Ok(a.mapv(|x| x as f64)),
                    Err(ReadNpyError::WrongDescriptor(_)) => {}
                    Err(e) => break 'found Err(OpenLayerError::ReadNpy(e)),
                }
            )+
            Err(OpenLayerError::UnsupportedDtype(path.to_path_buf()))
        }
    }};
}

/// BGR 三个通道的亮度权重, 与 `image` crate 的灰度转换 (Rec. 709) 一致.
const BGR_LUMA: [f64; 3] = [0.0722, 0.7152, 0.2126];

/// `H×W×C` 彩色图像 -> `H×W` 亮度.
fn color_to_luma(path: &Path, color: Array3<f64>) -> Result<Array2<f64>, OpenLayerError> {
    let channels = color.len_of(Axis(2));
    if channels != 3 && channels != 4 {
        return Err(OpenLayerError::UnsupportedChannels(path.to_path_buf(), channels));
    }
    Ok(color.map_axis(Axis(2), |px| {
        BGR_LUMA.iter().zip(px.iter()).map(|(w, v)| w * v).sum()
    }))
}

/// 读取 `.npy` 数组并转换为二维 `f64`.
///
/// 二维数组原样转换; 三维数组视为彩色图像, 合成为亮度.
pub fn read_npy_layer<P: AsRef<Path>>(path: P) -> Result<Array2<f64>, OpenLayerError> {
    let path = path.as_ref();
    match read_npy_as_f64!(path, Ix2; f64, f32, i64, i32, i16, i8, u64, u32, u16, u8) {
        Err(OpenLayerError::ReadNpy(ReadNpyError::WrongNdim(..))) => {
            let color: Array3<f64> =
                read_npy_as_f64!(path, Ix3; f64, f32, i64, i32, i16, i8, u64, u32, u16, u8)?;
            color_to_luma(path, color)
        }
        other => other,
    }
}

/// 读取 `.tif` 图像的亮度通道.
///
/// 8-bit 与 16-bit 灰度图保留原始整数值; 其他像素格式先转换为 `[0, 1]` 的浮点亮度.
pub fn read_tif_layer<P: AsRef<Path>>(path: P) -> Result<Array2<f64>, OpenLayerError> {
    use image::DynamicImage;

    let img = image::open(path.as_ref()).map_err(OpenLayerError::Image)?;
    let shape = (img.height() as usize, img.width() as usize);
    let data: Vec<f64> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f64::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f64::from).collect(),
        other => other.to_luma32f().into_raw().into_iter().map(f64::from).collect(),
    };
    // 像素个数与宽高总是一致.
    Ok(Array2::from_shape_vec(shape, data).unwrap_or_else(|_| unreachable!()))
}

/// 按扩展名读取图层.
pub fn open_layer<P: AsRef<Path>>(path: P) -> Result<Array2<f64>, OpenLayerError> {
    let path = path.as_ref();
    match LayerFormat::of(path) {
        Some(LayerFormat::Npy) => read_npy_layer(path),
        Some(LayerFormat::Tif) => read_tif_layer(path),
        None => Err(OpenLayerError::UnsupportedExtension(path.to_path_buf())),
    }
}
