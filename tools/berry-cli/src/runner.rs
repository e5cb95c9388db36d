//! 各子命令的实际运行函数.

use crate::report::{describe_into, ClassReport};
use log::info;
use sonar_berry::config::{load_config, AnnotConfig};
use sonar_berry::consts::{ANNOT_SUFFIX, OUTPUT_SUFFIX};
use sonar_berry::layer::{open_layer, ClassMatrix, DisplayImage, ImgWriteVis, LayerView};
use sonar_berry::persist;
use sonar_berry::raster::rasterize;
use sonar_berry::session::{LayerFiles, Session};
use sonar_berry::Idx2d;
use std::error::Error;
use std::path::{Path, PathBuf};

/// 子命令结果.
pub type RunResult = Result<(), Box<dyn Error>>;

/// 读取配置. 未指定时使用默认值.
pub fn config_or_default(path: Option<&Path>) -> Result<AnnotConfig, Box<dyn Error>> {
    match path {
        Some(p) => {
            info!("loading config {}", p.display());
            Ok(load_config(p)?)
        }
        None => Ok(AnnotConfig::default()),
    }
}

/// `<prefix>_annot.json` -> `<prefix>_output.npy`, 其他文件名直接换扩展名.
pub fn default_output_path(strokes: &Path) -> PathBuf {
    let name = strokes
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    match name.strip_suffix(ANNOT_SUFFIX) {
        Some(prefix) => strokes.with_file_name(format!("{prefix}{OUTPUT_SUFFIX}")),
        None => strokes.with_extension("npy"),
    }
}

/// 笔画记录 -> 类别矩阵. 笔画记录文件必须存在.
pub fn run_rasterize(
    strokes: &Path,
    shape: Idx2d,
    config: &AnnotConfig,
    out: Option<PathBuf>,
    png: Option<PathBuf>,
) -> RunResult {
    let json = std::fs::read_to_string(strokes)
        .map_err(|e| format!("cannot read {}: {e}", strokes.display()))?;
    let set = persist::load_strokes(&json)?;
    let roi = config.roi().ok_or("ROI rows and columns must not be empty")?;
    let matrix = rasterize(&set, shape, &roi, &Default::default())?;

    let out = out.unwrap_or_else(|| default_output_path(strokes));
    persist::save_matrix(&out, matrix.view())?;
    if let Some(png) = png {
        ClassMatrix(matrix.view()).save(png)?;
    }

    let mut buf = Vec::with_capacity(512);
    describe_into(&out.display().to_string(), &ClassReport::from_matrix(matrix.view()), &mut buf)?;
    println!("{}", String::from_utf8_lossy(&buf));
    Ok(())
}

/// 图层 -> 显示用灰度 PNG.
pub fn run_normalize(
    layer: &Path,
    out: &Path,
    quantile_percent: u8,
    log_enabled: bool,
    config: &AnnotConfig,
) -> RunResult {
    let raw = open_layer(layer)?;
    let mut view = LayerView::new(sonar_berry::layer::LayerKind::Sonar, raw)
        .with_normalizer(config.normalizer());
    if !view.state_mut().set_quantile_percent(quantile_percent) {
        return Err(format!("quantile {quantile_percent} is outside 0..=100").into());
    }
    view.state_mut().log_enabled = log_enabled;
    let display = view.display()?;
    DisplayImage(display.view()).save(out)?;
    info!("wrote {}", out.display());
    Ok(())
}

/// 打印同组图层文件.
pub fn run_discover(selected: &Path) -> RunResult {
    let files = LayerFiles::discover(selected)?;
    println!("prefix: {}", files.prefix());
    for (kind, path) in files.iter() {
        println!("{:>6}: {}", kind.tag(), path.display());
    }
    Ok(())
}

/// 以已有笔画记录重新保存一个会话 (重新生成类别矩阵).
pub fn run_resave(selected: &Path, output_dir: &Path, config: &AnnotConfig) -> RunResult {
    let files = LayerFiles::discover(selected)?;
    let session = Session::open(&files, output_dir, config)?;
    let out = session.save()?;
    let matrix = persist::load_matrix(&out)?;

    let mut buf = Vec::with_capacity(512);
    describe_into(session.prefix(), &ClassReport::from_matrix(matrix.view()), &mut buf)?;
    println!("{}", String::from_utf8_lossy(&buf));
    Ok(())
}
