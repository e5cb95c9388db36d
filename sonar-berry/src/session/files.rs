//! 同一片海域的图层文件分组.
//!
//! 用户只选择其中一个文件, 例如 `zone3_bathy.tif`. 文件名 (不含扩展名) 最后一个 `_`
//! 之前的部分是前缀 `zone3`; 同目录下以 `zone3_` 开头, 以 `.tif` 或 `.npy` 结尾的文件
//! 就是同组的图层 (`zone30_sonar.npy` 不算). 前缀之后的部分包含 `sonar`, `bathy` 或 `tri`,
//! 据此识别图层种类.

use super::{SessionError, SessionResult};
use crate::layer::LayerKind;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// 图层文件允许的扩展名.
const LAYER_EXTENSIONS: [&str; 2] = [".tif", ".npy"];

/// 一组图层文件.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerFiles {
    prefix: String,
    paths: [PathBuf; 3],
}

/// 取文件名 (不含扩展名) 最后一个 `_` 之前的部分.
pub fn file_prefix<P: AsRef<Path>>(selected: P) -> Option<String> {
    let stem = selected.as_ref().file_stem()?.to_str()?;
    let (prefix, _) = stem.rsplit_once('_')?;
    Some(prefix.to_owned())
}

impl LayerFiles {
    /// 以用户选择的任一图层文件 `selected` 查找同组的三个图层.
    ///
    /// 每种图层必须恰好出现一次. 带有该前缀但无法识别种类的文件被忽略.
    pub fn discover<P: AsRef<Path>>(selected: P) -> SessionResult<Self> {
        let selected = selected.as_ref();
        let prefix =
            file_prefix(selected).ok_or_else(|| SessionError::NoPrefix(selected.to_path_buf()))?;
        let dir = match selected.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };

        let group = format!("{prefix}_");
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with(group.as_str())
                && LAYER_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
            {
                names.push(name.to_owned());
            }
        }
        names.sort_unstable();

        let mut slots: [Option<PathBuf>; 3] = Default::default();
        for name in names {
            let Some(kind) = LayerKind::from_file_name(&name[group.len()..]) else {
                warn!("{name} shares prefix `{prefix}` but is not a known layer, ignored");
                continue;
            };
            let path = dir.join(&name);
            match &slots[kind as usize] {
                Some(prev) => {
                    return Err(SessionError::DuplicateLayer(kind, prev.clone(), path));
                }
                None => slots[kind as usize] = Some(path),
            }
        }

        let [sonar, bathy, tri] = slots;
        let paths = [
            sonar.ok_or(SessionError::MissingLayer(LayerKind::Sonar))?,
            bathy.ok_or(SessionError::MissingLayer(LayerKind::Bathymetry))?,
            tri.ok_or(SessionError::MissingLayer(LayerKind::Triangulated))?,
        ];
        debug!("layers for `{prefix}`: {paths:?}");
        Ok(Self { prefix, paths })
    }

    /// 文件前缀, 也是输出文件名的前缀.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 某个图层的路径.
    #[inline]
    pub fn get(&self, kind: LayerKind) -> &Path {
        &self.paths[kind as usize]
    }

    /// 按 声呐, 水深, 三角化 的顺序迭代.
    pub fn iter(&self) -> impl Iterator<Item = (LayerKind, &Path)> + '_ {
        LayerKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, names: &[&str]) {
        for n in names {
            std::fs::write(dir.join(n), b"").unwrap();
        }
    }

    #[test]
    fn test_file_prefix() {
        assert_eq!(file_prefix("/a/zone_3_bathy.tif").as_deref(), Some("zone_3"));
        assert_eq!(file_prefix("x_sonar.npy").as_deref(), Some("x"));
        assert_eq!(file_prefix("_tri.npy").as_deref(), Some(""));
        assert_eq!(file_prefix("nounderscore.npy"), None);
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "zone3_tri.npy",
                "zone3_sonar.tif",
                "zone3_bathy.npy",
                "zone3_bathy.png",
                "zone3_rgb.npy",
                "zone4_sonar.npy",
                "zone30_sonar.npy",
                "zone30_bathy.tif",
            ],
        );
        let files = LayerFiles::discover(dir.path().join("zone3_bathy.npy")).unwrap();
        assert_eq!(files.prefix(), "zone3");
        assert_eq!(files.get(LayerKind::Sonar), dir.path().join("zone3_sonar.tif"));
        assert_eq!(files.get(LayerKind::Bathymetry), dir.path().join("zone3_bathy.npy"));
        assert_eq!(files.get(LayerKind::Triangulated), dir.path().join("zone3_tri.npy"));
        let kinds: Vec<_> = files.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, LayerKind::ALL);
    }

    #[test]
    fn test_prefix_containing_layer_tag() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["district_sonar.npy", "district_bathy.npy", "district_tri.npy"]);
        let files = LayerFiles::discover(dir.path().join("district_tri.npy")).unwrap();
        assert_eq!(files.get(LayerKind::Sonar), dir.path().join("district_sonar.npy"));
        assert_eq!(files.get(LayerKind::Bathymetry), dir.path().join("district_bathy.npy"));
    }

    #[test]
    fn test_missing_and_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["a_sonar.npy", "a_bathy.npy"]);
        assert!(matches!(
            LayerFiles::discover(dir.path().join("a_sonar.npy")),
            Err(SessionError::MissingLayer(LayerKind::Triangulated))
        ));

        touch(dir.path(), &["a_tri.npy", "a_sonar.tif"]);
        assert!(matches!(
            LayerFiles::discover(dir.path().join("a_sonar.npy")),
            Err(SessionError::DuplicateLayer(LayerKind::Sonar, _, _))
        ));
    }

    #[test]
    fn test_no_prefix() {
        assert!(matches!(
            LayerFiles::discover("plain.npy"),
            Err(SessionError::NoPrefix(_))
        ));
    }
}
