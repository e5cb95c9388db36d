//! 栅格化结果报告.

use ndarray::ArrayView2;
use sonar_berry::class::SeabedClass;
use sonar_berry::consts::gray::is_unlabeled;
use std::io::{self, Write};

const SEP: &str = "--------------------------------------------------------";

/// 类别矩阵中各类别的像素计数.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassReport {
    shape: (usize, usize),
    unlabeled: usize,
    /// 下标为类别编号, `0` 不使用.
    counts: [usize; 10],
    /// 不属于任何已知类别的像素.
    unknown: usize,
}

impl ClassReport {
    /// 统计 `matrix`.
    pub fn from_matrix(matrix: ArrayView2<u8>) -> Self {
        let mut ans = Self {
            shape: matrix.dim(),
            ..Default::default()
        };
        for &id in matrix.iter() {
            if is_unlabeled(id) {
                ans.unlabeled += 1;
            } else if let Some(c) = SeabedClass::from_id(id) {
                ans.counts[c.id() as usize] += 1;
            } else {
                ans.unknown += 1;
            }
        }
        ans
    }

    /// 已标注像素个数.
    pub fn labeled(&self) -> usize {
        self.counts.iter().sum::<usize>() + self.unknown
    }

    /// 某类别的像素个数.
    #[inline]
    pub fn count(&self, class: SeabedClass) -> usize {
        self.counts[class.id() as usize]
    }
}

/// 将 `report` 的结果写进 `w` 中.
pub fn describe_into<W: Write>(name: &str, report: &ClassReport, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn ratio_to_display(part: usize, total: usize) -> String {
        match total {
            0 => "/".to_string(),
            t => format!("{:.2}%", part as f64 / t as f64 * 100.0),
        }
    }

    let (h, w_) = report.shape;
    let total = h * w_;
    writeln!(w, "{SEP}")?;
    writeln!(w, "Raster `{name}` ({h}x{w_}):")?;
    writeln!(
        w,
        "{S4}Unlabeled: {} ({})",
        report.unlabeled,
        ratio_to_display(report.unlabeled, total)
    )?;
    for class in SeabedClass::ALL {
        let n = report.count(class);
        if n > 0 {
            writeln!(
                w,
                "{S4}[{}] {} {}: {} ({})",
                class.id(),
                class.hex(),
                class.name(),
                n,
                ratio_to_display(n, total)
            )?;
        }
    }
    if report.unknown > 0 {
        writeln!(w, "{S4}Unknown ids: {}", report.unknown)?;
    }
    write!(w, "{SEP}")?;
    Ok(())
}
