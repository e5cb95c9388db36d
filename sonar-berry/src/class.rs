//! 海底底质类别与颜色标识.
//!
//! 每个类别通过一个十六进制 RGB 颜色 (`#rrggbb`) 标识, 并对应一个 `1..=9`
//! 的类别编号. 类别集合是封闭的: 不在表中的颜色在栅格化时是致命错误.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// 十六进制 RGB 颜色, 以小写规范形式 `#rrggbb` 保存.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

/// 颜色字符串格式错误.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl Display for ParseColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a `#RRGGBB` color", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl HexColor {
    /// 解析 `#RRGGBB` (大小写不敏感). 其他格式返回 `Err`.
    pub fn parse(s: &str) -> Result<Self, ParseColorError> {
        let well_formed = s.len() == 7
            && s.starts_with('#')
            && s[1..].bytes().all(|b| b.is_ascii_hexdigit());
        if well_formed {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(ParseColorError(s.to_owned()))
        }
    }

    /// 规范形式字符串.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 拆分为 `[r, g, b]`.
    pub fn rgb(&self) -> [u8; 3] {
        // 构造时已保证格式合法.
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or_default();
        [channel(1), channel(3), channel(5)]
    }
}

impl TryFrom<String> for HexColor {
    type Error = ParseColorError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    #[inline]
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl Display for HexColor {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 本部署使用的九个底质类别.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SeabedClass {
    /// 波喜荡草.
    Posidonie,
    /// 抛石.
    Enrochement,
    /// 草甸根茎层 (matte).
    Matte,
    /// 人工结构.
    Anthropique,
    /// 丝粉藻.
    Cymodocee,
    /// 沉积物.
    Sediment,
    /// 岩石.
    Roche,
    /// 块石/卵石/砾石.
    BlocGaletGravier,
    /// 带沙纹的沉积物.
    SedimentRide,
}

impl SeabedClass {
    /// 全部类别, 按类别编号排列.
    pub const ALL: [SeabedClass; 9] = [
        Self::Posidonie,
        Self::Enrochement,
        Self::Matte,
        Self::Anthropique,
        Self::Cymodocee,
        Self::Sediment,
        Self::Roche,
        Self::BlocGaletGravier,
        Self::SedimentRide,
    ];

    /// 类别编号, `1..=9`. `0` 保留给未标注像素.
    #[inline]
    pub const fn id(&self) -> u8 {
        match self {
            Self::Posidonie => 1,
            Self::Enrochement => 2,
            Self::Matte => 3,
            Self::Anthropique => 4,
            Self::Cymodocee => 5,
            Self::Sediment => 6,
            Self::Roche => 7,
            Self::BlocGaletGravier => 8,
            Self::SedimentRide => 9,
        }
    }

    /// 类别的标识颜色 (小写).
    #[inline]
    pub const fn hex(&self) -> &'static str {
        match self {
            Self::Posidonie => "#0b9224",
            Self::Enrochement => "#969d97",
            Self::Matte => "#d55e09",
            Self::Anthropique => "#0c03d2",
            Self::Cymodocee => "#20e4db",
            Self::Sediment => "#fef22f",
            Self::Roche => "#751f1c",
            Self::BlocGaletGravier => "#524e44",
            Self::SedimentRide => "#a28446",
        }
    }

    /// 类别名, 供选择画笔颜色时展示.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Posidonie => "Posidonie",
            Self::Enrochement => "Enrochement",
            Self::Matte => "Matte",
            Self::Anthropique => "Anthropique",
            Self::Cymodocee => "Cymodecee",
            Self::Sediment => "Sediment",
            Self::Roche => "Roche",
            Self::BlocGaletGravier => "BlocGaletGravier",
            Self::SedimentRide => "SedimentRide",
        }
    }

    /// 类别颜色.
    #[inline]
    pub fn color(&self) -> HexColor {
        HexColor(self.hex().to_owned())
    }

    /// 通过颜色字符串查找类别 (大小写不敏感). 找不到时返回 `None`.
    pub fn from_hex(color: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(color))
    }

    /// 通过类别编号查找类别.
    #[inline]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// 通过类别名查找类别.
    #[inline]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// 颜色到类别编号的映射. 栅格化时使用.
///
/// 默认值 ([`ClassColorMap::fixed`]) 即本部署的九类映射.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassColorMap {
    entries: Vec<(HexColor, u8)>,
}

impl ClassColorMap {
    /// 本部署的固定映射.
    pub fn fixed() -> Self {
        Self {
            entries: SeabedClass::ALL
                .into_iter()
                .map(|c| (c.color(), c.id()))
                .collect(),
        }
    }

    /// 从任意 `(颜色, 编号)` 对构造. 编号 `0` 被保留, 会导致 panic.
    pub fn from_pairs<I: IntoIterator<Item = (HexColor, u8)>>(it: I) -> Self {
        let entries: Vec<_> = it.into_iter().collect();
        assert!(
            entries.iter().all(|(_, id)| *id != crate::consts::gray::UNLABELED),
            "类别编号 0 保留给未标注像素"
        );
        Self { entries }
    }

    /// 查找颜色对应的类别编号.
    #[inline]
    pub fn get(&self, color: &HexColor) -> Option<u8> {
        self.entries
            .iter()
            .find_map(|(c, id)| (c == color).then_some(*id))
    }

    /// 映射中的类别个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 映射是否为空?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ClassColorMap {
    #[inline]
    fn default() -> Self {
        Self::fixed()
    }
}
