//! 通用常量.

/// 单通道颜色.
pub mod gray {
    /// 未标注像素 (背景) 在类别矩阵中的值.
    pub const UNLABELED: u8 = 0;

    /// 单通道黑色.
    pub const BLACK: u8 = 0b_0000_0000;

    /// 像素是否未标注?
    #[inline]
    pub const fn is_unlabeled(p: u8) -> bool {
        matches!(p, UNLABELED)
    }
}

/// 归一化 `[0, 1]` 区间中的特殊取值.
pub mod unit {
    /// 暗端.
    pub const DARK: f64 = 0.0;

    /// 亮端.
    pub const BRIGHT: f64 = 1.0;

    /// 退化区间 (`max == min`) 时输出的常量中灰.
    pub const MID_GRAY: f64 = 0.5;
}

/// 可绘制区域 (标定区域) 边长占图像宽度的比例.
pub const DRAWING_AREA_FRACTION: f64 = 0.1943125;

/// 对数变换时为避免 `ln(0)` 加上的小常量.
pub const LOG_EPSILON: f64 = 1e-9;

/// 标定边框的默认边长 (像素).
pub const DEFAULT_BORDER_SIZE: usize = 100;

/// 画笔默认颜色 (注意: 不属于任何类别).
pub const DEFAULT_PENCIL_COLOR: &str = "#000000";

/// 画笔默认粗细.
pub const DEFAULT_PENCIL_THICKNESS: u32 = 1;

/// 默认不透明度 (完全不透明).
pub const DEFAULT_OPACITY: u8 = u8::MAX;

/// 感兴趣区域的行索引集合.
pub const ROI_ROWS: [usize; 83] = [
    379, 380, 381, 382, 383, 384, 385, 386, 387, 388, 389, 390, 391, 392, 393, 394, 395, 414, 415,
    416, 417, 418, 419, 420, 421, 422, 423, 424, 425, 426, 427, 428, 429, 430, 431, 432, 433, 434,
    435, 436, 437, 438, 439, 440, 441, 442, 443, 444, 445, 446, 447, 448, 449, 450, 451, 452, 453,
    454, 455, 456, 457, 458, 459, 460, 461, 462, 463, 464, 465, 466, 467, 468, 469, 470, 471, 472,
    473, 474, 475, 476, 477, 478, 479,
];

/// 感兴趣区域的列索引集合.
pub const ROI_COLS: [usize; 83] = [
    214, 215, 216, 217, 218, 219, 220, 221, 222, 223, 224, 225, 226, 227, 228, 229, 230, 249, 250,
    251, 252, 253, 254, 255, 256, 257, 258, 259, 260, 261, 262, 263, 264, 265, 266, 267, 268, 269,
    270, 271, 272, 273, 274, 275, 276, 277, 278, 279, 280, 281, 282, 283, 284, 285, 286, 287, 288,
    289, 290, 291, 292, 293, 294, 295, 296, 297, 298, 299, 300, 301, 302, 303, 304, 305, 306, 307,
    308, 309, 310, 311, 312, 313, 314,
];

/// 标注文件后缀.
pub const ANNOT_SUFFIX: &str = "_annot.json";

/// 类别矩阵文件后缀.
pub const OUTPUT_SUFFIX: &str = "_output.npy";
