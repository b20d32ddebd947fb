//! 抽奖轮盘的几何与旋转计算
//!
//! 指针固定在轮盘正上方，扇区从顶部开始顺时针排布。
//! 旋转角度使用角度制（顺时针为正），扇区边界使用弧度制（与 canvas 一致）。

use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;

/// 扇区配色，按下标循环使用
pub const WHEEL_COLORS: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA",
];

/// 每次抽奖转满的圈数
pub const FULL_TURNS: u32 = 5;

/// 前端旋转动画时长
pub const SPIN_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub index: usize,
    /// 起始弧度（-π/2 为正上方）
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinOutcome {
    /// 抽中的选项下标
    pub index: usize,
    pub result: String,
    /// 轮盘最终顺时针旋转角度
    pub rotation_degrees: f64,
}

pub fn section_angle_degrees(count: usize) -> f64 {
    360.0 / count as f64
}

pub fn segment_color(index: usize) -> &'static str {
    WHEEL_COLORS[index % WHEEL_COLORS.len()]
}

/// 各扇区的绘制范围
pub fn segments(count: usize) -> Vec<Segment> {
    if count == 0 {
        return Vec::new();
    }
    let section = 2.0 * PI / count as f64;
    (0..count)
        .map(|index| Segment {
            index,
            start_angle: index as f64 * section - PI / 2.0,
            end_angle: (index + 1) as f64 * section - PI / 2.0,
            color: segment_color(index),
        })
        .collect()
}

/// 让第 `index` 个扇区的中线停在指针下方所需的旋转角度
pub fn rotation_for_index(index: usize, count: usize) -> f64 {
    let section = section_angle_degrees(count);
    let target = index as f64 * section + section / 2.0;
    360.0 * FULL_TURNS as f64 + (360.0 - target)
}

/// 旋转 `rotation_degrees` 后指针所指的扇区；没有扇区时返回 0
pub fn index_under_pointer(rotation_degrees: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let section = section_angle_degrees(count);
    let offset = (-rotation_degrees).rem_euclid(360.0);
    ((offset / section) as usize).min(count - 1)
}

/// 均匀随机抽取一个选项；选项为空时返回 None
pub fn spin<R: Rng + ?Sized>(options: &[String], rng: &mut R) -> Option<SpinOutcome> {
    if options.is_empty() {
        return None;
    }
    let index = rng.random_range(0..options.len());
    Some(SpinOutcome {
        index,
        result: options[index].clone(),
        rotation_degrees: rotation_for_index(index, options.len()),
    })
}
