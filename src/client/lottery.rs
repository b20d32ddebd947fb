use super::api::{ApiClient, ClientError, ClientResult};
use crate::models::{LotteryRecordResponse, WheelConfigResponse};
use crate::utils::wheel::{Segment, SpinOutcome, segments, spin};

/// 本地抽奖后把结果写入抽奖历史
///
/// 返回的 `rotation_degrees` 供界面播放旋转动画，动画结束后展示 `result`。
pub async fn spin_and_record(
    api: &ApiClient,
    wheel: &WheelConfigResponse,
) -> ClientResult<(SpinOutcome, LotteryRecordResponse)> {
    let outcome = local_spin(wheel)?;
    let record = api
        .create_lottery_record(&wheel.id, &wheel.name, &outcome.result)
        .await?;
    Ok((outcome, record))
}

/// 绘制轮盘用的扇区及其文字
pub fn wheel_layout(wheel: &WheelConfigResponse) -> Vec<(Segment, &str)> {
    segments(wheel.options.len())
        .into_iter()
        .zip(wheel.options.iter().map(String::as_str))
        .collect()
}

fn local_spin(wheel: &WheelConfigResponse) -> ClientResult<SpinOutcome> {
    let too_few = || ClientError::Validation("请至少添加2个选项".to_string());
    if wheel.options.len() < 2 {
        return Err(too_few());
    }
    let mut rng = rand::rng();
    spin(&wheel.options, &mut rng).ok_or_else(too_few)
}
