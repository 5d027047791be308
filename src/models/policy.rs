use crate::models::common::*;

/// 意思決定の調整パラメータ
///
/// コントローラ生成時に一度だけ決定され、以降は変更されません。
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// 射撃許容角の下限（度）
    pub min_angle_buffer: f64,
    /// 射撃許容角の上限（度）
    pub max_angle_buffer: f64,
    /// 旋回補正角（度）
    pub rotation_bias: f64,
    /// 最適射程
    pub optimal_firing_range: f64,
    /// 最適射程を射撃判定に使用するか（既定: 使用しない）
    pub enforce_firing_range: bool,
    /// 緊急修理の閾値（%）
    pub critical_health: f64,
    /// 警告の閾値（%）
    pub warning_health: f64,
    /// 修理量
    pub repair_amount: u32,
    /// 走査要求レベル
    pub scan_level: u32,
    /// 待機時間（秒）
    pub idle_duration: f64,
    /// 未来位置予測の時間幅（ティック）
    pub intercept_horizon: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_angle_buffer: MIN_ANGLE_BUFFER,
            max_angle_buffer: MAX_ANGLE_BUFFER,
            rotation_bias: ROTATION_BIAS,
            optimal_firing_range: OPTIMAL_FIRING_RANGE,
            enforce_firing_range: false,
            critical_health: CRITICAL_HEALTH,
            warning_health: WARNING_HEALTH,
            repair_amount: REPAIR_AMOUNT,
            scan_level: SCAN_LEVEL,
            idle_duration: IDLE_DURATION,
            intercept_horizon: INTERCEPT_HORIZON,
        }
    }
}

impl PolicyConfig {
    /// 角度差が射撃許容範囲内（両端を含む）かどうか
    pub fn is_within_firing_window(&self, delta: f64) -> bool {
        self.min_angle_buffer <= delta && delta <= self.max_angle_buffer
    }

    /// 射程制限を考慮して射撃可能な距離かどうか
    pub fn is_within_firing_range(&self, distance: f64) -> bool {
        !self.enforce_firing_range || distance <= self.optimal_firing_range
    }
}
