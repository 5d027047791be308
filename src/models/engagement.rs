use tracing::{debug, info};

use crate::models::{
    command::{Command, TorpedoTube},
    common::{math_utils, AgentStatus, Position2D},
    policy::PolicyConfig,
    sensor::ScanEntry,
};

/// 魚雷到達時点での敵艦の予測位置
///
/// 飛翔時間は距離によらず予測時間幅（既定1ティック）とみなします。
pub fn predict_position(enemy: &ScanEntry, horizon: f64) -> Position2D {
    math_utils::extrapolate(enemy.position, enemy.speed, enemy.movement_direction, horizon)
}

/// 交戦判定
///
/// 予測位置への角度差が射撃許容範囲内なら魚雷発射、範囲外なら予測位置への旋回を返します。
/// 旋回は1回分の修正のみで、収束は以降のティックの再評価に任せます。
/// 射程制限が有効で最適射程外の場合、または角度差が非有限の場合はNoneを返します。
pub fn evaluate(ship: &AgentStatus, enemy: &ScanEntry, policy: &PolicyConfig) -> Option<Command> {
    let future_position = predict_position(enemy, policy.intercept_horizon);
    let delta = math_utils::angular_difference(ship, future_position);

    if !delta.is_finite() {
        debug!(target_name = %enemy.name, "角度差が非有限のため交戦を見送り");
        return None;
    }

    if !policy.is_within_firing_range(math_utils::distance(ship.position, enemy.position)) {
        debug!(target_name = %enemy.name, "最適射程外のため交戦を見送り");
        return None;
    }

    if policy.is_within_firing_window(delta) {
        info!(target_name = %enemy.name, delta, "射撃!");
        Some(Command::FireTorpedo(TorpedoTube::Front))
    } else {
        debug!(target_name = %enemy.name, delta, "射撃角外のため旋回");
        Some(Command::Rotate(delta + policy.rotation_bias))
    }
}
