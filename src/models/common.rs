use std::ops::{Add, Mul, Sub};

/// 射撃許容角の下限（度）
pub const MIN_ANGLE_BUFFER: f64 = -7.0;
/// 射撃許容角の上限（度）
pub const MAX_ANGLE_BUFFER: f64 = 7.0;
/// 旋回指令に加算する補正角（度）
pub const ROTATION_BIAS: f64 = 0.0;
/// 最適射程（距離単位）。既定では射撃判定に使用しない
pub const OPTIMAL_FIRING_RANGE: f64 = 300.0;
/// この値未満の耐久度で緊急修理を行う
pub const CRITICAL_HEALTH: f64 = 10.0;
/// この値未満の耐久度で警告を出す
pub const WARNING_HEALTH: f64 = 50.0;
/// 緊急修理量
pub const REPAIR_AMOUNT: u32 = 50;
/// レーダー走査要求のレベル
pub const SCAN_LEVEL: u32 = 5;
/// 待機時間（秒）
pub const IDLE_DURATION: f64 = 0.1;
/// 未来位置予測の時間幅（ティック）
pub const INTERCEPT_HORIZON: f64 = 1.0;

/// 2次元位置を表す構造体
///
/// 角度の基準は +X 軸を 0 度とし、反時計回りを正とします。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// ユークリッド距離を計算
    pub fn distance(&self, other: &Position2D) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// 自位置から他位置への方位角（度、(-180, 180]）
    pub fn angle_to(&self, other: &Position2D) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }

    /// 全成分が有限値かどうか
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Position2D {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Position2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Position2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// 自機の状態スナップショット
///
/// 外部環境が所有し、コアは毎ティック読み取り専用で受け取ります。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentStatus {
    /// 現在位置
    pub position: Position2D,
    /// 機首方位（度）
    pub orientation: f64,
    /// 耐久度（%、0〜100）
    pub health: f64,
    /// 速さ（距離単位/ティック）
    pub speed: f64,
    /// 移動方向（度）
    pub movement_direction: f64,
}

impl AgentStatus {
    /// 停止状態の自機を作成
    pub fn new(position: Position2D, orientation: f64, health: f64) -> Self {
        Self {
            position,
            orientation,
            health,
            speed: 0.0,
            movement_direction: 0.0,
        }
    }
}

/// 幾何計算ユーティリティ
pub mod math_utils {
    use super::{AgentStatus, Position2D};

    /// 度をラジアンに変換
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees.to_radians()
    }

    /// ラジアンを度に変換
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians.to_degrees()
    }

    /// 角度を(-180度, 180度]の範囲に正規化
    pub fn normalize_angle(angle_deg: f64) -> f64 {
        let mut normalized = angle_deg % 360.0;
        if normalized > 180.0 {
            normalized -= 360.0;
        } else if normalized <= -180.0 {
            normalized += 360.0;
        }
        normalized
    }

    /// fromからtoへの方位角（度）
    pub fn angle_to(from: Position2D, to: Position2D) -> f64 {
        debug_assert!(from.is_finite() && to.is_finite(), "非有限の座標: {:?} -> {:?}", from, to);
        from.angle_to(&to)
    }

    /// 自機の機首方位から目標点までの符号付き角度差（度、(-180, 180]）
    ///
    /// 正の値は反時計回りの旋回を意味します。旋回指令と正対判定の両方に使用します。
    pub fn angular_difference(ship: &AgentStatus, point: Position2D) -> f64 {
        debug_assert!(ship.orientation.is_finite(), "非有限の機首方位: {}", ship.orientation);
        normalize_angle(angle_to(ship.position, point) - ship.orientation)
    }

    /// 2点間のユークリッド距離
    pub fn distance(a: Position2D, b: Position2D) -> f64 {
        debug_assert!(a.is_finite() && b.is_finite(), "非有限の座標: {:?}, {:?}", a, b);
        a.distance(&b)
    }

    /// 等速直線運動を仮定した未来位置の外挿
    ///
    /// 一次近似のため、高速または旋回中の目標では誤差が大きくなります。
    pub fn extrapolate(position: Position2D, speed: f64, direction_deg: f64, time_units: f64) -> Position2D {
        debug_assert!(speed.is_finite() && direction_deg.is_finite(), "非有限の運動量: speed={}, direction={}", speed, direction_deg);
        let heading = deg_to_rad(direction_deg);
        let travel = speed * time_units;
        Position2D::new(
            position.x + travel * heading.cos(),
            position.y + travel * heading.sin(),
        )
    }
}
