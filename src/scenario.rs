use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::models::{
    AgentStatus, CommandKind, ObjectCategory, PolicyConfig, Position2D as ModelPosition2D,
    RegistrationData, ScanEntry, Snapshot,
};

/// シナリオメタデータ
#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioMeta {
    pub version: String,
    pub name: String,
    pub description: String,
}

/// 登録情報設定
#[derive(Debug, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub name: String,
    pub color: [f32; 3],
    pub size: u32,
}

/// 意思決定パラメータの上書き設定
///
/// 省略した項目は既定値（定数）を使用します。
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicySection {
    pub min_angle_buffer_deg: Option<f64>,
    pub max_angle_buffer_deg: Option<f64>,
    pub rotation_bias_deg: Option<f64>,
    pub optimal_firing_range: Option<f64>,
    pub enforce_firing_range: Option<bool>,
    pub critical_health_pct: Option<f64>,
    pub warning_health_pct: Option<f64>,
    pub repair_amount: Option<u32>,
    pub scan_level: Option<u32>,
    pub idle_duration_s: Option<f64>,
    pub intercept_horizon_ticks: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

/// 自機状態設定
#[derive(Debug, Deserialize, Serialize)]
pub struct StatusConfig {
    pub pos: Position2D,
    pub orientation_deg: f64,
    pub health_pct: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub movement_direction_deg: f64,
}

/// 走査エントリ設定
#[derive(Debug, Deserialize, Serialize)]
pub struct ScanEntryConfig {
    pub name: String,
    pub r#type: String, // "type"はRustのキーワードなのでr#でエスケープ
    pub pos: Position2D,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub movement_direction_deg: f64,
}

/// 1ティック分の入力設定
#[derive(Debug, Deserialize, Serialize)]
pub struct TickConfig {
    pub status: StatusConfig,
    /// 省略時は走査結果なし
    pub scan: Option<Vec<ScanEntryConfig>>,
    /// 期待するコマンド種別（repair, rotate, fire, scan, idle）
    pub expect: Option<String>,
}

/// 完全なシナリオ設定
#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioConfig {
    pub meta: ScenarioMeta,
    pub identity: Option<IdentityConfig>,
    #[serde(default)]
    pub policy: PolicySection,
    pub ticks: Vec<TickConfig>,
}

impl From<Position2D> for ModelPosition2D {
    fn from(pos: Position2D) -> Self {
        ModelPosition2D::new(pos.x, pos.y)
    }
}

impl TickConfig {
    /// モデルのスナップショットに変換
    pub fn to_snapshot(&self) -> Snapshot {
        let status = AgentStatus {
            position: self.status.pos.into(),
            orientation: self.status.orientation_deg,
            health: self.status.health_pct,
            speed: self.status.speed,
            movement_direction: self.status.movement_direction_deg,
        };

        let scan = self.scan.as_ref().map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    ScanEntry::new(
                        entry.name.clone(),
                        ObjectCategory::from_tag(&entry.r#type),
                        entry.pos.into(),
                    )
                    .with_motion(entry.speed, entry.movement_direction_deg)
                })
                .collect()
        });

        Snapshot::new(status, scan)
    }

    /// 期待コマンド種別の解析
    pub fn expected_kind(&self) -> Result<Option<CommandKind>, ScenarioError> {
        self.expect
            .as_deref()
            .map(|s| CommandKind::from_str(s).map_err(ScenarioError::ValidationError))
            .transpose()
    }
}

impl ScenarioConfig {
    /// YAMLファイルからシナリオ設定を読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();

        // ファイル存在チェック
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.to_path_buf()));
        }

        // ファイル読み込み
        let contents = fs::read_to_string(path)
            .map_err(|e| ScenarioError::IoError(path.to_path_buf(), e))?;

        // YAML解析
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .map_err(|e| ScenarioError::ParseError(path.to_path_buf(), e))?;

        config.validate()?;

        Ok(config)
    }

    /// YAML文字列からシナリオ設定を読み込み
    pub fn from_yaml_str(contents: &str) -> Result<Self, ScenarioError> {
        let config: ScenarioConfig = serde_yaml::from_str(contents)
            .map_err(|e| ScenarioError::ParseError(std::path::PathBuf::from("<inline>"), e))?;

        config.validate()?;

        Ok(config)
    }

    /// 既定値に上書き設定を適用した意思決定パラメータ
    pub fn to_policy(&self) -> PolicyConfig {
        let defaults = PolicyConfig::default();
        let section = &self.policy;

        PolicyConfig {
            min_angle_buffer: section.min_angle_buffer_deg.unwrap_or(defaults.min_angle_buffer),
            max_angle_buffer: section.max_angle_buffer_deg.unwrap_or(defaults.max_angle_buffer),
            rotation_bias: section.rotation_bias_deg.unwrap_or(defaults.rotation_bias),
            optimal_firing_range: section.optimal_firing_range.unwrap_or(defaults.optimal_firing_range),
            enforce_firing_range: section.enforce_firing_range.unwrap_or(defaults.enforce_firing_range),
            critical_health: section.critical_health_pct.unwrap_or(defaults.critical_health),
            warning_health: section.warning_health_pct.unwrap_or(defaults.warning_health),
            repair_amount: section.repair_amount.unwrap_or(defaults.repair_amount),
            scan_level: section.scan_level.unwrap_or(defaults.scan_level),
            idle_duration: section.idle_duration_s.unwrap_or(defaults.idle_duration),
            intercept_horizon: section.intercept_horizon_ticks.unwrap_or(defaults.intercept_horizon),
        }
    }

    /// 登録情報（省略時は既定値）
    pub fn to_registration(&self) -> RegistrationData {
        match &self.identity {
            Some(identity) => RegistrationData {
                name: identity.name.clone(),
                color: (identity.color[0], identity.color[1], identity.color[2]),
                size: identity.size,
            },
            None => RegistrationData::default(),
        }
    }

    /// 設定の基本的な検証
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.validate_policy()?;

        // 登録情報の検証
        if let Some(identity) = &self.identity {
            if identity.name.trim().is_empty() {
                return Err(ScenarioError::ValidationError("identity name must not be empty".to_string()));
            }
            if identity.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ScenarioError::ValidationError(
                    format!("identity color {:?} must be within [0, 1]", identity.color)
                ));
            }
        }

        if self.ticks.is_empty() {
            return Err(ScenarioError::ValidationError("scenario has no ticks".to_string()));
        }

        for (index, tick) in self.ticks.iter().enumerate() {
            self.validate_tick(index, tick)?;
        }

        Ok(())
    }

    fn validate_policy(&self) -> Result<(), ScenarioError> {
        let policy = self.to_policy();

        let values = [
            policy.min_angle_buffer,
            policy.max_angle_buffer,
            policy.rotation_bias,
            policy.optimal_firing_range,
            policy.critical_health,
            policy.warning_health,
            policy.idle_duration,
            policy.intercept_horizon,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ScenarioError::ValidationError("policy values must be finite".to_string()));
        }

        // 射撃許容角の検証
        if policy.min_angle_buffer > policy.max_angle_buffer {
            return Err(ScenarioError::ValidationError(
                format!("min_angle_buffer_deg {} > max_angle_buffer_deg {}",
                        policy.min_angle_buffer, policy.max_angle_buffer)
            ));
        }

        // 耐久度閾値の検証
        if !(0.0..=100.0).contains(&policy.critical_health) || !(0.0..=100.0).contains(&policy.warning_health) {
            return Err(ScenarioError::ValidationError("health thresholds must be within [0, 100]".to_string()));
        }
        if policy.critical_health > policy.warning_health {
            return Err(ScenarioError::ValidationError(
                format!("critical_health_pct {} > warning_health_pct {}",
                        policy.critical_health, policy.warning_health)
            ));
        }

        if policy.optimal_firing_range <= 0.0 {
            return Err(ScenarioError::ValidationError("optimal_firing_range must be positive".to_string()));
        }
        if policy.idle_duration <= 0.0 {
            return Err(ScenarioError::ValidationError("idle_duration_s must be positive".to_string()));
        }
        if policy.intercept_horizon < 0.0 {
            return Err(ScenarioError::ValidationError("intercept_horizon_ticks must not be negative".to_string()));
        }

        Ok(())
    }

    fn validate_tick(&self, index: usize, tick: &TickConfig) -> Result<(), ScenarioError> {
        let status = &tick.status;

        if !(0.0..=100.0).contains(&status.health_pct) {
            return Err(ScenarioError::ValidationError(
                format!("tick {}: health_pct {} must be within [0, 100]", index, status.health_pct)
            ));
        }

        let status_values = [
            status.pos.x,
            status.pos.y,
            status.orientation_deg,
            status.speed,
            status.movement_direction_deg,
        ];
        if status_values.iter().any(|v| !v.is_finite()) {
            return Err(ScenarioError::ValidationError(
                format!("tick {}: status values must be finite", index)
            ));
        }

        for entry in tick.scan.iter().flatten() {
            let entry_values = [entry.pos.x, entry.pos.y, entry.speed, entry.movement_direction_deg];
            if entry_values.iter().any(|v| !v.is_finite()) {
                return Err(ScenarioError::ValidationError(
                    format!("tick {}: scan entry {} has non-finite values", index, entry.name)
                ));
            }
        }

        tick.expected_kind()
            .map_err(|e| ScenarioError::ValidationError(format!("tick {}: {}", index, e)))?;

        Ok(())
    }

    /// シナリオの概要を表示
    pub fn print_summary(&self) {
        let policy = self.to_policy();
        let registration = self.to_registration();

        println!("=== シナリオ情報 ===");
        println!("名前: {}", self.meta.name);
        println!("説明: {}", self.meta.description);
        println!("バージョン: {}", self.meta.version);
        println!();

        println!("=== 登録情報 ===");
        println!("艦名: {}", registration.name);
        println!("色: ({:.2}, {:.2}, {:.2})", registration.color.0, registration.color.1, registration.color.2);
        println!("サイズ: {}", registration.size);
        println!();

        println!("=== 意思決定パラメータ ===");
        println!("射撃許容角: [{:.1}, {:.1}]度", policy.min_angle_buffer, policy.max_angle_buffer);
        println!("旋回補正: {:.1}度", policy.rotation_bias);
        println!("最適射程: {:.0} ({})", policy.optimal_firing_range,
                 if policy.enforce_firing_range { "適用" } else { "未適用" });
        println!("緊急修理閾値: {:.0}% / 警告閾値: {:.0}%", policy.critical_health, policy.warning_health);
        println!();

        println!("=== ティック ===");
        println!("ティック数: {}", self.ticks.len());
        let scanned = self.ticks.iter().filter(|t| t.scan.is_some()).count();
        println!("走査結果あり: {}", scanned);
        let expectations = self.ticks.iter().filter(|t| t.expect.is_some()).count();
        println!("期待値付き: {}", expectations);
    }
}

/// シナリオ読み込みエラー
#[derive(Debug)]
pub enum ScenarioError {
    FileNotFound(std::path::PathBuf),
    IoError(std::path::PathBuf, std::io::Error),
    ParseError(std::path::PathBuf, serde_yaml::Error),
    ValidationError(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::FileNotFound(path) => {
                write!(f, "シナリオファイルが見つかりません: {}", path.display())
            }
            ScenarioError::IoError(path, err) => {
                write!(f, "ファイル読み込みエラー {}: {}", path.display(), err)
            }
            ScenarioError::ParseError(path, err) => {
                write!(f, "YAML解析エラー {}: {}", path.display(), err)
            }
            ScenarioError::ValidationError(msg) => {
                write!(f, "設定検証エラー: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScenarioError {}
