use tracing::{info, warn};

use crate::models::{command::Command, common::AgentStatus, policy::PolicyConfig};

/// 耐久度による自機の状態区分
///
/// 履歴は持たず、毎ティック耐久度から再計算します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// 緊急修理が必要
    Critical,
    /// 警告（行動は継続）
    Warning,
    /// 正常
    Nominal,
}

impl HealthState {
    pub fn classify(health: f64, policy: &PolicyConfig) -> Self {
        if health < policy.critical_health {
            HealthState::Critical
        } else if health < policy.warning_health {
            HealthState::Warning
        } else {
            HealthState::Nominal
        }
    }
}

/// 自己保存判定
///
/// 耐久度が緊急閾値未満なら修理コマンドを返し、他の全ての判断に優先させます。
/// 警告域では警告ログのみ出力してNoneを返します。
pub fn check_repair(ship: &AgentStatus, policy: &PolicyConfig) -> Option<Command> {
    match HealthState::classify(ship.health, policy) {
        HealthState::Critical => {
            info!(health = ship.health, "緊急修理中...");
            Some(Command::Repair(policy.repair_amount))
        }
        HealthState::Warning => {
            warn!(health = ship.health, "警告: 耐久度が{}%を下回っています", policy.warning_health);
            None
        }
        HealthState::Nominal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Position2D;

    fn ship_with_health(health: f64) -> AgentStatus {
        AgentStatus::new(Position2D::new(0.0, 0.0), 0.0, health)
    }

    #[test]
    fn test_health_state_bands() {
        let policy = PolicyConfig::default();
        assert_eq!(HealthState::classify(0.0, &policy), HealthState::Critical);
        assert_eq!(HealthState::classify(9.99, &policy), HealthState::Critical);
        assert_eq!(HealthState::classify(10.0, &policy), HealthState::Warning);
        assert_eq!(HealthState::classify(49.9, &policy), HealthState::Warning);
        assert_eq!(HealthState::classify(50.0, &policy), HealthState::Nominal);
        assert_eq!(HealthState::classify(100.0, &policy), HealthState::Nominal);
    }

    #[test]
    fn test_check_repair_critical() {
        let policy = PolicyConfig::default();
        assert_eq!(check_repair(&ship_with_health(5.0), &policy), Some(Command::Repair(50)));
    }

    #[test]
    fn test_check_repair_warning_and_nominal_continue() {
        let policy = PolicyConfig::default();
        assert_eq!(check_repair(&ship_with_health(30.0), &policy), None);
        assert_eq!(check_repair(&ship_with_health(80.0), &policy), None);
    }

    #[test]
    fn test_check_repair_uses_configured_amount() {
        let policy = PolicyConfig {
            repair_amount: 25,
            critical_health: 20.0,
            ..PolicyConfig::default()
        };
        assert_eq!(check_repair(&ship_with_health(15.0), &policy), Some(Command::Repair(25)));
    }
}
