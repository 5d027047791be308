use tracing::debug;

use crate::models::{
    command::Command,
    common::AgentStatus,
    engagement,
    policy::PolicyConfig,
    repair,
    sensor::{log_scan_entries, ScanEntry, ScanGroups},
    targeting,
    traits::IShipController,
};

/// 1ティック分の入力
///
/// 自機状態と、走査要求が完了している場合のみ走査結果を含みます。
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub status: AgentStatus,
    pub scan: Option<Vec<ScanEntry>>,
}

impl Snapshot {
    pub fn new(status: AgentStatus, scan: Option<Vec<ScanEntry>>) -> Self {
        Self { status, scan }
    }
}

/// アリーナへの登録情報（名前・色・サイズ）
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationData {
    pub name: String,
    /// RGB（各0.0〜1.0）
    pub color: (f32, f32, f32),
    pub size: u32,
}

impl Default for RegistrationData {
    fn default() -> Self {
        Self {
            name: "The Normandy".to_string(),
            color: (0.3, 0.1, 0.5),
            size: 10,
        }
    }
}

/// 意思決定コントローラ
///
/// 各ティックで以下の優先順に判断し、最初に成立したコマンドを返します。
///
/// 1. 自己保存（緊急修理）
/// 2. 走査結果がなければ走査要求
/// 3. 最寄りの敵艦に対する交戦（旋回または射撃）
/// 4. 待機
///
/// ティックを越えて保持する状態は登録情報と調整パラメータのみです。
#[derive(Debug, Clone, Default)]
pub struct ShipController {
    registration: RegistrationData,
    policy: PolicyConfig,
}

impl ShipController {
    pub fn new(registration: RegistrationData, policy: PolicyConfig) -> Self {
        Self { registration, policy }
    }

    /// セッション開始時にホストへ渡す登録情報
    pub fn registration(&self) -> &RegistrationData {
        &self.registration
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// 走査結果に基づく攻撃判断
    fn decide_attack(&self, status: &AgentStatus, scan: &[ScanEntry]) -> Option<Command> {
        let groups = ScanGroups::classify(scan);
        let enemies = groups.enemy_ships();

        debug!(
            enemies = enemies.len(),
            asteroids = groups.asteroids().len(),
            planets = groups.planets().len(),
            "走査結果を分類"
        );

        if enemies.is_empty() {
            debug!("敵艦なし");
            return None;
        }

        let target = targeting::select_nearest(status, enemies.iter().copied())?;
        engagement::evaluate(status, target, &self.policy)
    }
}

impl IShipController for ShipController {
    fn next_command(&self, snapshot: &Snapshot) -> Command {
        let status = &snapshot.status;

        if let Some(command) = repair::check_repair(status, &self.policy) {
            return command;
        }

        let Some(scan) = snapshot.scan.as_deref() else {
            debug!("走査結果なし、走査を要求");
            return Command::ScanRequest(self.policy.scan_level);
        };

        log_scan_entries(scan);

        if let Some(command) = self.decide_attack(status, scan) {
            return command;
        }

        Command::Idle(self.policy.idle_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        command::{CommandKind, TorpedoTube},
        common::Position2D,
        sensor::ObjectCategory,
    };
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// ログ出力を捕捉するためのバッファ
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    fn status(health: f64, orientation: f64) -> AgentStatus {
        AgentStatus::new(Position2D::new(0.0, 0.0), orientation, health)
    }

    fn enemy_at_bearing(name: &str, bearing: f64, range: f64) -> ScanEntry {
        let rad = bearing.to_radians();
        ScanEntry::new(
            name,
            ObjectCategory::Ship,
            Position2D::new(range * rad.cos(), range * rad.sin()),
        )
    }

    fn asteroid(x: f64, y: f64) -> ScanEntry {
        ScanEntry::new("rock", ObjectCategory::Asteroid, Position2D::new(x, y))
    }

    #[test]
    fn test_critical_health_repairs_with_enemy_present() {
        let controller = ShipController::default();
        let snapshot = Snapshot::new(status(5.0, 0.0), Some(vec![enemy_at_bearing("e", 0.0, 100.0)]));
        assert_eq!(controller.next_command(&snapshot), Command::Repair(50));
    }

    #[test]
    fn test_critical_health_dominates_every_scan_state() {
        let controller = ShipController::default();
        let scans = vec![
            None,
            Some(vec![]),
            Some(vec![asteroid(5.0, 5.0)]),
            Some(vec![enemy_at_bearing("e", 90.0, 50.0), enemy_at_bearing("f", 2.0, 300.0)]),
        ];
        for health in [0.0, 3.5, 9.999] {
            for scan in &scans {
                let snapshot = Snapshot::new(status(health, 0.0), scan.clone());
                assert_eq!(controller.next_command(&snapshot).kind(), CommandKind::Repair);
            }
        }
    }

    #[test]
    fn test_missing_scan_requests_scan() {
        let controller = ShipController::default();
        for health in [10.0, 30.0, 80.0, 100.0] {
            let snapshot = Snapshot::new(status(health, 0.0), None);
            assert_eq!(controller.next_command(&snapshot), Command::ScanRequest(5));
        }
    }

    #[test]
    fn test_fires_when_nearest_enemy_aligned() {
        let controller = ShipController::default();
        let snapshot = Snapshot::new(status(80.0, 0.0), Some(vec![enemy_at_bearing("e", 3.0, 150.0)]));
        assert_eq!(
            controller.next_command(&snapshot),
            Command::FireTorpedo(TorpedoTube::Front)
        );
    }

    #[test]
    fn test_rotates_toward_misaligned_enemy() {
        let controller = ShipController::default();
        let snapshot = Snapshot::new(status(80.0, 0.0), Some(vec![enemy_at_bearing("e", 45.0, 150.0)]));
        match controller.next_command(&snapshot) {
            Command::Rotate(delta) => assert!((delta - 45.0).abs() < 1e-6),
            other => panic!("Rotateを期待: {:?}", other),
        }
    }

    #[test]
    fn test_engages_nearest_enemy_only() {
        let controller = ShipController::default();
        // 遠い敵は正面、近い敵は90度方向
        let scan = vec![
            enemy_at_bearing("far", 0.0, 900.0),
            enemy_at_bearing("near", 90.0, 100.0),
        ];
        let snapshot = Snapshot::new(status(80.0, 0.0), Some(scan));
        match controller.next_command(&snapshot) {
            Command::Rotate(delta) => assert!((delta - 90.0).abs() < 1e-6),
            other => panic!("Rotateを期待: {:?}", other),
        }
    }

    #[test]
    fn test_idle_without_enemies() {
        let controller = ShipController::default();
        let snapshot = Snapshot::new(status(80.0, 0.0), Some(vec![asteroid(10.0, 0.0)]));
        assert_eq!(controller.next_command(&snapshot), Command::Idle(0.1));

        let empty = Snapshot::new(status(100.0, 0.0), Some(Vec::new()));
        assert_eq!(controller.next_command(&empty), Command::Idle(0.1));
    }

    #[test]
    fn test_low_health_warns_and_continues() {
        let controller = ShipController::default();
        let snapshot = Snapshot::new(status(30.0, 0.0), Some(Vec::new()));

        let (command, logs) = capture_warnings(|| controller.next_command(&snapshot));

        assert_eq!(command, Command::Idle(0.1));
        assert!(logs.contains("WARN"), "警告ログが出力されていない: {}", logs);
        assert!(logs.contains("health=30"), "耐久度が記録されていない: {}", logs);
    }

    #[test]
    fn test_nominal_health_emits_no_warning() {
        let controller = ShipController::default();
        let snapshot = Snapshot::new(status(80.0, 0.0), Some(Vec::new()));

        let (command, logs) = capture_warnings(|| controller.next_command(&snapshot));

        assert_eq!(command, Command::Idle(0.1));
        assert!(logs.is_empty(), "予期しないログ: {}", logs);
    }

    #[test]
    fn test_enforced_range_falls_back_to_idle() {
        let policy = PolicyConfig {
            enforce_firing_range: true,
            ..PolicyConfig::default()
        };
        let controller = ShipController::new(RegistrationData::default(), policy);
        let snapshot = Snapshot::new(status(80.0, 0.0), Some(vec![enemy_at_bearing("e", 0.0, 1000.0)]));
        assert_eq!(controller.next_command(&snapshot), Command::Idle(0.1));
    }

    #[test]
    fn test_default_registration() {
        let controller = ShipController::default();
        let registration = controller.registration();
        assert_eq!(registration.name, "The Normandy");
        assert_eq!(registration.size, 10);
    }
}
