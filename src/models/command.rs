use std::fmt;
use std::str::FromStr;

/// 魚雷の発射管
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorpedoTube {
    /// 前方発射管（'F'）
    Front,
    /// 後方発射管（'B'）
    Back,
}

impl TorpedoTube {
    /// 外部環境に渡す発射管指定子
    pub fn designator(&self) -> char {
        match self {
            TorpedoTube::Front => 'F',
            TorpedoTube::Back => 'B',
        }
    }
}

/// 1ティックに1つだけ出力される艦艇コマンド
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// 指定量の修理
    Repair(u32),
    /// 指定角度（度、正は反時計回り）の旋回
    Rotate(f64),
    /// 魚雷発射
    FireTorpedo(TorpedoTube),
    /// レーダー走査要求（走査レベル）
    ScanRequest(u32),
    /// 指定秒数の待機
    Idle(f64),
}

impl Command {
    /// コマンドの種類を取得
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Repair(_) => CommandKind::Repair,
            Command::Rotate(_) => CommandKind::Rotate,
            Command::FireTorpedo(_) => CommandKind::FireTorpedo,
            Command::ScanRequest(_) => CommandKind::ScanRequest,
            Command::Idle(_) => CommandKind::Idle,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Repair(amount) => write!(f, "Repair({})", amount),
            Command::Rotate(delta) => write!(f, "Rotate({:.2})", delta),
            Command::FireTorpedo(tube) => write!(f, "FireTorpedo('{}')", tube.designator()),
            Command::ScanRequest(level) => write!(f, "ScanRequest({})", level),
            Command::Idle(duration) => write!(f, "Idle({})", duration),
        }
    }
}

/// コマンドの種類（ペイロードなし）
///
/// 統計集計とシナリオの期待値照合に使用します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    Repair,
    Rotate,
    FireTorpedo,
    ScanRequest,
    Idle,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Repair,
        CommandKind::Rotate,
        CommandKind::FireTorpedo,
        CommandKind::ScanRequest,
        CommandKind::Idle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Repair => "repair",
            CommandKind::Rotate => "rotate",
            CommandKind::FireTorpedo => "fire",
            CommandKind::ScanRequest => "scan",
            CommandKind::Idle => "idle",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "repair" => Ok(CommandKind::Repair),
            "rotate" => Ok(CommandKind::Rotate),
            "fire" | "fire_torpedo" | "firetorpedo" => Ok(CommandKind::FireTorpedo),
            "scan" | "scan_request" | "radar" => Ok(CommandKind::ScanRequest),
            "idle" => Ok(CommandKind::Idle),
            _ => Err(format!("無効なコマンド種別: {}. 利用可能: repair, rotate, fire, scan, idle", s)),
        }
    }
}
