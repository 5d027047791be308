// 基本的なデータ型と幾何ユーティリティ
pub mod common;

// コントローラの基本インターフェース（trait）定義
pub mod traits;

// コマンドと調整パラメータ
pub mod command;
pub mod policy;

// 判断パイプラインの各段
pub mod sensor;
pub mod targeting;
pub mod engagement;
pub mod repair;
pub mod orchestrator;

// 便利な re-export
pub use common::*;
pub use traits::*;
pub use command::{Command, CommandKind, TorpedoTube};
pub use policy::PolicyConfig;
pub use sensor::{ObjectCategory, ScanEntry, ScanGroups};
pub use targeting::select_nearest;
pub use repair::{check_repair, HealthState};
pub use orchestrator::{RegistrationData, ShipController, Snapshot};
