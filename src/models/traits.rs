use crate::models::{command::Command, orchestrator::Snapshot};

/// アリーナホストから毎ティック呼び出される艦艇コントローラのインターフェース
pub trait IShipController {
    /// 1ティック分の判断を行い、コマンドを1つだけ返す
    fn next_command(&self, snapshot: &Snapshot) -> Command;
}
