//! # Replay モジュール
//!
//! シナリオに記述されたティック列を意思決定コントローラに順に入力し、
//! 出力されたコマンドを記録・集計するリプレイエンジンを提供します。
//!
//! ## 主要機能
//!
//! - **ティック再生**: シナリオの各ティックをスナップショットに変換してコントローラへ入力
//! - **期待値照合**: `expect` が指定されたティックでコマンド種別を照合
//! - **統計集計**: コマンド種別ごとの出力回数と不一致数
//!
//! ## 使用例
//!
//! ```no_run
//! use arenaship::replay::ReplayEngine;
//! use arenaship::scenario::ScenarioConfig;
//!
//! let config = ScenarioConfig::from_file("scenarios/basic_engagement.yaml")?;
//! let mut engine = ReplayEngine::new(config, 1);
//! let stats = engine.run();
//! println!("不一致: {}", stats.mismatches);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;
use tracing::{debug, info, trace, warn};

use crate::models::{Command, CommandKind, IShipController, ShipController};
use crate::scenario::ScenarioConfig;

/// 1ティック分の再生結果
#[derive(Debug, Clone, PartialEq)]
pub struct TickRecord {
    pub tick: usize,
    pub command: Command,
    pub expected: Option<CommandKind>,
}

impl TickRecord {
    /// 期待値と一致しているか（期待値なしの場合は一致扱い）
    pub fn matches_expectation(&self) -> bool {
        self.expected.is_none_or(|kind| kind == self.command.kind())
    }
}

/// 再生統計
#[derive(Debug, Clone, Default)]
pub struct ReplayStats {
    /// 再生したティック数
    pub ticks: usize,
    /// コマンド種別ごとの出力回数
    pub command_counts: BTreeMap<CommandKind, usize>,
    /// 期待値が指定されたティック数
    pub checked: usize,
    /// 期待値と一致しなかったティック数
    pub mismatches: usize,
}

impl ReplayStats {
    pub fn count(&self, kind: CommandKind) -> usize {
        self.command_counts.get(&kind).copied().unwrap_or(0)
    }

    fn record(&mut self, record: &TickRecord) {
        self.ticks += 1;
        *self.command_counts.entry(record.command.kind()).or_insert(0) += 1;
        if record.expected.is_some() {
            self.checked += 1;
            if !record.matches_expectation() {
                self.mismatches += 1;
            }
        }
    }
}

pub struct ReplayEngine {
    pub controller: ShipController,
    pub scenario_config: ScenarioConfig,
    pub verbose_level: u8,
    pub records: Vec<TickRecord>,
}

impl ReplayEngine {
    pub fn new(scenario: ScenarioConfig, verbose_level: u8) -> Self {
        let controller = ShipController::new(scenario.to_registration(), scenario.to_policy());

        Self {
            controller,
            scenario_config: scenario,
            verbose_level,
            records: Vec::new(),
        }
    }

    /// 全ティックを再生して統計を返す
    pub fn run(&mut self) -> ReplayStats {
        let registration = self.controller.registration();
        info!("=== リプレイ開始: {} ===", self.scenario_config.meta.name);
        info!("登録: {} (サイズ: {})", registration.name, registration.size);

        self.records.clear();
        let mut stats = ReplayStats::default();

        for (index, tick) in self.scenario_config.ticks.iter().enumerate() {
            let snapshot = tick.to_snapshot();
            let command = self.controller.next_command(&snapshot);

            // 期待値は検証済み
            let expected = tick.expected_kind().ok().flatten();
            let record = TickRecord { tick: index, command, expected };

            if self.verbose_level > 0 {
                info!("ティック {}: {}", index, command);
            } else {
                debug!("ティック {}: {}", index, command);
            }
            if self.verbose_level > 2 {
                trace!("ティック {} 入力: {:?}", index, snapshot);
            }

            if !record.matches_expectation() {
                if let Some(kind) = record.expected {
                    warn!("ティック {}: 期待値 {} に対し {} を出力", index, kind, command);
                }
            }

            stats.record(&record);
            self.records.push(record);
        }

        info!("=== リプレイ完了 ===");
        info!("総ティック数: {}", stats.ticks);
        for kind in CommandKind::ALL {
            if stats.count(kind) > 0 {
                info!("  {}: {}", kind, stats.count(kind));
            }
        }
        if stats.checked > 0 {
            info!("期待値照合: {}/{} 一致", stats.checked - stats.mismatches, stats.checked);
        }

        stats
    }
}
