//! # arenaship
//!
//! ターン制アリーナ対戦における自律艦艇の意思決定コアです。
//!
//! 毎ティック、自機状態と（あれば）レーダー走査結果を受け取り、
//! 修理・旋回・魚雷発射・走査要求・待機のいずれか1つのコマンドを返します。
//!
//! - [`models`]: 判断パイプライン（分類・目標選定・交戦判定・自己保存・統括）
//! - [`scenario`]: YAMLシナリオ（調整パラメータとティック列）の読み込み
//! - [`replay`]: シナリオのティック列をコントローラで再生
//! - [`logging`]: 診断出力のサブスクライバ初期化

pub mod logging;
pub mod models;
pub mod replay;
pub mod scenario;
