use arenaship::logging::{self, LogConfig, LogOutput};
use arenaship::replay::ReplayEngine;
use arenaship::scenario::ScenarioConfig;
use clap::{Arg, Command};
use std::str::FromStr;
use tracing::error;

fn main() {
    // コマンドライン引数の解析
    let matches = Command::new("arenaship")
        .version(env!("CARGO_PKG_VERSION"))
        .about("アリーナ艦艇 意思決定コア (Arena Ship Decision Core)")
        .long_about("自律艦艇の意思決定コアをシナリオのティック列で再生します。\n\
                     各ティックで修理・旋回・射撃・走査・待機のいずれか1つを出力します。")
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("FILE")
                .help("シナリオファイル(.yaml)のパスを指定")
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(clap::ArgAction::SetTrue)
                .help("シナリオの情報のみ表示して終了")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("詳細出力レベル (-v: 基本, -vv: 詳細, -vvv: デバッグ)")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("ログレベル (trace, debug, info, warn, error)")
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("TARGET")
                .default_value("console")
                .value_parser(|s: &str| LogOutput::from_str(s))
                .help("ログ出力先 (console, file, both)")
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .value_name("DIR")
                .default_value("logs")
                .help("ログファイルのディレクトリ")
        )
        .get_matches();

    let verbose_level = matches.get_count("verbose");

    let level = match matches.get_one::<String>("log-level") {
        Some(level) => logging::parse_log_level(level),
        None => logging::level_for_verbosity(verbose_level),
    };
    let log_config = LogConfig {
        level,
        output: matches.get_one::<LogOutput>("log-output").copied().unwrap_or(LogOutput::Console),
        log_dir: matches.get_one::<String>("log-dir").cloned().unwrap_or_else(|| "logs".to_string()),
        ..LogConfig::default()
    };

    // ガードはプログラム終了まで保持
    let _guard = match logging::init_logging(log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("ログ初期化エラー: {}", e);
            std::process::exit(1);
        }
    };

    // シナリオファイルの処理
    if let Some(scenario_path) = matches.get_one::<String>("scenario") {
        match run_scenario(scenario_path, matches.get_flag("info"), verbose_level) {
            Ok(0) => {}
            Ok(mismatches) => {
                error!("期待値と一致しないティックが{}件あります", mismatches);
                std::process::exit(1);
            }
            Err(e) => {
                error!("{}", e);
                eprintln!("エラー: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        show_default_help();
    }
}

/// シナリオファイルを読み込んで再生し、期待値の不一致数を返す
fn run_scenario(scenario_path: &str, info_only: bool, verbose_level: u8) -> Result<usize, Box<dyn std::error::Error>> {
    let scenario = ScenarioConfig::from_file(scenario_path)?;

    if verbose_level > 0 {
        println!("シナリオファイル読み込み完了: {}", scenario_path);
    }

    // 情報表示のみの場合
    if info_only {
        scenario.print_summary();
        return Ok(0);
    }

    let mut engine = ReplayEngine::new(scenario, verbose_level);
    let stats = engine.run();

    for record in &engine.records {
        match record.expected {
            Some(kind) if !record.matches_expectation() => {
                println!("{:>4}: {}  (期待値: {})", record.tick, record.command, kind);
            }
            _ => println!("{:>4}: {}", record.tick, record.command),
        }
    }

    Ok(stats.mismatches)
}

/// デフォルトヘルプとシナリオ一覧を表示
fn show_default_help() {
    println!("使用方法:");
    println!("  arenaship [オプション]");
    println!();
    println!("オプション:");
    println!("  -s, --scenario <FILE>     シナリオファイルを指定して再生");
    println!("  -i, --info                シナリオ情報のみ表示");
    println!("  -v, --verbose             詳細出力 (複数指定で詳細レベル上昇)");
    println!("      --log-level <LEVEL>   ログレベル");
    println!("      --log-output <TARGET> ログ出力先 (console, file, both)");
    println!("      --log-dir <DIR>       ログファイルのディレクトリ");
    println!("  -h, --help                このヘルプを表示");
    println!();
    println!("利用可能なシナリオファイル:");
    println!("  scenarios/basic_engagement.yaml  - 基本的な優先順位の確認");
    println!("  scenarios/pursuit.yaml           - 移動目標への追尾と射撃");
    println!("  scenarios/range_gated.yaml       - 射程制限を有効にした交戦");
    println!();
    println!("例:");
    println!("  arenaship -s scenarios/basic_engagement.yaml");
    println!("  arenaship -s scenarios/pursuit.yaml -v");
    println!("  arenaship -s scenarios/range_gated.yaml -i");
}
