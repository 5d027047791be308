use crate::models::{
    common::{math_utils, AgentStatus},
    sensor::ScanEntry,
};

/// 最寄りの目標を選定
///
/// 自機からの距離が最小のエントリを返します。同距離の場合は走査順で先のエントリを優先します。
/// 候補が空の場合はNoneを返します。候補の順序は変更しません。
pub fn select_nearest<'a, I>(ship: &AgentStatus, candidates: I) -> Option<&'a ScanEntry>
where
    I: IntoIterator<Item = &'a ScanEntry>,
{
    let mut best: Option<(&'a ScanEntry, f64)> = None;

    for candidate in candidates {
        let distance = math_utils::distance(ship.position, candidate.position);
        match best {
            // 厳密に近い場合のみ更新（同距離は先着優先）
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(entry, _)| entry)
}
