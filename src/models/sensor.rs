use std::collections::HashMap;
use std::fmt;
use tracing::trace;

use crate::models::common::Position2D;

/// レーダー探知物体の分類タグ
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    /// 艦艇（敵艦として扱う）
    Ship,
    /// 小惑星
    Asteroid,
    /// 惑星
    Planet,
    /// 魚雷
    Torpedo,
    /// その他の物体（タグ名をそのまま保持）
    Other(String),
}

impl ObjectCategory {
    /// 外部センサーのタグ文字列から分類を決定
    ///
    /// 既知のタグは大文字小文字を区別しません。未知のタグはOtherとして保持します。
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "ship" => ObjectCategory::Ship,
            "asteroid" => ObjectCategory::Asteroid,
            "planet" => ObjectCategory::Planet,
            "torpedo" => ObjectCategory::Torpedo,
            _ => ObjectCategory::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectCategory::Ship => f.write_str("Ship"),
            ObjectCategory::Asteroid => f.write_str("Asteroid"),
            ObjectCategory::Planet => f.write_str("Planet"),
            ObjectCategory::Torpedo => f.write_str("Torpedo"),
            ObjectCategory::Other(tag) => f.write_str(tag),
        }
    }
}

/// レーダー走査結果の1エントリ
#[derive(Debug, Clone, PartialEq)]
pub struct ScanEntry {
    /// 物体名
    pub name: String,
    /// 分類
    pub category: ObjectCategory,
    /// 位置
    pub position: Position2D,
    /// 速さ（距離単位/ティック）
    pub speed: f64,
    /// 移動方向（度）
    pub movement_direction: f64,
}

impl ScanEntry {
    pub fn new(name: impl Into<String>, category: ObjectCategory, position: Position2D) -> Self {
        Self {
            name: name.into(),
            category,
            position,
            speed: 0.0,
            movement_direction: 0.0,
        }
    }

    /// 運動量を設定したエントリを返す
    pub fn with_motion(mut self, speed: f64, movement_direction: f64) -> Self {
        self.speed = speed;
        self.movement_direction = movement_direction;
        self
    }
}

/// 分類済みの走査結果
///
/// 元の走査結果を借用するため、ティックを越えて保持することはできません。
/// 各グループ内の順序は走査順を保持します。
#[derive(Debug, Default)]
pub struct ScanGroups<'a> {
    groups: HashMap<ObjectCategory, Vec<&'a ScanEntry>>,
    total: usize,
}

impl<'a> ScanGroups<'a> {
    /// 走査結果を分類タグごとに分割
    ///
    /// 距離や脅威度による絞り込みは行いません。
    pub fn classify(entries: &'a [ScanEntry]) -> Self {
        let mut groups: HashMap<ObjectCategory, Vec<&'a ScanEntry>> = HashMap::new();

        for entry in entries {
            groups
                .entry(entry.category.clone())
                .or_default()
                .push(entry);
        }

        Self {
            groups,
            total: entries.len(),
        }
    }

    /// 指定分類のエントリ（走査順）
    pub fn get(&self, category: &ObjectCategory) -> &[&'a ScanEntry] {
        self.groups
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn enemy_ships(&self) -> &[&'a ScanEntry] {
        self.get(&ObjectCategory::Ship)
    }

    pub fn asteroids(&self) -> &[&'a ScanEntry] {
        self.get(&ObjectCategory::Asteroid)
    }

    pub fn planets(&self) -> &[&'a ScanEntry] {
        self.get(&ObjectCategory::Planet)
    }

    /// 分類前の総エントリ数
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// 存在する分類の数
    pub fn category_count(&self) -> usize {
        self.groups.len()
    }
}

/// 走査結果の全エントリをトレースログに出力
pub fn log_scan_entries(entries: &[ScanEntry]) {
    for entry in entries {
        trace!(
            name = %entry.name,
            category = %entry.category,
            x = entry.position.x,
            y = entry.position.y,
            "走査エントリ"
        );
    }
    trace!("走査エントリ数: {}", entries.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, tag: &str) -> ScanEntry {
        ScanEntry::new(name, ObjectCategory::from_tag(tag), Position2D::new(0.0, 0.0))
    }

    #[test]
    fn test_category_from_tag() {
        assert_eq!(ObjectCategory::from_tag("Ship"), ObjectCategory::Ship);
        assert_eq!(ObjectCategory::from_tag("ASTEROID"), ObjectCategory::Asteroid);
        assert_eq!(ObjectCategory::from_tag("planet"), ObjectCategory::Planet);
        assert_eq!(ObjectCategory::from_tag("Nebula"), ObjectCategory::Other("Nebula".to_string()));
    }

    #[test]
    fn test_classify_partitions_and_preserves_order() {
        let scan = vec![
            entry("rock-1", "Asteroid"),
            entry("enemy-a", "Ship"),
            entry("earth", "Planet"),
            entry("enemy-b", "Ship"),
            entry("rock-2", "Asteroid"),
            entry("cloud", "Nebula"),
        ];

        let groups = ScanGroups::classify(&scan);

        let ships: Vec<&str> = groups.enemy_ships().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(ships, vec!["enemy-a", "enemy-b"]);
        let rocks: Vec<&str> = groups.asteroids().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(rocks, vec!["rock-1", "rock-2"]);
        assert_eq!(groups.planets().len(), 1);
        assert_eq!(groups.get(&ObjectCategory::Other("Nebula".to_string())).len(), 1);
        assert_eq!(groups.len(), 6);
        assert_eq!(groups.category_count(), 4);
    }

    #[test]
    fn test_classify_empty_scan() {
        let groups = ScanGroups::classify(&[]);
        assert!(groups.is_empty());
        assert!(groups.enemy_ships().is_empty());
        assert!(groups.get(&ObjectCategory::Torpedo).is_empty());
    }
}
