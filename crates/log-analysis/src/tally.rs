//! 삽입 순서를 보존하는 카운터
//!
//! [`Tally`]는 키별 횟수를 세면서 키가 처음 등장한 순서를 기억합니다.
//! 순회, 최댓값 선택의 동률 처리, JSON 직렬화가 모두 이 순서를 따르므로
//! 같은 입력에 대해 항상 같은 결과를 냅니다.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// 키별 횟수 집계 (첫 등장 순서 유지)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// 키 -> entries 인덱스
    index: HashMap<String, usize>,
    /// (키, 횟수), 첫 등장 순서
    entries: Vec<(String, u64)>,
}

impl Tally {
    /// 빈 카운터를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 키의 횟수를 1 증가시킵니다.
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&idx) => self.entries[idx].1 += 1,
            None => {
                self.index.insert(key.to_owned(), self.entries.len());
                self.entries.push((key.to_owned(), 1));
            }
        }
    }

    /// 키의 현재 횟수를 반환합니다.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&idx| self.entries[idx].1)
    }

    /// 서로 다른 키의 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 집계된 키가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 모든 횟수의 합
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// 첫 등장 순서로 (키, 횟수)를 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// 횟수가 가장 큰 항목을 반환합니다.
    ///
    /// 동률이면 먼저 등장한 키가 선택됩니다.
    pub fn max_entry(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (key, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((key, count)),
            }
        }
        best
    }

    /// 횟수가 `threshold` 이상인 항목만 남긴 새 카운터를 반환합니다.
    ///
    /// 남은 항목의 순서는 원래 순서를 유지합니다.
    pub fn at_least(&self, threshold: u64) -> Tally {
        let mut filtered = Tally::new();
        for (key, count) in self.iter().filter(|(_, count)| *count >= threshold) {
            filtered.index.insert(key.to_owned(), filtered.entries.len());
            filtered.entries.push((key.to_owned(), count));
        }
        filtered
    }

    /// 횟수 내림차순으로 정렬된 목록을 반환합니다.
    ///
    /// 정렬은 안정적이므로 같은 횟수는 첫 등장 순서를 유지합니다.
    pub fn sorted_by_count_desc(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
