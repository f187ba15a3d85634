use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// # Summary
/// 静态标的目录：行业分组、股票显示名称与货币标签。
///
/// # Invariants
/// - 只用于前端展示，校验器不依赖本目录，而是以存储中的实际数据为准。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    // 行业分组 -> 股票代码列表
    pub categories: BTreeMap<String, Vec<String>>,
    // 股票代码 -> 显示名称
    pub names: BTreeMap<String, String>,
    // 货币代码 -> 显示标签
    pub currencies: BTreeMap<String, String>,
}

const AUTO: &[&str] = &["F", "TSLA", "FCAU", "TM", "HMC", "RACE", "CARZ"];
const AIRLINES: &[&str] = &["AAL", "DAL", "UAL", "SKYW", "JBLU", "ALK", "JETS"];
const HOTELS: &[&str] = &[
    "MAR", "HLT", "H", "MGM", "LVS", "WYN", "WYNN", "STAY", "IHG",
];
const TECH: &[&str] = &["AMZN", "GOOGL", "AAPL"];

const NAMES: &[(&str, &str)] = &[
    ("F", "Ford"),
    ("TSLA", "Tesla"),
    ("FCAU", "Fiat Chrysler"),
    ("TM", "Toyota"),
    ("HMC", "Honda"),
    ("RACE", "Ferrari NV"),
    ("CARZ", "Glbl Auto Idx"),
    ("AAL", "American Airlines"),
    ("DAL", "Delta Air Lines"),
    ("UAL", "United Continental"),
    ("SKYW", "SkyWest"),
    ("JBLU", "JetBlue Airways"),
    ("ALK", "Alaska Air"),
    ("LUV", "Southwest Airlines"),
    ("JETS", "US Global Jets ETF"),
    ("MAR", "Marriott"),
    ("HLT", "Hilton"),
    ("H", "Hyatt"),
    ("MGM", "MGM Resorts"),
    ("LVS", "Las Vegas Sands"),
    ("WYN", "Wyndham Worldwide"),
    ("WYNN", "Wynn Resorts"),
    ("STAY", "Extended Stay America"),
    ("IHG", "InterContinental Hotels Group"),
    ("AMZN", "Amazon"),
    ("GOOGL", "Alphabet"),
    ("AAPL", "Apple"),
];

const CURRENCIES: &[(&str, &str)] = &[
    ("DEXUSEU", "USD / EUR"),
    ("DEXCHUS", "CNY / USD"),
    ("DEXJPUS", "JPY / USD"),
];

fn owned_list(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

fn owned_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for Catalog {
    fn default() -> Self {
        let categories = [
            ("Auto", AUTO),
            ("Airlines", AIRLINES),
            ("Hotels", HOTELS),
            ("Tech", TECH),
        ]
        .into_iter()
        .map(|(name, symbols)| (name.to_string(), owned_list(symbols)))
        .collect();

        Self {
            categories,
            names: owned_map(NAMES),
            currencies: owned_map(CURRENCIES),
        }
    }
}
