use std::collections::HashMap;

/// One parsed statistic row: entity name, year, and the value for that year.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub entity: String,
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatTableError {
    MissingHeader,
    NoDataRows,
}

impl std::fmt::Display for StatTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatTableError::MissingHeader => write!(f, "statistic table has no header row"),
            StatTableError::NoDataRows => write!(f, "statistic table has no data rows"),
        }
    }
}

impl std::error::Error for StatTableError {}

/// Parsed `Entity, Year, Best, Low, High` table.
///
/// `latest_year` is the maximum year across all rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    pub rows: Vec<StatRow>,
    pub latest_year: i32,
}

impl StatTable {
    /// Parses header-plus-rows CSV text.
    ///
    /// Splitting is a naive comma split with no quoting. Only the first
    /// three columns are consumed; `Low` and `High` pass through without
    /// validation. A malformed year or value degrades to 0 instead of
    /// failing, so no row is ever dropped. Blank lines are skipped.
    pub fn parse(raw: &str) -> Result<Self, StatTableError> {
        let mut lines = raw.lines().filter(|line| !line.trim().is_empty());
        let _header = lines.next().ok_or(StatTableError::MissingHeader)?;

        let mut rows = Vec::new();
        for line in lines {
            let mut fields = line.split(',');
            let entity = fields.next().unwrap_or("").to_string();
            let year = parse_or_zero_i32(fields.next());
            let value = parse_or_zero_f64(fields.next());
            rows.push(StatRow { entity, year, value });
        }

        let latest_year = rows
            .iter()
            .map(|r| r.year)
            .max()
            .ok_or(StatTableError::NoDataRows)?;
        Ok(Self { rows, latest_year })
    }

    /// Normalized-name lookup of values for the latest year.
    ///
    /// When an entity repeats within that year, the last row wins.
    pub fn latest_values(&self) -> HashMap<String, f64> {
        let mut out = HashMap::new();
        for row in &self.rows {
            if row.year == self.latest_year {
                out.insert(normalize_name(&row.entity), row.value);
            }
        }
        out
    }
}

/// Join key for entity and feature names: trimmed and lowercased. Applied at
/// both insertion and lookup so the two sides always agree.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn parse_or_zero_i32(field: Option<&str>) -> i32 {
    field
        .and_then(|s| s.trim().parse::<i32>().ok())
        .unwrap_or(0)
}

fn parse_or_zero_f64(field: Option<&str>) -> f64 {
    let v = field
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0);
    if v.is_finite() { v } else { 0.0 }
}
