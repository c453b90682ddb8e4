use crate::error::DataError;
use crate::province::normalize_province;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One reported case. Only the two fields the aggregation needs are kept.
#[derive(Clone, Debug, Deserialize)]
pub struct CaseRecord {
    #[serde(rename = "ConfirmDate", default)]
    pub confirm_date: Option<String>,
    #[serde(rename = "ProvinceEn", default)]
    pub province: Option<String>,
}

impl CaseRecord {
    pub fn new(confirm_date: &str, province: &str) -> Self {
        Self {
            confirm_date: Some(confirm_date.to_string()),
            province: Some(province.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct CasePayload {
    #[serde(rename = "Data")]
    data: Vec<CaseRecord>,
}

/// New-case counts of a single day, in aggregation order. Counts are always > 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayCounts {
    entries: Vec<(String, u32)>,
}

impl DayCounts {
    fn add(&mut self, province: &str, count: u32) {
        match self.entries.iter_mut().find(|(name, _)| name == province) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((province.to_string(), count)),
        }
    }

    pub fn get(&self, province: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == province)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// date -> canonical province -> new cases. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyProvinceCounts {
    days: BTreeMap<NaiveDate, DayCounts>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl DailyProvinceCounts {
    /// Parse a `{"Data": [...]}` payload in place and aggregate it
    pub fn from_slice(bytes: &mut [u8]) -> Result<Self, DataError> {
        let payload: CasePayload = simd_json::serde::from_slice(bytes)?;
        tracing::debug!(records = payload.data.len(), "case payload parsed");
        Self::from_records(payload.data)
    }

    pub fn from_records(records: impl IntoIterator<Item = CaseRecord>) -> Result<Self, DataError> {
        // BTreeMap keeps groups sorted by (date, source spelling)
        let mut groups: BTreeMap<(NaiveDate, String), u32> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            let (Some(date), Some(province)) = (record.confirm_date, record.province) else {
                skipped += 1;
                continue;
            };
            if date.trim().is_empty() || province.trim().is_empty() {
                skipped += 1;
                continue;
            }
            let date = parse_confirm_date(&date)?;
            *groups.entry((date, province)).or_insert(0) += 1;
        }

        if skipped > 0 {
            tracing::warn!(skipped, "case records without date or province ignored");
        }

        let mut days: BTreeMap<NaiveDate, DayCounts> = BTreeMap::new();
        for ((date, source_name), count) in groups {
            days.entry(date)
                .or_default()
                .add(&normalize_province(&source_name), count);
        }

        let (min_date, max_date) = match (days.keys().next(), days.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(DataError::NoCases),
        };

        Ok(Self { days, min_date, max_date })
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayCounts> {
        self.days.get(&date)
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// Days between the first and the last observed date
    pub fn span_days(&self) -> u32 {
        (self.max_date - self.min_date).num_days().max(0) as u32
    }

    /// Largest single province/day count
    pub fn peak(&self) -> u32 {
        self.days
            .values()
            .flat_map(|day| day.iter().map(|(_, count)| count))
            .max()
            .unwrap_or(0)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Number of distinct dates with at least one case
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Calendar date of a confirmation timestamp; the time of day is dropped.
pub fn parse_confirm_date(value: &str) -> Result<NaiveDate, DataError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DataError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_confirm_date_forms() {
        let expected = date(2020, 4, 3);
        for value in [
            "2020-04-03",
            "2020-04-03 00:00:00",
            "2020-04-03T00:00:00",
            "2020-04-03T23:59:59.250",
            "2020-04-03T10:00:00+07:00",
            " 2020-04-03 18:45:00 ",
        ] {
            assert_eq!(parse_confirm_date(value).unwrap(), expected, "{value}");
        }
    }

    #[test]
    fn test_parse_confirm_date_rejects_garbage() {
        assert!(matches!(parse_confirm_date("03/04/2020"), Err(DataError::InvalidDate(_))));
        assert!(matches!(parse_confirm_date("yesterday"), Err(DataError::InvalidDate(_))));
    }

    #[test]
    fn test_n_records_count_n() {
        let records: Vec<_> = (0..13)
            .map(|i| CaseRecord::new(&format!("2020-03-21 {:02}:00:00", i), "Phuket"))
            .collect();
        let counts = DailyProvinceCounts::from_records(records.clone()).unwrap();
        assert_eq!(counts.get(date(2020, 3, 21)).unwrap().get("Phuket"), Some(13));

        let again = DailyProvinceCounts::from_records(records).unwrap();
        assert_eq!(counts, again);
    }

    #[test]
    fn test_names_normalized_and_ordered_by_source_spelling() {
        let records = vec![
            CaseRecord::new("2020-04-03T00:00:00", "Si Sa Ket"),
            CaseRecord::new("2020-04-03T00:00:00", "Bangkok"),
            CaseRecord::new("2020-04-03T00:00:00", "Nonthaburi"),
            CaseRecord::new("2020-04-03T00:00:00", "Bangkok"),
        ];
        let counts = DailyProvinceCounts::from_records(records).unwrap();
        let day = counts.get(date(2020, 4, 3)).unwrap();
        let rows: Vec<_> = day.iter().collect();
        assert_eq!(rows, vec![("Bangkok", 2), ("Nonthaburi", 1), ("Sisaket", 1)]);
        assert_eq!(day.total(), 4);
    }

    #[test]
    fn test_spellings_of_same_province_are_summed() {
        let records = vec![
            CaseRecord::new("2020-04-03", "Chon Buri"),
            CaseRecord::new("2020-04-03", "Chonburi"),
            CaseRecord::new("2020-04-03", "Chonburi"),
        ];
        let counts = DailyProvinceCounts::from_records(records).unwrap();
        let day = counts.get(date(2020, 4, 3)).unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day.get("Chonburi"), Some(3));
    }

    #[test]
    fn test_records_without_keys_are_skipped() {
        let records = vec![
            CaseRecord { confirm_date: None, province: Some("Bangkok".into()) },
            CaseRecord { confirm_date: Some("2020-04-03".into()), province: None },
            CaseRecord { confirm_date: Some("2020-04-03".into()), province: Some("".into()) },
            CaseRecord::new("2020-04-05", "Bangkok"),
        ];
        let counts = DailyProvinceCounts::from_records(records).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.min_date(), date(2020, 4, 5));
        assert!(counts.get(date(2020, 4, 3)).is_none());
    }

    #[test]
    fn test_date_range_and_peak() {
        let mut records = vec![CaseRecord::new("2020-03-01", "Bangkok")];
        records.extend((0..4).map(|_| CaseRecord::new("2020-03-10", "Yala")));
        records.push(CaseRecord::new("2020-03-31", "Bangkok"));
        let counts = DailyProvinceCounts::from_records(records).unwrap();
        assert_eq!(counts.min_date(), date(2020, 3, 1));
        assert_eq!(counts.max_date(), date(2020, 3, 31));
        assert_eq!(counts.span_days(), 30);
        assert_eq!(counts.peak(), 4);
        assert_eq!(counts.dates().count(), 3);
    }

    #[test]
    fn test_empty_is_no_cases() {
        let err = DailyProvinceCounts::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::NoCases));
    }

    #[test]
    fn test_from_slice_ignores_extra_fields() {
        let mut payload = br#"{"Data":[
            {"No":1,"Age":51,"Gender":"M","ConfirmDate":"2020-04-03 00:00:00","ProvinceEn":"Bangkok","District":null},
            {"No":2,"ConfirmDate":"2020-04-03 00:00:00","ProvinceEn":null}
        ],"LastData":"2020-04-03"}"#
            .to_vec();
        let counts = DailyProvinceCounts::from_slice(&mut payload).unwrap();
        assert_eq!(counts.get(date(2020, 4, 3)).unwrap().get("Bangkok"), Some(1));
    }

    #[test]
    fn test_from_slice_wrong_shape() {
        let mut payload = br#"{"data":[]}"#.to_vec();
        assert!(matches!(DailyProvinceCounts::from_slice(&mut payload), Err(DataError::Json(_))));
    }
}
