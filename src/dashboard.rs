use crate::braille::BrailleCanvas;
use crate::data::{DailyProvinceCounts, PolygonStore};
use crate::map::{fill_intensity, MapRenderer};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// Shown instead of the table on dates without cases
pub const NO_NEW_CASE: &str = "No new case";

/// Everything drawn for one slider position
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    /// Offset actually used, after clamping to the slider range
    pub offset: u32,
    pub date: NaiveDate,
    pub total_new_case: u32,
    /// (province, new cases) in aggregation order, `None` when the date has no cases
    pub table: Option<Vec<(String, u32)>>,
    /// Fill intensity for every province in the polygon store
    pub intensities: HashMap<String, f64>,
}

impl DashboardView {
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn headline(&self) -> String {
        format!("Total New Case for {} = {}", self.date_label(), self.total_new_case)
    }
}

/// Joins the province shapes with the daily counts. Both are loaded once and
/// never change; the selected offset is passed in on every call.
pub struct Dashboard {
    map: MapRenderer,
    cases: DailyProvinceCounts,
}

impl Dashboard {
    pub fn new(polygons: PolygonStore, cases: DailyProvinceCounts) -> Self {
        Self { map: MapRenderer::new(polygons), cases }
    }

    pub fn cases(&self) -> &DailyProvinceCounts {
        &self.cases
    }

    pub fn polygons(&self) -> &PolygonStore {
        self.map.store()
    }

    /// Upper bound of the slider; the lower bound is 0 (the first observed date)
    pub fn max_offset(&self) -> u32 {
        self.cases.span_days()
    }

    pub fn date_for(&self, offset: u32) -> NaiveDate {
        self.cases.min_date() + Duration::days(offset.min(self.max_offset()) as i64)
    }

    pub fn view(&self, offset: u32) -> DashboardView {
        let offset = offset.min(self.max_offset());
        let date = self.date_for(offset);
        let day = self.cases.get(date);

        let total_new_case = day.map(|d| d.total()).unwrap_or(0);

        let intensities = self
            .map
            .store()
            .iter()
            .map(|p| {
                let count = day.and_then(|d| d.get(&p.province)).unwrap_or(0);
                (p.province.clone(), fill_intensity(count))
            })
            .collect();

        let table = day.map(|d| {
            d.iter()
                .filter(|(_, count)| *count > 0)
                .map(|(name, count)| (name.to_string(), count))
                .collect()
        });

        DashboardView { offset, date, total_new_case, table, intensities }
    }

    /// Choropleth for `view` on a `cols` x `rows` character canvas
    pub fn render_map(&self, view: &DashboardView, cols: usize, rows: usize) -> BrailleCanvas {
        self.map.render(&view.intensities, cols, rows)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::CaseRecord;

    const BANGKOK_AND_CHON_BURI: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"name":"Bangkok"},
         "geometry":{"type":"Polygon","coordinates":[[[100.3,13.5],[100.9,13.5],[100.9,14.0],[100.3,14.0],[100.3,13.5]]]}},
        {"type":"Feature","properties":{"name":"Chon Buri"},
         "geometry":{"type":"Polygon","coordinates":[[[100.8,12.6],[101.5,12.6],[101.5,13.5],[100.8,13.5],[100.8,12.6]]]}}
    ]}"#;

    /// Bangkok x7 and Chonburi x2 on 2020-04-03, one Bangkok case on 2020-04-01
    pub(crate) fn scenario() -> Dashboard {
        let mut records = vec![CaseRecord::new("2020-04-01T00:00:00", "Bangkok")];
        records.extend((0..7).map(|_| CaseRecord::new("2020-04-03T00:00:00", "Bangkok")));
        records.extend((0..2).map(|_| CaseRecord::new("2020-04-03T00:00:00", "Chonburi")));
        Dashboard::new(
            PolygonStore::from_geojson_str(BANGKOK_AND_CHON_BURI).unwrap(),
            DailyProvinceCounts::from_records(records).unwrap(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_scenario_day_with_cases() {
        let dashboard = scenario();
        let view = dashboard.view(2);
        assert_eq!(view.date, date(2020, 4, 3));
        assert_eq!(view.date_label(), "2020-04-03");
        assert_eq!(view.total_new_case, 9);
        assert_eq!(view.headline(), "Total New Case for 2020-04-03 = 9");
        assert_eq!(view.intensities["Bangkok"], 1.0);
        assert_eq!(view.intensities["Chonburi"], 0.4);
        assert_eq!(
            view.table,
            Some(vec![("Bangkok".to_string(), 7), ("Chonburi".to_string(), 2)])
        );
    }

    #[test]
    fn test_date_without_cases() {
        let dashboard = scenario();
        let view = dashboard.view(1);
        assert_eq!(view.date, date(2020, 4, 2));
        assert_eq!(view.total_new_case, 0);
        assert_eq!(view.table, None);
        assert!(view.intensities.values().all(|&v| v == 0.0));
        assert_eq!(view.intensities.len(), 2);
    }

    #[test]
    fn test_slider_range_is_bounded_by_data() {
        let dashboard = scenario();
        assert_eq!(dashboard.max_offset(), 2);
        // Offset 0 is the earliest selectable date; nothing before it exists
        assert_eq!(dashboard.view(0).date, dashboard.cases().min_date());
        let clamped = dashboard.view(40);
        assert_eq!(clamped.offset, 2);
        assert_eq!(clamped.date, dashboard.cases().max_date());
    }

    #[test]
    fn test_provinces_without_geometry_still_count() {
        let records = vec![
            CaseRecord::new("2020-04-03", "Bangkok"),
            CaseRecord::new("2020-04-03", "Phuket"),
        ];
        let dashboard = Dashboard::new(
            PolygonStore::from_geojson_str(BANGKOK_AND_CHON_BURI).unwrap(),
            DailyProvinceCounts::from_records(records).unwrap(),
        );
        let view = dashboard.view(0);
        assert_eq!(view.total_new_case, 2);
        assert_eq!(view.table.as_ref().map(Vec::len), Some(2));
        assert!(!view.intensities.contains_key("Phuket"));
        assert_eq!(view.intensities["Chonburi"], 0.0);
    }
}
