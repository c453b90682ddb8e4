use crate::dashboard::{Dashboard, DashboardView};

/// Days moved by page keys
pub const PAGE_DAYS: i64 = 7;

/// Application state: the loaded data plus the slider position
pub struct App {
    pub dashboard: Dashboard,
    /// Days since the first observed date, always within `0..=max_offset`
    offset: u32,
    /// First visible row of the province table
    table_scroll: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard, offset: 0, table_scroll: 0, should_quit: false }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn max_offset(&self) -> u32 {
        self.dashboard.max_offset()
    }

    /// Move the slider by `days`, stopping at either end
    pub fn step(&mut self, days: i64) {
        let target = (self.offset as i64 + days).clamp(0, self.max_offset() as i64);
        self.offset = target as u32;
        self.table_scroll = 0;
        tracing::debug!(offset = self.offset, date = %self.dashboard.date_for(self.offset), "date selected");
    }

    pub fn jump_start(&mut self) {
        self.step(-(self.offset as i64));
    }

    pub fn jump_end(&mut self) {
        self.step(self.max_offset() as i64 - self.offset as i64);
    }

    pub fn table_scroll(&self) -> usize {
        self.table_scroll
    }

    /// Scroll the province table by `rows`, keeping at least its last row in view
    pub fn scroll_table(&mut self, rows: i64) {
        let date = self.dashboard.date_for(self.offset);
        let len = self.dashboard.cases().get(date).map_or(0, |day| day.len());
        let max = len.saturating_sub(1) as i64;
        self.table_scroll = (self.table_scroll as i64 + rows).clamp(0, max) as usize;
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Slider position in [0, 1]
    pub fn progress(&self) -> f64 {
        match self.max_offset() {
            0 => 1.0,
            max => self.offset as f64 / max as f64,
        }
    }

    /// Recompute the view for the current selection
    pub fn view(&self) -> DashboardView {
        self.dashboard.view(self.offset)
    }
}
