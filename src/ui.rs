use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::dashboard::{DashboardView, NO_NEW_CASE};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table, TableState, Widget},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 34;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Sidebar + map
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(chunks[0]);

    render_sidebar(frame, app, &view, body[0]);
    render_map(frame, app, &view, body[1]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_sidebar(frame: &mut Frame, app: &App, view: &DashboardView, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Date label
            Constraint::Length(3), // Slider
            Constraint::Min(3),    // Table
        ])
        .split(area);

    let date = Paragraph::new(Line::from(Span::styled(
        view.date_label(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .block(panel(" Date "));
    frame.render_widget(date, parts[0]);

    let slider = Gauge::default()
        .block(panel(" Day "))
        .gauge_style(Style::default().fg(Color::Rgb(0xfd, 0x8d, 0x3c)).bg(Color::Black))
        .ratio(app.progress())
        .label(format!("{} / {}", app.offset(), app.max_offset()));
    frame.render_widget(slider, parts[1]);

    match &view.table {
        Some(rows) => {
            let header = Row::new(["province", "new case"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
            let title = format!(" New cases ({}) ", rows.len());
            let rows = rows
                .iter()
                .map(|(province, count)| Row::new([province.clone(), count.to_string()]));
            let table = Table::new(rows, [Constraint::Min(18), Constraint::Length(8)])
                .header(header)
                .block(panel(&title));
            let mut state = TableState::default().with_offset(app.table_scroll());
            frame.render_stateful_widget(table, parts[2], &mut state);
        }
        None => {
            let empty = Paragraph::new(Span::styled(NO_NEW_CASE, Style::default().fg(Color::DarkGray)))
                .block(panel(" New cases "));
            frame.render_widget(empty, parts[2]);
        }
    }
}

fn render_map(frame: &mut Frame, app: &App, view: &DashboardView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", view.headline()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let canvas = app
        .dashboard
        .render_map(view, inner.width as usize, inner.height as usize);
    frame.render_widget(MapWidget { canvas }, inner);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
}

/// Paints province fills as cell background and outlines as Braille dots
struct MapWidget {
    canvas: BrailleCanvas,
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.canvas.height().min(area.height as usize);
        let cols = self.canvas.width().min(area.width as usize);

        for cy in 0..rows {
            for cx in 0..cols {
                let cell = &mut buf[(area.x + cx as u16, area.y + cy as u16)];
                if let Some(fill) = self.canvas.fill(cx, cy) {
                    cell.set_bg(fill);
                }
                if let Some(glyph) = self.canvas.glyph(cx, cy) {
                    cell.set_char(glyph);
                    if let Some(ink) = self.canvas.ink(cx, cy) {
                        cell.set_fg(ink);
                    }
                }
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let cases = app.dashboard.cases();

    let status = Line::from(vec![
        Span::styled(" Peak: ", Style::default().fg(Color::DarkGray)),
        Span::styled(cases.peak().to_string(), Style::default().fg(Color::Red)),
        Span::styled(" Provinces: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.dashboard.polygons().len().to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} .. {}", cases.min_date(), cases.max_date()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            " | h/l:day j/k:week g/G:first/last ↑/↓:table q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::scenario;
    use crate::dashboard::Dashboard;
    use crate::data::{CaseRecord, DailyProvinceCounts, PolygonStore};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_day_with_cases_shows_headline_and_table() {
        let mut app = App::new(scenario());
        app.jump_end();
        let text = screen(&app);
        assert!(text.contains("Total New Case for 2020-04-03 = 9"));
        assert!(text.contains("2020-04-03"));
        assert!(text.contains("Bangkok"));
        assert!(text.contains("Chonburi"));
        assert!(!text.contains(NO_NEW_CASE));
    }

    #[test]
    fn test_day_without_cases_shows_message() {
        let mut app = App::new(scenario());
        app.step(1);
        let text = screen(&app);
        assert!(text.contains("Total New Case for 2020-04-02 = 0"));
        assert!(text.contains(NO_NEW_CASE));
    }

    #[test]
    fn test_long_table_scrolls() {
        let names: Vec<String> = (0..40).map(|i| format!("Province{i:02}")).collect();
        let records = names.iter().map(|name| CaseRecord::new("2020-04-03", name));
        let dashboard = Dashboard::new(
            PolygonStore::from_geojson_str(r#"{"features":[]}"#).unwrap(),
            DailyProvinceCounts::from_records(records).unwrap(),
        );
        let mut app = App::new(dashboard);

        let text = screen(&app);
        assert!(text.contains("New cases (40)"));
        assert!(text.contains("Province00"));
        assert!(!text.contains("Province39"));

        app.scroll_table(20);
        let text = screen(&app);
        assert!(!text.contains("Province00"));
        assert!(text.contains("Province39"));
    }

    #[test]
    fn test_map_is_coloured() {
        let mut app = App::new(scenario());
        app.jump_end();
        // Tall enough that the small test provinces cover whole cells
        let mut terminal = Terminal::new(TestBackend::new(110, 80)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let darkest = crate::map::ylorrd(1.0);
        assert!(buffer.content().iter().any(|cell| cell.bg == darkest));
    }
}
