use anyhow::Result;
use bd_locations::{LocationQuery, LocationTaxonomy};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Divisions,
    Districts,
    Thanas,
    Areas,
}

impl Level {
    pub fn title(&self) -> &str {
        match self {
            Level::Divisions => "Divisions",
            Level::Districts => "Districts",
            Level::Thanas => "Thanas",
            Level::Areas => "Areas",
        }
    }
}

/// One listed entry at the current level: name plus a detail column
/// (child count for inner levels, settlement type for areas).
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub detail: String,
}

pub struct App {
    pub taxonomy: LocationTaxonomy,
    pub level: Level,
    pub division: Option<String>,
    pub district: Option<String>,
    pub thana: Option<String>,
    pub entries: Vec<Entry>,
    pub state: TableState,
}

impl App {
    pub fn new(taxonomy: LocationTaxonomy) -> Self {
        let mut app = Self {
            taxonomy,
            level: Level::Divisions,
            division: None,
            district: None,
            thana: None,
            entries: Vec::new(),
            state: TableState::default(),
        };
        app.refresh_entries();
        app
    }

    /// Rebuild the listing for the current level and selection path.
    fn refresh_entries(&mut self) {
        let query = LocationQuery::new(&self.taxonomy);

        self.entries = match self.level {
            Level::Divisions => query
                .divisions()
                .into_iter()
                .map(|name| {
                    let count = query.districts(&name).len();
                    Entry {
                        name,
                        detail: format!("{} districts", count),
                    }
                })
                .collect(),
            Level::Districts => {
                let division = self.division.as_deref().unwrap_or_default();
                query
                    .districts(division)
                    .into_iter()
                    .map(|name| {
                        let count = query.thanas(division, &name).len();
                        Entry {
                            name,
                            detail: format!("{} thanas", count),
                        }
                    })
                    .collect()
            }
            Level::Thanas => {
                let division = self.division.as_deref().unwrap_or_default();
                let district = self.district.as_deref().unwrap_or_default();
                query
                    .thanas(division, district)
                    .into_iter()
                    .map(|name| {
                        let detail = match self
                            .taxonomy
                            .find_thana(division, district, &name)
                            .and_then(|t| t.areas.as_ref())
                        {
                            Some(areas) => format!("{} areas", areas.len()),
                            None => "no area data".to_string(),
                        };
                        Entry { name, detail }
                    })
                    .collect()
            }
            Level::Areas => {
                let division = self.division.as_deref().unwrap_or_default();
                let district = self.district.as_deref().unwrap_or_default();
                let thana = self.thana.as_deref().unwrap_or_default();
                query
                    .areas(division, district, thana)
                    .into_iter()
                    .map(|area| Entry {
                        name: area.name,
                        detail: area.area_type.as_str().to_string(),
                    })
                    .collect()
            }
        };

        if self.entries.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    /// Descend into the selected entry. At the thana level this only moves
    /// when the thana has recorded areas.
    pub fn descend(&mut self) {
        let Some(selected) = self.selected_entry().map(|e| e.name.clone()) else {
            return;
        };

        match self.level {
            Level::Divisions => {
                self.division = Some(selected);
                self.level = Level::Districts;
            }
            Level::Districts => {
                self.district = Some(selected);
                self.level = Level::Thanas;
            }
            Level::Thanas => {
                let query = LocationQuery::new(&self.taxonomy);
                let has_areas = !query
                    .areas(
                        self.division.as_deref().unwrap_or_default(),
                        self.district.as_deref().unwrap_or_default(),
                        &selected,
                    )
                    .is_empty();
                if !has_areas {
                    return;
                }
                self.thana = Some(selected);
                self.level = Level::Areas;
            }
            Level::Areas => return,
        }

        self.refresh_entries();
    }

    /// Go back up one level; returns false when already at the top.
    pub fn ascend(&mut self) -> bool {
        match self.level {
            Level::Divisions => return false,
            Level::Districts => {
                self.division = None;
                self.level = Level::Divisions;
            }
            Level::Thanas => {
                self.district = None;
                self.level = Level::Districts;
            }
            Level::Areas => {
                self.thana = None;
                self.level = Level::Thanas;
            }
        }

        self.refresh_entries();
        true
    }

    pub fn breadcrumb(&self) -> String {
        let mut parts = vec!["Bangladesh".to_string()];
        parts.extend(self.division.clone());
        parts.extend(self.district.clone());
        parts.extend(self.thana.clone());
        parts.join(" › ")
    }

    pub fn next(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.descend(),
                KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                    app.ascend();
                }
                KeyCode::Esc => {
                    if !app.ascend() {
                        return Ok(());
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => app.state.select(Some(0)),
                KeyCode::End => {
                    if !app.entries.is_empty() {
                        app.state.select(Some(app.entries.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with breadcrumb
            Constraint::Min(0),    // Listing
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_listing(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            app.level.title(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(app.breadcrumb(), Style::default().fg(Color::White)),
        Span::raw("  |  "),
        Span::styled(
            format!("{} entries", app.entries.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_listing(f: &mut Frame, area: Rect, app: &mut App) {
    let detail_heading = match app.level {
        Level::Areas => "Type",
        _ => "Contains",
    };

    let header_cells = ["Name", detail_heading].into_iter().map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.entries.iter().map(|entry| {
        let detail_color = match app.level {
            Level::Areas => Color::Green,
            _ => Color::DarkGray,
        };

        Row::new(vec![
            Cell::from(entry.name.clone()),
            Cell::from(entry.detail.clone()).style(Style::default().fg(detail_color)),
        ])
        .height(1)
    });

    let table = Table::new(rows, [Constraint::Length(32), Constraint::Length(20)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", app.level.title())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let hint = match app.level {
        Level::Divisions => "↑/↓ move  |  Enter open  |  q quit",
        Level::Areas => "↑/↓ move  |  Backspace back  |  q quit",
        _ => "↑/↓ move  |  Enter open  |  Backspace back  |  q quit",
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("dataset {}", app.taxonomy.version),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  |  "),
        Span::styled(hint, Style::default().fg(Color::White)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_locations::load_default;

    #[test]
    fn test_app_starts_at_division_level() {
        let app = App::new(load_default().unwrap());

        assert_eq!(app.level, Level::Divisions);
        assert_eq!(app.entries.len(), 8);
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_descend_and_ascend() {
        let mut app = App::new(load_default().unwrap());

        app.descend(); // Dhaka division
        assert_eq!(app.level, Level::Districts);
        assert_eq!(app.division.as_deref(), Some("Dhaka"));
        assert_eq!(app.entries.len(), 11);

        app.descend(); // Dhaka district
        assert_eq!(app.level, Level::Thanas);

        app.descend(); // Dhanmondi, which has areas
        assert_eq!(app.level, Level::Areas);
        assert_eq!(app.entries.len(), 3);

        assert!(app.ascend());
        assert_eq!(app.level, Level::Thanas);
        assert!(app.thana.is_none());

        assert!(app.ascend());
        assert!(app.ascend());
        assert_eq!(app.level, Level::Divisions);
        assert!(!app.ascend()); // already at the top
    }

    #[test]
    fn test_descend_stops_on_thana_without_areas() {
        let mut app = App::new(load_default().unwrap());

        app.descend(); // Dhaka → districts
        app.descend(); // Dhaka → thanas

        // Select Motijheel (no recorded areas) and try to open it
        let idx = app
            .entries
            .iter()
            .position(|e| e.name == "Motijheel")
            .unwrap();
        app.state.select(Some(idx));
        app.descend();

        assert_eq!(app.level, Level::Thanas);
    }

    #[test]
    fn test_breadcrumb_tracks_path() {
        let mut app = App::new(load_default().unwrap());
        assert_eq!(app.breadcrumb(), "Bangladesh");

        app.descend();
        app.descend();
        assert_eq!(app.breadcrumb(), "Bangladesh › Dhaka › Dhaka");
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = App::new(load_default().unwrap());

        app.previous();
        assert_eq!(app.state.selected(), Some(7)); // wrapped to last division

        app.next();
        assert_eq!(app.state.selected(), Some(0));
    }
}
