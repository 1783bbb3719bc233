use crate::cli::{format_price, truncate, Session};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::rc::Rc;
use virtual_wardrobe::{
    clothing_view, overview, wishlist_view, ClothingCategory, ClothingItem, ClothingQuery,
    ClothingStatus, WishlistItem, WishlistPriority, WishlistQuery, WishlistStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Wardrobe,
    Wishlist,
    Overview,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Wardrobe => Page::Wishlist,
            Page::Wishlist => Page::Overview,
            Page::Overview => Page::Wardrobe,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Wardrobe => Page::Overview,
            Page::Wishlist => Page::Wardrobe,
            Page::Overview => Page::Wishlist,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Wardrobe => "Wardrobe",
            Page::Wishlist => "Wishlist",
            Page::Overview => "Overview",
        }
    }
}

/// Which text filter is receiving keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Search,
    TagSearch,
}

pub struct App<'a> {
    pub session: &'a mut Session,
    pub current_page: Page,
    pub clothing_query: ClothingQuery,
    pub wishlist_query: WishlistQuery,
    pub clothing_state: TableState,
    pub wishlist_state: TableState,
    pub show_detail: bool,
    pub input: Option<Input>,
    /// Id awaiting delete confirmation
    pub pending_delete: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        let mut app = Self {
            session,
            current_page: Page::Wardrobe,
            clothing_query: ClothingQuery::default(),
            wishlist_query: WishlistQuery::default(),
            clothing_state: TableState::default(),
            wishlist_state: TableState::default(),
            show_detail: false,
            input: None,
            pending_delete: None,
        };
        app.clamp_selection();
        app
    }

    pub fn clothing_rows(&self) -> Vec<Rc<ClothingItem>> {
        clothing_view(self.session.clothing.items(), &self.clothing_query)
    }

    pub fn wishlist_rows(&self) -> Vec<Rc<WishlistItem>> {
        wishlist_view(self.session.wishlist.items(), &self.wishlist_query)
    }

    fn row_count(&self) -> usize {
        match self.current_page {
            Page::Wardrobe => self.clothing_rows().len(),
            Page::Wishlist => self.wishlist_rows().len(),
            Page::Overview => 0,
        }
    }

    fn table_state(&mut self) -> Option<&mut TableState> {
        match self.current_page {
            Page::Wardrobe => Some(&mut self.clothing_state),
            Page::Wishlist => Some(&mut self.wishlist_state),
            Page::Overview => None,
        }
    }

    /// Id of the highlighted row on the current page
    pub fn selected_id(&self) -> Option<String> {
        match self.current_page {
            Page::Wardrobe => self
                .clothing_state
                .selected()
                .and_then(|i| self.clothing_rows().get(i).map(|item| item.id.clone())),
            Page::Wishlist => self
                .wishlist_state
                .selected()
                .and_then(|i| self.wishlist_rows().get(i).map(|item| item.id.clone())),
            Page::Overview => None,
        }
    }

    /// Highlight the row holding `id` on the current page after a re-sort
    fn reselect(&mut self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        let position = match self.current_page {
            Page::Wardrobe => self.clothing_rows().iter().position(|item| item.id == id),
            Page::Wishlist => self.wishlist_rows().iter().position(|item| item.id == id),
            Page::Overview => None,
        };
        if let (Some(i), Some(state)) = (position, self.table_state()) {
            state.select(Some(i));
        }
    }

    /// Keep both selections inside their (possibly shrunken) views
    fn clamp_selection(&mut self) {
        let clothing_len = self.clothing_rows().len();
        let wishlist_len = self.wishlist_rows().len();
        clamp(&mut self.clothing_state, clothing_len);
        clamp(&mut self.wishlist_state, wishlist_len);
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        if let Some(state) = self.table_state() {
            let i = match state.selected() {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            };
            state.select(Some(i));
        }
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        if let Some(state) = self.table_state() {
            let i = match state.selected() {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            state.select(Some(i));
        }
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.current_page {
            Page::Wardrobe => self.session.clothing.toggle_status(&id),
            Page::Wishlist => self.session.wishlist.toggle_status(&id),
            Page::Overview => {}
        }
        self.clamp_selection();
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match self.current_page {
            Page::Wardrobe => self.session.clothing.delete(&id),
            Page::Wishlist => self.session.wishlist.delete(&id),
            Page::Overview => {}
        }
        self.clamp_selection();
    }

    pub fn cycle_status_filter(&mut self) {
        match self.current_page {
            Page::Wardrobe => {
                self.clothing_query.status = self.clothing_query.status.cycle(&ClothingStatus::ALL)
            }
            Page::Wishlist => {
                self.wishlist_query.status = self.wishlist_query.status.cycle(&WishlistStatus::ALL)
            }
            Page::Overview => {}
        }
        self.clamp_selection();
    }

    /// Category on the wardrobe page, priority on the wishlist page
    pub fn cycle_kind_filter(&mut self) {
        match self.current_page {
            Page::Wardrobe => {
                self.clothing_query.category =
                    self.clothing_query.category.cycle(&ClothingCategory::ALL)
            }
            Page::Wishlist => {
                self.wishlist_query.priority =
                    self.wishlist_query.priority.cycle(&WishlistPriority::ALL)
            }
            Page::Overview => {}
        }
        self.clamp_selection();
    }

    pub fn cycle_sort_key(&mut self) {
        let selected = self.selected_id();
        match self.current_page {
            Page::Wardrobe => self.clothing_query.sort_key = self.clothing_query.sort_key.next(),
            Page::Wishlist => self.wishlist_query.sort_key = self.wishlist_query.sort_key.next(),
            Page::Overview => {}
        }
        self.reselect(selected);
    }

    pub fn toggle_direction(&mut self) {
        let selected = self.selected_id();
        match self.current_page {
            Page::Wardrobe => {
                self.clothing_query.direction = self.clothing_query.direction.toggled()
            }
            Page::Wishlist => {
                self.wishlist_query.direction = self.wishlist_query.direction.toggled()
            }
            Page::Overview => {}
        }
        self.reselect(selected);
    }

    pub fn clear_filters(&mut self) {
        match self.current_page {
            Page::Wardrobe => self.clothing_query = ClothingQuery::default(),
            Page::Wishlist => self.wishlist_query = WishlistQuery::default(),
            Page::Overview => {}
        }
        self.clamp_selection();
    }

    fn input_text(&mut self, input: Input) -> Option<&mut String> {
        match (self.current_page, input) {
            (Page::Wardrobe, Input::Search) => Some(&mut self.clothing_query.search),
            (Page::Wardrobe, Input::TagSearch) => Some(&mut self.clothing_query.tag_search),
            (Page::Wishlist, Input::Search) => Some(&mut self.wishlist_query.search),
            (Page::Wishlist, Input::TagSearch) => Some(&mut self.wishlist_query.tag_search),
            (Page::Overview, _) => None,
        }
    }

    /// Returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(input) = self.input {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.input = None,
                KeyCode::Backspace => {
                    if let Some(text) = self.input_text(input) {
                        text.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(text) = self.input_text(input) {
                        text.push(c);
                    }
                }
                _ => {}
            }
            self.clamp_selection();
            return false;
        }

        if self.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete(),
                _ => self.pending_delete = None,
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter => self.show_detail = !self.show_detail,
            KeyCode::Tab => self.current_page = self.current_page.next(),
            KeyCode::BackTab => self.current_page = self.current_page.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => {
                if self.row_count() > 0 {
                    if let Some(state) = self.table_state() {
                        state.select(Some(0));
                    }
                }
            }
            KeyCode::End => {
                let len = self.row_count();
                if len > 0 {
                    if let Some(state) = self.table_state() {
                        state.select(Some(len - 1));
                    }
                }
            }
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d') => self.pending_delete = self.selected_id(),
            KeyCode::Char('/') if self.current_page != Page::Overview => {
                self.input = Some(Input::Search)
            }
            KeyCode::Char('#') if self.current_page != Page::Overview => {
                self.input = Some(Input::TagSearch)
            }
            KeyCode::Char('s') => self.cycle_status_filter(),
            KeyCode::Char('f') => self.cycle_kind_filter(),
            KeyCode::Char('o') => self.cycle_sort_key(),
            KeyCode::Char('r') => self.toggle_direction(),
            KeyCode::Char('c') => self.clear_filters(),
            _ => {}
        }
        false
    }
}

fn clamp(state: &mut TableState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(i) if i >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        Some(_) => {}
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Length(3), // Active criteria
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_criteria(f, chunks[1], app);

    let content = if app.show_detail && app.current_page != Page::Overview {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        render_detail_panel(f, content_chunks[1], app);
        content_chunks[0]
    } else {
        chunks[2]
    };

    match app.current_page {
        Page::Wardrobe => render_clothing_table(f, content, app),
        Page::Wishlist => render_wishlist_table(f, content, app),
        Page::Overview => render_overview(f, content, app),
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Wardrobe, Page::Wishlist, Page::Overview];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("👕 {}", app.session.clothing.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("🛍️ {}", app.session.wishlist.len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn criterion<'s>(label: &'s str, value: String, editing: bool) -> Vec<Span<'s>> {
    let value_style = if editing {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };
    vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, value_style),
        Span::raw("  "),
    ]
}

fn render_criteria(f: &mut Frame, area: Rect, app: &App) {
    let editing = |input: Input| app.input == Some(input);

    let spans: Vec<Span> = match app.current_page {
        Page::Wardrobe => {
            let q = &app.clothing_query;
            [
                criterion("name: ", format!("\"{}\"", q.search), editing(Input::Search)),
                criterion("tag: ", format!("\"{}\"", q.tag_search), editing(Input::TagSearch)),
                criterion("status: ", q.status.to_string(), false),
                criterion("category: ", q.category.to_string(), false),
                criterion(
                    "sort: ",
                    format!("{} {}", q.sort_key.label(), q.direction.as_str()),
                    false,
                ),
            ]
            .concat()
        }
        Page::Wishlist => {
            let q = &app.wishlist_query;
            [
                criterion("name: ", format!("\"{}\"", q.search), editing(Input::Search)),
                criterion("tag: ", format!("\"{}\"", q.tag_search), editing(Input::TagSearch)),
                criterion("status: ", q.status.to_string(), false),
                criterion("priority: ", q.priority.to_string(), false),
                criterion(
                    "sort: ",
                    format!("{} {}", q.sort_key.label(), q.direction.as_str()),
                    false,
                ),
            ]
            .concat()
        }
        Page::Overview => vec![Span::styled(
            "Totals across both collections",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let criteria = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Filters "),
    );
    f.render_widget(criteria, area);
}

fn header_row<'h>(titles: &[&'h str]) -> Row<'h> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn render_clothing_table(f: &mut Frame, area: Rect, app: &mut App) {
    let items = app.clothing_rows();

    let rows = items.iter().map(|item| {
        let status_color = match item.status {
            ClothingStatus::Clean => Color::Green,
            ClothingStatus::Dirty => Color::Red,
        };
        let swatch = item
            .primary_color()
            .and_then(parse_hex)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(Color::Reset);

        Row::new(vec![
            Cell::from("■").style(Style::default().fg(swatch)),
            Cell::from(truncate(&item.name, 30)),
            Cell::from(item.category.label()),
            Cell::from(item.status.label()).style(Style::default().fg(status_color)),
            Cell::from(item.years_of_use.label()),
            Cell::from(truncate(&item.tags.join(", "), 30)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(32),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(20),
            Constraint::Min(10),
        ],
    )
    .header(header_row(&["", "Name", "Category", "Status", "Years of use", "Tags"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Wardrobe ({}/{}) ", items.len(), app.session.clothing.len())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.clothing_state);
}

fn render_wishlist_table(f: &mut Frame, area: Rect, app: &mut App) {
    let items = app.wishlist_rows();

    let rows = items.iter().map(|item| {
        let priority_color = match item.priority {
            WishlistPriority::High => Color::Red,
            WishlistPriority::Medium => Color::Yellow,
            WishlistPriority::Low => Color::Gray,
        };
        let status_style = if item.is_bought() {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(Color::Cyan)
        };

        Row::new(vec![
            Cell::from(truncate(&item.name, 30)).style(status_style),
            Cell::from(item.priority.label()).style(Style::default().fg(priority_color)),
            Cell::from(item.status.label()),
            Cell::from(format_price(item.estimated_price)),
            Cell::from(truncate(&item.tags.join(", "), 30)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(32),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    )
    .header(header_row(&["Name", "Priority", "Status", "Price", "Tags"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Wishlist ({}/{}) ", items.len(), app.session.wishlist.len())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.wishlist_state);
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let stats = overview(app.session.clothing.items(), app.session.wishlist.items());
    let title = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  👕 Wardrobe", title)),
        Line::from(format!("     Items: {}", stats.clothing_total)),
        Line::from(vec![
            Span::raw("     "),
            Span::styled(format!("clean {}", stats.clean), Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::styled(format!("dirty {}", stats.dirty), Style::default().fg(Color::Red)),
        ]),
    ];
    for (category, count) in &stats.by_category {
        lines.push(Line::from(format!("     {:<10} {:>4}", category.label(), count)));
    }

    lines.extend([
        Line::from(""),
        Line::from(Span::styled("  🛍️  Wishlist", title)),
        Line::from(format!("     Items: {}", stats.wishlist_total)),
        Line::from(vec![
            Span::raw("     "),
            Span::styled(format!("pending {}", stats.pending), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(format!("bought {}", stats.bought), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(format!(
            "     High priority pending: {}",
            stats.high_priority_pending
        )),
        Line::from(format!(
            "     Pending estimated total: {:.2}",
            stats.pending_estimated_total
        )),
    ]);

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Overview "),
    );
    f.render_widget(panel, area);
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let id = app.selected_id();

    let lines: Vec<Line> = match (app.current_page, id) {
        (Page::Wardrobe, Some(id)) => match app.session.clothing.get(&id) {
            Some(item) => vec![
                Line::from(Span::styled(
                    item.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                detail_line("Id", item.id.clone()),
                detail_line("Category", item.category.label().to_string()),
                detail_line("Status", item.status.label().to_string()),
                detail_line("Years of use", item.years_of_use.label().to_string()),
                detail_line("Colors", item.colors.join(", ")),
                detail_line("Tags", item.tags.join(", ")),
                detail_line("Notes", item.notes.clone().unwrap_or_default()),
            ],
            None => vec![],
        },
        (Page::Wishlist, Some(id)) => match app.session.wishlist.get(&id) {
            Some(item) => vec![
                Line::from(Span::styled(
                    item.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                detail_line("Id", item.id.clone()),
                detail_line("Priority", item.priority.label().to_string()),
                detail_line("Status", item.status.label().to_string()),
                detail_line("Price", format_price(item.estimated_price)),
                detail_line("Tags", item.tags.join(", ")),
                detail_line("Link", item.link.clone().unwrap_or_default()),
            ],
            None => vec![],
        },
        _ => vec![Line::from("Nothing selected")],
    };

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details "),
    );
    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let status_spans = if let Some(id) = &app.pending_delete {
        let name = match app.current_page {
            Page::Wardrobe => app.session.clothing.get(id).map(|i| i.name.clone()),
            Page::Wishlist => app.session.wishlist.get(id).map(|i| i.name.clone()),
            Page::Overview => None,
        }
        .unwrap_or_default();
        vec![
            Span::styled(format!(" Delete \"{}\"? ", name), Style::default().fg(Color::Red)),
            key("y"),
            Span::raw(" confirm | any other key cancels"),
        ]
    } else if app.input.is_some() {
        vec![
            Span::raw(" Typing filter | "),
            key("Enter/Esc"),
            Span::raw(" done"),
        ]
    } else {
        vec![
            key(" Tab"),
            Span::raw(" Page | "),
            key("↑/↓"),
            Span::raw(" Nav | "),
            key("Space"),
            Span::raw(" Toggle | "),
            key("d"),
            Span::raw(" Delete | "),
            key("/ #"),
            Span::raw(" Search | "),
            key("s f"),
            Span::raw(" Filter | "),
            key("o r"),
            Span::raw(" Sort | "),
            key("c"),
            Span::raw(" Clear | "),
            key("Enter"),
            Span::raw(" Details | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ]
    };

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

/// "#rgb" or "#rrggbb" to RGB
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut chars = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((chars.next()??, chars.next()??, chars.next()??))
        }
        6 => Some((
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtual_wardrobe::{Filter, LoadFallback, MemoryStore};

    fn session() -> Session {
        Session::open(Rc::new(MemoryStore::new()), LoadFallback::Seed)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_space_toggles_selected_item() {
        let mut session = session();
        let mut app = App::new(&mut session);

        let id = app.selected_id().unwrap();
        let before = app.session.clothing.get(&id).unwrap().status;

        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.session.clothing.get(&id).unwrap().status, before.toggled());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut session = session();
        let mut app = App::new(&mut session);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_page, Page::Wishlist);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session.wishlist.len(), 2);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.wishlist.len(), 1);
        assert_eq!(app.wishlist_state.selected(), Some(0));
    }

    #[test]
    fn test_typing_narrows_the_view() {
        let mut session = session();
        let mut app = App::new(&mut session);

        press(&mut app, KeyCode::Char('/'));
        for c in "run".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input, None);

        let rows = app.clothing_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Running Shorts");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.clothing_rows().len(), 2);
        assert_eq!(app.clothing_query, ClothingQuery::default());
    }

    #[test]
    fn test_filter_cycling_clamps_selection() {
        let mut session = session();
        let mut app = App::new(&mut session);
        press(&mut app, KeyCode::End);
        assert_eq!(app.clothing_state.selected(), Some(1));

        // status: all -> clean leaves one row
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.clothing_query.status, Filter::Only(ClothingStatus::Clean));
        assert_eq!(app.clothing_rows().len(), 1);
        assert_eq!(app.clothing_state.selected(), Some(0));
    }

    #[test]
    fn test_resort_keeps_the_same_item_selected() {
        let mut session = session();
        let mut app = App::new(&mut session);
        press(&mut app, KeyCode::End);
        let selected = app.selected_id();
        assert_eq!(selected.as_deref(), Some("2"));

        // name desc puts Running Shorts first
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.clothing_state.selected(), Some(0));
        assert_eq!(app.selected_id(), selected);

        // status desc: dirty (Running Shorts) before clean
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.clothing_query.sort_key, virtual_wardrobe::ClothingSortKey::Status);
        assert_eq!(app.selected_id(), selected);
    }

    #[test]
    fn test_quit_keys() {
        let mut session = session();
        let mut app = App::new(&mut session);
        assert!(!press(&mut app, KeyCode::Char('o')));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#1d4ed8"), Some((0x1d, 0x4e, 0xd8)));
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("red"), None);
    }
}
