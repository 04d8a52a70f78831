//! Dashboard state and rendering
//!
//! Displays paginated order and material tables with an expandable order
//! detail panel. Fetch failures land in the footer; the view itself always
//! stays interactive.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use std::collections::HashMap;

use crate::detail;
use crate::models::{Material, MaterialsPage, Order, OrderStatus, OrdersPage};

/// Which listing is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Orders,
    Materials,
}

/// Application state for the admin dashboard
pub struct DashboardApp {
    pub view: View,
    pub page_size: u32,
    pub asset_base_url: String,

    pub orders: Vec<Order>,
    pub orders_total: u64,
    pub orders_page: u32,

    pub materials: Vec<Material>,
    pub materials_total: u64,
    pub materials_page: u32,

    pub selected: usize,
    pub show_detail: bool,
    pub loading: bool,
    pub rates: HashMap<String, f64>,
    pub last_update: Option<DateTime<Utc>>,
    pub error_message: Option<String>,

    pending_fetch: bool,
}

impl DashboardApp {
    pub fn new(page_size: u32, asset_base_url: String) -> Self {
        Self {
            view: View::Orders,
            page_size,
            asset_base_url,
            orders: Vec::new(),
            orders_total: 0,
            orders_page: 1,
            materials: Vec::new(),
            materials_total: 0,
            materials_page: 1,
            selected: 0,
            show_detail: false,
            loading: false,
            rates: HashMap::new(),
            last_update: None,
            error_message: None,
            pending_fetch: true,
        }
    }

    /// Handle keyboard input; returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Esc => {
                if self.show_detail {
                    self.show_detail = false;
                } else {
                    return true;
                }
            }
            KeyCode::Char('1') => self.switch_view(View::Orders),
            KeyCode::Char('2') => self.switch_view(View::Materials),
            KeyCode::Char('n') => {
                if self.current_page() < self.total_pages() {
                    *self.current_page_mut() += 1;
                    self.selected = 0;
                    self.pending_fetch = true;
                }
            }
            KeyCode::Char('p') => {
                if self.current_page() > 1 {
                    *self.current_page_mut() -= 1;
                    self.selected = 0;
                    self.pending_fetch = true;
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected + 1 < self.row_count() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if self.view == View::Orders && self.selected < self.orders.len() {
                    self.show_detail = !self.show_detail;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.pending_fetch = true,
            _ => {}
        }
        false
    }

    fn switch_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.selected = 0;
            self.show_detail = false;
            self.pending_fetch = true;
        }
    }

    /// Consume the fetch request raised by the last key press
    pub fn take_pending_fetch(&mut self) -> bool {
        std::mem::take(&mut self.pending_fetch)
    }

    pub fn current_page(&self) -> u32 {
        match self.view {
            View::Orders => self.orders_page,
            View::Materials => self.materials_page,
        }
    }

    fn current_page_mut(&mut self) -> &mut u32 {
        match self.view {
            View::Orders => &mut self.orders_page,
            View::Materials => &mut self.materials_page,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let total = match self.view {
            View::Orders => self.orders_total,
            View::Materials => self.materials_total,
        };
        (total.div_ceil(u64::from(self.page_size)) as u32).max(1)
    }

    fn row_count(&self) -> usize {
        match self.view {
            View::Orders => self.orders.len(),
            View::Materials => self.materials.len(),
        }
    }

    pub fn apply_orders(&mut self, page: OrdersPage) {
        self.orders = page.orders;
        self.orders_total = page.total;
        self.selected = self.selected.min(self.orders.len().saturating_sub(1));
        self.last_update = Some(Utc::now());
        self.error_message = None;
    }

    pub fn apply_materials(&mut self, page: MaterialsPage) {
        self.materials = page.items;
        self.materials_total = page.total;
        self.selected = self.selected.min(self.materials.len().saturating_sub(1));
        self.last_update = Some(Utc::now());
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn selected_order(&self) -> Option<&Order> {
        self.orders.get(self.selected)
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let show_detail =
            self.show_detail && self.view == View::Orders && self.selected_order().is_some();

        let constraints = if show_detail {
            vec![
                Constraint::Length(3),
                Constraint::Percentage(40),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.view {
            View::Orders => self.render_orders_table(f, chunks[1]),
            View::Materials => self.render_materials_table(f, chunks[1]),
        }
        if show_detail {
            self.render_detail(f, chunks[2]);
            self.render_footer(f, chunks[3]);
        } else {
            self.render_footer(f, chunks[2]);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let view_name = match self.view {
            View::Orders => "Orders",
            View::Materials => "Materials",
        };

        let last_update = self
            .last_update
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let title = vec![
            Line::from(vec![
                Span::styled(
                    "CNC Admin",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" - "),
                Span::styled(view_name, Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "  |  Page {}/{}",
                    self.current_page(),
                    self.total_pages()
                )),
                Span::raw("  |  Last update: "),
                Span::styled(last_update, Style::default().fg(Color::Green)),
                if self.loading {
                    Span::styled("  (loading...)", Style::default().fg(Color::Yellow))
                } else {
                    Span::raw("")
                },
            ]),
            Line::from(Span::styled(
                "'q' quit | '1' orders | '2' materials | 'n'/'p' page | Enter detail | 'r' refresh",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_orders_table(&self, f: &mut Frame, area: Rect) {
        let header_cells = ["ID", "Price", "Name", "Email", "Status", "Created"]
            .iter()
            .map(|h| {
                Cell::from(*h).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows: Vec<Row> = if self.orders.is_empty() {
            vec![Row::new(vec![Cell::from("No orders on this page.")])]
        } else {
            self.orders
                .iter()
                .map(|order| {
                    let cells = vec![
                        Cell::from(format!("#{}", order.id)),
                        Cell::from(
                            order
                                .total_amount
                                .map(|amount| format!("{:.2}", amount))
                                .unwrap_or_else(|| detail::PLACEHOLDER.to_string()),
                        ),
                        Cell::from(order.name.clone().unwrap_or_default()),
                        Cell::from(order.email.clone().unwrap_or_default()),
                        Cell::from(order.status.as_str())
                            .style(Style::default().fg(status_color(order.status))),
                        Cell::from(
                            order
                                .created_at
                                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                                .unwrap_or_default(),
                        ),
                    ];
                    Row::new(cells).height(1)
                })
                .collect()
        };

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(22),
                Constraint::Percentage(10),
                Constraint::Percentage(16),
                Constraint::Percentage(22),
                Constraint::Percentage(14),
                Constraint::Percentage(16),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Orders"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .column_spacing(1);

        let mut state = TableState::default();
        state.select(Some(self.selected));
        f.render_stateful_widget(table, area, &mut state);
    }

    fn render_materials_table(&self, f: &mut Frame, area: Rect) {
        let header_cells = [
            "Material",
            "Thickness (mm)",
            "Setup (€)",
            "Cost Factor",
            "Loop Cost (€)",
            "Cost/m² (€)",
            "In Stock",
        ]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows: Vec<Row> = if self.materials.is_empty() {
            vec![Row::new(vec![Cell::from("No materials on this page.")])]
        } else {
            self.materials
                .iter()
                .map(|m| {
                    let cells = vec![
                        Cell::from(m.material.clone()),
                        Cell::from(
                            m.thickness
                                .map(|t| format!("{:.2}", t))
                                .unwrap_or_else(|| detail::PLACEHOLDER.to_string()),
                        ),
                        Cell::from(format!("{:.2}", m.setup_price)),
                        Cell::from(format!("{:.3}", m.cost_factor)),
                        Cell::from(format!("{:.2}", m.loop_cost)),
                        Cell::from(format!("{:.2}", m.cost_per_m2)),
                        if m.stock {
                            Cell::from("yes").style(Style::default().fg(Color::Green))
                        } else {
                            Cell::from("no").style(Style::default().fg(Color::Red))
                        },
                    ];
                    Row::new(cells).height(1)
                })
                .collect()
        };

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(22),
                Constraint::Percentage(13),
                Constraint::Percentage(13),
                Constraint::Percentage(13),
                Constraint::Percentage(13),
                Constraint::Percentage(13),
                Constraint::Percentage(13),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Materials"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .column_spacing(1);

        let mut state = TableState::default();
        state.select(Some(self.selected));
        f.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(&self, f: &mut Frame, area: Rect) {
        let Some(order) = self.selected_order() else {
            return;
        };

        let mut lines = Vec::new();

        for (index, item) in order.material_details.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("Metrics #{}", index + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for row in detail::line_item_rows(item, &self.asset_base_url) {
                lines.push(detail_line(&row));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Order Info",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for row in detail::order_info_rows(order) {
            lines.push(detail_line(&row));
        }
        lines.push(Line::from(""));

        let summary_spans: Vec<Span> = detail::summary_rows(order, &self.rates)
            .into_iter()
            .flat_map(|row| {
                vec![
                    Span::styled(
                        format!("{}: ", row.label),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(format!("{}   ", row.value)),
                ]
            })
            .collect();
        lines.push(Line::from(summary_spans));

        let title = format!("Order #{} ({})", order.id, order.display_currency());
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let content = if let Some(error) = &self.error_message {
            vec![
                Line::from(Span::styled(
                    format!("Error: {}", error),
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(
                    "(press 'r' to retry)",
                    Style::default().fg(Color::Yellow),
                )),
            ]
        } else {
            let total = match self.view {
                View::Orders => format!("{} orders", self.orders_total),
                View::Materials => format!("{} materials", self.materials_total),
            };
            vec![Line::from(vec![
                Span::styled("Total: ", Style::default().fg(Color::Cyan)),
                Span::raw(total),
            ])]
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

fn detail_line(row: &detail::DetailRow) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("  {:<13}", row.label),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(row.value.clone()),
    ];
    if let Some(suffix) = &row.suffix {
        spans.push(Span::styled(
            format!("  {}", suffix),
            Style::default().fg(Color::Green),
        ));
    }
    Line::from(spans)
}

fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::Yellow,
        OrderStatus::InProgress => Color::Cyan,
        OrderStatus::Manufactured => Color::Blue,
        OrderStatus::Delivered => Color::Green,
        OrderStatus::Cancelled => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn app() -> DashboardApp {
        DashboardApp::new(10, "http://localhost:9000".to_string())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_app_wants_initial_fetch() {
        let mut app = app();
        assert!(app.take_pending_fetch());
        assert!(!app.take_pending_fetch());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_esc_closes_detail_before_quitting() {
        let mut app = app();
        app.show_detail = true;
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(!app.show_detail);
        assert!(app.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_pagination_bounds() {
        let mut app = app();
        app.take_pending_fetch();
        app.apply_orders(OrdersPage {
            orders: Vec::new(),
            total: 25,
        });
        assert_eq!(app.total_pages(), 3);

        // cannot go below page 1
        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(app.orders_page, 1);
        assert!(!app.take_pending_fetch());

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.orders_page, 2);
        assert!(app.take_pending_fetch());

        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Char('n')));
        // clamped at the last page
        assert_eq!(app.orders_page, 3);
    }

    #[test]
    fn test_view_switch_resets_selection() {
        let mut app = app();
        app.selected = 4;
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.view, View::Materials);
        assert_eq!(app.selected, 0);
        assert!(app.take_pending_fetch());
    }

    #[test]
    fn test_apply_orders_clamps_selection() {
        let mut app = app();
        app.selected = 9;
        let orders: Vec<Order> = (0..3)
            .map(|i| serde_json::from_str(&format!(r#"{{"_id": "o{}"}}"#, i)).unwrap())
            .collect();
        app.apply_orders(OrdersPage { orders, total: 3 });
        assert_eq!(app.selected, 2);
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_error_does_not_clear_data() {
        let mut app = app();
        app.apply_materials(MaterialsPage {
            items: vec![Material::default()],
            total: 1,
        });
        app.set_error("fetch failed".to_string());
        assert_eq!(app.materials.len(), 1);
        assert!(app.error_message.is_some());
    }
}
