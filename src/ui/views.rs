use crate::app::{App, FormField};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use shipbox_lib::form::CharCountLevel;
use shipbox_lib::notifications::Severity;
use shipbox_lib::route::View;
use shipbox_lib::shipping::{format_currency, Rgb, RECEIVER_NAME_MAX_LENGTH};

fn swatch(color: Rgb) -> Span<'static> {
    Span::styled("    ", Style::default().bg(Color::Rgb(color.r, color.g, color.b)))
}

fn title(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
}

/// Render app name and navigation tabs
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut tabs = vec![Span::styled(
        format!("📦 {}   ", app.config.app_name),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (key, view) in [("F1", View::AddBox), ("F2", View::ListBoxes)] {
        let style = if app.view == view {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tabs.push(Span::styled(format!(" {} {} ", key, view.title()), style));
        tabs.push(Span::raw(" "));
    }

    let separator = "─".repeat(area.width as usize);
    let lines = vec![
        Line::from(tabs),
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Render the add-box form
pub fn render_add_view(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let mut lines = vec![title("Add New Shipping Box"), Line::from("")];

    // Receiver name, with character counter
    let count_style = match form.char_count_level() {
        CharCountLevel::Normal => Style::default().fg(Color::DarkGray),
        CharCountLevel::Warning => Style::default().fg(Color::Yellow),
        CharCountLevel::Exceeded => Style::default().fg(Color::Red),
    };
    let counter = vec![
        Span::raw("  "),
        Span::styled(
            format!("{}/{}", form.char_count(), RECEIVER_NAME_MAX_LENGTH),
            count_style,
        ),
    ];
    lines.push(field_label(app, FormField::ReceiverName, "Receiver Name", counter));
    lines.push(field_value(
        app,
        FormField::ReceiverName,
        &form.receiver_name,
        "Enter receiver name",
    ));
    push_error(&mut lines, form.errors.receiver_name.as_deref());

    // Weight
    lines.push(field_label(app, FormField::Weight, "Weight (kg)", Vec::new()));
    lines.push(field_value(app, FormField::Weight, &form.weight, "Enter weight in kilograms"));
    push_error(&mut lines, form.errors.weight.as_deref());

    // Color: swatch of the committed color, plus what is being typed
    lines.push(field_label(app, FormField::Color, "Box Color", Vec::new()));
    let typing = if app.focused_field == FormField::Color {
        format!("#{}_", app.color_input)
    } else {
        form.color.to_hex()
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        swatch(form.color),
        Span::styled(format!(" {} ", typing), Style::default().fg(Color::White)),
        Span::styled(
            format!(" RGB: ({})", form.color.to_decimal_triplet()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(""));

    // Country selector
    lines.push(field_label(app, FormField::Country, "Destination Country", Vec::new()));
    let (country_text, country_style) = match form.country {
        Some(country) => (country.name().to_string(), Style::default().fg(Color::White)),
        None => ("Select a country".to_string(), Style::default().fg(Color::DarkGray)),
    };
    lines.push(Line::from(vec![
        Span::styled("  ◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(country_text, country_style),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]));
    push_error(&mut lines, form.errors.country.as_deref());

    lines.push(Line::from(Span::styled(
        "[ Save box ]",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn field_label<'a>(
    app: &App,
    field: FormField,
    label: &'a str,
    extra: Vec<Span<'a>>,
) -> Line<'a> {
    let (prefix, style) = if app.focused_field == field {
        ("→ ", Style::default().fg(Color::Cyan))
    } else {
        ("  ", Style::default().fg(Color::White))
    };

    let mut spans = vec![
        Span::styled(prefix, style),
        Span::styled(label, style.add_modifier(Modifier::BOLD)),
        Span::styled(" *", Style::default().fg(Color::Red)),
    ];
    spans.extend(extra);
    Line::from(spans)
}

fn field_value<'a>(
    app: &App,
    field: FormField,
    value: &'a str,
    placeholder: &'a str,
) -> Line<'a> {
    let focused = app.focused_field == field;
    if value.is_empty() && !focused {
        return Line::from(vec![
            Span::raw("  "),
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ]);
    }

    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled("  > ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}{}", value, cursor), Style::default().fg(Color::White)),
    ])
}

fn push_error(lines: &mut Vec<Line<'_>>, error: Option<&str>) {
    match error {
        Some(message) => lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
}

/// Render the box list with totals
pub fn render_list_view(f: &mut Frame, app: &App, area: Rect) {
    let boxes = app.store.boxes();

    if boxes.is_empty() {
        let lines = vec![
            title("Shipping Boxes List"),
            Line::from(""),
            Line::from(Span::styled("No boxes added yet.", Style::default().fg(Color::Yellow))),
            Line::from(Span::styled(
                "Go to \"Add Box\" to create your first shipping box.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let title_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 2,
    };
    f.render_widget(Paragraph::new(title("Shipping Boxes List")), title_area);

    let summary_height = 2;
    let table_area = Rect {
        x: area.x,
        y: area.y + 2,
        width: area.width,
        height: area.height.saturating_sub(2 + summary_height),
    };

    let currency = &app.config.currency;
    let header = Row::new(vec![
        Cell::from("Receiver Name"),
        Cell::from("Weight (kg)"),
        Cell::from("Box Colour"),
        Cell::from("Destination Country"),
        Cell::from(format!("Shipping Cost ({})", currency)),
    ])
    .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = boxes
        .iter()
        .skip(app.list_scroll)
        .map(|b| {
            Row::new(vec![
                Cell::from(b.receiver_name.as_str()),
                Cell::from(b.weight.to_string()),
                Cell::from(Line::from(vec![
                    swatch(b.rgb()),
                    Span::raw(format!(" ({})", b.color)),
                ])),
                Cell::from(b.country.name()),
                Cell::from(format_currency(b.shipping_cost, currency)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(26),
        Constraint::Percentage(12),
        Constraint::Percentage(24),
        Constraint::Percentage(18),
        Constraint::Percentage(20),
    ];
    f.render_widget(Table::new(rows, widths).header(header), table_area);

    let summary_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(summary_height),
        width: area.width,
        height: summary_height.min(area.height),
    };
    let summary = Line::from(vec![
        Span::styled("Total Boxes: ", Style::default().fg(Color::DarkGray)),
        Span::styled(boxes.len().to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("   Total Weight: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{:.2} kg", app.store.total_weight())),
        Span::styled("   Total Shipping Cost: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_currency(app.store.total_shipping_cost(), currency),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(summary), summary_area);
}

/// Render the notification stack, newest last
pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height as usize;
    let active = app.notifications.active();
    let skip = active.len().saturating_sub(visible);

    let lines: Vec<Line> = active
        .iter()
        .skip(skip)
        .map(|n| {
            let color = match n.severity {
                Severity::Success => Color::Green,
                Severity::Error => Color::Red,
                Severity::Info => Color::Blue,
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", n.severity.icon()),
                    Style::default().fg(Color::Black).bg(color),
                ),
                Span::styled(format!(" {}", n.message), Style::default().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

/// Shortcuts shown in every view
const GLOBAL_HINTS: [(&str, &str); 3] = [
    ("F1/F2", " switch view  "),
    ("Esc", " dismiss  "),
    ("Ctrl+Q", " quit"),
];

/// Render hints bar (no borders, minimal)
pub fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let view_hints: &[(&str, &str)] = match app.view {
        View::AddBox => &[
            ("Tab", " next field  "),
            ("←→", " country  "),
            ("Enter", " save  "),
        ],
        View::ListBoxes => &[("↑↓", " scroll  ")],
    };

    let spans: Vec<Span> = view_hints
        .iter()
        .chain(GLOBAL_HINTS.iter())
        .flat_map(|(key, text)| {
            [
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(*text, Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    let separator = "─".repeat(area.width as usize);
    let lines = vec![
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
        Line::from(spans),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
