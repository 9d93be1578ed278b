// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use amdahl_engine::result::SpeedupResult;
use amdahl_engine::sweep::Series;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph,
};

use crate::block_style;
use crate::explorer::app::{AppState, Message, MessageLevel};
use crate::input_field::InputField;
use crate::scroll_list::ScrollList;

/// Colours given to the chart series in turn
const SERIES_COLOURS: [Color; 4] = [Color::Cyan, Color::Magenta, Color::Green, Color::Yellow];

struct HelpRender<'a> {
    style_header: Style,
    style_key: Style,
    indent: &'static str,
    lines: Vec<Line<'a>>,
}

impl<'a> HelpRender<'a> {
    fn new() -> Self {
        Self {
            style_header: Style::default().add_modifier(Modifier::BOLD),
            style_key: Style::default().bg(Color::Blue).fg(Color::White),
            indent: "  ",
            lines: Vec::new(),
        }
    }

    fn header(&mut self, header: &'a str, text: &[&'a str]) {
        self.lines.push(Line::from(""));
        self.lines
            .push(Line::from(Span::styled(header, self.style_header)));
        for line in text {
            self.lines
                .push(Line::from(vec![Span::from(self.indent), Span::from(*line)]));
        }
        self.lines.push(Line::from(""));
    }

    fn key(&mut self, key: &'a str, help: &'a str) {
        self.lines.push(Line::from(vec![
            Span::from(self.indent),
            Span::styled(key, self.style_key),
            Span::from(format!(": {help}")),
        ]));
    }
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let mut help = HelpRender::new();

    help.header(
        "Overview:",
        &[
            "Explore Amdahl's Law: A = 1 / ((1 - f) + f / k).",
            "Pick a predefined GPU component to see its speedup, or enter your own",
            "components. The most recently entered ones are compared on the right.",
        ],
    );

    help.header("Anywhere except the entry form:", &[]);
    help.key("<Tab>/<S-Tab>", "move between panes");
    help.key("<Esc>", "exit");
    help.key("?", "show this help");
    help.key("s", "solve the complete worked problem");
    help.key("c", "compare the predefined components");
    help.key("x", "forget the entered components");

    help.header("Components:", &[]);
    help.key("<Up>,k/<Down>,j", "move through the components");
    help.key("<Enter>", "show the selected component in detail");

    help.header("Entry form:", &[]);
    help.key("<Up>/<Down>", "move between fields");
    help.key("<Enter>", "add the component");
    help.key("<Esc>", "leave the form");
    help.key("ctrl+a/ctrl+e", "move to start/end of the field");
    help.key("ctrl+u", "clear the field");

    help.header("Results and messages:", &[]);
    help.key("<PgUp>/<PgDn>", "scroll a page");
    help.key("ctrl+u/ctrl+f", "same as <PgUp>/<PgDn>");

    frame.render_widget(
        Paragraph::new(help.lines)
            .block(
                Block::default()
                    .title("Help (press any key to return)")
                    .title_alignment(Alignment::Left)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .alignment(Alignment::Left),
        area,
    );
}

pub fn render_help_line(frame: &mut Frame, area: Rect, app_state: AppState, solving: bool) {
    let prefix = match app_state {
        AppState::ComponentSelection => "Components: ".bold(),
        AppState::EntryEditing => "Enter Component: ".bold(),
        AppState::ResultsViewing => "Results: ".bold(),
        AppState::ViewMessages => "Messages: ".bold(),
        AppState::ShowHelp => "Help: ".bold(),
    };
    let mut spans = vec![
        prefix,
        "Press ".into(),
        "Tab".bold(),
        " to change panes, ".into(),
        "?".bold(),
        " for help, ".into(),
        "Esc".bold(),
        " to exit.".into(),
    ];
    match app_state {
        AppState::ComponentSelection => {
            spans.extend([" Enter".bold(), " for details.".into()]);
        }
        AppState::EntryEditing => {
            spans.extend([" Enter".bold(), " to add.".into()]);
        }
        _ => {}
    }
    if solving {
        spans.push(" Solving...".italic());
    }
    frame.render_widget(Paragraph::new(Text::from(Line::from(spans))), area);
}

pub fn render_components(
    frame: &mut Frame,
    area: Rect,
    components: &ScrollList<SpeedupResult>,
    current_block: bool,
) {
    let start = components.window_start(area.height);
    let items: Vec<ListItem> = components
        .rows()
        .iter()
        .enumerate()
        .skip(start)
        .take(usize::from(area.height))
        .map(|(index, result)| {
            let mut style = Style::default();
            if index == components.index() {
                style = style.bold();
            }
            let text = format!(
                "{:<20} {:.4}x (max {:.4}x)",
                result.component().name(),
                result.speedup(),
                result.theoretical_ceiling()
            );
            ListItem::new(Line::from(text).style(style))
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title("GPU components"))
        .style(block_style(current_block));
    frame.render_widget(list, area);
}

pub fn render_entry_form(
    frame: &mut Frame,
    area: Rect,
    fields: &[InputField],
    focus: usize,
    current_block: bool,
) {
    let block = Block::bordered()
        .title("New component")
        .style(block_style(current_block));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let areas = Layout::vertical(fields.iter().map(|_| Constraint::Length(3))).split(inner);
    for (index, (field, field_area)) in fields.iter().zip(areas.iter()).enumerate() {
        let editing = current_block && index == focus;
        let input = Paragraph::new(field.value())
            .style(block_style(editing))
            .block(Block::bordered().title(field.label()));
        frame.render_widget(input, *field_area);

        if editing {
            let cursor = u16::try_from(field.cursor()).unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                field_area.x.saturating_add(cursor).saturating_add(1),
                field_area.y + 1,
            ));
        }
    }
}

/// A bordered pane of text scrolled so that line `index` is visible.
pub fn render_text_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: &[String],
    index: usize,
    current_block: bool,
) {
    let height = usize::from(area.height.saturating_sub(2));
    let start = index.min(lines.len().saturating_sub(height));
    let items: Vec<ListItem> = lines
        .iter()
        .skip(start)
        .take(height)
        .map(|line| ListItem::new(Line::from(line.as_str())))
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(title.to_string()))
        .style(block_style(current_block));
    frame.render_widget(list, area);
}

fn axis_labels(min: f64, max: f64) -> Vec<String> {
    let mid = (min + max) / 2.0;
    vec![format!("{min:.1}"), format!("{mid:.1}"), format!("{max:.1}")]
}

pub fn render_chart(frame: &mut Frame, area: Rect, series: &[Series]) {
    let points = series.iter().flat_map(|s| s.points.iter());
    let (x_max, y_max) = points.fold((1.0_f64, 1.0_f64), |(x, y), (px, py)| {
        (x.max(*px), y.max(*py))
    });
    let y_max = y_max.ceil().max(y_max + 0.1);

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(SERIES_COLOURS.iter().cycle())
        .map(|(s, colour)| {
            Dataset::default()
                .name(s.label.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*colour))
                .data(&s.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::bordered().title("Speedup against improvement factor"))
        .x_axis(
            Axis::default()
                .title("k")
                .bounds([1.0, x_max])
                .labels(axis_labels(1.0, x_max)),
        )
        .y_axis(
            Axis::default()
                .title("A")
                .bounds([1.0, y_max])
                .labels(axis_labels(1.0, y_max)),
        );
    frame.render_widget(chart, area);
}

pub fn render_messages_area(
    frame: &mut Frame,
    area: Rect,
    messages: &ScrollList<Message>,
    current_block: bool,
) {
    let start = messages.window_start(area.height);
    let items: Vec<ListItem> = messages
        .rows()
        .iter()
        .skip(start)
        .take(usize::from(area.height))
        .map(|m| {
            let style = match m.level {
                MessageLevel::Info => Style::default(),
                MessageLevel::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(Line::from(Span::styled(m.text.as_str(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title("Messages"))
        .style(block_style(current_block));
    frame.render_widget(list, area);
}
