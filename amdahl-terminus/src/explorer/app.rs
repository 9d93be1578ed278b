// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::sync::mpsc::TryRecvError;

use amdahl_engine::analysis::{Comparator, Comparison};
use amdahl_engine::dataset::predefined_components;
use amdahl_engine::evaluator::Evaluator;
use amdahl_engine::result::SpeedupResult;
use amdahl_engine::sweep::{Series, factor_range, speedup_vs_factor};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::config::Config;
use crate::explorer::ui::{
    render_chart, render_components, render_entry_form, render_help, render_help_line,
    render_messages_area, render_text_pane,
};
use crate::explorer::worker::{WorkedProblemReceiver, spawn_worked_problem};
use crate::input_field::InputField;
use crate::report::{
    format_comparison, format_efficiency, format_result, format_worked_problem,
};
use crate::scroll_list::ScrollList;
use crate::session::Session;
use crate::{Draw, Logger, report_skipped};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

/// Collects messages for the Messages pane.
pub struct AppLogger {
    pub messages: ScrollList<Message>,
}

impl Default for AppLogger {
    fn default() -> Self {
        Self {
            messages: ScrollList::new(true),
        }
    }
}

impl Logger for AppLogger {
    fn error(&mut self, message: &str) {
        self.messages.push(Message {
            level: MessageLevel::Error,
            text: message.to_string(),
        });
    }

    fn info(&mut self, message: &str) {
        self.messages.push(Message {
            level: MessageLevel::Info,
            text: message.to_string(),
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    ComponentSelection,
    EntryEditing,
    ResultsViewing,
    ViewMessages,
    ShowHelp,
}

impl AppState {
    /// The pane reached with Tab.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            AppState::ComponentSelection => AppState::EntryEditing,
            AppState::EntryEditing => AppState::ResultsViewing,
            AppState::ResultsViewing => AppState::ViewMessages,
            AppState::ViewMessages | AppState::ShowHelp => AppState::ComponentSelection,
        }
    }

    /// The pane reached with Shift+Tab.
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            AppState::ComponentSelection | AppState::ShowHelp => AppState::ViewMessages,
            AppState::EntryEditing => AppState::ComponentSelection,
            AppState::ResultsViewing => AppState::EntryEditing,
            AppState::ViewMessages => AppState::ResultsViewing,
        }
    }
}

/// Index of each text field in the entry form.
pub const NAME_FIELD: usize = 0;
pub const PERCENT_FIELD: usize = 1;
pub const FACTOR_FIELD: usize = 2;

/// App holds the state of the explorer
pub struct App {
    config: Config,

    comparator: Comparator,

    /// Whether or not the application is still running or should quit
    running: bool,

    app_state: AppState,
    previous_app_state: AppState,

    /// The predefined GPU components, already evaluated and ranked
    predefined: ScrollList<SpeedupResult>,

    /// Components entered by the user
    session: Session,

    /// Name, percent and factor fields of the entry form
    entry_fields: [InputField; 3],
    entry_focus: usize,

    /// Lines of the Results pane
    results: ScrollList<String>,

    /// Lines of the last-N analysis pane
    last_n: Vec<String>,

    /// Speedup against improvement factor, one series per configured fraction
    chart: Vec<Series>,

    /// Set while the worked problem is being solved in the background
    worker: Option<WorkedProblemReceiver>,

    logger: AppLogger,
}

fn text_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let comparator = Comparator::new(Evaluator);
        let mut logger = AppLogger::default();

        let analysis = comparator.evaluate_all(&predefined_components());
        report_skipped(&analysis, &mut logger);
        let mut predefined = ScrollList::default();
        predefined.set_rows(analysis.ranked_results().into_iter().cloned().collect());

        let chart = speedup_vs_factor(config.factor_sweep_fractions(), &factor_range());

        let mut app = Self {
            config,
            comparator,
            running: true,
            app_state: AppState::ComponentSelection,
            previous_app_state: AppState::ComponentSelection,
            predefined,
            session: Session::new(),
            entry_fields: [
                InputField::new("Name"),
                InputField::new("Improvable work (%)"),
                InputField::new("Improvement factor"),
            ],
            entry_focus: NAME_FIELD,
            results: ScrollList::default(),
            last_n: Vec::new(),
            chart,
            worker: None,
            logger,
        };
        app.refresh_last_n();
        app.logger
            .info("Press ? for help, s to solve the worked problem");
        app
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn exit(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn app_state(&self) -> AppState {
        self.app_state
    }

    pub fn set_app_state(&mut self, app_state: AppState) {
        self.previous_app_state = self.app_state;
        self.app_state = app_state;
    }

    pub fn restore_app_state(&mut self) {
        self.app_state = self.previous_app_state;
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn predefined(&mut self) -> &mut ScrollList<SpeedupResult> {
        &mut self.predefined
    }

    pub fn results(&mut self) -> &mut ScrollList<String> {
        &mut self.results
    }

    #[must_use]
    pub fn results_lines(&self) -> &[String] {
        self.results.rows()
    }

    #[must_use]
    pub fn last_n_lines(&self) -> &[String] {
        &self.last_n
    }

    #[must_use]
    pub fn chart(&self) -> &[Series] {
        &self.chart
    }

    pub fn logger(&mut self) -> &mut AppLogger {
        &mut self.logger
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.logger.messages.rows()
    }

    #[must_use]
    pub fn entry_field(&self, index: usize) -> &InputField {
        &self.entry_fields[index]
    }

    /// The entry form field being edited.
    pub fn focused_field(&mut self) -> &mut InputField {
        &mut self.entry_fields[self.entry_focus]
    }

    #[must_use]
    pub fn entry_focus(&self) -> usize {
        self.entry_focus
    }

    pub fn focus_next_field(&mut self) {
        self.entry_focus = (self.entry_focus + 1) % self.entry_fields.len();
    }

    pub fn focus_previous_field(&mut self) {
        self.entry_focus =
            (self.entry_focus + self.entry_fields.len() - 1) % self.entry_fields.len();
    }

    fn show_text(&mut self, text: &str) {
        self.results.set_rows(text_lines(text));
        self.results.select(0);
    }

    /// Show the details of the predefined component under the cursor.
    pub fn show_selected_component(&mut self) {
        let Some(result) = self.predefined.selected() else {
            return;
        };
        let evaluator = self.comparator.evaluator();
        let text = match result.with_timing(evaluator, self.config.original_duration_ms()) {
            Ok(timed) => {
                let mut text = format_result(&timed);
                text.push_str("\n\n");
                text.push_str(&format_efficiency(&timed.efficiency_report()));
                match self
                    .comparator
                    .limited_impact_explanation(timed.component())
                {
                    Ok(explanation) => {
                        text.push_str("\n\n");
                        text.push_str(&explanation);
                    }
                    Err(e) => self.logger.error(&e.to_string()),
                }
                text
            }
            Err(e) => {
                self.logger.error(&e.to_string());
                return;
            }
        };
        self.show_text(&text);
    }

    /// Rank the predefined components and show why the winner was chosen.
    pub fn compare_predefined(&mut self) {
        let analysis = self.comparator.evaluate_all(&predefined_components());
        report_skipped(&analysis, &mut self.logger);
        let text = format_comparison(&Comparison::Ranked(analysis));
        self.show_text(&text);
    }

    /// Add the component described by the entry form to the session.
    pub fn add_entry(&mut self) {
        let [name, percent, factor] = &self.entry_fields;
        let entered = self
            .session
            .enter(name.value(), percent.value(), factor.value());

        let component = match entered {
            Ok(component) => component,
            Err(e) => {
                self.logger.error(&e.to_string());
                return;
            }
        };
        self.logger.info(&format!("Added {component}"));

        match self.comparator.evaluate(&component) {
            Ok(result) => {
                let text = format_result(&result);
                self.show_text(&text);
            }
            Err(e) => self.logger.error(&format!("{}: {e}", component.name())),
        }

        for field in &mut self.entry_fields {
            field.clear();
        }
        self.entry_focus = NAME_FIELD;
        self.refresh_last_n();
    }

    /// Forget every entered component.
    pub fn clear_session(&mut self) {
        self.session.clear();
        self.logger.info("Cleared entered components");
        self.refresh_last_n();
    }

    fn refresh_last_n(&mut self) {
        let comparison = self
            .session
            .compare_last_n(&self.comparator, self.config.last_n());
        self.last_n = text_lines(&format_comparison(&comparison));
    }

    #[must_use]
    pub fn is_solving(&self) -> bool {
        self.worker.is_some()
    }

    /// Start solving the worked problem in the background.
    pub fn start_worked_problem(&mut self) {
        if self.is_solving() {
            self.logger.info("The worked problem is already being solved");
            return;
        }
        self.logger.info("Solving the worked problem");
        self.worker = Some(spawn_worked_problem(
            self.comparator,
            self.config.original_duration_ms(),
            self.config.target_speedup(),
        ));
    }

    /// Called regularly by the event loop to collect background work.
    pub fn tick(&mut self) {
        let Some(receiver) = &self.worker else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(problem)) => {
                self.worker = None;
                let text = format_worked_problem(&problem);
                self.show_text(&text);
                self.logger.info("Worked problem solved");
            }
            Ok(Err(e)) => {
                self.worker = None;
                self.logger.error(&e.to_string());
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.worker = None;
                self.logger
                    .error("The worked problem stopped without a result");
            }
        }
    }
}

impl Draw for App {
    fn draw(&self, frame: &mut Frame) {
        if self.app_state == AppState::ShowHelp {
            render_help(frame, frame.area());
            return;
        }

        let vertical = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(11),
            Constraint::Min(8),
            Constraint::Length(14),
            Constraint::Length(6),
        ]);
        let [help_area, top_area, text_area, chart_area, messages_area] =
            vertical.areas(frame.area());
        let [components_area, entry_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(top_area);
        let [results_area, last_n_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(text_area);

        render_help_line(frame, help_area, self.app_state, self.is_solving());
        render_components(
            frame,
            components_area,
            &self.predefined,
            self.app_state == AppState::ComponentSelection,
        );
        render_entry_form(
            frame,
            entry_area,
            &self.entry_fields,
            self.entry_focus,
            self.app_state == AppState::EntryEditing,
        );
        render_text_pane(
            frame,
            results_area,
            "Results",
            self.results.rows(),
            self.results.index(),
            self.app_state == AppState::ResultsViewing,
        );
        render_text_pane(
            frame,
            last_n_area,
            &format!("Last {} entered", self.config.last_n()),
            &self.last_n,
            0,
            false,
        );
        render_chart(frame, chart_area, &self.chart);
        render_messages_area(
            frame,
            messages_area,
            &self.logger.messages,
            self.app_state == AppState::ViewMessages,
        );
    }
}
