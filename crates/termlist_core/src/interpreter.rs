use crate::clipboard::Clipboard;
use crate::error::AppError;
use crate::store::TaskStore;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Presentation category for one output line. Purely cosmetic; the host
/// decides what, if anything, each style looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Dim,
    Err,
    Ok,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: Style,
}

impl Line {
    fn new<T: Into<String>>(text: T, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One instruction for the host surface, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOp {
    Clear,
    Print(Line),
}

/// Maps one submitted line to a command, executes it against the task
/// store, and yields the ops the host should apply. Stateless across calls
/// except for the last submitted line kept for host-level recall.
pub struct Interpreter {
    store: TaskStore,
    clipboard: Box<dyn Clipboard>,
    last_input: Option<String>,
}

impl Interpreter {
    pub fn new(store: TaskStore, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            store,
            clipboard,
            last_input: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Last non-empty submitted line, for an optional recall affordance.
    pub fn last_input(&self) -> Option<&str> {
        self.last_input.as_deref()
    }

    /// Ops for the host's initial paint: current list plus a ready line.
    pub fn startup(&self, ready_text: &str) -> Vec<ScreenOp> {
        let mut ops = vec![ScreenOp::Clear];
        self.render_tasks(&mut ops);
        ops.push(ScreenOp::Print(Line::new(ready_text, Style::Ok)));
        ops
    }

    pub fn run(&mut self, raw: &str) -> Vec<ScreenOp> {
        let input = raw.trim();
        if input.is_empty() {
            return Vec::new();
        }

        self.last_input = Some(input.to_string());

        let mut ops = vec![ScreenOp::Print(Line::new(format!("> {input}"), Style::Dim))];

        if input.eq_ignore_ascii_case("help") {
            self.help(&mut ops);
        } else if input.eq_ignore_ascii_case("clear") {
            ops.push(ScreenOp::Clear);
            self.render_tasks(&mut ops);
        } else if input.eq_ignore_ascii_case("reset") {
            let outcome = self.store.reset_all();
            self.finish_mutation(outcome, &mut ops);
        } else if input.eq_ignore_ascii_case("undo") {
            self.undo(&mut ops);
        } else if input.eq_ignore_ascii_case("export") {
            self.export(&mut ops);
        } else if input.eq_ignore_ascii_case("today") {
            self.today(&mut ops);
        } else if let Some(text) = payload(input, "add:") {
            let outcome = self.store.add(text);
            self.finish_mutation(outcome, &mut ops);
        } else if let Some(digits) = index_payload(input, "x:") {
            let outcome = self.with_index(digits, TaskStore::toggle);
            self.finish_mutation(outcome, &mut ops);
        } else if let Some(digits) = index_payload(input, "del:") {
            let outcome = self.with_index(digits, TaskStore::delete);
            self.finish_mutation(outcome, &mut ops);
        } else if let Some(json) = payload(input, "import:") {
            self.import(json, &mut ops);
        } else {
            ops.push(ScreenOp::Print(Line::new(
                "unknown command — type help",
                Style::Err,
            )));
        }

        ops
    }

    fn with_index(
        &mut self,
        digits: &str,
        op: fn(&mut TaskStore, usize) -> Result<(), AppError>,
    ) -> Result<(), AppError> {
        match digits.parse::<usize>() {
            Ok(index) => op(&mut self.store, index),
            Err(_) => Err(AppError::InvalidIndex),
        }
    }

    fn finish_mutation(&mut self, outcome: Result<(), AppError>, ops: &mut Vec<ScreenOp>) {
        match outcome {
            Ok(()) => {
                ops.push(ScreenOp::Clear);
                self.render_tasks(ops);
            }
            Err(err) => ops.push(ScreenOp::Print(error_line(&err))),
        }
    }

    fn undo(&mut self, ops: &mut Vec<ScreenOp>) {
        match self.store.undo() {
            Ok(false) => ops.push(ScreenOp::Print(Line::new("nothing to undo", Style::Dim))),
            Ok(true) => {
                ops.push(ScreenOp::Clear);
                self.render_tasks(ops);
                ops.push(ScreenOp::Print(Line::new("undone ✓", Style::Ok)));
            }
            Err(err) => ops.push(ScreenOp::Print(error_line(&err))),
        }
    }

    fn export(&mut self, ops: &mut Vec<ScreenOp>) {
        let payload = match self.store.export_json() {
            Ok(payload) => payload,
            Err(err) => {
                ops.push(ScreenOp::Print(error_line(&err)));
                return;
            }
        };

        match self.clipboard.write(&payload) {
            Ok(()) => ops.push(ScreenOp::Print(Line::new(
                "exported to clipboard ✓",
                Style::Ok,
            ))),
            Err(_) => {
                ops.push(ScreenOp::Print(Line::new(
                    "copy failed — here is your JSON:",
                    Style::Err,
                )));
                ops.push(ScreenOp::Print(Line::new(payload, Style::Plain)));
            }
        }
    }

    fn import(&mut self, json: &str, ops: &mut Vec<ScreenOp>) {
        match self.store.import_replace(json) {
            Ok(()) => {
                ops.push(ScreenOp::Clear);
                self.render_tasks(ops);
                ops.push(ScreenOp::Print(Line::new("imported ✓", Style::Ok)));
            }
            Err(err) => ops.push(ScreenOp::Print(error_line(&err))),
        }
    }

    fn today(&mut self, ops: &mut Vec<ScreenOp>) {
        match today_label() {
            Ok(label) => {
                let outcome = self.store.add(&format!("— {label} —"));
                self.finish_mutation(outcome, ops);
            }
            Err(err) => ops.push(ScreenOp::Print(error_line(&err))),
        }
    }

    fn help(&self, ops: &mut Vec<ScreenOp>) {
        ops.push(ScreenOp::Print(Line::new("commands:", Style::Dim)));
        for entry in [
            "  help               show this",
            "  add: <text>        add a task",
            "  x: <n>             toggle done for item n",
            "  del: <n>           delete item n",
            "  clear              clear screen (keeps tasks)",
            "  reset              delete ALL tasks",
            "  undo               revert the last change",
            "  export             copy tasks JSON to clipboard",
            "  import: <json>     import tasks JSON",
            "  today              add today's date as a divider",
        ] {
            ops.push(ScreenOp::Print(Line::new(entry, Style::Plain)));
        }
        ops.push(ScreenOp::Print(Line::new("tips:", Style::Dim)));
        ops.push(ScreenOp::Print(Line::new(
            "  type !! to recall the last command",
            Style::Plain,
        )));
    }

    fn render_tasks(&self, ops: &mut Vec<ScreenOp>) {
        if self.store.is_empty() {
            ops.push(ScreenOp::Print(Line::new(
                "no tasks yet — try: add: your next tiny win",
                Style::Dim,
            )));
            return;
        }

        for (position, task) in self.store.tasks().iter().enumerate() {
            let mark = if task.done { "[x]" } else { "[ ]" };
            let style = if task.done { Style::Done } else { Style::Plain };
            ops.push(ScreenOp::Print(Line::new(
                format!("{} {} {}", position + 1, mark, task.text),
                style,
            )));
        }
    }
}

fn error_line(err: &AppError) -> Line {
    let text = match err {
        AppError::EmptyTask => "error: empty task".to_string(),
        AppError::InvalidIndex => "error: invalid index".to_string(),
        AppError::ImportFormat(_) => "error: invalid JSON for import".to_string(),
        _ => format!("error: {}", err.message()),
    };
    Line::new(text, Style::Err)
}

// `add:` style prefix match: case-insensitive keyword, then the rest of the
// line with leading whitespace stripped. An empty payload does not match,
// so a bare `add:` falls through to unknown command.
fn payload<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = input[prefix.len()..].trim_start();
    (!rest.is_empty()).then_some(rest)
}

// `x:` and `del:` payloads must be all digits; anything else is not a match
// and ends up reported as an unknown command.
fn index_payload<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let digits = payload(input, prefix)?;
    digits
        .bytes()
        .all(|byte| byte.is_ascii_digit())
        .then_some(digits)
}

fn today_label() -> Result<String, AppError> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    let format = format_description!("[weekday repr:short], [month repr:short] [day padding:none]");
    now.format(&format)
        .map_err(|err| AppError::storage(err.to_string()))
}
