use super::utils::{fit, time_input_display};
use super::*;
use crate::app::{CellField, SleepEdit, SleepField};
use crate::duration::{classify, elapsed_minutes, RangeFit};
use crate::time_utils::{format_clock, to_local_time};
use cradle_client::SleepEntry;

// Column x offsets into the padded content area, shared with the mouse
// hit-test.
const START_X: u16 = 7;
const START_W: u16 = 5;
const END_X: u16 = 14;
const END_W: u16 = 5;
const DURATION_X: u16 = 21;
const DURATION_W: u16 = 9;
const KIND_X: u16 = 32;
const KIND_W: u16 = 5;
const NOTES_X: u16 = 39;

pub(crate) fn hit_test(
    area: Rect,
    x: u16,
    y: u16,
    scroll: usize,
) -> Option<(usize, Option<SleepField>)> {
    let content_x = area.x + 2;
    let rows_y = area.y + 2;
    let rows_height = area.height.saturating_sub(3);
    if x < content_x || y < rows_y || y >= rows_y + rows_height {
        return None;
    }
    let row = (y - rows_y) as usize + scroll;
    Some((row, field_at(x - content_x)))
}

fn field_at(col: u16) -> Option<SleepField> {
    match col {
        c if (START_X..START_X + START_W).contains(&c) => Some(SleepField::Start),
        c if (END_X..END_X + END_W).contains(&c) => Some(SleepField::End),
        c if (KIND_X..KIND_X + KIND_W).contains(&c) => Some(SleepField::Kind),
        c if c >= NOTES_X => Some(SleepField::Notes),
        _ => None,
    }
}

pub fn render_sleep_view(frame: &mut Frame, app: &mut App, body: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Sleep ({}) ", app.sleeps.len()))
        .padding(Padding::horizontal(1));
    let inner = block.inner(body);
    frame.render_widget(block, body);
    app.sleep_table_area = Some(body);

    let header = Line::from(Span::styled(
        format!(
            "{}  {}  {}  {}  {}  {}",
            fit("DATE", 5),
            fit("START", START_W as usize),
            fit("END", END_W as usize),
            fit("DUR", DURATION_W as usize),
            fit("KIND", KIND_W as usize),
            "NOTES"
        ),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(header),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let max_rows = inner.height.saturating_sub(1) as usize;
    app.sleep_view_height = max_rows;
    let total = app.sleeps.len();

    if let Some(focused) = app.focused_sleep_index {
        if focused >= app.sleep_scroll + max_rows {
            app.sleep_scroll = focused + 1 - max_rows;
        }
        if focused < app.sleep_scroll {
            app.sleep_scroll = focused;
        }
    }
    if total <= max_rows {
        app.sleep_scroll = 0;
    } else if app.sleep_scroll > total - max_rows {
        app.sleep_scroll = total - max_rows;
    }

    let notes_width = inner.width.saturating_sub(NOTES_X) as usize;
    let mut row_y = inner.y + 1;
    for (idx, entry) in app
        .sleeps
        .iter()
        .enumerate()
        .skip(app.sleep_scroll)
        .take(max_rows)
    {
        let is_focused = app.focused_sleep_index == Some(idx);
        let edit = app.sleep_edit.as_ref().filter(|edit| edit.id == entry.id);
        let line = build_sleep_row(entry, is_focused, edit, app, notes_width);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, row_y, inner.width, 1),
        );
        row_y += 1;
    }

    if total > max_rows {
        let mut scrollbar_state = ScrollbarState::new(total)
            .position(app.sleep_scroll)
            .viewport_content_length(max_rows);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
            &mut scrollbar_state,
        );
    }
}

fn build_sleep_row(
    entry: &SleepEntry,
    is_focused: bool,
    edit: Option<&SleepEdit>,
    app: &App,
    notes_width: usize,
) -> Line<'static> {
    let base = if is_focused && edit.is_none() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let local_start = to_local_time(entry.started_at);
    let date_text = format!(
        "{:02}-{:02}",
        local_start.date().month() as u8,
        local_start.date().day()
    );

    let mut spans = vec![
        Span::styled(
            fit(&date_text, 5),
            if is_focused && edit.is_none() {
                base
            } else {
                Style::default().fg(Color::Yellow)
            },
        ),
        Span::styled("  ", base),
    ];

    push_cell(
        &mut spans,
        &format_clock(local_start.time()),
        START_W as usize,
        SleepField::Start,
        edit,
        entry,
        app,
        base,
    );
    spans.push(Span::styled("  ", base));

    let end_text = entry
        .ended_at
        .map(|t| format_clock(to_local_time(t).time()))
        .unwrap_or_default();
    push_cell(
        &mut spans,
        &end_text,
        END_W as usize,
        SleepField::End,
        edit,
        entry,
        app,
        base,
    );
    spans.push(Span::styled("  ", base));

    // Derived duration with the advisory band. Display-only: an end clock
    // before the start clock reads as rolling past midnight.
    let (duration_text, duration_style) = match entry.ended_at {
        Some(ended_at) => {
            let minutes = elapsed_minutes(
                local_start.time(),
                to_local_time(ended_at).time(),
            );
            let text = format!("[{:02}h:{:02}m]", minutes / 60, minutes % 60);
            let color = match classify(minutes, entry.kind) {
                RangeFit::Below => Color::Yellow,
                RangeFit::Within => Color::Green,
                RangeFit::Above => Color::Red,
            };
            (text, Style::default().fg(color))
        }
        None => ("[open]".to_string(), Style::default().fg(Color::DarkGray)),
    };
    spans.push(Span::styled(
        fit(&duration_text, DURATION_W as usize),
        if is_focused && edit.is_none() {
            base
        } else {
            duration_style
        },
    ));
    spans.push(Span::styled("  ", base));

    push_cell(
        &mut spans,
        entry.kind.label(),
        KIND_W as usize,
        SleepField::Kind,
        edit,
        entry,
        app,
        base,
    );
    spans.push(Span::styled("  ", base));

    push_cell(
        &mut spans,
        entry.notes.as_deref().unwrap_or(""),
        notes_width,
        SleepField::Notes,
        edit,
        entry,
        app,
        base,
    );

    Line::from(spans)
}

#[allow(clippy::too_many_arguments)]
fn push_cell(
    spans: &mut Vec<Span<'static>>,
    display: &str,
    width: usize,
    field: SleepField,
    edit: Option<&SleepEdit>,
    entry: &SleepEntry,
    app: &App,
    base: Style,
) {
    if let Some(edit) = edit.filter(|edit| edit.field == field) {
        let editing_style = Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD);
        let text = match field {
            SleepField::Kind => format!("[{}]", edit.kind_choice.label()),
            SleepField::Start | SleepField::End => time_input_display(&edit.input.value),
            SleepField::Notes => {
                let (before, after) = edit.input.split_at_cursor();
                format!("[{before}█{after}]")
            }
        };
        spans.push(Span::styled(text, editing_style));
        return;
    }

    let key = (entry.id, CellField::Sleep(field));
    let style = if app.is_flashed(&key) {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        base
    };
    spans.push(Span::styled(fit(display, width), style));
}
