use super::utils::fit;
use super::*;
use crate::app::{CellField, FeedingEdit, FeedingField};
use crate::time_utils::{format_clock, to_local_time};
use cradle_client::FeedingEntry;

// Column layout, as x offsets into the padded content area. The mouse
// handler maps clicks back through the same numbers.
const KIND_X: u16 = 7;
const KIND_W: u16 = 8;
const DURATION_X: u16 = 17;
const DURATION_W: u16 = 7;
const AMOUNT_X: u16 = 26;
const AMOUNT_W: u16 = 7;
const NOTES_X: u16 = 35;

/// Map a click inside the table block to (row index, editable column).
/// None when the click misses the row region entirely.
pub(crate) fn hit_test(
    area: Rect,
    x: u16,
    y: u16,
    scroll: usize,
) -> Option<(usize, Option<FeedingField>)> {
    // Border (1) + header row above; border + horizontal padding shift
    // content right by 2.
    let content_x = area.x + 2;
    let rows_y = area.y + 2;
    let rows_height = area.height.saturating_sub(3);
    if x < content_x || y < rows_y || y >= rows_y + rows_height {
        return None;
    }
    let row = (y - rows_y) as usize + scroll;
    Some((row, field_at(x - content_x)))
}

fn field_at(col: u16) -> Option<FeedingField> {
    match col {
        c if (KIND_X..KIND_X + KIND_W).contains(&c) => Some(FeedingField::Kind),
        c if (DURATION_X..DURATION_X + DURATION_W).contains(&c) => Some(FeedingField::Duration),
        c if (AMOUNT_X..AMOUNT_X + AMOUNT_W).contains(&c) => Some(FeedingField::Amount),
        c if c >= NOTES_X => Some(FeedingField::Notes),
        _ => None,
    }
}

pub fn render_feedings_view(frame: &mut Frame, app: &mut App, body: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Feedings ({}) ", app.feedings.len()))
        .padding(Padding::horizontal(1));
    let inner = block.inner(body);
    frame.render_widget(block, body);
    app.feedings_table_area = Some(body);

    let header = Line::from(Span::styled(
        format!(
            "{}  {}  {}  {}  {}",
            fit("TIME", 5),
            fit("KIND", KIND_W as usize),
            fit("DUR", DURATION_W as usize),
            fit("AMOUNT", AMOUNT_W as usize),
            "NOTES"
        ),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(header),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let max_rows = inner.height.saturating_sub(1) as usize;
    app.feedings_view_height = max_rows;
    let total = app.feedings.len();

    // Clamp scroll to keep the focused row visible.
    if let Some(focused) = app.focused_feeding_index {
        if focused >= app.feedings_scroll + max_rows {
            app.feedings_scroll = focused + 1 - max_rows;
        }
        if focused < app.feedings_scroll {
            app.feedings_scroll = focused;
        }
    }
    if total <= max_rows {
        app.feedings_scroll = 0;
    } else if app.feedings_scroll > total - max_rows {
        app.feedings_scroll = total - max_rows;
    }

    let notes_width = inner.width.saturating_sub(NOTES_X) as usize;
    let mut row_y = inner.y + 1;
    for (idx, entry) in app
        .feedings
        .iter()
        .enumerate()
        .skip(app.feedings_scroll)
        .take(max_rows)
    {
        let is_focused = app.focused_feeding_index == Some(idx);
        let edit = app
            .feeding_edit
            .as_ref()
            .filter(|edit| edit.id == entry.id);
        let line = build_feeding_row(entry, is_focused, edit, app, notes_width);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, row_y, inner.width, 1),
        );
        row_y += 1;
    }

    if total > max_rows {
        let mut scrollbar_state = ScrollbarState::new(total)
            .position(app.feedings_scroll)
            .viewport_content_length(max_rows);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
            &mut scrollbar_state,
        );
    }
}

fn build_feeding_row(
    entry: &FeedingEntry,
    is_focused: bool,
    edit: Option<&FeedingEdit>,
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

    let local = to_local_time(entry.fed_at);
    let mut spans = vec![
        Span::styled(
            fit(&format_clock(local.time()), 5),
            if is_focused && edit.is_none() {
                base
            } else {
                Style::default().fg(Color::Yellow)
            },
        ),
        Span::styled("  ", base),
    ];

    let amount_text = match entry.amount_oz {
        Some(amount) => format!("{amount}oz"),
        None => String::new(),
    };
    let notes_text = entry.notes.as_deref().unwrap_or("");

    push_cell(
        &mut spans,
        entry.kind.label(),
        KIND_W as usize,
        FeedingField::Kind,
        edit,
        entry,
        app,
        base,
    );
    spans.push(Span::styled("  ", base));
    push_cell(
        &mut spans,
        &format!("{}m", entry.duration_minutes),
        DURATION_W as usize,
        FeedingField::Duration,
        edit,
        entry,
        app,
        base,
    );
    spans.push(Span::styled("  ", base));
    push_cell(
        &mut spans,
        &amount_text,
        AMOUNT_W as usize,
        FeedingField::Amount,
        edit,
        entry,
        app,
        base,
    );
    spans.push(Span::styled("  ", base));
    push_cell(
        &mut spans,
        notes_text,
        notes_width,
        FeedingField::Notes,
        edit,
        entry,
        app,
        base,
    );

    Line::from(spans)
}

/// One display cell: flash styling after a save, bracketed input with a
/// cursor while the cell is open for editing.
#[allow(clippy::too_many_arguments)]
fn push_cell(
    spans: &mut Vec<Span<'static>>,
    display: &str,
    width: usize,
    field: FeedingField,
    edit: Option<&FeedingEdit>,
    entry: &FeedingEntry,
    app: &App,
    base: Style,
) {
    if let Some(edit) = edit.filter(|edit| edit.field == field) {
        let editing_style = Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD);
        let text = match field {
            FeedingField::Kind => format!("[{}]", edit.kind_choice.label()),
            _ => {
                let (before, after) = edit.input.split_at_cursor();
                format!("[{before}█{after}]")
            }
        };
        spans.push(Span::styled(text, editing_style));
        return;
    }

    let key = (entry.id, CellField::Feeding(field));
    let style = if app.is_flashed(&key) {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        base
    };
    spans.push(Span::styled(fit(display, width), style));
}
