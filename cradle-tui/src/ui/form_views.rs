use super::utils::{centered_rect, time_input_display};
use super::*;
use crate::app::{NewFeedingField, NewSleepField, TextInput};
use crate::duration::{presets_for, suggested_end_times, RangeFit};
use crate::time_utils::{format_clock, parse_clock};
use cradle_client::FeedingKind;

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{label:<9}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, value_style),
    ])
}

fn text_value(input: &TextInput, focused: bool) -> String {
    if focused {
        let (before, after) = input.split_at_cursor();
        format!("[{before}█{after}]")
    } else if input.value.is_empty() {
        "[Empty]".to_string()
    } else {
        format!("[{}]", input.value)
    }
}

/// All feeding kinds on one line, the chosen one bracketed.
fn kind_choices_line(chosen: FeedingKind, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{:<9}", "Kind"),
        Style::default().fg(Color::DarkGray),
    )];
    for kind in FeedingKind::ALL {
        let selected = kind == chosen;
        let text = if selected {
            format!("[{}] ", kind.label())
        } else {
            format!(" {}  ", kind.label())
        };
        let style = match (selected, focused) {
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::White),
            _ => Style::default().fg(Color::DarkGray),
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

fn clock_value(input: &TextInput, focused: bool) -> String {
    if focused {
        time_input_display(&input.value)
    } else if input.value.is_empty() {
        "[     ]".to_string()
    } else {
        format!("[{}]", input.value)
    }
}

pub fn render_new_feeding(frame: &mut Frame, app: &mut App, body: Rect) {
    let Some(form) = &app.new_feeding else {
        return;
    };

    let area = centered_rect(46, 12, body);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(""),
        field_line(
            "Time",
            clock_value(&form.time_input, form.focused == NewFeedingField::Time),
            form.focused == NewFeedingField::Time,
        ),
        kind_choices_line(form.kind, form.focused == NewFeedingField::Kind),
        field_line(
            "Minutes",
            text_value(
                &form.duration_input,
                form.focused == NewFeedingField::Duration,
            ),
            form.focused == NewFeedingField::Duration,
        ),
    ];
    if form.kind == FeedingKind::Bottle {
        lines.push(field_line(
            "Ounces",
            text_value(&form.amount_input, form.focused == NewFeedingField::Amount),
            form.focused == NewFeedingField::Amount,
        ));
    }
    lines.push(field_line(
        "Notes",
        text_value(&form.notes_input, form.focused == NewFeedingField::Notes),
        form.focused == NewFeedingField::Notes,
    ));
    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter save · Tab next · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" New Feeding ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

pub fn render_new_sleep(frame: &mut Frame, app: &mut App, body: Rect) {
    let Some(form) = &app.new_sleep else {
        return;
    };

    let area = centered_rect(52, 13, body);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(""),
        field_line(
            "Start",
            clock_value(&form.start_input, form.focused == NewSleepField::Start),
            form.focused == NewSleepField::Start,
        ),
        field_line(
            "End",
            clock_value(&form.end_input, form.focused == NewSleepField::End),
            form.focused == NewSleepField::End,
        ),
        field_line(
            "Kind",
            format!("[{}]", form.kind.label()),
            form.focused == NewSleepField::Kind,
        ),
        field_line(
            "Notes",
            text_value(&form.notes_input, form.focused == NewSleepField::Notes),
            form.focused == NewSleepField::Notes,
        ),
    ];

    // Quick-pick end times for this kind, one suggestion per preset.
    if let Some(start) = parse_clock(&form.start_input.value) {
        let presets = presets_for(form.kind);
        let ends = suggested_end_times(start, presets);
        let picks = presets
            .iter()
            .zip(ends)
            .map(|(preset, end)| format!("{}→{}", preset.label, format_clock(end)))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(vec![
            Span::styled("p ", Style::default().fg(Color::Magenta)),
            Span::styled(picks, Style::default().fg(Color::DarkGray)),
        ]));
    }

    // Live duration preview with the advisory band.
    if let Some((minutes, band)) = form.duration_preview() {
        let color = match band {
            RangeFit::Below => Color::Yellow,
            RangeFit::Within => Color::Green,
            RangeFit::Above => Color::Red,
        };
        let band_label = match band {
            RangeFit::Below => "short",
            RangeFit::Within => "typical",
            RangeFit::Above => "long",
        };
        lines.push(Line::from(Span::styled(
            format!("{:02}h:{:02}m ({band_label})", minutes / 60, minutes % 60),
            Style::default().fg(color),
        )));
    }

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter save · Tab next · p quick-pick · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" New Sleep ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}
