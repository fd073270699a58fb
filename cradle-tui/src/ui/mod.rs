use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

mod delete_dialog;
pub(crate) mod feedings_view;
mod form_views;
pub(crate) mod sleep_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let body = root[0];
    match app.current_view {
        View::Feedings => feedings_view::render_feedings_view(frame, app, body),
        View::Sleep => sleep_view::render_sleep_view(frame, app, body),
        View::NewFeeding => {
            feedings_view::render_feedings_view(frame, app, body);
            form_views::render_new_feeding(frame, app, body);
        }
        View::NewSleep => {
            sleep_view::render_sleep_view(frame, app, body);
            form_views::render_new_sleep(frame, app, body);
        }
        View::ConfirmDelete => delete_dialog::render_delete_confirm_dialog(frame, app, body),
    }

    render_status_line(frame, app, root[1]);
}

fn render_status_line(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.is_loading {
        let throbber = throbber_widgets_tui::Throbber::default()
            .label("syncing…")
            .style(Style::default().fg(Color::Cyan));
        frame.render_stateful_widget(throbber, area, &mut app.throbber_state);
        return;
    }

    let text = match &app.status_message {
        Some(message) => message.clone(),
        None => contextual_hint(app),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

fn contextual_hint(app: &App) -> String {
    match app.current_view {
        View::Feedings if app.feeding_edit.is_some() => {
            "Enter save · Tab next field · Esc cancel".to_string()
        }
        View::Feedings => {
            "Enter/click edit · n new · d delete · s sleep · r refresh · q quit".to_string()
        }
        View::Sleep if app.sleep_edit.is_some() => {
            let settling = app
                .sleep_edit
                .as_ref()
                .is_some_and(|edit| app.saves.has_pending(&edit.key()));
            if settling {
                "saving after you pause · Enter save now · Esc cancel".to_string()
            } else {
                "Enter save · Tab next field · Esc cancel".to_string()
            }
        }
        View::Sleep => {
            "Enter/click edit · n new · d delete · f feedings · r refresh · q quit".to_string()
        }
        View::NewFeeding | View::NewSleep => "Enter save · Esc cancel".to_string(),
        View::ConfirmDelete => "y delete · n keep".to_string(),
    }
}
