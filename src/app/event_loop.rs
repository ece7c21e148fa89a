use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};

use crate::bar::{
    ActivateHandler, PresentOptions, QuickActionBar, QuickActionBarWindow, SPINNER_FRAME_INTERVAL,
};
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::source::LineSource;
use crate::ui::{OverlayChrome, centered_rect, draw_quick_action_bar};

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::terminal_session::{TerminalSession, TerminalSurface};

enum LoopControl {
    Continue,
    Break,
}

impl App {
    /// Presents the bar on the terminal and returns the activated line, or
    /// `None` when the bar was dismissed without a choice.
    pub async fn run(&mut self) -> AppResult<Option<String>> {
        let mut session = TerminalSession::enter()?;
        let (mut events, mut bus) = EventBusRuntime::spawn();

        let result = self.run_on(&mut session, &mut events).await;

        bus.shutdown();
        session.restore()?;
        result
    }

    pub(crate) async fn run_on<S: TerminalSurface>(
        &mut self,
        surface: &mut S,
        events: &mut UnboundedReceiver<DomainEvent>,
    ) -> AppResult<Option<String>> {
        let size = surface.size()?;
        tracing::debug!(
            width = size.width,
            height = size.height,
            items = self.items().len(),
            "starting event loop"
        );
        surface.clear()?;

        let source =
            LineSource::new(self.items().to_vec())?.with_latency(self.config.source.latency());
        let mut bar = QuickActionBar::<usize>::new(Arc::new(source))
            .with_key_bindings(self.config.bar.key_bindings())
            .with_activity_delay(self.config.bar.activity_delay());

        let activated = Rc::new(Cell::new(None));
        let sink = Rc::clone(&activated);
        let on_activate: ActivateHandler<usize> =
            Box::new(move |line: &usize| sink.set(Some(*line)));
        let mut window = bar.present(PresentOptions {
            parent: None,
            placeholder: self.config.bar.placeholder.clone(),
            icon: self.config.bar.icon.clone(),
            initial_search_text: self.initial_query(),
            show_keyboard_shortcuts: self.config.bar.show_keyboard_shortcuts,
            debounce_interval: self.config.bar.debounce_interval(),
            on_activate: Some(on_activate),
            on_dismiss: None,
        });

        let mut spinner_tick = time::interval(SPINNER_FRAME_INTERVAL);
        spinner_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            self.draw_frame(surface, &mut window)?;
            if !window.is_presented() {
                break;
            }

            let deadline = window.debounce_deadline();
            let busy = window.is_busy();
            let wake_at = deadline.map_or_else(time::Instant::now, time::Instant::from_std);
            let control = tokio::select! {
                biased;
                event = events.recv() => handle_event(&mut window, event),
                Some(job) = window.next_main_job() => {
                    window.run_main_job(job);
                    LoopControl::Continue
                }
                _ = time::sleep_until(wake_at), if deadline.is_some() => {
                    window.poll_debounce(Instant::now());
                    LoopControl::Continue
                }
                _ = spinner_tick.tick(), if busy => LoopControl::Continue,
            };
            if matches!(control, LoopControl::Break) {
                break;
            }
        }

        let selected = activated
            .get()
            .and_then(|line| self.items().get(line).cloned());
        tracing::info!(activated = selected.is_some(), "event loop finished");
        Ok(selected)
    }

    fn draw_frame<S: TerminalSurface>(
        &self,
        surface: &mut S,
        window: &mut QuickActionBarWindow<usize>,
    ) -> AppResult<()> {
        let chrome = OverlayChrome::new(self.config.appearance.reduce_transparency);
        let width = self.config.appearance.width;
        let max_rows = usize::from(self.config.appearance.max_visible_rows);
        let item_count = self.items().len();
        let presented = window.is_presented();
        let view = window.view(Instant::now(), max_rows);

        surface.draw(|frame| {
            let area = frame.area();
            draw_host(frame, area, item_count);
            if presented {
                draw_quick_action_bar(frame, area, &view, chrome, width);
            }
        })?;
        Ok(())
    }
}

fn handle_event(
    window: &mut QuickActionBarWindow<usize>,
    event: Option<DomainEvent>,
) -> LoopControl {
    match event {
        Some(DomainEvent::Input(Event::Key(key))) if key.kind != KeyEventKind::Release => {
            window.handle_key(key, Instant::now());
            LoopControl::Continue
        }
        Some(DomainEvent::Input(Event::FocusLost)) => {
            window.resign_active();
            LoopControl::Continue
        }
        Some(DomainEvent::Input(_)) => LoopControl::Continue,
        Some(DomainEvent::InputError(err)) => {
            tracing::warn!(error = %err, "terminal input error");
            LoopControl::Continue
        }
        None => {
            tracing::debug!("input stream closed");
            window.dismiss();
            LoopControl::Break
        }
    }
}

/// The backdrop the bar floats over.
fn draw_host(frame: &mut Frame<'_>, area: Rect, item_count: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let hint = format!("qab · {item_count} items · Esc to dismiss");
    let width = u16::try_from(hint.chars().count()).unwrap_or(u16::MAX);
    let bottom = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        centered_rect(bottom, width, 1),
    );
}
