//! Toast notification widget.
//!
//! A transient message drawn in the bottom-right corner, above the footer.
//! Used to surface fetch failures and confirmed picker positions without
//! blocking input.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use std::time::{Duration, Instant};

const DEFAULT_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Info,
    Error,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}", // ✔
            ToastVariant::Info => "\u{2139}",    // ℹ
            ToastVariant::Error => "\u{2718}",   // ✘
        }
    }

    pub fn color(&self) -> Color {
        let t = theme();
        match self {
            ToastVariant::Success => t.success,
            ToastVariant::Info => t.primary,
            ToastVariant::Error => t.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Renders one toast in the bottom-right corner of the given area
pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    fn placement(area: Rect) -> Rect {
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 3u16.min(area.height);
        let x = area.x + area.width.saturating_sub(width + 2);
        // keep clear of the 3-line footer
        let y = area.y + area.height.saturating_sub(height + 4);
        Rect::new(x, y, width, height)
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let toast_area = Self::placement(area);
        if toast_area.width < 4 || toast_area.height < 3 {
            return;
        }
        let t = theme();

        Widget::render(Clear, toast_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.toast.variant.color()))
            .style(Style::default().bg(t.background));

        Paragraph::new(format!(" {} {} ", self.toast.variant.icon(), self.toast.message))
            .block(block)
            .style(Style::default().fg(t.text).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(toast_area, buf);
    }
}

/// Holds at most one toast; a new one replaces the old.
#[derive(Debug, Default)]
pub struct ToastManager {
    current: Option<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    /// Drop the toast once expired. Returns whether one is still showing.
    pub fn tick(&mut self) -> bool {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        if let Some(toast) = self.current() {
            frame.render_widget(ToastWidget::new(toast), area);
        }
    }
}
