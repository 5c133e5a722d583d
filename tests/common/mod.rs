//! Shared test utilities for the screen and router integration tests.
//!
//! Two in-memory `OrphanageApi` fakes:
//! - `StaticApi` answers immediately with a fixed list (or a fixed error).
//! - `ScriptedApi` parks every listing request on a oneshot responder that
//!   the test resolves whenever it wants, so completion order is under test
//!   control.
//!
//! Plus helpers to poll until a condition holds and to render screens into
//! ratatui's `TestBackend`.

#![allow(dead_code)]

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use orphanmap::api::{ApiError, OrphanageApi};
use orphanmap::config::Config;
use orphanmap::models::LocationRecord;
use orphanmap::screens::{RenderContext, Screen};
use ratatui::backend::TestBackend;
use ratatui::layout::Position;
use ratatui::Terminal;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

pub type ListingResult = Result<Vec<LocationRecord>, ApiError>;

/// A record inside the default map region
pub fn record(id: i64, name: &str) -> LocationRecord {
    LocationRecord {
        id,
        name: name.to_string(),
        latitude: -20.284_595_8 + (id as f64) * 0.000_5,
        longitude: -50.544_616_9 + (id as f64) * 0.001,
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        body: "internal error".to_string(),
    }
}

/// Answers every request immediately
pub struct StaticApi {
    records: Vec<LocationRecord>,
    fail: bool,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StaticApi {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self {
            records,
            fail: false,
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    /// Every request fails with a 500
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

impl OrphanageApi for StaticApi {
    fn list_orphanages(&self) -> impl Future<Output = ListingResult> + Send {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail {
            Err(server_error())
        } else {
            Ok(self.records.clone())
        };
        async move { result }
    }

    fn get_orphanage(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<LocationRecord, ApiError>> + Send {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .records
            .iter()
            .find(|r| r.id == id && !self.fail)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: format!("orphanage {} not found", id),
            });
        async move { result }
    }
}

/// Every listing request parks until the test answers it.
///
/// Requests start when the spawned fetch task first runs, so tests take the
/// responder of each request (`next_responder`) before issuing the next one;
/// that keeps responders in request order.
#[derive(Default)]
pub struct ScriptedApi {
    responders: Mutex<VecDeque<oneshot::Sender<ListingResult>>>,
    list_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next listing request to start and return its responder
    pub fn next_responder(&self) -> oneshot::Sender<ListingResult> {
        let mut responder = None;
        let arrived = wait_for(|| {
            responder = self.responders.lock().unwrap().pop_front();
            responder.is_some()
        });
        assert!(arrived, "no listing request was issued");
        responder.unwrap()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl OrphanageApi for ScriptedApi {
    fn list_orphanages(&self) -> impl Future<Output = ListingResult> + Send {
        let (tx, rx) = oneshot::channel();
        self.responders.lock().unwrap().push_back(tx);
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        async move {
            rx.await.unwrap_or_else(|_| {
                Err(ApiError::Request {
                    url: "scripted".to_string(),
                    message: "responder dropped".to_string(),
                })
            })
        }
    }

    fn get_orphanage(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<LocationRecord, ApiError>> + Send {
        async move { Ok(record(id, "Scripted")) }
    }
}

/// Call `step` until it returns true or five seconds pass
pub fn wait_for(mut step: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if step() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

/// Keep calling `step` for a short while; for asserting that nothing changes
pub fn settle(mut step: impl FnMut()) {
    for _ in 0..10 {
        step();
        std::thread::sleep(Duration::from_millis(5));
    }
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn click(position: Position) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: position.x,
        row: position.y,
        modifiers: KeyModifiers::NONE,
    })
}

/// Draw a screen into an off-screen terminal
pub fn render_screen(
    screen: &mut dyn Screen,
    config: &Config,
    width: u16,
    height: u16,
) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            screen
                .render(frame, frame.area(), &RenderContext::new(config))
                .unwrap();
        })
        .unwrap();
    terminal
}

fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}

/// Whole buffer as text, one line per row
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    rows(terminal).join("\n")
}

/// Cell where `needle` starts, if it is drawn anywhere
pub fn find_text(terminal: &Terminal<TestBackend>, needle: &str) -> Option<Position> {
    rows(terminal).iter().enumerate().find_map(|(y, row)| {
        row.find(needle)
            .map(|byte| Position::new(row[..byte].chars().count() as u16, y as u16))
    })
}
