//! Input and timer events feeding the main loop.

use crossterm::event::{self, Event};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// How often the reader thread wakes up to notice a closed channel.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub enum AppEvent {
    Input(Event),
    Tick,
}

/// Read terminal events on a dedicated thread until the receiver goes away.
pub fn spawn_input_reader(tx: UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(AppEvent::Input(ev)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(error = %e, "failed to poll terminal events");
                    break;
                }
            }
        }
        tracing::debug!("input reader stopped");
    })
}

/// Periodic tick sender. Dropping it cancels the timer task.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn start(tx: UnboundedSender<AppEvent>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "ticker started");
        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("ticker stopped");
    }
}

/// Start or stop the ticker so that it runs exactly while `needed`.
pub fn sync_ticker(
    ticker: &mut Option<Ticker>,
    needed: bool,
    tx: &UnboundedSender<AppEvent>,
    period: Duration,
) {
    match (needed, ticker.is_some()) {
        (true, false) => *ticker = Some(Ticker::start(tx.clone(), period)),
        (false, true) => *ticker = None,
        _ => {}
    }
}
