//! The exchange rate widget: fetches once on mount, renders the logo and,
//! once loaded, the rate.

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::core::rate::{CurrencyPair, RateProvider};

/// Logo shipped with the binary.
pub const BUNDLED_LOGO: &str = include_str!("../assets/logo.txt");

/// Reads the logo at `path`, falling back to the bundled one.
pub fn load_logo(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return BUNDLED_LOGO.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(logo) => logo,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read logo, using bundled logo");
            BUNDLED_LOGO.to_string()
        }
    }
}

/// `Unloaded -> Loaded` is the only transition, and happens at most once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateState {
    Unloaded,
    Loaded(f64),
}

impl RateState {
    pub fn rate(&self) -> Option<f64> {
        match self {
            RateState::Unloaded => None,
            RateState::Loaded(rate) => Some(*rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateLine {
    pub pair: CurrencyPair,
    pub rate: f64,
}

impl RateLine {
    pub fn label(&self) -> String {
        format!("Current exchange rate ({})", self.pair)
    }
}

impl Display for RateLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.rate)
    }
}

/// What the widget shows at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct RateView {
    pub logo: String,
    pub rate: Option<RateLine>,
}

impl Display for RateView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.logo.trim_end())?;
        if let Some(line) = &self.rate {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

pub struct RateDisplay {
    pair: CurrencyPair,
    logo: String,
    state: Arc<RwLock<RateState>>,
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl RateDisplay {
    /// Spawns the single rate fetch for this mount and returns immediately.
    /// Must be called from within a tokio runtime.
    pub fn mount(
        provider: Arc<dyn RateProvider>,
        pair: CurrencyPair,
        logo: impl Into<String>,
    ) -> Self {
        let state = Arc::new(RwLock::new(RateState::Unloaded));
        let active = Arc::new(AtomicBool::new(true));

        debug!(pair = %pair, "Mounting rate display");
        let task = tokio::spawn(fetch_once(
            provider,
            pair.clone(),
            Arc::clone(&state),
            Arc::clone(&active),
        ));

        RateDisplay {
            pair,
            logo: logo.into(),
            state,
            active,
            task: Some(task),
        }
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub async fn state(&self) -> RateState {
        *self.state.read().await
    }

    pub async fn rate(&self) -> Option<f64> {
        self.state().await.rate()
    }

    /// Waits for the fetch to finish, successfully or not. Returns at once
    /// if it already has.
    pub async fn settled(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        if let Err(e) = task.await {
            if e.is_panic() {
                error!(pair = %self.pair, error = %e, "Rate fetch task panicked");
            }
        }
    }

    pub async fn render(&self) -> RateView {
        RateView {
            logo: self.logo.clone(),
            rate: self.rate().await.map(|rate| RateLine {
                pair: self.pair.clone(),
                rate,
            }),
        }
    }

    /// Deactivates the widget and cancels any in-flight fetch.
    pub fn unmount(self) {
        debug!(pair = %self.pair, "Unmounting rate display");
        drop(self);
    }

    fn deactivate(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RateDisplay {
    fn drop(&mut self) {
        self.deactivate();
    }
}

async fn fetch_once(
    provider: Arc<dyn RateProvider>,
    pair: CurrencyPair,
    state: Arc<RwLock<RateState>>,
    active: Arc<AtomicBool>,
) {
    let rate = match provider.fetch_rate(&pair).await {
        Ok(rate) => rate,
        Err(e) => {
            error!(pair = %pair, error = %e, "Error fetching exchange rate");
            return;
        }
    };

    let mut state = state.write().await;
    if !active.load(Ordering::SeqCst) {
        debug!(pair = %pair, "Display unmounted, ignoring fetched rate");
        return;
    }
    if *state == RateState::Unloaded {
        info!(pair = %pair, rate, "Loaded exchange rate");
        *state = RateState::Loaded(rate);
    }
}
