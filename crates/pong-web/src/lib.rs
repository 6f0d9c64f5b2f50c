//! Browser front end for the Pong client.
//!
//! The host page loads the module and calls `pong_init()`; everything else
//! (listeners, timers, fetches) is wired from Rust.

pub mod canvas;
pub mod dom;
pub mod http;
pub mod runner;

use std::cell::RefCell;

use pong_client::ClientConfig;
use wasm_bindgen::prelude::*;

pub use runner::ClientRunner;

thread_local! {
    static RUNNER: RefCell<Option<ClientRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Returns `None` if the client is not
/// initialized (or already shut down).
pub(crate) fn with_runner<R>(f: impl FnOnce(&mut ClientRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut borrow) => borrow.as_mut().map(f),
        Err(_) => {
            log::error!("runner re-entered while busy; event dropped");
            None
        }
    })
}

/// Start the client on the current page.
///
/// `api_url` overrides the server address; otherwise the canvas's
/// `data-api-url` attribute is used, then the built-in default.
#[wasm_bindgen]
pub fn pong_init(api_url: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let page = dom::Page::locate(&document)?;

    let mut config = ClientConfig::default();
    if let Some(url) = api_url.or_else(|| page.api_url_override()) {
        config = config.with_api_url(url);
    }
    let api_url = config.api_url.clone();

    pong_shutdown();
    let mut runner = ClientRunner::new(config, page, window);
    runner.attach()?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.boot());
    log::info!("pong-web: initialized against {}", api_url);
    Ok(())
}

/// Stop timers, remove listeners and drop the runner.
/// In-flight replies arriving afterwards are ignored.
#[wasm_bindgen]
pub fn pong_shutdown() {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    if let Some(mut runner) = runner {
        runner.detach();
        log::info!("pong-web: shut down");
    }
}
