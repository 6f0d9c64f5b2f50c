use pong_client::{ApiRequest, ClientConfig, ClientError, KeyTarget, SessionController};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent, Window};

use crate::dom::Page;
use crate::http;
use crate::with_runner;

/// Keys typed into a text input belong to the input, not the paddle.
fn key_target(event: &Event) -> KeyTarget {
    let in_text = event.target().is_some_and(|t| {
        t.has_type::<HtmlInputElement>() || t.has_type::<HtmlTextAreaElement>()
    });
    if in_text {
        KeyTarget::TextField
    } else {
        KeyTarget::Page
    }
}

/// A DOM listener kept alive for as long as the runner exists.
struct Binding {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Connects a [`SessionController`] to the page: executes the requests it
/// asks for and applies the UI effects it produces.
///
/// Lives in a `thread_local!` (see `lib.rs`); browser callbacks reach it
/// through `with_runner`.
pub struct ClientRunner {
    controller: SessionController,
    page: Page,
    window: Window,
    bindings: Vec<Binding>,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
    last_tick: Option<f64>,
}

impl ClientRunner {
    pub fn new(config: ClientConfig, page: Page, window: Window) -> Self {
        Self {
            controller: SessionController::new(config),
            page,
            window,
            bindings: Vec::new(),
            interval: None,
            last_tick: None,
        }
    }

    /// Register keyboard, focus and button listeners plus the driver interval.
    pub fn attach(&mut self) -> Result<(), JsValue> {
        let window: EventTarget = self.window.clone().into();

        self.bind(window.clone(), "keydown", |e| {
            if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                let target = key_target(&e);
                let handled = with_runner(|r| r.controller.key_down_from(&key, target))
                    .unwrap_or(false);
                if handled && key.starts_with("Arrow") {
                    e.prevent_default();
                }
            }
        })?;
        self.bind(window.clone(), "keyup", |e| {
            if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                with_runner(|r| r.controller.key_up(&key));
            }
        })?;
        self.bind(window, "blur", |_| {
            with_runner(|r| r.controller.focus_lost());
        })?;

        let save: EventTarget = self.page.save_button.clone().into();
        self.bind(save, "click", |_| {
            with_runner(ClientRunner::save_score);
        })?;
        let play_again: EventTarget = self.page.play_again_button.clone().into();
        self.bind(play_again, "click", |_| {
            with_runner(ClientRunner::play_again);
        })?;

        let tick = Closure::<dyn FnMut()>::new(|| {
            with_runner(|r| r.tick(js_sys::Date::now()));
        });
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                self.controller.config().tick_ms as i32,
            )?;
        self.interval = Some((id, tick));
        Ok(())
    }

    /// Undo `attach`. Listeners are removed before their closures are dropped.
    pub fn detach(&mut self) {
        if let Some((id, _tick)) = self.interval.take() {
            self.window.clear_interval_with_handle(id);
        }
        for binding in self.bindings.drain(..) {
            let _ = binding.target.remove_event_listener_with_callback(
                binding.event,
                binding.closure.as_ref().unchecked_ref(),
            );
        }
    }

    fn bind(
        &mut self,
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.bindings.push(Binding {
            target,
            event,
            closure,
        });
        Ok(())
    }

    // ---- Page events ----

    pub fn boot(&mut self) {
        let requests = self.controller.boot();
        self.dispatch(requests);
        self.flush();
    }

    fn play_again(&mut self) {
        let requests = self.controller.play_again();
        self.dispatch(requests);
        self.flush();
    }

    fn save_score(&mut self) {
        let username = self.page.username_value();
        let requests = self.controller.save_score(&username);
        self.dispatch(requests);
        self.flush();
    }

    fn tick(&mut self, now: f64) {
        let dt = match self.last_tick.replace(now) {
            Some(prev) => now - prev,
            None => 0.0,
        };
        let requests = self.controller.tick(dt);
        self.dispatch(requests);
        self.flush();
    }

    fn on_reply(&mut self, request: &ApiRequest, result: Result<String, ClientError>) {
        let requests = self.controller.handle_reply(request, result);
        self.dispatch(requests);
        self.flush();
    }

    // ---- Plumbing ----

    /// Send each request on its own local task; the reply re-enters the runner.
    fn dispatch(&self, requests: Vec<ApiRequest>) {
        for request in requests {
            let config = self.controller.config().clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = http::send(&config, &request).await;
                if with_runner(|r| r.on_reply(&request, result)).is_none() {
                    log::debug!("{} #{} reply after shutdown", request.call.label(), request.id.0);
                }
            });
        }
    }

    /// Apply pending UI effects to the DOM.
    fn flush(&mut self) {
        for effect in self.controller.drain_effects() {
            if let Err(e) = self.page.apply(effect) {
                log::warn!("DOM update failed: {:?}", e);
            }
        }
    }
}
