use crate::api::config::ClientConfig;
use crate::api::types::{GameState, Winner};
use crate::bridge::error::ClientError;
use crate::bridge::protocol::{ApiCall, ApiRequest, Reply, RequestId};
use crate::core::session::Session;
use crate::core::time::Interval;
use crate::input::keys::{InputTracker, KeyTarget};
use crate::renderer::frame::{build_frame, scoreboard_text};
use crate::ui::effects::{endgame_message, ConnectionStatus, UiEffect};
use crate::ui::highscores::HighScoreBoard;

/// Where the client is in the game lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game has been started yet (or the first start failed).
    NoGame,
    /// A `/start` request is in flight.
    Starting,
    /// A game is running: polling and input are live.
    Playing,
    /// The server reported `game_over`. Polling is stopped.
    GameOver,
}

/// Score submission state for the current game.
/// One successful submission per game; a new game reopens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Open,
    InFlight,
    Saved,
}

/// Outstanding requests per endpoint class.
#[derive(Debug, Default)]
struct InFlight {
    start: Option<RequestId>,
    poll: Option<RequestId>,
    /// Moves issued by the last input tick that have not resolved yet.
    moves: Vec<RequestId>,
    /// Score submission for the current game.
    save: Option<RequestId>,
    /// Newest high-score fetch. Replies to older fetches are dropped.
    high_scores: Option<RequestId>,
}

/// Drives one browser page worth of Pong.
///
/// The controller performs no I/O. Every operation returns the requests the
/// caller must send; each reply goes back through [`SessionController::handle_reply`].
/// Page updates accumulate as [`UiEffect`]s, drained with
/// [`SessionController::drain_effects`].
pub struct SessionController {
    config: ClientConfig,
    phase: Phase,
    /// Phase to fall back to if a pending start fails.
    phase_before_start: Phase,
    session: Option<Session>,
    input: InputTracker,
    poll_timer: Interval,
    input_timer: Interval,
    in_flight: InFlight,
    save: SaveStatus,
    status: ConnectionStatus,
    next_id: u64,
    effects: Vec<UiEffect>,
}

impl SessionController {
    pub fn new(config: ClientConfig) -> Self {
        let poll_timer = Interval::new(config.poll_interval_ms);
        let input_timer = Interval::new(config.input_interval_ms);
        Self {
            config,
            phase: Phase::NoGame,
            phase_before_start: Phase::NoGame,
            session: None,
            input: InputTracker::new(),
            poll_timer,
            input_timer,
            in_flight: InFlight::default(),
            save: SaveStatus::Open,
            status: ConnectionStatus::Idle,
            next_id: 1,
            effects: Vec::new(),
        }
    }

    // ---- Page events ----

    /// Page load: start the first game, load the high scores, and arm the
    /// input timer.
    pub fn boot(&mut self) -> Vec<ApiRequest> {
        let mut out = Vec::new();
        if !self.input_timer.is_running() {
            self.input_timer.start();
        }
        out.extend(self.begin_start());
        out.push(self.issue(ApiCall::FetchHighScores));
        out
    }

    /// "Play Again" click.
    pub fn play_again(&mut self) -> Vec<ApiRequest> {
        self.begin_start().into_iter().collect()
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    /// Key press with knowledge of where focus is. Typing in a text field
    /// never moves the paddle.
    pub fn key_down_from(&mut self, key: &str, target: KeyTarget) -> bool {
        self.input.key_down_from(key, target)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// The page lost focus: key-up events will not arrive, so release all keys.
    pub fn focus_lost(&mut self) {
        self.input.clear();
    }

    /// "Save Score" click with the raw contents of the username field.
    pub fn save_score(&mut self, username_field: &str) -> Vec<ApiRequest> {
        if self.phase != Phase::GameOver {
            log::debug!("save ignored: no finished game");
            return Vec::new();
        }
        let username = username_field.trim();
        if username.is_empty() {
            return Vec::new();
        }
        if self.save != SaveStatus::Open {
            log::debug!("save ignored: score already {:?}", self.save);
            return Vec::new();
        }
        let Some(score) = self.session.as_ref().map(|s| s.state().player_score) else {
            return Vec::new();
        };

        self.save = SaveStatus::InFlight;
        self.effects.push(UiEffect::SetSaveEnabled(false));
        let request = self.issue(ApiCall::SaveScore {
            username: username.to_string(),
            score,
        });
        self.in_flight.save = Some(request.id);
        vec![request]
    }

    /// Advance both timers by `dt_ms` of wall time.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<ApiRequest> {
        let mut out = Vec::new();

        if self.poll_timer.advance(dt_ms) {
            out.extend(self.poll());
        }
        if self.input_timer.advance(dt_ms) {
            out.extend(self.send_input());
        }

        out
    }

    /// Apply the outcome of a request previously returned by this controller.
    /// Returns follow-up requests.
    pub fn handle_reply(
        &mut self,
        request: &ApiRequest,
        result: Result<String, ClientError>,
    ) -> Vec<ApiRequest> {
        self.release(request);

        let reply = result.and_then(|body| request.call.decode(&body));
        match reply {
            Ok(reply) => {
                log::debug!("{} #{} ok", request.call.label(), request.id.0);
                self.set_status(ConnectionStatus::Connected);
                self.apply_reply(request, reply)
            }
            Err(e) => {
                log::warn!("{} #{} failed: {}", request.call.label(), request.id.0, e);
                self.set_status(ConnectionStatus::Error(e.to_string()));
                self.apply_failure(request);
                Vec::new()
            }
        }
    }

    /// Take the page updates produced since the last drain.
    pub fn drain_effects(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }

    // ---- Accessors ----

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> Option<&GameState> {
        self.session.as_ref().map(Session::state)
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_polling(&self) -> bool {
        self.poll_timer.is_running()
    }

    // ---- Internals ----

    fn issue(&mut self, call: ApiCall) -> ApiRequest {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        log::debug!("issue {} #{}", call.label(), id.0);
        if call == ApiCall::FetchHighScores {
            self.in_flight.high_scores = Some(id);
        }
        ApiRequest { id, call }
    }

    fn begin_start(&mut self) -> Option<ApiRequest> {
        if self.in_flight.start.is_some() {
            log::debug!("start already in flight");
            return None;
        }
        self.poll_timer.stop();
        self.phase_before_start = self.phase;
        self.phase = Phase::Starting;
        let request = self.issue(ApiCall::Start);
        self.in_flight.start = Some(request.id);
        Some(request)
    }

    fn poll(&mut self) -> Option<ApiRequest> {
        if self.phase != Phase::Playing {
            return None;
        }
        if self.in_flight.poll.is_some() {
            log::debug!("poll skipped: previous poll unresolved");
            return None;
        }
        let game_id = self.session.as_ref()?.game_id().to_string();
        let request = self.issue(ApiCall::FetchState { game_id });
        self.in_flight.poll = Some(request.id);
        Some(request)
    }

    fn send_input(&mut self) -> Vec<ApiRequest> {
        if self.phase != Phase::Playing {
            return Vec::new();
        }
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        if session.state().game_over {
            return Vec::new();
        }
        if !self.in_flight.moves.is_empty() {
            log::debug!("input tick skipped: {} move(s) unresolved", self.in_flight.moves.len());
            return Vec::new();
        }

        let game_id = session.game_id().to_string();
        let held: Vec<_> = self.input.held().collect();
        let mut out = Vec::with_capacity(held.len());
        for direction in held {
            let request = self.issue(ApiCall::Move {
                game_id: game_id.clone(),
                direction,
            });
            self.in_flight.moves.push(request.id);
            out.push(request);
        }
        out
    }

    /// Clear the in-flight guard held by `request`.
    ///
    /// The save and high-score slots are left alone here: their replies
    /// check ownership of the slot before clearing it.
    fn release(&mut self, request: &ApiRequest) {
        match request.call {
            ApiCall::Start if self.in_flight.start == Some(request.id) => {
                self.in_flight.start = None
            }
            ApiCall::FetchState { .. } if self.in_flight.poll == Some(request.id) => {
                self.in_flight.poll = None
            }
            ApiCall::Move { .. } => self.in_flight.moves.retain(|id| *id != request.id),
            _ => {}
        }
    }

    fn apply_reply(&mut self, request: &ApiRequest, reply: Reply) -> Vec<ApiRequest> {
        match reply {
            Reply::Started { game_id, state } => {
                self.start_session(request.id, game_id, state);
                Vec::new()
            }
            Reply::State(state) | Reply::Moved(state) => {
                self.apply_state(request, state);
                Vec::new()
            }
            Reply::ScoreSaved => {
                if self.owns_save(request) {
                    self.save = SaveStatus::Saved;
                } else {
                    log::debug!("save #{} acknowledged for a previous game", request.id.0);
                }
                // The score landed either way, so the table is out of date.
                vec![self.issue(ApiCall::FetchHighScores)]
            }
            Reply::HighScores(entries) => {
                if self.in_flight.high_scores != Some(request.id) {
                    log::debug!("high_scores #{} dropped: superseded", request.id.0);
                    return Vec::new();
                }
                self.in_flight.high_scores = None;
                self.effects
                    .push(UiEffect::ShowHighScores(HighScoreBoard::from_entries(&entries)));
                Vec::new()
            }
        }
    }

    fn apply_failure(&mut self, request: &ApiRequest) {
        match request.call {
            ApiCall::Start => {
                self.phase = self.phase_before_start;
                if self.phase == Phase::Playing {
                    self.poll_timer.start();
                }
                log::info!("start failed, back to {:?}", self.phase);
            }
            ApiCall::SaveScore { .. } => {
                if self.owns_save(request) {
                    self.save = SaveStatus::Open;
                    self.effects.push(UiEffect::SetSaveEnabled(true));
                }
            }
            ApiCall::FetchHighScores if self.in_flight.high_scores == Some(request.id) => {
                self.in_flight.high_scores = None
            }
            _ => {}
        }
    }

    /// Whether `request` is the pending save of the current game. Clears the
    /// slot when it is.
    fn owns_save(&mut self, request: &ApiRequest) -> bool {
        if self.in_flight.save != Some(request.id) {
            return false;
        }
        self.in_flight.save = None;
        true
    }

    fn start_session(&mut self, id: RequestId, game_id: String, state: GameState) {
        log::info!("game {} started", game_id);
        self.render(&state);
        let over = state.game_over;
        let winner = state.winner;
        self.session = Some(Session::new(game_id, state, id));
        self.in_flight.poll = None;
        self.in_flight.moves.clear();
        self.in_flight.save = None;
        self.save = SaveStatus::Open;
        self.effects.push(UiEffect::HideEndgame);
        self.effects.push(UiEffect::SetSaveEnabled(true));
        self.phase = Phase::Playing;
        if over {
            self.enter_game_over(winner);
        } else {
            self.poll_timer.start();
        }
    }

    fn apply_state(&mut self, request: &ApiRequest, state: GameState) {
        if self.phase != Phase::Playing {
            log::debug!("{} #{} dropped: not playing", request.call.label(), request.id.0);
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let for_this_game = match &request.call {
            ApiCall::FetchState { game_id } | ApiCall::Move { game_id, .. } => {
                game_id == session.game_id()
            }
            _ => false,
        };
        if !for_this_game {
            log::debug!("{} #{} dropped: previous game", request.call.label(), request.id.0);
            return;
        }
        if !session.apply(request.id, state) {
            log::debug!("{} #{} dropped: stale", request.call.label(), request.id.0);
            return;
        }

        let state = session.state().clone();
        self.render(&state);
        if state.game_over {
            self.enter_game_over(state.winner);
        }
    }

    fn enter_game_over(&mut self, winner: Option<Winner>) {
        self.poll_timer.stop();
        self.phase = Phase::GameOver;
        log::info!("game over, winner {:?}", winner);
        self.effects.push(UiEffect::ShowEndgame {
            message: endgame_message(winner),
        });
    }

    fn render(&mut self, state: &GameState) {
        self.effects.push(UiEffect::Render {
            frame: build_frame(state),
            scoreboard: scoreboard_text(state),
        });
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        if self.status != status {
            self.status = status.clone();
            self.effects.push(UiEffect::SetStatus(status));
        }
    }
}
