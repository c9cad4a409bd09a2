#![cfg(feature = "std")]

use std::boxed::Box;
use std::collections::VecDeque;
use std::string::String;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use tokio::time::sleep;

use crate::{
    common::{Color, MoveError, Outcome, Ruleset},
    config::{NodeConfig, SyncPolicy},
    coordinator::{roll_for_start, Match, MatchResult},
    game::GameState,
    player::Player,
    protocol::{Command, NetError},
    transport::Transport,
};

/// Which end of the connection this node is. The host rolls the dice and
/// picks the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Client,
}

impl Role {
    /// Participant index used for match scoring: host 0, client 1.
    pub fn participant(self) -> usize {
        match self {
            Role::Host => 0,
            Role::Client => 1,
        }
    }
}

/// One peer of a networked game: a local player on one side of a transport.
/// The node owns its game state; every remote command is replayed through the
/// same rules as local moves.
pub struct PeerNode {
    player: Box<dyn Player>,
    transport: Box<dyn Transport>,
    role: Role,
    config: NodeConfig,
    ruleset: Ruleset,
    rules_sent: bool,
    local_color: Option<Color>,
    state: Option<GameState>,
    inbox: VecDeque<String>,
    abort: Arc<AtomicBool>,
}

impl PeerNode {
    /// `ruleset` is what a host proposes; a client takes whatever `RULES`
    /// announces.
    pub fn new(
        player: Box<dyn Player>,
        transport: Box<dyn Transport>,
        role: Role,
        ruleset: Ruleset,
        config: NodeConfig,
    ) -> Self {
        Self {
            player,
            transport,
            role,
            config,
            ruleset,
            rules_sent: false,
            local_color: None,
            state: None,
            inbox: VecDeque::new(),
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// Color fixed by the last handshake.
    pub fn local_color(&self) -> Option<Color> {
        self.local_color
    }

    /// State of the current or most recent game.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Flag that cancels the node at its next loop iteration.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        self.abort.clone()
    }

    fn check_abort(&self) -> Result<(), NetError> {
        if self.abort.load(Ordering::SeqCst) {
            Err(NetError::Aborted)
        } else {
            Ok(())
        }
    }

    async fn send(&mut self, cmd: Command) -> Result<(), NetError> {
        self.transport.send_line(&cmd.to_string()).await
    }

    /// Pull whatever the transport has ready into the inbox.
    fn fill_inbox(&mut self) -> Result<(), NetError> {
        let lines = self.transport.poll_lines()?;
        self.inbox.extend(lines);
        Ok(())
    }

    /// Next decodable command, polling until one arrives. Malformed lines are
    /// logged and skipped. The wait ends only on abort or disconnect.
    async fn next_command(&mut self) -> Result<Command, NetError> {
        loop {
            self.check_abort()?;
            while let Some(line) = self.inbox.pop_front() {
                match line.parse::<Command>() {
                    Ok(cmd) => return Ok(cmd),
                    Err(e) => log::warn!("ignoring line {:?}: {}", line, e),
                }
            }
            self.fill_inbox()?;
            if self.inbox.is_empty() {
                sleep(self.config.poll_interval).await;
            }
        }
    }

    async fn fail(&mut self, err: NetError) -> NetError {
        if err != NetError::PeerDisconnected {
            self.transport.close().await;
        }
        err
    }

    /// Agree on colors (and on the first game, the rules) before a game.
    /// Returns the local color.
    pub async fn handshake(&mut self, rng: &mut SmallRng) -> Result<Color, NetError> {
        let result = match self.role {
            Role::Host => self.host_handshake(rng).await,
            Role::Client => self.client_handshake().await,
        };
        match result {
            Ok(color) => {
                self.local_color = Some(color);
                log::info!("{:?} plays {} under {:?} rules", self.role, color, self.ruleset);
                Ok(color)
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    async fn host_handshake(&mut self, rng: &mut SmallRng) -> Result<Color, NetError> {
        self.check_abort()?;
        let dice = roll_for_start(rng);
        let (host, client) = (dice.rolls[0], dice.rolls[1]);
        self.send(Command::Roll { client, host }).await?;
        if !self.rules_sent {
            self.send(Command::Rules(self.ruleset)).await?;
            self.rules_sent = true;
        }
        let host_color = dice.color_of(Role::Host.participant());
        self.send(Command::Start(host_color.opponent())).await?;
        Ok(host_color)
    }

    async fn client_handshake(&mut self) -> Result<Color, NetError> {
        loop {
            match self.next_command().await? {
                Command::Roll { client, host } => {
                    log::info!("dice: we rolled {}, host rolled {}", client, host)
                }
                Command::Rules(ruleset) => self.ruleset = ruleset,
                Command::Start(color) => return Ok(color),
                other => log::warn!("ignoring {} before START", other),
            }
        }
    }

    /// Play one game after a handshake. The side whose half-move ends the
    /// game announces the result; the other waits for that announcement.
    pub async fn play_game(&mut self, rng: &mut SmallRng) -> Result<Outcome, NetError> {
        let me = self.local_color.ok_or(NetError::Aborted)?;
        let mut state = GameState::new(self.ruleset);
        let result = self.game_loop(me, &mut state, rng).await;
        self.state = Some(state);
        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => Err(self.fail(e).await),
        }
    }

    async fn game_loop(
        &mut self,
        me: Color,
        state: &mut GameState,
        rng: &mut SmallRng,
    ) -> Result<Outcome, NetError> {
        loop {
            self.check_abort()?;
            self.fill_inbox()?;
            while let Some(line) = self.inbox.pop_front() {
                let cmd = match line.parse::<Command>() {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        log::warn!("ignoring line {:?}: {}", line, e);
                        continue;
                    }
                };
                if let Some(outcome) = self.apply_remote(me, state, cmd)? {
                    return Ok(outcome);
                }
            }

            if state.is_over() || state.actor() != me {
                sleep(self.config.poll_interval).await;
                continue;
            }

            let Some(mv) = self.player.choose_move(rng, state) else {
                log::info!("local player abandoned the game");
                return Err(NetError::Aborted);
            };
            if let Err(err) = state.apply_as(me, mv) {
                self.player.handle_rejected(mv, err);
                continue;
            }
            self.send(Command::from_move(me, mv)).await?;
            if let Some(outcome) = state.outcome() {
                let announcement = match outcome {
                    Outcome::Win(c) => Command::Win(c),
                    Outcome::Draw => Command::Draw,
                };
                self.send(announcement).await?;
                return Ok(outcome);
            }
        }
    }

    /// Replay one remote command. Returns the result once the peer announces
    /// the end of the game.
    fn apply_remote(
        &mut self,
        me: Color,
        state: &mut GameState,
        cmd: Command,
    ) -> Result<Option<Outcome>, NetError> {
        let announced = match cmd {
            Command::Win(c) => Outcome::Win(c),
            Command::Draw => Outcome::Draw,
            Command::Roll { .. } | Command::Rules(_) | Command::Start(_) => {
                log::warn!("ignoring {} during a game", cmd);
                return Ok(None);
            }
            _ => {
                let Some((color, mv)) = cmd.as_move() else {
                    return Ok(None);
                };
                let applied = if color == me {
                    Err(MoveError::WrongPlayer)
                } else {
                    match self.config.sync_policy {
                        SyncPolicy::TrustPeer => state.apply_trusted(color, mv),
                        SyncPolicy::Validate => state.apply_as(color, mv),
                    }
                };
                match applied {
                    Ok(_) => self.player.handle_opponent_move(mv, state),
                    Err(err) => self.reject_remote(&cmd, err)?,
                }
                return Ok(None);
            }
        };
        match state.outcome() {
            Some(local) if local == announced => {}
            Some(local) => {
                self.disagree(std::format!("peer announced {:?}, local result {:?}", announced, local))?;
                state.declare_outcome(announced);
            }
            None => {
                self.disagree(std::format!("peer announced {:?} before the game ended locally", announced))?;
                state.declare_outcome(announced);
            }
        }
        Ok(Some(announced))
    }

    fn reject_remote(&self, cmd: &Command, err: MoveError) -> Result<(), NetError> {
        self.disagree(std::format!("{} refused: {}", cmd, err))
    }

    fn disagree(&self, msg: String) -> Result<(), NetError> {
        match self.config.sync_policy {
            SyncPolicy::TrustPeer => {
                log::warn!("{}", msg);
                Ok(())
            }
            SyncPolicy::Validate => Err(NetError::Diverged(msg)),
        }
    }

    /// Best-of-3 over one connection, fresh dice before every game. Scores
    /// are kept per participant (host 0, client 1).
    pub async fn run_match(&mut self, rng: &mut SmallRng) -> Result<MatchResult, NetError> {
        let mut score = Match::new();
        loop {
            if let Some(result) = score.result() {
                log::info!("match over: {:?}", result);
                return Ok(result);
            }
            let color = self.handshake(rng).await?;
            let outcome = self.play_game(rng).await?;
            let me = self.role.participant();
            let white = if color == Color::White { me } else { 1 - me };
            score.record(white, outcome);
        }
    }

    /// Close the connection.
    pub async fn close(&mut self) {
        self.transport.close().await;
    }
}
