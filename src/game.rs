use std::{collections::VecDeque, time::Duration};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::board::{Board, Cell};
use crate::error::Result;
use crate::frontend::{
    Anchor, Audio, Clip, Color, InputEvent, InputSource, Io, Pacer, Renderer, ScoreStore,
};
use crate::items::{BonusFood, Food, PowerUp, PowerUpKind};
use crate::menu::show_high_scores;
use crate::scores;
use crate::scoring::{Scoreboard, BONUS_POINTS, FOOD_POINTS};
use crate::snake::{Direction, Snake};

const BONUS_CHANCE: f64 = 0.2;
const POWER_UP_CHANCE: f64 = 0.1;
const BONUS_GROWTH: usize = 2;
const SPEED_BOOST: u32 = 5;
const MAX_BUFFERED_TURNS: usize = 3;
const GAME_OVER_HOLD: Duration = Duration::from_secs(1);

/// Where control goes once a session is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    ToMenu,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// The snake just died; the Game Over message has not been shown yet.
    GameOverPending,
    AwaitingRestartChoice,
    Terminated(Exit),
}

/// One play session. Everything it owns is dropped when the session ends.
pub struct Game<R> {
    pub board: Board,
    pub snake: Snake,
    pub food: Food,
    pub bonus: BonusFood,
    pub power_up: PowerUp,
    pub scoreboard: Scoreboard,
    /// Ticks per second.
    pub tick_rate: u32,
    pub phase: Phase,
    pub paused: bool,
    turns: VecDeque<Direction>,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(board: Board, base_rate: u32, mut rng: R) -> Self {
        // A stationary snake would eat food under its head and then bite itself.
        let center = board.center();
        let mut cell = board.random_cell(&mut rng);
        while cell == center && (board.cols() > 1 || board.rows() > 1) {
            cell = board.random_cell(&mut rng);
        }

        Game {
            board,
            snake: Snake::new(board.center()),
            food: Food { cell },
            bonus: BonusFood::Dormant,
            power_up: PowerUp::Dormant,
            scoreboard: Scoreboard::default(),
            tick_rate: base_rate.max(1),
            phase: Phase::Playing,
            paused: false,
            turns: VecDeque::new(),
            rng,
        }
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn level(&self) -> u32 {
        self.scoreboard.level()
    }

    pub fn is_invincible(&self) -> bool {
        self.power_up.active_kind() == Some(PowerUpKind::Invincibility)
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if self.phase != Phase::Playing {
            return;
        }

        let dir = match event {
            InputEvent::Quit => {
                info!(score = self.score(), "quit during play");
                self.phase = Phase::Terminated(Exit::Quit);
                return;
            }
            InputEvent::KeyCancel => {
                self.paused = !self.paused;
                return;
            }
            InputEvent::KeyUp => Direction::Up,
            InputEvent::KeyDown => Direction::Down,
            InputEvent::KeyLeft => Direction::Left,
            InputEvent::KeyRight => Direction::Right,
            InputEvent::KeyConfirm | InputEvent::KeyOther => return,
        };

        if !self.paused && self.turns.len() < MAX_BUFFERED_TURNS {
            self.turns.push_back(dir);
        }
    }

    /// Advances the simulation by one tick and draws the resulting frame.
    pub fn tick<D: Renderer, A: Audio>(&mut self, screen: &mut D, audio: &mut A) -> Result<()> {
        if self.phase != Phase::Playing || self.paused {
            return Ok(());
        }

        self.apply_turn();
        let head = self.snake.next_head(&self.board);

        screen.clear_frame()?;
        self.draw_items(screen)?;
        if self.bonus.tick() {
            debug!("bonus food expired");
        }
        if self.power_up.tick_token() {
            debug!("power-up token expired");
        }

        self.snake.push_head(head);
        let bitten = self.snake.bites_itself() && !self.is_invincible();

        self.draw_snake(screen)?;
        self.draw_hud(screen)?;
        screen.present_frame()?;

        if bitten {
            info!(score = self.score(), length = self.snake.length(), "snake bit itself");
            audio.stop_loop();
            audio.play_once(Clip::GameOver);
            self.phase = Phase::GameOverPending;
            return Ok(());
        }

        if head == self.food.cell {
            self.eat_food(audio);
        }

        if self.bonus.take_at(head) {
            self.snake.grow(BONUS_GROWTH);
            self.award(BONUS_POINTS);
            audio.play_once(Clip::BonusFood);
            debug!(score = self.score(), "bonus food eaten");
        }

        if self.power_up.token_cell() == Some(head) {
            let kind = PowerUpKind::random(&mut self.rng);
            self.power_up.claim_at(head, kind);
            audio.play_once(Clip::PowerUp);
            if kind == PowerUpKind::SpeedBoost {
                self.tick_rate += SPEED_BOOST;
            }
            debug!(?kind, rate = self.tick_rate, "power-up claimed");
        }

        if let Some(kind) = self.power_up.tick_claim() {
            if kind == PowerUpKind::SpeedBoost {
                self.tick_rate = self.tick_rate.saturating_sub(SPEED_BOOST).max(1);
            }
            debug!(?kind, rate = self.tick_rate, "power-up wore off");
        }

        Ok(())
    }

    /// Shows the Game Over message, then the restart prompt.
    pub fn announce_game_over<D, C>(&mut self, screen: &mut D, pacer: &mut C) -> Result<()>
    where
        D: Renderer,
        C: Pacer,
    {
        if self.phase != Phase::GameOverPending {
            return Ok(());
        }

        screen.clear_frame()?;
        let message = format!("Game Over! Score: {}", self.score());
        screen.draw_text(&message, Color::Red, Anchor::Center { dy: 0 })?;
        screen.present_frame()?;
        pacer.hold(GAME_OVER_HOLD);

        screen.clear_frame()?;
        let prompt = "Press C to Play Again or Q to Quit";
        screen.draw_text(prompt, Color::White, Anchor::Center { dy: 0 })?;
        screen.present_frame()?;

        self.phase = Phase::AwaitingRestartChoice;
        Ok(())
    }

    /// Resolves the restart prompt. Confirming records the score and shows
    /// the high-score table.
    pub fn choose_restart<T, S>(
        &mut self,
        event: InputEvent,
        screen: &mut T,
        store: &mut S,
    ) -> Result<()>
    where
        T: Renderer + InputSource,
        S: ScoreStore,
    {
        if self.phase != Phase::AwaitingRestartChoice {
            return Ok(());
        }

        match event {
            InputEvent::Quit => self.phase = Phase::Terminated(Exit::Quit),
            InputEvent::KeyCancel => self.phase = Phase::Terminated(Exit::ToMenu),
            InputEvent::KeyConfirm => {
                match scores::record(store, self.score()) {
                    Ok(all) => info!(score = self.score(), entries = all.len(), "score saved"),
                    Err(e) => warn!(error = %e, "could not save high scores"),
                }
                let exit = show_high_scores(screen, store)?;
                self.phase = Phase::Terminated(exit);
            }
            _ => {}
        }

        Ok(())
    }

    pub fn draw_paused<D: Renderer>(&self, screen: &mut D) -> Result<()> {
        screen.clear_frame()?;
        self.draw_items(screen)?;
        self.draw_snake(screen)?;
        self.draw_hud(screen)?;
        screen.draw_text("Paused", Color::White, Anchor::Center { dy: -1 })?;
        screen.draw_text("Esc to resume, Ctrl+C to quit", Color::White, Anchor::Center { dy: 1 })?;
        screen.present_frame()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn apply_turn(&mut self) {
        while let Some(dir) = self.turns.pop_front() {
            if self.snake.steer(dir) {
                break;
            }
        }
    }

    fn eat_food<A: Audio>(&mut self, audio: &mut A) {
        self.food.cell = self.board.random_cell(&mut self.rng);
        self.snake.grow(1);
        self.award(FOOD_POINTS);
        audio.play_once(Clip::Food);

        if !self.bonus.is_visible() && self.rng.gen_bool(BONUS_CHANCE) {
            let cell = self.board.random_cell(&mut self.rng);
            self.bonus.spawn(cell);
            debug!(?cell, "bonus food appeared");
        }

        if self.power_up.is_dormant() && self.rng.gen_bool(POWER_UP_CHANCE) {
            let cell = self.board.random_cell(&mut self.rng);
            self.power_up.spawn_token(cell);
            debug!(?cell, "power-up token appeared");
        }
    }

    fn award(&mut self, points: u32) {
        let gained = self.scoreboard.add(points);
        if gained > 0 {
            self.tick_rate += gained;
            info!(level = self.level(), rate = self.tick_rate, "level up");
        }
    }

    fn draw_cell<D: Renderer>(&self, screen: &mut D, cell: Cell, color: Color) -> Result<()> {
        screen.draw_rect(cell.x, cell.y, self.board.block(), color)
    }

    fn draw_items<D: Renderer>(&self, screen: &mut D) -> Result<()> {
        self.draw_cell(screen, self.food.cell, Color::Red)?;
        if let Some(cell) = self.bonus.cell() {
            self.draw_cell(screen, cell, Color::Blue)?;
        }
        if let Some(cell) = self.power_up.token_cell() {
            self.draw_cell(screen, cell, Color::Yellow)?;
        }
        Ok(())
    }

    fn draw_snake<D: Renderer>(&self, screen: &mut D) -> Result<()> {
        let color = if self.is_invincible() { Color::Yellow } else { Color::Green };
        for cell in self.snake.body() {
            self.draw_cell(screen, *cell, color)?;
        }
        Ok(())
    }

    fn draw_hud<D: Renderer>(&self, screen: &mut D) -> Result<()> {
        let status = format!("Score: {} | Level: {}", self.score(), self.level());
        screen.draw_text(&status, Color::White, Anchor::TopLeft)?;

        if self.power_up.active_kind().is_some() {
            let timer = format!("Power-up: {}s", self.power_up.remaining() / 10);
            screen.draw_text(&timer, Color::Orange, Anchor::TopRight)?;
        }
        Ok(())
    }
}

/// Runs one session until it terminates.
pub fn play<R, T, A, S, C>(game: &mut Game<R>, io: &mut Io<T, A, S, C>) -> Result<Exit>
where
    R: Rng,
    T: Renderer + InputSource,
    A: Audio,
    S: ScoreStore,
    C: Pacer,
{
    info!(rate = game.tick_rate, "session started");

    loop {
        match game.phase {
            Phase::Playing => {
                for event in io.screen.poll_events()? {
                    game.handle_input(event);
                }
                if game.phase != Phase::Playing {
                    continue;
                }

                if game.paused {
                    game.draw_paused(&mut io.screen)?;
                } else {
                    game.tick(&mut io.screen, &mut io.audio)?;
                }

                if game.phase == Phase::Playing {
                    io.pacer.wait_for_tick(game.tick_rate);
                }
            }
            Phase::GameOverPending => game.announce_game_over(&mut io.screen, &mut io.pacer)?,
            Phase::AwaitingRestartChoice => {
                let event = io.screen.wait_event()?;
                game.choose_restart(event, &mut io.screen, &mut io.scores)?;
            }
            Phase::Terminated(exit) => {
                info!(score = game.score(), level = game.level(), ?exit, "session ended");
                return Ok(exit);
            }
        }
    }
}
