//! Score display notifications

/// UI layer that shows the score and game-over banner
pub trait ScoreDisplay {
    fn score_changed(&mut self, score: u32);
    fn game_over_changed(&mut self, game_over: bool);
}

/// Forwards score/game-over values to a display only when they change
#[derive(Debug, Clone, Default)]
pub struct ScoreWatcher {
    last_score: Option<u32>,
    last_game_over: Option<bool>,
}

impl ScoreWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the current values; the first call always notifies
    pub fn observe<D: ScoreDisplay + ?Sized>(
        &mut self,
        score: u32,
        game_over: bool,
        display: &mut D,
    ) {
        if self.last_score != Some(score) {
            self.last_score = Some(score);
            display.score_changed(score);
        }
        if self.last_game_over != Some(game_over) {
            self.last_game_over = Some(game_over);
            display.game_over_changed(game_over);
        }
    }
}

/// Display that writes to the log
#[derive(Debug, Default)]
pub struct LogScoreDisplay;

impl ScoreDisplay for LogScoreDisplay {
    fn score_changed(&mut self, score: u32) {
        log::info!("Score: {}", score);
    }

    fn game_over_changed(&mut self, game_over: bool) {
        if game_over {
            log::info!("GAME OVER");
        }
    }
}
