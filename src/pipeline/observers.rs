//! Observer adapters for match pipelines
//!
//! Observers allow composable reporting during a match without coupling the
//! game loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{Board, GameOutcome, Mark, Move, Position},
};

/// Progress bar observer - shows match progress with a running tally
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn tally(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome, _board: &Board) -> Result<()> {
        match outcome {
            GameOutcome::Win(Mark::X) => self.x_wins += 1,
            GameOutcome::Win(Mark::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_match_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Emits match events as structured `tracing` events
#[derive(Debug, Default)]
pub struct TracingObserver {
    games: usize,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for TracingObserver {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        info!(total_games, "match started");
        Ok(())
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        _before: &Board,
        mv: Move,
        after: &Board,
    ) -> Result<()> {
        debug!(
            game = game_num,
            step = step_num,
            mark = %mv.mark,
            position = %mv.position,
            board = %after.encode(),
            "move played"
        );
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome, board: &Board) -> Result<()> {
        self.games += 1;
        debug!(game = game_num, ?outcome, board = %board.encode(), "game finished");
        Ok(())
    }

    fn on_match_end(&mut self) -> Result<()> {
        info!(games = self.games, "match finished");
        Ok(())
    }
}

/// Prints the board after every move and announces the result.
///
/// Used by the interactive command; any writer works, which keeps it testable.
pub struct BoardPrinter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> BoardPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Observer for BoardPrinter<W> {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        writeln!(self.out, "\n{}\n", Board::new())?;
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _before: &Board,
        mv: Move,
        after: &Board,
    ) -> Result<()> {
        writeln!(self.out, "\nPlayer {} plays at {}\n", mv.mark, mv.position)?;
        writeln!(self.out, "{after}")?;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome, _board: &Board) -> Result<()> {
        match outcome {
            GameOutcome::Win(mark) => writeln!(self.out, "\nPLAYER {mark} WINS!")?,
            GameOutcome::Draw => writeln!(self.out, "\nGAME TIED!")?,
        }
        self.out.flush()?;
        Ok(())
    }
}

/// One finished game as written by [`JsonlObserver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_num: usize,
    pub moves: Vec<Position>,
    pub outcome: GameOutcome,
    pub final_board: String,
}

/// JSONL observer - writes one [`GameRecord`] per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_moves: Vec<Position>,
}

impl JsonlObserver {
    /// Create a new JSONL observer, truncating `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_moves: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_moves.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _before: &Board,
        mv: Move,
        _after: &Board,
    ) -> Result<()> {
        self.current_moves.push(mv.position);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome, board: &Board) -> Result<()> {
        let record = GameRecord {
            game_num,
            moves: std::mem::take(&mut self.current_moves),
            outcome,
            final_board: board.encode(),
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_match_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_printer_announces_winner() {
        let mut printer = BoardPrinter::new(Vec::new());
        let board = Board::from_string("XXX/OO_/___").unwrap();
        printer
            .on_game_end(0, GameOutcome::Win(Mark::X), &board)
            .unwrap();
        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert!(text.contains("PLAYER X WINS!"));
    }

    #[test]
    fn test_board_printer_shows_move() {
        let mut printer = BoardPrinter::new(Vec::new());
        let before = Board::new();
        let position = Position::new(1, 1).unwrap();
        let after = before.apply(Mark::X, position).unwrap();
        printer
            .on_move(0, 0, &before, Move { position, mark: Mark::X }, &after)
            .unwrap();
        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert!(text.contains("Player X plays at 1,1"));
        assert!(text.contains("   | X |"));
    }

    #[test]
    fn test_jsonl_observer_writes_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl");
        let mut observer = JsonlObserver::new(&path).unwrap();

        let mut board = Board::new();
        observer.on_game_start(0).unwrap();
        for (step, (mark, index)) in [(Mark::X, 0), (Mark::O, 3), (Mark::X, 1), (Mark::O, 4), (Mark::X, 2)]
            .into_iter()
            .enumerate()
        {
            let position = Position::from_index(index).unwrap();
            let after = board.apply(mark, position).unwrap();
            observer
                .on_move(0, step, &board, Move { position, mark }, &after)
                .unwrap();
            board = after;
        }
        observer
            .on_game_end(0, GameOutcome::Win(Mark::X), &board)
            .unwrap();
        observer.on_match_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let record: GameRecord = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(record.moves.len(), 5);
        assert_eq!(record.outcome, GameOutcome::Win(Mark::X));
        assert_eq!(record.final_board, "XXXOO____");
    }
}
