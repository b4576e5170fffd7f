//! Full matches through the pipeline.

use std::sync::{Arc, Mutex};

use tictactoe_solver::{
    Error, Result,
    config::SolverConfig,
    pipeline::{
        BlockingPlayer, MatchConfig, MatchPipeline, MatchResult, MinimaxPlayer, Observer,
        OpportunistPlayer, PlayerKind, RandomPlayer,
    },
    ports::Player,
    tictactoe::{Board, GameOutcome, Mark, Move},
};

fn config(num_games: usize, seed: u64) -> MatchConfig {
    MatchConfig {
        num_games,
        seed: Some(seed),
        ..MatchConfig::default()
    }
}

/// Records every event so tests can check the sequence
#[derive(Clone, Default)]
struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Observer for EventLog {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        self.push(format!("match_start {total_games}"));
        Ok(())
    }

    fn on_game_start(&mut self, game_num: usize) -> Result<()> {
        self.push(format!("game_start {game_num}"));
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        before: &Board,
        mv: Move,
        after: &Board,
    ) -> Result<()> {
        assert!(before.is_vacant(mv.position));
        assert_eq!(after.get(mv.position), mv.mark.to_cell());
        self.push(format!("move {step_num}"));
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, _outcome: GameOutcome, board: &Board) -> Result<()> {
        assert!(board.winner().unwrap().is_some());
        self.push(format!("game_end {game_num}"));
        Ok(())
    }

    fn on_match_end(&mut self) -> Result<()> {
        self.push("match_end".to_string());
        Ok(())
    }
}

#[test]
fn self_play_always_draws() {
    let mut pipeline = MatchPipeline::new(config(20, 7));
    let mut x = MinimaxPlayer::new(Mark::X, SolverConfig::default());
    let mut o = MinimaxPlayer::new(Mark::O, SolverConfig::default());

    let result = pipeline.run(&mut x, &mut o).unwrap();
    assert_eq!(result.draws, 20);
    assert_eq!(result.draw_rate, 1.0);
}

#[test]
fn self_play_without_opening_shortcut_draws() {
    let solver = SolverConfig::new().with_opening_shortcut(false);
    let mut pipeline = MatchPipeline::new(config(5, 13));
    let mut x = MinimaxPlayer::new(Mark::X, solver.clone());
    let mut o = MinimaxPlayer::new(Mark::O, solver);

    let result = pipeline.run(&mut x, &mut o).unwrap();
    assert_eq!(result.draws, 5);
}

#[test]
fn solver_never_loses_as_x() {
    let opponents: Vec<Box<dyn Player>> = vec![
        Box::new(RandomPlayer::new(Mark::O)),
        Box::new(OpportunistPlayer::new(Mark::O)),
        Box::new(BlockingPlayer::new(Mark::O)),
    ];

    let mut solver = MinimaxPlayer::new(Mark::X, SolverConfig::default());
    for (i, mut opponent) in opponents.into_iter().enumerate() {
        let mut pipeline = MatchPipeline::new(config(50, 100 + i as u64));
        let result = pipeline.run(&mut solver, opponent.as_mut()).unwrap();
        assert_eq!(result.o_wins, 0, "lost to {}", opponent.name());
    }
}

#[test]
fn solver_never_loses_as_o() {
    let opponents: Vec<Box<dyn Player>> = vec![
        Box::new(RandomPlayer::new(Mark::X)),
        Box::new(OpportunistPlayer::new(Mark::X)),
        Box::new(BlockingPlayer::new(Mark::X)),
    ];

    let mut solver = MinimaxPlayer::new(Mark::O, SolverConfig::default());
    for (i, mut opponent) in opponents.into_iter().enumerate() {
        let mut pipeline = MatchPipeline::new(config(50, 200 + i as u64));
        let result = pipeline.run(opponent.as_mut(), &mut solver).unwrap();
        assert_eq!(result.x_wins, 0, "lost to {}", opponent.name());
    }
}

#[test]
fn solver_beats_random_player_sometimes() {
    let mut pipeline = MatchPipeline::new(config(100, 5));
    let mut solver = MinimaxPlayer::new(Mark::X, SolverConfig::default());
    let mut random = RandomPlayer::new(Mark::O);

    let result = pipeline.run(&mut solver, &mut random).unwrap();
    assert!(result.x_wins > 50, "only {} wins", result.x_wins);
}

#[test]
fn seeded_matches_are_reproducible() {
    let play = || {
        let mut pipeline = MatchPipeline::new(config(30, 77));
        let mut x = RandomPlayer::new(Mark::X);
        let mut o = OpportunistPlayer::new(Mark::O);
        pipeline.run(&mut x, &mut o).unwrap()
    };
    assert_eq!(play(), play());
}

#[test]
fn configured_players_follow_the_config() {
    let mut config = config(10, 3);
    config.player_x = PlayerKind::Blocking;
    config.player_o = PlayerKind::Minimax;

    let (mut x, mut o) = config.build_players();
    assert_eq!(x.mark(), Mark::X);
    assert_eq!(o.name(), "MinimaxPlayer");

    let result = MatchPipeline::new(config)
        .run(x.as_mut(), o.as_mut())
        .unwrap();
    assert_eq!(result.x_wins, 0);
}

#[test]
fn same_marks_are_rejected() {
    let mut pipeline = MatchPipeline::new(config(1, 0));
    let mut a = MinimaxPlayer::new(Mark::X, SolverConfig::default());
    let mut b = RandomPlayer::new(Mark::X);
    assert!(matches!(
        pipeline.run(&mut a, &mut b),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn observers_see_the_event_sequence() {
    let log = EventLog::default();
    let mut pipeline = MatchPipeline::new(config(2, 9)).with_observer(Box::new(log.clone()));
    let mut x = MinimaxPlayer::new(Mark::X, SolverConfig::default());
    let mut o = MinimaxPlayer::new(Mark::O, SolverConfig::default());
    pipeline.run(&mut x, &mut o).unwrap();

    let events = log.take();
    assert_eq!(events.first().unwrap(), "match_start 2");
    assert_eq!(events.last().unwrap(), "match_end");

    // Perfect play always fills the board.
    let moves = events.iter().filter(|e| e.starts_with("move ")).count();
    assert_eq!(moves, 18);
    assert_eq!(events[1], "game_start 0");
    assert_eq!(events[2], "move 0");
    assert_eq!(events[10], "move 8");
    assert_eq!(events[11], "game_end 0");
}

#[test]
fn match_result_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");

    let result = MatchResult::new(10, 3, 2, 5);
    result.save(&path).unwrap();
    assert_eq!(MatchResult::load(&path).unwrap(), result);
}

#[test]
fn match_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.json");
    std::fs::write(
        &path,
        r#"{
            "num_games": 12,
            "seed": 4,
            "player_x": "opportunist",
            "player_o": "minimax",
            "solver": { "opening_shortcut": false }
        }"#,
    )
    .unwrap();

    let config = MatchConfig::load(&path).unwrap();
    assert_eq!(config.num_games, 12);
    assert_eq!(config.seed, Some(4));
    assert_eq!(config.player_x, PlayerKind::Opportunist);
    assert_eq!(config.player_o, PlayerKind::Minimax);
    assert!(!config.solver.opening_shortcut);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MatchConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
