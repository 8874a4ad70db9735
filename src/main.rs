use alphabeta_chess::position_stack::GameState;
use alphabeta_chess::{defs::DEFAULT_DEPTH, limits::SearchLimits, search::Search};
use anyhow::{anyhow, Context};
use clap::Parser;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Move};
use std::io::{self, BufRead};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use vampirc_uci::{parse_one, UciFen, UciMessage};

#[derive(Parser)]
struct Cli {
    /// Search depth when `go` does not ask for one
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Seed for the random move choice, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter (e.g. "debug"), logs go to stderr. Defaults to RUST_LOG
    #[arg(long, value_name = "filter")]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.log.as_deref());

    let new_search = || match args.seed {
        Some(seed) => Search::seeded(seed),
        None => Search::new(),
    };
    let mut search = new_search();

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let msg: UciMessage = parse_one(line.trim());

        match msg {
            UciMessage::IsReady => println!("{}", UciMessage::ReadyOk),
            UciMessage::Quit => break,
            UciMessage::Uci => {
                println!(
                    "{}",
                    UciMessage::Id {
                        name: Some(format!("alphabeta-chess {}", env!("CARGO_PKG_VERSION"))),
                        author: None,
                    }
                );
                println!("{}", UciMessage::UciOk);
            }
            UciMessage::UciNewGame => {
                search = new_search();
            }
            UciMessage::Position {
                startpos,
                fen,
                moves,
            } => {
                if let Err(err) = set_position(&mut search, startpos, fen, &moves) {
                    warn!("rejected position: {:#}", err);
                    println!("info string error: {:#}", err);
                }
            }
            UciMessage::Go {
                time_control,
                search_control,
            } => {
                if time_control.is_some() {
                    debug!("time controls are ignored, searching to a fixed depth");
                }

                let limits = SearchLimits::from_uci(search_control.as_ref(), args.depth);
                let start_time = Instant::now();
                let result = search.go(&limits);

                println!(
                    "info depth {} time {} nodes {} evals {} score cp {}",
                    limits.depth,
                    start_time.elapsed().as_millis(),
                    search.nodes,
                    search.evals,
                    (result.score * 100.0).round() as i64
                );

                let state = search.position().game_state();
                for line in bestmove_reply(result.best_move.as_ref(), state) {
                    println!("{}", line);
                }
            }
            UciMessage::Unknown(text, _) => debug!("ignoring unknown command {:?}", text),
            _ => {}
        }
    }

    info!("bye");
    Ok(())
}

fn set_position(
    search: &mut Search,
    startpos: bool,
    fen: Option<UciFen>,
    moves: &[vampirc_uci::UciMove],
) -> anyhow::Result<()> {
    let position = match fen {
        Some(fen) if !startpos => fen
            .0
            .parse::<Fen>()
            .with_context(|| format!("invalid fen {:?}", fen.0))?
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|err| anyhow!("illegal position: {}", err))?,
        _ => Chess::default(),
    };

    let moves = moves
        .iter()
        .map(|m| {
            m.to_string()
                .parse::<UciMove>()
                .with_context(|| format!("invalid move {}", m))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    search.set_position(position, &moves)
}

/// Lines answering a `go`. A search without a move reports the outcome
/// only when the game is actually over (depth 0 also yields no move)
fn bestmove_reply(best_move: Option<&Move>, state: GameState) -> Vec<String> {
    match best_move {
        Some(best_move) => vec![format!(
            "bestmove {}",
            best_move.to_uci(CastlingMode::Standard)
        )],
        None if state.is_over() => vec![
            format!("info string game over: {}", state),
            "bestmove 0000".to_string(),
        ],
        None => vec!["bestmove 0000".to_string()],
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
