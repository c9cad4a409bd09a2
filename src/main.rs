#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use anyhow::Context;
#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use morris::{
    init_logging, play_local_match, AiPlayer, CliPlayer, Difficulty, MatchResult, NodeConfig,
    PeerNode, Player, Role, Ruleset, SyncPolicy, TcpTransport,
};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Nine Men's Morris", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Level {
    Easy,
    Medium,
    Hard,
}

#[cfg(feature = "std")]
impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Rules {
    Relaxed,
    Tournament,
}

#[cfg(feature = "std")]
impl From<Rules> for Ruleset {
    fn from(rules: Rules) -> Self {
        match rules {
            Rules::Relaxed => Ruleset::Relaxed,
            Rules::Tournament => Ruleset::Tournament,
        }
    }
}

#[derive(clap::Args, Clone, Debug)]
#[cfg(feature = "std")]
struct Common {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Level::Medium)]
    difficulty: Level,
    #[arg(long, value_enum, default_value_t = PlayerType::Human)]
    player: PlayerType,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Best-of-3 against the computer on this machine.
    Local {
        #[command(flatten)]
        common: Common,
        #[arg(long, value_enum, default_value_t = Rules::Relaxed)]
        ruleset: Rules,
    },
    /// Host a networked match and wait for a peer to connect.
    Host {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[command(flatten)]
        common: Common,
        #[arg(long, value_enum, default_value_t = Rules::Relaxed)]
        ruleset: Rules,
        #[arg(long, help = "Abort when the peer sends a move the local rules refuse")]
        validate: bool,
    },
    /// Join a networked match hosted elsewhere.
    Join {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[command(flatten)]
        common: Common,
        #[arg(long, help = "Abort when the peer sends a move the local rules refuse")]
        validate: bool,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
fn make_player(common: &Common) -> Box<dyn Player> {
    match common.player {
        PlayerType::Human => Box::new(CliPlayer::new()),
        PlayerType::Ai => Box::new(AiPlayer::new(common.difficulty.into())),
    }
}

#[cfg(feature = "std")]
fn node_config(validate: bool) -> NodeConfig {
    NodeConfig::with_policy(if validate {
        SyncPolicy::Validate
    } else {
        SyncPolicy::TrustPeer
    })
}

#[cfg(feature = "std")]
fn report(result: Option<MatchResult>, me: usize) {
    match result {
        Some(MatchResult::Winner(p)) if p == me => println!("\nYou won the match!"),
        Some(MatchResult::Winner(_)) => println!("\nYou lost the match."),
        Some(MatchResult::Drawn) => println!("\nThe match is drawn."),
        None => println!("\nMatch abandoned."),
    }
}

#[cfg(feature = "std")]
async fn run_network(
    mut node: PeerNode,
    mut rng: SmallRng,
) -> anyhow::Result<()> {
    let me = node.role().participant();
    let result = node.run_match(&mut rng).await;
    node.close().await;
    let result = result.context("match ended with an error")?;
    report(Some(result), me);
    Ok(())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { common, ruleset } => {
            let mut rng = make_rng(common.seed);
            let mut me = make_player(&common);
            let mut computer = AiPlayer::new(common.difficulty.into());
            println!("Best of 3 against the computer ({:?}).", common.difficulty);
            let mut players: [&mut dyn Player; 2] = [me.as_mut(), &mut computer];
            let result = play_local_match(&mut players, ruleset.into(), &mut rng);
            report(result, 0);
        }
        Commands::Host {
            bind,
            common,
            ruleset,
            validate,
        } => {
            let listener = TcpTransport::bind(&bind).await?;
            println!("Waiting for a player to connect on {}...", bind);
            let transport = TcpTransport::accept(&listener).await?;
            let node = PeerNode::new(
                make_player(&common),
                Box::new(transport),
                Role::Host,
                ruleset.into(),
                node_config(validate),
            );
            run_network(node, make_rng(common.seed)).await?;
        }
        Commands::Join {
            connect,
            common,
            validate,
        } => {
            println!("Connecting to {}...", connect);
            let transport = TcpTransport::connect(&connect).await?;
            println!("Connected successfully!");
            let node = PeerNode::new(
                make_player(&common),
                Box::new(transport),
                Role::Client,
                Ruleset::default(),
                node_config(validate),
            );
            run_network(node, make_rng(common.seed)).await?;
        }
    }
    Ok(())
}
