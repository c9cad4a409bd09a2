use morris::{
    init_logging, AiPlayer, Difficulty, InMemoryTransport, MatchResult, NodeConfig, PeerNode,
    Role, Ruleset,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let (t1, t2) = InMemoryTransport::pair();
    let mut host = PeerNode::new(
        Box::new(AiPlayer::new(Difficulty::Hard)),
        Box::new(t1),
        Role::Host,
        Ruleset::Tournament,
        NodeConfig::default(),
    );
    let mut client = PeerNode::new(
        Box::new(AiPlayer::new(Difficulty::Medium)),
        Box::new(t2),
        Role::Client,
        Ruleset::default(),
        NodeConfig::default(),
    );

    let (r1, r2) = tokio::try_join!(host.run_match(&mut rng1), client.run_match(&mut rng2))?;
    if r1 != r2 {
        anyhow::bail!("peers disagree on the match result: {:?} vs {:?}", r1, r2);
    }

    let winner = match r1 {
        MatchResult::Winner(0) => Some("host"),
        MatchResult::Winner(_) => Some("client"),
        MatchResult::Drawn => None,
    };
    let last = host.state().map(|s| s.snapshot());

    let result = json!({
        "host": {"difficulty": "hard", "seed": seed1},
        "client": {"difficulty": "medium", "seed": seed2},
        "result": r1,
        "winner": winner,
        "last_game": last,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
