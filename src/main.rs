use graphplan::{Error, PlanGraphLevel, Problem};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let problem = Problem::builder()
        .proposition("at-home")
        .action("walk", &["at-home"], &["at-shop"], &["at-home"])
        .action("buy", &["at-shop", "has-money"], &["has-food"], &["has-money"])
        .action("cook", &["at-home", "has-food"], &["fed"], &["has-food"])
        .with_persistence_actions()
        .with_derived_independence()
        .build()?;

    let mut levels = vec![PlanGraphLevel::initial(&problem, &["at-home", "has-money"])?];
    loop {
        let mut next = PlanGraphLevel::new();
        next.expand(&problem, &levels[levels.len() - 1])?;
        let leveled_off = next.proposition_layer() == levels[levels.len() - 1].proposition_layer();
        levels.push(next);
        if leveled_off {
            break;
        }
    }

    for (i, level) in levels.iter().enumerate() {
        println!("Level {}:\n{}\n", i, level.display(&problem));
    }
    info!(levels = levels.len(), "planning graph leveled off");
    Ok(())
}
