use std::{error::Error, fs, path::Path};

use gridq::{
    algo::{QTableAgent, QTableAgentConfig},
    env::DiscreteActionSpace,
    gym::{grid_world::Move, GridWorld, GridWorldConfig},
    train::{Trainer, TrainerConfig},
};
use log::info;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

const NUM_EPISODES: u32 = 1000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = Path::new("demos/q_table_grid_world");

    let mut env = GridWorld::new(GridWorldConfig::default())?;
    let mut agent = QTableAgent::new(
        env.actions(),
        QTableAgentConfig {
            seed: Some(1),
            ..Default::default()
        },
    )?;
    let trainer = Trainer::new(TrainerConfig::default())?;

    info!("training on\n{env}");
    let history = trainer.train(&mut agent, &mut env, NUM_EPISODES);

    fs::create_dir_all(path.join("out"))?;

    let mut wtr = csv::Writer::from_path(path.join("out/data.csv"))?;
    wtr.write_record(["episode", "steps", "reward", "outcome"])?;
    for (i, episode) in history.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            episode.steps.to_string(),
            episode.total_reward.to_string(),
            episode.outcome.as_str().to_string(),
        ])?;
    }
    wtr.flush()?;

    let mut wtr = csv::Writer::from_path(path.join("out/q_table.csv"))?;
    let mut header = vec!["row".to_string(), "col".to_string()];
    header.extend(Move::iter().map(|m| format!("{m:?}")));
    wtr.write_record(&header)?;
    let mut rows = agent.q_table().snapshot().into_iter().collect::<Vec<_>>();
    rows.sort_by_key(|&(pos, _)| pos);
    for ((row, col), values) in rows {
        let mut record = vec![row.to_string(), col.to_string()];
        record.extend(values.iter().map(|v| format!("{v:.2}")));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    let rollout = trainer.greedy_rollout(&mut agent, &mut env);
    info!(
        "greedy policy: {} after {} steps, reward {}, epsilon {:.3}\n{env}",
        rollout.outcome.as_str(),
        rollout.steps,
        rollout.total_reward,
        agent.epsilon()
    );

    Ok(())
}
