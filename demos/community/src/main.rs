#[macro_use]
extern crate log;

use std::time::Instant;

use classic_rcs::{EchoStateReservoir, EsnParams, LightweightParams, LightweightReservoir};
use common::{Reservoir, Result};
use dialoguer::{theme::ColorfulTheme, Select};
use distributed_rcs::{NetworkParams, ReservoirNetwork};
use rc_matrix::Matrix;
use time_series_generator::generate_sine_wave;

mod traits;

use traits::Traits;

const SEED: Option<u64> = Some(0);

pub(crate) fn main() -> Result<()> {
    pretty_env_logger::init();

    let demos = vec!["Echo State reservoir", "Lightweight reservoir", "Community network"];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select reservoir")
        .items(&demos)
        .default(0)
        .interact()
        .unwrap_or(0);
    match e {
        0 => run_esn(),
        1 => run_lightweight(),
        _ => run_network(),
    }
}

fn run_esn() -> Result<()> {
    let values: Vec<f64> = generate_sine_wave(100);
    info!("got {} datapoints", values.len());

    let params = EsnParams {
        reservoir_size: 100,
        input_scaling: 0.5,
        spectral_radius: 0.9,
        seed: SEED,
        ..Default::default()
    };
    let mut esn = EchoStateReservoir::new(params)?;

    // two lagged copies of the signal as input columns
    let inputs: Vec<Matrix> = values
        .windows(2)
        .map(|w| Matrix::row_vector(&[w[1], w[0]]))
        .collect();

    let t0 = Instant::now();
    let activity = drive(&mut esn, &inputs, |s| mean_abs(&s.to_row_major()))?;
    info!("{} forward steps took {}us", inputs.len(), t0.elapsed().as_micros());
    info!("mean absolute activation, last 5 steps: {:?}", &activity[activity.len().saturating_sub(5)..]);

    for (name, v) in esn.export_state().iter().take(5) {
        info!("{}: {:.3}", name, v);
    }

    Ok(())
}

fn run_lightweight() -> Result<()> {
    let params = LightweightParams {
        reservoir_size: 32,
        seed: SEED,
        ..Default::default()
    };
    let mut reservoir = LightweightReservoir::new(params)?;

    let pairs = [
        (Traits::new(0.9, 0.5, 0.8, 0.6, 0.4)?, Traits::new(0.7, 0.6, 0.3, 0.8, 0.7)?),
        (Traits::new(0.2, 0.8, 0.1, 0.5, 0.9)?, Traits::new(0.4, 0.3, 0.6, 0.2, 0.5)?),
        (Traits::new(0.6, 0.6, 0.6, 0.6, 0.6)?, Traits::new(0.9, 0.2, 0.9, 0.4, 0.1)?),
    ];
    for (from, to) in pairs.iter() {
        let state = reservoir.update(from.extraversion * to.openness);
        // the first three units are read as sentiment, intensity and engagement
        info!(
            "interaction: sentiment {:.3}, intensity {:.3}, engagement {:.3}",
            state[0], state[1], state[2]
        );
    }

    Ok(())
}

fn run_network() -> Result<()> {
    let mut network = ReservoirNetwork::new(NetworkParams {
        seed: SEED,
        ..Default::default()
    })?;

    let ids = ["local_business", "community_center", "education_hub"];
    for id in ids {
        network.add_node(id, 16)?;
    }
    network.connect("local_business", "community_center");
    network.connect("community_center", "education_hub");
    network.connect("education_hub", "local_business");

    for (i, interaction) in [0.5, -0.3, 0.8].iter().enumerate() {
        info!("interaction {}", i + 1);
        let _ = network.process_sequence(&ids, *interaction);

        for id in ids {
            let Some(key) = network.export_key(id) else {
                continue;
            };
            if let Some(export) = network.query_namespace(key) {
                info!("{} state: {:.3?} ...", export.namespace, &export.value[..3]);
            }
        }
    }

    Ok(())
}

/// Feed every input through the reservoir, recording `summary` of each state
fn drive<R, F>(reservoir: &mut R, inputs: &[R::Input], summary: F) -> Result<Vec<f64>>
where
    R: Reservoir,
    R::Input: Sized,
    F: Fn(&R::State) -> f64,
{
    reservoir.reset();
    inputs
        .iter()
        .map(|input| reservoir.step(input).map(&summary))
        .collect()
}

fn mean_abs(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return 0.0;
    }
    vals.iter().map(|v| v.abs()).sum::<f64>() / vals.len() as f64
}
