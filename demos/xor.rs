use sigmoid_mlp::{Network, NetworkConfig};

fn main() -> sigmoid_mlp::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Classic XOR dataset.
    let xs = vec![
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
    ];
    let ys = vec![vec![0.0], vec![0.0], vec![1.0], vec![1.0]];

    // 2 -> 4 -> 1, sigmoid everywhere.
    let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 0)?;
    net.train(&xs, &ys, 5_000)?;

    println!("train_mse={}", net.evaluate(&xs, &ys)?);
    for x in &xs {
        let y = net.forward(x)?;
        println!("x={x:?} y={:.4}", y[0]);
    }

    Ok(())
}
