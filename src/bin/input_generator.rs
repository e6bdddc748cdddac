use clap::Parser;
use graph_algebra::{parser::write_graph, Graph};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Input Generator for weighted adjacency-matrix graphs.
///
/// Writes one or more graphs in the format read by `graph-tool`:
///
/// <n>
/// <n rows of n space-separated signed weights>
///
/// Graphs are separated by a blank line. The diagonal is always zero.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate random weighted graphs for graph-tool"
)]
struct Args {
    /// Number of vertices per graph
    #[arg(short, long)]
    n: usize,

    /// Number of graphs to emit
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Probability of an edge between two distinct vertices
    #[arg(long, default_value_t = 0.35)]
    density: f64,

    /// Largest absolute edge weight (weights are sampled in [1, max])
    #[arg(long, default_value_t = 9)]
    max_weight: i32,

    /// Probability that a generated weight is negated
    #[arg(long, default_value_t = 0.0)]
    negative_prob: f64,

    /// Mirror every edge so the graph is undirected
    #[arg(long, default_value_t = false)]
    symmetric: bool,

    /// Random seed (if omitted, uses entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path
    #[arg(long)]
    output: PathBuf,
}

/// Sample a nonzero weight in [1, max_weight], negated with probability `negative_prob`
fn random_weight<R: Rng>(rng: &mut R, max_weight: i32, negative_prob: f64) -> i32 {
    let magnitude = rng.gen_range(1..=max_weight);
    if rng.gen::<f64>() < negative_prob {
        -magnitude
    } else {
        magnitude
    }
}

/// Build a random adjacency matrix without self-loops
fn generate_matrix<R: Rng>(args: &Args, rng: &mut R) -> Vec<Vec<i32>> {
    let n = args.n;
    let mut adj = vec![vec![0i32; n]; n];
    for i in 0..n {
        let first = if args.symmetric { i + 1 } else { 0 };
        for j in first..n {
            if i == j || rng.gen::<f64>() >= args.density {
                continue;
            }
            let w = random_weight(rng, args.max_weight, args.negative_prob);
            adj[i][j] = w;
            if args.symmetric {
                adj[j][i] = w;
            }
        }
    }
    adj
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !(0.0..=1.0).contains(&args.density) || !(0.0..=1.0).contains(&args.negative_prob) {
        eprintln!("Error: density and negative_prob must be in [0,1].");
        std::process::exit(1);
    }
    if args.max_weight < 1 {
        eprintln!("Error: max_weight must be positive.");
        std::process::exit(1);
    }

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut writer = BufWriter::new(File::create(&args.output)?);
    let mut total_edges = 0;

    for i in 0..args.count {
        let graph = Graph::from_matrix(generate_matrix(&args, &mut rng))?;
        total_edges += graph.num_edges();
        if i > 0 {
            writeln!(writer)?;
        }
        write_graph(&mut writer, &graph)?;
    }
    writer.flush()?;

    println!("Generated {} graph(s):", args.count);
    println!("  n = {}", args.n);
    println!("  density = {:.3}", args.density);
    println!("  max_weight = {}", args.max_weight);
    println!("  negative_prob = {:.3}", args.negative_prob);
    println!("  symmetric = {}", args.symmetric);
    if let Some(seed) = args.seed {
        println!("  seed = {}", seed);
    }
    println!("  edges (halved nonzero count) = {}", total_edges);
    println!("  output file: {:?}", args.output);

    Ok(())
}
