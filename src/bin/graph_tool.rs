use clap::{Parser, Subcommand, ValueEnum};
use graph_algebra::{algorithms, parser::parse_graph_file, Graph};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Load adjacency matrices and run graph algorithms or algebra on them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input file containing one or more matrices
    #[arg(short, long)]
    input: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print vertex and edge counts of every graph
    Info,
    /// Print every graph as a nested list
    Render,
    /// Check whether every vertex reaches every other vertex
    Connected,
    /// Fewest-edges path between two vertices
    Path {
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Check for a cycle
    Cycle,
    /// Two-color the graph starting at vertex 0
    Bipartite,
    /// Bellman-Ford negative cycle check from vertex 0
    NegativeCycle,
    /// Combine the first two graphs of the input
    Combine {
        #[arg(long, value_enum)]
        op: BinaryOp,
    },
    /// Multiply every weight of the first graph by a scalar
    Scale {
        #[arg(long, allow_hyphen_values = true)]
        factor: i32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GRAPH_ALGEBRA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("graph_algebra=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn first(graphs: &[Graph]) -> Result<&Graph, Box<dyn std::error::Error>> {
    graphs.first().ok_or_else(|| "input contains no graph".into())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let graphs = parse_graph_file(&args.input)?;
    debug!(count = graphs.len(), input = ?args.input, "parsed input");

    match args.command {
        Command::Info => {
            for graph in &graphs {
                println!("{}", graph.summary());
            }
        }
        Command::Render => {
            for graph in &graphs {
                println!("{}", graph);
            }
        }
        Command::Connected => {
            println!("{}", u8::from(algorithms::is_connected(first(&graphs)?)));
        }
        Command::Path { from, to } => {
            println!("{}", algorithms::shortest_path(first(&graphs)?, from, to)?);
        }
        Command::Cycle => {
            println!("{}", u8::from(algorithms::contains_cycle(first(&graphs)?)));
        }
        Command::Bipartite => {
            println!("{}", algorithms::is_bipartite(first(&graphs)?));
        }
        Command::NegativeCycle => {
            println!("{}", algorithms::negative_cycle(first(&graphs)?));
        }
        Command::Combine { op } => {
            let [g, h, ..] = graphs.as_slice() else {
                return Err(format!("combine needs two graphs, found {}", graphs.len()).into());
            };
            let result = match op {
                BinaryOp::Add => (g + h)?,
                BinaryOp::Sub => (g - h)?,
                BinaryOp::Mul => (g * h)?,
            };
            println!("{}", result);
        }
        Command::Scale { factor } => {
            println!("{}", first(&graphs)? * factor);
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
