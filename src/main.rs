use clap::Parser;
use declique::degeneracy;
use declique::error::Error;
use declique::graph::CsrGraph;
use declique::io::{AdjacencyListReader, EdgeListReader};
use declique::MaxCliqueBuilder;
use log::{debug, error, info};
use std::fs::File;
use std::io::BufReader;
use std::process::exit;
use std::time::Instant;

#[derive(Parser)]
#[command(
    version,
    about = "Maximum-clique size via degeneracy orderings and parameterized vertex cover"
)]
struct Args {
    /// Input format: -e (edge list, 0-based) or -a (adjacency lists, 1-based)
    #[arg(allow_hyphen_values = true)]
    file_type: String,
    /// Path to the graph file
    path: String,
    /// -d prints the degeneracy ordering, -m the maximum-clique size
    #[arg(allow_hyphen_values = true)]
    mode: String,
    /// Worker threads, clamped to the hardware concurrency (the default)
    threads: Option<usize>,
}

fn main() {
    declique::logging::build_logger();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let file = File::open(&args.path)?;
    let reader = BufReader::new(file);
    let graph = match args.file_type.as_str() {
        "-e" => CsrGraph::try_from(EdgeListReader::new(reader, args.path.as_str()))?,
        "-a" => CsrGraph::try_from(AdjacencyListReader::new(reader, args.path.as_str()))?,
        other => {
            return Err(Error::Usage(format!(
                "unknown file type '{}', expected -e or -a",
                other
            )))
        }
    };
    info!(
        "{} n: {} m: {} delta: {} Delta: {} reading time: {:?}",
        graph.name(),
        graph.order(),
        graph.size(),
        graph.min_degree(),
        graph.max_degree(),
        graph.read_time()
    );

    match args.mode.as_str() {
        "-d" => {
            let start = Instant::now();
            let ord = degeneracy::ordering(&graph);
            let degeneracy_time = start.elapsed();
            info!("degeneracy: {}", ord.degeneracy);
            debug!(
                "ordering: {:?}",
                ord.ordering
                    .iter()
                    .map(|&v| graph.alias(v))
                    .collect::<Vec<_>>()
            );
            debug!(
                "right degrees: {:?}",
                (0..graph.order())
                    .map(|v| (graph.alias(v), ord.right_degree[v]))
                    .collect::<Vec<_>>()
            );
            debug!(
                "positions: {:?}",
                (0..graph.order())
                    .map(|v| (graph.alias(v), ord.position[v]))
                    .collect::<Vec<_>>()
            );
            info!("degeneracy running time: {:?}", degeneracy_time);
            println!(
                "{} {} {} {} {} {} {} {}",
                args.path,
                graph.order(),
                graph.size(),
                graph.min_degree(),
                graph.max_degree(),
                graph.read_time().as_secs_f64(),
                ord.degeneracy,
                ord.clique_lb
            );
        }
        "-m" => {
            let hardware = num_cpus::get();
            let threads = args.threads.unwrap_or(hardware).min(hardware).max(1);
            let solver = MaxCliqueBuilder::new().num_threads(threads).build();
            let result = solver.solve(&graph);
            println!(
                "{} {} {} {} {} {} {} {} {} {} {} {}",
                args.path,
                graph.order(),
                graph.size(),
                graph.min_degree(),
                graph.max_degree(),
                graph.read_time().as_secs_f64(),
                result.degeneracy,
                result.ordering_lb,
                result.degeneracy_time.as_secs_f64(),
                result.clique_number,
                result.total_time.as_secs_f64(),
                result.num_threads
            );
        }
        other => {
            return Err(Error::Usage(format!(
                "unknown mode '{}', expected -d or -m",
                other
            )))
        }
    }
    Ok(())
}
