mod error;
mod metric;
mod graph;
mod path;
mod domination;
mod collection;
mod relax;
mod parser;
mod output;

use std::io::BufReader;
use std::process::ExitCode;

use clap::{App, Arg, crate_version};

fn run() -> error::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));
	let matches = App::new("Pareto Paths")
							.version(crate_version!())
							.about("Computes the non-dominated path set between every node pair of a multi-metric graph")
							.arg(Arg::with_name("input")
									.takes_value(true)
									.required(true)
									.index(1)
									.help("Input graph file (metrics/nodes/edges sections)"))
							.arg(Arg::with_name("jobs")
									.short("j")
									.long("jobs")
									.takes_value(true)
									.help("Number of worker threads; 1 forces sequential relaxation, omitted uses all cores"))
							.get_matches();

	let input_path = matches.value_of("input").unwrap();
	log::info!("Loading {}", input_path);
	let file = std::fs::File::open(input_path)?;
	let (registry, graph) = parser::parse(BufReader::new(file))?;
	log::info!("Loaded {} metrics, {} nodes, {} edges", registry.len(), graph.node_count(), graph.edge_count());

	log::info!("Initializing non-dominated path table");
	let mut table = collection::PathTable::init(&graph, &registry)?;

	log::info!("Relaxing path table to a fixed point");
	match matches.value_of("jobs").and_then(|j| j.parse::<usize>().ok()) {
		Some(1) => relax::optimize_all_sequential(&mut table, &graph, &registry),
		_ => relax::optimize_all_parallel(&mut table, &graph, &registry),
	}

	log::info!("Writing results");
	let stdout = std::io::stdout();
	let mut lock = stdout.lock();
	output::write_optimized_paths(&mut lock, &graph, &registry, &table)?;

	Ok(())
}

fn main() -> ExitCode {
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			log::error!("{}", e);
			ExitCode::FAILURE
		}
	}
}
