extern crate mlp_trainer;

use clap::{Arg, ArgAction, ArgMatches, Command};

use env_logger::Env;

use log::info;

use rand::rngs::StdRng;
use rand::SeedableRng;

use mlp_trainer::dataloader::*;
use mlp_trainer::network::*;
use mlp_trainer::orchestra::*;
use mlp_trainer::train_cfg::TrainCfg;
use mlp_trainer::util::Float;

fn build_cli() -> Command<'static> {
    Command::new("mlp-trainer")
        .version("0.1.0")
        .about("Train a feed-forward network on one input/expected pair and print the result")
        .arg(
            Arg::new("Cfg")
                .long("cfg")
                .help("Provide train configuration yaml file")
                .takes_value(true)
                .require_equals(true),
        )
        .arg(
            Arg::new("Layers")
                .long("layers")
                .help("Layer sizes, input first [9,4,9 format]")
                .takes_value(true)
                .multiple_values(true)
                .value_delimiter(',')
                .require_equals(true)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("Trials")
                .long("trials")
                .help("Number of training iterations")
                .action(ArgAction::Set)
                .require_equals(true)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("LearningRate")
                .long("learning_rate")
                .help("Gradient descent step size")
                .action(ArgAction::Set)
                .require_equals(true)
                .value_parser(clap::value_parser!(Float)),
        )
        .arg(
            Arg::new("Seed")
                .long("seed")
                .help("Seed of the weight initialization")
                .action(ArgAction::Set)
                .require_equals(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("WeightMin")
                .long("weight_min")
                .help("Inclusive lower bound of initial weights")
                .action(ArgAction::Set)
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(Float)),
        )
        .arg(
            Arg::new("WeightMax")
                .long("weight_max")
                .help("Exclusive upper bound of initial weights")
                .action(ArgAction::Set)
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(Float)),
        )
        .arg(
            Arg::new("Input")
                .long("input")
                .help("Input vector [1,2,3 format]")
                .takes_value(true)
                .multiple_values(true)
                .value_delimiter(',')
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(Float)),
        )
        .arg(
            Arg::new("Expected")
                .long("expected")
                .help("Expected output vector [1,0,1 format]")
                .takes_value(true)
                .multiple_values(true)
                .value_delimiter(',')
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(Float)),
        )
        .arg(
            Arg::new("LogIter")
                .long("log_iter")
                .help("Each log_iter iterations the current error is logged")
                .action(ArgAction::Set)
                .require_equals(true)
                .default_value("0")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("DumpCfg")
                .long("dump_cfg")
                .help("Write the effective train configuration to this yaml file")
                .takes_value(true)
                .require_equals(true),
        )
}

/// Configuration file first, then every command line override on top
fn cfg_from_args(args: &ArgMatches) -> Result<TrainCfg, Box<dyn std::error::Error>> {
    let mut cfg = match args.get_one::<String>("Cfg") {
        Some(path) => TrainCfg::from_file(path)?,
        None => TrainCfg::default(),
    };

    if let Some(layers) = args.get_many::<usize>("Layers") {
        cfg.layers = layers.copied().collect();
    }

    if let Some(trials) = args.get_one::<usize>("Trials") {
        cfg.trials = *trials;
    }

    if let Some(lr) = args.get_one::<Float>("LearningRate") {
        cfg.learning_rate = *lr;
    }

    if let Some(seed) = args.get_one::<u64>("Seed") {
        cfg.seed = *seed;
    }

    if let Some(min) = args.get_one::<Float>("WeightMin") {
        cfg.weight_range.min = *min;
    }

    if let Some(max) = args.get_one::<Float>("WeightMax") {
        cfg.weight_range.max = *max;
    }

    if let Some(input) = args.get_many::<Float>("Input") {
        cfg.input = input.copied().collect();
    }

    if let Some(expected) = args.get_many::<Float>("Expected") {
        cfg.expected = expected.copied().collect();
    }

    cfg.validate()?;

    Ok(cfg)
}

fn print_network_to_console(net: &Network, expected: &[Float]) -> Result<(), Box<dyn std::error::Error>> {
    let output = net.output_layer_values();

    for (exp, out) in expected.iter().zip(output.iter()) {
        println!("{} -> {:.5}", exp, out);
    }
    println!("-----------------");

    println!("Error    {:.5}", net.total_error(expected)?);
    println!();

    println!("{}", net);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = build_cli().get_matches();
    let cfg = cfg_from_args(&matches)?;

    if let Some(out_file) = matches.get_one::<String>("DumpCfg") {
        cfg.to_file(out_file)?;
        info!("Saved train configuration to file {}", out_file);
    }

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let net = Network::with_weight_range(&mut rng, &cfg.layers, cfg.weight_range)?;

    let train_dl = SimpleDataLoader::new(vec![LabeledEntry::new(
        cfg.input.clone(),
        cfg.expected.clone(),
    )])?;

    let log_iter = *matches.get_one::<usize>("LogIter").unwrap_or(&0);

    let mut orc = Orchestra::new(net)
        .learn_rate(cfg.learning_rate)
        .log_iter(log_iter)
        .train_dataloader(Box::new(train_dl));

    orc.train_for_n_times(cfg.trials)?;

    print_network_to_console(orc.network(), &cfg.expected)
}
